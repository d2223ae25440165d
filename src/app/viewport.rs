use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Viewports narrower than this are treated as touch-first.
pub const NARROW_BREAKPOINT: f32 = 1024.0;

pub fn is_narrow(width: f32) -> bool {
    width < NARROW_BREAKPOINT
}

type Listener = Box<dyn FnMut(f32)>;

struct Inner {
    width: f32,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Window width published by the host and observed by widgets.
///
/// The host calls [`ViewportSignal::set_width`] once per frame; listeners only
/// run when the value actually changes. Listeners must not touch the signal
/// itself while being notified.
#[derive(Clone)]
pub struct ViewportSignal {
    inner: Rc<RefCell<Inner>>,
}

impl ViewportSignal {
    pub fn new(width: f32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                width,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn set_width(&self, width: f32) {
        let mut inner = self.inner.borrow_mut();
        if inner.width == width {
            return;
        }
        inner.width = width;
        for (_, listener) in inner.listeners.iter_mut() {
            listener(width);
        }
    }

    /// Register `listener`; it is called right away with the current width.
    pub fn subscribe(&self, mut listener: impl FnMut(f32) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        listener(inner.width);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Box::new(listener)));
        Subscription {
            id,
            signal: Rc::downgrade(&self.inner),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Handle returned by [`ViewportSignal::subscribe`]; dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    signal: Weak<RefCell<Inner>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.signal.upgrade() {
            inner.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
