use crate::utils::vector::Vec2;
use eframe::egui::{self, Pos2, Rect};

/// Device a pointer sample came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch(u64),
    Pen,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerAction {
    Down(Pos2),
    Move(Pos2),
    Up,
    Leave,
}

/// A normalized pointer sample in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub source: PointerSource,
    pub action: PointerAction,
}

impl PointerEvent {
    pub fn mouse(action: PointerAction) -> Self {
        Self {
            source: PointerSource::Mouse,
            action,
        }
    }

    /// Translate an egui input event. Only the primary button is considered.
    pub fn from_egui(event: &egui::Event) -> Option<Self> {
        let event = match event {
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed,
                ..
            } => Self::mouse(if *pressed {
                PointerAction::Down(*pos)
            } else {
                PointerAction::Up
            }),
            egui::Event::PointerMoved(pos) => Self::mouse(PointerAction::Move(*pos)),
            egui::Event::PointerGone => Self::mouse(PointerAction::Leave),
            egui::Event::Touch { id, phase, pos, .. } => Self {
                source: PointerSource::Touch(id.0),
                action: match phase {
                    egui::TouchPhase::Start => PointerAction::Down(*pos),
                    egui::TouchPhase::Move => PointerAction::Move(*pos),
                    egui::TouchPhase::End => PointerAction::Up,
                    egui::TouchPhase::Cancel => PointerAction::Leave,
                },
            },
            _ => return None,
        };
        Some(event)
    }
}

/// Turns pointer samples into surface-local erase positions.
///
/// Erasing starts on a press inside the active region once the image has
/// loaded and stops on release or when the pointer leaves the region. The
/// pointer that started erasing owns the stroke until then; samples from any
/// other mouse, finger or pen are dropped meanwhile.
#[derive(Debug, Default)]
pub struct PointerTracker {
    erasing: bool,
    last: Option<Vec2>,
    owner: Option<PointerSource>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_erasing(&self) -> bool {
        self.erasing
    }

    /// Last position seen inside the region, surface-local.
    pub fn last_position(&self) -> Option<Vec2> {
        self.last
    }

    /// Feed one sample. Returns the local position to stamp, if any.
    pub fn handle(&mut self, event: PointerEvent, region: Option<Rect>, loaded: bool) -> Option<Vec2> {
        if self.owner.is_some_and(|owner| owner != event.source) {
            return None;
        }

        match event.action {
            PointerAction::Down(pos) => {
                let inside = region.is_some_and(|r| r.contains(pos));
                if !inside || !loaded {
                    return None;
                }
                self.erasing = true;
                self.owner = Some(event.source);
                self.track(pos, region, loaded)
            }
            PointerAction::Move(pos) => self.track(pos, region, loaded),
            PointerAction::Up | PointerAction::Leave => {
                self.stop();
                None
            }
        }
    }

    fn stop(&mut self) {
        self.erasing = false;
        self.owner = None;
    }

    fn track(&mut self, pos: Pos2, region: Option<Rect>, loaded: bool) -> Option<Vec2> {
        let region = region.filter(|_| loaded)?;
        if !region.contains(pos) {
            if self.erasing {
                log::trace!("pointer left the reveal region, stop erasing");
                self.stop();
            }
            return None;
        }

        let local = Vec2::from(pos - region.min);
        self.last = Some(local);
        self.erasing.then_some(local)
    }
}
