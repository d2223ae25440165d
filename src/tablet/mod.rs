use crate::app::pointer::{PointerAction, PointerEvent, PointerSource};
use eframe::egui::{Pos2, pos2};
use octotablet::{
    builder::Builder,
    events::{Event, ToolEvent},
};
use std::panic::{self, AssertUnwindSafe};

/// Pen tablet bridge: pumps octotablet events and emits pen pointer samples.
pub struct TabletInput {
    manager: octotablet::Manager,
    last_pos: Pos2,
}

impl TabletInput {
    /// Create a tablet input manager using the eframe creation context for a window handle.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Option<Self> {
        // The mouse already reaches the widget through egui.
        let builder = Builder::new().emulate_tool_from_mouse(false);

        // octotablet can panic on Windows/Wine if COM is missing
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            // Safety: matches the octotablet eframe example; drops before window.
            unsafe { builder.build_raw(cc) }
        }));

        match result {
            Ok(Ok(manager)) => Some(Self {
                manager,
                last_pos: Pos2::ZERO,
            }),
            Ok(Err(e)) => {
                log::error!("Failed to initialize tablet: {:?}", e);
                None
            }
            Err(_) => {
                log::error!("Tablet initialization panicked (likely missing COM classes in Wine)");
                None
            }
        }
    }

    /// Pump events and return pen samples in logical egui points.
    pub fn poll(&mut self, pixels_per_point: f32) -> Vec<PointerEvent> {
        let events = match self.manager.pump() {
            Ok(evts) => evts,
            Err(_) => return Vec::new(),
        };
        let mut out = Vec::new();
        for event in events {
            let Event::Tool { event, .. } = event else {
                continue;
            };
            let action = match event {
                ToolEvent::Down => PointerAction::Down(self.last_pos),
                ToolEvent::Up => PointerAction::Up,
                ToolEvent::Out | ToolEvent::Removed => PointerAction::Leave,
                ToolEvent::Pose(pose) => {
                    self.last_pos = to_points(pose.position, pixels_per_point);
                    PointerAction::Move(self.last_pos)
                }
                _ => continue,
            };
            out.push(PointerEvent {
                source: PointerSource::Pen,
                action,
            });
        }
        out
    }
}

/// octotablet reports physical pixels; egui works in points.
fn to_points(position: [f32; 2], pixels_per_point: f32) -> Pos2 {
    let scale = if pixels_per_point > 0.0 {
        1.0 / pixels_per_point
    } else {
        1.0
    };
    pos2(position[0] * scale, position[1] * scale)
}
