//! Edge-triggered gesture state.
//!
//! Turns per-frame pinch levels into a well-formed action sequence:
//! drag start/end pairs never stack, right pinch clicks once per press,
//! and losing the hand always releases a held button.

use tracing::debug;

use super::action::PointerAction;

/// Cross-frame latch state for pinch gestures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GestureStateMachine {
    left_pinching: bool,
    right_pinching: bool,
    is_dragging: bool,
}

impl GestureStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame with the current pinch levels.
    ///
    /// With drag mode off a left press emits `DragStart` + `DragEnd`
    /// together (a click) and nothing is held.
    pub fn update(&mut self, left: bool, right: bool, drag_mode: bool) -> Vec<PointerAction> {
        let mut actions = Vec::new();

        // Drag mode switched off mid-drag: release now.
        if self.is_dragging && !drag_mode {
            self.is_dragging = false;
            debug!("drag released: drag mode disabled");
            actions.push(PointerAction::DragEnd);
        }

        match (self.left_pinching, left) {
            (false, true) => {
                self.left_pinching = true;
                if drag_mode {
                    self.is_dragging = true;
                    debug!("drag started");
                    actions.push(PointerAction::DragStart);
                } else {
                    debug!("left click");
                    actions.push(PointerAction::DragStart);
                    actions.push(PointerAction::DragEnd);
                }
            }
            (true, false) => {
                self.left_pinching = false;
                if self.is_dragging {
                    self.is_dragging = false;
                    debug!("drag ended");
                    actions.push(PointerAction::DragEnd);
                }
            }
            _ => {}
        }

        match (self.right_pinching, right) {
            (false, true) => {
                self.right_pinching = true;
                debug!("right click");
                actions.push(PointerAction::RightClick);
            }
            (true, false) => {
                self.right_pinching = false;
            }
            _ => {}
        }

        actions
    }

    /// Hand lost: release any held drag, then clear every latch.
    pub fn hand_lost(&mut self) -> Vec<PointerAction> {
        let mut actions = Vec::new();
        if self.is_dragging {
            debug!("drag released: hand lost");
            actions.push(PointerAction::DragEnd);
        }
        self.reset();
        actions
    }

    pub fn left_pinching(&self) -> bool {
        self.left_pinching
    }

    pub fn right_pinching(&self) -> bool {
        self.right_pinching
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Clear latches without emitting anything.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
