//! Per-frame pointer engine.
//!
//! Single entry point: `process_frame` takes the primary hand (or none)
//! and returns the ordered actions for that frame.  Stages run in a fixed
//! order: mapper → smoothing → pinch (left, right) → scroll → gesture
//! state machine.  Single-threaded and non-blocking; the caller drives it
//! once per video frame.

use std::time::Instant;

use tracing::{debug, info, trace, warn};

use super::action::PointerAction;
use super::config::EngineConfig;
use super::frame_timing::FrameTiming;
use super::mapper::{CoordinateMapper, ScreenGeometry};
use super::pinch::{is_pinching, PinchKind};
use super::scroll::ScrollDetector;
use super::smoothing::SmoothingFilter;
use super::state_machine::GestureStateMachine;
use crate::error::EngineError;
use crate::tracking::HandFrame;

// ── State ──────────────────────────────────────────────────

/// Engine-owned mutable state, updated only through `process_frame`.
#[derive(Debug, Clone, Default)]
pub struct EngineState {
    mapper: CoordinateMapper,
    smoothing: SmoothingFilter,
    scroll: ScrollDetector,
    gestures: GestureStateMachine,
    /// Last smoothed cursor position in pixels.
    last_cursor: Option<(i32, i32)>,
}

impl EngineState {
    fn new(screen: ScreenGeometry) -> Self {
        Self {
            mapper: CoordinateMapper::new(screen),
            ..Self::default()
        }
    }

    /// Clear every filter and latch; screen geometry is kept.
    fn reset(&mut self) {
        self.mapper.reset();
        self.smoothing.reset();
        self.scroll.reset();
        self.gestures.reset();
        self.last_cursor = None;
    }

    pub fn last_cursor(&self) -> Option<(i32, i32)> {
        self.last_cursor
    }

    pub fn left_pinching(&self) -> bool {
        self.gestures.left_pinching()
    }

    pub fn right_pinching(&self) -> bool {
        self.gestures.right_pinching()
    }

    pub fn is_dragging(&self) -> bool {
        self.gestures.is_dragging()
    }

    pub fn prev_scroll_y(&self) -> Option<f32> {
        self.scroll.prev_scroll_y()
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_scrolling()
    }

    /// Number of samples in the smoothing history.
    pub fn history_len(&self) -> usize {
        self.smoothing.len()
    }
}

// ── Engine ─────────────────────────────────────────────────

/// Gesture recognition and pointer-control engine.
pub struct PointerEngine {
    /// Run-time tunables.  Writes become visible on the next frame.
    pub config: EngineConfig,
    state: EngineState,
    timing: FrameTiming,
    /// Whether the previous frame carried a hand.
    hand_present: bool,
    frames_processed: u64,
}

impl PointerEngine {
    /// Create an engine targeting a screen of the given geometry.
    pub fn new(screen: ScreenGeometry, config: EngineConfig) -> Self {
        Self {
            config,
            state: EngineState::new(screen),
            timing: FrameTiming::default(),
            hand_present: false,
            frames_processed: 0,
        }
    }

    /// Process one frame.  `None` (or a frame with no landmarks) means no
    /// hand was detected.
    pub fn process_frame(&mut self, hand: Option<&HandFrame>) -> Vec<PointerAction> {
        let started = Instant::now();

        for fix in self.config.clamp_to_bounds() {
            warn!(%fix, "config value out of range");
        }

        let actions = match hand {
            Some(frame) if !frame.is_empty() => self.process_hand(frame),
            _ => self.process_no_hand(),
        };

        self.frames_processed += 1;
        self.timing
            .record_frame(started.elapsed().as_secs_f64() * 1000.0);
        trace!(frame = self.frames_processed, ?actions, "frame processed");
        actions
    }

    fn process_hand(&mut self, frame: &HandFrame) -> Vec<PointerAction> {
        self.hand_present = true;
        let config = &self.config;
        let state = &mut self.state;
        let mut actions = Vec::new();

        match state.mapper.map(frame, config) {
            Ok(Some((x, y))) => {
                let (sx, sy) = state.smoothing.push(x, y, config.smoothing_window);
                state.last_cursor = Some((sx, sy));
                actions.push(PointerAction::MoveTo { x: sx, y: sy });
            }
            Ok(None) => {}
            Err(e) => debug!(%e, "cursor not updated"),
        }

        let left = is_pinching(frame, PinchKind::Left, config.pinch_threshold);
        let right = is_pinching(frame, PinchKind::Right, config.right_pinch_threshold);
        let scroll = state
            .scroll
            .update(frame, config.scroll_threshold, config.scroll_sensitivity);

        let gesture_actions = state.gestures.update(left, right, config.drag_mode_enabled);

        // A press lands where the cursor is: re-assert the position when the
        // dead zone swallowed this frame's move.
        let moved = actions
            .iter()
            .any(|a| matches!(a, PointerAction::MoveTo { .. }));
        if !moved && gesture_actions.contains(&PointerAction::DragStart) {
            if let Some((x, y)) = state.last_cursor {
                actions.push(PointerAction::MoveTo { x, y });
            }
        }
        actions.extend(gesture_actions);

        if let Some(amount) = scroll {
            debug!(amount, "scroll");
            actions.push(PointerAction::ScrollBy { amount });
        }

        actions
    }

    fn process_no_hand(&mut self) -> Vec<PointerAction> {
        if self.hand_present {
            debug!(error = %EngineError::HandLost, "releasing gesture state");
        }
        self.hand_present = false;
        let actions = self.state.gestures.hand_lost();
        self.state.reset();
        actions
    }

    /// Return to the initial state.  Emits `DragEnd` first if a drag is held.
    pub fn reset(&mut self) -> Vec<PointerAction> {
        let actions = self.state.gestures.hand_lost();
        self.state.reset();
        self.hand_present = false;
        debug!("engine reset");
        actions
    }

    /// Change the mapping target.  Pixel history from the old geometry is
    /// dropped and the dead-zone anchor cleared, so the next hand frame
    /// always places the cursor on the new screen.
    pub fn set_screen_geometry(&mut self, screen: ScreenGeometry) {
        if screen == self.state.mapper.screen() {
            return;
        }
        info!(width = screen.width, height = screen.height, "screen geometry changed");
        self.state.mapper.set_screen(screen);
        self.state.mapper.reset();
        self.state.smoothing.reset();
        self.state.last_cursor = None;
    }

    pub fn screen_geometry(&self) -> ScreenGeometry {
        self.state.mapper.screen()
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn timing(&self) -> &FrameTiming {
        &self.timing
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Generate s-expression for IPC status.
    pub fn status_sexp(&self) -> String {
        let cursor = self
            .state
            .last_cursor
            .map(|(x, y)| format!("(:x {} :y {})", x, y))
            .unwrap_or_else(|| "nil".to_string());
        let anchor = self
            .state
            .prev_scroll_y()
            .map(|y| format!("{:.4}", y))
            .unwrap_or_else(|| "nil".to_string());
        let screen = self.screen_geometry();
        format!(
            "(:hand-present {} :dragging {} :left-pinch {} :right-pinch {} :scrolling {} :cursor {} :scroll-anchor {} :screen (:width {} :height {}) :frames {})",
            sexp_bool(self.hand_present),
            sexp_bool(self.state.is_dragging()),
            sexp_bool(self.state.left_pinching()),
            sexp_bool(self.state.right_pinching()),
            sexp_bool(self.state.is_scrolling()),
            cursor,
            anchor,
            screen.width,
            screen.height,
            self.frames_processed,
        )
    }
}

fn sexp_bool(b: bool) -> &'static str {
    if b {
        "t"
    } else {
        "nil"
    }
}

// ── Tests ──────────────────────────────────────────────────
