//! Gesture recognition and pointer control.
//!
//! Provides:
//! - `CoordinateMapper`: fingertip → screen pixels (dead zone, sensitivity, edge boost)
//! - `SmoothingFilter`: moving-average cursor smoothing
//! - `is_pinching`: memoryless pinch classification
//! - `ScrollDetector`: two-finger vertical scroll
//! - `GestureStateMachine`: edge-triggered drag / right-click latches
//! - `PointerEngine`: the per-frame pipeline tying them together

pub mod action;
pub mod config;
pub mod engine;
pub mod frame_timing;
pub mod mapper;
pub mod pinch;
pub mod scroll;
pub mod smoothing;
pub mod state_machine;

pub use action::PointerAction;
pub use config::EngineConfig;
pub use engine::{EngineState, PointerEngine};
pub use mapper::{CoordinateMapper, ScreenGeometry};
pub use pinch::{is_pinching, PinchKind};
pub use scroll::ScrollDetector;
pub use smoothing::SmoothingFilter;
pub use state_machine::GestureStateMachine;
