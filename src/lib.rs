//! hand-pointer — turns per-frame hand keypoints into pointer actions.
//!
//! The keypoint source, the pointer injector and any settings UI are
//! external.  This crate owns the engine in between plus a line-oriented
//! s-expression driver for running it as a process.

pub mod driver;
pub mod error;
pub mod gesture;
pub mod ipc;
pub mod tracking;

pub use error::EngineError;
pub use gesture::{EngineConfig, PointerAction, PointerEngine, ScreenGeometry};
pub use tracking::{HandFrame, Landmark, LandmarkIndex};
