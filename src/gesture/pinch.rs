//! Pinch classification.
//!
//! Memoryless: a pinch is "thumb tip within `threshold` of a fingertip"
//! in the normalized (x, y) plane.  Edge triggering lives in the state
//! machine, not here.

use crate::tracking::{HandFrame, LandmarkIndex};

/// Which fingertip the thumb pinches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinchKind {
    /// Thumb + index: primary button.
    Left,
    /// Thumb + middle: secondary click.
    Right,
}

impl PinchKind {
    /// Fingertip paired with the thumb for this pinch.
    pub fn fingertip(&self) -> LandmarkIndex {
        match self {
            Self::Left => LandmarkIndex::IndexTip,
            Self::Right => LandmarkIndex::MiddleTip,
        }
    }
}

/// Whether `kind` is pinched in `frame`.  Short frames read as "not
/// pinching" so a dropped landmark never asserts a button.
pub fn is_pinching(frame: &HandFrame, kind: PinchKind, threshold: f32) -> bool {
    frame
        .distance(LandmarkIndex::ThumbTip, kind.fingertip())
        .map(|d| d < threshold)
        .unwrap_or(false)
}
