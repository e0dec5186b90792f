//! Hand landmark data structures.
//!
//! Models the 21-point hand keypoint convention produced by the external
//! keypoint source (0 = wrist, 4 = thumb tip, 8 = index tip, 12 = middle
//! tip, ...).  Coordinates are normalized to image space.  Frames may be
//! short; lookups report `MissingLandmark` instead of panicking.

use crate::error::{EngineError, EngineResult};

// ── Landmark definitions ───────────────────────────────────

/// The 21 hand keypoints, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkIndex {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// Total number of landmarks in a complete hand frame.
pub const LANDMARK_COUNT: usize = 21;

impl LandmarkIndex {
    /// Position of this landmark in a hand frame (0-20).
    pub fn index(&self) -> usize {
        *self as usize
    }
}

// ── Landmark ───────────────────────────────────────────────

/// One keypoint.  `x`/`y` are normalized to [0,1] image space; `z` is
/// camera-relative depth and unused by the pointer engine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Euclidean distance in the (x, y) plane.  Depth from a single camera is
/// too noisy to take part in pinch decisions.
pub fn planar_distance(a: &Landmark, b: &Landmark) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

// ── Hand frame ─────────────────────────────────────────────

/// The landmarks of one hand for one video frame.
///
/// Normally holds exactly `LANDMARK_COUNT` entries, but the keypoint
/// source is not trusted: shorter sequences are kept as-is and each
/// consumer checks for the indices it needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandFrame {
    landmarks: Vec<Landmark>,
}

impl HandFrame {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Number of landmarks present.
    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Look up a landmark, reporting `MissingLandmark` for short frames.
    pub fn get(&self, which: LandmarkIndex) -> EngineResult<&Landmark> {
        self.landmarks
            .get(which.index())
            .ok_or(EngineError::MissingLandmark {
                index: which.index(),
                len: self.landmarks.len(),
            })
    }

    /// Planar distance between two landmarks of this frame.
    pub fn distance(&self, a: LandmarkIndex, b: LandmarkIndex) -> EngineResult<f32> {
        Ok(planar_distance(self.get(a)?, self.get(b)?))
    }
}

/// Create a complete frame with every landmark at the origin.
#[cfg(test)]
pub(crate) fn test_frame() -> HandFrame {
    HandFrame::new(vec![Landmark::default(); LANDMARK_COUNT])
}

/// Create a complete frame with the given landmarks placed.
#[cfg(test)]
pub(crate) fn test_frame_with(points: &[(LandmarkIndex, f32, f32)]) -> HandFrame {
    let mut frame = test_frame();
    for &(which, x, y) in points {
        frame.landmarks[which.index()] = Landmark::new(x, y, 0.0);
    }
    frame
}

// ── Tests ──────────────────────────────────────────────────
