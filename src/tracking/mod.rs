//! Keypoint input model shared by every detector.

pub mod hand_landmarks;

pub use hand_landmarks::{planar_distance, HandFrame, Landmark, LandmarkIndex, LANDMARK_COUNT};
