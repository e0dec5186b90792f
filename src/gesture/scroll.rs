//! Two-finger vertical scroll detection.
//!
//! Tracks the y centroid of the index and middle fingertips.  The anchor
//! follows the centroid every frame, so scrolling is continuous instead of
//! resetting after each event.

use tracing::trace;

use crate::tracking::{HandFrame, LandmarkIndex};

/// Centroid-tracking scroll detector.
#[derive(Debug, Clone, Default)]
pub struct ScrollDetector {
    prev_scroll_y: Option<f32>,
    is_scrolling: bool,
}

/// Vertical centroid of the index and middle fingertips, if both are present.
pub fn two_finger_y(frame: &HandFrame) -> Option<f32> {
    let index = frame.get(LandmarkIndex::IndexTip).ok()?;
    let middle = frame.get(LandmarkIndex::MiddleTip).ok()?;
    Some((index.y + middle.y) / 2.0)
}

impl ScrollDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame; returns a scroll amount when the centroid moved more
    /// than `threshold`.  Moving the fingers up (smaller y) yields a
    /// positive amount.  A frame missing either fingertip drops the anchor
    /// so reacquisition cannot produce a jump.
    pub fn update(&mut self, frame: &HandFrame, threshold: f32, sensitivity: f32) -> Option<i32> {
        let avg_y = match two_finger_y(frame) {
            Some(y) => y,
            None => {
                self.reset();
                return None;
            }
        };

        let amount = match self.prev_scroll_y {
            Some(prev) => {
                let dy = avg_y - prev;
                if dy.abs() > threshold {
                    self.is_scrolling = true;
                    Some((-dy * sensitivity).round() as i32)
                } else {
                    self.is_scrolling = false;
                    None
                }
            }
            None => {
                self.is_scrolling = false;
                None
            }
        };
        self.prev_scroll_y = Some(avg_y);

        // A sub-unit delta above threshold can round to zero; not worth emitting.
        match amount {
            Some(0) => None,
            Some(a) => {
                trace!(amount = a, avg_y, "scroll");
                Some(a)
            }
            None => None,
        }
    }

    /// Current scroll anchor.
    pub fn prev_scroll_y(&self) -> Option<f32> {
        self.prev_scroll_y
    }

    /// Whether the last frame produced a scroll.
    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn reset(&mut self) {
        self.prev_scroll_y = None;
        self.is_scrolling = false;
    }
}
