//! Index-fingertip → screen-pixel mapping.
//!
//! Dead-zone suppression against the previous raw normalized position,
//! sensitivity scaling, per-axis edge boosting, then conversion to
//! absolute pixels on the target screen.

use tracing::trace;

use super::config::EngineConfig;
use crate::error::EngineResult;
use crate::tracking::{HandFrame, LandmarkIndex};

/// Distance from either normalized boundary inside which edge boosting applies.
pub const EDGE_MARGIN: f32 = 0.05;

// ── Screen geometry ────────────────────────────────────────

/// Pixel dimensions of the pointer's mapping target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGeometry {
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl ScreenGeometry {
    /// Create a geometry; zero extents are raised to one pixel.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Parse a "WxH" resolution string. Returns None unless both parts are positive.
    pub fn parse_resolution(s: &str) -> Option<Self> {
        let (w, h) = s.split_once('x')?;
        let w = w.trim().parse::<u32>().ok()?;
        let h = h.trim().parse::<u32>().ok()?;
        if w > 0 && h > 0 {
            Some(Self::new(w, h))
        } else {
            None
        }
    }
}

// ── Pure mapping steps ─────────────────────────────────────

/// Scale a normalized coordinate by `sensitivity`, clamped to [0, 1].
pub fn apply_sensitivity(v: f32, sensitivity: f32) -> f32 {
    (v * sensitivity).clamp(0.0, 1.0)
}

/// Amplify the part of `v` that lies past the edge margin, then re-clamp.
pub fn edge_boost(v: f32, factor: f32) -> f32 {
    let low = EDGE_MARGIN;
    let high = 1.0 - EDGE_MARGIN;
    let boosted = if v < low {
        low - (low - v) * factor
    } else if v > high {
        high + (v - high) * factor
    } else {
        v
    };
    boosted.clamp(0.0, 1.0)
}

/// Convert a normalized coordinate to a pixel index on an axis of `extent` pixels.
pub fn to_pixel(v: f32, extent: u32) -> i32 {
    let max = extent.saturating_sub(1) as i32;
    ((v * extent as f32).floor() as i32).clamp(0, max)
}

// ── Mapper ─────────────────────────────────────────────────

/// Stateful mapper; remembers the last raw position it acted on.
#[derive(Debug, Clone, Default)]
pub struct CoordinateMapper {
    screen: ScreenGeometry,
    prev_raw: Option<(f32, f32)>,
}

impl CoordinateMapper {
    pub fn new(screen: ScreenGeometry) -> Self {
        Self {
            screen,
            prev_raw: None,
        }
    }

    pub fn screen(&self) -> ScreenGeometry {
        self.screen
    }

    pub fn set_screen(&mut self, screen: ScreenGeometry) {
        self.screen = screen;
    }

    /// Last raw normalized position that produced output.
    pub fn prev_raw(&self) -> Option<(f32, f32)> {
        self.prev_raw
    }

    /// Map the index fingertip to screen pixels.
    ///
    /// `Ok(None)` means the movement fell inside the dead zone; the anchor
    /// is kept so slow drift accumulates until it escapes.  A frame without
    /// the index tip yields `MissingLandmark` and leaves the anchor untouched.
    pub fn map(
        &mut self,
        frame: &HandFrame,
        config: &EngineConfig,
    ) -> EngineResult<Option<(i32, i32)>> {
        let tip = frame.get(LandmarkIndex::IndexTip)?;
        let (x_norm, y_norm) = (tip.x, tip.y);

        if let Some((px, py)) = self.prev_raw {
            let dx = (x_norm - px).abs();
            let dy = (y_norm - py).abs();
            if dx < config.dead_zone && dy < config.dead_zone {
                trace!(dx, dy, "movement inside dead zone");
                return Ok(None);
            }
        }
        self.prev_raw = Some((x_norm, y_norm));

        let x = edge_boost(apply_sensitivity(x_norm, config.sensitivity), config.edge_boost_factor);
        let y = edge_boost(apply_sensitivity(y_norm, config.sensitivity), config.edge_boost_factor);

        Ok(Some((
            to_pixel(x, self.screen.width),
            to_pixel(y, self.screen.height),
        )))
    }

    /// Forget the dead-zone anchor.
    pub fn reset(&mut self) {
        self.prev_raw = None;
    }
}
