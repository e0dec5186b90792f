//! Run-time tunable engine configuration.
//!
//! Owned by whatever control surface edits it (settings panel, protocol
//! client).  Fields are plain public values; the engine re-validates them
//! at the start of every frame, so an out-of-range write is clamped
//! instead of crashing the session.

use std::ops::RangeInclusive;

use crate::error::EngineError;

/// Bounds for `smoothing_window`.
pub const SMOOTHING_WINDOW_RANGE: RangeInclusive<usize> = 1..=30;
/// Bounds for `sensitivity`.
pub const SENSITIVITY_RANGE: RangeInclusive<f32> = 0.01..=3.0;
/// Bounds for `dead_zone`.
pub const DEAD_ZONE_RANGE: RangeInclusive<f32> = 0.0..=0.5;
/// Bounds for `edge_boost_factor`.
pub const EDGE_BOOST_RANGE: RangeInclusive<f32> = 1.0..=5.0;
/// Bounds for both pinch thresholds.
pub const PINCH_THRESHOLD_RANGE: RangeInclusive<f32> = 0.01..=0.2;
/// Bounds for `scroll_threshold`.
pub const SCROLL_THRESHOLD_RANGE: RangeInclusive<f32> = 0.001..=0.2;
/// Bounds for `scroll_sensitivity`.
pub const SCROLL_SENSITIVITY_RANGE: RangeInclusive<f32> = 1.0..=1000.0;

/// Configuration for cursor mapping and gesture thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Number of samples in the moving-average window.
    pub smoothing_window: usize,
    /// Multiplier applied to normalized coordinates.
    pub sensitivity: f32,
    /// Minimum normalized movement per axis before the cursor follows.
    pub dead_zone: f32,
    /// Amplification applied to the part of a coordinate past the edge margin.
    pub edge_boost_factor: f32,
    /// Thumb-to-index distance (normalized) below which a left pinch is asserted.
    pub pinch_threshold: f32,
    /// Thumb-to-middle distance (normalized) below which a right pinch is asserted.
    pub right_pinch_threshold: f32,
    /// Minimum normalized vertical delta of the two-finger centroid to scroll.
    pub scroll_threshold: f32,
    /// Scroll units per normalized vertical delta.
    pub scroll_sensitivity: f32,
    /// Left pinch holds the button (drag) instead of clicking.
    pub drag_mode_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            smoothing_window: 5,
            sensitivity: 1.0,
            dead_zone: 0.002,
            edge_boost_factor: 1.5,
            pinch_threshold: 0.04,
            right_pinch_threshold: 0.04,
            scroll_threshold: 0.03,
            scroll_sensitivity: 100.0,
            drag_mode_enabled: true,
        }
    }
}

impl EngineConfig {
    /// Clamp every field into its bounds.  Non-finite floats fall back to
    /// the default value.  Returns one `InvalidConfig` per corrected field.
    pub fn clamp_to_bounds(&mut self) -> Vec<EngineError> {
        let defaults = Self::default();
        let mut fixes = Vec::new();

        let window = self.smoothing_window;
        let clamped_window = window.clamp(*SMOOTHING_WINDOW_RANGE.start(), *SMOOTHING_WINDOW_RANGE.end());
        if clamped_window != window {
            self.smoothing_window = clamped_window;
            fixes.push(EngineError::InvalidConfig {
                field: "smoothing_window",
                value: window as f64,
                clamped: clamped_window as f64,
            });
        }

        clamp_field(&mut self.sensitivity, "sensitivity", &SENSITIVITY_RANGE, defaults.sensitivity, &mut fixes);
        clamp_field(&mut self.dead_zone, "dead_zone", &DEAD_ZONE_RANGE, defaults.dead_zone, &mut fixes);
        clamp_field(
            &mut self.edge_boost_factor,
            "edge_boost_factor",
            &EDGE_BOOST_RANGE,
            defaults.edge_boost_factor,
            &mut fixes,
        );
        clamp_field(
            &mut self.pinch_threshold,
            "pinch_threshold",
            &PINCH_THRESHOLD_RANGE,
            defaults.pinch_threshold,
            &mut fixes,
        );
        clamp_field(
            &mut self.right_pinch_threshold,
            "right_pinch_threshold",
            &PINCH_THRESHOLD_RANGE,
            defaults.right_pinch_threshold,
            &mut fixes,
        );
        clamp_field(
            &mut self.scroll_threshold,
            "scroll_threshold",
            &SCROLL_THRESHOLD_RANGE,
            defaults.scroll_threshold,
            &mut fixes,
        );
        clamp_field(
            &mut self.scroll_sensitivity,
            "scroll_sensitivity",
            &SCROLL_SENSITIVITY_RANGE,
            defaults.scroll_sensitivity,
            &mut fixes,
        );

        fixes
    }

    /// Set a field by its protocol (kebab-case) name.  Returns false for
    /// unknown names.  Values are not clamped here; the engine does that
    /// on the next frame.
    pub fn set_by_name(&mut self, name: &str, value: f64) -> bool {
        match name {
            "smoothing-window" => {
                // Negative or fractional input rounds toward the lower bound.
                self.smoothing_window = if value.is_finite() && value > 0.0 {
                    value.round() as usize
                } else {
                    0
                };
            }
            "sensitivity" => self.sensitivity = value as f32,
            "dead-zone" => self.dead_zone = value as f32,
            "edge-boost-factor" => self.edge_boost_factor = value as f32,
            "pinch-threshold" => self.pinch_threshold = value as f32,
            "right-pinch-threshold" => self.right_pinch_threshold = value as f32,
            "scroll-threshold" => self.scroll_threshold = value as f32,
            "scroll-sensitivity" => self.scroll_sensitivity = value as f32,
            "drag-mode-enabled" => self.drag_mode_enabled = value != 0.0,
            _ => return false,
        }
        true
    }

    /// Generate s-expression for IPC config.
    pub fn config_sexp(&self) -> String {
        format!(
            "(:smoothing-window {} :sensitivity {:.2} :dead-zone {:.4} :edge-boost-factor {:.2} :pinch-threshold {:.3} :right-pinch-threshold {:.3} :scroll-threshold {:.3} :scroll-sensitivity {:.1} :drag-mode-enabled {})",
            self.smoothing_window,
            self.sensitivity,
            self.dead_zone,
            self.edge_boost_factor,
            self.pinch_threshold,
            self.right_pinch_threshold,
            self.scroll_threshold,
            self.scroll_sensitivity,
            if self.drag_mode_enabled { "t" } else { "nil" },
        )
    }
}

/// Names accepted by `EngineConfig::set_by_name`.
pub const CONFIG_KEYS: [&str; 9] = [
    "smoothing-window",
    "sensitivity",
    "dead-zone",
    "edge-boost-factor",
    "pinch-threshold",
    "right-pinch-threshold",
    "scroll-threshold",
    "scroll-sensitivity",
    "drag-mode-enabled",
];

fn clamp_field(
    value: &mut f32,
    field: &'static str,
    range: &RangeInclusive<f32>,
    default: f32,
    fixes: &mut Vec<EngineError>,
) {
    let original = *value;
    let clamped = if original.is_finite() {
        original.clamp(*range.start(), *range.end())
    } else {
        default
    };
    // NaN != NaN, so compare bit patterns to catch it as a change.
    if clamped.to_bits() != original.to_bits() {
        *value = clamped;
        fixes.push(EngineError::InvalidConfig {
            field,
            value: original as f64,
            clamped: clamped as f64,
        });
    }
}
