//! Moving-average cursor smoothing.
//!
//! Equal-weight mean over the most recent `window` pixel samples.  Output
//! never leaves the [min, max] range of the buffered inputs; the price is
//! phase lag proportional to the window size.

use std::collections::VecDeque;

/// Bounded x/y history with a moving-average output.
#[derive(Debug, Clone, Default)]
pub struct SmoothingFilter {
    xs: VecDeque<i32>,
    ys: VecDeque<i32>,
}

impl SmoothingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample and return the mean of the buffered samples.
    ///
    /// `window` is read on every call; shrinking it drops the oldest
    /// samples, growing it only lets the buffer fill further.
    pub fn push(&mut self, x: i32, y: i32, window: usize) -> (i32, i32) {
        let window = window.max(1);
        Self::push_sample(&mut self.xs, x, window);
        Self::push_sample(&mut self.ys, y, window);
        (Self::mean(&self.xs), Self::mean(&self.ys))
    }

    fn push_sample(samples: &mut VecDeque<i32>, value: i32, window: usize) {
        samples.push_back(value);
        while samples.len() > window {
            samples.pop_front();
        }
    }

    fn mean(samples: &VecDeque<i32>) -> i32 {
        if samples.is_empty() {
            return 0;
        }
        let sum: i64 = samples.iter().map(|&v| v as i64).sum();
        (sum as f64 / samples.len() as f64).round() as i32
    }

    /// Number of buffered samples.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Drop all history.
    pub fn reset(&mut self) {
        self.xs.clear();
        self.ys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_passes_through() {
        let mut filter = SmoothingFilter::new();
        assert_eq!(filter.push(100, 200, 5), (100, 200));
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn test_mean_of_partial_buffer() {
        let mut filter = SmoothingFilter::new();
        filter.push(0, 0, 5);
        assert_eq!(filter.push(100, 50, 5), (50, 25));
    }

    #[test]
    fn test_window_discards_oldest() {
        let mut filter = SmoothingFilter::new();
        for x in [1000, 10, 20, 30] {
            filter.push(x, 0, 3);
        }
        assert_eq!(filter.len(), 3);
        assert_eq!(filter.push(40, 0, 3), (30, 0));
    }

    #[test]
    fn test_output_within_buffered_range() {
        let mut filter = SmoothingFilter::new();
        let inputs = [500, 13, 977, 240, 240, 801, 3, 660, 422, 999, 0, 512];
        let window = 4;
        for (i, &x) in inputs.iter().enumerate() {
            let (out, _) = filter.push(x, 0, window);
            let start = (i + 1).saturating_sub(window);
            let recent = &inputs[start..=i];
            let min = *recent.iter().min().unwrap();
            let max = *recent.iter().max().unwrap();
            assert!(
                out >= min && out <= max,
                "output {} outside [{}, {}] at step {}",
                out, min, max, i,
            );
        }
    }

    #[test]
    fn test_shrinking_window_keeps_newest() {
        let mut filter = SmoothingFilter::new();
        for x in [10, 20, 30, 40, 50] {
            filter.push(x, x, 5);
        }
        assert_eq!(filter.push(60, 60, 2), (55, 55));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_zero_window_treated_as_one() {
        let mut filter = SmoothingFilter::new();
        filter.push(10, 10, 0);
        assert_eq!(filter.push(90, 30, 0), (90, 30));
    }

    #[test]
    fn test_reset() {
        let mut filter = SmoothingFilter::new();
        filter.push(10, 10, 3);
        filter.reset();
        assert!(filter.is_empty());
        assert_eq!(filter.push(70, 80, 3), (70, 80));
    }
}
