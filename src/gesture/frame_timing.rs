//! Per-frame processing latency statistics.
//!
//! Tracks how long the engine spends on each frame and keeps rolling
//! percentiles for status reporting.

use std::collections::VecDeque;

/// Rolling frame timing statistics over a window of samples.
#[derive(Debug)]
pub struct FrameTiming {
    /// Per-frame processing time in milliseconds.
    pub process_times: VecDeque<f64>,
    /// Maximum number of samples to keep.
    pub window_size: usize,
    /// Total frames recorded.
    pub total_frames: u64,
    /// Frames that exceeded the budget.
    pub missed_frames: u64,
    /// Frame budget in milliseconds (33.3 for 30 fps).
    pub budget_ms: f64,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new(300, 33.3)
    }
}

impl FrameTiming {
    pub fn new(window_size: usize, budget_ms: f64) -> Self {
        Self {
            process_times: VecDeque::with_capacity(window_size),
            window_size: window_size.max(1),
            total_frames: 0,
            missed_frames: 0,
            budget_ms,
        }
    }

    /// Record one frame's processing time.
    pub fn record_frame(&mut self, process_ms: f64) {
        self.process_times.push_back(process_ms);
        if self.process_times.len() > self.window_size {
            self.process_times.pop_front();
        }

        self.total_frames += 1;
        if process_ms > self.budget_ms {
            self.missed_frames += 1;
        }
    }

    /// Compute percentile from a sorted slice.
    fn percentile(sorted: &[f64], p: f64) -> f64 {
        if sorted.is_empty() {
            return 0.0;
        }
        let idx = ((sorted.len() as f64 - 1.0) * p / 100.0).round() as usize;
        sorted[idx.min(sorted.len() - 1)]
    }

    /// Get timing statistics as percentiles.
    pub fn stats(&self) -> FrameTimingStats {
        let mut sorted: Vec<f64> = self.process_times.iter().copied().collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        FrameTimingStats {
            p50: Self::percentile(&sorted, 50.0),
            p95: Self::percentile(&sorted, 95.0),
            p99: Self::percentile(&sorted, 99.0),
            max: sorted.last().copied().unwrap_or(0.0),
            missed_pct: if self.total_frames > 0 {
                (self.missed_frames as f64 / self.total_frames as f64) * 100.0
            } else {
                0.0
            },
            total_frames: self.total_frames,
            missed_frames: self.missed_frames,
        }
    }

    /// Format stats as an s-expression for IPC.
    pub fn stats_sexp(&self) -> String {
        let s = self.stats();
        format!(
            "(:process-p50 {:.3} :process-p95 {:.3} :process-p99 {:.3} :process-max {:.3} :missed-pct {:.1} :total-frames {} :missed-frames {})",
            s.p50, s.p95, s.p99, s.max, s.missed_pct, s.total_frames, s.missed_frames,
        )
    }
}

/// Computed frame timing statistics (milliseconds).
#[derive(Debug, Clone)]
pub struct FrameTimingStats {
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
    pub max: f64,
    pub missed_pct: f64,
    pub total_frames: u64,
    pub missed_frames: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let ft = FrameTiming::new(100, 33.3);
        let stats = ft.stats();
        assert_eq!(stats.total_frames, 0);
        assert_eq!(stats.missed_frames, 0);
        assert_eq!(stats.p50, 0.0);
    }

    #[test]
    fn test_record_frame() {
        let mut ft = FrameTiming::new(100, 33.3);
        ft.record_frame(0.4);
        assert_eq!(ft.total_frames, 1);
        assert_eq!(ft.missed_frames, 0);
        assert!((ft.stats().p50 - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_missed_frame_detection() {
        let mut ft = FrameTiming::new(100, 10.0);
        ft.record_frame(12.0);
        assert_eq!(ft.missed_frames, 1);
        ft.record_frame(3.0);
        assert_eq!(ft.missed_frames, 1);
        assert_eq!(ft.total_frames, 2);
        assert!((ft.stats().missed_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_size_trim() {
        let mut ft = FrameTiming::new(5, 33.3);
        for i in 0..10 {
            ft.record_frame(i as f64);
        }
        assert_eq!(ft.process_times.len(), 5);
        assert_eq!(ft.total_frames, 10);
        assert_eq!(ft.stats().max, 9.0);
    }

    #[test]
    fn test_stats_sexp_format() {
        let mut ft = FrameTiming::new(100, 33.3);
        ft.record_frame(0.5);
        let sexp = ft.stats_sexp();
        assert!(sexp.starts_with("(:process-p50"));
        assert!(sexp.contains(":total-frames 1"));
        assert!(lexpr::from_str(&sexp).is_ok());
    }
}
