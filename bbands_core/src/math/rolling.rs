use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::common::utils::UNDEFINED;

/// Mean and sample standard deviation of one trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowStat {
    pub mean: f64,
    pub std: f64,
}

impl WindowStat {
    pub const UNDEFINED: Self = Self {
        mean: UNDEFINED,
        std: UNDEFINED,
    };

    pub fn is_defined(&self) -> bool {
        !self.mean.is_nan() && !self.std.is_nan()
    }
}

/// Streaming trailing-window aggregator.
///
/// Each `add` returns the stat of the window ending at the value just added.
/// A window that is not yet full, or that holds a NaN, yields undefined.
/// The std uses the `n - 1` denominator, so a window of one value has a
/// defined mean and an undefined std.
#[derive(Debug, Clone)]
pub struct RollingStats {
    lookback: usize,
    window: VecDeque<f64>,
    missing: usize,
}

impl RollingStats {
    pub fn new(lookback: usize) -> Self {
        Self {
            lookback,
            window: VecDeque::with_capacity(lookback),
            missing: 0,
        }
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }

    pub fn add(&mut self, value: f64) -> WindowStat {
        if self.lookback == 0 {
            return WindowStat::UNDEFINED;
        }

        self.window.push_back(value);
        if value.is_nan() {
            self.missing += 1;
        }
        if self.window.len() > self.lookback {
            if let Some(old) = self.window.pop_front() {
                if old.is_nan() {
                    self.missing -= 1;
                }
            }
        }

        if self.window.len() < self.lookback || self.missing > 0 {
            return WindowStat::UNDEFINED;
        }
        self.stat()
    }

    pub fn reset(&mut self) {
        self.window.clear();
        self.missing = 0;
    }

    fn stat(&self) -> WindowStat {
        let n = self.window.len();
        let first = self.window[0];

        // A flat window must give an exact zero std, otherwise summation
        // error turns a zero-width band into a tiny non-zero one.
        if self.window.iter().all(|&x| x == first) {
            return WindowStat {
                mean: first,
                std: if n > 1 { 0.0 } else { UNDEFINED },
            };
        }

        let mean = self.window.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            let ss = self
                .window
                .iter()
                .map(|&x| (x - mean).powi(2))
                .sum::<f64>();
            (ss / (n - 1) as f64).sqrt()
        } else {
            UNDEFINED
        };

        WindowStat { mean, std }
    }
}

/// Trailing-window stats for every position of `values`.
pub fn rolling_stats(values: &[f64], lookback: usize) -> Vec<WindowStat> {
    let mut model = RollingStats::new(lookback);
    values.iter().map(|&v| model.add(v)).collect()
}
