use serde::{Deserialize, Serialize};

use crate::config::band_sep::Multipliers;
use crate::math::percent_b::percent_b;
use crate::math::rolling::{RollingStats, WindowStat};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollMetric {
    pub mid: f64,
    pub upper: f64,
    pub lower: f64,
}

impl BollMetric {
    /// Bands around one window stat. NaN in the stat stays NaN.
    pub fn compose(stat: &WindowStat, k: &Multipliers) -> Self {
        Self {
            mid: stat.mean,
            upper: stat.mean + k.upper * stat.std,
            lower: stat.mean - k.lower * stat.std,
        }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// `%b` of `price` inside these bands.
    pub fn percent_b(&self, price: f64, pb_scale: f64) -> f64 {
        percent_b(price, self.lower, self.upper, pb_scale)
    }
}

/// Bands for every window stat, in order.
pub fn compose_bands(stats: &[WindowStat], k: &Multipliers) -> Vec<BollMetric> {
    stats.iter().map(|s| BollMetric::compose(s, k)).collect()
}

/// Incremental Bollinger model: feed prices one at a time.
#[derive(Debug, Clone)]
pub struct BollModel {
    stats: RollingStats,
    k: Multipliers,
}

impl BollModel {
    pub fn new(lookback: usize, k: Multipliers) -> Self {
        Self {
            stats: RollingStats::new(lookback),
            k,
        }
    }

    pub fn add(&mut self, price: f64) -> BollMetric {
        let stat = self.stats.add(price);
        BollMetric::compose(&stat, &self.k)
    }
}
