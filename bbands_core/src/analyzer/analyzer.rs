use tracing::{debug, warn};

use crate::common::band_error::BandError;
use crate::config::band_config::BandConfig;
use crate::config::band_sep::{BandSep, Multipliers};
use crate::math::boll::compose_bands;
use crate::math::rolling::rolling_stats;
use crate::series::time_series::TimeSeries;
use crate::table::band_table::BandTable;

/// Bollinger Bands analyzer, holding a validated configuration.
///
/// `band_sep` is normalized once in [`Analyzer::new`]; `compute` itself
/// cannot fail. The analyzer keeps no per-series state, so one instance can
/// be shared across threads and series.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: BandConfig,
    multipliers: Multipliers,
}

impl Analyzer {
    pub fn new(config: BandConfig) -> Result<Self, BandError> {
        let multipliers = config.multipliers()?;
        Ok(Self {
            config,
            multipliers,
        })
    }

    pub fn config(&self) -> &BandConfig {
        &self.config
    }

    pub fn multipliers(&self) -> Multipliers {
        self.multipliers
    }

    pub fn compute<I: Clone>(&self, series: &TimeSeries<I>) -> BandTable<I> {
        let conf = &self.config;
        let values = series.values();

        debug!(
            rows = series.len(),
            lookback = conf.lookback,
            lower_sep = self.multipliers.lower,
            upper_sep = self.multipliers.upper,
            percent_b = conf.percent_b,
            "computing bollinger bands"
        );
        if conf.lookback == 0 {
            warn!("lookback is 0, every band value will be undefined");
        } else if conf.lookback > series.len() {
            warn!(
                lookback = conf.lookback,
                rows = series.len(),
                "lookback longer than series, every band value will be undefined"
            );
        }

        let stats = rolling_stats(values, conf.lookback);
        let bands = compose_bands(&stats, &self.multipliers);

        let pb = conf.percent_b.then(|| {
            values
                .iter()
                .zip(bands.iter())
                .map(|(&x, b)| b.percent_b(x, conf.pb_scale))
                .collect::<Vec<_>>()
        });

        let table = BandTable::assemble(
            conf.col_prefix.as_str(),
            series.index().to_vec(),
            &bands,
            pb,
        );
        debug!(
            rows = table.len(),
            defined = stats.iter().filter(|s| s.is_defined()).count(),
            "bollinger bands done"
        );
        table
    }
}

/// One-shot Bollinger Bands over `series`.
///
/// Fails only when `config.band_sep` is a sequence shorter than two.
pub fn bollinger_bands<I: Clone>(
    series: &TimeSeries<I>,
    config: &BandConfig,
) -> Result<BandTable<I>, BandError> {
    Ok(Analyzer::new(config.clone())?.compute(series))
}

/// [`bollinger_bands`] with the parameters spelled out.
pub fn bollinger_bands_with<I: Clone>(
    series: &TimeSeries<I>,
    lookback: usize,
    band_sep: impl Into<BandSep>,
    percent_b: bool,
    pb_scale: f64,
    col_prefix: &str,
) -> Result<BandTable<I>, BandError> {
    let config = BandConfig::new()
        .lookback(lookback)
        .band_sep(band_sep)
        .percent_b(percent_b)
        .pb_scale(pb_scale)
        .col_prefix(col_prefix);
    bollinger_bands(series, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::band_error::ErrCode;

    fn series(values: &[f64]) -> TimeSeries {
        TimeSeries::from_values(values.to_vec())
    }

    #[test]
    fn test_analyzer_rejects_short_band_sep() {
        let err = Analyzer::new(BandConfig::new().band_sep(vec![0.5])).unwrap_err();
        assert_eq!(err.errcode(), ErrCode::ConfigError);
    }

    #[test]
    fn test_analyzer_reuse() {
        let analyzer = Analyzer::new(BandConfig::new().lookback(3)).unwrap();
        let a = analyzer.compute(&series(&[1.0, 2.0, 3.0]));
        let b = analyzer.compute(&series(&[1.0, 2.0, 3.0, 4.0]));
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 4);
        assert_eq!(a.mid()[2], b.mid()[2]);
        assert_eq!(analyzer.multipliers(), Multipliers { lower: 2.0, upper: 2.0 });
    }

    #[test]
    fn test_percent_b_disabled() {
        let table = bollinger_bands_with(&series(&[1.0, 2.0, 3.0]), 2, 2.0, false, 100.0, "bb_")
            .unwrap();
        assert!(!table.has_percent_b());
        assert_eq!(table.columns().len(), 3);
    }

    #[test]
    fn test_lookback_one() {
        let table = bollinger_bands(&series(&[5.0, 6.0]), &BandConfig::new().lookback(1)).unwrap();
        assert_eq!(table.mid(), &[5.0, 6.0]);
        assert!(table.upper().iter().all(|v| v.is_nan()));
        assert!(table.percent_b().unwrap().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_missing_current_value() {
        let table = bollinger_bands(
            &TimeSeries::from_options([Some(1.0), Some(2.0), Some(4.0), None]),
            &BandConfig::new().lookback(3),
        )
        .unwrap();
        assert!(!table.percent_b().unwrap()[2].is_nan());
        assert!(table.percent_b().unwrap()[3].is_nan());
        assert!(table.mid()[3].is_nan());
    }
}
