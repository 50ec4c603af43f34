use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::band_error::BandError;
use crate::config::band_sep::{BandSep, Multipliers};

/// Bollinger Bands parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BandConfig {
    /// Number of timesteps in the moving window
    pub lookback: usize,

    /// Band separation in standard deviations, symmetric or `[lower, upper]`
    pub band_sep: BandSep,

    /// Whether to emit the `%b` column
    pub percent_b: bool,

    /// Value of `%b` when the price touches the upper band
    pub pb_scale: f64,

    /// Prefix for every output column name
    pub col_prefix: String,
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            lookback: 20,
            band_sep: BandSep::default(),
            percent_b: true,
            pb_scale: 100.0,
            col_prefix: "bb_".to_string(),
        }
    }
}

impl BandConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from loosely typed key/value pairs. Absent keys take
    /// their defaults; unknown keys are rejected.
    pub fn from_map(conf: HashMap<String, Value>) -> Result<Self, BandError> {
        let mut conf = ConfigWithCheck::new(conf);
        let default = Self::default();

        let band_sep = match conf.take_raw("band_sep") {
            Some(v) => BandSep::try_from(&v)?,
            None => default.band_sep,
        };

        let config = Self {
            lookback: conf.get("lookback")?.unwrap_or(default.lookback),
            band_sep,
            percent_b: conf.get("percent_b")?.unwrap_or(default.percent_b),
            pb_scale: conf.get("pb_scale")?.unwrap_or(default.pb_scale),
            col_prefix: conf.get("col_prefix")?.unwrap_or(default.col_prefix),
        };

        conf.check()?;
        Ok(config)
    }

    pub fn lookback(mut self, n: usize) -> Self {
        self.lookback = n;
        self
    }

    pub fn band_sep(mut self, sep: impl Into<BandSep>) -> Self {
        self.band_sep = sep.into();
        self
    }

    pub fn percent_b(mut self, enabled: bool) -> Self {
        self.percent_b = enabled;
        self
    }

    pub fn pb_scale(mut self, scale: f64) -> Self {
        self.pb_scale = scale;
        self
    }

    pub fn col_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.col_prefix = prefix.into();
        self
    }

    pub fn multipliers(&self) -> Result<Multipliers, BandError> {
        self.band_sep.normalize()
    }
}

/// Key/value config that remembers which keys were consumed, so leftovers
/// can be reported.
#[derive(Debug)]
struct ConfigWithCheck {
    conf: HashMap<String, Value>,
}

impl ConfigWithCheck {
    fn new(conf: HashMap<String, Value>) -> Self {
        Self { conf }
    }

    fn take_raw(&mut self, key: &str) -> Option<Value> {
        self.conf.remove(key)
    }

    fn get<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, BandError> {
        match self.conf.remove(key) {
            Some(v) => serde_json::from_value(v)
                .map(Some)
                .map_err(|e| BandError::invalid_para(key, e.to_string())),
            None => Ok(None),
        }
    }

    fn check(&self) -> Result<(), BandError> {
        let mut keys: Vec<&String> = self.conf.keys().collect();
        keys.sort();
        match keys.first() {
            Some(k) => Err(BandError::unknown_para(k.as_str())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::band_error::ErrCode;
    use serde_json::json;

    fn conf(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = BandConfig::default();
        assert_eq!(config.lookback, 20);
        assert_eq!(config.band_sep, BandSep::Symmetric(2.0));
        assert!(config.percent_b);
        assert_eq!(config.pb_scale, 100.0);
        assert_eq!(config.col_prefix, "bb_");
        assert_eq!(BandConfig::from_map(HashMap::new()).unwrap(), config);
    }

    #[test]
    fn test_builder() {
        let config = BandConfig::new()
            .lookback(5)
            .band_sep((1.0, 3.0))
            .percent_b(false)
            .pb_scale(1.0)
            .col_prefix("boll_");
        assert_eq!(config.lookback, 5);
        assert_eq!(config.multipliers().unwrap(), Multipliers { lower: 1.0, upper: 3.0 });
        assert!(!config.percent_b);
        assert_eq!(config.col_prefix, "boll_");
    }

    #[test]
    fn test_from_map() {
        let config = BandConfig::from_map(conf(&[
            ("lookback", json!(10)),
            ("band_sep", json!("1.5")),
            ("pb_scale", json!(1)),
        ]))
        .unwrap();
        assert_eq!(config.lookback, 10);
        assert_eq!(config.band_sep, BandSep::Symmetric(1.5));
        assert_eq!(config.pb_scale, 1.0);
        assert!(config.percent_b);
    }

    #[test]
    fn test_from_map_bad_band_sep() {
        let err = BandConfig::from_map(conf(&[("band_sep", json!([0.5]))])).unwrap_err();
        assert_eq!(err.errcode(), ErrCode::ConfigError);
    }

    #[test]
    fn test_from_map_unknown_key() {
        let err = BandConfig::from_map(conf(&[("lookbak", json!(10))])).unwrap_err();
        assert_eq!(err, BandError::unknown_para("lookbak"));
    }

    #[test]
    fn test_from_map_wrong_type() {
        let err = BandConfig::from_map(conf(&[("lookback", json!("twenty"))])).unwrap_err();
        assert!(matches!(err, BandError::InvalidPara { ref key, .. } if key == "lookback"));
    }

    #[test]
    fn test_serde_roundtrip_json() {
        let config: BandConfig =
            serde_json::from_str(r#"{"lookback": 5, "band_sep": [1.0, 3.0]}"#).unwrap();
        assert_eq!(config.lookback, 5);
        assert_eq!(config.band_sep, BandSep::pair(1.0, 3.0));
        assert_eq!(config.col_prefix, "bb_");
        assert!(serde_json::from_str::<BandConfig>(r#"{"band_sep": [0.5]}"#).is_err());
    }
}
