use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{band_error::BandError, utils::str2float};

const BAND_SEP_MSG: &str = "`band_sep` must be a number, or a list of two numbers";

/// How far (in standard deviations) the bands sit from the moving average.
///
/// A single number places both bands symmetrically. A sequence is read as
/// `[lower_separation, upper_separation]`; anything past the second element
/// is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, try_from = "Value")]
pub enum BandSep {
    Symmetric(f64),
    Sequence(Vec<f64>),
}

/// Normalized `(lower, upper)` multiplier pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Multipliers {
    pub lower: f64,
    pub upper: f64,
}

impl BandSep {
    pub fn pair(lower: f64, upper: f64) -> Self {
        Self::Sequence(vec![lower, upper])
    }

    /// Resolve into an explicit multiplier pair.
    pub fn normalize(&self) -> Result<Multipliers, BandError> {
        match self {
            Self::Symmetric(s) => Ok(Multipliers {
                lower: *s,
                upper: *s,
            }),
            Self::Sequence(seq) => match seq.as_slice() {
                [lower, upper, ..] => Ok(Multipliers {
                    lower: *lower,
                    upper: *upper,
                }),
                _ => Err(BandError::band_sep(format!(
                    "{}, got a sequence of length {}",
                    BAND_SEP_MSG,
                    seq.len()
                ))),
            },
        }
    }
}

impl Default for BandSep {
    fn default() -> Self {
        Self::Symmetric(2.0)
    }
}

impl From<f64> for BandSep {
    fn from(s: f64) -> Self {
        Self::Symmetric(s)
    }
}

impl From<(f64, f64)> for BandSep {
    fn from((lower, upper): (f64, f64)) -> Self {
        Self::pair(lower, upper)
    }
}

impl From<[f64; 2]> for BandSep {
    fn from([lower, upper]: [f64; 2]) -> Self {
        Self::pair(lower, upper)
    }
}

impl From<Vec<f64>> for BandSep {
    fn from(seq: Vec<f64>) -> Self {
        Self::Sequence(seq)
    }
}

impl From<&[f64]> for BandSep {
    fn from(seq: &[f64]) -> Self {
        Self::Sequence(seq.to_vec())
    }
}

fn value_as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => str2float(s),
        _ => None,
    }
}

impl TryFrom<&Value> for BandSep {
    type Error = BandError;

    /// A single number (or numeric string) wins first; otherwise the value
    /// has to be an array whose first two entries are numeric.
    fn try_from(v: &Value) -> Result<Self, Self::Error> {
        if let Some(s) = value_as_f64(v) {
            return Ok(Self::Symmetric(s));
        }
        let Value::Array(items) = v else {
            return Err(BandError::band_sep(format!("{}, got {}", BAND_SEP_MSG, v)));
        };
        if items.len() < 2 {
            return Err(BandError::band_sep(format!(
                "{}, got a sequence of length {}",
                BAND_SEP_MSG,
                items.len()
            )));
        }
        match (value_as_f64(&items[0]), value_as_f64(&items[1])) {
            (Some(lower), Some(upper)) => Ok(Self::pair(lower, upper)),
            _ => Err(BandError::band_sep(format!("{}, got {}", BAND_SEP_MSG, v))),
        }
    }
}

impl TryFrom<Value> for BandSep {
    type Error = BandError;

    fn try_from(v: Value) -> Result<Self, Self::Error> {
        Self::try_from(&v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::band_error::ErrCode;
    use serde_json::json;

    #[test]
    fn test_scalar_is_symmetric() {
        let m = BandSep::from(2.0).normalize().unwrap();
        assert_eq!(m, Multipliers { lower: 2.0, upper: 2.0 });
        assert_eq!(m, BandSep::pair(2.0, 2.0).normalize().unwrap());
    }

    #[test]
    fn test_pair_order() {
        let m = BandSep::from((1.0, 3.0)).normalize().unwrap();
        assert_eq!(m.lower, 1.0);
        assert_eq!(m.upper, 3.0);
    }

    #[test]
    fn test_extra_elements_ignored() {
        let m = BandSep::from(vec![0.5, 1.5, 9.0, 9.0]).normalize().unwrap();
        assert_eq!(m, Multipliers { lower: 0.5, upper: 1.5 });
    }

    #[test]
    fn test_short_sequence_rejected() {
        let err = BandSep::from(vec![0.5]).normalize().unwrap_err();
        assert_eq!(err.errcode(), ErrCode::ConfigError);
        assert!(BandSep::Sequence(Vec::new()).normalize().is_err());
    }

    #[test]
    fn test_from_json_value() {
        assert_eq!(BandSep::try_from(&json!(2)).unwrap(), BandSep::Symmetric(2.0));
        assert_eq!(BandSep::try_from(&json!("2.5")).unwrap(), BandSep::Symmetric(2.5));
        assert_eq!(
            BandSep::try_from(&json!([1.0, "3", "ignored"])).unwrap(),
            BandSep::pair(1.0, 3.0)
        );
    }

    #[test]
    fn test_from_json_value_rejected() {
        for v in [
            json!([0.5]),
            json!([]),
            json!("wide"),
            json!(null),
            json!(true),
            json!({"lower": 1.0}),
            json!(["a", 1.0]),
        ] {
            let err = BandSep::try_from(&v).unwrap_err();
            assert_eq!(err.errcode(), ErrCode::ConfigError, "value {}", v);
        }
    }

    #[test]
    fn test_serde_shapes() {
        let sep: BandSep = serde_json::from_str("[1.0, 3.0]").unwrap();
        assert_eq!(sep, BandSep::pair(1.0, 3.0));
        let sep: BandSep = serde_json::from_str("1.5").unwrap();
        assert_eq!(sep, BandSep::Symmetric(1.5));
        assert!(serde_json::from_str::<BandSep>("[0.5]").is_err());
        assert_eq!(serde_json::to_string(&BandSep::pair(1.0, 3.0)).unwrap(), "[1.0,3.0]");
    }
}
