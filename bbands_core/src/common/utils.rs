/// Undefined marker shared by every output column.
pub const UNDEFINED: f64 = f64::NAN;

/// Parse a float the way a lenient numeric cast would: surrounding
/// whitespace is ignored, `inf`/`-inf`/`nan` are accepted.
pub fn str2float(s: &str) -> Option<f64> {
    let s = s.trim();
    match s.to_ascii_lowercase().as_str() {
        "inf" | "+inf" | "infinity" => Some(f64::INFINITY),
        "-inf" | "-infinity" => Some(f64::NEG_INFINITY),
        _ => s.parse::<f64>().ok(),
    }
}

/// Map an optional observation onto the NaN missing marker.
pub fn from_option(v: Option<f64>) -> f64 {
    v.unwrap_or(UNDEFINED)
}
