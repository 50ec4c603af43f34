use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Output column kinds, in the order the table lays them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
pub enum BandColumn {
    #[strum(serialize = "mid")]
    Mid,
    #[strum(serialize = "upper")]
    Upper,
    #[strum(serialize = "lower")]
    Lower,
    #[strum(serialize = "percent_b")]
    PercentB,
}

impl BandColumn {
    /// Full column name, e.g. `bb_mid` for prefix `bb_`.
    pub fn with_prefix(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.as_ref())
    }
}
