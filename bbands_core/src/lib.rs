pub mod analyzer;
pub mod common;
pub mod config;
pub mod math;
pub mod series;
pub mod table;

pub use analyzer::analyzer::{bollinger_bands, bollinger_bands_with, Analyzer};
pub use common::band_error::{BandError, ErrCode};
pub use common::enums::BandColumn;
pub use config::band_config::BandConfig;
pub use config::band_sep::{BandSep, Multipliers};
pub use series::time_series::TimeSeries;
pub use table::band_table::{BandRow, BandTable};
