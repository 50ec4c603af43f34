pub mod band_config;
pub mod band_sep;
