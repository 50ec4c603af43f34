use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Error codes for the band computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[repr(i32)]
pub enum ErrCode {
    #[strum(serialize = "_BAND_ERR_BEGIN")]
    BandErrBegin = 0,
    #[strum(serialize = "PARA_ERROR")]
    ParaError = 5,
    #[strum(serialize = "CONFIG_ERROR")]
    ConfigError = 17,
    #[strum(serialize = "SRC_DATA_FORMAT_ERROR")]
    SrcDataFormatError = 18,
    #[strum(serialize = "_BAND_ERR_END")]
    BandErrEnd = 99,
}

impl ErrCode {
    pub fn is_band_err(&self) -> bool {
        let code = *self as i32;
        code > Self::BandErrBegin as i32 && code < Self::BandErrEnd as i32
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BandError {
    /// `band_sep` could not be read as a number or as a pair of numbers.
    #[error("{code}: {msg}")]
    BandSep { code: ErrCode, msg: String },

    /// A configuration key that the loader does not know about.
    #[error("{code}: unknown para = {key}")]
    UnknownPara { code: ErrCode, key: String },

    /// A known configuration key holding a value of the wrong type.
    #[error("{code}: invalid value for {key}: {msg}")]
    InvalidPara {
        code: ErrCode,
        key: String,
        msg: String,
    },

    /// Input series that cannot be laid out row for row.
    #[error("{code}: {msg}")]
    SeriesFormat { code: ErrCode, msg: String },
}

impl BandError {
    pub fn band_sep(message: impl Into<String>) -> Self {
        Self::BandSep {
            code: ErrCode::ConfigError,
            msg: message.into(),
        }
    }

    pub fn unknown_para(key: impl Into<String>) -> Self {
        Self::UnknownPara {
            code: ErrCode::ParaError,
            key: key.into(),
        }
    }

    pub fn invalid_para(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPara {
            code: ErrCode::ParaError,
            key: key.into(),
            msg: message.into(),
        }
    }

    pub fn series_format(message: impl Into<String>) -> Self {
        Self::SeriesFormat {
            code: ErrCode::SrcDataFormatError,
            msg: message.into(),
        }
    }

    pub fn errcode(&self) -> ErrCode {
        match self {
            Self::BandSep { code, .. }
            | Self::UnknownPara { code, .. }
            | Self::InvalidPara { code, .. }
            | Self::SeriesFormat { code, .. } => *code,
        }
    }

    pub fn is_band_err(&self) -> bool {
        self.errcode().is_band_err()
    }
}
