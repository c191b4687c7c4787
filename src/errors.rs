use std::ffi::NulError;
use std::str::Utf8Error;

use gdal_sys::{CPLErr, OGRErr};
use libc::c_int;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GdalError>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum GdalError {
    #[error("FfiNulError")]
    FfiNulError(#[from] NulError),
    #[error("FfiIntoStringError")]
    FfiIntoStringError(#[from] std::ffi::IntoStringError),
    #[error("StrUtf8Error")]
    StrUtf8Error(#[from] Utf8Error),
    #[error("CPL error class: '{class:?}', error number: '{number}', error msg: '{msg}'")]
    CplError {
        class: CplErrType,
        number: c_int,
        msg: String,
    },
    #[error("GDAL method '{method_name}' returned a NULL pointer. Error msg: '{msg}'")]
    NullPointer {
        method_name: &'static str,
        msg: String,
    },
    #[error("OGR method '{method_name}' returned error: '{err:?}'")]
    OgrError {
        err: OGRErr::Type,
        method_name: &'static str,
    },
    #[error("Unable to transform coordinates from {from} to {to}: {}", msg.as_deref().unwrap_or("(no message)"))]
    InvalidCoordinateRange {
        from: String,
        to: String,
        msg: Option<String>,
    },
    #[error("{failed} of {total} points could not be transformed")]
    PartialTransform { failed: usize, total: usize },
    #[error("{program} failed with code {code}: {msg}")]
    ProgramError {
        program: &'static str,
        code: c_int,
        msg: String,
    },
    #[error("Bad argument: {0}")]
    BadArgument(String),
}

/// A wrapper for [`CPLErr::Type`] that reflects it as an enum
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(C)]
pub enum CplErrType {
    None = 0,
    Debug = 1,
    Warning = 2,
    Failure = 3,
    Fatal = 4,
}

impl From<CPLErr::Type> for CplErrType {
    fn from(error_type: CPLErr::Type) -> Self {
        match error_type {
            CPLErr::CE_Debug => Self::Debug,
            CPLErr::CE_Warning => Self::Warning,
            CPLErr::CE_Failure => Self::Failure,
            CPLErr::CE_Fatal => Self::Fatal,
            // fallback type, should not happen
            _ => Self::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpl_err_type_conversion() {
        assert_eq!(CplErrType::from(CPLErr::CE_Warning), CplErrType::Warning);
        assert_eq!(CplErrType::from(CPLErr::CE_Fatal), CplErrType::Fatal);
        assert_eq!(CplErrType::from(42), CplErrType::None);
    }

    #[test]
    fn program_error_names_the_program() {
        let err = GdalError::ProgramError {
            program: "GDALWarp",
            code: 1,
            msg: "usage error".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("GDALWarp"));
        assert!(text.contains("code 1"));
    }
}
