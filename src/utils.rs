use gdal_sys::{self, CPLErr, OGRErr};
use libc::{c_char, c_void};
use std::ffi::{CStr, CString};
use std::path::Path;

use crate::errors::*;

/// Copies a native string that stays owned by GDAL.
///
/// Returns `None` when `raw_ptr` is null.
pub fn _string(raw_ptr: *const c_char) -> Option<String> {
    if raw_ptr.is_null() {
        None
    } else {
        let c_str = unsafe { CStr::from_ptr(raw_ptr) };
        Some(c_str.to_string_lossy().into_owned())
    }
}

/// Copies a string allocated by GDAL on our behalf and releases the native buffer.
///
/// # Safety
/// `raw_ptr` must be null or point to a buffer allocated with `CPLMalloc`/`VSIMalloc`
/// that is not referenced anywhere else.
pub unsafe fn _string_and_free(raw_ptr: *mut c_char) -> Option<String> {
    let value = _string(raw_ptr);
    if !raw_ptr.is_null() {
        gdal_sys::VSIFree(raw_ptr as *mut c_void);
    }
    value
}

pub fn _last_cpl_err(cpl_err_class: CPLErr::Type) -> GdalError {
    let last_err_no = unsafe { gdal_sys::CPLGetLastErrorNo() };
    let last_err_msg = _string(unsafe { gdal_sys::CPLGetLastErrorMsg() }).unwrap_or_default();
    unsafe { gdal_sys::CPLErrorReset() };
    GdalError::CplError {
        class: cpl_err_class.into(),
        number: last_err_no,
        msg: last_err_msg,
    }
}

pub fn _last_null_pointer_err(method_name: &'static str) -> GdalError {
    let last_err_msg = _string(unsafe { gdal_sys::CPLGetLastErrorMsg() }).unwrap_or_default();
    unsafe { gdal_sys::CPLErrorReset() };
    GdalError::NullPointer {
        method_name,
        msg: last_err_msg,
    }
}

/// Maps an `OGRErr` return code onto a [`Result`], naming the native method on failure.
pub fn _ogr_result(rv: OGRErr::Type, method_name: &'static str) -> Result<()> {
    if rv != OGRErr::OGRERR_NONE {
        return Err(GdalError::OgrError {
            err: rv,
            method_name,
        });
    }
    Ok(())
}

pub fn _path_to_c_string<P: AsRef<Path>>(path: P) -> Result<CString> {
    let path_ref: &Path = path.as_ref();
    let path_str = path_ref.to_string_lossy();
    CString::new(path_str.as_ref()).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn null_string_is_none() {
        assert_eq!(_string(ptr::null()), None);
    }

    #[test]
    fn borrowed_string_is_copied() {
        let c = CString::new("EPSG").unwrap();
        assert_eq!(_string(c.as_ptr()), Some("EPSG".to_string()));
    }

    #[test]
    fn ogr_result_maps_error_codes() {
        assert!(_ogr_result(OGRErr::OGRERR_NONE, "OSRValidate").is_ok());
        assert_eq!(
            _ogr_result(OGRErr::OGRERR_CORRUPT_DATA, "OSRValidate"),
            Err(GdalError::OgrError {
                err: OGRErr::OGRERR_CORRUPT_DATA,
                method_name: "OSRValidate",
            })
        );
    }
}
