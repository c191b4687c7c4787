use std::ffi::CString;

use gdal_sys::{self, CPLErr, OGRCoordinateTransformationOptionsH};
use libc::c_int;

use crate::errors::*;
#[allow(unused)] // Referenced in doc comments.
use crate::spatial_ref::transform::CoordTransform;
use crate::utils::{_last_cpl_err, _last_null_pointer_err};

/// Tunes how [`CoordTransform::new_with_options`] selects a coordinate operation.
#[derive(Debug)]
pub struct CoordTransformOptions {
    inner: OGRCoordinateTransformationOptionsH,
}

impl Drop for CoordTransformOptions {
    fn drop(&mut self) {
        unsafe { gdal_sys::OCTDestroyCoordinateTransformationOptions(self.inner) };
    }
}

/// GDAL reports success of every option setter as a non-zero `int`.
fn _option_result(ret_val: c_int) -> Result<()> {
    if ret_val == 0 {
        return Err(_last_cpl_err(CPLErr::CE_Failure));
    }
    Ok(())
}

impl CoordTransformOptions {
    pub fn new() -> Result<CoordTransformOptions> {
        let c_obj = unsafe { gdal_sys::OCTNewCoordinateTransformationOptions() };
        if c_obj.is_null() {
            return Err(_last_null_pointer_err(
                "OCTNewCoordinateTransformationOptions",
            ));
        }
        Ok(CoordTransformOptions { inner: c_obj })
    }

    /// # Safety
    /// This method returns a raw C pointer
    pub(crate) unsafe fn c_options(&self) -> OGRCoordinateTransformationOptionsH {
        self.inner
    }

    /// Restricts operation candidates to those valid over a longitude/latitude box, in degrees.
    ///
    /// `west` may be greater than `east` for an area crossing the anti-meridian.
    pub fn set_area_of_interest(
        &mut self,
        west_longitude_deg: f64,
        south_latitude_deg: f64,
        east_longitude_deg: f64,
        north_latitude_deg: f64,
    ) -> Result<()> {
        _option_result(unsafe {
            gdal_sys::OCTCoordinateTransformationOptionsSetAreaOfInterest(
                self.inner,
                west_longitude_deg,
                south_latitude_deg,
                east_longitude_deg,
                north_latitude_deg,
            )
        })
    }

    /// Only consider operations at least as accurate as `accuracy` meters.
    ///
    /// `0` keeps pure conversions only. Ballpark transformations have an unknown accuracy and are
    /// excluded by any value `>= 0`.
    #[cfg(any(major_ge_4, all(major_is_3, minor_ge_3)))]
    pub fn desired_accuracy(&mut self, accuracy: f64) -> Result<()> {
        _option_result(unsafe {
            gdal_sys::OCTCoordinateTransformationOptionsSetDesiredAccuracy(self.inner, accuracy)
        })
    }

    /// Whether PROJ may fall back to a ballpark transformation when no datum shift is known.
    #[cfg(any(major_ge_4, all(major_is_3, minor_ge_3)))]
    pub fn set_ballpark_allowed(&mut self, ballpark_allowed: bool) -> Result<()> {
        _option_result(unsafe {
            gdal_sys::OCTCoordinateTransformationOptionsSetBallparkAllowed(
                self.inner,
                ballpark_allowed as c_int,
            )
        })
    }

    /// Forces a specific operation instead of the computed pipeline.
    ///
    /// `operation` is a PROJ string, a WKT2 `CoordinateOperation` or an
    /// `urn:ogc:def:coordinateOperation:EPSG::n` URN, expressed in the axis order of the
    /// source and target. With `reverse` it is applied in the inverse direction.
    pub fn set_coordinate_operation(&mut self, operation: &str, reverse: bool) -> Result<()> {
        let c_operation = CString::new(operation)?;
        _option_result(unsafe {
            gdal_sys::OCTCoordinateTransformationOptionsSetOperation(
                self.inner,
                c_operation.as_ptr(),
                reverse as c_int,
            )
        })
    }
}
