use std::ffi::CString;
use std::ptr::null_mut;
use std::sync::Once;

use gdal_sys::{self, GDALDriverH};
use libc::c_int;

use crate::dataset::Dataset;
use crate::errors::*;
use crate::raster::GdalType;
use crate::utils::{_last_null_pointer_err, _path_to_c_string, _string};

static START: Once = Once::new();

pub(crate) fn _register_drivers() {
    START.call_once(DriverManager::register_all);
}

/// Raster and vector driver API
pub struct Driver {
    c_driver: GDALDriverH,
}

impl Driver {
    /// Creates a new Driver object by wrapping a C pointer
    ///
    /// # Safety
    /// This method operates on a raw C pointer
    pub unsafe fn from_c_driver(c_driver: GDALDriverH) -> Driver {
        Driver { c_driver }
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_driver(&self) -> GDALDriverH {
        self.c_driver
    }

    /// Short name of the driver, e.g. `GTiff` or `MEM`.
    pub fn short_name(&self) -> String {
        let rv = unsafe { gdal_sys::GDALGetDriverShortName(self.c_driver) };
        _string(rv).unwrap_or_default()
    }

    pub fn long_name(&self) -> String {
        let rv = unsafe { gdal_sys::GDALGetDriverLongName(self.c_driver) };
        _string(rv).unwrap_or_default()
    }

    /// Create a new dataset of size (`size_x`, `size_y`) and `bands` band count,
    /// with `u8` as the cell data type.
    pub fn create<P: AsRef<std::path::Path>>(
        &self,
        filename: P,
        size_x: usize,
        size_y: usize,
        bands: usize,
    ) -> Result<Dataset> {
        self.create_with_band_type::<u8, _>(filename, size_x, size_y, bands)
    }

    /// Create a new dataset whose bands hold values of type `T`.
    ///
    /// ```rust, no_run
    /// # fn main() -> osgeo::errors::Result<()> {
    /// use osgeo::DriverManager;
    /// let driver = DriverManager::get_driver_by_name("MEM")?;
    /// let ds = driver.create_with_band_type::<f32, _>("", 32, 32, 1)?;
    /// assert_eq!(ds.raster_size(), (32, 32));
    /// # Ok(())
    /// # }
    /// ```
    pub fn create_with_band_type<T: GdalType, P: AsRef<std::path::Path>>(
        &self,
        filename: P,
        size_x: usize,
        size_y: usize,
        bands: usize,
    ) -> Result<Dataset> {
        let c_filename = _path_to_c_string(filename)?;
        let c_dataset = unsafe {
            gdal_sys::GDALCreate(
                self.c_driver,
                c_filename.as_ptr(),
                size_x as c_int,
                size_y as c_int,
                bands as c_int,
                T::gdal_type(),
                null_mut(),
            )
        };

        if c_dataset.is_null() {
            return Err(_last_null_pointer_err("GDALCreate"));
        };

        Ok(unsafe { Dataset::from_c_dataset(c_dataset) })
    }

    /// Convenience for creating a vector-only dataset from a compatible driver.
    pub fn create_vector_only<P: AsRef<std::path::Path>>(&self, filename: P) -> Result<Dataset> {
        self.create_with_band_type::<u8, _>(filename, 0, 0, 0)
    }
}

/// A wrapper around the GDAL driver registry.
pub struct DriverManager;

impl DriverManager {
    /// Look up a registered driver by its short name, registering all drivers on first use.
    pub fn get_driver_by_name(name: &str) -> Result<Driver> {
        _register_drivers();
        let c_name = CString::new(name)?;
        let c_driver = unsafe { gdal_sys::GDALGetDriverByName(c_name.as_ptr()) };
        if c_driver.is_null() {
            return Err(_last_null_pointer_err("GDALGetDriverByName"));
        };
        Ok(Driver { c_driver })
    }

    /// Number of drivers currently registered.
    pub fn count() -> usize {
        _register_drivers();
        (unsafe { gdal_sys::GDALGetDriverCount() }) as usize
    }

    /// Register every driver compiled into GDAL.
    ///
    /// Safe to call repeatedly; GDAL ignores drivers that are already registered.
    pub fn register_all() {
        unsafe {
            gdal_sys::GDALAllRegister();
        }
    }
}
