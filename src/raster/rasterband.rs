use std::marker::PhantomData;

use crate::dataset::Dataset;
use crate::raster::{GDALDataType, GdalType};
use crate::utils::_last_cpl_err;
use gdal_sys::{self, CPLErr, GDALRWFlag, GDALRasterBandH};
use libc::{c_int, c_void};

use crate::errors::*;

/// Represents a single band of a dataset.
///
/// This object carries the lifetime of the dataset that
/// contains it. This is necessary to prevent the dataset
/// from being dropped before the band.
pub struct RasterBand<'a> {
    c_rasterband: GDALRasterBandH,
    phantom: PhantomData<&'a Dataset>,
}

impl<'a> RasterBand<'a> {
    /// Create a RasterBand from a wrapped C pointer
    ///
    /// # Safety
    /// This method operates on a raw C pointer
    pub unsafe fn from_c_rasterband(_: &'a Dataset, c_rasterband: GDALRasterBandH) -> Self {
        RasterBand {
            c_rasterband,
            phantom: PhantomData,
        }
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_rasterband(&self) -> GDALRasterBandH {
        self.c_rasterband
    }

    /// Get dimensions of the band.
    /// Note that this may not be the same as `size` on the
    /// owning dataset due to scale.
    pub fn size(&self) -> (usize, usize) {
        let size_x = unsafe { gdal_sys::GDALGetRasterBandXSize(self.c_rasterband) };
        let size_y = unsafe { gdal_sys::GDALGetRasterBandYSize(self.c_rasterband) };
        (size_x as usize, size_y as usize)
    }

    /// Read data from this band into a slice.
    ///
    /// # Arguments
    /// * window - the window position from top left
    /// * window_size - the window size (GDAL will interpolate data if window_size != size)
    /// * size - the desired size to read
    /// * buffer - a slice to hold the data (length must equal product of size parameter)
    pub fn read_into_slice<T: Copy + GdalType>(
        &self,
        window: (isize, isize),
        window_size: (usize, usize),
        size: (usize, usize),
        buffer: &mut [T],
    ) -> Result<()> {
        let pixels = size.0 * size.1;
        if buffer.len() != pixels {
            return Err(GdalError::BadArgument(format!(
                "buffer length {} does not match requested size {}x{}",
                buffer.len(),
                size.0,
                size.1
            )));
        }

        let rv = unsafe {
            gdal_sys::GDALRasterIO(
                self.c_rasterband,
                GDALRWFlag::GF_Read,
                window.0 as c_int,
                window.1 as c_int,
                window_size.0 as c_int,
                window_size.1 as c_int,
                buffer.as_mut_ptr() as *mut c_void,
                size.0 as c_int,
                size.1 as c_int,
                T::gdal_type(),
                0,
                0,
            )
        };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }

        Ok(())
    }

    /// Read a [`Buffer<T>`] from this band.
    pub fn read_as<T: Copy + GdalType + Default>(
        &self,
        window: (isize, isize),
        window_size: (usize, usize),
        size: (usize, usize),
    ) -> Result<Buffer<T>> {
        let mut data = vec![T::default(); size.0 * size.1];
        self.read_into_slice(window, window_size, size, &mut data)?;
        Ok(Buffer { size, data })
    }

    /// Read the full band as a [`Buffer<T>`].
    pub fn read_band_as<T: Copy + GdalType + Default>(&self) -> Result<Buffer<T>> {
        let size = self.size();
        self.read_as::<T>((0, 0), size, size)
    }

    /// Write a [`Buffer<T>`] into the band.
    ///
    /// # Arguments
    /// * window - the window position from top left
    /// * window_size - the window size (GDAL will interpolate data if window_size != Buffer.size)
    pub fn write<T: GdalType + Copy>(
        &mut self,
        window: (isize, isize),
        window_size: (usize, usize),
        buffer: &Buffer<T>,
    ) -> Result<()> {
        if buffer.data.len() != buffer.size.0 * buffer.size.1 {
            return Err(GdalError::BadArgument(format!(
                "buffer length {} does not match its size {:?}",
                buffer.data.len(),
                buffer.size
            )));
        }
        let rv = unsafe {
            gdal_sys::GDALRasterIO(
                self.c_rasterband,
                GDALRWFlag::GF_Write,
                window.0 as c_int,
                window.1 as c_int,
                window_size.0 as c_int,
                window_size.1 as c_int,
                buffer.data.as_ptr() as *mut c_void,
                buffer.size.0 as c_int,
                buffer.size.1 as c_int,
                T::gdal_type(),
                0,
                0,
            )
        };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }

    pub fn band_type(&self) -> GDALDataType::Type {
        unsafe { gdal_sys::GDALGetRasterDataType(self.c_rasterband) }
    }

    pub fn no_data_value(&self) -> Option<f64> {
        let mut pb_success = 1;
        let no_data =
            unsafe { gdal_sys::GDALGetRasterNoDataValue(self.c_rasterband, &mut pb_success) };
        if pb_success == 1 {
            return Some(no_data);
        }
        None
    }

    pub fn set_no_data_value(&mut self, no_data: f64) -> Result<()> {
        let rv = unsafe { gdal_sys::GDALSetRasterNoDataValue(self.c_rasterband, no_data) };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }
}

/// A row-major block of cells, `size` being `(columns, rows)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer<T: GdalType> {
    pub size: (usize, usize),
    pub data: Vec<T>,
}

impl<T: GdalType> Buffer<T> {
    pub fn new(size: (usize, usize), data: Vec<T>) -> Buffer<T> {
        Buffer { size, data }
    }
}

#[cfg(test)]
mod tests {
    use crate::raster::{Buffer, GDALDataType};
    use crate::DriverManager;

    #[test]
    fn write_and_read_back() {
        let driver = DriverManager::get_driver_by_name("MEM").unwrap();
        let dataset = driver
            .create_with_band_type::<f32, _>("", 4, 3, 1)
            .unwrap();
        let mut band = dataset.rasterband(1).unwrap();
        assert_eq!(band.size(), (4, 3));
        assert_eq!(band.band_type(), GDALDataType::GDT_Float32);
        assert_eq!(band.no_data_value(), None);

        let values: Vec<f32> = (0..12).map(|v| v as f32).collect();
        band.write((0, 0), (4, 3), &Buffer::new((4, 3), values.clone()))
            .unwrap();
        band.set_no_data_value(-9999.0).unwrap();
        assert_eq!(band.no_data_value(), Some(-9999.0));

        let read = band.read_band_as::<f32>().unwrap();
        assert_eq!(read.data, values);

        let window = band.read_as::<f32>((1, 1), (2, 2), (2, 2)).unwrap();
        assert_eq!(window.data, vec![5.0, 6.0, 9.0, 10.0]);
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        let driver = DriverManager::get_driver_by_name("MEM").unwrap();
        let dataset = driver.create("", 2, 2, 1).unwrap();
        let band = dataset.rasterband(1).unwrap();
        let mut too_small = [0u8; 3];
        assert!(band
            .read_into_slice((0, 0), (2, 2), (2, 2), &mut too_small)
            .is_err());
    }
}
