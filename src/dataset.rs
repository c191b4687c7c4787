use std::ffi::CString;
use std::path::Path;
use std::ptr::{self, null_mut};

use gdal_sys::{self, CPLErr, GDALDatasetH};
use libc::{c_char, c_double, c_int};

use crate::cpl::CslStringList;
use crate::driver::_register_drivers;
use crate::errors::*;
use crate::options::DatasetOptions;
use crate::raster::RasterBand;
use crate::spatial_ref::SpatialRef;
use crate::utils::{_last_cpl_err, _last_null_pointer_err, _path_to_c_string, _string};
use crate::vector::{Layer, LayerOptions};
use crate::Driver;

pub type GeoTransform = [c_double; 6];

/// Wrapper around a [`GDALDataset`][GDALDataset] object.
///
/// Represents both a [vector dataset][vector-data-model]
/// containing a collection of layers; and a
/// [raster dataset][raster-data-model] containing a collection of raster-bands.
///
/// The native dataset is closed when the wrapper is dropped.
///
/// [vector-data-model]: https://gdal.org/user/vector_data_model.html
/// [raster-data-model]: https://gdal.org/user/raster_data_model.html
/// [GDALDataset]: https://gdal.org/api/gdaldataset_cpp.html#_CPPv411GDALDataset
#[derive(Debug)]
pub struct Dataset {
    c_dataset: GDALDatasetH,
}

// GDAL Docs state: The returned dataset should only be accessed by one thread at a time.
// See: https://gdal.org/api/raster_c_api.html#_CPPv48GDALOpenPKc10GDALAccess
unsafe impl Send for Dataset {}

impl Dataset {
    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_dataset(&self) -> GDALDatasetH {
        self.c_dataset
    }

    /// Hands the native handle over to the caller, who becomes responsible for closing it.
    ///
    /// # Safety
    /// The returned pointer must eventually be released with `GDALClose`.
    pub unsafe fn into_c_dataset(mut self) -> GDALDatasetH {
        std::mem::replace(&mut self.c_dataset, null_mut())
    }

    /// Open a dataset at the given `path` with default
    /// options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Dataset> {
        Self::open_ex(path, DatasetOptions::default())
    }

    /// Open a dataset with extended options. See
    /// [`GDALOpenEx`].
    ///
    /// [`GDALOpenEx`]: https://gdal.org/doxygen/gdal_8h.html#a9cb8585d0b3c16726b08e25bcc94274a
    pub fn open_ex<P: AsRef<Path>>(path: P, options: DatasetOptions) -> Result<Dataset> {
        _register_drivers();
        let c_filename = _path_to_c_string(path.as_ref())?;
        let c_open_flags = options.open_flags.bits();

        let allowed_drivers = options
            .allowed_drivers
            .map(CslStringList::try_from)
            .transpose()?;
        let open_options = options
            .open_options
            .map(CslStringList::try_from)
            .transpose()?;
        let sibling_files = options
            .sibling_files
            .map(CslStringList::try_from)
            .transpose()?;

        let as_const = |list: &Option<CslStringList>| match list {
            Some(list) => list.as_ptr() as *const *const c_char,
            None => ptr::null(),
        };

        let c_dataset = unsafe {
            gdal_sys::GDALOpenEx(
                c_filename.as_ptr(),
                c_open_flags,
                as_const(&allowed_drivers),
                as_const(&open_options),
                as_const(&sibling_files),
            )
        };
        if c_dataset.is_null() {
            return Err(_last_null_pointer_err("GDALOpenEx"));
        }
        Ok(Dataset { c_dataset })
    }

    /// Creates a new Dataset by wrapping a C pointer
    ///
    /// # Safety
    /// This method operates on a raw C pointer.
    /// The dataset takes ownership and closes the handle on drop.
    pub unsafe fn from_c_dataset(c_dataset: GDALDatasetH) -> Dataset {
        Dataset { c_dataset }
    }

    /// Fetch the projection definition string for this dataset.
    pub fn projection(&self) -> String {
        let rv = unsafe { gdal_sys::GDALGetProjectionRef(self.c_dataset) };
        _string(rv).unwrap_or_default()
    }

    /// Get the spatial reference system for this dataset.
    #[cfg(major_ge_3)]
    pub fn spatial_ref(&self) -> Result<SpatialRef> {
        let c_obj = unsafe { gdal_sys::GDALGetSpatialRef(self.c_dataset) };
        if c_obj.is_null() {
            return Err(_last_null_pointer_err("GDALGetSpatialRef"));
        }
        unsafe { SpatialRef::from_c_obj(c_obj) }
    }

    /// Get the spatial reference system for this dataset.
    #[cfg(not(major_ge_3))]
    pub fn spatial_ref(&self) -> Result<SpatialRef> {
        SpatialRef::from_wkt(&self.projection())
    }

    /// Set the spatial reference system for this dataset.
    #[cfg(major_ge_3)]
    pub fn set_spatial_ref(&mut self, spatial_ref: &SpatialRef) -> Result<()> {
        let rv = unsafe { gdal_sys::GDALSetSpatialRef(self.c_dataset, spatial_ref.to_c_hsrs()) };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }

    /// Set the spatial reference system for this dataset.
    #[cfg(not(major_ge_3))]
    pub fn set_spatial_ref(&mut self, spatial_ref: &SpatialRef) -> Result<()> {
        let c_projection = CString::new(spatial_ref.to_wkt()?)?;
        let rv = unsafe { gdal_sys::GDALSetProjection(self.c_dataset, c_projection.as_ptr()) };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }

    /// Get the driver used to open this dataset.
    pub fn driver(&self) -> Driver {
        unsafe {
            let c_driver = gdal_sys::GDALGetDatasetDriver(self.c_dataset);
            Driver::from_c_driver(c_driver)
        }
    }

    /// Fetch a band object for a dataset.
    ///
    /// Applies to raster datasets, and fetches the
    /// rasterband at the given _1-based_ index.
    pub fn rasterband(&self, band_index: usize) -> Result<RasterBand<'_>> {
        unsafe {
            let c_band = gdal_sys::GDALGetRasterBand(self.c_dataset, band_index as c_int);
            if c_band.is_null() {
                return Err(_last_null_pointer_err("GDALGetRasterBand"));
            }
            Ok(RasterBand::from_c_rasterband(self, c_band))
        }
    }

    pub fn raster_count(&self) -> usize {
        (unsafe { gdal_sys::GDALGetRasterCount(self.c_dataset) }) as usize
    }

    /// Size of the raster in pixels, as `(columns, rows)`.
    pub fn raster_size(&self) -> (usize, usize) {
        let size_x = unsafe { gdal_sys::GDALGetRasterXSize(self.c_dataset) } as usize;
        let size_y = unsafe { gdal_sys::GDALGetRasterYSize(self.c_dataset) } as usize;
        (size_x, size_y)
    }

    pub fn layer_count(&self) -> usize {
        (unsafe { gdal_sys::GDALDatasetGetLayerCount(self.c_dataset) }) as usize
    }

    /// Get the layer at the given _0-based_ index.
    pub fn layer(&self, idx: usize) -> Result<Layer<'_>> {
        let c_layer = unsafe { gdal_sys::GDALDatasetGetLayer(self.c_dataset, idx as c_int) };
        if c_layer.is_null() {
            return Err(_last_null_pointer_err("GDALDatasetGetLayer"));
        }
        Ok(unsafe { Layer::from_c_layer(self, c_layer) })
    }

    pub fn layer_by_name(&self, name: &str) -> Result<Layer<'_>> {
        let c_name = CString::new(name)?;
        let c_layer =
            unsafe { gdal_sys::GDALDatasetGetLayerByName(self.c_dataset, c_name.as_ptr()) };
        if c_layer.is_null() {
            return Err(_last_null_pointer_err("GDALDatasetGetLayerByName"));
        }
        Ok(unsafe { Layer::from_c_layer(self, c_layer) })
    }

    /// Creates a new layer. The [`LayerOptions`] struct implements `Default`, so you only need to
    /// specify those options that deviate from the default.
    pub fn create_layer(&mut self, options: LayerOptions<'_>) -> Result<Layer<'_>> {
        let c_name = CString::new(options.name)?;
        let c_srs = match options.srs {
            Some(srs) => srs.to_c_hsrs(),
            None => null_mut(),
        };

        let c_options = options
            .options
            .map(CslStringList::try_from)
            .transpose()?
            .unwrap_or_default();

        let c_layer = unsafe {
            gdal_sys::GDALDatasetCreateLayer(
                self.c_dataset,
                c_name.as_ptr(),
                c_srs,
                options.ty,
                c_options.as_ptr(),
            )
        };
        if c_layer.is_null() {
            return Err(_last_null_pointer_err("GDALDatasetCreateLayer"));
        };
        Ok(unsafe { Layer::from_c_layer(self, c_layer) })
    }

    /// Set the [`Dataset`]'s affine transformation; also called a _geo-transformation_.
    ///
    /// The six coefficients are, in order: x of the top-left corner, pixel width,
    /// row rotation, y of the top-left corner, column rotation, pixel height
    /// (typically negative).
    pub fn set_geo_transform(&mut self, transformation: &GeoTransform) -> Result<()> {
        let rv = unsafe {
            gdal_sys::GDALSetGeoTransform(self.c_dataset, transformation.as_ptr() as *mut f64)
        };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }

    /// Get the coefficients of the [`Dataset`]'s affine transformation.
    pub fn geo_transform(&self) -> Result<GeoTransform> {
        let mut transformation = GeoTransform::default();
        let rv =
            unsafe { gdal_sys::GDALGetGeoTransform(self.c_dataset, transformation.as_mut_ptr()) };

        // check if the dataset has a GeoTransform
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(transformation)
    }

    /// Write pending changes to disk.
    pub fn flush_cache(&mut self) -> Result<()> {
        #[cfg(any(major_ge_4, all(major_is_3, minor_ge_7)))]
        {
            let rv = unsafe { gdal_sys::GDALFlushCache(self.c_dataset) };
            if rv != CPLErr::CE_None {
                return Err(_last_cpl_err(rv));
            }
        }
        #[cfg(not(any(major_ge_4, all(major_is_3, minor_ge_7))))]
        {
            unsafe {
                gdal_sys::GDALFlushCache(self.c_dataset);
            }
        }
        Ok(())
    }

    /// Close the dataset, reporting errors raised while flushing it.
    ///
    /// Dropping a [`Dataset`] closes it too, but ignores those errors.
    pub fn close(mut self) -> Result<()> {
        let c_dataset = std::mem::replace(&mut self.c_dataset, null_mut());
        log::trace!("Closing dataset {c_dataset:?}");

        #[cfg(any(major_ge_4, all(major_is_3, minor_ge_7)))]
        {
            let rv = unsafe { gdal_sys::GDALClose(c_dataset) };
            if rv != CPLErr::CE_None {
                return Err(_last_cpl_err(rv));
            }
        }
        #[cfg(not(any(major_ge_4, all(major_is_3, minor_ge_7))))]
        {
            unsafe {
                gdal_sys::GDALClose(c_dataset);
            }
        }
        Ok(())
    }
}

impl Drop for Dataset {
    fn drop(&mut self) {
        if self.c_dataset.is_null() {
            return;
        }
        log::trace!("Releasing dataset {:?}", self.c_dataset);
        unsafe {
            let _ = gdal_sys::GDALClose(self.c_dataset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixture, SuppressGDALErrorLog};
    use crate::{DriverManager, GdalOpenFlags};

    #[test]
    fn test_open_vector() {
        let dataset = Dataset::open(fixture("hills.geojson")).unwrap();
        assert_eq!(dataset.layer_count(), 1);
        assert_eq!(dataset.raster_count(), 0);
        assert_eq!(dataset.driver().short_name(), "GeoJSON");
    }

    #[test]
    fn test_open_ex_allowed_driver() {
        let _nolog = SuppressGDALErrorLog::new();
        let ds = Dataset::open_ex(
            fixture("hills.geojson"),
            DatasetOptions {
                open_flags: GdalOpenFlags::GDAL_OF_VECTOR,
                allowed_drivers: Some(&["GeoJSON"]),
                ..Default::default()
            },
        );
        assert!(ds.is_ok());

        let ds = Dataset::open_ex(
            fixture("hills.geojson"),
            DatasetOptions {
                allowed_drivers: Some(&["GTiff"]),
                ..Default::default()
            },
        );
        assert!(ds.is_err());
    }

    #[test]
    fn test_open_missing() {
        let _nolog = SuppressGDALErrorLog::new();
        assert!(matches!(
            Dataset::open(fixture("no-such-file.tif")),
            Err(GdalError::NullPointer {
                method_name: "GDALOpenEx",
                ..
            })
        ));
    }

    #[test]
    fn test_geo_transform_and_srs() {
        let driver = DriverManager::get_driver_by_name("MEM").unwrap();
        let mut dataset = driver.create("", 20, 10, 1).unwrap();
        let transform: GeoTransform = [100.0, 10.0, 0.0, 500.0, 0.0, -10.0];
        dataset.set_geo_transform(&transform).unwrap();
        assert_eq!(dataset.geo_transform().unwrap(), transform);

        let srs = SpatialRef::from_epsg(32631).unwrap();
        dataset.set_spatial_ref(&srs).unwrap();
        assert_eq!(dataset.spatial_ref().unwrap().auth_code().unwrap(), 32631);
        assert!(dataset.projection().contains("UTM"));
        assert_eq!(dataset.raster_size(), (20, 10));
        dataset.flush_cache().unwrap();
        dataset.close().unwrap();
    }

    #[test]
    fn test_into_c_dataset() {
        let driver = DriverManager::get_driver_by_name("MEM").unwrap();
        let dataset = driver.create("", 2, 2, 1).unwrap();
        let c_dataset = unsafe { dataset.into_c_dataset() };
        assert!(!c_dataset.is_null());
        let dataset = unsafe { Dataset::from_c_dataset(c_dataset) };
        assert_eq!(dataset.raster_count(), 1);
    }
}
