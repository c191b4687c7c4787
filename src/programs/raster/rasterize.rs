use libc::c_int;

use crate::errors::*;
use crate::programs::{finish, native_options, program_options, resolve_args, DatasetDestination};
use crate::Dataset;

program_options!(
    /// Command line flags of [`rasterize`], as accepted by
    /// [`gdal_rasterize`](https://gdal.org/programs/gdal_rasterize.html).
    RasterizeOptions
);

native_options!(
    GdalRasterizeOptions,
    GDALRasterizeOptions,
    GDALRasterizeOptionsNew,
    GDALRasterizeOptionsFree
);

/// Burns the vector geometries of `source` into a raster.
///
/// Wraps [GDALRasterize]. When `dest` is an open dataset the geometries are burnt into its
/// existing bands, otherwise a new raster is created from the flags (`-tr`, `-ts`, `-te`, ...).
///
/// ```rust, no_run
/// # fn main() -> osgeo::errors::Result<()> {
/// use osgeo::programs::raster::{rasterize, RasterizeOptions};
/// use osgeo::Dataset;
///
/// let parcels = Dataset::open("parcels.gpkg")?;
/// let options: RasterizeOptions = "-a code -tr 10 10".parse()?;
/// let grid = rasterize("".try_into()?, &parcels, Some(options))?;
/// # Ok(())
/// # }
/// ```
///
/// [GDALRasterize]: https://gdal.org/api/gdal_utils.html#_CPPv413GDALRasterizePKc12GDALDatasetH12GDALDatasetHPK20GDALRasterizeOptionsPi
pub fn rasterize(
    dest: DatasetDestination,
    source: &Dataset,
    options: Option<RasterizeOptions>,
) -> Result<Dataset> {
    let args = resolve_args(
        "GDALRasterize",
        &dest,
        options.as_ref().map(RasterizeOptions::args),
        "-of",
        "MEM",
    )?;
    let c_options = GdalRasterizeOptions::new("GDALRasterize", &args)?;

    let mut usage_error: c_int = 0;
    let c_dataset = unsafe {
        let (c_dest, c_dst_ds) = dest.c_args();
        gdal_sys::GDALRasterize(
            c_dest,
            c_dst_ds,
            source.c_dataset(),
            c_options.as_ptr(),
            &mut usage_error,
        )
    };
    finish("GDALRasterize", c_dataset, usage_error, dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial_ref::SpatialRef;
    use crate::test_utils::{fixture, SuppressGDALErrorLog};
    use crate::DriverManager;

    fn hills() -> Dataset {
        Dataset::open(fixture("hills.geojson")).unwrap()
    }

    #[test]
    fn rasterize_attribute() {
        let options: RasterizeOptions = "-a code -tr 10 10".parse().unwrap();
        let out = rasterize("".try_into().unwrap(), &hills(), Some(options)).unwrap();
        assert_eq!(out.driver().short_name(), "MEM");
        assert_eq!(out.raster_size(), (10, 10));
        assert_eq!(out.spatial_ref().unwrap().auth_code().unwrap(), 32631);

        let cells = out.rasterband(1).unwrap().read_band_as::<f64>().unwrap();
        // top row is covered by the northern strip, the bottom corners by the two squares
        assert_eq!(cells.data[0], 3.0);
        assert_eq!(cells.data[90], 1.0);
        assert_eq!(cells.data[99], 2.0);
        assert_eq!(cells.data[95], 0.0);
    }

    #[test]
    fn burn_into_existing_dataset() {
        let driver = DriverManager::get_driver_by_name("MEM").unwrap();
        let mut grid = driver.create_with_band_type::<u8, _>("", 5, 5, 1).unwrap();
        grid.set_geo_transform(&[500_000.0, 20.0, 0.0, 5_000_100.0, 0.0, -20.0])
            .unwrap();
        grid.set_spatial_ref(&SpatialRef::from_epsg(32631).unwrap())
            .unwrap();
        let options: RasterizeOptions = ["-burn", "7"].try_into().unwrap();
        let out = rasterize(grid.into(), &hills(), Some(options)).unwrap();
        assert_eq!(out.raster_size(), (5, 5));
        let cells = out.rasterband(1).unwrap().read_band_as::<u8>().unwrap();
        assert_eq!(cells.data[0], 7);
        assert_eq!(cells.data[22], 0);
    }

    #[test]
    fn missing_resolution_fails() {
        let _nolog = SuppressGDALErrorLog::new();
        let options: RasterizeOptions = ["-a", "code"].try_into().unwrap();
        let err = rasterize("".try_into().unwrap(), &hills(), Some(options)).unwrap_err();
        assert!(
            matches!(
                err,
                GdalError::ProgramError {
                    program: "GDALRasterize",
                    ..
                }
            ),
            "{err:?}"
        );
    }
}
