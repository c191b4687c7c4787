use std::borrow::Borrow;

use libc::c_int;

use crate::errors::*;
use crate::programs::{finish, native_options, program_options, resolve_args, DatasetDestination};
use crate::Dataset;

program_options!(
    /// Command line flags of [`warp`], as accepted by
    /// [`gdalwarp`](https://gdal.org/programs/gdalwarp.html).
    WarpOptions
);

native_options!(
    GdalWarpAppOptions,
    GDALWarpAppOptions,
    GDALWarpAppOptionsNew,
    GDALWarpAppOptionsFree
);

/// Mosaics, reprojects and warps `sources` into `dest`.
///
/// Wraps [GDALWarp]. When `dest` is an open dataset, the sources are warped into it and the same
/// dataset is returned.
///
/// ```rust, no_run
/// # fn main() -> osgeo::errors::Result<()> {
/// use osgeo::programs::raster::{warp, WarpOptions};
/// use osgeo::Dataset;
///
/// let src = Dataset::open("dem.tif")?;
/// let options: WarpOptions = ["-t_srs", "EPSG:3857"].try_into()?;
/// let reprojected = warp("".try_into()?, &[&src], Some(options))?;
/// # Ok(())
/// # }
/// ```
///
/// [GDALWarp]: https://gdal.org/api/gdal_utils.html#_CPPv48GDALWarpPKc12GDALDatasetHiP12GDALDatasetHPK18GDALWarpAppOptionsPi
pub fn warp<D: Borrow<Dataset>>(
    dest: DatasetDestination,
    sources: &[D],
    options: Option<WarpOptions>,
) -> Result<Dataset> {
    let args = resolve_args(
        "GDALWarp",
        &dest,
        options.as_ref().map(WarpOptions::args),
        "-of",
        "MEM",
    )?;
    let c_options = GdalWarpAppOptions::new("GDALWarp", &args)?;
    let mut c_sources: Vec<gdal_sys::GDALDatasetH> = sources
        .iter()
        .map(|ds| unsafe { ds.borrow().c_dataset() })
        .collect();

    let mut usage_error: c_int = 0;
    let c_dataset = unsafe {
        let (c_dest, c_dst_ds) = dest.c_args();
        gdal_sys::GDALWarp(
            c_dest,
            c_dst_ds,
            c_sources.len() as c_int,
            c_sources.as_mut_ptr(),
            c_options.as_ptr(),
            &mut usage_error,
        )
    };
    finish("GDALWarp", c_dataset, usage_error, dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_near;
    use crate::spatial_ref::SpatialRef;
    use crate::test_utils::{mem_dem, SuppressGDALErrorLog, TempFixture};
    use crate::DriverManager;

    #[test]
    fn warp_to_memory() {
        let src = mem_dem(10, 10, 4326);
        let options: WarpOptions = ["-t_srs", "EPSG:3857"].try_into().unwrap();
        let out = warp("".try_into().unwrap(), &[&src], Some(options)).unwrap();
        assert_eq!(out.driver().short_name(), "MEM");
        assert_eq!(out.raster_count(), 1);
        assert_eq!(out.spatial_ref().unwrap().auth_code().unwrap(), 3857);
    }

    #[test]
    fn warp_without_flags() {
        let src = mem_dem(10, 10, 4326);
        let out = warp::<&Dataset>("".try_into().unwrap(), &[&src], None).unwrap();
        assert_eq!(out.driver().short_name(), "MEM");
        assert_eq!(out.raster_count(), 1);
        assert_eq!(out.spatial_ref().unwrap().auth_code().unwrap(), 4326);
    }

    #[test]
    fn caller_format_wins_in_memory() {
        let src = mem_dem(10, 10, 4326);
        let options: WarpOptions = ["-of", "VRT"].try_into().unwrap();
        let out = warp("".try_into().unwrap(), &[&src], Some(options)).unwrap();
        assert_eq!(out.driver().short_name(), "VRT");
        assert_eq!(out.raster_size(), (10, 10));
    }

    #[test]
    fn warp_to_file() {
        let src = mem_dem(10, 10, 4326);
        let fixture = TempFixture::empty("warped.tif");
        let options: WarpOptions = ["-of", "GTiff"].try_into().unwrap();
        let out = warp(fixture.path().try_into().unwrap(), &[&src], Some(options)).unwrap();
        assert_eq!(out.driver().short_name(), "GTiff");
    }

    #[test]
    fn warp_into_existing_dataset() {
        let src = mem_dem(10, 10, 4326);
        let driver = DriverManager::get_driver_by_name("MEM").unwrap();
        let mut dst = driver.create_with_band_type::<f32, _>("", 5, 5, 1).unwrap();
        dst.set_geo_transform(&[0.0, 0.2, 0.0, 50.0, 0.0, -0.2]).unwrap();
        dst.set_spatial_ref(&SpatialRef::from_epsg(4326).unwrap())
            .unwrap();
        let out = warp(dst.into(), &[&src], None).unwrap();
        assert_eq!(out.raster_size(), (5, 5));
        let gt = out.geo_transform().unwrap();
        assert_near!(gt[1], 0.2, epsilon = 1e-12);
    }

    #[test]
    fn unwritable_destination_fails() {
        let _nolog = SuppressGDALErrorLog::new();
        let src = mem_dem(10, 10, 4326);
        let options: WarpOptions = ["-of", "GTiff"].try_into().unwrap();
        let err = warp(
            "/nonexistent/dir/warped.tif".try_into().unwrap(),
            &[&src],
            Some(options),
        )
        .unwrap_err();
        assert!(
            matches!(err, GdalError::ProgramError { program: "GDALWarp", .. }),
            "{err:?}"
        );
    }
}
