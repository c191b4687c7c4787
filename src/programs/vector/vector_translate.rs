use std::borrow::Borrow;

use libc::c_int;

use crate::errors::*;
use crate::programs::{finish, native_options, program_options, resolve_args, DatasetDestination};
use crate::vector::in_memory_driver_name;
use crate::Dataset;

program_options!(
    /// Command line flags of [`vector_translate`], as accepted by
    /// [`ogr2ogr`](https://gdal.org/programs/ogr2ogr.html).
    VectorTranslateOptions
);

native_options!(
    GdalVectorTranslateOptions,
    GDALVectorTranslateOptions,
    GDALVectorTranslateOptionsNew,
    GDALVectorTranslateOptionsFree
);

/// Converts simple features data between file formats, optionally reprojecting and filtering it.
///
/// Wraps [GDALVectorTranslate]. When `dest` is an open dataset the layers are appended to it.
/// GDAL currently accepts a single source.
///
/// ```rust, no_run
/// # fn main() -> osgeo::errors::Result<()> {
/// use osgeo::programs::vector::{vector_translate, VectorTranslateOptions};
/// use osgeo::Dataset;
///
/// let src = Dataset::open("parcels.shp")?;
/// let options: VectorTranslateOptions = "-t_srs epsg:4326 -f GeoJSON".parse()?;
/// vector_translate("parcels.geojson".try_into()?, &[&src], Some(options))?;
/// # Ok(())
/// # }
/// ```
///
/// [GDALVectorTranslate]: https://gdal.org/api/gdal_utils.html#_CPPv419GDALVectorTranslatePKc12GDALDatasetHiP12GDALDatasetHPK26GDALVectorTranslateOptionsPi
pub fn vector_translate<D: Borrow<Dataset>>(
    dest: DatasetDestination,
    sources: &[D],
    options: Option<VectorTranslateOptions>,
) -> Result<Dataset> {
    let args = resolve_args(
        "GDALVectorTranslate",
        &dest,
        options.as_ref().map(VectorTranslateOptions::args),
        "-f",
        in_memory_driver_name(),
    )?;
    let c_options = GdalVectorTranslateOptions::new("GDALVectorTranslate", &args)?;
    let mut c_sources: Vec<gdal_sys::GDALDatasetH> = sources
        .iter()
        .map(|ds| unsafe { ds.borrow().c_dataset() })
        .collect();

    let mut usage_error: c_int = 0;
    let c_dataset = unsafe {
        let (c_dest, c_dst_ds) = dest.c_args();
        gdal_sys::GDALVectorTranslate(
            c_dest,
            c_dst_ds,
            c_sources.len() as c_int,
            c_sources.as_mut_ptr(),
            c_options.as_ptr(),
            &mut usage_error,
        )
    };
    finish("GDALVectorTranslate", c_dataset, usage_error, dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixture, SuppressGDALErrorLog, TempFixture};
    use crate::DriverManager;

    fn hills() -> Dataset {
        Dataset::open(fixture("hills.geojson")).unwrap()
    }

    #[test]
    fn translate_to_memory() {
        let out = vector_translate("".try_into().unwrap(), &[hills()], None).unwrap();
        assert_eq!(out.driver().short_name(), in_memory_driver_name());
        assert_eq!(out.layer_count(), 1);
        assert_eq!(out.layer(0).unwrap().feature_count(), 3);
    }

    #[test]
    fn caller_format_wins_in_memory() {
        let src = hills();
        let options: VectorTranslateOptions = ["-f", in_memory_driver_name(), "-nln", "copied"]
            .try_into()
            .unwrap();
        assert_eq!(
            resolve_args(
                "GDALVectorTranslate",
                &DatasetDestination::InMemory,
                Some(options.args()),
                "-f",
                in_memory_driver_name(),
            )
            .unwrap()
            .iter()
            .collect::<Vec<_>>(),
            options.args().iter().collect::<Vec<_>>()
        );
        let out = vector_translate("".try_into().unwrap(), &[&src], Some(options)).unwrap();
        assert_eq!(out.driver().short_name(), in_memory_driver_name());
        assert_eq!(out.layer_by_name("copied").unwrap().feature_count(), 3);
    }

    #[test]
    fn reproject_to_geojson() {
        let src = hills();
        let fixture = TempFixture::empty("hills_4326.geojson");
        let options: VectorTranslateOptions = "-t_srs epsg:4326 -f GeoJSON".parse().unwrap();
        let out = vector_translate(fixture.path().try_into().unwrap(), &[&src], Some(options))
            .unwrap();
        assert_eq!(out.driver().short_name(), "GeoJSON");
        assert_eq!(out.layer(0).unwrap().feature_count(), 3);
        drop(out);

        let reopened = Dataset::open(fixture.path()).unwrap();
        let srs = reopened.layer(0).unwrap().spatial_ref().unwrap();
        assert!(srs.is_geographic());
    }

    #[test]
    fn attribute_filter() {
        let src = hills();
        let options: VectorTranslateOptions = ["-where", "code = 2"].try_into().unwrap();
        let out = vector_translate("".try_into().unwrap(), &[&src], Some(options)).unwrap();
        let mut layer = out.layer(0).unwrap();
        assert_eq!(layer.feature_count(), 1);
        assert_eq!(layer.double_values("code").unwrap(), [2.0]);
    }

    #[test]
    fn append_to_existing_dataset() {
        let src = hills();
        let driver = DriverManager::get_driver_by_name(in_memory_driver_name()).unwrap();
        let dst = driver.create_vector_only("").unwrap();
        let options: VectorTranslateOptions = ["-nln", "copied"].try_into().unwrap();
        let out = vector_translate(dst.into(), &[&src], Some(options)).unwrap();
        assert_eq!(out.layer_count(), 1);
        assert_eq!(out.layer_by_name("copied").unwrap().feature_count(), 3);
    }

    #[test]
    fn unknown_driver_fails() {
        let _nolog = SuppressGDALErrorLog::new();
        let src = hills();
        let options: VectorTranslateOptions = ["-f", "NoSuchDriver"].try_into().unwrap();
        let err = vector_translate("".try_into().unwrap(), &[&src], Some(options)).unwrap_err();
        assert!(
            matches!(
                err,
                GdalError::ProgramError {
                    program: "GDALVectorTranslate",
                    ..
                }
            ),
            "{err:?}"
        );
    }
}
