use libc::c_int;

use crate::errors::*;
use crate::programs::{finish, native_options, program_options, resolve_args, DatasetDestination};
use crate::Dataset;

program_options!(
    /// Command line flags of [`translate`], as accepted by
    /// [`gdal_translate`](https://gdal.org/programs/gdal_translate.html).
    TranslateOptions
);

native_options!(
    GdalTranslateOptions,
    GDALTranslateOptions,
    GDALTranslateOptionsNew,
    GDALTranslateOptionsFree
);

/// Converts `source` between raster formats, optionally subsetting, resampling and rescaling it.
///
/// Wraps [GDALTranslate]. The destination must be a path or in memory.
///
/// [GDALTranslate]: https://gdal.org/api/gdal_utils.html#_CPPv413GDALTranslatePKc12GDALDatasetHPK20GDALTranslateOptionsPi
pub fn translate(
    dest: DatasetDestination,
    source: &Dataset,
    options: Option<TranslateOptions>,
) -> Result<Dataset> {
    dest.require_new("GDALTranslate")?;
    let args = resolve_args(
        "GDALTranslate",
        &dest,
        options.as_ref().map(TranslateOptions::args),
        "-of",
        "MEM",
    )?;
    let c_options = GdalTranslateOptions::new("GDALTranslate", &args)?;

    let mut usage_error: c_int = 0;
    let c_dataset = unsafe {
        let (c_dest, _) = dest.c_args();
        gdal_sys::GDALTranslate(
            c_dest,
            source.c_dataset(),
            c_options.as_ptr(),
            &mut usage_error,
        )
    };
    finish("GDALTranslate", c_dataset, usage_error, dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mem_dem, SuppressGDALErrorLog, TempFixture};
    use crate::DriverManager;

    #[test]
    fn translate_to_memory() {
        let src = mem_dem(10, 8, 32631);
        let out = translate("".try_into().unwrap(), &src, None).unwrap();
        assert_eq!(out.driver().short_name(), "MEM");
        assert_eq!(out.raster_size(), (10, 8));
        assert_eq!(out.geo_transform().unwrap(), src.geo_transform().unwrap());
    }

    #[test]
    fn caller_format_wins_in_memory() {
        let src = mem_dem(10, 8, 32631);
        let options: TranslateOptions = ["-of", "VRT"].try_into().unwrap();
        let out = translate("".try_into().unwrap(), &src, Some(options)).unwrap();
        assert_eq!(out.driver().short_name(), "VRT");
        let buffer = out.rasterband(1).unwrap().read_band_as::<f32>().unwrap();
        assert_eq!(buffer.data[3], 35.0);
    }

    #[test]
    fn subset_window() {
        let src = mem_dem(10, 8, 32631);
        let options: TranslateOptions = "-srcwin 2 2 4 3".parse().unwrap();
        let out = translate("".try_into().unwrap(), &src, Some(options)).unwrap();
        assert_eq!(out.raster_size(), (4, 3));
        let band = out.rasterband(1).unwrap();
        let buffer = band.read_band_as::<f32>().unwrap();
        // first pixel of the window sits at column 2
        assert_eq!(buffer.data[0], 25.0);
    }

    #[test]
    fn translate_to_file() {
        let src = mem_dem(10, 8, 32631);
        let fixture = TempFixture::empty("translated.tif");
        let options: TranslateOptions = ["-of", "GTiff", "-ot", "Int16"].try_into().unwrap();
        let out = translate(fixture.path().try_into().unwrap(), &src, Some(options)).unwrap();
        assert_eq!(out.driver().short_name(), "GTiff");
        assert_eq!(
            out.rasterband(1).unwrap().band_type(),
            crate::raster::GDALDataType::GDT_Int16
        );
        drop(out);
        assert!(fixture.path().exists());
    }

    #[test]
    fn existing_dataset_is_rejected() {
        let src = mem_dem(4, 4, 32631);
        let driver = DriverManager::get_driver_by_name("MEM").unwrap();
        let dst = driver.create("", 4, 4, 1).unwrap();
        let err = translate(dst.into(), &src, None).unwrap_err();
        assert!(matches!(err, GdalError::BadArgument(_)));
    }

    #[test]
    fn invalid_flag_is_reported() {
        let _nolog = SuppressGDALErrorLog::new();
        let options: TranslateOptions = ["-no-such-flag"].try_into().unwrap();
        let err = translate("".try_into().unwrap(), &mem_dem(4, 4, 32631), Some(options))
            .unwrap_err();
        assert!(
            matches!(
                err,
                GdalError::ProgramError {
                    program: "GDALTranslate",
                    ..
                }
            ),
            "{err:?}"
        );
    }
}
