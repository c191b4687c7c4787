use std::ffi::CString;
use std::num::NonZeroUsize;
use std::path::Path;
use std::ptr::null;

use libc::c_int;

use crate::errors::*;
use crate::programs::{finish, native_options, program_options, resolve_args, DatasetDestination};
use crate::utils::_path_to_c_string;
use crate::Dataset;

program_options!(
    /// Command line flags of [`dem_processing`], as accepted by
    /// [`gdaldem`](https://gdal.org/programs/gdaldem.html).
    DemProcessingOptions
);

native_options!(
    GdalDemProcessingOptions,
    GDALDEMProcessingOptions,
    GDALDEMProcessingOptionsNew,
    GDALDEMProcessingOptionsFree
);

/// DEM processor mode, passed to [`gdal_sys::GDALDEMProcessing`] as its processing name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemMode {
    /// Shaded relief map from any GDAL-supported elevation raster.
    Hillshade,
    /// Slope map, in degrees unless `-p` asks for a percentage.
    Slope,
    /// Azimuth that the slopes are facing, in degrees.
    Aspect,
    /// Color relief map, driven by a color configuration file.
    ColorRelief,
    /// Terrain Ruggedness Index.
    Tri,
    /// Topographic Position Index.
    Tpi,
    /// Largest inter-cell difference of a central pixel and its surrounding cells.
    Roughness,
}

impl DemMode {
    pub fn to_gdal_option(self) -> &'static str {
        match self {
            DemMode::Hillshade => "hillshade",
            DemMode::Slope => "slope",
            DemMode::Aspect => "aspect",
            DemMode::ColorRelief => "color-relief",
            DemMode::Tri => "TRI",
            DemMode::Tpi => "TPI",
            DemMode::Roughness => "roughness",
        }
    }
}

/// Slope and slope-related (aspect, hillshade) processing algorithms.
///
/// `ZevenbergenThorne` suits smooth landscapes, `Horn` rougher terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemSlopeAlg {
    Horn,
    ZevenbergenThorne,
}

impl DemSlopeAlg {
    fn to_gdal_option(self) -> &'static str {
        match self {
            DemSlopeAlg::Horn => "Horn",
            DemSlopeAlg::ZevenbergenThorne => "ZevenbergenThorne",
        }
    }
}

impl DemProcessingOptions {
    /// Read elevations from `band` instead of the first one.
    pub fn with_input_band(&mut self, band: NonZeroUsize) -> Result<&mut Self> {
        self.add_args(["-b", &band.to_string()])
    }

    /// Explicitly specify the output raster format (`-of`).
    pub fn with_output_format(&mut self, format: &str) -> Result<&mut Self> {
        self.add_args(["-of", format])
    }

    /// Interpolate values at image edges and next to no-data cells.
    pub fn with_compute_edges(&mut self, state: bool) -> Result<&mut Self> {
        if state {
            self.add_arg("-compute_edges")?;
        }
        Ok(self)
    }

    /// Slope formula for hillshade, slope and aspect.
    pub fn with_algorithm(&mut self, algorithm: DemSlopeAlg) -> Result<&mut Self> {
        self.add_args(["-alg", algorithm.to_gdal_option()])
    }

    /// Ratio of vertical units to horizontal units (`-s`).
    pub fn with_scale(&mut self, scale: f64) -> Result<&mut Self> {
        self.add_args(["-s", &scale.to_string()])
    }
}

/// Runs one of the [`gdaldem`](https://gdal.org/programs/gdaldem.html) analyses over the
/// elevations of `source`.
///
/// Wraps [GDALDEMProcessing]. `color_file` is the color configuration required by
/// [`DemMode::ColorRelief`] and ignored by the other modes. The destination must be a path or in
/// memory.
///
/// ```rust, no_run
/// # fn main() -> osgeo::errors::Result<()> {
/// use osgeo::programs::raster::{dem_processing, DemMode, DemProcessingOptions};
/// use osgeo::Dataset;
///
/// let dem = Dataset::open("dem.tif")?;
/// let mut options = DemProcessingOptions::new();
/// options.with_compute_edges(true)?;
/// let shaded = dem_processing("".try_into()?, &dem, DemMode::Hillshade, None, Some(options))?;
/// # Ok(())
/// # }
/// ```
///
/// [GDALDEMProcessing]: https://gdal.org/api/gdal_utils.html#_CPPv417GDALDEMProcessingPKc12GDALDatasetHPKcPKcPK24GDALDEMProcessingOptionsPi
pub fn dem_processing(
    dest: DatasetDestination,
    source: &Dataset,
    mode: DemMode,
    color_file: Option<&Path>,
    options: Option<DemProcessingOptions>,
) -> Result<Dataset> {
    dest.require_new("GDALDEMProcessing")?;
    let c_color_file = match (mode, color_file) {
        (DemMode::ColorRelief, None) => {
            return Err(GdalError::BadArgument(
                "color-relief requires a color configuration file".to_string(),
            ))
        }
        (_, Some(path)) => Some(_path_to_c_string(path)?),
        (_, None) => None,
    };
    let c_mode = CString::new(mode.to_gdal_option())?;
    let args = resolve_args(
        "GDALDEMProcessing",
        &dest,
        options.as_ref().map(DemProcessingOptions::args),
        "-of",
        "MEM",
    )?;
    let c_options = GdalDemProcessingOptions::new("GDALDEMProcessing", &args)?;

    let mut usage_error: c_int = 0;
    let c_dataset = unsafe {
        let (c_dest, _) = dest.c_args();
        gdal_sys::GDALDEMProcessing(
            c_dest,
            source.c_dataset(),
            c_mode.as_ptr(),
            c_color_file.as_ref().map_or(null(), |c| c.as_ptr()),
            c_options.as_ptr(),
            &mut usage_error,
        )
    };
    finish("GDALDEMProcessing", c_dataset, usage_error, dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::GDALDataType;
    use crate::test_utils::{fixture, mem_dem, SuppressGDALErrorLog};

    #[test]
    fn mode_names() {
        assert_eq!(DemMode::ColorRelief.to_gdal_option(), "color-relief");
        assert_eq!(DemMode::Tri.to_gdal_option(), "TRI");
        assert_eq!(DemMode::Tpi.to_gdal_option(), "TPI");
        assert_eq!(DemMode::Roughness.to_gdal_option(), "roughness");
    }

    #[test]
    fn options_builder() {
        let mut options = DemProcessingOptions::new();
        options
            .with_input_band(NonZeroUsize::new(2).unwrap())
            .unwrap()
            .with_compute_edges(true)
            .unwrap()
            .with_compute_edges(false)
            .unwrap()
            .with_algorithm(DemSlopeAlg::ZevenbergenThorne)
            .unwrap()
            .with_output_format("GTiff")
            .unwrap();
        assert_eq!(
            options.args().iter().collect::<Vec<_>>(),
            [
                "-b",
                "2",
                "-compute_edges",
                "-alg",
                "ZevenbergenThorne",
                "-of",
                "GTiff"
            ]
        );
    }

    #[test]
    fn hillshade() {
        let dem = mem_dem(10, 10, 32631);
        let mut options = DemProcessingOptions::new();
        options.with_compute_edges(true).unwrap();
        let out = dem_processing(
            "".try_into().unwrap(),
            &dem,
            DemMode::Hillshade,
            None,
            Some(options),
        )
        .unwrap();
        assert_eq!(out.driver().short_name(), "MEM");
        assert_eq!(out.raster_size(), (10, 10));
        assert_eq!(out.raster_count(), 1);
        assert_eq!(
            out.rasterband(1).unwrap().band_type(),
            GDALDataType::GDT_Byte
        );
    }

    #[test]
    fn slope_of_a_plane() {
        let dem = mem_dem(10, 10, 32631);
        let mut options = DemProcessingOptions::new();
        options.with_compute_edges(true).unwrap();
        let out = dem_processing(
            "".try_into().unwrap(),
            &dem,
            DemMode::Slope,
            None,
            Some(options),
        )
        .unwrap();
        let slope = out.rasterband(1).unwrap().read_band_as::<f32>().unwrap();
        // the surface rises 10 m every 10 m eastwards
        crate::assert_near!(slope.data[55] as f64, 45.0, epsilon = 1e-3);
    }

    #[test]
    fn color_relief() {
        let dem = mem_dem(10, 10, 32631);
        let colors = fixture("color-relief.txt");
        let out = dem_processing(
            "".try_into().unwrap(),
            &dem,
            DemMode::ColorRelief,
            Some(&colors),
            None,
        )
        .unwrap();
        assert_eq!(out.raster_count(), 3);
        let red = out.rasterband(1).unwrap().read_band_as::<u8>().unwrap();
        let blue = out.rasterband(3).unwrap().read_band_as::<u8>().unwrap();
        // first column sits exactly on the blue entry of the ramp
        assert_eq!((red.data[0], blue.data[0]), (0, 255));
        // last column sits exactly on the red entry
        assert_eq!((red.data[9], blue.data[9]), (255, 0));
    }

    #[test]
    fn color_relief_requires_color_file() {
        let dem = mem_dem(4, 4, 32631);
        let err = dem_processing(
            "".try_into().unwrap(),
            &dem,
            DemMode::ColorRelief,
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, GdalError::BadArgument(_)));
    }

    #[test]
    fn missing_color_file_fails() {
        let _nolog = SuppressGDALErrorLog::new();
        let dem = mem_dem(4, 4, 32631);
        let err = dem_processing(
            "".try_into().unwrap(),
            &dem,
            DemMode::ColorRelief,
            Some(Path::new("/nonexistent/colors.txt")),
            None,
        )
        .unwrap_err();
        assert!(
            matches!(
                err,
                GdalError::ProgramError {
                    program: "GDALDEMProcessing",
                    ..
                }
            ),
            "{err:?}"
        );
    }
}
