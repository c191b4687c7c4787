use gdal_sys::CPLErr;

use crate::cpl::CslStringList;
use crate::errors::*;
use crate::programs::{program_error, progress_args};
use crate::raster::RasterBand;
use crate::vector::Layer;

/// `KEY=VALUE` options of [`contour_generate`].
///
/// See [GDALContourGenerateEx] for the recognized keys. Field options take the index of an
/// attribute field the target layer already has.
///
/// [GDALContourGenerateEx]: https://gdal.org/api/gdal_alg.html#_CPPv421GDALContourGenerateEx15GDALRasterBandHPv12CSLConstList16GDALProgressFuncPv
#[derive(Debug, Clone, Default)]
pub struct ContourOptions {
    options: CslStringList,
}

impl ContourOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an arbitrary option, replacing any previous value of `key`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<&mut Self> {
        self.options.set_name_value(key, value)?;
        Ok(self)
    }

    /// Elevation interval between contours.
    pub fn with_level_interval(&mut self, interval: f64) -> Result<&mut Self> {
        self.set("LEVEL_INTERVAL", &interval.to_string())
    }

    /// Elevation from which the intervals are counted.
    pub fn with_level_base(&mut self, base: f64) -> Result<&mut Self> {
        self.set("LEVEL_BASE", &base.to_string())
    }

    /// Contours at exactly these elevations, instead of regular intervals.
    pub fn with_fixed_levels(&mut self, levels: &[f64]) -> Result<&mut Self> {
        let joined: Vec<String> = levels.iter().map(f64::to_string).collect();
        self.set("FIXED_LEVELS", &joined.join(","))
    }

    /// Exponential base of the contour levels.
    pub fn with_level_exp_base(&mut self, base: f64) -> Result<&mut Self> {
        self.set("LEVEL_EXP_BASE", &base.to_string())
    }

    /// Cells holding `nodata` are skipped.
    pub fn with_nodata(&mut self, nodata: f64) -> Result<&mut Self> {
        self.set("NODATA", &nodata.to_string())
    }

    /// Field receiving a unique id per feature.
    pub fn with_id_field(&mut self, field_index: usize) -> Result<&mut Self> {
        self.set("ID_FIELD", &field_index.to_string())
    }

    /// Field receiving the elevation of each contour line.
    pub fn with_elev_field(&mut self, field_index: usize) -> Result<&mut Self> {
        self.set("ELEV_FIELD", &field_index.to_string())
    }

    /// Fields receiving the bounds of each contour polygon.
    pub fn with_elev_range_fields(
        &mut self,
        min_field_index: usize,
        max_field_index: usize,
    ) -> Result<&mut Self> {
        self.set("ELEV_FIELD_MIN", &min_field_index.to_string())?;
        self.set("ELEV_FIELD_MAX", &max_field_index.to_string())
    }

    /// Generate polygons between levels instead of lines.
    pub fn with_polygonize(&mut self, polygonize: bool) -> Result<&mut Self> {
        self.set("POLYGONIZE", if polygonize { "YES" } else { "NO" })
    }

    pub fn options(&self) -> &CslStringList {
        &self.options
    }
}

impl From<CslStringList> for ContourOptions {
    fn from(options: CslStringList) -> Self {
        Self { options }
    }
}

impl TryFrom<&[&str]> for ContourOptions {
    type Error = GdalError;

    /// Builds the options from `KEY=VALUE` strings.
    fn try_from(options: &[&str]) -> Result<Self> {
        Ok(Self {
            options: options.try_into()?,
        })
    }
}

impl<const N: usize> TryFrom<[&str; N]> for ContourOptions {
    type Error = GdalError;

    fn try_from(options: [&str; N]) -> Result<Self> {
        Self::try_from(options.as_slice())
    }
}

/// Writes the contours of `band` as features of `layer`.
///
/// Wraps [GDALContourGenerateEx]. `progress` is called as rows get processed; returning `false`
/// stops the run, which then fails with a [`GdalError::ProgramError`].
///
/// ```rust, no_run
/// # fn main() -> osgeo::errors::Result<()> {
/// use osgeo::programs::raster::{contour_generate, ContourOptions};
/// use osgeo::vector::{in_memory_driver_name, LayerOptions, OGRFieldType, OGRwkbGeometryType};
/// use osgeo::{Dataset, DriverManager};
///
/// let dem = Dataset::open("dem.tif")?;
/// let driver = DriverManager::get_driver_by_name(in_memory_driver_name())?;
/// let mut contours = driver.create_vector_only("")?;
/// let mut layer = contours.create_layer(LayerOptions {
///     name: "contour",
///     ty: OGRwkbGeometryType::wkbLineString,
///     ..Default::default()
/// })?;
/// layer.create_field("elev", OGRFieldType::OFTReal)?;
///
/// let mut options = ContourOptions::new();
/// options.with_level_interval(20.0)?.with_elev_field(0)?;
/// let mut report = |complete: f64, _: Option<&str>| {
///     println!("{:.0}%", complete * 100.0);
///     true
/// };
/// contour_generate(&dem.rasterband(1)?, &mut layer, &options, Some(&mut report))?;
/// # Ok(())
/// # }
/// ```
///
/// [GDALContourGenerateEx]: https://gdal.org/api/gdal_alg.html#_CPPv421GDALContourGenerateEx15GDALRasterBandHPv12CSLConstList16GDALProgressFuncPv
pub fn contour_generate(
    band: &RasterBand<'_>,
    layer: &mut Layer<'_>,
    options: &ContourOptions,
    mut progress: Option<&mut dyn FnMut(f64, Option<&str>) -> bool>,
) -> Result<()> {
    log::debug!("GDALContourGenerateEx {:?}", options.options);
    let mut forward = |complete: f64, message: Option<&str>| match progress.as_mut() {
        Some(callback) => callback(complete, message),
        None => true,
    };
    let (pfn_progress, progress_data) = progress_args(&mut forward);

    let rv = unsafe {
        gdal_sys::GDALContourGenerateEx(
            band.c_rasterband(),
            layer.c_layer(),
            options.options.as_ptr(),
            pfn_progress,
            progress_data,
        )
    };
    if rv != CPLErr::CE_None {
        return Err(program_error("GDALContourGenerateEx", 0));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial_ref::SpatialRef;
    use crate::test_utils::{mem_dem, SuppressGDALErrorLog};
    use crate::vector::{in_memory_driver_name, LayerOptions, OGRFieldType, OGRwkbGeometryType};
    use crate::{Dataset, DriverManager};

    fn contour_dataset() -> Dataset {
        DriverManager::get_driver_by_name(in_memory_driver_name())
            .unwrap()
            .create_vector_only("")
            .unwrap()
    }

    #[test]
    fn options_builder() {
        let mut options = ContourOptions::new();
        options
            .with_level_interval(20.0)
            .unwrap()
            .with_fixed_levels(&[10.0, 12.5])
            .unwrap()
            .with_id_field(0)
            .unwrap()
            .with_polygonize(true)
            .unwrap()
            .with_level_interval(10.0)
            .unwrap();
        let list = options.options();
        assert_eq!(
            list.fetch_name_value("LEVEL_INTERVAL").unwrap().as_deref(),
            Some("10")
        );
        assert_eq!(
            list.fetch_name_value("FIXED_LEVELS").unwrap().as_deref(),
            Some("10,12.5")
        );
        assert_eq!(
            list.fetch_name_value("POLYGONIZE").unwrap().as_deref(),
            Some("YES")
        );
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn contour_lines() {
        let dem = mem_dem(10, 10, 32631);
        let band = dem.rasterband(1).unwrap();
        let srs = SpatialRef::from_epsg(32631).unwrap();
        let mut out = contour_dataset();
        let mut layer = out
            .create_layer(LayerOptions {
                name: "contour",
                srs: Some(&srs),
                ty: OGRwkbGeometryType::wkbLineString,
                ..Default::default()
            })
            .unwrap();
        layer.create_field("ID", OGRFieldType::OFTInteger).unwrap();
        layer.create_field("elev", OGRFieldType::OFTReal).unwrap();

        let options: ContourOptions = ["LEVEL_INTERVAL=20", "ID_FIELD=0", "ELEV_FIELD=1"]
            .try_into()
            .unwrap();
        let mut seen = Vec::new();
        let mut report = |complete: f64, _: Option<&str>| {
            seen.push(complete);
            true
        };
        contour_generate(&band, &mut layer, &options, Some(&mut report)).unwrap();
        assert!(!seen.is_empty());
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));

        // elevations run from 5 to 95 west to east
        assert_eq!(layer.feature_count(), 4);
        let mut levels = layer.double_values("elev").unwrap();
        levels.sort_by(f64::total_cmp);
        assert_eq!(levels, [20.0, 40.0, 60.0, 80.0]);
    }

    #[test]
    fn without_progress() {
        let dem = mem_dem(10, 10, 32631);
        let band = dem.rasterband(1).unwrap();
        let mut out = contour_dataset();
        let mut layer = out
            .create_layer(LayerOptions {
                name: "contour",
                ty: OGRwkbGeometryType::wkbLineString,
                ..Default::default()
            })
            .unwrap();
        let mut options = ContourOptions::new();
        options.with_fixed_levels(&[50.0]).unwrap();
        contour_generate(&band, &mut layer, &options, None).unwrap();
        assert_eq!(layer.feature_count(), 1);
    }

    #[test]
    fn progress_can_abort() {
        let _nolog = SuppressGDALErrorLog::new();
        let dem = mem_dem(10, 10, 32631);
        let band = dem.rasterband(1).unwrap();
        let mut out = contour_dataset();
        let mut layer = out
            .create_layer(LayerOptions {
                name: "contour",
                ty: OGRwkbGeometryType::wkbLineString,
                ..Default::default()
            })
            .unwrap();
        let options: ContourOptions = ["LEVEL_INTERVAL=20"].try_into().unwrap();
        let mut stop = |_: f64, _: Option<&str>| false;
        let err = contour_generate(&band, &mut layer, &options, Some(&mut stop)).unwrap_err();
        assert!(
            matches!(
                err,
                GdalError::ProgramError {
                    program: "GDALContourGenerateEx",
                    ..
                }
            ),
            "{err:?}"
        );
    }
}
