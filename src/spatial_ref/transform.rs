use std::ptr::null_mut;

use gdal_sys::{CPLErr, OGRCoordinateTransformationH};
use libc::c_int;

use crate::errors::*;
use crate::spatial_ref::{CoordTransformOptions, SpatialRef};
use crate::utils::{_last_cpl_err, _last_null_pointer_err};

/// A coordinate transformation bound to a source and a target [`SpatialRef`].
///
/// ```rust, no_run
/// # fn main() -> osgeo::errors::Result<()> {
/// use osgeo::spatial_ref::{CoordTransform, OSRAxisMappingStrategy, SpatialRef};
///
/// let mut wgs84 = SpatialRef::from_epsg(4326)?;
/// wgs84.set_axis_mapping_strategy(OSRAxisMappingStrategy::OAMS_TRADITIONAL_GIS_ORDER);
/// let mercator = SpatialRef::from_epsg(3857)?;
/// let transform = CoordTransform::new(&wgs84, &mercator)?;
/// let (mut x, mut y) = ([2.35], [48.85]);
/// transform.transform_coords(&mut x, &mut y, &mut [])?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CoordTransform {
    inner: OGRCoordinateTransformationH,
    from: String,
    to: String,
}

impl Drop for CoordTransform {
    fn drop(&mut self) {
        log::trace!("Destroying coordinate transformation {:?}", self.inner);
        unsafe { gdal_sys::OCTDestroyCoordinateTransformation(self.inner) };
    }
}

fn _describe(srs: &SpatialRef) -> Result<String> {
    srs.authority().or_else(|_| srs.to_proj4())
}

impl CoordTransform {
    /// Constructs a new transformation from `source` to `target`.
    ///
    /// Both spatial references are only read; the transformation keeps its own copies.
    pub fn new(source: &SpatialRef, target: &SpatialRef) -> Result<CoordTransform> {
        let c_obj = unsafe {
            gdal_sys::OCTNewCoordinateTransformation(source.to_c_hsrs(), target.to_c_hsrs())
        };
        if c_obj.is_null() {
            return Err(_last_null_pointer_err("OCTNewCoordinateTransformation"));
        }
        Self::wrap(c_obj, source, target)
    }

    /// Like [`CoordTransform::new`], with the operation selection tuned by `options`.
    pub fn new_with_options(
        source: &SpatialRef,
        target: &SpatialRef,
        options: &CoordTransformOptions,
    ) -> Result<CoordTransform> {
        let c_obj = unsafe {
            gdal_sys::OCTNewCoordinateTransformationEx(
                source.to_c_hsrs(),
                target.to_c_hsrs(),
                options.c_options(),
            )
        };
        if c_obj.is_null() {
            return Err(_last_null_pointer_err("OCTNewCoordinateTransformationEx"));
        }
        Self::wrap(c_obj, source, target)
    }

    fn wrap(
        c_obj: OGRCoordinateTransformationH,
        source: &SpatialRef,
        target: &SpatialRef,
    ) -> Result<CoordTransform> {
        let mut transform = CoordTransform {
            inner: c_obj,
            from: String::new(),
            to: String::new(),
        };
        // `transform` owns the handle from here on, so an early return still destroys it.
        transform.from = _describe(source)?;
        transform.to = _describe(target)?;
        Ok(transform)
    }

    /// Transforms every coordinate of `x`, `y` and (unless empty) `z` in place.
    ///
    /// Coordinates are in the axis order of the respective spatial references. All slices
    /// must have the same length.
    pub fn transform_coords(&self, x: &mut [f64], y: &mut [f64], z: &mut [f64]) -> Result<()> {
        let count = Self::common_len(x, y, z)?;
        self.transform_points(count, x, y, z)
    }

    /// Transforms the first `count` points of `x`, `y` and (unless empty) `z` in place.
    ///
    /// `count` must not exceed the length of any non-empty slice. When only some points fail,
    /// the others are still transformed and [`GdalError::PartialTransform`] reports how many
    /// did not.
    pub fn transform_points(
        &self,
        count: usize,
        x: &mut [f64],
        y: &mut [f64],
        z: &mut [f64],
    ) -> Result<()> {
        let status = self.transform_with_status(count, x, y, z)?;
        let failed = status.iter().filter(|ok| !**ok).count();
        if failed == 0 {
            Ok(())
        } else if failed < count {
            Err(GdalError::PartialTransform {
                failed,
                total: count,
            })
        } else {
            Err(self.invalid_range())
        }
    }

    /// Transforms all points in place and reports, per point, whether it succeeded.
    ///
    /// Points that failed are flagged `false` and hold unspecified values. This only returns an
    /// error when the slices are inconsistent with each other.
    pub fn transform_coords_with_status(
        &self,
        x: &mut [f64],
        y: &mut [f64],
        z: &mut [f64],
    ) -> Result<Vec<bool>> {
        let count = Self::common_len(x, y, z)?;
        self.transform_with_status(count, x, y, z)
    }

    /// The number of points in `x`, `y` and `z`, which must have equal lengths unless `z` is
    /// empty.
    fn common_len(x: &[f64], y: &[f64], z: &[f64]) -> Result<usize> {
        let count = x.len();
        if y.len() != count || !(z.is_empty() || z.len() == count) {
            return Err(GdalError::BadArgument(format!(
                "coordinate slices differ in length: x {count}, y {}, z {}",
                y.len(),
                z.len()
            )));
        }
        Ok(count)
    }

    fn transform_with_status(
        &self,
        count: usize,
        x: &mut [f64],
        y: &mut [f64],
        z: &mut [f64],
    ) -> Result<Vec<bool>> {
        Self::check_len("x", count, x.len())?;
        Self::check_len("y", count, y.len())?;
        if !z.is_empty() {
            Self::check_len("z", count, z.len())?;
        }
        if count == 0 {
            return Ok(Vec::new());
        }
        let nb_coords = c_int::try_from(count)
            .map_err(|_| GdalError::BadArgument(format!("too many points: {count}")))?;

        let mut success: Vec<c_int> = vec![0; count];
        unsafe {
            gdal_sys::OCTTransformEx(
                self.inner,
                nb_coords,
                x.as_mut_ptr(),
                y.as_mut_ptr(),
                if z.is_empty() {
                    null_mut()
                } else {
                    z.as_mut_ptr()
                },
                success.as_mut_ptr(),
            )
        };
        Ok(success.into_iter().map(|ok| ok != 0).collect())
    }

    fn check_len(axis: &str, count: usize, len: usize) -> Result<()> {
        if count > len {
            return Err(GdalError::BadArgument(format!(
                "point count {count} exceeds the {len} {axis} coordinates given"
            )));
        }
        Ok(())
    }

    /// Transforms a bounding box, densifying its edges to follow non-linear transformations.
    ///
    /// `bounds` is `[axis0_min, axis1_min, axis0_max, axis1_max]` in the axis order of the
    /// source; the result is in the axis order of the target. 21 is a good `densify_pts`.
    #[cfg(any(major_ge_4, all(major_is_3, minor_ge_4)))]
    pub fn transform_bounds(&self, bounds: &[f64; 4], densify_pts: i32) -> Result<[f64; 4]> {
        let mut out = [0.0f64; 4];
        let [out_xmin, out_ymin, out_xmax, out_ymax] = &mut out;
        let ret_val = unsafe {
            gdal_sys::OCTTransformBounds(
                self.inner,
                bounds[0],
                bounds[1],
                bounds[2],
                bounds[3],
                out_xmin,
                out_ymin,
                out_xmax,
                out_ymax,
                densify_pts as c_int,
            )
        };
        if ret_val != 1 {
            return Err(self.invalid_range());
        }
        Ok(out)
    }

    fn invalid_range(&self) -> GdalError {
        let msg = match _last_cpl_err(CPLErr::CE_Failure) {
            GdalError::CplError { msg, .. } if !msg.trim().is_empty() => Some(msg),
            _ => None,
        };
        GdalError::InvalidCoordinateRange {
            from: self.from.clone(),
            to: self.to.clone(),
            msg,
        }
    }

    /// Returns the wrapped C handle. Ownership stays with `self`.
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_handle(&self) -> OGRCoordinateTransformationH {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_near;
    use crate::spatial_ref::OSRAxisMappingStrategy;
    use crate::test_utils::SuppressGDALErrorLog;

    fn lon_lat_wgs84() -> SpatialRef {
        let mut srs = SpatialRef::from_epsg(4326).unwrap();
        srs.set_axis_mapping_strategy(OSRAxisMappingStrategy::OAMS_TRADITIONAL_GIS_ORDER);
        srs
    }

    #[test]
    fn wgs84_to_web_mercator() {
        let transform =
            CoordTransform::new(&lon_lat_wgs84(), &SpatialRef::from_epsg(3857).unwrap()).unwrap();
        let mut x = [0.0, 10.0];
        let mut y = [0.0, 45.0];
        transform.transform_coords(&mut x, &mut y, &mut []).unwrap();
        assert_near!(x[0], 0.0, epsilon = 1e-6);
        assert_near!(y[0], 0.0, epsilon = 1e-6);
        assert_near!(x[1], 1113194.9079327357, epsilon = 1e-3);
        assert_near!(y[1], 5621521.486192066, epsilon = 1e-3);
    }

    #[test]
    fn transform_points_respects_count() {
        let transform =
            CoordTransform::new(&lon_lat_wgs84(), &SpatialRef::from_epsg(3857).unwrap()).unwrap();
        let mut x = [10.0, 10.0];
        let mut y = [45.0, 45.0];
        let mut z = [0.0, 0.0];
        transform.transform_points(1, &mut x, &mut y, &mut z).unwrap();
        assert_near!(x[0], 1113194.9079327357, epsilon = 1e-3);
        // The second point is outside of `count` and stays untouched.
        assert_eq!(x[1], 10.0);
        assert_eq!(y[1], 45.0);
    }

    #[test]
    fn transform_points_rejects_short_slices() {
        let transform = CoordTransform::new(&lon_lat_wgs84(), &lon_lat_wgs84()).unwrap();
        let mut x = [1.0, 2.0, 3.0];
        let mut y = [1.0, 2.0];
        let err = transform
            .transform_points(3, &mut x, &mut y, &mut [])
            .unwrap_err();
        assert!(matches!(err, GdalError::BadArgument(_)), "{err:?}");
        let err = transform
            .transform_coords(&mut x, &mut y, &mut [])
            .unwrap_err();
        assert!(matches!(err, GdalError::BadArgument(_)), "{err:?}");
        assert_eq!(x, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn transform_coords_rejects_longer_slices() {
        let transform =
            CoordTransform::new(&lon_lat_wgs84(), &SpatialRef::from_epsg(3857).unwrap()).unwrap();
        let mut x = [10.0];
        let mut y = [45.0, 46.0];
        let err = transform
            .transform_coords(&mut x, &mut y, &mut [])
            .unwrap_err();
        assert!(matches!(err, GdalError::BadArgument(_)), "{err:?}");
        assert_eq!((x, y), ([10.0], [45.0, 46.0]));

        let mut y = [45.0];
        let mut z = [0.0, 0.0];
        let err = transform
            .transform_coords_with_status(&mut x, &mut y, &mut z)
            .unwrap_err();
        assert!(matches!(err, GdalError::BadArgument(_)), "{err:?}");
        assert_eq!(x, [10.0]);
    }

    #[test]
    fn empty_input_is_a_no_op() {
        let transform = CoordTransform::new(&lon_lat_wgs84(), &lon_lat_wgs84()).unwrap();
        transform.transform_coords(&mut [], &mut [], &mut []).unwrap();
        let status = transform
            .transform_coords_with_status(&mut [], &mut [], &mut [])
            .unwrap();
        assert!(status.is_empty());
    }

    #[test]
    fn per_point_status() {
        let _nolog = SuppressGDALErrorLog::new();
        let transform =
            CoordTransform::new(&lon_lat_wgs84(), &SpatialRef::from_epsg(3857).unwrap()).unwrap();
        let mut x = [10.0, 0.0];
        let mut y = [45.0, 100.0];
        let status = transform
            .transform_coords_with_status(&mut x, &mut y, &mut [])
            .unwrap();
        assert_eq!(status, vec![true, false]);
        assert_near!(x[0], 1113194.9079327357, epsilon = 1e-3);

        let mut x = [10.0, 0.0];
        let mut y = [45.0, 100.0];
        let err = transform
            .transform_coords(&mut x, &mut y, &mut [])
            .unwrap_err();
        assert_eq!(
            err,
            GdalError::PartialTransform {
                failed: 1,
                total: 2
            }
        );
    }

    #[test]
    fn failing_transformation() {
        let _nolog = SuppressGDALErrorLog::new();
        let wgs84 = lon_lat_wgs84();
        let dhd_2 = SpatialRef::from_epsg(31462).unwrap();
        let mut x = [1979105.06];
        let mut y = [5694052.67];

        let transform = CoordTransform::new(&wgs84, &dhd_2).unwrap();
        let err = transform
            .transform_coords(&mut x, &mut y, &mut [])
            .unwrap_err();
        match err {
            GdalError::InvalidCoordinateRange { from, to, .. } => {
                assert_eq!(from, "EPSG:4326");
                assert_eq!(to, "EPSG:31462");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(any(major_ge_4, all(major_is_3, minor_ge_4)))]
    #[test]
    fn transform_bounds() {
        let bounds = [-180., -80., 180., 80.];
        let crs84 = SpatialRef::from_definition("OGC:CRS84").unwrap();

        let transform = CoordTransform::new(&crs84, &crs84).unwrap();
        let out = transform.transform_bounds(&bounds, 21).unwrap();
        for (o, b) in out.iter().zip(bounds) {
            assert_near!(*o, b, epsilon = 1e-6);
        }

        // EPSG:4326 keeps its authority axis order: latitude first.
        let transform = CoordTransform::new(&crs84, &SpatialRef::from_epsg(4326).unwrap()).unwrap();
        let out = transform.transform_bounds(&bounds, 21).unwrap();
        for (o, b) in out.iter().zip([-80.0, -180.0, 80.0, 180.0]) {
            assert_near!(*o, b, epsilon = 1e-6);
        }
    }
}
