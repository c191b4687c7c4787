use std::ffi::c_void;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::spatial_ref::SpatialRef;
use crate::{Dataset, DriverManager};

/// A temporary directory and a path to a file in that directory, removed on drop.
pub struct TempFixture {
    _temp_dir: tempfile::TempDir,
    temp_path: PathBuf,
}

impl TempFixture {
    /// A path to a not yet existing file `name` in a fresh temporary directory.
    pub fn empty(name: &str) -> Self {
        let _temp_dir = tempfile::tempdir().unwrap();
        let temp_path = _temp_dir.path().join(name);
        Self {
            _temp_dir,
            temp_path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.temp_path
    }
}

impl AsRef<Path> for TempFixture {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}

/// Returns the fully qualified path to `filename` in `${CARGO_MANIFEST_DIR}/fixtures`.
pub fn fixture(filename: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(filename)
}

/// Scoped value for temporarily suppressing thread-local GDAL log messages.
///
/// Useful for tests that expect GDAL errors and want to keep the output log clean
/// of distracting yet expected error messages.
pub(crate) struct SuppressGDALErrorLog {
    // Make !Sync and !Send, and force use of `new`.
    _private: PhantomData<*mut c_void>,
}

impl SuppressGDALErrorLog {
    pub(crate) fn new() -> Self {
        unsafe { gdal_sys::CPLPushErrorHandler(Some(gdal_sys::CPLQuietErrorHandler)) };
        SuppressGDALErrorLog {
            _private: PhantomData,
        }
    }
}

impl Drop for SuppressGDALErrorLog {
    fn drop(&mut self) {
        unsafe { gdal_sys::CPLPopErrorHandler() };
    }
}

/// An in-memory single band `f32` elevation model rising 10 units per column eastwards,
/// `z = 10 * col + 5`.
///
/// Geographic `epsg` codes get 0.1° cells anchored at 0°E 50°N, projected ones 10 m cells
/// anchored at (500000, 5000000).
pub fn mem_dem(width: usize, height: usize, epsg: u32) -> Dataset {
    let srs = SpatialRef::from_epsg(epsg).unwrap();
    let driver = DriverManager::get_driver_by_name("MEM").unwrap();
    let mut dataset = driver
        .create_with_band_type::<f32, _>("", width, height, 1)
        .unwrap();
    let geo_transform = if srs.is_geographic() {
        [0.0, 0.1, 0.0, 50.0, 0.0, -0.1]
    } else {
        [500_000.0, 10.0, 0.0, 5_000_000.0, 0.0, -10.0]
    };
    dataset.set_geo_transform(&geo_transform).unwrap();
    dataset.set_spatial_ref(&srs).unwrap();

    let data: Vec<f32> = (0..height)
        .flat_map(|_| (0..width).map(|col| (10 * col + 5) as f32))
        .collect();
    let buffer = crate::raster::Buffer::new((width, height), data);
    dataset
        .rasterband(1)
        .unwrap()
        .write((0, 0), (width, height), &buffer)
        .unwrap();
    dataset
}

/// Assert numerical difference between two expressions is less than
/// 64-bit machine epsilon or a specified epsilon.
#[macro_export]
macro_rules! assert_near {
    ($left:expr, $right:expr) => {
        $crate::assert_near!($left, $right, epsilon = f64::EPSILON)
    };
    ($left:expr, $right:expr, epsilon = $ep:expr) => {
        assert!(
            ($left - $right).abs() < $ep,
            "|{} - {}| = {} is greater than epsilon {:.4e}",
            $left,
            $right,
            ($left - $right).abs(),
            $ep
        )
    };
}
