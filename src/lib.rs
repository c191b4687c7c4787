//! [GDAL](http://gdal.org/) bindings for Rust, centered on spatial references, coordinate
//! transformations and the GDAL command line utilities.
//!
//! ## Spatial references and transformations
//!
//! ```rust, no_run
//! # fn main() -> osgeo::errors::Result<()> {
//! use osgeo::spatial_ref::{CoordTransform, OSRAxisMappingStrategy, SpatialRef};
//!
//! let mut wgs84 = SpatialRef::from_epsg(4326)?;
//! wgs84.set_axis_mapping_strategy(OSRAxisMappingStrategy::OAMS_TRADITIONAL_GIS_ORDER);
//! let web_mercator = SpatialRef::from_epsg(3857)?;
//! let transform = CoordTransform::new(&wgs84, &web_mercator)?;
//!
//! let mut xs = [10.0];
//! let mut ys = [45.0];
//! transform.transform_coords(&mut xs, &mut ys, &mut [])?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! The [`programs`] module wraps `gdalwarp`, `gdal_translate`, `ogr2ogr`, `gdal_rasterize`,
//! `gdaldem` and contour generation. Flags are spelled as on the command line, and an empty
//! destination keeps the result in memory:
//!
//! ```rust, no_run
//! # fn main() -> osgeo::errors::Result<()> {
//! use osgeo::programs::raster::{warp, WarpOptions};
//! use osgeo::Dataset;
//!
//! let dem = Dataset::open("dem.tif")?;
//! let options: WarpOptions = "-t_srs EPSG:3857 -r bilinear".parse()?;
//! let reprojected = warp("".try_into()?, &[&dem], Some(options))?;
//! println!("{:?}", reprojected.raster_size());
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors and logging
//!
//! Every fallible call returns [`errors::Result`]. GDAL diagnostics can be forwarded to the
//! [`log`] crate with [`config::route_errors_to_log`].

#![crate_name = "osgeo"]
#![crate_type = "lib"]

pub mod config;
pub mod cpl;
mod dataset;
mod driver;
pub mod errors;
mod options;
pub mod programs;
pub mod raster;
pub mod spatial_ref;
#[cfg(test)]
pub(crate) mod test_utils;
mod utils;
pub mod vector;
pub mod version;

pub use dataset::{Dataset, GeoTransform};
pub use driver::{Driver, DriverManager};
pub use options::{DatasetOptions, GdalOpenFlags};
