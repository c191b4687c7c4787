//! Raster utilities: `gdalwarp`, `gdal_translate`, `gdal_rasterize`, `gdaldem` and
//! `gdal_contour`.

mod contour;
mod dem;
mod rasterize;
mod translate;
mod warp;

pub use contour::{contour_generate, ContourOptions};
pub use dem::{dem_processing, DemMode, DemProcessingOptions, DemSlopeAlg};
pub use rasterize::{rasterize, RasterizeOptions};
pub use translate::{translate, TranslateOptions};
pub use warp::{warp, WarpOptions};
