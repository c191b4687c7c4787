//! GDAL Raster Data

mod rasterband;
mod types;

pub use rasterband::{Buffer, RasterBand};
pub use types::{data_type_size, GDALDataType, GdalType};
