//! Spatial reference systems and coordinate transformations.
//!
//! See [`SpatialRef`] for the coordinate system definitions and [`CoordTransform`] for moving
//! coordinates between them.

mod srs;
mod transform;
mod transform_opts;

pub use gdal_sys::{OGRAxisOrientation, OSRAxisMappingStrategy};
pub use srs::{
    cleanup, AxisMappingStrategy, AxisOrientationType, ErmDefinition, GeographicCsParams,
    PciDefinition, SpatialRef, UsgsDefinition, PCI_PARAM_COUNT, USGS_PARAM_COUNT,
};
pub use transform::CoordTransform;
pub use transform_opts::CoordTransformOptions;
