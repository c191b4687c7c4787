//! GDAL Vector Data
//!
//! Only the layer operations needed to feed and inspect the batch utilities are wrapped:
//! layer creation, attribute schema and feature counting.

mod layer;
mod options;

pub use gdal_sys::{OGRFieldType, OGRwkbGeometryType};
pub use layer::Layer;
pub use options::LayerOptions;

/// Short name of the in-memory vector driver of the running GDAL.
///
/// GDAL 3.11 folded the `Memory` vector driver into `MEM`; older releases only know `Memory`.
pub fn in_memory_driver_name() -> &'static str {
    if crate::version::is_at_least(3, 11) {
        "MEM"
    } else {
        "Memory"
    }
}
