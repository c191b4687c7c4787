use std::ffi::CString;
use std::marker::PhantomData;

use gdal_sys::{self, OGRFieldType, OGRLayerH};
use libc::c_int;

use crate::dataset::Dataset;
use crate::errors::*;
use crate::spatial_ref::SpatialRef;
use crate::utils::{_last_null_pointer_err, _ogr_result, _string};

/// Layer in a vector dataset
///
/// ```rust, no_run
/// # fn main() -> osgeo::errors::Result<()> {
/// use osgeo::Dataset;
///
/// let dataset = Dataset::open("fixtures/hills.geojson")?;
/// let layer = dataset.layer(0)?;
/// println!("{} has {} features", layer.name(), layer.feature_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Layer<'a> {
    c_layer: OGRLayerH,
    phantom: PhantomData<&'a Dataset>,
}

impl<'a> Layer<'a> {
    /// Creates a new Layer from a GDAL layer pointer
    ///
    /// # Safety
    /// This method operates on a raw C pointer
    pub(crate) unsafe fn from_c_layer(_: &'a Dataset, c_layer: OGRLayerH) -> Self {
        Layer {
            c_layer,
            phantom: PhantomData,
        }
    }

    /// Returns the C wrapped pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_layer(&self) -> OGRLayerH {
        self.c_layer
    }

    pub fn name(&self) -> String {
        _string(unsafe { gdal_sys::OGR_L_GetName(self.c_layer) }).unwrap_or_default()
    }

    /// Number of features in the layer, scanning it if the driver cannot answer cheaply.
    pub fn feature_count(&self) -> u64 {
        (unsafe { gdal_sys::OGR_L_GetFeatureCount(self.c_layer, 1) }) as u64
    }

    pub fn spatial_ref(&self) -> Option<SpatialRef> {
        let c_obj = unsafe { gdal_sys::OGR_L_GetSpatialRef(self.c_layer) };
        if c_obj.is_null() {
            return None;
        }
        unsafe { SpatialRef::from_c_obj(c_obj) }.ok()
    }

    /// Append a new attribute field named `name` to the layer schema.
    pub fn create_field(&mut self, name: &str, field_type: OGRFieldType::Type) -> Result<()> {
        let c_str = CString::new(name)?;
        let c_field_defn = unsafe { gdal_sys::OGR_Fld_Create(c_str.as_ptr(), field_type) };
        if c_field_defn.is_null() {
            return Err(_last_null_pointer_err("OGR_Fld_Create"));
        }
        let rv = unsafe { gdal_sys::OGR_L_CreateField(self.c_layer, c_field_defn, 1) };
        unsafe { gdal_sys::OGR_Fld_Destroy(c_field_defn) };
        _ogr_result(rv, "OGR_L_CreateField")
    }

    /// Index of the field named `name` in the layer schema.
    pub fn field_index(&self, name: &str) -> Result<usize> {
        let c_name = CString::new(name)?;
        let idx = unsafe {
            let c_defn = gdal_sys::OGR_L_GetLayerDefn(self.c_layer);
            gdal_sys::OGR_FD_GetFieldIndex(c_defn, c_name.as_ptr())
        };
        if idx < 0 {
            return Err(GdalError::BadArgument(format!(
                "layer '{}' has no field named '{name}'",
                self.name()
            )));
        }
        Ok(idx as usize)
    }

    pub fn field_count(&self) -> usize {
        (unsafe { gdal_sys::OGR_FD_GetFieldCount(gdal_sys::OGR_L_GetLayerDefn(self.c_layer)) })
            as usize
    }

    /// Reads `field` from every feature as a double, in layer order.
    pub fn double_values(&mut self, field: &str) -> Result<Vec<f64>> {
        let idx = self.field_index(field)? as c_int;
        let mut values = Vec::new();
        unsafe {
            gdal_sys::OGR_L_ResetReading(self.c_layer);
            loop {
                let c_feature = gdal_sys::OGR_L_GetNextFeature(self.c_layer);
                if c_feature.is_null() {
                    break;
                }
                values.push(gdal_sys::OGR_F_GetFieldAsDouble(c_feature, idx));
                gdal_sys::OGR_F_Destroy(c_feature);
            }
        }
        Ok(values)
    }
}
