pub use gdal_sys::GDALDataType;

/// Rust types that map onto a GDAL cell data type.
pub trait GdalType {
    fn gdal_type() -> GDALDataType::Type;
}

impl GdalType for u8 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_Byte
    }
}

impl GdalType for u16 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_UInt16
    }
}

impl GdalType for u32 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_UInt32
    }
}

impl GdalType for i16 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_Int16
    }
}

impl GdalType for i32 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_Int32
    }
}

impl GdalType for f32 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_Float32
    }
}

impl GdalType for f64 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_Float64
    }
}

/// Size in bytes of one cell of `data_type`, `0` for unknown types.
pub fn data_type_size(data_type: GDALDataType::Type) -> usize {
    (unsafe { gdal_sys::GDALGetDataTypeSizeBytes(data_type) }) as usize
}
