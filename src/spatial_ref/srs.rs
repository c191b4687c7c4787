use std::ffi::CString;
use std::ptr;
use std::str::FromStr;

use gdal_sys::{self, OGRAxisOrientation, OGRErr, OGRSpatialReferenceH, OSRAxisMappingStrategy};
use libc::{c_char, c_int, c_long};

use crate::cpl::CslStringList;
use crate::errors::*;
use crate::utils::{_last_null_pointer_err, _ogr_result, _string, _string_and_free};

/// Number of projection parameters exchanged with PCI definitions.
pub const PCI_PARAM_COUNT: usize = 17;
/// Number of projection parameters exchanged with USGS (GCTP) definitions.
pub const USGS_PARAM_COUNT: usize = 15;

/// A spatial reference system, in the PCI/Geomatica representation.
#[derive(Debug, Clone, PartialEq)]
pub struct PciDefinition {
    /// 16 character projection string, e.g. `"UTM  11  D000"`.
    pub proj: String,
    /// Linear units, e.g. `"METRE"`.
    pub units: String,
    pub params: [f64; PCI_PARAM_COUNT],
}

/// A spatial reference system, in the USGS General Cartographic Transformation Package
/// representation.
#[derive(Debug, Clone, PartialEq)]
pub struct UsgsDefinition {
    pub proj_sys: i64,
    pub zone: i64,
    pub params: [f64; USGS_PARAM_COUNT],
    pub datum: i64,
}

/// A spatial reference system, in the ERMapper representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErmDefinition {
    pub proj: String,
    pub datum: String,
    pub units: String,
}

/// Arguments of [`SpatialRef::set_geographic_cs`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeographicCsParams<'a> {
    pub geog_name: &'a str,
    pub datum_name: &'a str,
    pub spheroid_name: &'a str,
    pub semi_major: f64,
    pub inv_flattening: f64,
    pub pm_name: &'a str,
    pub pm_offset: f64,
    pub angular_units: &'a str,
    pub convert_to_radians: f64,
}

impl Default for GeographicCsParams<'_> {
    /// WGS84 ellipsoid with the Greenwich prime meridian, in degrees.
    fn default() -> Self {
        GeographicCsParams {
            geog_name: "",
            datum_name: "",
            spheroid_name: "WGS 84",
            semi_major: 6378137.0,
            inv_flattening: 298.257223563,
            pm_name: "Greenwich",
            pm_offset: 0.0,
            angular_units: "degree",
            convert_to_radians: std::f64::consts::PI / 180.0,
        }
    }
}

fn _c_target(target: Option<&str>) -> Result<Option<CString>> {
    target.map(CString::new).transpose().map_err(Into::into)
}

fn _opt_ptr(value: &Option<CString>) -> *const c_char {
    value.as_ref().map_or(ptr::null(), |v| v.as_ptr())
}

/// Forwards the numeric parameters of a projection setter to OSR unchanged.
macro_rules! projection_setters {
    ($($(#[$attr:meta])* $name:ident => $native:ident($($arg:ident),*);)*) => {
        $(
            $(#[$attr])*
            pub fn $name(&mut self, $($arg: f64),*) -> Result<()> {
                let rv = unsafe { gdal_sys::$native(self.0, $($arg),*) };
                _ogr_result(rv, stringify!($native))
            }
        )*
    };
}

/// A OpenGIS Spatial Reference System definition.
///
/// Used in geo-referencing raster and vector data, and in coordinate transformations.
///
/// # Notes
/// * See also: [OGR Coordinate Reference Systems and Coordinate Transformation Tutorial](https://gdal.org/tutorials/osr_api_tut.html)
/// * Consult the [OGC WKT Coordinate System Issues](https://gdal.org/tutorials/wktproblems.html)
///   page for implementation details of WKT in OGR.
#[derive(Debug)]
pub struct SpatialRef(OGRSpatialReferenceH);

// An OGRSpatialReference may be moved to another thread, it just must not be used by two at once.
unsafe impl Send for SpatialRef {}

impl Drop for SpatialRef {
    fn drop(&mut self) {
        log::trace!("Releasing spatial reference {:?}", self.0);
        unsafe { gdal_sys::OSRRelease(self.0) };
        self.0 = ptr::null_mut();
    }
}

impl Clone for SpatialRef {
    fn clone(&self) -> SpatialRef {
        let n_obj = unsafe { gdal_sys::OSRClone(self.0) };
        SpatialRef(n_obj)
    }
}

impl PartialEq for SpatialRef {
    fn eq(&self, other: &SpatialRef) -> bool {
        self.is_same(other)
    }
}

impl FromStr for SpatialRef {
    type Err = GdalError;

    /// Accepts anything [`SpatialRef::from_definition`] does.
    fn from_str(definition: &str) -> Result<Self> {
        SpatialRef::from_definition(definition)
    }
}

impl SpatialRef {
    /// Creates an empty spatial reference.
    pub fn new() -> Result<SpatialRef> {
        let c_obj = unsafe { gdal_sys::OSRNewSpatialReference(ptr::null()) };
        if c_obj.is_null() {
            return Err(_last_null_pointer_err("OSRNewSpatialReference"));
        }
        Ok(SpatialRef(c_obj))
    }

    /// Creates a spatial reference from any definition `OSRSetFromUserInput` understands:
    /// WKT, `EPSG:n`, PROJ strings, well known names such as `WGS84`, URNs and file names.
    pub fn from_definition(definition: &str) -> Result<SpatialRef> {
        let mut srs = SpatialRef::new()?;
        srs.set_from_user_input(definition)?;
        Ok(srs)
    }

    pub fn from_wkt(wkt: &str) -> Result<SpatialRef> {
        let c_str = CString::new(wkt)?;
        let c_obj = unsafe { gdal_sys::OSRNewSpatialReference(c_str.as_ptr()) };
        if c_obj.is_null() {
            return Err(_last_null_pointer_err("OSRNewSpatialReference"));
        }
        Ok(SpatialRef(c_obj))
    }

    pub fn from_epsg(epsg_code: u32) -> Result<SpatialRef> {
        let mut srs = SpatialRef::new()?;
        srs.import_from_epsg(epsg_code)?;
        Ok(srs)
    }

    /// Like [`SpatialRef::from_epsg`], but keeps the axis order mandated by EPSG
    /// (e.g. latitude first for geographic systems).
    pub fn from_epsga(epsg_code: u32) -> Result<SpatialRef> {
        let mut srs = SpatialRef::new()?;
        srs.import_from_epsga(epsg_code)?;
        Ok(srs)
    }

    pub fn from_proj4(proj4_string: &str) -> Result<SpatialRef> {
        let mut srs = SpatialRef::new()?;
        srs.import_from_proj4(proj4_string)?;
        Ok(srs)
    }

    /// Imports an ESRI `.prj` definition, either WKT or the older multi-line format.
    pub fn from_esri(esri_wkt: &str) -> Result<SpatialRef> {
        let mut srs = SpatialRef::new()?;
        srs.import_from_esri(esri_wkt)?;
        Ok(srs)
    }

    pub fn from_xml(xml: &str) -> Result<SpatialRef> {
        let mut srs = SpatialRef::new()?;
        srs.import_from_xml(xml)?;
        Ok(srs)
    }

    /// Fetches a definition from a URL, e.g. `https://spatialreference.org/ref/epsg/4326/`.
    pub fn from_url(url: &str) -> Result<SpatialRef> {
        let mut srs = SpatialRef::new()?;
        srs.import_from_url(url)?;
        Ok(srs)
    }

    pub fn from_pci(proj: &str, units: &str, params: &[f64]) -> Result<SpatialRef> {
        let mut srs = SpatialRef::new()?;
        srs.import_from_pci(proj, units, params)?;
        Ok(srs)
    }

    pub fn from_usgs(proj_sys: i64, zone: i64, params: &[f64], datum: i64) -> Result<SpatialRef> {
        let mut srs = SpatialRef::new()?;
        srs.import_from_usgs(proj_sys, zone, params, datum)?;
        Ok(srs)
    }

    pub fn from_erm(proj: &str, datum: &str, units: &str) -> Result<SpatialRef> {
        let mut srs = SpatialRef::new()?;
        srs.import_from_erm(proj, datum, units)?;
        Ok(srs)
    }

    /// Creates a new SpatialRef by cloning a borrowed C handle.
    ///
    /// # Safety
    /// `c_obj` must be a valid `OGRSpatialReferenceH`. The caller keeps ownership of it.
    pub unsafe fn from_c_obj(c_obj: OGRSpatialReferenceH) -> Result<SpatialRef> {
        let mut_c_obj = gdal_sys::OSRClone(c_obj);
        if mut_c_obj.is_null() {
            Err(_last_null_pointer_err("OSRClone"))
        } else {
            Ok(SpatialRef(mut_c_obj))
        }
    }

    /// Returns the wrapped C handle. Ownership stays with `self`.
    pub fn to_c_hsrs(&self) -> OGRSpatialReferenceH {
        self.0
    }

    pub fn set_from_user_input(&mut self, definition: &str) -> Result<()> {
        let c_str = CString::new(definition)?;
        let rv = unsafe { gdal_sys::OSRSetFromUserInput(self.0, c_str.as_ptr()) };
        _ogr_result(rv, "OSRSetFromUserInput")
    }

    pub fn import_from_wkt(&mut self, wkt: &str) -> Result<()> {
        let c_str = CString::new(wkt)?;
        // OSR advances this cursor while parsing; the buffer itself is left untouched.
        let mut cursor = c_str.as_ptr() as *mut c_char;
        let rv = unsafe { gdal_sys::OSRImportFromWkt(self.0, &mut cursor) };
        _ogr_result(rv, "OSRImportFromWkt")
    }

    pub fn import_from_epsg(&mut self, epsg_code: u32) -> Result<()> {
        let rv = unsafe { gdal_sys::OSRImportFromEPSG(self.0, epsg_code as c_int) };
        _ogr_result(rv, "OSRImportFromEPSG")
    }

    pub fn import_from_epsga(&mut self, epsg_code: u32) -> Result<()> {
        let rv = unsafe { gdal_sys::OSRImportFromEPSGA(self.0, epsg_code as c_int) };
        _ogr_result(rv, "OSRImportFromEPSGA")
    }

    pub fn import_from_proj4(&mut self, proj4_string: &str) -> Result<()> {
        let c_str = CString::new(proj4_string)?;
        let rv = unsafe { gdal_sys::OSRImportFromProj4(self.0, c_str.as_ptr()) };
        _ogr_result(rv, "OSRImportFromProj4")
    }

    pub fn import_from_esri(&mut self, esri_wkt: &str) -> Result<()> {
        let mut lines = CslStringList::new();
        for line in esri_wkt.lines() {
            lines.add_string(line)?;
        }
        let rv = unsafe { gdal_sys::OSRImportFromESRI(self.0, lines.as_ptr()) };
        _ogr_result(rv, "OSRImportFromESRI")
    }

    pub fn import_from_xml(&mut self, xml: &str) -> Result<()> {
        let c_str = CString::new(xml)?;
        let rv = unsafe { gdal_sys::OSRImportFromXML(self.0, c_str.as_ptr()) };
        _ogr_result(rv, "OSRImportFromXML")
    }

    pub fn import_from_url(&mut self, url: &str) -> Result<()> {
        let c_str = CString::new(url)?;
        let rv = unsafe { gdal_sys::OSRImportFromUrl(self.0, c_str.as_ptr()) };
        _ogr_result(rv, "OSRImportFromUrl")
    }

    /// Imports a PCI projection string, units and up to 17 projection parameters.
    ///
    /// Missing trailing parameters are passed as `0.0`.
    pub fn import_from_pci(&mut self, proj: &str, units: &str, params: &[f64]) -> Result<()> {
        let mut c_params = [0.0; PCI_PARAM_COUNT];
        Self::copy_params(&mut c_params, params)?;
        let c_proj = CString::new(proj)?;
        let c_units = CString::new(units)?;
        let rv = unsafe {
            gdal_sys::OSRImportFromPCI(
                self.0,
                c_proj.as_ptr(),
                c_units.as_ptr(),
                c_params.as_mut_ptr(),
            )
        };
        _ogr_result(rv, "OSRImportFromPCI")
    }

    /// Imports a USGS GCTP projection system, zone, up to 15 parameters and datum code.
    ///
    /// Missing trailing parameters are passed as `0.0`.
    pub fn import_from_usgs(
        &mut self,
        proj_sys: i64,
        zone: i64,
        params: &[f64],
        datum: i64,
    ) -> Result<()> {
        let mut c_params = [0.0; USGS_PARAM_COUNT];
        Self::copy_params(&mut c_params, params)?;
        let rv = unsafe {
            gdal_sys::OSRImportFromUSGS(
                self.0,
                proj_sys as c_long,
                zone as c_long,
                c_params.as_mut_ptr(),
                datum as c_long,
            )
        };
        _ogr_result(rv, "OSRImportFromUSGS")
    }

    pub fn import_from_erm(&mut self, proj: &str, datum: &str, units: &str) -> Result<()> {
        let c_proj = CString::new(proj)?;
        let c_datum = CString::new(datum)?;
        let c_units = CString::new(units)?;
        let rv = unsafe {
            gdal_sys::OSRImportFromERM(self.0, c_proj.as_ptr(), c_datum.as_ptr(), c_units.as_ptr())
        };
        _ogr_result(rv, "OSRImportFromERM")
    }

    fn copy_params(dest: &mut [f64], params: &[f64]) -> Result<()> {
        if params.len() > dest.len() {
            return Err(GdalError::BadArgument(format!(
                "at most {} projection parameters are supported, got {}",
                dest.len(),
                params.len()
            )));
        }
        dest[..params.len()].copy_from_slice(params);
        Ok(())
    }

    pub fn to_wkt(&self) -> Result<String> {
        let mut c_wkt = ptr::null_mut();
        let rv = unsafe { gdal_sys::OSRExportToWkt(self.0, &mut c_wkt) };
        let res = unsafe { _string_and_free(c_wkt) };
        _ogr_result(rv, "OSRExportToWkt")?;
        Ok(res.unwrap_or_default())
    }

    pub fn to_pretty_wkt(&self, simplify: bool) -> Result<String> {
        let mut c_wkt = ptr::null_mut();
        let rv =
            unsafe { gdal_sys::OSRExportToPrettyWkt(self.0, &mut c_wkt, simplify as c_int) };
        let res = unsafe { _string_and_free(c_wkt) };
        _ogr_result(rv, "OSRExportToPrettyWkt")?;
        Ok(res.unwrap_or_default())
    }

    pub fn to_xml(&self) -> Result<String> {
        let mut c_raw_xml = ptr::null_mut();
        let rv = unsafe { gdal_sys::OSRExportToXML(self.0, &mut c_raw_xml, ptr::null()) };
        let res = unsafe { _string_and_free(c_raw_xml) };
        _ogr_result(rv, "OSRExportToXML")?;
        Ok(res.unwrap_or_default())
    }

    pub fn to_proj4(&self) -> Result<String> {
        let mut c_proj4str = ptr::null_mut();
        let rv = unsafe { gdal_sys::OSRExportToProj4(self.0, &mut c_proj4str) };
        let res = unsafe { _string_and_free(c_proj4str) };
        _ogr_result(rv, "OSRExportToProj4")?;
        Ok(res.unwrap_or_default())
    }

    /// Exports a MapInfo `CoordSys` clause.
    pub fn to_mapinfo_coordsys(&self) -> Result<String> {
        let mut c_coordsys = ptr::null_mut();
        let rv = unsafe { gdal_sys::OSRExportToMICoordSys(self.0, &mut c_coordsys) };
        let res = unsafe { _string_and_free(c_coordsys) };
        _ogr_result(rv, "OSRExportToMICoordSys")?;
        Ok(res.unwrap_or_default())
    }

    pub fn to_pci(&self) -> Result<PciDefinition> {
        let mut c_proj = ptr::null_mut();
        let mut c_units = ptr::null_mut();
        let mut c_params: *mut f64 = ptr::null_mut();
        let rv = unsafe {
            gdal_sys::OSRExportToPCI(self.0, &mut c_proj, &mut c_units, &mut c_params)
        };
        let proj = unsafe { _string_and_free(c_proj) };
        let units = unsafe { _string_and_free(c_units) };
        let params = unsafe { Self::take_params::<PCI_PARAM_COUNT>(c_params) };
        _ogr_result(rv, "OSRExportToPCI")?;
        Ok(PciDefinition {
            proj: proj.unwrap_or_default(),
            units: units.unwrap_or_default(),
            params,
        })
    }

    pub fn to_usgs(&self) -> Result<UsgsDefinition> {
        let mut proj_sys: c_long = 0;
        let mut zone: c_long = 0;
        let mut datum: c_long = 0;
        let mut c_params: *mut f64 = ptr::null_mut();
        let rv = unsafe {
            gdal_sys::OSRExportToUSGS(self.0, &mut proj_sys, &mut zone, &mut c_params, &mut datum)
        };
        let params = unsafe { Self::take_params::<USGS_PARAM_COUNT>(c_params) };
        _ogr_result(rv, "OSRExportToUSGS")?;
        Ok(UsgsDefinition {
            proj_sys: proj_sys as i64,
            zone: zone as i64,
            params,
            datum: datum as i64,
        })
    }

    /// Copies `N` doubles out of a `CPLMalloc`ed array and frees it.
    unsafe fn take_params<const N: usize>(c_params: *mut f64) -> [f64; N] {
        let mut params = [0.0; N];
        if !c_params.is_null() {
            params.copy_from_slice(std::slice::from_raw_parts(c_params, N));
            gdal_sys::VSIFree(c_params as *mut libc::c_void);
        }
        params
    }

    pub fn to_erm(&self) -> Result<ErmDefinition> {
        // OSR writes at most 32 characters (terminator included) into each buffer.
        let mut proj = [0 as c_char; 64];
        let mut datum = [0 as c_char; 64];
        let mut units = [0 as c_char; 64];
        let rv = unsafe {
            gdal_sys::OSRExportToERM(
                self.0,
                proj.as_mut_ptr(),
                datum.as_mut_ptr(),
                units.as_mut_ptr(),
            )
        };
        _ogr_result(rv, "OSRExportToERM")?;
        Ok(ErmDefinition {
            proj: _string(proj.as_ptr()).unwrap_or_default(),
            datum: _string(datum.as_ptr()).unwrap_or_default(),
            units: _string(units.as_ptr()).unwrap_or_default(),
        })
    }

    pub fn morph_to_esri(&mut self) -> Result<()> {
        let rv = unsafe { gdal_sys::OSRMorphToESRI(self.0) };
        _ogr_result(rv, "OSRMorphToESRI")
    }

    pub fn morph_from_esri(&mut self) -> Result<()> {
        let rv = unsafe { gdal_sys::OSRMorphFromESRI(self.0) };
        _ogr_result(rv, "OSRMorphFromESRI")
    }

    /// Checks the definition for structural and semantic problems.
    pub fn validate(&self) -> Result<()> {
        let rv = unsafe { gdal_sys::OSRValidate(self.0) };
        _ogr_result(rv, "OSRValidate")
    }

    /// Increments the reference count, returning the new count.
    ///
    /// Every call must be balanced by [`SpatialRef::dereference`] before the value is dropped.
    pub fn reference(&self) -> i32 {
        unsafe { gdal_sys::OSRReference(self.0) }
    }

    /// Decrements the reference count, returning the new count.
    pub fn dereference(&self) -> i32 {
        unsafe { gdal_sys::OSRDereference(self.0) }
    }

    /// Drops this handle's reference, destroying the definition when no other holder remains.
    pub fn release(self) {
        drop(self)
    }

    /// Returns a new spatial reference holding only the geographic part of this one.
    pub fn clone_geog_cs(&self) -> Result<SpatialRef> {
        let c_obj = unsafe { gdal_sys::OSRCloneGeogCS(self.0) };
        if c_obj.is_null() {
            return Err(_last_null_pointer_err("OSRCloneGeogCS"));
        }
        Ok(SpatialRef(c_obj))
    }

    /// Fetches the value of the `child`th child of the node at path `key`, e.g. `("PROJCS", 0)`.
    pub fn attr_value(&self, key: &str, child: usize) -> Result<Option<String>> {
        let c_key = CString::new(key)?;
        let c_ptr = unsafe { gdal_sys::OSRGetAttrValue(self.0, c_key.as_ptr(), child as c_int) };
        Ok(_string(c_ptr))
    }

    /// Sets the value of the node at `path`, creating missing nodes.
    pub fn set_attr_value(&mut self, path: &str, value: Option<&str>) -> Result<()> {
        let c_path = CString::new(path)?;
        let c_value = value.map(CString::new).transpose()?;
        let rv =
            unsafe { gdal_sys::OSRSetAttrValue(self.0, c_path.as_ptr(), _opt_ptr(&c_value)) };
        _ogr_result(rv, "OSRSetAttrValue")
    }

    /// Name of the coordinate system, e.g. `"WGS 84"`.
    #[cfg(major_ge_3)]
    pub fn name(&self) -> Option<String> {
        _string(unsafe { gdal_sys::OSRGetName(self.0) })
    }

    /// Authority name of the node at `target` (the root when `None`), e.g. `"EPSG"`.
    pub fn authority_name(&self, target: Option<&str>) -> Result<Option<String>> {
        let c_target = _c_target(target)?;
        let c_ptr = unsafe { gdal_sys::OSRGetAuthorityName(self.0, _opt_ptr(&c_target)) };
        Ok(_string(c_ptr))
    }

    /// Authority code of the node at `target` (the root when `None`), e.g. `"4326"`.
    pub fn authority_code(&self, target: Option<&str>) -> Result<Option<String>> {
        let c_target = _c_target(target)?;
        let c_ptr = unsafe { gdal_sys::OSRGetAuthorityCode(self.0, _opt_ptr(&c_target)) };
        Ok(_string(c_ptr))
    }

    /// Numeric authority code of the root node.
    pub fn auth_code(&self) -> Result<i32> {
        let code = self
            .authority_code(None)?
            .ok_or_else(|| _last_null_pointer_err("OSRGetAuthorityCode"))?;
        code.parse::<i32>().map_err(|_| {
            GdalError::BadArgument(format!("authority code '{code}' is not an integer"))
        })
    }

    /// The root authority as `NAME:CODE`, e.g. `EPSG:4326`.
    pub fn authority(&self) -> Result<String> {
        let name = self
            .authority_name(None)?
            .ok_or_else(|| _last_null_pointer_err("OSRGetAuthorityName"))?;
        let code = self
            .authority_code(None)?
            .ok_or_else(|| _last_null_pointer_err("OSRGetAuthorityCode"))?;
        Ok(format!("{name}:{code}"))
    }

    pub fn set_authority(&mut self, target: &str, authority: &str, code: i32) -> Result<()> {
        let c_target = CString::new(target)?;
        let c_authority = CString::new(authority)?;
        let rv = unsafe {
            gdal_sys::OSRSetAuthority(
                self.0,
                c_target.as_ptr(),
                c_authority.as_ptr(),
                code as c_int,
            )
        };
        _ogr_result(rv, "OSRSetAuthority")
    }

    /// Sets EPSG authority codes on the root and geographic nodes when they can be recognized.
    pub fn auto_identify_epsg(&mut self) -> Result<()> {
        let rv = unsafe { gdal_sys::OSRAutoIdentifyEPSG(self.0) };
        _ogr_result(rv, "OSRAutoIdentifyEPSG")
    }

    /// Whether EPSG says this system uses latitude/longitude axis order.
    pub fn epsg_treats_as_lat_long(&self) -> bool {
        unsafe { gdal_sys::OSREPSGTreatsAsLatLong(self.0) != 0 }
    }

    pub fn set_angular_units(&mut self, name: &str, in_radians: f64) -> Result<()> {
        let c_name = CString::new(name)?;
        let rv = unsafe { gdal_sys::OSRSetAngularUnits(self.0, c_name.as_ptr(), in_radians) };
        _ogr_result(rv, "OSRSetAngularUnits")
    }

    /// Fetch the name of the angular units, e.g. `"degree"`.
    pub fn angular_units_name(&self) -> Result<String> {
        let mut c_ptr = ptr::null_mut();
        // The name stays owned by the spatial reference.
        unsafe { gdal_sys::OSRGetAngularUnits(self.0, &mut c_ptr) };
        _string(c_ptr).ok_or_else(|| _last_null_pointer_err("OSRGetAngularUnits"))
    }

    /// Fetch the conversion factor from angular units to radians.
    pub fn angular_units(&self) -> f64 {
        unsafe { gdal_sys::OSRGetAngularUnits(self.0, ptr::null_mut()) }
    }

    pub fn set_linear_units(&mut self, name: &str, to_meters: f64) -> Result<()> {
        let c_name = CString::new(name)?;
        let rv = unsafe { gdal_sys::OSRSetLinearUnits(self.0, c_name.as_ptr(), to_meters) };
        _ogr_result(rv, "OSRSetLinearUnits")
    }

    /// Sets the linear units of the node at `target` (the root when `None`).
    pub fn set_target_linear_units(
        &mut self,
        target: Option<&str>,
        name: &str,
        to_meters: f64,
    ) -> Result<()> {
        let c_target = _c_target(target)?;
        let c_name = CString::new(name)?;
        let rv = unsafe {
            gdal_sys::OSRSetTargetLinearUnits(
                self.0,
                _opt_ptr(&c_target),
                c_name.as_ptr(),
                to_meters,
            )
        };
        _ogr_result(rv, "OSRSetTargetLinearUnits")
    }

    /// Sets the linear units and rescales the linear projection parameters accordingly.
    pub fn set_linear_units_and_update_parameters(
        &mut self,
        name: &str,
        to_meters: f64,
    ) -> Result<()> {
        let c_name = CString::new(name)?;
        let rv = unsafe {
            gdal_sys::OSRSetLinearUnitsAndUpdateParameters(self.0, c_name.as_ptr(), to_meters)
        };
        _ogr_result(rv, "OSRSetLinearUnitsAndUpdateParameters")
    }

    /// Fetch the name of the linear units, e.g. `"metre"`.
    pub fn linear_units_name(&self) -> Result<String> {
        let mut c_ptr = ptr::null_mut();
        unsafe { gdal_sys::OSRGetLinearUnits(self.0, &mut c_ptr) };
        _string(c_ptr).ok_or_else(|| _last_null_pointer_err("OSRGetLinearUnits"))
    }

    /// Fetch the conversion factor from linear units to meters.
    pub fn linear_units(&self) -> f64 {
        unsafe { gdal_sys::OSRGetLinearUnits(self.0, ptr::null_mut()) }
    }

    /// Linear units name and factor of the node at `target` (the root when `None`).
    pub fn target_linear_units(&self, target: Option<&str>) -> Result<(String, f64)> {
        let c_target = _c_target(target)?;
        let mut c_ptr = ptr::null_mut();
        let factor = unsafe {
            gdal_sys::OSRGetTargetLinearUnits(self.0, _opt_ptr(&c_target), &mut c_ptr)
        };
        Ok((_string(c_ptr).unwrap_or_default(), factor))
    }

    /// Name and longitude offset (in degrees) of the prime meridian.
    pub fn prime_meridian(&self) -> (String, f64) {
        let mut c_ptr = ptr::null_mut();
        let offset = unsafe { gdal_sys::OSRGetPrimeMeridian(self.0, &mut c_ptr) };
        (_string(c_ptr).unwrap_or_default(), offset)
    }

    pub fn semi_major(&self) -> Result<f64> {
        let mut err_code = OGRErr::OGRERR_NONE;
        let a = unsafe { gdal_sys::OSRGetSemiMajor(self.0, &mut err_code) };
        _ogr_result(err_code, "OSRGetSemiMajor")?;
        Ok(a)
    }

    pub fn semi_minor(&self) -> Result<f64> {
        let mut err_code = OGRErr::OGRERR_NONE;
        let b = unsafe { gdal_sys::OSRGetSemiMinor(self.0, &mut err_code) };
        _ogr_result(err_code, "OSRGetSemiMinor")?;
        Ok(b)
    }

    pub fn inverse_flattening(&self) -> Result<f64> {
        let mut err_code = OGRErr::OGRERR_NONE;
        let inv_f = unsafe { gdal_sys::OSRGetInvFlattening(self.0, &mut err_code) };
        _ogr_result(err_code, "OSRGetInvFlattening")?;
        Ok(inv_f)
    }

    /// Sets the Bursa-Wolf parameters: translations (m), rotations (arc seconds), scale (ppm).
    #[allow(clippy::too_many_arguments)]
    pub fn set_towgs84(
        &mut self,
        dx: f64,
        dy: f64,
        dz: f64,
        ex: f64,
        ey: f64,
        ez: f64,
        ppm: f64,
    ) -> Result<()> {
        let rv = unsafe { gdal_sys::OSRSetTOWGS84(self.0, dx, dy, dz, ex, ey, ez, ppm) };
        _ogr_result(rv, "OSRSetTOWGS84")
    }

    pub fn towgs84(&self) -> Result<[f64; 7]> {
        let mut coeffs = [0.0; 7];
        let rv = unsafe { gdal_sys::OSRGetTOWGS84(self.0, coeffs.as_mut_ptr(), 7) };
        _ogr_result(rv, "OSRGetTOWGS84")?;
        Ok(coeffs)
    }

    pub fn set_local_cs(&mut self, name: &str) -> Result<()> {
        let c_name = CString::new(name)?;
        let rv = unsafe { gdal_sys::OSRSetLocalCS(self.0, c_name.as_ptr()) };
        _ogr_result(rv, "OSRSetLocalCS")
    }

    pub fn set_projected_cs(&mut self, name: &str) -> Result<()> {
        let c_name = CString::new(name)?;
        let rv = unsafe { gdal_sys::OSRSetProjCS(self.0, c_name.as_ptr()) };
        _ogr_result(rv, "OSRSetProjCS")
    }

    pub fn set_geocentric_cs(&mut self, name: &str) -> Result<()> {
        let c_name = CString::new(name)?;
        let rv = unsafe { gdal_sys::OSRSetGeocCS(self.0, c_name.as_ptr()) };
        _ogr_result(rv, "OSRSetGeocCS")
    }

    /// Sets a geographic system by well known name: `WGS84`, `WGS72`, `NAD27`, `NAD83`, `EPSG:n`.
    pub fn set_well_known_geographic_cs(&mut self, name: &str) -> Result<()> {
        let c_name = CString::new(name)?;
        let rv = unsafe { gdal_sys::OSRSetWellKnownGeogCS(self.0, c_name.as_ptr()) };
        _ogr_result(rv, "OSRSetWellKnownGeogCS")
    }

    pub fn copy_geographic_cs_from(&mut self, other: &SpatialRef) -> Result<()> {
        let rv = unsafe { gdal_sys::OSRCopyGeogCSFrom(self.0, other.0) };
        _ogr_result(rv, "OSRCopyGeogCSFrom")
    }

    pub fn set_compound_cs(
        &mut self,
        name: &str,
        horizontal: &SpatialRef,
        vertical: &SpatialRef,
    ) -> Result<()> {
        let c_name = CString::new(name)?;
        let rv = unsafe {
            gdal_sys::OSRSetCompoundCS(self.0, c_name.as_ptr(), horizontal.0, vertical.0)
        };
        _ogr_result(rv, "OSRSetCompoundCS")
    }

    pub fn set_geographic_cs(&mut self, params: &GeographicCsParams) -> Result<()> {
        let c_geog_name = CString::new(params.geog_name)?;
        let c_datum_name = CString::new(params.datum_name)?;
        let c_spheroid_name = CString::new(params.spheroid_name)?;
        let c_pm_name = CString::new(params.pm_name)?;
        let c_angular_units = CString::new(params.angular_units)?;
        let rv = unsafe {
            gdal_sys::OSRSetGeogCS(
                self.0,
                c_geog_name.as_ptr(),
                c_datum_name.as_ptr(),
                c_spheroid_name.as_ptr(),
                params.semi_major,
                params.inv_flattening,
                c_pm_name.as_ptr(),
                params.pm_offset,
                c_angular_units.as_ptr(),
                params.convert_to_radians,
            )
        };
        _ogr_result(rv, "OSRSetGeogCS")
    }

    pub fn set_vertical_cs(&mut self, cs_name: &str, datum_name: &str, datum_type: i32) -> Result<()> {
        let c_cs_name = CString::new(cs_name)?;
        let c_datum_name = CString::new(datum_name)?;
        let rv = unsafe {
            gdal_sys::OSRSetVertCS(
                self.0,
                c_cs_name.as_ptr(),
                c_datum_name.as_ptr(),
                datum_type as c_int,
            )
        };
        _ogr_result(rv, "OSRSetVertCS")
    }

    pub fn set_projection(&mut self, name: &str) -> Result<()> {
        let c_name = CString::new(name)?;
        let rv = unsafe { gdal_sys::OSRSetProjection(self.0, c_name.as_ptr()) };
        _ogr_result(rv, "OSRSetProjection")
    }

    pub fn set_proj_parm(&mut self, name: &str, value: f64) -> Result<()> {
        let c_name = CString::new(name)?;
        let rv = unsafe { gdal_sys::OSRSetProjParm(self.0, c_name.as_ptr(), value) };
        _ogr_result(rv, "OSRSetProjParm")
    }

    /// Fetch a projection parameter in the units of the definition, or `default` when absent.
    pub fn proj_parm(&self, name: &str, default: f64) -> Result<f64> {
        let c_name = CString::new(name)?;
        let mut err_code = OGRErr::OGRERR_NONE;
        let value = unsafe {
            gdal_sys::OSRGetProjParm(self.0, c_name.as_ptr(), default, &mut err_code)
        };
        _ogr_result(err_code, "OSRGetProjParm")?;
        Ok(value)
    }

    /// Sets a projection parameter given in degrees or meters.
    pub fn set_normalized_proj_parm(&mut self, name: &str, value: f64) -> Result<()> {
        let c_name = CString::new(name)?;
        let rv = unsafe { gdal_sys::OSRSetNormProjParm(self.0, c_name.as_ptr(), value) };
        _ogr_result(rv, "OSRSetNormProjParm")
    }

    /// Fetch a projection parameter converted to degrees or meters, or `default` when absent.
    pub fn normalized_proj_parm(&self, name: &str, default: f64) -> Result<f64> {
        let c_name = CString::new(name)?;
        let mut err_code = OGRErr::OGRERR_NONE;
        let value = unsafe {
            gdal_sys::OSRGetNormProjParm(self.0, c_name.as_ptr(), default, &mut err_code)
        };
        _ogr_result(err_code, "OSRGetNormProjParm")?;
        Ok(value)
    }

    pub fn set_utm(&mut self, zone: i32, north: bool) -> Result<()> {
        let rv = unsafe { gdal_sys::OSRSetUTM(self.0, zone as c_int, north as c_int) };
        _ogr_result(rv, "OSRSetUTM")
    }

    /// UTM zone and hemisphere (`true` for north), or `None` if this is not a UTM projection.
    pub fn utm_zone(&self) -> Option<(i32, bool)> {
        let mut north: c_int = 0;
        let zone = unsafe { gdal_sys::OSRGetUTMZone(self.0, &mut north) };
        if zone == 0 {
            None
        } else {
            Some((zone, north != 0))
        }
    }

    pub fn set_state_plane(&mut self, zone: i32, nad83: bool) -> Result<()> {
        let rv = unsafe { gdal_sys::OSRSetStatePlane(self.0, zone as c_int, nad83 as c_int) };
        _ogr_result(rv, "OSRSetStatePlane")
    }

    pub fn set_state_plane_with_units(
        &mut self,
        zone: i32,
        nad83: bool,
        unit_name: &str,
        factor: f64,
    ) -> Result<()> {
        let c_unit_name = CString::new(unit_name)?;
        let rv = unsafe {
            gdal_sys::OSRSetStatePlaneWithUnits(
                self.0,
                zone as c_int,
                nad83 as c_int,
                c_unit_name.as_ptr(),
                factor,
            )
        };
        _ogr_result(rv, "OSRSetStatePlaneWithUnits")
    }

    projection_setters! {
        /// Albers Conic Equal Area
        set_acea => OSRSetACEA(std_p1, std_p2, center_lat, center_long, false_easting, false_northing);
        /// Azimuthal Equidistant
        set_ae => OSRSetAE(center_lat, center_long, false_easting, false_northing);
        set_bonne => OSRSetBonne(std_p1, central_meridian, false_easting, false_northing);
        /// Cylindrical Equal Area
        set_cea => OSRSetCEA(std_p1, central_meridian, false_easting, false_northing);
        /// Cassini-Soldner
        set_cs => OSRSetCS(center_lat, center_long, false_easting, false_northing);
        /// Equidistant Conic
        set_ec => OSRSetEC(std_p1, std_p2, center_lat, center_long, false_easting, false_northing);
        set_equirectangular => OSRSetEquirectangular(center_lat, center_long, false_easting, false_northing);
        /// Equirectangular with a pseudo standard parallel.
        set_equirectangular2 => OSRSetEquirectangular2(center_lat, center_long, pseudo_std_parallel_lat, false_easting, false_northing);
        /// Gall Stereographic
        set_gs => OSRSetGS(central_meridian, false_easting, false_northing);
        /// Goode Homolosine
        set_gh => OSRSetGH(central_meridian, false_easting, false_northing);
        /// Geostationary Satellite
        set_geos => OSRSetGEOS(central_meridian, satellite_height, false_easting, false_northing);
        /// Gauss-Schreiber Transverse Mercator
        set_gauss_schreiber_tmercator => OSRSetGaussSchreiberTMercator(center_lat, center_long, scale, false_easting, false_northing);
        set_gnomonic => OSRSetGnomonic(center_lat, center_long, false_easting, false_northing);
        /// Hotine Oblique Mercator, azimuth and rectified grid angle form.
        set_hom => OSRSetHOM(center_lat, center_long, azimuth, rect_to_skew, scale, false_easting, false_northing);
        /// Hotine Oblique Mercator, two point natural origin form.
        set_hom_2pno => OSRSetHOM2PNO(center_lat, lat1, long1, lat2, long2, scale, false_easting, false_northing);
        /// International Map of the World Polyconic
        set_iwm_polyconic => OSRSetIWMPolyconic(lat1, lat2, center_long, false_easting, false_northing);
        set_krovak => OSRSetKrovak(center_lat, center_long, azimuth, pseudo_std_parallel_lat, scale, false_easting, false_northing);
        /// Lambert Azimuthal Equal-Area
        set_laea => OSRSetLAEA(center_lat, center_long, false_easting, false_northing);
        /// Lambert Conformal Conic, two standard parallels.
        set_lcc => OSRSetLCC(std_p1, std_p2, center_lat, center_long, false_easting, false_northing);
        /// Lambert Conformal Conic, one standard parallel.
        set_lcc_1sp => OSRSetLCC1SP(center_lat, center_long, scale, false_easting, false_northing);
        /// Lambert Conformal Conic, Belgium 1972.
        set_lccb => OSRSetLCCB(std_p1, std_p2, center_lat, center_long, false_easting, false_northing);
        /// Miller Cylindrical
        set_mc => OSRSetMC(center_lat, center_long, false_easting, false_northing);
        set_mercator => OSRSetMercator(center_lat, center_long, scale, false_easting, false_northing);
        set_mollweide => OSRSetMollweide(central_meridian, false_easting, false_northing);
        /// New Zealand Map Grid
        set_nzmg => OSRSetNZMG(center_lat, center_long, false_easting, false_northing);
        /// Oblique Stereographic
        set_os => OSRSetOS(origin_lat, central_meridian, scale, false_easting, false_northing);
        set_orthographic => OSRSetOrthographic(center_lat, center_long, false_easting, false_northing);
        set_polyconic => OSRSetPolyconic(center_lat, center_long, false_easting, false_northing);
        /// Polar Stereographic
        set_ps => OSRSetPS(center_lat, center_long, scale, false_easting, false_northing);
        set_robinson => OSRSetRobinson(center_long, false_easting, false_northing);
        set_sinusoidal => OSRSetSinusoidal(center_long, false_easting, false_northing);
        set_stereographic => OSRSetStereographic(center_lat, center_long, scale, false_easting, false_northing);
        /// Swiss Oblique Cylindrical
        set_soc => OSRSetSOC(latitude_of_origin, central_meridian, false_easting, false_northing);
        /// Transverse Mercator
        set_tm => OSRSetTM(center_lat, center_long, scale, false_easting, false_northing);
        /// Tunesia Mining Grid
        set_tmg => OSRSetTMG(center_lat, center_long, false_easting, false_northing);
        /// Transverse Mercator, South Oriented
        set_tmso => OSRSetTMSO(center_lat, center_long, scale, false_easting, false_northing);
        /// Van Der Grinten
        set_vdg => OSRSetVDG(central_meridian, false_easting, false_northing);
    }

    /// Eckert I to VI, `variation` being the roman numeral as a number.
    pub fn set_eckert(
        &mut self,
        variation: i32,
        central_meridian: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Result<()> {
        let rv = unsafe {
            gdal_sys::OSRSetEckert(
                self.0,
                variation as c_int,
                central_meridian,
                false_easting,
                false_northing,
            )
        };
        _ogr_result(rv, "OSRSetEckert")
    }

    /// Interrupted Goode Homolosine
    pub fn set_igh(&mut self) -> Result<()> {
        let rv = unsafe { gdal_sys::OSRSetIGH(self.0) };
        _ogr_result(rv, "OSRSetIGH")
    }

    /// Transverse Mercator variant selected by name, e.g. `"Transverse_Mercator_South_Orientated"`.
    pub fn set_tm_variant(
        &mut self,
        variant_name: &str,
        center_lat: f64,
        center_long: f64,
        scale: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Result<()> {
        let c_variant_name = CString::new(variant_name)?;
        let rv = unsafe {
            gdal_sys::OSRSetTMVariant(
                self.0,
                c_variant_name.as_ptr(),
                center_lat,
                center_long,
                scale,
                false_easting,
                false_northing,
            )
        };
        _ogr_result(rv, "OSRSetTMVariant")
    }

    pub fn is_geographic(&self) -> bool {
        unsafe { gdal_sys::OSRIsGeographic(self.0) == 1 }
    }

    pub fn is_local(&self) -> bool {
        unsafe { gdal_sys::OSRIsLocal(self.0) == 1 }
    }

    pub fn is_projected(&self) -> bool {
        unsafe { gdal_sys::OSRIsProjected(self.0) == 1 }
    }

    pub fn is_compound(&self) -> bool {
        unsafe { gdal_sys::OSRIsCompound(self.0) == 1 }
    }

    pub fn is_geocentric(&self) -> bool {
        unsafe { gdal_sys::OSRIsGeocentric(self.0) == 1 }
    }

    pub fn is_vertical(&self) -> bool {
        unsafe { gdal_sys::OSRIsVertical(self.0) == 1 }
    }

    /// Whether both definitions describe the same coordinate system.
    pub fn is_same(&self, other: &SpatialRef) -> bool {
        unsafe { gdal_sys::OSRIsSame(self.0, other.0) == 1 }
    }

    pub fn is_same_geog_cs(&self, other: &SpatialRef) -> bool {
        unsafe { gdal_sys::OSRIsSameGeogCS(self.0, other.0) == 1 }
    }

    pub fn is_same_vert_cs(&self, other: &SpatialRef) -> bool {
        unsafe { gdal_sys::OSRIsSameVertCS(self.0, other.0) == 1 }
    }

    /// Orientation of axis `axis` (0-based) of the node at `target_key`, e.g. `"GEOGCS"`.
    pub fn axis_orientation(
        &self,
        target_key: &str,
        axis: i32,
    ) -> Result<AxisOrientationType> {
        let c_target_key = CString::new(target_key)?;
        let mut orientation = OGRAxisOrientation::OAO_Other;
        let c_ptr = unsafe {
            gdal_sys::OSRGetAxis(self.0, c_target_key.as_ptr(), axis as c_int, &mut orientation)
        };
        // null ptr indicates a failure (but no CPLError) see Gdal documentation.
        if c_ptr.is_null() {
            Err(GdalError::BadArgument(format!(
                "no axis {axis} on node '{target_key}'"
            )))
        } else {
            Ok(orientation)
        }
    }

    pub fn axis_name(&self, target_key: &str, axis: i32) -> Result<String> {
        let c_target_key = CString::new(target_key)?;
        let c_ptr = unsafe {
            gdal_sys::OSRGetAxis(
                self.0,
                c_target_key.as_ptr(),
                axis as c_int,
                ptr::null_mut(),
            )
        };
        _string(c_ptr).ok_or_else(|| {
            GdalError::BadArgument(format!("no axis {axis} on node '{target_key}'"))
        })
    }

    #[cfg(major_ge_3)]
    pub fn axis_mapping_strategy(&self) -> AxisMappingStrategy {
        unsafe { gdal_sys::OSRGetAxisMappingStrategy(self.0) }
    }

    /// Select how coordinates passed to transformations map onto the axes of this system.
    ///
    /// `OAMS_TRADITIONAL_GIS_ORDER` always puts longitude/easting first.
    #[cfg(major_ge_3)]
    pub fn set_axis_mapping_strategy(&mut self, strategy: AxisMappingStrategy) {
        unsafe {
            gdal_sys::OSRSetAxisMappingStrategy(self.0, strategy);
        }
    }
}

/// Releases the resources cached by the OSR subsystem (EPSG lookups, PROJ contexts).
///
/// # Safety
/// No other thread may be using spatial references or coordinate transformations while this runs.
pub unsafe fn cleanup() {
    gdal_sys::OSRCleanup();
}

pub type AxisOrientationType = OGRAxisOrientation::Type;
pub type AxisMappingStrategy = OSRAxisMappingStrategy::Type;
