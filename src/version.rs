//! GDAL Version Inspection Utilities
//!
//! ```rust, no_run
//! use osgeo::version::VersionInfo;
//! println!("{}", VersionInfo::VERSION_SUMMARY);
//! ```
//! ```text,
//! GDAL 3.8.4, released 2024/02/08
//! ```

use crate::utils::_string;
use std::collections::BTreeMap;
use std::ffi::CString;
use std::fmt::{Display, Formatter};

/// Calls `GDALVersionInfo`, expecting `key` as one of the following values:
///
/// “VERSION_NUM”, “RELEASE_DATE”, “RELEASE_NAME”, "-–version”, “LICENSE”, “BUILD_INFO”.
///
/// Unknown keys (or keys with an interior NUL) yield an empty string.
pub fn version_info(key: &str) -> String {
    let Ok(c_key) = CString::new(key.as_bytes()) else {
        return String::new();
    };
    _string(unsafe { gdal_sys::GDALVersionInfo(c_key.as_ptr()) }).unwrap_or_default()
}

/// The runtime GDAL version encoded like `GDAL_VERSION_NUM`, e.g. `3080400` for 3.8.4.
pub fn version_num() -> i32 {
    VersionInfo::VERSION_NUM.to_string().trim().parse().unwrap_or(0)
}

/// Whether the runtime library is at least `major.minor`.
pub fn is_at_least(major: i32, minor: i32) -> bool {
    version_num() >= major * 1_000_000 + minor * 10_000
}

/// Build time options as reported by `BUILD_INFO`, e.g. `PROJ_RUNTIME_VERSION`.
pub fn build_info() -> BTreeMap<String, String> {
    VersionInfo::BUILD_INFO
        .to_string()
        .lines()
        .filter_map(|l| l.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Convenience selector for the properties of GDAL version information that may be queried.
#[allow(non_camel_case_types)]
#[non_exhaustive]
#[derive(Copy, Clone, Debug, Default)]
pub enum VersionInfo {
    /// One line version message, i.e. “GDAL 1.1.7, released 2002/04/16”
    #[default]
    VERSION_SUMMARY,
    /// GDAL_VERSION_NUM formatted as a string. i.e. “1170”
    VERSION_NUM,
    /// GDAL_RELEASE_DATE formatted as a string. i.e. “20020416"
    RELEASE_DATE,
    /// GDAL_RELEASE_NAME. ie. “1.1.7”
    RELEASE_NAME,
    /// List of NAME=VALUE pairs separated by newlines with information on build time options.
    BUILD_INFO,
}

impl VersionInfo {
    fn gdal_key(&self) -> &'static str {
        match self {
            VersionInfo::VERSION_SUMMARY => "--version",
            VersionInfo::VERSION_NUM => "VERSION_NUM",
            VersionInfo::RELEASE_DATE => "RELEASE_DATE",
            VersionInfo::RELEASE_NAME => "RELEASE_NAME",
            VersionInfo::BUILD_INFO => "BUILD_INFO",
        }
    }
}

impl Display for VersionInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&version_info(self.gdal_key()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        let release_date = version_info("RELEASE_DATE");
        let release_name = version_info("RELEASE_NAME");
        let version_text = VersionInfo::VERSION_SUMMARY.to_string();

        let mut date_iter = release_date.chars();

        let expected_text: String = format!(
            "GDAL {}, released {}/{}/{}",
            release_name,
            date_iter.by_ref().take(4).collect::<String>(),
            date_iter.by_ref().take(2).collect::<String>(),
            date_iter.by_ref().take(2).collect::<String>(),
        );

        assert_eq!(version_text, expected_text);
    }

    #[test]
    fn test_version_num() {
        assert!(version_num() >= 2_000_000);
        assert!(is_at_least(2, 0));
        assert!(!is_at_least(99, 0));
    }
}
