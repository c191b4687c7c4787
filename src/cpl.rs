//! GDAL Common Portability Library Functions
//!
//! This module provides safe access to the [GDAL CPL string list functions](https://gdal.org/api/cpl.html),
//! which every utility in [`crate::programs`] uses to receive its command-line style arguments.
//!

use std::ffi::CString;
use std::fmt::{Debug, Formatter};
use std::ptr;
use std::str::FromStr;

use gdal_sys::{
    CSLAddString, CSLCount, CSLDestroy, CSLDuplicate, CSLFetchNameValue, CSLFindString,
    CSLInsertString, CSLSetNameValue,
};
use libc::{c_char, c_int};

use crate::errors::{GdalError, Result};
use crate::utils::_string;

/// Wraps a [`gdal_sys::CSLConstList`]  (a.k.a. `char **papszStrList`). This data structure
/// (a null-terminated array of null-terminated strings) is used throughout GDAL to pass
/// both `KEY=VALUE`-formatted options and plain argument vectors to various functions.
///
/// See the [`CSL*` GDAL functions](https://gdal.org/api/cpl.html#cpl-string-h) for more details.
pub struct CslStringList {
    list_ptr: *mut *mut c_char,
}

impl CslStringList {
    /// Creates an empty GDAL string list.
    pub fn new() -> Self {
        Self {
            list_ptr: ptr::null_mut(),
        }
    }

    /// Assigns `value` to `name`.
    ///
    /// Overwrites duplicate `name`s.
    ///
    /// Returns `Ok<()>` on success, `Err<GdalError>` if `name` has non alphanumeric
    /// characters, or `value` has newline characters.
    pub fn set_name_value(&mut self, name: &str, value: &str) -> Result<()> {
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(GdalError::BadArgument(format!(
                "Invalid characters in name: '{name}'"
            )));
        }
        if value.contains(['\n', '\r']) {
            return Err(GdalError::BadArgument(format!(
                "Invalid characters in value: '{value}'"
            )));
        }
        let psz_name = CString::new(name)?;
        let psz_value = CString::new(value)?;

        unsafe {
            self.list_ptr = CSLSetNameValue(self.list_ptr, psz_name.as_ptr(), psz_value.as_ptr());
        }

        Ok(())
    }

    /// Appends `value` to the end of the list.
    ///
    /// The string is copied, so the caller keeps ownership of `value`.
    pub fn add_string(&mut self, value: &str) -> Result<()> {
        let v = CString::new(value)?;
        self.list_ptr = unsafe { CSLAddString(self.list_ptr, v.as_ptr()) };
        Ok(())
    }

    /// Inserts `value` before the entry at `index`.
    ///
    /// An `index` past the end of the list appends.
    pub fn insert_string(&mut self, index: usize, value: &str) -> Result<()> {
        let v = CString::new(value)?;
        let index = index.min(self.len()) as c_int;
        self.list_ptr = unsafe { CSLInsertString(self.list_ptr, index, v.as_ptr()) };
        Ok(())
    }

    /// Looks up the value corresponding to `key`.
    ///
    /// See [`CSLFetchNameValue`](https://gdal.org/doxygen/cpl__string_8h.html#a4f23675f8b6f015ed23d9928048361a1)
    /// for details.
    pub fn fetch_name_value(&self, key: &str) -> Result<Option<String>> {
        let key = CString::new(key)?;
        let c_value = unsafe { CSLFetchNameValue(self.as_ptr(), key.as_ptr()) };
        Ok(_string(c_value))
    }

    /// Position of the first entry equal to `target`, compared case-insensitively like
    /// GDAL's own argument parsers do.
    pub fn find_string(&self, target: &str) -> Option<usize> {
        let target = CString::new(target).ok()?;
        let idx = unsafe { CSLFindString(self.as_ptr(), target.as_ptr()) };
        if idx < 0 {
            None
        } else {
            Some(idx as usize)
        }
    }

    /// Determine whether any entry equals `target` (case-insensitive).
    pub fn contains(&self, target: &str) -> bool {
        self.find_string(target).is_some()
    }

    /// Appends every entry of `other` to this list.
    pub fn extend(&mut self, other: &CslStringList) -> Result<()> {
        for value in other.values() {
            self.add_string(&value)?;
        }
        Ok(())
    }

    /// Determine the number of entries in the list.
    pub fn len(&self) -> usize {
        (unsafe { CSLCount(self.as_ptr()) }) as usize
    }

    /// Determine if the list has any values
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get an iterator over the raw entries of the list.
    pub fn iter(&self) -> CslStringListIterator<'_> {
        CslStringListIterator::new(self)
    }

    fn values(&self) -> Vec<String> {
        self.iter().collect()
    }

    /// Get the raw pointer to the underlying data.
    pub fn as_ptr(&self) -> gdal_sys::CSLConstList {
        self.list_ptr
    }
}

impl Drop for CslStringList {
    fn drop(&mut self) {
        unsafe { CSLDestroy(self.list_ptr) }
    }
}

impl Default for CslStringList {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CslStringList {
    fn clone(&self) -> Self {
        let list_ptr = unsafe { CSLDuplicate(self.list_ptr) };
        Self { list_ptr }
    }
}

/// State for iterator over [`CslStringList`] entries.
pub struct CslStringListIterator<'a> {
    list: &'a CslStringList,
    idx: usize,
    count: usize,
}

impl<'a> CslStringListIterator<'a> {
    fn new(list: &'a CslStringList) -> Self {
        Self {
            list,
            idx: 0,
            count: list.len(),
        }
    }
}

impl Iterator for CslStringListIterator<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.count {
            return None;
        }

        let field = unsafe { *self.list.list_ptr.add(self.idx) };
        self.idx += 1;
        _string(field)
    }
}

impl Debug for CslStringList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl TryFrom<&[&str]> for CslStringList {
    type Error = GdalError;

    fn try_from(values: &[&str]) -> Result<Self> {
        let mut result = Self::new();
        for value in values {
            result.add_string(value)?;
        }
        Ok(result)
    }
}

impl TryFrom<Vec<&str>> for CslStringList {
    type Error = GdalError;

    fn try_from(values: Vec<&str>) -> Result<Self> {
        Self::try_from(values.as_slice())
    }
}

impl<const N: usize> TryFrom<[&str; N]> for CslStringList {
    type Error = GdalError;

    fn try_from(values: [&str; N]) -> Result<Self> {
        Self::try_from(values.as_slice())
    }
}

/// Parses a whitespace separated argument line, e.g. `"-of GTiff -r bilinear"`.
impl FromStr for CslStringList {
    type Err = GdalError;

    fn from_str(s: &str) -> Result<Self> {
        let mut result = Self::new();
        for token in s.split_whitespace() {
            result.add_string(token)?;
        }
        Ok(result)
    }
}
