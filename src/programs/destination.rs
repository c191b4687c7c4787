use std::ffi::CString;
use std::mem::ManuallyDrop;
use std::path::{Path, PathBuf};
use std::ptr::{null, null_mut};

use gdal_sys::GDALDatasetH;
use libc::c_char;

use crate::errors::*;
use crate::utils::_path_to_c_string;
use crate::Dataset;

/// Where a utility writes its result.
///
/// Converting an empty path yields [`DatasetDestination::InMemory`], which makes the utility
/// default to GDAL's in-memory driver unless the flag list names another format.
#[derive(Debug)]
pub enum DatasetDestination {
    /// A file name handed to the output driver.
    Path(CString),
    /// An already opened dataset the utility writes into.
    ///
    /// The dataset is closed if the utility fails and returned to the caller if it succeeds.
    Dataset {
        dataset: ManuallyDrop<Dataset>,
        drop: bool,
    },
    /// An unnamed in-memory dataset.
    InMemory,
}

impl TryFrom<&str> for DatasetDestination {
    type Error = GdalError;

    fn try_from(path: &str) -> Result<Self> {
        Self::path(path)
    }
}

impl TryFrom<&Path> for DatasetDestination {
    type Error = GdalError;

    fn try_from(path: &Path) -> Result<Self> {
        Self::path(path)
    }
}

impl TryFrom<PathBuf> for DatasetDestination {
    type Error = GdalError;

    fn try_from(path: PathBuf) -> Result<Self> {
        Self::path(path)
    }
}

impl From<Dataset> for DatasetDestination {
    fn from(dataset: Dataset) -> Self {
        Self::dataset(dataset)
    }
}

impl Drop for DatasetDestination {
    fn drop(&mut self) {
        if let Self::Dataset {
            dataset,
            drop: true,
        } = self
        {
            unsafe { ManuallyDrop::drop(dataset) };
        }
    }
}

impl DatasetDestination {
    pub fn dataset(dataset: Dataset) -> Self {
        Self::Dataset {
            dataset: ManuallyDrop::new(dataset),
            drop: true,
        }
    }

    /// A destination file, or [`DatasetDestination::InMemory`] if `path` is empty.
    pub fn path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Ok(Self::InMemory);
        }
        Ok(Self::Path(_path_to_c_string(path)?))
    }

    pub fn is_in_memory(&self) -> bool {
        matches!(self, Self::InMemory)
    }

    /// The `pszDest` and `hDstDS` arguments of the `gdal_utils.h` entry points.
    ///
    /// # Safety
    /// The returned pointers borrow from `self`.
    pub(crate) unsafe fn c_args(&self) -> (*const c_char, GDALDatasetH) {
        match self {
            Self::Path(c_path) => (c_path.as_ptr(), null_mut()),
            Self::Dataset { dataset, .. } => (null(), dataset.c_dataset()),
            Self::InMemory => (c"".as_ptr(), null_mut()),
        }
    }

    /// Keeps the wrapped dataset open when `self` is dropped, as its handle was handed back
    /// by GDAL and is now owned by a new [`Dataset`].
    ///
    /// # Safety
    /// Only call this once the native handle has another owner.
    pub(crate) unsafe fn do_not_drop_dataset(&mut self) {
        if let Self::Dataset { drop, .. } = self {
            *drop = false;
        }
    }

    /// Fails for destinations that are open datasets, for utilities that can only create new
    /// ones.
    pub(crate) fn require_new(&self, program: &'static str) -> Result<()> {
        if let Self::Dataset { .. } = self {
            return Err(GdalError::BadArgument(format!(
                "{program} cannot write into an existing dataset"
            )));
        }
        Ok(())
    }
}
