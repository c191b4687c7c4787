//! Rust wrappers for the [GDAL Programs](https://gdal.org/programs/index.html)
//!
//! Each utility takes a [`DatasetDestination`], its source dataset(s) and an optional flag
//! list spelled exactly like on the command line (`-t_srs EPSG:4326`, `-of GTiff`, ...).
//! An empty destination writes to memory.

use gdal_sys::{CPLErr, GDALDatasetH};
use libc::c_int;

use crate::cpl::CslStringList;
use crate::errors::*;
use crate::utils::_last_cpl_err;
use crate::Dataset;

mod destination;
mod progress;
pub mod raster;
pub mod vector;

pub use destination::DatasetDestination;
pub use progress::Progress;
pub(crate) use progress::progress_args;

/// Flags selecting the output driver, in every utility parser.
const FORMAT_FLAGS: [&str; 2] = ["-of", "-f"];

/// Declares the public flag list type of a utility.
macro_rules! program_options {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            args: $crate::cpl::CslStringList,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            /// Appends one command line token.
            pub fn add_arg(&mut self, arg: &str) -> $crate::errors::Result<&mut Self> {
                self.args.add_string(arg)?;
                Ok(self)
            }

            /// Appends several command line tokens, in order.
            pub fn add_args<'s, I>(&mut self, args: I) -> $crate::errors::Result<&mut Self>
            where
                I: IntoIterator<Item = &'s str>,
            {
                for arg in args {
                    self.args.add_string(arg)?;
                }
                Ok(self)
            }

            pub fn args(&self) -> &$crate::cpl::CslStringList {
                &self.args
            }
        }

        impl From<$crate::cpl::CslStringList> for $name {
            fn from(args: $crate::cpl::CslStringList) -> Self {
                Self { args }
            }
        }

        impl TryFrom<&[&str]> for $name {
            type Error = $crate::errors::GdalError;

            fn try_from(args: &[&str]) -> $crate::errors::Result<Self> {
                Ok(Self {
                    args: args.try_into()?,
                })
            }
        }

        impl TryFrom<Vec<&str>> for $name {
            type Error = $crate::errors::GdalError;

            fn try_from(args: Vec<&str>) -> $crate::errors::Result<Self> {
                Self::try_from(args.as_slice())
            }
        }

        impl<const N: usize> TryFrom<[&str; N]> for $name {
            type Error = $crate::errors::GdalError;

            fn try_from(args: [&str; N]) -> $crate::errors::Result<Self> {
                Self::try_from(args.as_slice())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::errors::GdalError;

            /// Splits a command line on whitespace. Quoting is not interpreted.
            fn from_str(s: &str) -> $crate::errors::Result<Self> {
                Ok(Self { args: s.parse()? })
            }
        }
    };
}
pub(crate) use program_options;

/// Declares the owner of a native `GDAL*Options` struct, freed on drop.
///
/// A flag list the utility's parser rejects fails as a [`GdalError::ProgramError`] of
/// `program`.
macro_rules! native_options {
    ($name:ident, $c_type:ident, $c_new:ident, $c_free:ident) => {
        struct $name(std::ptr::NonNull<gdal_sys::$c_type>);

        impl $name {
            fn new(
                program: &'static str,
                args: &$crate::cpl::CslStringList,
            ) -> $crate::errors::Result<Self> {
                // GDAL copies what it needs out of `args`.
                let c_options = unsafe { gdal_sys::$c_new(args.as_ptr(), std::ptr::null_mut()) };
                match std::ptr::NonNull::new(c_options) {
                    Some(c_options) => Ok(Self(c_options)),
                    None => Err($crate::programs::program_error(program, 0)),
                }
            }

            fn as_ptr(&self) -> *const gdal_sys::$c_type {
                self.0.as_ptr()
            }
        }

        impl Drop for $name {
            fn drop(&mut self) {
                unsafe { gdal_sys::$c_free(self.0.as_ptr()) };
            }
        }
    };
}
pub(crate) use native_options;

/// The flag list a utility runs with: the caller's flags, preceded by `<format_flag> <driver>`
/// when writing to memory without an explicit format.
pub(crate) fn resolve_args(
    program: &'static str,
    dest: &DatasetDestination,
    args: Option<&CslStringList>,
    format_flag: &str,
    in_memory_driver: &str,
) -> Result<CslStringList> {
    let mut args = args.cloned().unwrap_or_default();
    if dest.is_in_memory() && !has_format_flag(&args) {
        args.insert_string(0, in_memory_driver)?;
        args.insert_string(0, format_flag)?;
        log::debug!("{program}: no output format given, writing to {in_memory_driver}");
    }
    log::debug!("{program} {args:?}");
    Ok(args)
}

/// Whether `args` selects an output driver, i.e. holds a format flag followed by a driver name.
///
/// A format flag with no value after it is itself the value of another flag (`-nln -f`).
fn has_format_flag(args: &CslStringList) -> bool {
    let tokens: Vec<String> = args.iter().collect();
    tokens.windows(2).any(|pair| {
        FORMAT_FLAGS
            .iter()
            .any(|flag| pair[0].eq_ignore_ascii_case(flag))
            && !pair[1].starts_with('-')
    })
}

/// Turns the result of a `gdal_utils.h` entry point into a [`Dataset`].
///
/// On success the returned handle may be the destination dataset itself, which then changes
/// owner. On failure the destination is dropped (and closed) with `dest`.
pub(crate) fn finish(
    program: &'static str,
    c_dataset: GDALDatasetH,
    usage_error: c_int,
    mut dest: DatasetDestination,
) -> Result<Dataset> {
    if c_dataset.is_null() {
        return Err(program_error(program, usage_error));
    }
    unsafe {
        dest.do_not_drop_dataset();
        Ok(Dataset::from_c_dataset(c_dataset))
    }
}

/// The error for a failed utility run, carrying the usage error flag if set or else the last
/// CPL error number.
pub(crate) fn program_error(program: &'static str, usage_error: c_int) -> GdalError {
    match _last_cpl_err(CPLErr::CE_Failure) {
        GdalError::CplError { number, msg, .. } => GdalError::ProgramError {
            program,
            code: if usage_error != 0 { usage_error } else { number },
            msg,
        },
        err => err,
    }
}
