use std::panic::{catch_unwind, AssertUnwindSafe};

use gdal_sys::GDALProgressFunc;
use libc::{c_char, c_double, c_int, c_void};

use crate::utils::_string;

/// A progress callback handed to a long running GDAL routine.
///
/// GDAL calls it with the completed fraction in `[0, 1]` and an optional message, on the thread
/// that started the routine. Returning `false` asks GDAL to abort.
pub trait Progress: FnMut(f64, Option<&str>) -> bool {}

impl<F> Progress for F where F: FnMut(f64, Option<&str>) -> bool {}

unsafe extern "C" fn progress_trampoline<F: Progress>(
    complete: c_double,
    message: *const c_char,
    user_data: *mut c_void,
) -> c_int {
    let callback = &mut *(user_data as *mut F);
    let message = _string(message);
    // Unwinding into GDAL is undefined behavior; a panicking callback aborts the run instead.
    catch_unwind(AssertUnwindSafe(|| callback(complete, message.as_deref())))
        .map(c_int::from)
        .unwrap_or_else(|_| {
            log::error!("progress callback panicked, aborting");
            0
        })
}

/// The `pfnProgress` and `pProgressData` pair for `callback`.
///
/// The user data pointer borrows `callback`, which must outlive the native call.
pub(crate) fn progress_args<F: Progress>(callback: &mut F) -> (GDALProgressFunc, *mut c_void) {
    (
        Some(progress_trampoline::<F>),
        callback as *mut F as *mut c_void,
    )
}
