/*!
 * System Library Binding
 *
 * Production implementation of the native boundary
 *
 * Reads go straight through the pointer; the free call is a C symbol
 * attached by whoever loaded the native library.
 */

use super::library::NativeLibrary;
use super::status::FreeStatus;
use crate::core::types::RawAddress;
use std::ffi::CStr;
use std::os::raw::c_char;
use tracing::trace;

/// C signature of the native free function
pub type RawFreeFn = unsafe extern "C" fn(*mut c_char) -> i32;

/// Binding to the loaded native library
///
/// Constructed once per loaded library with the attached free symbol and
/// shared across all guards via `Arc`.
pub struct SystemLibrary {
    free_fn: RawFreeFn,
}

impl SystemLibrary {
    /// Wrap the attached free symbol
    ///
    /// # Safety
    ///
    /// `free_fn` must be the release function matching the allocator that
    /// produced every address later passed to this binding, and must remain
    /// callable for the binding's lifetime.
    pub unsafe fn new(free_fn: RawFreeFn) -> Self {
        Self { free_fn }
    }
}

impl NativeLibrary for SystemLibrary {
    fn read_buffer(&self, address: RawAddress) -> Vec<u8> {
        debug_assert_ne!(address, 0, "guards never read the null sentinel");
        // The native side guarantees NUL termination for live addresses.
        let bytes = unsafe { CStr::from_ptr(address as *const c_char) }
            .to_bytes()
            .to_vec();
        trace!(address, len = bytes.len(), "read native buffer");
        bytes
    }

    fn free_buffer(&self, address: RawAddress) -> FreeStatus {
        debug_assert_ne!(address, 0, "guards never free the null sentinel");
        let code = unsafe { (self.free_fn)(address as *mut c_char) };
        trace!(address, code, "native free returned");
        FreeStatus::from_raw(code)
    }
}
