/*!
 * Native Library Trait
 *
 * Trait seam over the foreign read/free pair so guards stay testable
 */

use super::status::FreeStatus;
use crate::core::types::RawAddress;

/// The foreign surface guards depend on
///
/// Implementations bridge to the natively compiled library that allocated
/// the buffers. Tests substitute call-counting doubles at this seam.
///
/// # Contract
///
/// - `read_buffer` must be safe to call any number of times before the
///   matching `free_buffer`, and never after it.
/// - `free_buffer` is called at most once per address; the guard layer
///   enforces this.
/// - Neither call is ever made with the null sentinel.
pub trait NativeLibrary: Send + Sync {
    /// Read the buffer at `address` up to its NUL terminator
    ///
    /// Returns the raw bytes excluding the terminator. No encoding is
    /// assumed at this layer; UTF-8 validation happens in the guard.
    fn read_buffer(&self, address: RawAddress) -> Vec<u8>;

    /// Release the buffer at `address`, returning the native status code
    fn free_buffer(&self, address: RawAddress) -> FreeStatus;
}
