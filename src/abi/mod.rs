/*!
 * Native Boundary
 * The two foreign calls the crate depends on, behind a trait seam
 *
 * The native library itself (loading, symbol resolution, the semantics of
 * the engine that allocates the buffers) lives outside this crate. Guards
 * only ever see a [`NativeLibrary`] implementation.
 */

mod library;
mod status;
mod system;

pub use library::NativeLibrary;
pub use status::FreeStatus;
pub use system::{RawFreeFn, SystemLibrary};
