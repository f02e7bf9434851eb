/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised at the foreign-resource boundary
///
/// `NullResource` and `UseAfterRelease` are programming errors and surface
/// immediately. `InvalidEncoding` is a data-integrity error from the native
/// side and is never masked. `ReleaseFailed` is reported in diagnostics only:
/// once the free call has run, the handle's lifetime is over either way.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum HandleError {
    #[error("Handle holds no native resource")]
    #[diagnostic(
        code(handle::null_resource),
        help("The native call that produced this handle returned null. Check its error channel.")
    )]
    NullResource,

    #[error("Native buffer accessed after release")]
    #[diagnostic(
        code(handle::use_after_release),
        help("Decode the buffer before disposing of the handle; the address is invalid once freed.")
    )]
    UseAfterRelease,

    #[error("Native buffer is not valid UTF-8 (valid up to byte {valid_up_to})")]
    #[diagnostic(
        code(handle::invalid_encoding),
        help("The native side must produce UTF-8 text. No replacement characters are substituted.")
    )]
    InvalidEncoding { valid_up_to: usize },

    #[error("Native free reported status {status}")]
    #[diagnostic(
        code(handle::release_failed),
        help("The buffer cannot be recovered after the free call; inspect native-side logs.")
    )]
    ReleaseFailed { status: i32 },
}
