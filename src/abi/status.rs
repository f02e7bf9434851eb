/*!
 * Free Status Codes
 * Status returned by the native free call
 */

use serde::{Deserialize, Serialize};

/// Outcome of the native free call
///
/// Zero is the only defined success value; everything else is surfaced in
/// diagnostics as a release failure. No corrective action is possible either
/// way, so callers observe the status but the handle still counts as
/// released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FreeStatus {
    Success,
    Failure(i32),
}

impl FreeStatus {
    /// Raw success code on the native side
    pub const SUCCESS_CODE: i32 = 0;

    /// Map a raw native status code
    #[inline]
    pub fn from_raw(code: i32) -> Self {
        if code == Self::SUCCESS_CODE {
            Self::Success
        } else {
            Self::Failure(code)
        }
    }

    /// Check for success
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Get the raw status code
    #[inline]
    pub fn code(&self) -> i32 {
        match self {
            Self::Success => Self::SUCCESS_CODE,
            Self::Failure(code) => *code,
        }
    }
}
