/*!
 * Core Types
 * Common types used across the crate
 */

/// Raw native memory address as handed across the foreign boundary
pub type RawAddress = usize;

/// Null sentinel for addresses
///
/// A handle created with this address represents "no resource" and is
/// accepted without error; decoding and release are both skipped for it.
pub const NULL_ADDRESS: RawAddress = 0;

/// Registry-issued identity for live handles
pub type HandleId = u64;

/// Common result type for handle operations
pub type HandleResult<T> = Result<T, super::errors::HandleError>;
