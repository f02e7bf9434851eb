/*!
 * FFI Guard Library
 * Safe owning wrappers around foreign-allocated resources
 */

pub mod abi;
pub mod core;
pub mod guard;
pub mod monitoring;

// Re-exports
pub use crate::core::errors::HandleError;
pub use crate::core::types::{HandleId, HandleResult, RawAddress, NULL_ADDRESS};
pub use abi::{FreeStatus, NativeLibrary, SystemLibrary};
pub use guard::{
    Guard, GuardDrop, GuardMetadata, GuardRef, HandleRegistry, Observable, RegistryStats,
    TextGuard, TextGuardRef,
};
pub use monitoring::{Category, Collector, Event, EventFilter, Payload, Severity};
