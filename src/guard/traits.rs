/*!
 * Guard Traits
 *
 * Core abstractions for RAII resource guards
 */

use super::GuardMetadata;
use crate::core::errors::HandleError;
use crate::core::types::HandleResult;

/// Core guard trait
///
/// All guards must implement this to provide:
/// - Resource type identification
/// - Metadata access
/// - Manual release capability
pub trait Guard: Send {
    /// Resource type name for logging/debugging
    fn resource_type(&self) -> &'static str;

    /// Get guard metadata
    fn metadata(&self) -> &GuardMetadata;

    /// Check if guard is still active
    fn is_active(&self) -> bool;

    /// Release the resource
    ///
    /// Idempotent: the underlying free runs on the first call only; repeat
    /// calls are no-ops returning `Ok`.
    fn release(&mut self) -> HandleResult<()>;
}

/// Guards that can be dropped with custom cleanup
///
/// Separates Drop logic for better testability and observability
pub trait GuardDrop: Guard {
    /// Perform cleanup on drop
    ///
    /// # Panics
    ///
    /// Should NOT panic. Log errors instead.
    fn on_drop(&mut self);
}

/// Guards with observable lifecycle
///
/// Automatically emits events for creation, usage, and cleanup
pub trait Observable: Guard {
    /// Emit creation event
    fn emit_created(&self);

    /// Emit usage event with operation name
    fn emit_used(&self, operation: &str);

    /// Emit cleanup event
    fn emit_dropped(&self);

    /// Emit error event
    fn emit_error(&self, error: &HandleError);
}

/// Guards that can be cloned with reference counting
///
/// Useful for shared ownership scenarios; the resource is released exactly
/// once, when the last reference drops
pub trait GuardRef: Guard + Clone {
    /// Get current reference count
    fn ref_count(&self) -> usize;

    /// Check if this is the last reference
    fn is_last_ref(&self) -> bool {
        self.ref_count() == 1
    }
}
