/*!
 * System Limits and Constants
 *
 * Centralized location for crate-wide limits and thresholds.
 */

// =============================================================================
// OBSERVABILITY LIMITS
// =============================================================================

/// Maximum events in the observability ring buffer (power of 2 for performance)
/// Oldest events are dropped under backpressure rather than blocking guards
pub const EVENT_RING_SIZE: usize = 4096;

/// Queue utilization above which the event stream reports backpressure
pub const EVENT_PRESSURE_THRESHOLD: f64 = 0.75;

// =============================================================================
// REGISTRY LIMITS
// =============================================================================

/// Initial capacity for the live-handle registry
/// Sized for a typical native session; the map grows beyond this on demand
pub const REGISTRY_INITIAL_CAPACITY: usize = 64;

// =============================================================================
// DECODE THRESHOLDS
// =============================================================================

/// Decode duration above which a warning is traced (microseconds)
/// Reads are plain memory operations; anything slower points at a runaway
/// unterminated buffer on the native side
pub const SLOW_DECODE_THRESHOLD_US: u128 = 1_000;
