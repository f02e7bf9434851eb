/*!
 * Unified Collector
 * Central emit point for all observability data
 */

use crate::core::types::{HandleId, RawAddress};
use crate::monitoring::events::{Category, Event, Payload, Severity};
use crate::monitoring::stream::{EventStream, StreamStats, Subscriber};

/// Unified observability collector
///
/// Guards emit through this; exporters and tests subscribe to the
/// underlying stream.
pub struct Collector {
    stream: EventStream,
}

impl Collector {
    /// Create a new collector
    pub fn new() -> Self {
        Self {
            stream: EventStream::new(),
        }
    }

    /// Emit an event (primary API)
    #[inline]
    pub fn emit(&self, event: Event) {
        let _ = self.stream.publish(event);
    }

    /// Subscribe to the event stream
    pub fn subscribe(&self) -> Subscriber {
        self.stream.subscribe()
    }

    /// Get stream statistics
    pub fn stream_stats(&self) -> StreamStats {
        self.stream.stats()
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Collector {
    fn clone(&self) -> Self {
        Self {
            stream: self.stream.clone(),
        }
    }
}

/// Convenience recorders for common lifecycle events
impl Collector {
    /// Record handle creation
    pub fn handle_created(&self, handle_id: Option<HandleId>, address: RawAddress, null: bool) {
        let mut event = Event::new(
            Severity::Debug,
            Category::Handle,
            Payload::HandleCreated { address, null },
        );
        if let Some(id) = handle_id {
            event = event.with_handle(id);
        }
        self.emit(event);
    }

    /// Record a completed decode
    pub fn text_decoded(&self, handle_id: Option<HandleId>, bytes: usize, duration_us: u64) {
        let mut event = Event::new(
            Severity::Debug,
            Category::Decode,
            Payload::TextDecoded { bytes, duration_us },
        );
        if let Some(id) = handle_id {
            event = event.with_handle(id);
        }
        self.emit(event);
    }

    /// Record a failed decode
    pub fn decode_failed(&self, handle_id: Option<HandleId>, valid_up_to: usize) {
        let mut event = Event::new(
            Severity::Error,
            Category::Decode,
            Payload::DecodeFailed { valid_up_to },
        );
        if let Some(id) = handle_id {
            event = event.with_handle(id);
        }
        self.emit(event);
    }

    /// Record handle release
    pub fn handle_released(&self, handle_id: Option<HandleId>, lifetime_micros: u64) {
        let mut event = Event::new(
            Severity::Debug,
            Category::Handle,
            Payload::HandleReleased { lifetime_micros },
        );
        if let Some(id) = handle_id {
            event = event.with_handle(id);
        }
        self.emit(event);
    }

    /// Record a non-success native free status
    pub fn release_failed(&self, handle_id: Option<HandleId>, status: i32) {
        let mut event = Event::new(
            Severity::Warn,
            Category::Native,
            Payload::ReleaseFailed { status },
        );
        if let Some(id) = handle_id {
            event = event.with_handle(id);
        }
        self.emit(event);
    }

    /// Record still-live handles found by a leak sweep
    pub fn handles_leaked(&self, count: u64) {
        self.emit(Event::new(
            Severity::Warn,
            Category::Registry,
            Payload::HandleLeaked { count },
        ));
    }
}
