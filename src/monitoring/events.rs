/*!
 * Event System
 * Strongly-typed observability events for the handle lifecycle
 */

use crate::core::data_structures::InlineString;
use crate::core::types::{HandleId, RawAddress};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Event severity for filtering and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Severity {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

/// Event category for organization and querying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    Handle,
    Decode,
    Registry,
    Native,
}

/// Unified event type - all observability data flows through this
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Monotonic timestamp (nanoseconds since first event)
    pub timestamp_ns: u64,
    /// Event severity
    pub severity: Severity,
    /// Event category
    pub category: Category,
    /// Handle this event belongs to, if registered
    pub handle_id: Option<HandleId>,
    /// Event payload
    pub payload: Payload,
}

/// Event payload - strongly typed variants for each lifecycle point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Payload {
    // Handle lifecycle
    HandleCreated {
        address: RawAddress,
        null: bool,
    },
    HandleReleased {
        lifetime_micros: u64,
    },
    ReleaseFailed {
        status: i32,
    },

    // Decode path
    TextDecoded {
        bytes: usize,
        duration_us: u64,
    },
    DecodeFailed {
        valid_up_to: usize,
    },

    // Registry
    HandleLeaked {
        count: u64,
    },

    // Custom metric update
    MetricUpdate {
        name: InlineString,
        value: f64,
        labels: Vec<(InlineString, InlineString)>,
    },
}

impl Event {
    /// Create a new event with current timestamp
    #[inline]
    pub fn new(severity: Severity, category: Category, payload: Payload) -> Self {
        Self {
            timestamp_ns: Self::now_ns(),
            severity,
            category,
            handle_id: None,
            payload,
        }
    }

    /// Create event with handle context
    #[inline]
    pub fn with_handle(mut self, handle_id: HandleId) -> Self {
        self.handle_id = Some(handle_id);
        self
    }

    /// Get current time in nanoseconds (monotonic)
    #[inline]
    fn now_ns() -> u64 {
        static START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();
        let start = START.get_or_init(Instant::now);
        start.elapsed().as_nanos() as u64
    }

    /// Get event age
    #[inline]
    pub fn age(&self) -> Duration {
        Duration::from_nanos(Self::now_ns().saturating_sub(self.timestamp_ns))
    }

    /// Serialize to JSON for exporters
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Check if event matches filter criteria
    #[inline]
    pub fn matches(&self, filter: &EventFilter) -> bool {
        if let Some(min_severity) = filter.min_severity {
            if self.severity < min_severity {
                return false;
            }
        }

        if let Some(category) = filter.category {
            if self.category != category {
                return false;
            }
        }

        if let Some(handle_id) = filter.handle_id {
            if self.handle_id != Some(handle_id) {
                return false;
            }
        }

        true
    }
}

/// Event filter for querying
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub min_severity: Option<Severity>,
    pub category: Option<Category>,
    pub handle_id: Option<HandleId>,
}

impl EventFilter {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.min_severity = Some(severity);
        self
    }

    #[inline]
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    #[inline]
    pub fn handle(mut self, handle_id: HandleId) -> Self {
        self.handle_id = Some(handle_id);
        self
    }
}
