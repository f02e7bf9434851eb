/*!
 * Bridge
 * Optional process-global collector
 *
 * Guards created without an explicit collector fall back to this, so
 * observability does not depend on plumbing a collector through every
 * call site.
 */

use super::collector::Collector;
use super::events::{Category, Event, Payload, Severity};
use std::sync::Arc;

/// Global collector (optional integration point)
static GLOBAL_COLLECTOR: std::sync::OnceLock<Arc<Collector>> = std::sync::OnceLock::new();

/// Initialize the global collector
///
/// The first call wins; later calls are ignored.
pub fn init_collector(collector: Collector) {
    GLOBAL_COLLECTOR.get_or_init(|| Arc::new(collector));
}

/// Get the global collector if initialized
#[inline]
pub fn collector() -> Option<&'static Arc<Collector>> {
    GLOBAL_COLLECTOR.get()
}

/// Emit an event through the global collector, if any
#[inline]
pub fn emit(severity: Severity, category: Category, payload: Payload) {
    if let Some(collector) = collector() {
        collector.emit(Event::new(severity, category, payload));
    }
}
