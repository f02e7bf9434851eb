/*!
 * Observability Tests
 *
 * Guard lifecycle as seen through the collector
 */

use crate::support::CountingLibrary;
use ffi_guard::{Category, Collector, EventFilter, HandleRegistry, Payload, Severity, TextGuard};
use std::sync::Arc;

#[test]
fn test_lifecycle_emits_create_decode_release() {
    let collector = Arc::new(Collector::new());
    let library = CountingLibrary::new();
    let address = library.install(b"observed\0");

    let mut sub = collector.subscribe();
    {
        let guard = TextGuard::new(address, library.clone(), Some(collector.clone()));
        guard.as_text().unwrap();
    }

    let events = sub.drain();
    assert_eq!(events.len(), 3);
    assert!(matches!(
        events[0].payload,
        Payload::HandleCreated { null: false, .. }
    ));
    assert!(matches!(events[1].payload, Payload::TextDecoded { bytes: 8, .. }));
    assert!(matches!(events[2].payload, Payload::HandleReleased { .. }));
}

#[test]
fn test_null_handle_created_event_flags_null() {
    let collector = Arc::new(Collector::new());
    let library = CountingLibrary::new();

    let mut sub = collector.subscribe();
    let _guard = TextGuard::new(0, library, Some(collector.clone()));

    let events = sub.drain();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0].payload,
        Payload::HandleCreated { null: true, .. }
    ));
}

#[test]
fn test_release_failure_event_is_warning() {
    let collector = Arc::new(Collector::new());
    let library = CountingLibrary::with_free_code(9);
    let address = library.install(b"doomed\0");

    let mut sub = collector.subscribe();
    {
        let _guard = TextGuard::new(address, library.clone(), Some(collector.clone()));
    }

    let filter = EventFilter::new().severity(Severity::Warn);
    let warnings = sub.filter(&filter);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].category, Category::Native);
    assert!(matches!(
        warnings[0].payload,
        Payload::ReleaseFailed { status: 9 }
    ));
}

#[test]
fn test_decode_failure_event_carries_valid_prefix() {
    let collector = Arc::new(Collector::new());
    let library = CountingLibrary::new();
    let address = library.install(&[b'o', b'k', 0xFF, 0x00]);

    let mut sub = collector.subscribe();
    let guard = TextGuard::new(address, library.clone(), Some(collector.clone()));
    assert!(guard.as_text().is_err());

    let filter = EventFilter::new().category(Category::Decode);
    let events = sub.filter(&filter);
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0].payload,
        Payload::DecodeFailed { valid_up_to: 2 }
    ));
}

#[test]
fn test_registry_events_carry_handle_ids() {
    let collector = Arc::new(Collector::new());
    let registry = Arc::new(HandleRegistry::with_collector(collector.clone()));
    let library = CountingLibrary::new();
    let address = library.install(b"tracked\0");

    let mut sub = collector.subscribe();
    let guard = registry.adopt(address, library.clone());
    let id = guard.id().unwrap();
    guard.as_text().unwrap();
    drop(guard);

    let events = sub.drain();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.handle_id == Some(id)));
}

#[test]
fn test_leak_sweep_emits_registry_event() {
    let collector = Arc::new(Collector::new());
    let registry = Arc::new(HandleRegistry::with_collector(collector.clone()));
    let library = CountingLibrary::new();

    let _live = registry.adopt(library.install(b"live\0"), library.clone());

    let mut sub = collector.subscribe();
    registry.report_leaks();

    let filter = EventFilter::new().category(Category::Registry);
    let events = sub.filter(&filter);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0].payload, Payload::HandleLeaked { count: 1 }));
}

#[test]
fn test_event_json_round_trip() {
    let collector = Arc::new(Collector::new());
    let library = CountingLibrary::new();
    let address = library.install(b"json\0");

    let mut sub = collector.subscribe();
    let guard = TextGuard::new(address, library, Some(collector.clone()));
    let _ = guard.as_text();
    let _ = guard.release_early();

    for event in sub.drain() {
        let json = event.to_json().unwrap();
        assert!(json.contains("severity"));
    }
}
