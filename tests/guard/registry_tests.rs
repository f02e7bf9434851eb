/*!
 * Registry Tests
 */

use crate::support::CountingLibrary;
use ffi_guard::{HandleRegistry, NULL_ADDRESS};
use std::sync::Arc;

#[test]
fn test_registry_tracks_guard_lifecycle() {
    let registry = Arc::new(HandleRegistry::new());
    let library = CountingLibrary::new();
    let address = library.install(b"tracked\0");

    let guard = registry.adopt(address, library.clone());
    assert_eq!(registry.active_count(), 1);

    assert_eq!(guard.as_text().unwrap(), "tracked");
    let stats = registry.stats();
    assert_eq!(stats.decoded_bytes, 7);

    drop(guard);
    assert_eq!(registry.active_count(), 0);
    assert_eq!(library.frees(), 1);

    let stats = registry.stats();
    assert_eq!(stats.created, 1);
    assert_eq!(stats.released, 1);
    assert_eq!(stats.active, 0);
}

#[test]
fn test_registry_tracks_null_handles() {
    let registry = Arc::new(HandleRegistry::new());
    let library = CountingLibrary::new();

    let guard = registry.adopt(NULL_ADDRESS, library.clone());
    assert_eq!(registry.active_count(), 1);

    drop(guard);
    assert_eq!(registry.active_count(), 0);
    // The null sentinel never reaches the native free
    assert_eq!(library.frees(), 0);
}

#[test]
fn test_leak_sweep_reports_live_handles_only() {
    let registry = Arc::new(HandleRegistry::new());
    let library = CountingLibrary::new();

    let live_a = registry.adopt(library.install(b"a\0"), library.clone());
    let live_b = registry.adopt(library.install(b"b\0"), library.clone());
    let released = registry.adopt(library.install(b"c\0"), library.clone());
    drop(released);

    assert_eq!(registry.report_leaks(), 2);

    drop(live_a);
    drop(live_b);
    assert_eq!(registry.report_leaks(), 0);
}

#[test]
fn test_entry_exposes_decode_size() {
    let registry = Arc::new(HandleRegistry::new());
    let library = CountingLibrary::new();
    let address = library.install(b"payload\0");

    let guard = registry.adopt(address, library.clone());
    let id = guard.id().unwrap();

    assert_eq!(registry.entry(id).unwrap().decoded_bytes, 0);
    guard.as_text().unwrap();
    assert_eq!(registry.entry(id).unwrap().decoded_bytes, 7);
    assert_eq!(registry.entry(id).unwrap().address, address);
}
