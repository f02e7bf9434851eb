/*!
 * Text Guard Tests
 */

use crate::support::CountingLibrary;
use ffi_guard::{Guard, HandleError, TextGuard, NULL_ADDRESS};
use pretty_assertions::assert_eq;

#[test]
fn test_round_trip_known_bytes() {
    let library = CountingLibrary::new();
    let address = library.install(b"hello\0");

    let guard = TextGuard::from_raw(address, library.clone());
    assert_eq!(guard.as_text().unwrap(), "hello");
}

#[test]
fn test_decode_is_cached() {
    let library = CountingLibrary::new();
    let address = library.install(b"hello\0");
    let guard = TextGuard::from_raw(address, library.clone());

    let first = guard.as_text().unwrap();
    let second = guard.as_text().unwrap();

    assert_eq!(first, second);
    // Same backing storage, not a re-decode
    assert_eq!(first.as_ptr(), second.as_ptr());
    assert_eq!(library.reads(), 1);
}

#[test]
fn test_null_handle_fails_without_reading() {
    let library = CountingLibrary::new();
    let guard = TextGuard::from_raw(NULL_ADDRESS, library.clone());

    assert_eq!(guard.as_text(), Err(HandleError::NullResource));
    assert_eq!(library.reads(), 0);

    drop(guard);
    assert_eq!(library.frees(), 0);
}

#[test]
fn test_invalid_utf8_surfaces_encoding_error() {
    let library = CountingLibrary::new();
    let address = library.install(&[0xFF, 0xFE, 0x00]);
    let guard = TextGuard::from_raw(address, library.clone());

    assert_eq!(
        guard.as_text(),
        Err(HandleError::InvalidEncoding { valid_up_to: 0 })
    );
}

#[test]
fn test_full_lifecycle_scenario() {
    // Create from null-terminated "hello", decode, dispose twice, then
    // access after release
    let library = CountingLibrary::new();
    let address = library.install(&[0x68, 0x65, 0x6C, 0x6C, 0x6F, 0x00]);
    let mut guard = TextGuard::from_raw(address, library.clone());

    assert_eq!(guard.as_text().unwrap(), "hello");

    guard.release().unwrap();
    assert_eq!(library.frees(), 1);
    assert!(library.is_freed(address));

    guard.release().unwrap();
    assert_eq!(library.frees(), 1);

    assert_eq!(guard.as_text(), Err(HandleError::UseAfterRelease));
}

#[test]
fn test_drop_frees_undecoded_handle() {
    // Release must not depend on the text ever being requested
    let library = CountingLibrary::new();
    let address = library.install(b"never read\0");

    {
        let _guard = TextGuard::from_raw(address, library.clone());
    }

    assert_eq!(library.reads(), 0);
    assert_eq!(library.frees(), 1);
    assert!(library.is_freed(address));
}

#[test]
fn test_failed_free_reported_not_fatal() {
    let library = CountingLibrary::with_free_code(-7);
    let address = library.install(b"hello\0");
    let mut guard = TextGuard::from_raw(address, library.clone());

    // Non-success status is diagnostics-only; the release itself succeeds
    guard.release().unwrap();
    assert!(!guard.is_active());
    assert_eq!(library.frees(), 1);
}

#[test]
fn test_distinct_guards_own_distinct_buffers() {
    let library = CountingLibrary::new();
    let first = library.install(b"allow\0");
    let second = library.install(b"deny\0");

    let a = TextGuard::from_raw(first, library.clone());
    let b = TextGuard::from_raw(second, library.clone());

    assert_eq!(a.as_text().unwrap(), "allow");
    assert_eq!(b.as_text().unwrap(), "deny");

    drop(a);
    assert!(library.is_freed(first));
    assert!(!library.is_freed(second));

    drop(b);
    assert_eq!(library.frees(), 2);
}

#[test]
fn test_into_raw_leaves_buffer_live() {
    let library = CountingLibrary::new();
    let address = library.install(b"transferred\0");

    let guard = TextGuard::from_raw(address, library.clone());
    let returned = guard.into_raw();

    assert_eq!(returned, address);
    assert_eq!(library.frees(), 0);
    assert!(!library.is_freed(address));
}

#[test]
fn test_empty_buffer_decodes_to_empty_text() {
    let library = CountingLibrary::new();
    let address = library.install(b"\0");
    let guard = TextGuard::from_raw(address, library.clone());

    assert_eq!(guard.as_text().unwrap(), "");
    assert_eq!(library.reads(), 1);
}
