/*!
 * Mocked Library Tests
 *
 * Strict call-count expectations on the native seam
 */

use ffi_guard::{FreeStatus, Guard, NativeLibrary, RawAddress, TextGuard};
use mockall::mock;
use mockall::predicate::eq;
use std::sync::Arc;

mock! {
    pub Library {}

    impl NativeLibrary for Library {
        fn read_buffer(&self, address: RawAddress) -> Vec<u8>;
        fn free_buffer(&self, address: RawAddress) -> FreeStatus;
    }
}

#[test]
fn test_read_once_free_once_with_exact_address() {
    let mut library = MockLibrary::new();
    library
        .expect_read_buffer()
        .with(eq(0x2000usize))
        .times(1)
        .returning(|_| b"permit".to_vec());
    library
        .expect_free_buffer()
        .with(eq(0x2000usize))
        .times(1)
        .returning(|_| FreeStatus::Success);

    let guard = TextGuard::from_raw(0x2000, Arc::new(library));
    assert_eq!(guard.as_text().unwrap(), "permit");
    assert_eq!(guard.as_text().unwrap(), "permit");
    // Mock expectations verify the single free on drop
}

#[test]
fn test_undecoded_guard_only_frees() {
    let mut library = MockLibrary::new();
    library.expect_read_buffer().times(0);
    library
        .expect_free_buffer()
        .times(1)
        .returning(|_| FreeStatus::Success);

    let _guard = TextGuard::from_raw(0x3000, Arc::new(library));
}

#[test]
fn test_failure_status_consumed_once() {
    let mut library = MockLibrary::new();
    library
        .expect_free_buffer()
        .times(1)
        .returning(|_| FreeStatus::Failure(2));

    let mut guard = TextGuard::from_raw(0x4000, Arc::new(library));
    guard.release().unwrap();
    guard.release().unwrap();
}
