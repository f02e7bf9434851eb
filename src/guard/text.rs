/*!
 * Text Guards
 *
 * Owning wrappers around native text buffers with lazy decode and
 * exactly-once release
 */

use super::registry::Registration;
use super::traits::{Guard, GuardDrop, GuardRef, Observable};
use super::GuardMetadata;
use crate::abi::NativeLibrary;
use crate::core::errors::HandleError;
use crate::core::types::{HandleId, HandleResult, RawAddress, NULL_ADDRESS};
use crate::monitoring::events::{Category, Event, Payload, Severity};
use crate::monitoring::tracer::DecodeSpan;
use crate::monitoring::{bridge, Collector};
use log::{error, warn};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Exclusive owner of one foreign-allocated text buffer
///
/// The buffer is read and UTF-8-decoded at most once, on first `as_text`
/// call; every later call returns the cached text without touching foreign
/// memory. The native free runs exactly once, on explicit release or on
/// drop, whichever comes first.
///
/// Not `Clone`: two independently-released owners of one address would be a
/// double free. Use [`TextGuardRef`] for shared ownership.
///
/// # Example
///
/// ```ignore
/// let guard = TextGuard::from_raw(address, library);
/// let text = guard.as_text()?;
/// // Buffer freed automatically on drop
/// ```
pub struct TextGuard {
    address: RawAddress,
    library: Arc<dyn NativeLibrary>,
    cached: OnceLock<Box<str>>,
    // Serializes the first decode and orders release against in-flight reads
    state_lock: Mutex<()>,
    released: AtomicBool,
    metadata: GuardMetadata,
    collector: Option<Arc<Collector>>,
    registration: Option<Registration>,
}

impl TextGuard {
    /// Wrap a raw address obtained from a native call
    ///
    /// The null sentinel is accepted without error; such a handle decodes to
    /// `NullResource` and never invokes the native free.
    pub fn new(
        address: RawAddress,
        library: Arc<dyn NativeLibrary>,
        collector: Option<Arc<Collector>>,
    ) -> Self {
        let collector = collector.or_else(|| bridge::collector().map(Arc::clone));
        let guard = Self {
            address,
            library,
            cached: OnceLock::new(),
            state_lock: Mutex::new(()),
            released: AtomicBool::new(false),
            metadata: GuardMetadata::new("text"),
            collector,
            registration: None,
        };

        guard.emit_created();
        guard
    }

    /// Wrap a raw address, reporting through the global collector if any
    pub fn from_raw(address: RawAddress, library: Arc<dyn NativeLibrary>) -> Self {
        Self::new(address, library, None)
    }

    /// Create a registry-tracked guard
    pub(crate) fn registered(
        address: RawAddress,
        library: Arc<dyn NativeLibrary>,
        collector: Option<Arc<Collector>>,
        registration: Registration,
    ) -> Self {
        let guard = Self {
            address,
            library,
            cached: OnceLock::new(),
            state_lock: Mutex::new(()),
            released: AtomicBool::new(false),
            metadata: GuardMetadata::new("text"),
            collector,
            registration: Some(registration),
        };

        guard.emit_created();
        guard
    }

    /// Get the raw native address
    #[inline]
    pub fn address(&self) -> RawAddress {
        self.address
    }

    /// Check whether this handle holds the null sentinel
    #[inline]
    pub fn is_null(&self) -> bool {
        self.address == NULL_ADDRESS
    }

    /// Registry identity, if this guard is tracked
    #[inline]
    pub fn id(&self) -> Option<HandleId> {
        self.registration.as_ref().map(|r| r.id)
    }

    /// Decoded text view of the buffer
    ///
    /// The first successful call reads the buffer once and caches the
    /// decoded text for the life of the guard. Invalid UTF-8 fails with
    /// [`HandleError::InvalidEncoding`] and caches nothing; no replacement
    /// characters are ever substituted.
    pub fn as_text(&self) -> HandleResult<&str> {
        if self.released.load(Ordering::Acquire) {
            return Err(HandleError::UseAfterRelease);
        }
        if self.is_null() {
            return Err(HandleError::NullResource);
        }
        if let Some(text) = self.cached.get() {
            return Ok(text);
        }

        let _state = self.state_lock.lock();
        if let Some(text) = self.cached.get() {
            return Ok(text);
        }
        // Re-check under the lock: release cannot interleave past this point
        if self.released.load(Ordering::Acquire) {
            return Err(HandleError::UseAfterRelease);
        }

        let span = DecodeSpan::new(self.id());
        let bytes = self.library.read_buffer(self.address);
        let text = match std::str::from_utf8(&bytes) {
            Ok(text) => text,
            Err(source) => {
                let err = HandleError::InvalidEncoding {
                    valid_up_to: source.valid_up_to(),
                };
                span.record_error("invalid encoding");
                self.emit_error(&err);
                return Err(err);
            }
        };
        span.record_success(text.len());

        let decoded_len = text.len();
        let duration_us = span.elapsed_micros();
        let stored = self.cached.get_or_init(|| Box::from(text));

        if let Some(registration) = &self.registration {
            registration.registry.record_decode(registration.id, decoded_len);
        }
        if let Some(collector) = &self.collector {
            collector.text_decoded(self.id(), decoded_len, duration_us);
        }

        Ok(stored)
    }

    /// Release the buffer without waiting for Drop
    pub fn release_early(mut self) -> HandleResult<()> {
        // Drop sees the released flag and does nothing further
        self.release()
    }

    /// Transfer ownership of the address back to the native side
    ///
    /// The guard is consumed without releasing; the caller becomes
    /// responsible for the eventual free. Must not be called on a released
    /// guard.
    pub fn into_raw(mut self) -> RawAddress {
        let address = self.address;
        if let Some(registration) = self.registration.take() {
            registration.registry.deregister(registration.id);
        }
        std::mem::forget(self);
        address
    }

    /// Shared release path; callable through `&self` so both the owned and
    /// the reference-counted flavor use it
    fn release_impl(&self) -> HandleResult<()> {
        let _state = self.state_lock.lock();
        if self.released.swap(true, Ordering::AcqRel) {
            // Already released; idempotent
            return Ok(());
        }

        if self.address != NULL_ADDRESS {
            let status = self.library.free_buffer(self.address);
            if !status.is_success() {
                // The buffer is gone either way; report, don't fail
                let err = HandleError::ReleaseFailed {
                    status: status.code(),
                };
                warn!(
                    "native free for address {:#x} reported non-success: {}",
                    self.address, err
                );
                self.emit_error(&err);
            } else {
                self.emit_dropped();
            }
        } else {
            self.emit_dropped();
        }

        if let Some(registration) = &self.registration {
            registration.registry.deregister(registration.id);
        }
        Ok(())
    }
}

impl Guard for TextGuard {
    fn resource_type(&self) -> &'static str {
        "text"
    }

    fn metadata(&self) -> &GuardMetadata {
        &self.metadata
    }

    fn is_active(&self) -> bool {
        !self.released.load(Ordering::Acquire)
    }

    fn release(&mut self) -> HandleResult<()> {
        self.release_impl()
    }
}

impl GuardDrop for TextGuard {
    fn on_drop(&mut self) {
        if self.is_active() {
            if let Err(e) = self.release_impl() {
                error!(
                    "text guard drop failed for address {:#x}: {}",
                    self.address, e
                );
                self.emit_error(&e);
            }
        }
    }
}

impl Observable for TextGuard {
    fn emit_created(&self) {
        if let Some(ref collector) = self.collector {
            collector.handle_created(self.id(), self.address, self.is_null());
        }
    }

    fn emit_used(&self, operation: &str) {
        if let Some(ref collector) = self.collector {
            let mut event = Event::new(
                Severity::Debug,
                Category::Handle,
                Payload::MetricUpdate {
                    name: "text_guard_used".into(),
                    value: 1.0,
                    labels: vec![("operation".into(), operation.into())],
                },
            );
            if let Some(id) = self.id() {
                event = event.with_handle(id);
            }
            collector.emit(event);
        }
    }

    fn emit_dropped(&self) {
        if let Some(ref collector) = self.collector {
            collector.handle_released(self.id(), self.metadata.lifetime_micros());
        }
    }

    fn emit_error(&self, error: &HandleError) {
        if let Some(ref collector) = self.collector {
            match error {
                HandleError::ReleaseFailed { status } => {
                    collector.release_failed(self.id(), *status)
                }
                HandleError::InvalidEncoding { valid_up_to } => {
                    collector.decode_failed(self.id(), *valid_up_to)
                }
                other => {
                    let mut event = Event::new(
                        Severity::Error,
                        Category::Handle,
                        Payload::MetricUpdate {
                            name: "text_guard_error".into(),
                            value: 1.0,
                            labels: vec![("error".into(), other.to_string().into())],
                        },
                    );
                    if let Some(id) = self.id() {
                        event = event.with_handle(id);
                    }
                    collector.emit(event);
                }
            }
        }
    }
}

impl Drop for TextGuard {
    #[inline]
    fn drop(&mut self) {
        self.on_drop();
    }
}

impl std::fmt::Debug for TextGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextGuard")
            .field("address", &format_args!("{:#x}", self.address))
            .field("decoded", &self.cached.get().is_some())
            .field("active", &self.is_active())
            .finish()
    }
}

/// Reference-counted text guard for shared ownership
///
/// Clones share one underlying guard; the buffer is freed exactly once,
/// when the last reference drops (or on an explicit shared release).
pub struct TextGuardRef {
    inner: Arc<TextGuard>,
}

impl TextGuardRef {
    /// Share ownership of an existing guard
    pub fn new(guard: TextGuard) -> Self {
        Self {
            inner: Arc::new(guard),
        }
    }

    /// Get the raw native address
    #[inline]
    pub fn address(&self) -> RawAddress {
        self.inner.address()
    }

    /// Decoded text view of the shared buffer
    pub fn as_text(&self) -> HandleResult<&str> {
        self.inner.as_text()
    }
}

impl Guard for TextGuardRef {
    fn resource_type(&self) -> &'static str {
        "text_ref"
    }

    fn metadata(&self) -> &GuardMetadata {
        self.inner.metadata()
    }

    fn is_active(&self) -> bool {
        self.inner.is_active()
    }

    fn release(&mut self) -> HandleResult<()> {
        // Releases for every clone; remaining refs observe UseAfterRelease
        self.inner.release_impl()
    }
}

impl GuardRef for TextGuardRef {
    fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl Clone for TextGuardRef {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
