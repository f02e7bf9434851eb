/*!
 * Structured Tracing
 * Span instrumentation for decode operations using the tracing crate
 *
 * Features:
 * - Automatic trace ID generation for correlation
 * - JSON-formatted logs for structured parsing
 * - Slow-decode detection embedded in span drop
 */

use crate::core::limits::SLOW_DECODE_THRESHOLD_US;
use crate::core::types::HandleId;
use std::time::Instant;
use tracing::{debug, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - FFI_GUARD_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("FFI_GUARD_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        // JSON output for production/parsing
        let _ = registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init();
    } else {
        // Human-readable output for development
        let _ = registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init();
    }
}

/// Generate a unique trace ID for correlation
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span for decode tracing with structured fields
pub struct DecodeSpan {
    _span: tracing::Span,
    start: Instant,
    trace_id: String,
}

impl DecodeSpan {
    pub fn new(handle_id: Option<HandleId>) -> Self {
        let trace_id = generate_trace_id();

        let span = span!(
            Level::DEBUG,
            "decode",
            trace_id = %trace_id,
            handle_id = handle_id,
            bytes = tracing::field::Empty,
            duration_us = tracing::field::Empty,
            result = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        let _entered = span.enter();
        debug!(trace_id = %trace_id, "decode started");
        drop(_entered);

        Self {
            _span: span,
            start: Instant::now(),
            trace_id,
        }
    }

    /// Get the trace ID for this decode
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Record a successful decode
    pub fn record_success(&self, bytes: usize) {
        self._span.record("bytes", bytes);
        self._span.record("result", "success");
    }

    /// Record a decode failure
    pub fn record_error(&self, error: &str) {
        self._span.record("error", error);
        self._span.record("result", "error");
    }

    /// Elapsed time since the span was opened
    pub fn elapsed_micros(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

impl Drop for DecodeSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self._span.enter();

        self._span.record("duration_us", duration.as_micros() as u64);
        if duration.as_micros() > SLOW_DECODE_THRESHOLD_US {
            // A slow "read" means the native side handed us a runaway buffer
            warn!(
                trace_id = %self.trace_id,
                duration_us = duration.as_micros() as u64,
                slow = true,
                "slow decode detected"
            );
        } else {
            debug!(
                trace_id = %self.trace_id,
                duration_us = duration.as_micros() as u64,
                "decode completed"
            );
        }
    }
}
