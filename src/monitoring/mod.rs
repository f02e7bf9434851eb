/*!
 * Monitoring Module
 * Observability for the guard lifecycle: events, streaming, tracing
 */

pub mod bridge;
pub mod collector;
pub mod events;
pub mod stream;
pub mod tracer;

pub use collector::Collector;
pub use events::{Category, Event, EventFilter, Payload, Severity};
pub use stream::{EventStream, StreamStats, Subscriber};
pub use tracer::{init_tracing, DecodeSpan};
