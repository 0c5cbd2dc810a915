//! Append-only analytics event sink
//!
//! Records product events (signups, charity reviews, donations) without ever
//! blocking the action that produced them: emission is fire-and-forget and
//! failures are logged, not surfaced.

mod event_sink;

pub use event_sink::{track, EventSink, PgEventSink};

#[cfg(test)]
pub use event_sink::RecordingEventSink;
