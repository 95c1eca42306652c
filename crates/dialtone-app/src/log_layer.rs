//! Forward tracing events into the transcript.
//!
//! [`EventLogLayer`] is a `tracing_subscriber::Layer` that turns log records
//! into [`crate::Event::Log`] events, so status and error lines written with
//! `tracing` show up in the chat transcript.
//!
//! ```ignore
//! use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
//!
//! let (runtime, events) = Runtime::new(RuntimeConfig::default(), renderer);
//! tracing_subscriber::registry().with(EventLogLayer::new(events.clone())).init();
//! ```

use std::fmt;

use tracing::{
    Level, Subscriber,
    field::{Field, Visit},
};
use tracing_subscriber::{Layer, layer::Context};

use crate::{EventSender, LogLevel, runtime};

/// Layer that forwards `INFO`, `WARN` and `ERROR` records to the event loop.
///
/// `WARN` and `ERROR` become error lines; `DEBUG` and `TRACE` are dropped.
/// Records emitted by the event loop itself are never forwarded.
#[derive(Debug, Clone)]
pub struct EventLogLayer {
    events: EventSender,
}

impl EventLogLayer {
    /// Create a layer that sends to `events`.
    pub fn new(events: EventSender) -> Self {
        Self { events }
    }
}

/// Transcript level for a tracing level. `None` if not forwarded.
fn transcript_level(level: Level) -> Option<LogLevel> {
    if level == Level::ERROR || level == Level::WARN {
        Some(LogLevel::Error)
    } else if level == Level::INFO {
        Some(LogLevel::Info)
    } else {
        None
    }
}

/// Extracts the `message` field of a record.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        }
    }
}

impl<S> Layer<S> for EventLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target().starts_with(runtime::TARGET) {
            return;
        }
        let Some(level) = transcript_level(*metadata.level()) else {
            return;
        };

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        if let Some(text) = visitor.message {
            // Loop already gone: nothing left to show the line.
            let _ = self.events.log(level, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_mapping() {
        assert_eq!(transcript_level(Level::ERROR), Some(LogLevel::Error));
        assert_eq!(transcript_level(Level::WARN), Some(LogLevel::Error));
        assert_eq!(transcript_level(Level::INFO), Some(LogLevel::Info));
        assert_eq!(transcript_level(Level::DEBUG), None);
        assert_eq!(transcript_level(Level::TRACE), None);
    }
}
