// dispatch.rs — Notification sinks and best-effort fan-out.
//
// Dispatch sits outside every workflow's atomicity boundary: a flaky
// notification channel must never abort a financially significant state
// change. The dispatcher therefore swallows sink errors after logging them,
// and hands the caller a per-sink outcome list instead of a Result.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::EventError;
use crate::event::MarketEvent;

/// Trait for receiving market events.
///
/// Implementations decide what to do with each event: append to a log file,
/// send an email, call a webhook. Errors are reported back to the dispatcher,
/// which logs them and carries on.
pub trait NotificationSink: Send {
    /// A short name for this sink, used in logs and dispatch outcomes.
    fn name(&self) -> &str;

    /// Handle an event. Errors are logged but don't stop the system.
    fn send(&self, event: &MarketEvent) -> Result<(), EventError>;
}

/// What happened when one sink received one event.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    /// The sink's name.
    pub sink: String,
    /// The failure message, if delivery failed.
    pub error: Option<String>,
}

impl DispatchOutcome {
    pub fn delivered(&self) -> bool {
        self.error.is_none()
    }
}

/// Dispatches events to multiple sinks.
///
/// A failing sink never prevents the remaining sinks from receiving the
/// event, and never surfaces as an error to the emitting workflow.
#[derive(Default)]
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    /// Create a new dispatcher with no sinks.
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Add a notification sink.
    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Dispatch an event to all sinks, returning one outcome per sink.
    pub fn dispatch(&self, event: &MarketEvent) -> Vec<DispatchOutcome> {
        let mut outcomes = Vec::with_capacity(self.sinks.len());
        for sink in &self.sinks {
            let error = match sink.send(event) {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!(
                        sink = sink.name(),
                        event_type = event.event_type(),
                        "notification sink error: {e}"
                    );
                    Some(e.to_string())
                }
            };
            outcomes.push(DispatchOutcome {
                sink: sink.name().to_string(),
                error,
            });
        }
        outcomes
    }
}

/// Logs events as JSONL to a file (always-on sink).
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl NotificationSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    fn send(&self, event: &MarketEvent) -> Result<(), EventError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| EventError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| EventError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json).map_err(|source| EventError::Io {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }
}
