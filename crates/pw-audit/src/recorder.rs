// recorder.rs — The recording seam between workflows and audit storage.
//
// Workflows record through this trait so the storage format stays a host
// decision. Two implementations ship: the JSONL hash-chained log, and an
// in-memory recorder for tests and hosts that persist audit data elsewhere.

use std::path::Path;
use std::sync::Mutex;

use crate::entry::AuditEntry;
use crate::error::AuditError;
use crate::log::AuditLog;

/// Trait for recording audit entries.
pub trait AuditRecorder: Send {
    /// Record one entry. Unlike notification sinks, failures here matter —
    /// the caller decides whether to surface them.
    fn record(&self, entry: AuditEntry) -> Result<(), AuditError>;
}

/// Records entries into a hash-chained JSONL [`AuditLog`].
pub struct JsonlRecorder {
    log: Mutex<AuditLog>,
}

impl JsonlRecorder {
    /// Open (or create) the backing log file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        Ok(Self {
            log: Mutex::new(AuditLog::open(path)?),
        })
    }
}

impl AuditRecorder for JsonlRecorder {
    fn record(&self, mut entry: AuditEntry) -> Result<(), AuditError> {
        let mut log = self.log.lock().map_err(|_| AuditError::Poisoned)?;
        log.append(&mut entry)
    }
}

/// Collects entries in memory. Used by tests and by hosts that forward
/// audit data to their own store.
#[derive(Default)]
pub struct MemoryRecorder {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, oldest first.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl AuditRecorder for MemoryRecorder {
    fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        let mut entries = self.entries.lock().map_err(|_| AuditError::Poisoned)?;
        entries.push(entry);
        Ok(())
    }
}
