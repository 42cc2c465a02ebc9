//! # pw-audit
//!
//! Append-only audit trail for the privileged operations of the Pitchworks
//! lifecycle engine: early contest closures, reopenings, and payout hold
//! bypasses.
//!
//! Entries are JSONL — one JSON object per line — with each entry linked to
//! the previous one by a SHA-256 hash, so insertion, deletion, or edits
//! anywhere in the file break chain verification.
//!
//! ## Key components
//!
//! - [`AuditEntry`] / [`AuditAction`] — what gets recorded
//! - [`AuditRecorder`] — trait the workflows record through
//! - [`AuditLog`] — the JSONL + hash chain file store
//! - [`JsonlRecorder`] / [`MemoryRecorder`] — recorder implementations

pub mod entry;
pub mod error;
pub mod hasher;
pub mod log;
pub mod recorder;

pub use entry::{AuditAction, AuditEntry};
pub use error::AuditError;
pub use log::AuditLog;
pub use recorder::{AuditRecorder, JsonlRecorder, MemoryRecorder};
