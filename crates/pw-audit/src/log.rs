// log.rs — Append-only JSONL audit log.
//
// One JSON object per line, append-friendly, greppable. Each entry links to
// the previous one via `previous_hash`; verify_chain detects any insertion,
// deletion, or edit anywhere in the file.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::entry::AuditEntry;
use crate::error::AuditError;
use crate::hasher;

/// An append-only audit log backed by a JSONL file.
pub struct AuditLog {
    writer: BufWriter<File>,
    path: PathBuf,
    /// Hash of the last entry written — becomes `previous_hash` on the next.
    last_hash: Option<String>,
}

impl AuditLog {
    /// Open (or create) an audit log at the given path.
    ///
    /// If the file already exists, the last line is re-hashed so new entries
    /// continue the chain instead of restarting it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref().to_path_buf();

        let last_hash = if path.exists() {
            Self::read_last_hash(&path)?
        } else {
            None
        };

        // Append mode only — existing lines are never rewritten.
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| AuditError::OpenFailed {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
            last_hash,
        })
    }

    /// Append an entry, linking it to the previous one and flushing to disk.
    pub fn append(&mut self, entry: &mut AuditEntry) -> Result<(), AuditError> {
        entry.previous_hash = self.last_hash.clone();

        let json = serde_json::to_string(entry)?;
        self.last_hash = Some(hasher::hash_str(&json));

        writeln!(self.writer, "{}", json)?;
        self.writer.flush()?;

        Ok(())
    }

    /// Read all entries from a log file, oldest first. Blank lines are
    /// skipped.
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<AuditEntry>, AuditError> {
        let file = File::open(path.as_ref()).map_err(|source| AuditError::OpenFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            entries.push(serde_json::from_str(&line)?);
        }

        Ok(entries)
    }

    /// Verify the hash chain of a log file.
    ///
    /// Returns `Ok(true)` when every entry's `previous_hash` matches the
    /// hash of the preceding raw line, or `IntegrityViolation` at the first
    /// broken link.
    pub fn verify_chain(path: impl AsRef<Path>) -> Result<bool, AuditError> {
        let file = File::open(path.as_ref()).map_err(|source| AuditError::OpenFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut previous_hash: Option<String> = None;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line)?;

            if entry.previous_hash != previous_hash {
                return Err(AuditError::IntegrityViolation {
                    line: line_num + 1,
                    expected: previous_hash.unwrap_or_else(|| "None".to_string()),
                    actual: entry.previous_hash.unwrap_or_else(|| "None".to_string()),
                });
            }

            // Hash the raw line, not a re-serialization — field order must
            // not affect the chain.
            previous_hash = Some(hasher::hash_str(&line));
        }

        Ok(true)
    }

    /// Return the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the hash of the last entry in an existing log file.
    fn read_last_hash(path: &Path) -> Result<Option<String>, AuditError> {
        let file = File::open(path).map_err(|source| AuditError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut last_line: Option<String> = None;

        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                last_line = Some(line);
            }
        }

        Ok(last_line.map(|line| hasher::hash_str(&line)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::AuditAction;
    use chrono::Utc;
    use tempfile::tempdir;
    use uuid::Uuid;

    fn entry(action: AuditAction) -> AuditEntry {
        AuditEntry::new(Uuid::new_v4(), action, Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn append_and_read_round_trip() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.jsonl");

        {
            let mut log = AuditLog::open(&log_path).unwrap();
            let mut e1 = entry(AuditAction::EarlyClosure);
            let mut e2 = entry(AuditAction::SubmissionsReopened);
            log.append(&mut e1).unwrap();
            log.append(&mut e2).unwrap();
        }

        let entries = AuditLog::read_all(&log_path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, AuditAction::EarlyClosure);
        assert_eq!(entries[1].action, AuditAction::SubmissionsReopened);
    }

    #[test]
    fn first_entry_has_no_previous_hash() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.jsonl");

        let mut log = AuditLog::open(&log_path).unwrap();
        let mut e = entry(AuditAction::HoldBypass);
        log.append(&mut e).unwrap();

        assert!(e.previous_hash.is_none());
    }

    #[test]
    fn hash_chain_is_valid() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.jsonl");

        {
            let mut log = AuditLog::open(&log_path).unwrap();
            for _ in 0..5 {
                let mut e = entry(AuditAction::HoldBypass);
                log.append(&mut e).unwrap();
            }
        }

        assert!(AuditLog::verify_chain(&log_path).unwrap());
    }

    #[test]
    fn chain_survives_reopen() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.jsonl");

        {
            let mut log = AuditLog::open(&log_path).unwrap();
            let mut e = entry(AuditAction::EarlyClosure);
            log.append(&mut e).unwrap();
        }
        {
            let mut log = AuditLog::open(&log_path).unwrap();
            let mut e = entry(AuditAction::SubmissionsReopened);
            log.append(&mut e).unwrap();
        }

        assert!(AuditLog::verify_chain(&log_path).unwrap());
        let entries = AuditLog::read_all(&log_path).unwrap();
        assert!(entries[1].previous_hash.is_some());
    }

    #[test]
    fn tampered_line_breaks_the_chain() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.jsonl");

        {
            let mut log = AuditLog::open(&log_path).unwrap();
            for _ in 0..3 {
                let mut e = entry(AuditAction::HoldBypass);
                log.append(&mut e).unwrap();
            }
        }

        // Flip the actor on the middle line.
        let content = std::fs::read_to_string(&log_path).unwrap();
        let mut lines: Vec<String> = content.lines().map(String::from).collect();
        lines[1] = lines[1].replace(
            &AuditLog::read_all(&log_path).unwrap()[1].actor_id.to_string(),
            &Uuid::new_v4().to_string(),
        );
        std::fs::write(&log_path, lines.join("\n") + "\n").unwrap();

        let result = AuditLog::verify_chain(&log_path);
        assert!(matches!(
            result,
            Err(AuditError::IntegrityViolation { line: 3, .. })
        ));
    }
}
