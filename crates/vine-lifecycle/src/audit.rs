// audit.rs — Transition audit records and sinks.
//
// Every committed transition produces one TransitionRecord. Sinks decide
// what to do with it: append to a JSONL file, hold in memory for tests,
// forward to an event bus. Sink failures never roll back a state change.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vine_model::ActionStatus;

use crate::error::LifecycleError;

/// One committed transition of a share action's status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransitionRecord {
    /// The transaction whose share action transitioned.
    pub transaction_id: String,
    pub from: ActionStatus,
    pub to: ActionStatus,
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    pub fn new(transaction_id: impl Into<String>, from: ActionStatus, to: ActionStatus) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            from,
            to,
            timestamp: Utc::now(),
        }
    }
}

/// Trait for receiving transition records.
pub trait AuditSink: Send + Sync {
    fn record(&self, record: &TransitionRecord) -> Result<(), LifecycleError>;
}

// Shared sinks: tests and callers that keep a handle for inspection
// hand the lifecycle an Arc of the same sink.
impl<T: AuditSink + ?Sized> AuditSink for std::sync::Arc<T> {
    fn record(&self, record: &TransitionRecord) -> Result<(), LifecycleError> {
        (**self).record(record)
    }
}

/// Appends records as JSONL to a file.
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl AuditSink for JsonlSink {
    fn record(&self, record: &TransitionRecord) -> Result<(), LifecycleError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| LifecycleError::AuditSink {
                reason: format!("{}: {}", parent.display(), source),
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| LifecycleError::AuditSink {
                reason: format!("{}: {}", self.path.display(), source),
            })?;

        let json = serde_json::to_string(record).map_err(|source| LifecycleError::AuditSink {
            reason: source.to_string(),
        })?;
        writeln!(file, "{}", json).map_err(|source| LifecycleError::AuditSink {
            reason: format!("{}: {}", self.path.display(), source),
        })?;

        Ok(())
    }
}

/// Holds records in memory. Test double.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<TransitionRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<TransitionRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl AuditSink for MemorySink {
    fn record(&self, record: &TransitionRecord) -> Result<(), LifecycleError> {
        self.records
            .lock()
            .map_err(|_| LifecycleError::AuditSink {
                reason: "sink mutex poisoned".to_string(),
            })?
            .push(record.clone());
        Ok(())
    }
}
