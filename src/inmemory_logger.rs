// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Logger
//!
//! This module provides an in-memory logger for testing and debugging purposes.
//! The `InMemoryLogger` captures log records in memory rather than writing them to stderr or
//! other outputs, making it ideal for:
//!
//! - Unit testing code wrapped by an [`Interceptor`](crate::Interceptor)
//! - Asserting on the severity and fields of each emitted record
//! - Programmatically examining log output
//!
//! ## Architecture
//!
//! The logger keeps whole [`LogRecord`]s behind a `Mutex`, so records from many threads can
//! be captured concurrently and inspected later with their severity and fields intact.

use crate::log_record::LogRecord;
use crate::logger::Logger;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// An in-memory logger that stores log records in a `Vec<LogRecord>`.
///
/// # Thread Safety
///
/// The `InMemoryLogger` is thread-safe and can be shared across multiple threads using
/// `Arc`. All operations on the internal buffer are protected by a mutex; a poisoned mutex
/// is recovered rather than propagated, since a panic elsewhere must not stop logging.
///
/// # Example
///
/// ```rust
/// use callwise::{Config, InMemoryLogger, Interceptor, Invocation, Severity};
/// use std::sync::Arc;
///
/// let logger = Arc::new(InMemoryLogger::new());
/// let interceptor = Interceptor::new(Config::new(true, Severity::Info), logger.clone());
///
/// interceptor.before(&Invocation::new("load_user"));
///
/// let records = logger.drain_records();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].severity(), Severity::Info);
/// assert!(logger.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLogger {
    logs: Mutex<Vec<LogRecord>>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// Design decisions for InMemoryLogger trait implementations:
//
// - Debug: Derived for diagnostic purposes and required by Logger trait
// - Default: Derived, an empty buffer
// - Clone: NOT implemented - share it with Arc instead, so every clone sees the same records
// - PartialEq/Eq: NOT implemented - equality semantics unclear for loggers
// - Send/Sync: Automatically implemented due to Mutex usage (required for Logger trait)

impl InMemoryLogger {
    /// Creates a new `InMemoryLogger` with an empty buffer.
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        self.logs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drains all records into a single string, clearing the internal buffer.
    ///
    /// Each record is rendered with its `Display` form, one per line.
    ///
    /// ```rust
    /// use callwise::{InMemoryLogger, LogRecord, Logger, Severity};
    ///
    /// let logger = InMemoryLogger::new();
    /// let mut record = LogRecord::new(Severity::Error);
    /// record.log("boom");
    /// logger.finish_log_record(record);
    ///
    /// assert_eq!(logger.drain_logs(), "[ERROR] boom");
    /// assert_eq!(logger.drain_logs(), "");
    /// ```
    pub fn drain_logs(&self) -> String {
        self.drain_records()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Drains all records, clearing the internal buffer.
    pub fn drain_records(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.lock())
    }

    /// A copy of the captured records, leaving the buffer as it is.
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Logger for InMemoryLogger {
    fn finish_log_record(&self, record: LogRecord) {
        self.lock().push(record);
    }
}
