// SPDX-License-Identifier: MIT OR Apache-2.0

//! A logger that forwards records to the [`tracing`] facade.
//!
//! Applications that already install a `tracing` subscriber can hand a [`TracingLogger`] to
//! their [`Interceptor`](crate::Interceptor) and get interceptor records wherever their other
//! events go.  Each record becomes one event with target `callwise`:
//!
//! | Severity | tracing level |
//! |----------|---------------|
//! | DEBUG    | `DEBUG`       |
//! | INFO     | `INFO`        |
//! | ERROR    | `ERROR`       |
//!
//! The record's structured fields are attached as a single `fields` value, since `tracing`
//! field names must be known at compile time.

use crate::log_record::LogRecord;
use crate::logger::Logger;
use crate::severity::Severity;

/// Forwards records to the current `tracing` dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TracingLogger {}

impl TracingLogger {
    pub const fn new() -> Self {
        Self {}
    }
}

fn joined_fields(record: &LogRecord) -> String {
    record
        .fields()
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Logger for TracingLogger {
    fn finish_log_record(&self, record: LogRecord) {
        let message = record.message();
        let fields = joined_fields(&record);
        match record.severity() {
            Severity::Debug => tracing::debug!(target: "callwise", fields = %fields, "{}", message),
            Severity::Info => tracing::info!(target: "callwise", fields = %fields, "{}", message),
            Severity::Error => tracing::error!(target: "callwise", fields = %fields, "{}", message),
        }
    }
}
