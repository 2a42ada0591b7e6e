// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log record type for the callwise interceptor.
//!
//! This module defines [`LogRecord`], the unit handed to a [`Logger`](crate::Logger). A
//! record carries exactly one [`Severity`], a message accumulated in parts, and a list of
//! structured fields.
//!
//! # Usage Pattern
//!
//! 1. Create a new `LogRecord` with a severity
//! 2. Progressively add message parts using `log()` or `log_owned()`
//! 3. Attach structured fields with `field()`
//! 4. Submit the complete record via `Logger::finish_log_record()`
//!
//! # Example
//!
//! ```rust
//! use callwise::{LogRecord, Severity};
//!
//! let mut record = LogRecord::new(Severity::Info);
//! record.log("calling ");
//! record.log_owned(format!("{}(..)", "transfer"));
//! record.field("advice", "around");
//!
//! assert_eq!(record.message(), "calling transfer(..)");
//! assert_eq!(record.field_value("advice"), Some("around"));
//! assert_eq!(record.to_string(), "[INFO] calling transfer(..) advice=around");
//! ```

use crate::severity::Severity;
use std::fmt::{Debug, Display};

/**
A log record.

Message parts are stored separately and only joined when the record is displayed, so
building a record never reallocates one growing string.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogRecord {
    pub(crate) parts: Vec<String>,
    fields: Vec<(&'static str, String)>,
    severity: Severity,
}

impl LogRecord {
    pub fn new(severity: Severity) -> Self {
        Self {
            parts: Vec::new(),
            fields: Vec::new(),
            severity,
        }
    }

    /**
    Append the message to the record.

    This is called in the case that a message is not already owned.
    */
    pub fn log(&mut self, message: &str) {
        self.parts.push(message.to_string());
    }

    /**
    Append the message to the record, taking ownership of the message.
    */
    pub fn log_owned(&mut self, message: String) {
        self.parts.push(message);
    }

    /// Attach a structured field.  Fields keep insertion order.
    pub fn field(&mut self, key: &'static str, value: impl Into<String>) {
        self.fields.push((key, value.into()));
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The message parts, joined.
    pub fn message(&self) -> String {
        self.parts.concat()
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    /// The value of the first field named `key`.
    pub fn field_value(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] ", self.severity)?;
        for part in &self.parts {
            write!(f, "{}", part)?;
        }
        for (key, value) in &self.fields {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}
/*
Boilerplate notes for LogRecord:

IMPLEMENTED:
- Debug: Derived - essential for diagnostics
- Clone: Derived - a record may be forwarded to several sinks
- PartialEq/Eq/Hash: Derived - lets tests compare captured records
- Display: Implemented - one line, severity first, fields last

NOT IMPLEMENTED:
- Default: every record needs a deliberately chosen severity
- Ord/PartialOrd: No meaningful ordering for log records
- Copy: heap-allocated parts
*/
