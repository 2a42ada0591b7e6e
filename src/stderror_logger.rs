// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::log_record::LogRecord;
use crate::logger::Logger;

/**
A reference logger that logs to stderr, one line per record.

Write errors are dropped: if stderr is gone there is nowhere left to report them.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StdErrorLogger {}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// Design decisions for StdErrorLogger trait implementations:
//
// - Copy/Clone/PartialEq/Eq/Hash: Derived - all instances are equivalent (zero-sized)
// - Default: Derived - provides convenient zero-argument constructor
// - Display: NOT implemented - no meaningful string representation for stderr logger
// - Send/Sync: Automatically implemented - zero-sized struct is always thread-safe

impl StdErrorLogger {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Logger for StdErrorLogger {
    fn finish_log_record(&self, record: LogRecord) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::io::Write;
            let line = format!("{}\n", record);
            let mut lock = std::io::stderr().lock();
            let _ = lock.write_all(line.as_bytes());
        }
        #[cfg(target_arch = "wasm32")]
        {
            use crate::Severity;
            let msg = record.to_string();
            match record.severity() {
                Severity::Debug => {
                    web_sys::console::debug_1(&msg.into());
                }
                Severity::Info => {
                    web_sys::console::info_1(&msg.into());
                }
                Severity::Error => {
                    web_sys::console::error_1(&msg.into());
                }
            }
        }
    }
}
