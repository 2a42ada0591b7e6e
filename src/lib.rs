//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# callwise

callwise wraps function calls with logging advice: a record before the call, after it
returns, after it fails, or all of it at once with the elapsed time.  The wrapped function
doesn't know it is being watched.

# The pieces

* [`Config`] decides *whether* anything is logged: an enabled flag and a configured
  [`Severity`].  It is built once, usually from [`Settings`], and never changes.
* [`should_log`] is the gate.  By default a record is emitted only when its severity is
  *equal* to the configured level (see [`GateMode`]).
* [`Invocation`] is the snapshot of one call: its name, signature, rendered arguments and
  start time.
* [`Interceptor`] is the advice dispatcher, with one entry point per advice kind:
  [`before`](Interceptor::before), [`after_success`](Interceptor::after_success),
  [`after_exception`](Interceptor::after_exception) and [`around`](Interceptor::around).
* A [`Logger`] receives the resulting [`LogRecord`]s.  [`StdErrorLogger`] writes to stderr,
  [`TracingLogger`] forwards to `tracing`, and [`InMemoryLogger`] keeps them for tests.

# Gating

| configured level | DEBUG record | INFO record | ERROR record |
|------------------|--------------|-------------|--------------|
| DEBUG            | emitted      | suppressed  | suppressed   |
| INFO             | suppressed   | emitted     | suppressed   |
| ERROR            | suppressed   | suppressed  | emitted      |

This exact-match table is the compatible default.  [`GateMode::Threshold`] switches to the
usual at-or-above comparison.  One exception: when `around` sees a failure it always emits
an ERROR record, as long as the configuration is enabled.

# Registering calls

Call the advice directly, wrap a function with [`Interceptor::wrap`], or annotate it:

```rust
use callwise::{Config, InMemoryLogger, Interceptor, Severity};
use std::sync::Arc;

struct Accounts {
    interceptor: Interceptor,
}

impl Accounts {
    #[callwise::intercept(with = self.interceptor, advice(before, around))]
    fn withdraw(&self, account: &str, amount: u64) -> Result<u64, String> {
        if amount > 100 {
            return Err(format!("insufficient funds in {}", account));
        }
        Ok(100 - amount)
    }
}

let logger = Arc::new(InMemoryLogger::new());
let accounts = Accounts {
    interceptor: Interceptor::new(Config::new(true, Severity::Info), logger.clone()),
};
assert_eq!(accounts.withdraw("alice", 30), Ok(70));
assert!(accounts.withdraw("bob", 300).is_err());

let log = logger.drain_logs();
assert!(log.contains("withdraw(..) args: [\"alice\", 30]"));
assert!(log.contains("[ERROR]"));
```

# Rendering

Arguments and results are rendered with `Debug`, error messages with `Display`.  Rendering
is bounded and never panics; see [`render`](mod@render).  Nothing is redacted.
*/

mod config;
mod inmemory_logger;
mod interceptor;
mod invocation;
mod log_record;
mod logger;
mod policy;
pub mod render;
mod severity;
mod stderror_logger;
mod sys;
mod tracing_logger;

pub use config::{Config, ConfigFallback, ENABLED_VAR, GateMode, LEVEL_VAR, Settings};
pub use inmemory_logger::InMemoryLogger;
pub use interceptor::{Intercepted, Interceptor};
pub use invocation::{Invocation, Outcome};
pub use log_record::LogRecord;
pub use logger::Logger;
pub use policy::should_log;
pub use render::{render, render_args, render_message};
pub use severity::{ParseSeverityError, Severity};
pub use stderror_logger::StdErrorLogger;
pub use tracing_logger::TracingLogger;

pub use callwise_proc::intercept;

extern crate self as callwise;

pub use sys::{Duration, Instant};
