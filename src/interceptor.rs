// SPDX-License-Identifier: MIT OR Apache-2.0

//! The advice dispatcher.
//!
//! An [`Interceptor`] is handed an [`Invocation`] at fixed points of a call's lifecycle and
//! decides whether, and at which [`Severity`], to emit a record for it:
//!
//! | Advice                                | When                              | Severity                 |
//! |---------------------------------------|-----------------------------------|--------------------------|
//! | [`before`](Interceptor::before)       | before the call                   | DEBUG, else INFO, gated  |
//! | [`after_success`](Interceptor::after_success) | after an `Ok`             | INFO, gated              |
//! | [`after_exception`](Interceptor::after_exception) | after an `Err`        | ERROR, gated             |
//! | [`around`](Interceptor::around)       | brackets the call                 | DEBUG, else INFO, gated; ERROR on failure whenever enabled |
//!
//! "Gated" means the record passes [`should_log`].  Advice never changes the call's result:
//! `around` returns exactly what the wrapped call returned, and a panic in the wrapped call
//! continues unwinding with its original payload once it has been logged.
//!
//! Nothing here is shared mutably between calls.  The configuration is read-only and the
//! logger is the only shared collaborator, so one interceptor can serve any number of
//! threads.

use crate::config::{Config, Settings};
use crate::invocation::{Invocation, Outcome};
use crate::log_record::LogRecord;
use crate::logger::Logger;
use crate::policy::{should_log, tracing_severity};
use crate::render::{render, render_message};
use crate::severity::Severity;
use crate::sys::Instant;
use std::any::Any;
use std::fmt::{Debug, Display};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/**
Emits records around intercepted calls.

Cheap to clone; clones share the configuration and the logger.

```
use callwise::{Config, InMemoryLogger, Interceptor, Invocation, Severity};
use std::sync::Arc;

let logger = Arc::new(InMemoryLogger::new());
let interceptor = Interceptor::new(Config::new(true, Severity::Info), logger.clone());

let invocation = Invocation::new("divide").with_args(&[&10, &2]);
let quotient: Result<i32, String> = interceptor.around(&invocation, || Ok(10 / 2));
assert_eq!(quotient, Ok(5));

let log = logger.drain_logs();
assert!(log.contains("calling divide(..)"));
assert!(log.contains("args: [10, 2]"));
assert!(log.contains("took"));
```
*/
#[derive(Debug, Clone)]
pub struct Interceptor {
    config: Arc<Config>,
    logger: Arc<dyn Logger>,
}

impl Interceptor {
    pub fn new(config: Config, logger: Arc<dyn Logger>) -> Self {
        Self {
            config: Arc::new(config),
            logger,
        }
    }

    /**
    Resolves `settings` and builds an interceptor from them.

    Two records may be emitted here, both regardless of the configured level:

    * an ERROR record when the configured level was not recognized and the default was used;
    * when enabled, a record at the configured level announcing it (`INFO level set`).
    */
    pub fn from_settings(settings: &Settings, logger: Arc<dyn Logger>) -> Self {
        let (config, fallback) = settings.resolve();
        let interceptor = Self::new(config, logger);
        if let Some(fallback) = fallback {
            let mut record = LogRecord::new(Severity::Error);
            record.log_owned(format!(
                "unrecognized log level '{}', falling back to {}",
                fallback.rejected(),
                fallback.level()
            ));
            record.field("rejected", fallback.rejected());
            interceptor.emit(record);
        }
        if config.is_enabled() {
            let mut record = LogRecord::new(config.minimum_level());
            record.log_owned(format!("{} level set", config.minimum_level()));
            interceptor.emit(record);
        }
        interceptor
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Hands `record` to the logger.  A panicking logger loses the record, nothing more.
    fn emit(&self, record: LogRecord) {
        let logger = &self.logger;
        let _ = panic::catch_unwind(AssertUnwindSafe(|| logger.finish_log_record(record)));
    }

    /// The severity of `invocation`'s tracing records, if they pass the gate at all.
    ///
    /// Tracing records are DEBUG or INFO only, so an ERROR pin is ignored.
    fn call_severity(&self, invocation: &Invocation) -> Option<Severity> {
        match invocation.severity() {
            Some(severity) if severity < Severity::Error => {
                should_log(&self.config, severity).then_some(severity)
            }
            _ => tracing_severity(&self.config),
        }
    }

    /// Before-advice: names the method about to be called.
    pub fn before(&self, invocation: &Invocation) {
        let Some(severity) = self.call_severity(invocation) else {
            return;
        };
        let mut record = LogRecord::new(severity);
        record.log("entering ");
        record.log(invocation.name());
        record.field("advice", "before");
        record.field("method", invocation.name());
        self.emit(record);
    }

    /// After-exception advice: reports the error message of a failed call.
    ///
    /// Observational only; the caller still owns and propagates `error`.
    pub fn after_exception(&self, invocation: &Invocation, error: &dyn Display) {
        if !should_log(&self.config, Severity::Error) {
            return;
        }
        let message = render_message(error);
        let mut record = LogRecord::new(Severity::Error);
        record.log_owned(format!("{} failed: {}", invocation.name(), message));
        record.field("advice", "after_exception");
        record.field("method", invocation.name());
        record.field("error", message);
        self.emit(record);
    }

    /// After-success advice: reports the value a call returned.
    pub fn after_success(&self, invocation: &Invocation, result: &dyn Debug) {
        if !should_log(&self.config, Severity::Info) {
            return;
        }
        let rendered = render(result);
        let mut record = LogRecord::new(Severity::Info);
        record.log_owned(format!(
            "{} returned {}",
            invocation.short_signature(),
            rendered
        ));
        record.field("advice", "after_success");
        record.field("signature", invocation.short_signature());
        record.field("result", rendered);
        self.emit(record);
    }

    /**
    Around-advice: runs `proceed` exactly once and brackets it with records.

    When disabled, `proceed` runs with no logging at all.  Otherwise:

    1. a `calling <signature>` record and, if there are arguments, an `args` record, at the
       call-tracing severity (DEBUG, else INFO, when either passes the gate);
    2. on `Ok`, a record with the milliseconds `proceed` took, at the same severity;
    3. on `Err`, an ERROR record with the error message, whatever the configured level;
    4. on panic, an ERROR record with the panic message, then the panic resumes.

    The returned outcome is the one `proceed` produced, unchanged.
    */
    pub fn around<T, E, F>(&self, invocation: &Invocation, proceed: F) -> Outcome<T, E>
    where
        E: Display,
        F: FnOnce() -> Outcome<T, E>,
    {
        if !self.config.is_enabled() {
            return proceed();
        }
        let severity = self.call_severity(invocation);
        let signature = invocation.short_signature();
        if let Some(severity) = severity {
            let mut record = LogRecord::new(severity);
            record.log("calling ");
            record.log(signature);
            record.field("advice", "around");
            record.field("signature", signature);
            self.emit(record);

            if let Some(args) = invocation.rendered_args() {
                let mut record = LogRecord::new(severity);
                record.log_owned(format!("{} args: {}", signature, args));
                record.field("advice", "around");
                record.field("signature", signature);
                record.field("args", args);
                self.emit(record);
            }
        }

        let started_at = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(proceed));
        let elapsed = started_at.elapsed();
        match outcome {
            Ok(Ok(value)) => {
                if let Some(severity) = severity {
                    let millis = elapsed.as_millis();
                    let mut record = LogRecord::new(severity);
                    record.log_owned(format!("{} took {} ms", signature, millis));
                    record.field("advice", "around");
                    record.field("signature", signature);
                    record.field("elapsed_ms", millis.to_string());
                    self.emit(record);
                }
                Ok(value)
            }
            Ok(Err(error)) => {
                let message = render_message(&error);
                let mut record = LogRecord::new(Severity::Error);
                record.log_owned(format!("{} failed: {}", signature, message));
                record.field("advice", "around");
                record.field("signature", signature);
                record.field("error", message);
                self.emit(record);
                Err(error)
            }
            Err(payload) => {
                let message = render_message(&panic_message(payload.as_ref()));
                let mut record = LogRecord::new(Severity::Error);
                record.log_owned(format!("{} panicked: {}", signature, message));
                record.field("advice", "around");
                record.field("signature", signature);
                record.field("panic", message);
                self.emit(record);
                panic::resume_unwind(payload)
            }
        }
    }

    /**
    Registers `f` for around-advice under `name`.

    Each call of the returned [`Intercepted`] captures its argument into a fresh
    [`Invocation`] and runs `f` through [`Interceptor::around`].  Use a tuple to pass
    several arguments.  The tuple is captured as a single argument, so the `args` record
    reads `[(2, 3)]` rather than `[2, 3]`; `#[intercept]` lists parameters one by one.

    ```
    use callwise::{Config, InMemoryLogger, Interceptor, Severity};
    use std::sync::Arc;

    let logger = Arc::new(InMemoryLogger::new());
    let interceptor = Interceptor::new(Config::new(true, Severity::Info), logger.clone());
    let add = interceptor.wrap("add", |(a, b): (i32, i32)| Ok::<_, String>(a + b));

    assert_eq!(add.call((2, 3)), Ok(5));
    assert!(logger.drain_logs().contains("add(..) args: [(2, 3)]"));
    ```
    */
    pub fn wrap<F>(&self, name: &str, f: F) -> Intercepted<F> {
        Intercepted {
            interceptor: self.clone(),
            name: name.to_string(),
            f,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "<non-string panic payload>"
    }
}

/// A function registered with [`Interceptor::wrap`].
#[derive(Debug, Clone)]
pub struct Intercepted<F> {
    interceptor: Interceptor,
    name: String,
    f: F,
}

impl<F> Intercepted<F> {
    /// Calls the wrapped function through around-advice.
    pub fn call<A, T, E>(&self, args: A) -> Outcome<T, E>
    where
        A: Debug,
        E: Display,
        F: Fn(A) -> Outcome<T, E>,
    {
        let invocation = Invocation::new(self.name.as_str()).with_args(&[&args]);
        self.interceptor.around(&invocation, || (self.f)(args))
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/*
Boilerplate notes.

Interceptor
- Clone: yes, shares the Arc'd config and logger.
- PartialEq/Hash: no, loggers have no equality.
- Default: no, a logger has to be chosen.
- Send/Sync: automatic, Logger requires both.
*/
