// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-call snapshot threaded through every advice kind.

use crate::render::{listing, render};
use crate::severity::Severity;
use crate::sys::{Duration, Instant};
use std::fmt::Debug;

/**
The result of a wrapped call.

`Ok` is the success outcome and `Err` the failure outcome; advice never converts one into
the other.
*/
pub type Outcome<T, E> = Result<T, E>;

/**
One in-flight call: what is being called, with what, and since when.

The start time is taken when the invocation is created and is never taken again.  Around-advice
times the wrapped call on its own clock, from just before `proceed` runs.  Arguments are rendered at
capture time, so an `Invocation` never borrows the caller's values and those values can be
moved into the call afterwards.

```
use callwise::Invocation;

let amount = 250u64;
let invocation = Invocation::new("transfer")
    .with_signature("Ledger::transfer(..)")
    .with_args(&[&"alice", &amount]);
assert_eq!(invocation.rendered_args().as_deref(), Some(r#"["alice", 250]"#));
```
*/
#[derive(Debug, Clone)]
pub struct Invocation {
    name: String,
    short_signature: String,
    arguments: Vec<String>,
    severity: Option<Severity>,
    started_at: Instant,
}

impl Invocation {
    /// Starts an invocation of `name`, with signature `<name>(..)` and no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let short_signature = format!("{}(..)", name);
        Self {
            name,
            short_signature,
            arguments: Vec::new(),
            severity: None,
            started_at: Instant::now(),
        }
    }

    /// Replaces the short signature used by around and after-success records.
    pub fn with_signature(mut self, short_signature: impl Into<String>) -> Self {
        self.short_signature = short_signature.into();
        self
    }

    /// Captures the call's arguments, in call order.
    pub fn with_args(mut self, args: &[&dyn Debug]) -> Self {
        self.arguments = args.iter().map(|arg| render(*arg)).collect();
        self
    }

    /**
    Pins the severity of this call's tracing records (before-advice and the non-failure
    records of around-advice).

    The pinned severity still has to pass the gate.  Tracing records are DEBUG or INFO, so an
    ERROR pin is ignored.  Without a pin, the interceptor uses DEBUG when DEBUG passes the gate
    and INFO otherwise.
    */
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_signature(&self) -> &str {
        &self.short_signature
    }

    /// The rendered arguments.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Time since [`Invocation::started_at`].
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.started_at)
    }

    /// The arguments as `[a, b, c]`, or `None` when there are none.
    pub fn rendered_args(&self) -> Option<String> {
        listing(&self.arguments)
    }
}

/*
Boilerplate notes.

Clone: yes, a snapshot can be handed to several sinks.
PartialEq/Hash: no; two invocations with equal content are still different calls.
Default: no, an invocation needs a name.
Send/Sync: automatic.
*/
