// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record severities.

use std::fmt::Display;
use std::str::FromStr;

/// The severity attached to every record the interceptor emits.
///
/// Ordered `Debug < Info < Error`.  The ordering only matters in
/// [`GateMode::Threshold`](crate::GateMode::Threshold); the default gate compares
/// severities for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    /// Chatty call tracing, only when configured for it
    Debug,
    /// Call tracing for normal operation
    #[default]
    Info,
    /// Failures of the wrapped call
    Error,
}

impl Severity {
    /// Upper-case name, as written in configuration.
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Error => "ERROR",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured level that names no [`Severity`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized log level '{input}', expected one of DEBUG, INFO, ERROR")]
pub struct ParseSeverityError {
    input: String,
}

impl ParseSeverityError {
    /// The rejected input, untrimmed.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("DEBUG") {
            Ok(Severity::Debug)
        } else if trimmed.eq_ignore_ascii_case("INFO") {
            Ok(Severity::Info)
        } else if trimmed.eq_ignore_ascii_case("ERROR") {
            Ok(Severity::Error)
        } else {
            Err(ParseSeverityError {
                input: s.to_string(),
            })
        }
    }
}

/*
Boilerplate notes.

Copy: a fieldless enum, yes.
Ord: the declared order is the severity order, used by threshold gating.
Default: Info, the level an unset configuration resolves to.
Display: the configuration spelling, so a Display round-trips through FromStr.
From/Into strings: FromStr covers parsing; no infallible conversion exists.
*/

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::*;

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn parses_case_insensitively() {
        assert_eq!("debug".parse::<Severity>(), Ok(Severity::Debug));
        assert_eq!("Info".parse::<Severity>(), Ok(Severity::Info));
        assert_eq!(" ERROR ".parse::<Severity>(), Ok(Severity::Error));
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn rejects_unknown_levels() {
        let err = "verbose".parse::<Severity>().unwrap_err();
        assert_eq!(err.input(), "verbose");
        assert!(err.to_string().contains("'verbose'"));
        assert!("".parse::<Severity>().is_err());
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn display_round_trips() {
        for severity in [Severity::Debug, Severity::Info, Severity::Error] {
            assert_eq!(severity.to_string().parse::<Severity>(), Ok(severity));
        }
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn ordered_debug_info_error() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Error);
        assert_eq!(Severity::default(), Severity::Info);
    }
}
