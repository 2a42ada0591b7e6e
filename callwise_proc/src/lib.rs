//SPDX-License-Identifier: MIT OR Apache-2.0

//! # Callwise Procedural Macros
//!
//! This crate provides the `#[intercept]` attribute for the callwise interception library.
//! The attribute registers a function with an `Interceptor` at its declaration site, so the
//! function body stays free of logging code.
//!
//! ## Usage Example
//!
//! ```rust
//! use callwise::{Config, InMemoryLogger, Interceptor, Severity};
//! use std::sync::Arc;
//!
//! struct Parser {
//!     interceptor: Interceptor,
//! }
//!
//! impl Parser {
//!     #[callwise::intercept(with = self.interceptor)]
//!     fn parse(&self, text: &str) -> Result<u32, std::num::ParseIntError> {
//!         text.trim().parse()
//!     }
//! }
//!
//! let logger = Arc::new(InMemoryLogger::new());
//! let parser = Parser {
//!     interceptor: Interceptor::new(Config::new(true, Severity::Info), logger.clone()),
//! };
//! assert_eq!(parser.parse(" 42 "), Ok(42));
//! assert!(logger.drain_logs().contains("args: [\" 42 \"]"));
//! ```
//!
//! ## Expansion
//!
//! ```ignore
//! #[callwise::intercept(with = self.interceptor, advice(before, around))]
//! fn parse(&self, text: &str) -> Result<u32, ParseIntError> { body }
//!
//! // Expands to approximately:
//! fn parse(&self, text: &str) -> Result<u32, ParseIntError> {
//!     let interceptor = &(self.interceptor);
//!     let invocation = callwise::Invocation::new("parse")
//!         .with_signature(concat!(module_path!(), "::parse(..)"))
//!         .with_args(&[&text]);
//!     let proceed = || -> Result<u32, ParseIntError> { body };
//!     let call = || -> Result<u32, ParseIntError> {
//!         interceptor.before(&invocation);
//!         proceed()
//!     };
//!     interceptor.around(&invocation, call)
//! }
//! ```

mod intercept;

use proc_macro::TokenStream;

/**
Registers a function for interception.

```text
#[callwise::intercept(with = <interceptor expression>)]
#[callwise::intercept(with = <interceptor expression>, advice(<kind>, ...))]
```

`<interceptor expression>` is evaluated on every call and must produce an `Interceptor` or
a reference to one, such as `self.interceptor` or `interceptor()`.  The advice kinds are
`before`, `after_success`, `after_exception` and `around`; without an `advice(...)` list the
function gets `around` only.

The function must have a body and a declared `Result` return type, and cannot be `async`.
Every parameter bound to a plain name, other than `self`, is captured as an argument and
must implement `Debug`.  `after_success` additionally needs the `Ok` type to implement
`Debug`; `around` and `after_exception` need the `Err` type to implement `Display`.
*/
#[proc_macro_attribute]
pub fn intercept(attr: TokenStream, item: TokenStream) -> TokenStream {
    intercept::intercept_impl(attr, item)
}
