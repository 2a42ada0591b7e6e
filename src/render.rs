// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
Turns call arguments, return values and error messages into bounded text.

Rendering never fails.  A `Debug` or `Display` implementation that returns an error, or
panics, is replaced by [`UNRENDERABLE`], so a badly behaved value can't abort the call it
is being logged for.  Output longer than [`MAX_RENDERED_CHARS`] characters is cut short
and suffixed with `...`.

# Known limitation

Values are rendered as-is.  Nothing here redacts passwords, tokens or personal data; if a
wrapped call takes sensitive arguments, don't capture them, or wrap them in a type whose
`Debug` implementation hides the contents.
*/

use std::fmt::{Debug, Display, Write};
use std::panic::{self, AssertUnwindSafe};

/// Substituted for any value whose formatting fails or panics.
pub const UNRENDERABLE: &str = "<unrenderable>";

/// Longest rendering kept, in characters, before truncation.
pub const MAX_RENDERED_CHARS: usize = 512;

const TRUNCATION_MARKER: &str = "...";

fn capture(format: impl FnOnce(&mut String) -> std::fmt::Result) -> String {
    let mut out = String::new();
    let formatted = panic::catch_unwind(AssertUnwindSafe(|| format(&mut out)));
    match formatted {
        Ok(Ok(())) => bounded(out),
        _ => UNRENDERABLE.to_string(),
    }
}

fn bounded(mut text: String) -> String {
    if let Some((cut, _)) = text.char_indices().nth(MAX_RENDERED_CHARS) {
        text.truncate(cut);
        text.push_str(TRUNCATION_MARKER);
    }
    text
}

/**
Renders a value with its `Debug` representation.

```
assert_eq!(callwise::render(&Some(3)), "Some(3)");
assert_eq!(callwise::render(&"a"), "\"a\"");
```
*/
pub fn render(value: &dyn Debug) -> String {
    capture(|out| write!(out, "{:?}", value))
}

/// Renders a message with its `Display` representation, typically an error.
pub fn render_message(message: &dyn Display) -> String {
    capture(|out| write!(out, "{}", message))
}

/**
Renders an argument list as `[a, b, c]`, in call order.

Returns `None` for an empty list; there is nothing to log.  Each value and the listing as a
whole are bounded to [`MAX_RENDERED_CHARS`].

```
assert_eq!(callwise::render_args(&[]), None);
assert_eq!(callwise::render_args(&[&1, &"a", &true]).as_deref(), Some(r#"[1, "a", true]"#));
```
*/
pub fn render_args(args: &[&dyn Debug]) -> Option<String> {
    listing(args.iter().map(|arg| render(*arg)))
}

/// Joins already rendered values into the `[a, b, c]` form.
pub(crate) fn listing<I>(rendered: I) -> Option<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut rendered = rendered.into_iter().peekable();
    rendered.peek()?;
    let mut out = String::from("[");
    for (i, value) in rendered.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(value.as_ref());
    }
    out.push(']');
    Some(bounded(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Formatter;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::*;

    struct FailingDebug;
    impl Debug for FailingDebug {
        fn fmt(&self, _f: &mut Formatter<'_>) -> std::fmt::Result {
            Err(std::fmt::Error)
        }
    }

    struct PanickingDisplay;
    impl Display for PanickingDisplay {
        fn fmt(&self, _f: &mut Formatter<'_>) -> std::fmt::Result {
            panic!("display exploded")
        }
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn renders_debug_and_display() {
        assert_eq!(render(&vec![1, 2]), "[1, 2]");
        assert_eq!(render(&"hello"), "\"hello\"");
        assert_eq!(render_message(&"hello"), "hello");
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn formatting_error_becomes_placeholder() {
        assert_eq!(render(&FailingDebug), UNRENDERABLE);
        assert_eq!(render_args(&[&1, &FailingDebug]).as_deref(), Some("[1, <unrenderable>]"));
    }

    // wasm32 aborts on panic, so the catch can only be observed natively.
    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn formatting_panic_becomes_placeholder() {
        assert_eq!(render_message(&PanickingDisplay), UNRENDERABLE);
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn long_values_are_truncated_on_char_boundary() {
        let long = "é".repeat(MAX_RENDERED_CHARS + 10);
        let rendered = render_message(&long);
        assert!(rendered.ends_with(TRUNCATION_MARKER));
        assert_eq!(
            rendered.chars().count(),
            MAX_RENDERED_CHARS + TRUNCATION_MARKER.len()
        );

        let exact = "x".repeat(MAX_RENDERED_CHARS);
        assert_eq!(render_message(&exact), exact);
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn rendering_is_idempotent() {
        let value = (1, "two", [3.0, 4.5]);
        assert_eq!(render(&value), render(&value));
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn args_listing() {
        assert_eq!(render_args(&[]), None);
        assert_eq!(render_args(&[&42]).as_deref(), Some("[42]"));
        assert_eq!(
            render_args(&[&1, &"a", &true]).as_deref(),
            Some("[1, \"a\", true]")
        );
        assert_eq!(listing(Vec::<String>::new()), None);
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn long_listings_are_bounded() {
        let value = "y".repeat(MAX_RENDERED_CHARS);
        let listed = render_args(&[&value, &value, &value]).expect("three arguments");
        assert!(listed.starts_with("[\""));
        assert!(listed.ends_with(TRUNCATION_MARKER));
        assert_eq!(
            listed.chars().count(),
            MAX_RENDERED_CHARS + TRUNCATION_MARKER.len()
        );
    }
}
