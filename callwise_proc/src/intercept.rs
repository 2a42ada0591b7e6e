// SPDX-License-Identifier: MIT OR Apache-2.0
use proc_macro::{Delimiter, Spacing, TokenStream, TokenTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Advice {
    Before,
    AfterSuccess,
    AfterException,
    Around,
}

impl Advice {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "before" => Some(Advice::Before),
            "after_success" => Some(Advice::AfterSuccess),
            "after_exception" => Some(Advice::AfterException),
            "around" => Some(Advice::Around),
            _ => None,
        }
    }
}

/// The parsed attribute arguments.
struct Registration {
    interceptor: TokenStream,
    advice: Vec<Advice>,
}

impl Registration {
    fn has(&self, advice: Advice) -> bool {
        self.advice.contains(&advice)
    }
}

/// The parts of the annotated function the expansion needs.
struct Function {
    name: String,
    params: Vec<String>,
    return_type: TokenStream,
    body: TokenStream,
}

fn compile_error(message: &str) -> TokenStream {
    format!("compile_error!({:?});", message)
        .parse()
        .unwrap()
}

fn is_punct(token: &TokenTree, ch: char) -> bool {
    matches!(token, TokenTree::Punct(p) if p.as_char() == ch)
}

fn is_ident(token: &TokenTree, name: &str) -> bool {
    matches!(token, TokenTree::Ident(i) if i.to_string() == name)
}

/// Splits `tokens` at commas outside of `<...>`.
fn split_top_level_commas(tokens: &[TokenTree]) -> Vec<Vec<TokenTree>> {
    let mut segments = vec![Vec::new()];
    let mut depth = 0usize;
    let mut previous: Option<&TokenTree> = None;
    for token in tokens {
        match token {
            TokenTree::Punct(p) if p.as_char() == '<' => depth += 1,
            TokenTree::Punct(p) if p.as_char() == '>' => {
                let arrow = previous.is_some_and(|prev| is_punct(prev, '-'));
                if !arrow {
                    depth = depth.saturating_sub(1);
                }
            }
            TokenTree::Punct(p) if p.as_char() == ',' && depth == 0 => {
                segments.push(Vec::new());
                previous = Some(token);
                continue;
            }
            _ => {}
        }
        if let Some(segment) = segments.last_mut() {
            segment.push(token.clone());
        }
        previous = Some(token);
    }
    segments.retain(|segment| !segment.is_empty());
    segments
}

/// Parses `with = <expr>` or `with = <expr>, advice(<kind>, ...)`.
fn parse_registration(attr: TokenStream) -> Result<Registration, String> {
    let tokens: Vec<TokenTree> = attr.into_iter().collect();
    if tokens.len() < 3 || !is_ident(&tokens[0], "with") || !is_punct(&tokens[1], '=') {
        return Err("#[intercept] expects `with = <interceptor>`".to_string());
    }
    let mut rest = &tokens[2..];

    let mut advice = Vec::new();
    let n = rest.len();
    let advice_group = match rest {
        [.., comma, TokenTree::Ident(kw), TokenTree::Group(g)]
            if is_punct(comma, ',')
                && kw.to_string() == "advice"
                && g.delimiter() == Delimiter::Parenthesis =>
        {
            Some(g.stream())
        }
        _ => None,
    };
    if let Some(stream) = advice_group {
        rest = &rest[..n - 3];
        let names: Vec<TokenTree> = stream.into_iter().collect();
        for segment in split_top_level_commas(&names) {
            let name = match segment.as_slice() {
                [TokenTree::Ident(ident)] => ident.to_string(),
                _ => {
                    return Err(
                        "advice(...) expects a comma-separated list of advice kinds".to_string()
                    );
                }
            };
            match Advice::parse(&name) {
                Some(kind) if !advice.contains(&kind) => advice.push(kind),
                Some(_) => {}
                None => {
                    return Err(format!(
                        "unknown advice `{}`, expected {}",
                        name, "before, after_success, after_exception or around"
                    ));
                }
            }
        }
        if advice.is_empty() {
            return Err("advice(...) must name at least one advice kind".to_string());
        }
    } else {
        advice.push(Advice::Around);
    }

    if let [head @ .., last] = rest {
        if is_punct(last, ',') {
            rest = head;
        }
    }
    if rest.is_empty() {
        return Err("#[intercept] expects `with = <interceptor>`".to_string());
    }

    Ok(Registration {
        interceptor: rest.iter().cloned().collect(),
        advice,
    })
}

/// The name bound by one parameter, or `None` for `self` and destructuring patterns.
fn param_name(segment: &[TokenTree]) -> Option<String> {
    let colon = segment.iter().enumerate().position(|(i, token)| {
        let is_colon = matches!(
            token,
            TokenTree::Punct(p) if p.as_char() == ':' && p.spacing() == Spacing::Alone
        );
        let after_colon = i > 0 && is_punct(&segment[i - 1], ':');
        is_colon && !after_colon
    })?;
    let pattern = &segment[..colon];
    if pattern.iter().any(|token| is_ident(token, "self")) {
        return None;
    }
    let pattern = match pattern {
        [mutability, rest @ ..] if is_ident(mutability, "mut") => rest,
        _ => pattern,
    };
    match pattern {
        [TokenTree::Ident(ident)] if ident.to_string() != "_" => Some(ident.to_string()),
        _ => None,
    }
}

fn parse_function(item: TokenStream) -> Result<Function, String> {
    let tokens: Vec<TokenTree> = item.into_iter().collect();

    let fn_idx = tokens
        .iter()
        .position(|token| is_ident(token, "fn"))
        .ok_or_else(|| "#[intercept] can only be applied to functions".to_string())?;
    if tokens[..fn_idx].iter().any(|token| is_ident(token, "async")) {
        return Err("#[intercept] does not support async functions".to_string());
    }
    let name = match tokens.get(fn_idx + 1) {
        Some(TokenTree::Ident(name)) => name.to_string(),
        _ => return Err("#[intercept] can only be applied to functions".to_string()),
    };

    let body_idx = tokens.len() - 1;
    let body = match &tokens[body_idx] {
        TokenTree::Group(g) if g.delimiter() == Delimiter::Brace => g.stream(),
        _ => return Err("#[intercept] requires a function with a body".to_string()),
    };

    // The parameter list is the first parenthesized group outside the generics.
    let mut depth = 0usize;
    let mut params_idx = None;
    for i in fn_idx + 2..body_idx {
        match &tokens[i] {
            TokenTree::Punct(p) if p.as_char() == '<' => depth += 1,
            TokenTree::Punct(p) if p.as_char() == '>' && !is_punct(&tokens[i - 1], '-') => {
                depth = depth.saturating_sub(1)
            }
            TokenTree::Group(g) if g.delimiter() == Delimiter::Parenthesis && depth == 0 => {
                params_idx = Some(i);
                break;
            }
            _ => {}
        }
    }
    let params_idx =
        params_idx.ok_or_else(|| "#[intercept] could not find the parameter list".to_string())?;
    let params = match &tokens[params_idx] {
        TokenTree::Group(g) => {
            let inner: Vec<TokenTree> = g.stream().into_iter().collect();
            split_top_level_commas(&inner)
                .iter()
                .filter_map(|segment| param_name(segment))
                .collect()
        }
        _ => Vec::new(),
    };

    let has_arrow = matches!(
        (tokens.get(params_idx + 1), tokens.get(params_idx + 2)),
        (Some(dash), Some(gt)) if is_punct(dash, '-') && is_punct(gt, '>')
    );
    if !has_arrow {
        return Err("#[intercept] requires a declared `Result` return type".to_string());
    }
    let return_type: TokenStream = tokens[params_idx + 3..body_idx]
        .iter()
        .take_while(|token| !is_ident(token, "where"))
        .cloned()
        .collect();
    if return_type.is_empty() {
        return Err("#[intercept] requires a declared `Result` return type".to_string());
    }

    Ok(Function {
        name,
        params,
        return_type,
        body,
    })
}

fn expand_body(registration: &Registration, function: &Function) -> String {
    let before = if registration.has(Advice::Before) {
        "__callwise_interceptor.before(&__callwise_invocation);"
    } else {
        ""
    };
    let on_success = if registration.has(Advice::AfterSuccess) {
        "__callwise_interceptor.after_success(&__callwise_invocation, __callwise_value);"
    } else {
        ""
    };
    let on_failure = if registration.has(Advice::AfterException) {
        "__callwise_interceptor.after_exception(&__callwise_invocation, __callwise_error);"
    } else {
        ""
    };
    let after = if on_success.is_empty() && on_failure.is_empty() {
        String::new()
    } else {
        format!(
            r#"match &__callwise_outcome {{
                ::core::result::Result::Ok(__callwise_value) => {{
                    let _ = __callwise_value;
                    {on_success}
                }}
                ::core::result::Result::Err(__callwise_error) => {{
                    let _ = __callwise_error;
                    {on_failure}
                }}
            }}"#
        )
    };
    let call = if registration.has(Advice::Around) {
        "__callwise_interceptor.around(&__callwise_invocation, __callwise_call)"
    } else {
        "__callwise_call()"
    };
    let args = function
        .params
        .iter()
        .map(|param| format!("&{}", param))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"{{
            let __callwise_interceptor = &({interceptor});
            let __callwise_invocation = callwise::Invocation::new("{name}")
                .with_signature(concat!(module_path!(), "::", "{name}", "(..)"))
                .with_args(&[{args}]);
            #[allow(unused_mut)]
            let mut __callwise_proceed = || -> {return_type} {{ {body} }};
            #[allow(unused_mut)]
            let mut __callwise_call = || -> {return_type} {{
                {before}
                let __callwise_outcome = __callwise_proceed();
                {after}
                __callwise_outcome
            }};
            {call}
        }}"#,
        interceptor = registration.interceptor,
        name = function.name,
        return_type = function.return_type,
        body = function.body,
    )
}

/// Implementation of the `#[intercept]` attribute macro.
///
/// Replaces the function body with one that builds an `Invocation`, runs the original body
/// in a closure, and composes the selected advice around it.
pub fn intercept_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let registration = match parse_registration(attr) {
        Ok(registration) => registration,
        Err(message) => return compile_error(&message),
    };
    let mut tokens: Vec<TokenTree> = item.clone().into_iter().collect();
    let function = match parse_function(item) {
        Ok(function) => function,
        Err(message) => return compile_error(&message),
    };

    let new_body: TokenStream = match expand_body(&registration, &function).parse() {
        Ok(body) => body,
        Err(_) => return compile_error("#[intercept] produced an unparsable body"),
    };
    let new_body_group = match new_body.into_iter().next() {
        Some(group) => group,
        None => return compile_error("#[intercept] produced an empty body"),
    };

    // Replace the old body with the new one
    let body_idx = tokens.len() - 1;
    tokens[body_idx] = new_body_group;

    tokens.into_iter().collect()
}
