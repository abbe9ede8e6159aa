//! Two-pass `{{name}}` substitution.
//!
//! The two token classes are disjoint by construction, so the passes
//! are order-insensitive: the dynamic pass replaces every token
//! without a `step_<digit>` prefix, the step pass replaces every exact
//! `step_<digits>` token. Each pass fails on its first unresolved
//! token, left to right, naming it.

use heroml_lexer::{has_step_prefix, is_step_token};
use serde_json::Value;

use crate::env::Scope;
use crate::error::{EvalError, EvalResult};

/// Resolve a body text: dynamic pass, then step pass.
pub fn resolve(text: &str, dynamic: &Scope<'_>, steps: &Scope<'_>) -> EvalResult<String> {
    let text = replace_dynamic_vars(text, dynamic)?;
    replace_step_vars(&text, steps)
}

/// Replace every non-step `{{name}}` token from `scope`.
pub fn replace_dynamic_vars(text: &str, scope: &Scope<'_>) -> EvalResult<String> {
    rewrite(text, |name| {
        if has_step_prefix(name) {
            Resolution::Keep
        } else {
            resolve_token(scope, name)
        }
    })
}

/// Replace every exact `{{step_<digits>}}` token from `scope`.
pub fn replace_step_vars(text: &str, scope: &Scope<'_>) -> EvalResult<String> {
    rewrite(text, |name| {
        if is_step_token(name) {
            resolve_token(scope, name)
        } else {
            Resolution::Keep
        }
    })
}

/// Format an environment value for insertion into a prompt.
///
/// Strings insert verbatim; arrays join their items with `", "`
/// (string items verbatim, everything else JSON-encoded); any other
/// value is JSON-encoded.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(render_item)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn render_item(item: &Value) -> String {
    match item {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

enum Resolution {
    /// The token belongs to the other pass; leave it verbatim.
    Keep,
    Replace(String),
    Undefined,
}

fn resolve_token(scope: &Scope<'_>, name: &str) -> Resolution {
    match scope.get(name) {
        Some(value) => Resolution::Replace(render_value(value)),
        None => Resolution::Undefined,
    }
}

fn rewrite(text: &str, mut resolution: impl FnMut(&str) -> Resolution) -> EvalResult<String> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find("{{") {
        let after = &rest[open + 2..];
        let close = after
            .find("}}")
            .filter(|&close| !after[..close].contains('\n'));

        match close {
            Some(close) => {
                let name = &after[..close];
                match resolution(name) {
                    Resolution::Replace(value) => {
                        out.push_str(&rest[..open]);
                        out.push_str(&value);
                    }
                    Resolution::Keep => out.push_str(&rest[..open + 2 + close + 2]),
                    Resolution::Undefined => {
                        return Err(EvalError::UndefinedVariable(name.to_string()))
                    }
                }
                rest = &after[close + 2..];
            }
            None => {
                // Unterminated or newline-crossing braces stay verbatim.
                out.push_str(&rest[..open + 1]);
                rest = &rest[open + 1..];
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}
