//! Reference validator: the pure precondition gate before interpretation.
//!
//! Walks the action list in source order, maintaining a whitelist of
//! names legal to reference: the first step's declared variables, plus
//! one `step_<i>` entry per validated step. Returns a [`Verdict`] as
//! data and short-circuits on the first violation. No side effects and
//! no generator calls; running it twice on the same list yields the
//! same verdict.

use heroml_lexer::extract_variables;
use heroml_types::{Action, Body, RuleViolation, Verdict};

/// Validate an action list.
pub fn validate(actions: &[Action]) -> Verdict {
    if actions.is_empty() {
        return Verdict::NoActions;
    }

    let mut whitelist: Vec<String> = Vec::new();

    for (i, action) in actions.iter().enumerate() {
        let step = i + 1;

        if i == 0 {
            whitelist.extend(action.variables.iter().cloned());
            if whitelist.is_empty() {
                return Verdict::NoVarsInFirstStep;
            }
        }

        if let Err(violation) = check_body(&action.body, step, &whitelist) {
            return Verdict::Step { step, violation };
        }

        // This step's result becomes referenceable from the next one,
        // whatever the step's action type.
        let key = format!("step_{step}");
        if !whitelist.contains(&key) {
            whitelist.push(key);
        }
    }

    Verdict::Valid
}

fn check_body(
    body: &Body,
    current_index: usize,
    whitelist: &[String],
) -> Result<(), RuleViolation> {
    match body {
        Body::Leaf(text) => check_rule(text, current_index, whitelist),
        Body::Sequence(children) => {
            for child in children {
                check_body(&child.body, current_index, whitelist)?;
            }
            Ok(())
        }
    }
}

/// Check one body text against the reference rules.
///
/// Every `{{name}}` token must either be whitelisted or name a prior
/// step result: `step_<k>` with `1 <= k < current_index`.
pub fn check_rule(
    prompt: &str,
    current_index: usize,
    whitelist: &[String],
) -> Result<(), RuleViolation> {
    if prompt.trim().is_empty() {
        return Err(RuleViolation::EmptyString);
    }

    for name in extract_variables(prompt) {
        if whitelist.contains(&name) {
            continue;
        }

        let Some((prefix, number)) = name.split_once('_') else {
            return Err(RuleViolation::MissingUnderscore);
        };

        if number.contains('-') {
            return Err(RuleViolation::NegativeNumber);
        }
        if prefix != "step" {
            return Err(RuleViolation::IncorrectPrefix);
        }

        match number.parse::<usize>() {
            Ok(k) if (1..current_index).contains(&k) => {}
            _ => return Err(RuleViolation::IncorrectNumber),
        }
    }

    Ok(())
}
