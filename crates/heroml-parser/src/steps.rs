//! Step splitting and action building.

use heroml_lexer::{extract_variables, scan_rules};
use heroml_types::{Action, ActionType, Body};

use crate::directive::parse_directive;

/// Literal delimiter between steps.
pub const STEP_DELIMITER: &str = "->>>>";

/// Split source on the step delimiter.
///
/// A plain split: rejoining the segments with [`STEP_DELIMITER`]
/// reproduces the source byte for byte.
pub fn split_steps(source: &str) -> Vec<&str> {
    source.split(STEP_DELIMITER).collect()
}

/// Parse HeroML source into its ordered action list.
///
/// Every step yields exactly one action. A step whose directive block
/// fails recognition degrades to a `Default` action over the trimmed
/// step text.
pub fn parse(source: &str) -> Vec<Action> {
    split_steps(source).into_iter().map(parse_step).collect()
}

fn parse_step(step: &str) -> Action {
    let rules = scan_rules(step);
    let variables = extract_variables(step);

    match parse_directive(step) {
        Some(directive) => Action {
            kind: ActionType::from_keyword(&directive.action),
            variables,
            rules,
            body: Body::Leaf(directive.for_every_item),
            referenced_response: directive.referenced_response,
            aggregate_responses: directive.aggregate_responses,
        },
        None => Action {
            kind: ActionType::Default,
            variables,
            rules,
            body: Body::Leaf(step.trim().to_string()),
            referenced_response: None,
            aggregate_responses: true,
        },
    }
}
