//! Lowers the action list to AST nodes with computed reference sets.

use std::collections::BTreeSet;

use heroml_lexer::extract_variables;
use heroml_types::{Action, AstNode, Body};

/// Lower each action to an AST node.
///
/// A node's `references` is the deduplicated union of its declared
/// variables and every `{{name}}` token in its body, recursing through
/// nested sequences.
pub fn build_ast(actions: &[Action]) -> Vec<AstNode> {
    actions.iter().map(build_node).collect()
}

fn build_node(action: &Action) -> AstNode {
    let mut references: BTreeSet<String> = action.variables.iter().cloned().collect();
    collect_body_references(&action.body, &mut references);

    AstNode {
        kind: action.kind,
        variables: action.variables.clone(),
        rules: action.rules,
        body: action.body.clone(),
        references: references.into_iter().collect(),
        referenced_response: action.referenced_response.clone(),
        aggregate_responses: action.aggregate_responses,
    }
}

fn collect_body_references(body: &Body, references: &mut BTreeSet<String>) {
    match body {
        Body::Leaf(text) => references.extend(extract_variables(text)),
        Body::Sequence(children) => {
            for child in children {
                collect_body_references(&child.body, references);
            }
        }
    }
}
