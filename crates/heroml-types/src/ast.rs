//! Action and AST node types for HeroML programs.
//!
//! Actions are the pre-AST step form produced by the parser; AST nodes
//! add the computed reference set. Both are built once per compile and
//! immutable afterwards. Source order is preserved throughout.

use crate::{ActionType, Rules};

/// A step body: leaf prompt text, or a nested sequence of nodes.
///
/// The current grammar only produces `Leaf`. `Sequence` is the nested
/// sub-language that the validator and reference collection recurse
/// through.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Leaf(String),
    Sequence(Vec<AstNode>),
}

impl Body {
    /// The leaf text, if this body is a leaf.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(text) => Some(text),
            Self::Sequence(_) => None,
        }
    }
}

/// One delimiter-bounded step, parsed but not yet lowered to the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub kind: ActionType,
    /// `{{name}}` tokens extracted from the raw step text, in source
    /// order, duplicates retained.
    pub variables: Vec<String>,
    pub rules: Rules,
    pub body: Body,
    /// Trailing `{{name}}` reference found below the
    /// `ForEveryItemDoThis:` line.
    pub referenced_response: Option<String>,
    /// Parsed `ManyItems` flag (`TRUE` clears it). Carried as data;
    /// nothing interprets it yet.
    pub aggregate_responses: bool,
}

/// An action plus its computed reference set.
#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    pub kind: ActionType,
    pub variables: Vec<String>,
    pub rules: Rules,
    pub body: Body,
    /// Deduplicated union of `variables` and every `{{name}}` token in
    /// the body, recursing through nested sequences. Order carries no
    /// meaning.
    pub references: Vec<String>,
    pub referenced_response: Option<String>,
    pub aggregate_responses: bool,
}
