//! Runtime error types for the HeroML interpreter.

use heroml_types::ActionType;
use thiserror::Error;

use crate::generator::GeneratorError;

/// Runtime failure. Fatal to the run: interpretation halts at once
/// and no partial result is surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A `Default` or `Loop` node whose body is not leaf text.
    #[error("invalid content for {0} action")]
    InvalidContentForAction(ActionType),

    /// A node type the interpreter has no strategy for.
    #[error("unknown node type: {0}")]
    UnknownNodeType(ActionType),

    /// A `Loop` node with no referenced response.
    #[error("loop referenced response is null")]
    LoopReferenceNull,

    /// The referenced value did not decode as a JSON array.
    #[error("loop variable '{0}' is not an array")]
    LoopVariableNotArray(String),

    /// A `{{name}}` token with no binding in its environment.
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),

    /// The generator failed; its failure is the run's failure.
    #[error("generator failure: {0}")]
    GeneratorFailure(#[from] GeneratorError),
}

/// Result alias for interpreter operations.
pub type EvalResult<T> = Result<T, EvalError>;
