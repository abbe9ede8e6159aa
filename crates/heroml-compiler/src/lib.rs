//! HeroML compiler: orchestrates the compile pipeline.
//!
//! ```text
//! HeroML Source → Instruction Expansion → Step Parser → Reference Validator → AST
//! ```
//!
//! The validator is a pure gate: an action list that fails it never
//! reaches the interpreter, so an invalid program causes no generator
//! calls and no side effects.

mod ast;
mod validator;

use heroml_types::{AstNode, Verdict};
use thiserror::Error;

pub use ast::build_ast;
pub use validator::{check_rule, validate};

/// A source program rejected by the validation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("heroml validation failed: {verdict}")]
pub struct CompileError {
    /// The rejecting verdict; its `Display` form is the wire code.
    pub verdict: Verdict,
}

/// Compile HeroML source to its AST.
///
/// Expands instruction flags, splits and parses the steps, validates
/// the action list, and lowers it to AST nodes. The interpreter only
/// ever sees the `Ok` side of this function.
pub fn compile(source: &str) -> Result<Vec<AstNode>, CompileError> {
    let source = heroml_parser::expand_instructions(source);
    let actions = heroml_parser::parse(&source);

    let verdict = validate(&actions);
    log::debug!("validated {} actions: {verdict}", actions.len());
    if !verdict.is_valid() {
        return Err(CompileError { verdict });
    }

    Ok(build_ast(&actions))
}
