//! Shared types for the HeroML compiler.
//!
//! This crate defines the action and AST node types, the validation
//! verdict codes, and other shared data structures used across all
//! pipeline stages.

mod action;
mod verdict;
pub mod ast;

pub use action::{ActionType, Rules};
pub use ast::{Action, AstNode, Body};
pub use verdict::{RuleViolation, Verdict};
