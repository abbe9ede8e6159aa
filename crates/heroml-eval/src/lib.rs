//! HeroML interpreter: sequential execution of compiled programs.
//!
//! Executes AST nodes in source order against a pair of environments
//! (the long-lived dynamic environment and the run-scoped step
//! environment), resolving `{{name}}` tokens through the substitution
//! engine and delegating all text generation to an injected
//! [`Generator`].

mod env;
mod error;
mod generator;
mod interpreter;
mod subst;

pub use env::{assign_initial_values, Environment, Scope};
pub use error::{EvalError, EvalResult};
pub use generator::{Generator, GeneratorError, RecordedCall, ScriptedGenerator};
pub use interpreter::Interpreter;
pub use subst::{render_value, replace_dynamic_vars, replace_step_vars, resolve};

pub use serde_json::Value;
