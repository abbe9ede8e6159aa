//! HeroML parser: source text to an ordered action list.
//!
//! Splits the source on the step delimiter, recognizes each step's
//! directive block, and degrades unrecognized steps to plain `Default`
//! actions over their full text. Degradation is silent: a malformed
//! directive block is a prompt, not a parse error.

mod directive;
mod instructions;
mod steps;

pub use directive::{parse_directive, Directive};
pub use instructions::expand_instructions;
pub use steps::{parse, split_steps, STEP_DELIMITER};
