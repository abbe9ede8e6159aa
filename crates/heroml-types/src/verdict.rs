use serde::{Deserialize, Serialize};
use std::fmt;

/// A single reference-rule violation inside one step's body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleViolation {
    /// Body text is empty after trimming.
    EmptyString,
    /// A non-whitelisted token has no `_` separator.
    MissingUnderscore,
    /// The token's suffix contains a `-`.
    NegativeNumber,
    /// The token's prefix is not `step`.
    IncorrectPrefix,
    /// The suffix is not an integer in `1..current step`.
    IncorrectNumber,
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::EmptyString => "empty_string",
            Self::MissingUnderscore => "missing_underscore",
            Self::NegativeNumber => "negative_number",
            Self::IncorrectPrefix => "incorrect_prefix",
            Self::IncorrectNumber => "incorrect_number",
        };
        f.write_str(code)
    }
}

/// Outcome of validating an action list, returned as data.
///
/// Interpretation must not start unless the verdict is
/// [`Verdict::Valid`]. The `Display` form is the wire code: `valid`,
/// `no_actions`, `no_vars_in_first_step`, or `step_<i>_<code>` with a
/// 1-based step index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    NoActions,
    NoVarsInFirstStep,
    Step {
        step: usize,
        violation: RuleViolation,
    },
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("valid"),
            Self::NoActions => f.write_str("no_actions"),
            Self::NoVarsInFirstStep => f.write_str("no_vars_in_first_step"),
            Self::Step { step, violation } => write!(f, "step_{step}_{violation}"),
        }
    }
}
