use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-step presentation rules, derived once from flag substrings in
/// the step text and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Cleared by `--hide-item-from-list`.
    pub show_item_in_list: bool,
    /// Set by `--is-ai-prompt`.
    pub ai_prompt: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            show_item_in_list: true,
            ai_prompt: false,
        }
    }
}

/// How a step is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    /// One prompt, one generated response.
    #[serde(rename = "default")]
    Default,
    /// One prompt per item of a referenced JSON array.
    Loop,
    /// Placeholder for `ACTION:` keywords with no known mapping.
    /// Well-formed sources never produce it; the interpreter rejects it.
    #[serde(rename = "any")]
    Any,
}

impl ActionType {
    /// Map an `ACTION:` keyword to its type.
    ///
    /// Keywords are case-sensitive: `default` and `Loop` are the only
    /// recognized spellings. Anything else maps to [`ActionType::Any`]
    /// and is rejected at interpretation time.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "default" => Self::Default,
            "Loop" => Self::Loop,
            _ => Self::Any,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Loop => write!(f, "Loop"),
            Self::Any => write!(f, "any"),
        }
    }
}
