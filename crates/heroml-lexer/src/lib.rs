//! HeroML lexical extractor: variable references and rule flags from raw text.

mod extract;

pub use extract::{
    extract_variables, has_step_prefix, is_step_token, scan_rules, AI_PROMPT_FLAG,
    HIDE_ITEM_FLAG,
};
