//! Token extraction over raw step text.
//!
//! HeroML's lexical layer is not a tokenizer: it finds `{{name}}`
//! variable references and boolean flag substrings inside otherwise
//! free-form prompt text.

use heroml_types::Rules;

/// Opening marker of a variable reference.
const OPEN: &str = "{{";
/// Closing marker of a variable reference.
const CLOSE: &str = "}}";

/// Flag substring that hides a step's item from list output.
pub const HIDE_ITEM_FLAG: &str = "--hide-item-from-list";
/// Flag substring that marks a step as an AI prompt.
pub const AI_PROMPT_FLAG: &str = "--is-ai-prompt";

/// Extract every `{{name}}` reference from `text`, left to right.
///
/// Matching is non-greedy: each `{{` closes at the nearest `}}`, and a
/// reference never spans a newline. Duplicates are retained; callers
/// that need a set deduplicate themselves.
pub fn extract_variables(text: &str) -> Vec<String> {
    let mut variables = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(OPEN) {
        let after = &rest[open + OPEN.len()..];
        match after.find(CLOSE) {
            Some(close) if !after[..close].contains('\n') => {
                variables.push(after[..close].to_string());
                rest = &after[close + CLOSE.len()..];
            }
            _ => {
                // No close before a line break; restart one character in
                // so overlapping braces still match.
                rest = &rest[open + 1..];
            }
        }
    }

    variables
}

/// Derive a step's [`Rules`] from flag substrings anywhere in its text.
pub fn scan_rules(text: &str) -> Rules {
    Rules {
        show_item_in_list: !text.contains(HIDE_ITEM_FLAG),
        ai_prompt: text.contains(AI_PROMPT_FLAG),
    }
}

/// `true` for exact step-result references: `step_` followed by one or
/// more ASCII digits and nothing else. Only these resolve in the step
/// substitution pass.
pub fn is_step_token(name: &str) -> bool {
    name.strip_prefix("step_")
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// `true` when `name` begins with `step_<digit>`. Tokens with this
/// prefix (loop sub-keys such as `step_2_1` included) are skipped by
/// the dynamic substitution pass.
pub fn has_step_prefix(name: &str) -> bool {
    name.strip_prefix("step_")
        .and_then(|rest| rest.bytes().next())
        .is_some_and(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_in_source_order() {
        assert_eq!(extract_variables("{{a}}{{b}}"), vec!["a", "b"]);
    }

    #[test]
    fn no_references_yields_empty() {
        assert!(extract_variables("none").is_empty());
        assert!(extract_variables("").is_empty());
    }

    #[test]
    fn duplicates_are_retained() {
        assert_eq!(extract_variables("{{a}} and {{a}}"), vec!["a", "a"]);
    }

    #[test]
    fn references_never_span_newlines() {
        assert!(extract_variables("{{a\nb}}").is_empty());
        // The scan restarts after a failed open, so later references
        // on other lines still match.
        assert_eq!(extract_variables("{{a\n{{b}}"), vec!["b"]);
    }

    #[test]
    fn nearest_close_wins() {
        assert_eq!(extract_variables("{{a}}b}}"), vec!["a"]);
        assert_eq!(extract_variables("{{{a}}"), vec!["{a"]);
    }

    #[test]
    fn unterminated_reference_is_ignored() {
        assert!(extract_variables("{{a").is_empty());
        assert!(extract_variables("stray }} close").is_empty());
    }

    #[test]
    fn scan_rules_defaults() {
        let rules = scan_rules("plain step text");
        assert!(rules.show_item_in_list);
        assert!(!rules.ai_prompt);
    }

    #[test]
    fn scan_rules_flags() {
        let rules = scan_rules("text --hide-item-from-list more --is-ai-prompt");
        assert!(!rules.show_item_in_list);
        assert!(rules.ai_prompt);
    }

    #[test]
    fn step_token_exact() {
        assert!(is_step_token("step_1"));
        assert!(is_step_token("step_42"));
        assert!(!is_step_token("step_"));
        assert!(!is_step_token("step_1_2"));
        assert!(!is_step_token("step_x"));
        assert!(!is_step_token("topic"));
    }

    #[test]
    fn step_prefix_covers_sub_keys() {
        assert!(has_step_prefix("step_1"));
        assert!(has_step_prefix("step_2_1"));
        assert!(has_step_prefix("step_1x"));
        assert!(!has_step_prefix("step_x"));
        assert!(!has_step_prefix("stepper"));
        assert!(!has_step_prefix("topic"));
    }
}
