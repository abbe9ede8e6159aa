//! Line-oriented recognition of a step's directive block.
//!
//! A directive block is recognized structurally, line by line, rather
//! than by free-floating pattern matches. Recognition succeeds only
//! when both `ACTION:` and `ForEveryItemDoThis:` are present; the
//! caller degrades everything else to a plain `Default` action.

/// Directive line markers. Each may sit anywhere in its line.
const ACTION: &str = "ACTION: ";
const FOR_EVERY_ITEM: &str = "ForEveryItemDoThis: ";
const MANY_ITEMS: &str = "ManyItems: ";

/// The parsed directive block of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// The `ACTION:` keyword, uninterpreted.
    pub action: String,
    /// The per-item template: the rest of the `ForEveryItemDoThis:` line.
    pub for_every_item: String,
    /// `ManyItems: TRUE` clears this; `FALSE` or absence leaves it set.
    pub aggregate_responses: bool,
    /// The first trailing `{{name}}` on a line below the
    /// `ForEveryItemDoThis:` line.
    pub referenced_response: Option<String>,
}

/// Recognize the directive block within one step's text.
///
/// Each directive is taken from the first line that carries it. The
/// trailing reference is searched strictly below the
/// `ForEveryItemDoThis:` line.
pub fn parse_directive(step: &str) -> Option<Directive> {
    let lines: Vec<&str> = step.split('\n').collect();

    let action = lines.iter().find_map(|line| action_keyword(line))?;

    let (template_line, for_every_item) = lines.iter().enumerate().find_map(|(i, line)| {
        marker_rest(line, FOR_EVERY_ITEM)
            .filter(|rest| !rest.is_empty())
            .map(|rest| (i, rest.to_string()))
    })?;

    let aggregate_responses = lines
        .iter()
        .find_map(|line| {
            marker_rest(line, MANY_ITEMS)
                .filter(|rest| rest.starts_with("TRUE") || rest.starts_with("FALSE"))
        })
        .map_or(true, |value| !value.starts_with("TRUE"));

    let referenced_response = lines[template_line + 1..]
        .iter()
        .find_map(|line| trailing_reference(line))
        .map(str::to_string);

    Some(Directive {
        action,
        for_every_item,
        aggregate_responses,
        referenced_response,
    })
}

/// Everything after the first occurrence of `marker` in `line`.
fn marker_rest<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.find(marker).map(|at| &line[at + marker.len()..])
}

/// The word following `ACTION: `, if the line carries one.
fn action_keyword(line: &str) -> Option<String> {
    let rest = marker_rest(line, ACTION)?;
    let end = rest
        .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .unwrap_or(rest.len());
    (end > 0).then(|| rest[..end].to_string())
}

/// The trailing `{{name}}` token of a line, if the line ends with one.
///
/// Trailing whitespace (including a CR left by CRLF sources) is
/// ignored. The token is taken between the last `{{` and the final
/// `}}`, so `x {{a}} {{b}}` yields `b`.
fn trailing_reference(line: &str) -> Option<&str> {
    let body = line.trim_end().strip_suffix("}}")?;
    let open = body.rfind("{{")?;
    Some(&body[open + 2..])
}
