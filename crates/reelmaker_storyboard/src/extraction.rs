//! Cleaning and repair of storyboard text returned by the generator.
//!
//! These are pure string functions so each step can be tested against
//! crafted responses without a model in the loop.

/// Remove a markdown code fence wrapped around the response.
///
/// Handles both ```` ```json ```` and bare ```` ``` ```` openers. A missing
/// closing fence (the usual sign of a truncated response) leaves the body
/// intact. Text that does not start with a fence is only trimmed.
///
/// # Examples
///
/// ```
/// use reelmaker_storyboard::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
/// assert_eq!(strip_code_fence("```\n{\"a\": 1}"), "{\"a\": 1}");
/// assert_eq!(strip_code_fence("  {\"a\": 1} "), "{\"a\": 1}");
/// ```
pub fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Skip an optional language tag such as `json`
    let body = body
        .trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        .trim();

    body.strip_suffix("```").map(str::trim_end).unwrap_or(body)
}

/// Count quote characters in `text`.
pub fn quote_count(text: &str) -> usize {
    text.matches('"').count()
}

/// Whether the text provably stopped in the middle of a string.
///
/// Complete JSON has an even number of quote characters, so an odd count
/// means the generator was cut off inside a string value or key.
pub fn is_truncated(text: &str) -> bool {
    quote_count(text) % 2 != 0
}

/// Attempt to salvage a response that was cut off after a complete object.
///
/// Applies only when the text ends on a closing quote, the shape left behind
/// when generation stops between a string value and the `}` that should
/// follow it. The trailing fragment after the last `}` is dropped, then any
/// arrays and objects still open at that point are closed in order.
///
/// Returns `None` when the precondition does not hold or the remaining text
/// cannot be closed consistently. Interior content is never edited.
///
/// # Examples
///
/// ```
/// use reelmaker_storyboard::repair;
///
/// let cut = r#"{"scenes": [{"description": "Sit."}, {"description": "Stand.""#;
/// assert_eq!(repair(cut).as_deref(), Some(r#"{"scenes": [{"description": "Sit."}]}"#));
///
/// assert_eq!(repair(r#"{"a": 1}"#), None);
/// ```
pub fn repair(text: &str) -> Option<String> {
    let text = text.trim_end();
    if !text.ends_with('"') {
        return None;
    }

    let last_brace = text.rfind('}')?;
    if last_brace == 0 {
        return None;
    }

    let kept = &text[..=last_brace];
    let closers = unclosed_delimiters(kept)?;

    tracing::debug!(
        dropped = text.len() - kept.len(),
        closers = closers.len(),
        "Repairing truncated storyboard"
    );

    let mut repaired = String::with_capacity(kept.len() + closers.len());
    repaired.push_str(kept);
    repaired.extend(closers);
    Some(repaired)
}

/// Closing delimiters needed to balance `text`, innermost first.
///
/// Returns `None` if the text ends inside a string or closes a delimiter it
/// never opened.
fn unclosed_delimiters(text: &str) -> Option<Vec<char>> {
    let mut open = Vec::new();
    let mut in_string = false;
    let mut escape_next = false;

    for ch in text.chars() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' | '[' if !in_string => open.push(ch),
            '}' | ']' if !in_string => {
                let expected = if ch == '}' { '{' } else { '[' };
                if open.pop() != Some(expected) {
                    return None;
                }
            }
            _ => {}
        }
    }

    if in_string {
        return None;
    }

    Some(
        open.iter()
            .rev()
            .map(|&c| if c == '{' { '}' } else { ']' })
            .collect(),
    )
}
