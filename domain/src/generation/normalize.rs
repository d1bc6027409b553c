//! Response normalization for structured (JSON) model output.
//!
//! Models wrap JSON in Markdown fences even when told not to. [`clean`]
//! removes that wrapper; [`parse_structured`] then deserializes, retrying on
//! the outermost object span when the model added prose around it.

use crate::core::error::DomainError;
use serde::de::DeserializeOwned;

const FENCE: &str = "```";

/// Strip a leading and/or trailing fenced code-block wrapper and surrounding
/// whitespace.
///
/// A fence line consists solely of three or more backticks, optionally
/// followed by a language tag (` ```json `). Stripping repeats until nothing
/// changes, which makes the function idempotent:
/// `clean(clean(x)) == clean(x)`.
///
/// ```
/// use studybuddy_domain::generation::normalize::clean;
///
/// assert_eq!(clean("```json\n{\"a\":1}\n```"), "{\"a\":1}");
/// assert_eq!(clean("  plain text  "), "plain text");
/// ```
pub fn clean(raw: &str) -> String {
    let mut text = raw.trim().to_string();
    loop {
        let stripped = strip_fences_once(&text);
        if stripped == text {
            return text;
        }
        text = stripped;
    }
}

/// Clean `raw` and deserialize it as `T`.
///
/// If strict parsing fails, the span from the first `{` to the last `}` is
/// tried before giving up.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> Result<T, DomainError> {
    let cleaned = clean(raw);
    match serde_json::from_str(&cleaned) {
        Ok(value) => Ok(value),
        Err(strict_error) => {
            if let Some(span) = outermost_object(&cleaned)
                && span.len() < cleaned.len()
                && let Ok(value) = serde_json::from_str(span)
            {
                return Ok(value);
            }
            Err(DomainError::MalformedStructuredOutput(
                strict_error.to_string(),
            ))
        }
    }
}

fn strip_fences_once(text: &str) -> String {
    let mut lines: Vec<&str> = text.lines().collect();
    let leading = lines.first().is_some_and(|line| is_fence_line(line));
    let trailing = lines.last().is_some_and(|line| is_fence_line(line));
    if !leading && !trailing {
        return text.trim().to_string();
    }

    if lines.first().is_some_and(|line| is_fence_line(line)) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|line| is_fence_line(line)) {
        lines.pop();
    }

    lines.join("\n").trim().to_string()
}

fn is_fence_line(line: &str) -> bool {
    let line = line.trim();
    if !line.starts_with(FENCE) {
        return false;
    }
    let tag = line.trim_start_matches('`');
    tag.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.' | '#'))
}

fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        a: i64,
    }

    #[test]
    fn strips_tagged_fence() {
        assert_eq!(clean("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn strips_untagged_fence_and_whitespace() {
        assert_eq!(clean("\n  ```\n{\"a\":1}\n```  \n"), "{\"a\":1}");
    }

    #[test]
    fn no_fence_is_noop_apart_from_trim() {
        assert_eq!(clean("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(clean("  hello\nworld "), "hello\nworld");
    }

    #[test]
    fn strips_leading_or_trailing_fence_alone() {
        assert_eq!(clean("```json\n{\"a\":1}"), "{\"a\":1}");
        assert_eq!(clean("{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn inline_backticks_are_not_a_fence_line() {
        let text = "```{\"a\":1}```";
        assert_eq!(clean(text), text);
    }

    #[test]
    fn unfenced_text_keeps_line_endings() {
        let text = "line one\r\nline two";
        assert_eq!(clean(text), text);
        assert_eq!(clean("  a\r\n\r\nb \r\n"), "a\r\n\r\nb");
    }

    #[test]
    fn lone_fence_cleans_to_empty() {
        assert_eq!(clean("```"), "");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn clean_is_idempotent() {
        let samples = [
            "```json\n{\"a\":1}\n```",
            "```\n```\n{\"a\":1}\n```\n```",
            "```python\nprint('x')\n```\n",
            "``` \n```",
            "text with ``` inside\nand more",
            "  \r\n```json\r\n[1, 2]\r\n```\r\n",
            "",
        ];
        for sample in samples {
            let once = clean(sample);
            assert_eq!(clean(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn parse_structured_reads_fenced_json() {
        let parsed: Sample = parse_structured("```json\n{\"a\": 7}\n```").unwrap();
        assert_eq!(parsed, Sample { a: 7 });
    }

    #[test]
    fn parse_structured_recovers_object_from_prose() {
        let raw = "Sure! Here is your JSON:\n{\"a\": 3}\nHope this helps.";
        let parsed: Sample = parse_structured(raw).unwrap();
        assert_eq!(parsed, Sample { a: 3 });
    }

    #[test]
    fn parse_structured_reports_malformed_output() {
        let result: Result<Sample, _> = parse_structured("not json at all");
        assert!(matches!(
            result,
            Err(DomainError::MalformedStructuredOutput(_))
        ));
    }
}
