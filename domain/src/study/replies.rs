//! Free-text replies: chat answers and topic summaries.

use crate::core::text::take_chars;

/// Maximum words in a summary
pub const SUMMARY_WORD_LIMIT: usize = 300;

/// Characters of the user's message echoed back in an apology
const ECHO_CHARS: usize = 50;

/// Apology returned when no provider could answer a chat message.
pub fn chat_apology(message: &str, error: &str, rate_limited: bool) -> String {
    let echo = take_chars(message, ECHO_CHARS);
    if rate_limited {
        format!(
            "⚠️ All AI models are currently busy or out of quota. Please try again in 1 minute. (Simulated Response: {echo}...)"
        )
    } else {
        format!(
            "Sorry, I could not reach any AI provider to answer \"{echo}...\". Please try again later. (Details: {error})"
        )
    }
}

/// Force a summary into a single paragraph of at most
/// [`SUMMARY_WORD_LIMIT`] words.
pub fn shape_summary(text: &str) -> String {
    text.split_whitespace()
        .take(SUMMARY_WORD_LIMIT)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Summary used when every provider failed
pub fn summary_unavailable(topic: &str) -> String {
    format!(
        "We could not generate a live summary for '{topic}' at this moment. However, '{topic}' is a significant subject that warrants further study. Please try again later or check your network connection."
    )
}

/// Summary used when a provider answered with no text
pub fn summary_filtered(topic: &str) -> String {
    format!(
        "The AI could not generate a summary for '{topic}' due to safety filters or other restrictions."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_apology_echoes_truncated_message() {
        let message = "x".repeat(80);
        let reply = chat_apology(&message, "429 quota", true);
        assert!(reply.contains("busy or out of quota"));
        assert!(reply.contains(&format!("{}...", "x".repeat(50))));
        assert!(!reply.contains(&"x".repeat(51)));
    }

    #[test]
    fn generic_apology_carries_error_details() {
        let reply = chat_apology("What is DNA?", "connection refused", false);
        assert!(reply.contains("What is DNA?"));
        assert!(reply.contains("connection refused"));
        assert!(!reply.contains("quota"));
    }

    #[test]
    fn summary_is_one_paragraph_within_limit() {
        let long = "word ".repeat(400);
        let shaped = shape_summary(&format!("Intro\n\n{long}"));
        assert_eq!(shaped.split_whitespace().count(), SUMMARY_WORD_LIMIT);
        assert!(!shaped.contains('\n'));
    }

    #[test]
    fn fallback_summaries_mention_topic() {
        assert!(summary_unavailable("entropy").contains("'entropy'"));
        assert!(summary_filtered("entropy").contains("safety filters"));
    }
}
