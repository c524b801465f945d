// src/qa/prompt.rs
// =============================================================================
// This module builds the messages we send to the completion endpoint.
//
// The prompt shape is fixed:
// - A system message instructing the model to answer from the scraped
//   content, and to stay in a related context for anything outside it
// - A user message embedding the full content and the question verbatim
//
// Content clamping:
// - Scraped pages can easily exceed the model's context window, and the
//   remote API rejects or silently truncates oversized prompts
// - We make that failure mode local and predictable instead: content
//   longer than max_chars is cut at a character boundary and marked
// =============================================================================

/// Fixed instruction sent as the system message on every request
pub const SYSTEM_PROMPT: &str = "You are an AI chatbot trained on a website's content. \
     Answer questions accurately based on the content. \
     If the question is outside the content, answer within a related context.";

// Appended whenever content had to be cut to fit the prompt
const TRUNCATION_MARKER: &str = "\n[... content truncated ...]";

// Builds the user message embedding content and question verbatim
//
// Example:
//   content = "Paris is the capital of France."
//   question = "What is the capital of France?"
//   -> "Content: Paris is the capital of France.\n\nQuestion: What is the capital of France?"
pub fn build_user_message(content: &str, question: &str) -> String {
    format!("Content: {}\n\nQuestion: {}", content, question)
}

// Clamps content to at most max_chars characters
//
// Characters, not bytes: cutting mid-way through a multi-byte UTF-8
// sequence would produce invalid strings (String slicing panics on
// non-boundary indices). Clamped content gets a visible marker so the
// model knows the text is incomplete.
pub fn clamp_content(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }

    let mut clamped: String = content.chars().take(max_chars).collect();
    clamped.push_str(TRUNCATION_MARKER);
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_embeds_content_and_question_verbatim() {
        let content = "Paris is the capital of France.";
        let question = "What is the capital of France?";
        let message = build_user_message(content, question);
        assert!(message.contains(content));
        assert!(message.contains(question));
        assert_eq!(
            message,
            "Content: Paris is the capital of France.\n\nQuestion: What is the capital of France?"
        );
    }

    #[test]
    fn test_short_content_is_untouched() {
        assert_eq!(clamp_content("short", 100), "short");
    }

    #[test]
    fn test_long_content_is_clamped_and_marked() {
        let content = "a".repeat(50);
        let clamped = clamp_content(&content, 10);
        assert!(clamped.starts_with("aaaaaaaaaa"));
        assert!(clamped.ends_with(TRUNCATION_MARKER));
        assert_eq!(clamped.chars().count(), 10 + TRUNCATION_MARKER.chars().count());
    }

    #[test]
    fn test_clamp_respects_char_boundaries() {
        // Multi-byte characters must not be split
        let content = "héllo wörld".repeat(10);
        let clamped = clamp_content(&content, 7);
        assert!(clamped.starts_with("héllo w"));
    }
}
