//! Prompt templates for insight generation
//!
//! Provides the default system prompt and the user-message shaping shared
//! by all provider adapters.

/// Default system prompt asking the model for up to three insight messages
/// as a JSON payload
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are an insightful assistant that helps extract meaningful messages from daily notes.

Your role is to:
1. Read the daily note content carefully
2. Identify key insights, learnings, or meaningful observations
3. Extract up to 3 insightful messages that capture the value of the day's records
4. Each message should be a one-line statement that could inspire writing
5. Each message should have a brief description explaining the insight

Focus on:
- Personal growth moments
- Interesting ideas or connections
- Emotional insights or realizations
- Actionable wisdom
- Unique perspectives

Respond in JSON format:
{
  "insights": [
    {
      "message": "One-line insightful message",
      "description": "Brief explanation of why this is valuable"
    }
  ]
}

IMPORTANT: Respond ONLY with valid JSON, no additional text."#;

/// Wrap note content as the user-facing message body
pub fn note_user_message(content: &str) -> String {
    format!("Daily Note Content:\n{}", content)
}

/// Merge the system prompt and note content into a single message
///
/// Used for providers (or models) that take one combined prompt instead of
/// a separate system message.
pub fn merged_prompt(system_prompt: &str, content: &str) -> String {
    format!("{}\n\n---\n\n{}", system_prompt, note_user_message(content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompt_requests_json() {
        assert!(DEFAULT_SYSTEM_PROMPT.contains(r#""insights""#));
        assert!(DEFAULT_SYSTEM_PROMPT.contains("valid JSON"));
    }

    #[test]
    fn test_note_user_message() {
        assert_eq!(
            note_user_message("walked today"),
            "Daily Note Content:\nwalked today"
        );
    }

    #[test]
    fn test_merged_prompt_separates_sections() {
        let merged = merged_prompt("be brief", "walked today");
        assert_eq!(merged, "be brief\n\n---\n\nDaily Note Content:\nwalked today");
    }
}
