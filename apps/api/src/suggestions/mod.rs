//! AI-driven content suggestions.
//!
//! Builds a picture of the user from their recent goals and the quote
//! categories they like, then asks the model to recommend matching quotes,
//! images, and videos.

pub mod handlers;
pub mod prompts;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ai::AiClient;
use crate::errors::AppError;
use crate::repo::ContentRepository;
use crate::session::UserSession;

/// Only the freshest goals feed the prompt; older notes drift out of
/// relevance.
const RECENT_NOTES: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Quote,
    Image,
    Video,
}

/// One recommended item, in the shape the model returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

pub struct SuggestionService {
    repo: Arc<dyn ContentRepository>,
    ai: AiClient,
}

impl SuggestionService {
    pub fn new(repo: Arc<dyn ContentRepository>, ai: AiClient) -> Self {
        Self { repo, ai }
    }

    /// Asks the model for content recommendations tailored to the user.
    ///
    /// Goals come from the user's most recent notes, preferences from the
    /// categories of quotes they have liked. Either side may be empty; the
    /// prompt falls back to generic wording.
    pub async fn suggest(&self, session: &UserSession) -> Result<Vec<Suggestion>, AppError> {
        let notes = self.repo.find_notes(session.user_id).await?;
        let categories = self.repo.liked_categories(session.user_id).await?;

        let goals: Vec<&str> = notes
            .iter()
            .take(RECENT_NOTES)
            .map(|n| n.goals.as_str())
            .filter(|g| !g.trim().is_empty())
            .collect();

        let prompt = prompts::build_suggestions_prompt(&goals, &categories);
        let suggestions: Vec<Suggestion> = self
            .ai
            .call_json(&prompt, crate::ai::prompts::JSON_ONLY_SYSTEM)
            .await?;

        info!(
            "generated {} suggestions for user {}",
            suggestions.len(),
            session.user_id
        );

        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_output_deserializes_with_optional_fields() {
        let json = r#"[
            {"type": "quote", "content": "Fall seven times, stand up eight.", "author": "Japanese proverb"},
            {"type": "video", "content": "Morning yoga flow", "url": "https://example.com/yoga"},
            {"type": "image", "content": "Sunrise over mountains"}
        ]"#;

        let suggestions: Vec<Suggestion> = serde_json::from_str(json).unwrap();

        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0].kind, SuggestionKind::Quote);
        assert_eq!(suggestions[0].author.as_deref(), Some("Japanese proverb"));
        assert_eq!(suggestions[1].url.as_deref(), Some("https://example.com/yoga"));
        assert_eq!(suggestions[2].kind, SuggestionKind::Image);
        assert!(suggestions[2].author.is_none());
    }

    #[test]
    fn unknown_kinds_are_rejected() {
        let json = r#"[{"type": "podcast", "content": "x"}]"#;
        assert!(serde_json::from_str::<Vec<Suggestion>>(json).is_err());
    }

    #[test]
    fn absent_options_are_omitted_from_serialized_output() {
        let suggestion = Suggestion {
            kind: SuggestionKind::Image,
            content: "Forest trail".to_string(),
            author: None,
            url: None,
        };

        let json = serde_json::to_string(&suggestion).unwrap();

        assert_eq!(json, r#"{"type":"image","content":"Forest trail"}"#);
    }
}
