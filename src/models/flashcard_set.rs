//! FlashcardSet groups the cards generated together from one document.
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Flashcard;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardSet {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub document_id: i64,
    pub user_id: i64,
    /// Free-form settings blob; opaque to the scheduling core.
    #[serde(default)]
    pub settings: HashMap<String, serde_json::Value>,
    /// Optional embedded ordered card sequence. Removing a card from the
    /// store does not touch copies embedded here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flashcards: Option<Vec<Flashcard>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FlashcardSet {
    pub fn new(id: i64, name: String, document_id: i64, user_id: i64) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            description: None,
            document_id,
            user_id,
            settings: HashMap::new(),
            flashcards: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a flashcard set; only the present fields are merged.
#[derive(Debug, Clone, Default)]
pub struct FlashcardSetPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub settings: Option<HashMap<String, serde_json::Value>>,
    pub flashcards: Option<Option<Vec<Flashcard>>>,
}

impl FlashcardSetPatch {
    pub fn apply(self, set: &mut FlashcardSet) {
        if let Some(name) = self.name {
            set.name = name;
        }
        if let Some(description) = self.description {
            set.description = description;
        }
        if let Some(settings) = self.settings {
            set.settings = settings;
        }
        if let Some(flashcards) = self.flashcards {
            set.flashcards = flashcards;
        }
    }
}
