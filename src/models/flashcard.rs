//! Flashcard is a generated question/answer pair, owned by a flashcard set
//! but independently addressable by id.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Difficulty tier assigned at generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Open,
    MultipleChoice,
    FillBlank,
}

impl Default for QuestionType {
    fn default() -> Self {
        Self::Open
    }
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::MultipleChoice => "multiple_choice",
            Self::FillBlank => "fill_blank",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: i64,
    pub document_id: i64,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub question_type: QuestionType,
    /// Choice strings; required non-empty when `question_type` is multiple_choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flashcard {
    pub fn new(id: i64, document_id: i64, question: String, answer: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            document_id,
            question,
            answer,
            difficulty: Difficulty::default(),
            question_type: QuestionType::default(),
            options: None,
            tags: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a flashcard; only the present fields are merged.
#[derive(Debug, Clone, Default)]
pub struct FlashcardPatch {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub question_type: Option<QuestionType>,
    pub options: Option<Option<Vec<String>>>,
    pub tags: Option<Option<Vec<String>>>,
}

impl FlashcardPatch {
    pub fn apply(self, card: &mut Flashcard) {
        if let Some(question) = self.question {
            card.question = question;
        }
        if let Some(answer) = self.answer {
            card.answer = answer;
        }
        if let Some(difficulty) = self.difficulty {
            card.difficulty = difficulty;
        }
        if let Some(question_type) = self.question_type {
            card.question_type = question_type;
        }
        if let Some(options) = self.options {
            card.options = options;
        }
        if let Some(tags) = self.tags {
            card.tags = tags;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_flashcard_defaults() {
        let card = Flashcard::new(1, 7, "What is ownership?".into(), "Move semantics".into());

        assert_eq!(card.id, 1);
        assert_eq!(card.document_id, 7);
        assert_eq!(card.difficulty, Difficulty::Medium);
        assert_eq!(card.question_type, QuestionType::Open);
        assert!(card.options.is_none());
    }

    #[test]
    fn test_patch_merges_only_present_fields() {
        let mut card = Flashcard::new(1, 7, "q".into(), "a".into());

        let patch = FlashcardPatch {
            answer: Some("new answer".into()),
            difficulty: Some(Difficulty::Hard),
            ..Default::default()
        };
        patch.apply(&mut card);

        assert_eq!(card.question, "q");
        assert_eq!(card.answer, "new answer");
        assert_eq!(card.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_serialized_field_names_are_camel_case() {
        let card = Flashcard::new(1, 7, "q".into(), "a".into());
        let json = serde_json::to_string(&card).unwrap();

        assert!(json.contains("\"documentId\""));
        assert!(json.contains("\"questionType\":\"open\""));
        assert!(json.contains("\"difficulty\":\"medium\""));
    }
}
