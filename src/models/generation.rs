//! GenerationSettings is the value object handed to the (external) card
//! generator. The core only stores and persists it.
use serde::{Deserialize, Serialize};

use super::QuestionType;

/// Difficulty target for a generation run; `mixed` asks for a spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTarget {
    Easy,
    Medium,
    Hard,
    Mixed,
}

impl Default for DifficultyTarget {
    fn default() -> Self {
        Self::Mixed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default)]
    pub difficulty: DifficultyTarget,
    #[serde(default = "default_question_types")]
    pub question_types: Vec<QuestionType>,
    #[serde(default)]
    pub focus_areas: Vec<String>,
}

fn default_count() -> u32 {
    15
}

fn default_question_types() -> Vec<QuestionType> {
    vec![QuestionType::Open, QuestionType::MultipleChoice]
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            count: default_count(),
            difficulty: DifficultyTarget::default(),
            question_types: default_question_types(),
            focus_areas: Vec::new(),
        }
    }
}
