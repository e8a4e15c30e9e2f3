pub mod database;
pub mod error;
pub mod export;
pub mod models;
pub mod store;
pub mod study;

pub use database::SnapshotStore;
pub use error::{Error, Result};
pub use export::{ExportFormat, export};
pub use models::{
    Difficulty, DifficultyTarget, Flashcard, FlashcardReview, FlashcardSet, GenerationSettings,
    QuestionType,
};
pub use store::{EntityStore, StoreChange, StoreSnapshot};
pub use study::{StudyStats, due_cards, due_cards_sorted, streak, study_stats};
