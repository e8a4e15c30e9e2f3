pub mod flashcard;
pub mod flashcard_set;
pub mod generation;
pub mod review;
pub mod sm2;

pub use flashcard::{Difficulty, Flashcard, FlashcardPatch, QuestionType};
pub use flashcard_set::{FlashcardSet, FlashcardSetPatch};
pub use generation::{DifficultyTarget, GenerationSettings};
pub use review::FlashcardReview;
