//! Single source of truth for flashcards, flashcard sets and review events.
//!
//! All mutation goes through this store; other components get read-only
//! slices or freshly computed value objects. Mutators are synchronous and
//! total. After every mutation the store notifies its subscribers and, when
//! configured, hands the current snapshot to an injectable save hook — the
//! store never waits on the hook's outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::sm2;
use crate::models::{
    Flashcard, FlashcardPatch, FlashcardReview, FlashcardSet, FlashcardSetPatch,
    GenerationSettings,
};

/// Which part of the store a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Flashcards,
    FlashcardSets,
    Reviews,
    GenerationSettings,
    Reset,
}

/// The four collections selected for persistence. Transient UI state is
/// deliberately absent and is rebuilt with defaults on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSnapshot {
    pub flashcards: Vec<Flashcard>,
    pub flashcard_sets: Vec<FlashcardSet>,
    pub reviews: Vec<FlashcardReview>,
    pub generation_settings: GenerationSettings,
}

type Listener = Box<dyn Fn(StoreChange)>;
type SaveHook = Box<dyn Fn(&StoreSnapshot)>;

#[derive(Default)]
pub struct EntityStore {
    flashcards: Vec<Flashcard>,
    flashcard_sets: Vec<FlashcardSet>,
    reviews: Vec<FlashcardReview>,
    generation_settings: GenerationSettings,
    current_card: Option<i64>,
    is_generating: bool,
    listeners: Vec<Listener>,
    save_hook: Option<SaveHook>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flashcards(&self) -> &[Flashcard] {
        &self.flashcards
    }

    pub fn flashcard_sets(&self) -> &[FlashcardSet] {
        &self.flashcard_sets
    }

    pub fn reviews(&self) -> &[FlashcardReview] {
        &self.reviews
    }

    pub fn generation_settings(&self) -> &GenerationSettings {
        &self.generation_settings
    }

    pub fn current_card(&self) -> Option<i64> {
        self.current_card
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    /// Registers an observer invoked after every mutation.
    pub fn subscribe(&mut self, listener: impl Fn(StoreChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Installs the autosave hook, called with the current snapshot after
    /// every mutation.
    pub fn set_save_hook(&mut self, hook: impl Fn(&StoreSnapshot) + 'static) {
        self.save_hook = Some(Box::new(hook));
    }

    // ==================== Flashcards ====================

    /// Replaces the full card collection (used on initial load).
    pub fn set_flashcards(&mut self, flashcards: Vec<Flashcard>) {
        self.flashcards = flashcards;
        self.changed(StoreChange::Flashcards);
    }

    pub fn add_flashcard(&mut self, flashcard: Flashcard) {
        self.flashcards.push(flashcard);
        self.changed(StoreChange::Flashcards);
    }

    /// Deletes by id; removing an unknown id is a no-op. Reviews referencing
    /// the id and copies embedded in a set's card list stay in place.
    pub fn remove_flashcard(&mut self, id: i64) {
        self.flashcards.retain(|card| card.id != id);
        self.changed(StoreChange::Flashcards);
    }

    /// Merges the patch into the matching card; no-op when absent.
    pub fn update_flashcard(&mut self, id: i64, patch: FlashcardPatch) {
        if let Some(card) = self.flashcards.iter_mut().find(|card| card.id == id) {
            patch.apply(card);
            card.updated_at = Utc::now();
        }
        self.changed(StoreChange::Flashcards);
    }

    // ==================== Flashcard sets ====================

    pub fn set_flashcard_sets(&mut self, sets: Vec<FlashcardSet>) {
        self.flashcard_sets = sets;
        self.changed(StoreChange::FlashcardSets);
    }

    pub fn add_flashcard_set(&mut self, set: FlashcardSet) {
        self.flashcard_sets.push(set);
        self.changed(StoreChange::FlashcardSets);
    }

    pub fn remove_flashcard_set(&mut self, id: i64) {
        self.flashcard_sets.retain(|set| set.id != id);
        self.changed(StoreChange::FlashcardSets);
    }

    pub fn update_flashcard_set(&mut self, id: i64, patch: FlashcardSetPatch) {
        if let Some(set) = self.flashcard_sets.iter_mut().find(|set| set.id == id) {
            patch.apply(set);
            set.updated_at = Utc::now();
        }
        self.changed(StoreChange::FlashcardSets);
    }

    // ==================== Reviews ====================

    /// Appends an already-computed review record. The spacing parameters are
    /// computed by the scheduling engine before this call; the store does not
    /// run the algorithm itself.
    pub fn add_review(&mut self, review: FlashcardReview) {
        self.reviews.push(review);
        self.changed(StoreChange::Reviews);
    }

    /// Records an answer: runs the scheduling engine over the stored history,
    /// appends the resulting review record and returns it.
    pub fn record_answer(
        &mut self,
        flashcard_id: i64,
        user_id: i64,
        is_correct: bool,
        difficulty_rating: u8,
        response_time_ms: Option<u32>,
    ) -> Result<FlashcardReview> {
        self.record_answer_at(
            flashcard_id,
            user_id,
            is_correct,
            difficulty_rating,
            response_time_ms,
            Utc::now(),
        )
    }

    /// `record_answer` with an explicit clock, for deterministic callers.
    pub fn record_answer_at(
        &mut self,
        flashcard_id: i64,
        user_id: i64,
        is_correct: bool,
        difficulty_rating: u8,
        response_time_ms: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<FlashcardReview> {
        let schedule =
            sm2::schedule_review(&self.reviews, flashcard_id, is_correct, difficulty_rating, now)?;

        let id = self.reviews.iter().map(|review| review.id).max().unwrap_or(0) + 1;
        let review = FlashcardReview {
            id,
            flashcard_id,
            user_id,
            is_correct,
            response_time_ms,
            difficulty_rating,
            next_review_date: schedule.next_review_date,
            interval_days: schedule.interval_days,
            ease_factor: schedule.ease_factor,
            repetition_count: schedule.repetition_count,
            created_at: now,
        };

        log::debug!(
            "card {flashcard_id}: rep {} interval {}d ease {:.2}, next due {}",
            review.repetition_count,
            review.interval_days,
            review.ease_factor,
            review.next_review_date
        );

        self.add_review(review.clone());
        Ok(review)
    }

    // ==================== Settings & transient state ====================

    pub fn set_generation_settings(&mut self, settings: GenerationSettings) {
        self.generation_settings = settings;
        self.changed(StoreChange::GenerationSettings);
    }

    pub fn set_current_card(&mut self, card_id: Option<i64>) {
        self.current_card = card_id;
    }

    pub fn set_generating(&mut self, generating: bool) {
        self.is_generating = generating;
    }

    /// Clears every collection and all transient state back to defaults.
    /// Fresh cards schedule at ease 2.5 / interval 1 / repetition 0 again.
    pub fn reset(&mut self) {
        self.flashcards.clear();
        self.flashcard_sets.clear();
        self.reviews.clear();
        self.generation_settings = GenerationSettings::default();
        self.current_card = None;
        self.is_generating = false;
        self.changed(StoreChange::Reset);
    }

    // ==================== Snapshot ====================

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            flashcards: self.flashcards.clone(),
            flashcard_sets: self.flashcard_sets.clone(),
            reviews: self.reviews.clone(),
            generation_settings: self.generation_settings.clone(),
        }
    }

    /// Replaces the persisted collections from a snapshot. Transient state is
    /// rebuilt with defaults; subscribers see it as a reset.
    pub fn restore(&mut self, snapshot: StoreSnapshot) {
        self.flashcards = snapshot.flashcards;
        self.flashcard_sets = snapshot.flashcard_sets;
        self.reviews = snapshot.reviews;
        self.generation_settings = snapshot.generation_settings;
        self.current_card = None;
        self.is_generating = false;
        self.changed(StoreChange::Reset);
    }

    fn changed(&self, change: StoreChange) {
        for listener in &self.listeners {
            listener(change);
        }
        if let Some(hook) = &self.save_hook {
            hook(&self.snapshot());
        }
    }
}
