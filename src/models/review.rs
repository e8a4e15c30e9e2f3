//! FlashcardReview is an immutable, append-only record of one answered card,
//! carrying the spacing parameters computed for it.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardReview {
    pub id: i64,
    pub flashcard_id: i64,
    pub user_id: i64,
    pub is_correct: bool,
    /// Response latency in milliseconds; absent when the UI did not time the answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u32>,
    /// Self-rating on the 0-5 scale.
    pub difficulty_rating: u8,
    pub next_review_date: DateTime<Utc>,
    pub interval_days: i64,
    /// Ease factor after this review, floored at 1.3.
    pub ease_factor: f64,
    pub repetition_count: u32,
    pub created_at: DateTime<Utc>,
}
