//! SM-2 (SuperMemo 2) spaced repetition scheduling.
//!
//! The recurrence keeps per-card spacing state across an append-only review
//! history:
//! - Correct answers grow the interval progressively (1 day → 6 days → prior
//!   interval × prior ease factor) and bump the repetition count
//! - An incorrect answer resets the repetition count and drops the interval
//!   back to 1 day; the ease factor is not reset
//! - The ease factor moves with the 0-5 difficulty self-rating after every
//!   answer and has a floor of 1.3, with no upper bound

use chrono::{DateTime, Days, Utc};

use super::FlashcardReview;
use crate::error::{Error, Result};

/// Ease factor seeded for a card with no review history.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Ease factor never drops below this floor.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Spacing parameters computed for a new review record.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSchedule {
    pub interval_days: i64,
    pub ease_factor: f64,
    pub repetition_count: u32,
    pub next_review_date: DateTime<Utc>,
}

/// Computes the spacing parameters for a fresh answer on one flashcard.
///
/// `history` is the full review log; the latest prior review for
/// `flashcard_id` (by creation timestamp, then id) carries the card's current
/// state. A card with no history seeds interval 1, ease 2.5, repetition 0.
///
/// Pure: identical inputs always produce identical outputs. A rating outside
/// 0-5 is rejected, never clamped.
pub fn schedule_review(
    history: &[FlashcardReview],
    flashcard_id: i64,
    is_correct: bool,
    difficulty_rating: u8,
    now: DateTime<Utc>,
) -> Result<ReviewSchedule> {
    if difficulty_rating > 5 {
        return Err(Error::InvalidRating(difficulty_rating));
    }

    let prior = latest_review(history, flashcard_id);
    let (prior_interval, prior_ease, prior_repetitions) = match prior {
        Some(review) => (review.interval_days, review.ease_factor, review.repetition_count),
        None => (1, DEFAULT_EASE_FACTOR, 0),
    };

    let (interval_days, repetition_count) = if is_correct {
        let interval = match prior_repetitions {
            0 => 1,
            1 => 6,
            _ => (prior_interval as f64 * prior_ease).round() as i64,
        };
        (interval, prior_repetitions + 1)
    } else {
        (1, 0)
    };

    // EF' = EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02)), floored at 1.3.
    // Applied whether or not the answer was correct.
    let q = difficulty_rating as f64;
    let mut ease_factor = prior_ease + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02));
    if ease_factor < MIN_EASE_FACTOR {
        ease_factor = MIN_EASE_FACTOR;
    }

    Ok(ReviewSchedule {
        interval_days,
        ease_factor,
        repetition_count,
        next_review_date: add_days(now, interval_days),
    })
}

/// Latest review for a card: maximum by (creation timestamp, id). Ids are
/// assigned in append order, so the tie-break is deterministic.
pub fn latest_review(history: &[FlashcardReview], flashcard_id: i64) -> Option<&FlashcardReview> {
    history
        .iter()
        .filter(|review| review.flashcard_id == flashcard_id)
        .max_by_key(|review| (review.created_at, review.id))
}

// Calendar-day increment: time-of-day is preserved rather than accumulating
// elapsed-time rounding across reviews.
fn add_days(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now.checked_add_days(Days::new(days.max(0) as u64)).unwrap_or(now)
}
