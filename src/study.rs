//! Due-card selection and study statistics.
//!
//! Read-only derivations over store data: nothing here mutates entities, and
//! every function takes an explicit `now` so results are deterministic. All
//! calendar-day truncation happens in UTC.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;

use crate::models::{Flashcard, FlashcardReview};

/// Study-activity numbers for a learner's current day.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyStats {
    pub reviews_today: usize,
    pub minutes_today: f64,
    pub streak_days: u32,
}

/// Cards due for `user_id` at `now`: a card with no review for that learner
/// is always due, otherwise it is due iff the latest review's next-review
/// date has arrived. Order is unspecified.
pub fn due_cards<'a>(
    cards: &'a [Flashcard],
    reviews: &[FlashcardReview],
    user_id: i64,
    now: DateTime<Utc>,
) -> Vec<&'a Flashcard> {
    cards
        .iter()
        .filter(|card| match latest_for_user(reviews, card.id, user_id) {
            Some(review) => review.next_review_date <= now,
            None => true,
        })
        .collect()
}

/// `due_cards` ordered oldest-due first, with never-reviewed cards ahead of
/// everything.
pub fn due_cards_sorted<'a>(
    cards: &'a [Flashcard],
    reviews: &[FlashcardReview],
    user_id: i64,
    now: DateTime<Utc>,
) -> Vec<&'a Flashcard> {
    let mut due = due_cards(cards, reviews, user_id, now);
    // Option sorts None first, which puts unreviewed cards up front.
    due.sort_by_key(|card| {
        latest_for_user(reviews, card.id, user_id).map(|review| review.next_review_date)
    });
    due
}

/// Consecutive UTC calendar days with at least one review, walking backward
/// from `now`'s day. The walk stops at the first empty day, today included:
/// the streak is 0 until the learner reviews on the current day.
pub fn streak(reviews: &[FlashcardReview], now: DateTime<Utc>) -> u32 {
    let studied: HashSet<NaiveDate> =
        reviews.iter().map(|review| review.created_at.date_naive()).collect();
    streak_of_days(&studied, now.date_naive())
}

/// Reviews-today, minutes-today and streak for one learner. Missing response
/// latencies count as zero so the total stays well-defined.
pub fn study_stats(reviews: &[FlashcardReview], user_id: i64, now: DateTime<Utc>) -> StudyStats {
    let today = now.date_naive();
    let mut reviews_today = 0;
    let mut millis_today: u64 = 0;
    let mut studied = HashSet::new();

    for review in reviews.iter().filter(|review| review.user_id == user_id) {
        let day = review.created_at.date_naive();
        studied.insert(day);
        if day == today {
            reviews_today += 1;
            millis_today += u64::from(review.response_time_ms.unwrap_or(0));
        }
    }

    StudyStats {
        reviews_today,
        minutes_today: millis_today as f64 / 60_000.0,
        streak_days: streak_of_days(&studied, today),
    }
}

fn streak_of_days(studied: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut day = today;
    let mut count = 0;
    while studied.contains(&day) {
        count += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    count
}

/// Latest review a learner has for a card; ties on the creation timestamp go
/// to the higher id (append order).
fn latest_for_user<'a>(
    reviews: &'a [FlashcardReview],
    flashcard_id: i64,
    user_id: i64,
) -> Option<&'a FlashcardReview> {
    reviews
        .iter()
        .filter(|review| review.flashcard_id == flashcard_id && review.user_id == user_id)
        .max_by_key(|review| (review.created_at, review.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, TimeZone};

    fn card(id: i64) -> Flashcard {
        Flashcard::new(id, 7, format!("q{id}"), format!("a{id}"))
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).unwrap()
    }

    fn review(
        id: i64,
        flashcard_id: i64,
        user_id: i64,
        created_at: DateTime<Utc>,
        next_review_date: DateTime<Utc>,
    ) -> FlashcardReview {
        FlashcardReview {
            id,
            flashcard_id,
            user_id,
            is_correct: true,
            response_time_ms: None,
            difficulty_rating: 4,
            next_review_date,
            interval_days: 1,
            ease_factor: 2.5,
            repetition_count: 1,
            created_at,
        }
    }

    fn days_ago(n: u64) -> DateTime<Utc> {
        now().checked_sub_days(Days::new(n)).unwrap()
    }

    #[test]
    fn test_unreviewed_cards_are_always_due() {
        let cards = vec![card(1), card(2)];
        let due = due_cards(&cards, &[], 42, now());
        assert_eq!(due.len(), 2);
    }

    #[test]
    fn test_card_due_once_next_review_date_arrives() {
        let cards = vec![card(1)];
        let future = vec![review(1, 1, 42, days_ago(1), now() + Days::new(3))];
        assert!(due_cards(&cards, &future, 42, now()).is_empty());

        let past = vec![review(1, 1, 42, days_ago(3), days_ago(1))];
        assert_eq!(due_cards(&cards, &past, 42, now()).len(), 1);
    }

    #[test]
    fn test_due_at_exactly_now() {
        let cards = vec![card(1)];
        let reviews = vec![review(1, 1, 42, days_ago(1), now())];
        assert_eq!(due_cards(&cards, &reviews, 42, now()).len(), 1);
    }

    #[test]
    fn test_other_learners_reviews_do_not_count() {
        let cards = vec![card(1)];
        let reviews = vec![review(1, 1, 99, days_ago(1), now() + Days::new(5))];

        // Learner 42 has never seen the card, so it is due for them.
        assert_eq!(due_cards(&cards, &reviews, 42, now()).len(), 1);
        assert!(due_cards(&cards, &reviews, 99, now()).is_empty());
    }

    #[test]
    fn test_latest_review_decides_dueness() {
        let cards = vec![card(1)];
        let reviews = vec![
            review(1, 1, 42, days_ago(5), days_ago(4)),
            review(2, 1, 42, days_ago(1), now() + Days::new(5)),
        ];

        assert!(due_cards(&cards, &reviews, 42, now()).is_empty());
    }

    #[test]
    fn test_sorted_puts_unreviewed_first_then_oldest_due() {
        let cards = vec![card(1), card(2), card(3)];
        let reviews = vec![
            review(1, 1, 42, days_ago(3), days_ago(1)),
            review(2, 2, 42, days_ago(5), days_ago(2)),
        ];

        let due = due_cards_sorted(&cards, &reviews, 42, now());
        let ids: Vec<i64> = due.iter().map(|card| card.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_streak_zero_without_reviews() {
        assert_eq!(streak(&[], now()), 0);
    }

    #[test]
    fn test_streak_counts_today_and_yesterday() {
        let reviews = vec![
            review(1, 1, 42, days_ago(1), now()),
            review(2, 1, 42, now(), now()),
        ];
        assert_eq!(streak(&reviews, now()), 2);
    }

    #[test]
    fn test_streak_breaks_on_gap() {
        let reviews = vec![
            review(1, 1, 42, days_ago(3), now()),
            review(2, 1, 42, now(), now()),
        ];
        assert_eq!(streak(&reviews, now()), 1);
    }

    #[test]
    fn test_streak_requires_a_review_today() {
        let reviews = vec![review(1, 1, 42, days_ago(1), now())];
        assert_eq!(streak(&reviews, now()), 0);
    }

    #[test]
    fn test_stats_sum_latency_with_missing_as_zero() {
        let mut timed = review(1, 1, 42, now(), now());
        timed.response_time_ms = Some(90_000);
        let untimed = review(2, 2, 42, now(), now());
        let yesterday = review(3, 1, 42, days_ago(1), now());
        let other_user = review(4, 1, 99, now(), now());

        let stats = study_stats(&[timed, untimed, yesterday, other_user], 42, now());

        assert_eq!(stats.reviews_today, 2);
        assert!((stats.minutes_today - 1.5).abs() < 1e-9);
        assert_eq!(stats.streak_days, 2);
    }
}
