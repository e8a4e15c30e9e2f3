use std::rc::Rc;

use chrono::Utc;
use study_scheduler::database::SnapshotStore;
use study_scheduler::models::{Difficulty, Flashcard};
use study_scheduler::store::EntityStore;
use study_scheduler::{ExportFormat, export, study};

const LEARNER_ID: i64 = 1;

fn main() -> study_scheduler::Result<()> {
    env_logger::init();

    let db = Rc::new(SnapshotStore::open("scheduler.sqlite3")?);

    let mut store = EntityStore::new();
    match db.load() {
        Ok(snapshot) => store.restore(snapshot),
        Err(err) => eprintln!("Stored data unreadable ({err}); starting fresh"),
    }

    // Every mutation from here on is written back automatically.
    let autosave = Rc::clone(&db);
    store.set_save_hook(move |snapshot| {
        if let Err(err) = autosave.save(snapshot) {
            log::warn!("autosave failed: {err}");
        }
    });

    if store.flashcards().is_empty() {
        let mut card = Flashcard::new(1, 1, "cześć".into(), "hello".into());
        card.difficulty = Difficulty::Easy;
        store.add_flashcard(card);
        store.add_flashcard(Flashcard::new(2, 1, "dziękuję".into(), "thank you".into()));
        store.add_flashcard(Flashcard::new(3, 1, "proszę".into(), "please".into()));

        println!("Sample data created!");
    }

    println!("Loaded {} cards, {} reviews", store.flashcards().len(), store.reviews().len());

    let now = Utc::now();
    let due = study::due_cards_sorted(store.flashcards(), store.reviews(), LEARNER_ID, now);
    println!("{} cards due for review:", due.len());
    for card in &due {
        println!("  - {}", card.question);
    }
    let first_due = due.first().map(|card| (card.id, card.question.clone()));

    if let Some((card_id, question)) = first_due {
        let review = store.record_answer(card_id, LEARNER_ID, true, 4, Some(2_500))?;
        println!(
            "Answered '{question}' correctly; next review in {} day(s) on {}",
            review.interval_days,
            review.next_review_date.format("%Y-%m-%d")
        );
    }

    let stats = study::study_stats(store.reviews(), LEARNER_ID, now);
    println!(
        "Today: {} reviews, {:.1} minutes studied, {}-day streak",
        stats.reviews_today, stats.minutes_today, stats.streak_days
    );

    println!("\nAnki export:\n{}", export(store.flashcards(), ExportFormat::Anki));

    Ok(())
}
