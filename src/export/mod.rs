//! Export encodings for flashcard collections.
//! Pure string encoders: no file I/O happens here.

use crate::models::Flashcard;

/// Interchange format for an export. Unknown format strings degrade to JSON
/// instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Anki,
}

impl ExportFormat {
    pub fn parse(value: &str) -> Self {
        match value {
            "csv" => Self::Csv,
            "json" => Self::Json,
            "anki" => Self::Anki,
            other => {
                log::warn!("unknown export format {other:?}, falling back to json");
                Self::Json
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Anki => "anki",
        }
    }
}

/// Serializes an ordered card sequence into the selected format.
pub fn export(cards: &[Flashcard], format: ExportFormat) -> String {
    match format {
        ExportFormat::Csv => export_csv(cards),
        ExportFormat::Json => serde_json::to_string_pretty(cards).unwrap_or_else(|err| {
            log::warn!("card collection failed to serialize: {err}");
            "[]".to_string()
        }),
        ExportFormat::Anki => export_anki(cards),
    }
}

fn export_csv(cards: &[Flashcard]) -> String {
    let mut out = String::from("Question,Answer,Difficulty,Type\n");
    for card in cards {
        out.push_str(&format!(
            "\"{}\",\"{}\",\"{}\",\"{}\"\n",
            csv_field(&card.question),
            csv_field(&card.answer),
            card.difficulty.as_str(),
            card.question_type.as_str(),
        ));
    }
    out
}

// Embedded double quotes are escaped by doubling, per RFC 4180.
fn csv_field(value: &str) -> String {
    value.replace('"', "\"\"")
}

// One card per line, question and answer tab-separated, no header.
fn export_anki(cards: &[Flashcard]) -> String {
    cards
        .iter()
        .map(|card| format!("{}\t{}", card.question, card.answer))
        .collect::<Vec<_>>()
        .join("\n")
}
