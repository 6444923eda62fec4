//! Document assembly: join page texts and apply the low-confidence fallback.

use crate::config::ExtractionConfig;
use crate::output::{ExtractionResult, ExtractionStats, PageOutcome};
use tracing::{debug, info};

/// Join resolved pages in order and flag implausibly short results.
///
/// Pages are separated by a single `\n`. Pages that produced no text are
/// skipped outright rather than leaving a blank line. When the combined text
/// is shorter than `config.min_text_chars` characters, the warning sentence is
/// appended and `low_confidence` is set.
pub fn aggregate(outcomes: &[PageOutcome], config: &ExtractionConfig) -> ExtractionResult {
    let mut text = outcomes
        .iter()
        .map(|o| o.text.as_str())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let recovered = text.trim().chars().count();
    let low_confidence = recovered < config.min_text_chars;
    if low_confidence {
        info!(
            "Only {} characters recovered (minimum {}); flagging as low confidence",
            recovered, config.min_text_chars
        );
        text.push_str("\n\n");
        text.push_str(&config.low_confidence_warning);
    }

    let text = text.trim().to_string();
    debug!("Text preview: {}", preview(&text, 500));

    ExtractionResult {
        text,
        low_confidence,
        stats: ExtractionStats::from_outcomes(outcomes),
    }
}

/// First `max_chars` characters of `text`, never splitting a code point.
fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
