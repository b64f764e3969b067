//! Maps flagged phrases back onto the body they were found in.
//!
//! The result is an ordered list of plain and highlighted spans that
//! concatenate to the original body. It is built in a single forward pass:
//! phrases are ordered by where they first occur, then each one is searched
//! from a shared cursor. A phrase whose only occurrence sits before the
//! cursor (because an earlier phrase already consumed past it) is skipped
//! and its text stays plain.

use crate::model::DangerousPhrase;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span<'a> {
    pub text: &'a str,
    pub highlighted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
}

impl<'a> Span<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            highlighted: false,
            reason: None,
        }
    }

    fn flagged(text: &'a str, reason: &'a str) -> Self {
        Self {
            text,
            highlighted: true,
            reason: Some(reason),
        }
    }
}

struct PhraseFinder<'p> {
    phrase: &'p DangerousPhrase,
    pattern: Regex,
    first: Option<usize>,
}

/// Split `body` into spans, highlighting each phrase at most once.
pub fn reconcile<'a>(body: &'a str, phrases: &'a [DangerousPhrase]) -> Vec<Span<'a>> {
    if phrases.is_empty() {
        return vec![Span::plain(body)];
    }

    let mut finders: Vec<PhraseFinder<'a>> = phrases
        .iter()
        .filter_map(|phrase| compile_finder(body, phrase))
        .collect();

    // Stable: phrases at the same position keep their input order.
    // Phrases that never occur sort first and are skipped below.
    finders.sort_by_key(|finder| finder.first);

    let mut spans = Vec::new();
    let mut last_index = 0;

    for finder in &finders {
        let phrase: &'a DangerousPhrase = finder.phrase;
        let Some(found) = finder.pattern.find_at(body, last_index) else {
            log::debug!(
                "No occurrence of {:?} at or after offset {}, leaving it unhighlighted",
                phrase.text,
                last_index
            );
            continue;
        };

        if found.start() > last_index {
            spans.push(Span::plain(&body[last_index..found.start()]));
        }
        spans.push(Span::flagged(found.as_str(), &phrase.reason));
        last_index = found.end();
    }

    if last_index < body.len() {
        spans.push(Span::plain(&body[last_index..]));
    }

    spans
}

fn compile_finder<'p>(body: &str, phrase: &'p DangerousPhrase) -> Option<PhraseFinder<'p>> {
    // An empty phrase would match everywhere and produce empty highlights.
    if phrase.text.is_empty() {
        log::debug!("Ignoring empty dangerous phrase");
        return None;
    }

    let pattern = match RegexBuilder::new(&regex::escape(&phrase.text))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(e) => {
            log::warn!("Cannot search for phrase {:?}: {e}", phrase.text);
            return None;
        }
    };
    let first = pattern.find(body).map(|m| m.start());

    Some(PhraseFinder {
        phrase,
        pattern,
        first,
    })
}
