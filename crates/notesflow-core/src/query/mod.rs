//! Note list filtering and ordering for presentation.

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::Note;

/// Pinned and unpinned halves of a view, each in presentation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteSections {
    pub pinned: Vec<Note>,
    pub others: Vec<Note>,
}

/// Header figures for a view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NoteStats {
    pub total: usize,
    pub pinned: usize,
}

/// Filter notes by case-insensitive query, then sort for presentation.
#[must_use]
pub fn visible_notes(notes: &[Note], search_query: &str) -> Vec<Note> {
    let mut visible = filter_notes(notes, search_query);
    sort_notes(&mut visible);
    visible
}

/// Keep notes whose title or content contains `search_query`, ignoring case.
#[must_use]
pub fn filter_notes(notes: &[Note], search_query: &str) -> Vec<Note> {
    let normalized_query = search_query.to_lowercase();
    notes
        .iter()
        .filter(|note| note.matches_query(&normalized_query))
        .cloned()
        .collect()
}

/// Pinned notes first, then most recently updated first.
pub fn sort_notes(notes: &mut [Note]) {
    notes.sort_by(presentation_order);
}

/// Ordering used by every view.
pub fn presentation_order(a: &Note, b: &Note) -> Ordering {
    b.is_pinned
        .cmp(&a.is_pinned)
        .then_with(|| b.updated_at.cmp(&a.updated_at))
}

/// Split an already ordered view into pinned and other notes.
#[must_use]
pub fn split_sections(view: Vec<Note>) -> NoteSections {
    let (pinned, others) = view.into_iter().partition(|note| note.is_pinned);
    NoteSections { pinned, others }
}

#[must_use]
pub fn note_stats(view: &[Note]) -> NoteStats {
    NoteStats {
        total: view.len(),
        pinned: view.iter().filter(|note| note.is_pinned).count(),
    }
}
