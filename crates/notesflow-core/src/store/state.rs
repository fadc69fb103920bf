//! In-memory state owned by the note store.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::models::{Note, NoteId};

/// Pin state captured before an optimistic toggle
#[derive(Debug, Clone, Copy)]
pub(super) struct PinSnapshot {
    pub is_pinned: bool,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of matching a create response to its provisional note
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Reconciled {
    /// The server copy replaced the provisional note
    Confirmed(Note),
    /// The note was edited meanwhile and only took the server id
    Rekeyed(Note),
}

#[derive(Debug, Default)]
pub(super) struct StoreState {
    /// Storage order; fresh and restored notes go to the front
    pub notes: Vec<Note>,
    pub search_query: String,
    pub is_loading: bool,
    /// Revision of the latest local mutation per note
    revisions: HashMap<NoteId, u64>,
    last_revision: u64,
}

impl StoreState {
    pub fn find(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    pub fn find_mut(&mut self, id: &NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|note| &note.id == id)
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.find(id).is_some()
    }

    /// Record a local mutation of `id` and return its revision.
    pub fn stamp(&mut self, id: &NoteId) -> u64 {
        self.last_revision += 1;
        self.revisions.insert(id.clone(), self.last_revision);
        self.last_revision
    }

    /// Whether `revision` is still the latest local mutation of `id`.
    pub fn is_current(&self, id: &NoteId, revision: u64) -> bool {
        self.revisions.get(id) == Some(&revision)
    }

    /// Replace the whole collection, keeping the first note seen per id.
    pub fn replace_notes(&mut self, notes: Vec<Note>) {
        let mut seen = HashSet::new();
        self.notes = notes
            .into_iter()
            .filter(|note| seen.insert(note.id.clone()))
            .collect();
        self.revisions.clear();
    }

    pub fn insert_front(&mut self, note: Note) -> u64 {
        let id = note.id.clone();
        self.notes.retain(|existing| existing.id != id);
        self.notes.insert(0, note);
        self.stamp(&id)
    }

    pub fn remove(&mut self, id: &NoteId) -> Option<Note> {
        let index = self.notes.iter().position(|note| &note.id == id)?;
        self.revisions.remove(id);
        Some(self.notes.remove(index))
    }

    /// Move a provisional note onto the server's record of it.
    ///
    /// Untouched since the create was issued, the note is replaced by the
    /// server copy. Mutated since, it keeps its local fields and only takes
    /// the server id. Returns `None` when the provisional note is gone.
    pub fn reconcile_created(
        &mut self,
        provisional_id: &NoteId,
        revision: u64,
        server_note: Note,
    ) -> Option<Reconciled> {
        if !self.contains(provisional_id) {
            return None;
        }
        let server_id = server_note.id.clone();
        if &server_id != provisional_id {
            self.notes.retain(|note| note.id != server_id);
        }
        let index = self
            .notes
            .iter()
            .position(|note| &note.id == provisional_id)?;

        let untouched = self.is_current(provisional_id, revision);
        self.revisions.remove(provisional_id);
        self.stamp(&server_id);

        if untouched {
            self.notes[index] = server_note.clone();
            Some(Reconciled::Confirmed(server_note))
        } else {
            let note = &mut self.notes[index];
            note.id = server_id;
            Some(Reconciled::Rekeyed(note.clone()))
        }
    }

    /// Undo an optimistic pin toggle if nothing touched the note since.
    pub fn revert_pin(&mut self, id: &NoteId, revision: u64, before: PinSnapshot) -> Option<Note> {
        if !self.is_current(id, revision) {
            return None;
        }
        let note = self.find_mut(id)?;
        note.is_pinned = before.is_pinned;
        note.updated_at = before.updated_at;
        let restored = note.clone();
        self.stamp(id);
        Some(restored)
    }

    /// Put a note removed by a failed delete back at the front.
    pub fn restore_deleted(&mut self, note: Note) -> Option<()> {
        if self.contains(&note.id) {
            return None;
        }
        self.insert_front(note);
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::NoteDraft;

    fn server_copy(title: &str) -> Note {
        let mut note = Note::provisional(NoteDraft::new(title, "from server"));
        note.id = NoteId::from("srv-9");
        note
    }

    #[test]
    fn untouched_provisional_takes_server_copy() {
        let mut state = StoreState::default();
        let provisional = Note::provisional(NoteDraft::new("draft", ""));
        let provisional_id = provisional.id.clone();
        let revision = state.insert_front(provisional);

        let outcome = state.reconcile_created(&provisional_id, revision, server_copy("draft"));

        assert_eq!(outcome, Some(Reconciled::Confirmed(state.notes[0].clone())));
        assert_eq!(state.notes[0].content, "from server");
        assert!(!state.contains(&provisional_id));
    }

    #[test]
    fn edited_provisional_keeps_fields_and_takes_server_id() {
        let mut state = StoreState::default();
        let provisional = Note::provisional(NoteDraft::new("draft", "local"));
        let provisional_id = provisional.id.clone();
        let revision = state.insert_front(provisional);
        state.find_mut(&provisional_id).unwrap().title = "edited".to_string();
        state.stamp(&provisional_id);

        let Some(Reconciled::Rekeyed(note)) =
            state.reconcile_created(&provisional_id, revision, server_copy("draft"))
        else {
            panic!("expected the note to be rekeyed");
        };

        assert_eq!(note.id.as_str(), "srv-9");
        assert_eq!(note.title, "edited");
        assert_eq!(note.content, "local");
        assert_eq!(state.notes, vec![note]);
        assert!(state.revisions.contains_key(&NoteId::from("srv-9")));
        assert!(!state.revisions.contains_key(&provisional_id));
    }

    #[test]
    fn removed_provisional_ignores_server_copy() {
        let mut state = StoreState::default();
        let provisional = Note::provisional(NoteDraft::new("draft", ""));
        let provisional_id = provisional.id.clone();
        let revision = state.insert_front(provisional);
        state.remove(&provisional_id);

        assert_eq!(
            state.reconcile_created(&provisional_id, revision, server_copy("draft")),
            None
        );
        assert!(state.notes.is_empty());
    }
}
