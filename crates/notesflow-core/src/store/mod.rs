//! Note store.
//!
//! Owns the in-memory note collection and keeps it in step with the notes API
//! and the local cache. Every mutation follows the same three steps: apply the
//! change locally, push it to the API, and compensate locally if the push
//! fails. Operations never return errors; failures degrade to local state and
//! are reported through the injected [`Notifier`].

mod state;


use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::api::{HttpNotesApi, RemoteApi};
use crate::cache::{FileCache, LocalCache};
use crate::config::ClientConfig;
use crate::connectivity::Connectivity;
use crate::error::Result;
use crate::models::{Note, NoteDraft, NoteId, NotePatch};
use crate::notify::{NoticeKind, Notifier};
use crate::query::{note_stats, split_sections, visible_notes, NoteSections, NoteStats};

use state::{PinSnapshot, Reconciled, StoreState};

const SYNC_LATER: &str = "Will sync when connection is restored.";

/// State container shared with the presentation layer
pub struct NoteStore {
    api: Arc<dyn RemoteApi>,
    cache: Arc<dyn LocalCache>,
    notifier: Arc<dyn Notifier>,
    connectivity: Arc<dyn Connectivity>,
    state: Mutex<StoreState>,
    changes: watch::Sender<u64>,
}

impl NoteStore {
    pub fn new(
        api: Arc<dyn RemoteApi>,
        cache: Arc<dyn LocalCache>,
        notifier: Arc<dyn Notifier>,
        connectivity: Arc<dyn Connectivity>,
    ) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            api,
            cache,
            notifier,
            connectivity,
            state: Mutex::new(StoreState::default()),
            changes,
        }
    }

    /// Store backed by the HTTP API and a file cache described by `config`
    pub fn from_config(
        config: &ClientConfig,
        notifier: Arc<dyn Notifier>,
        connectivity: Arc<dyn Connectivity>,
    ) -> Result<Self> {
        let api = HttpNotesApi::from_config(config)?;
        let cache = FileCache::new(&config.cache_dir);
        Ok(Self::new(
            Arc::new(api),
            Arc::new(cache),
            notifier,
            connectivity,
        ))
    }

    // -----------------------------------------------------------------------
    // Read side
    // -----------------------------------------------------------------------

    /// Notes matching the search query, pinned first, newest first
    pub fn view(&self) -> Vec<Note> {
        let state = self.lock();
        visible_notes(&state.notes, &state.search_query)
    }

    pub fn sections(&self) -> NoteSections {
        split_sections(self.view())
    }

    pub fn stats(&self) -> NoteStats {
        note_stats(&self.view())
    }

    /// Notes in storage order, ignoring the search query
    pub fn snapshot(&self) -> Vec<Note> {
        self.lock().notes.clone()
    }

    pub fn get(&self, id: &NoteId) -> Option<Note> {
        self.lock().find(id).cloned()
    }

    pub fn search_query(&self) -> String {
        self.lock().search_query.clone()
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        self.lock().search_query = query.into();
        self.publish();
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading
    }

    pub fn is_online(&self) -> bool {
        self.connectivity.is_online()
    }

    /// Receiver bumped on every state change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Receiver following the connectivity flag
    pub fn connectivity_changes(&self) -> watch::Receiver<bool> {
        self.connectivity.subscribe()
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Replace the collection with server data, or the cached snapshot when
    /// offline or when the fetch fails.
    pub async fn load(&self) {
        self.set_loading(true);

        if let Some(api) = self.online_api() {
            match api.list().await {
                Ok(None) => {
                    tracing::debug!("Notes list had no payload, keeping current notes");
                }
                Ok(Some(notes)) => {
                    tracing::info!("Loaded {} notes from server", notes.len());
                    self.commit(|state| {
                        state.replace_notes(notes);
                        Some(())
                    });
                }
                Err(error) => {
                    if error.is_connectivity() {
                        tracing::warn!("Failed to fetch notes: {}", error);
                    } else {
                        tracing::error!("Unreadable notes payload: {}", error);
                    }
                    self.restore_from_cache();
                    self.notifier.notify(
                        NoticeKind::ConnectivityError,
                        "Connection Error",
                        "Failed to sync with server. Using local data.",
                    );
                }
            }
        } else {
            tracing::info!("Offline, loading notes from local cache");
            self.restore_from_cache();
        }

        self.set_loading(false);
    }

    /// Same as [`NoteStore::load`]
    pub async fn refetch(&self) {
        self.load().await;
    }

    /// Create a note. Returns `None` when both title and content are blank.
    pub async fn create(&self, draft: NoteDraft) -> Option<Note> {
        let Some(draft) = draft.normalized() else {
            tracing::debug!("Ignoring empty note draft");
            return None;
        };

        let provisional = Note::provisional(draft.clone());
        let provisional_id = provisional.id.clone();
        let revision = self.commit(|state| Some(state.insert_front(provisional.clone())))?;

        let Some(api) = self.online_api() else {
            self.notifier
                .notify(NoticeKind::SavedLocally, "Note saved locally", SYNC_LATER);
            return Some(provisional);
        };

        let mut confirmed = None;
        match api.create(&draft).await {
            Ok(response) => {
                if let Some(server_note) = response {
                    confirmed = self
                        .adopt_created(api, &provisional_id, revision, server_note)
                        .await;
                }
                self.notifier.notify(
                    NoticeKind::Success,
                    "Note created",
                    "Your note has been saved successfully.",
                );
            }
            Err(error) => {
                tracing::warn!("Failed to create note: {}", error);
                self.notifier.notify(
                    NoticeKind::ConnectivityError,
                    "Error",
                    "Failed to save note. Saved locally instead.",
                );
            }
        }

        confirmed
            .or_else(|| self.get(&provisional_id))
            .or(Some(provisional))
    }

    /// Apply a partial update. A failed push keeps the local edit.
    pub async fn update(&self, id: &NoteId, patch: NotePatch) -> Option<Note> {
        let updated = self.commit(|state| {
            let note = state.find_mut(id)?;
            note.apply_patch(&patch);
            let updated = note.clone();
            state.stamp(id);
            Some(updated)
        });
        let Some(updated) = updated else {
            tracing::debug!("Ignoring update of unknown note {}", id);
            return None;
        };

        let Some(api) = self.online_api() else {
            self.notifier
                .notify(NoticeKind::SavedLocally, "Note updated locally", SYNC_LATER);
            return Some(updated);
        };

        match api.update(id, &patch).await {
            Ok(()) => self.notifier.notify(
                NoticeKind::Success,
                "Note updated",
                "Changes saved successfully.",
            ),
            Err(error) => {
                tracing::warn!("Failed to update note {}: {}", id, error);
                self.notifier.notify(
                    NoticeKind::ConnectivityError,
                    "Error",
                    "Failed to sync changes. Saved locally.",
                );
            }
        }
        Some(updated)
    }

    /// Delete a note. A failed push puts the note back at the front.
    pub async fn delete(&self, id: &NoteId) -> Option<Note> {
        let Some(removed) = self.commit(|state| state.remove(id)) else {
            tracing::debug!("Ignoring delete of unknown note {}", id);
            return None;
        };

        let Some(api) = self.online_api() else {
            self.notifier
                .notify(NoticeKind::SavedLocally, "Note deleted locally", SYNC_LATER);
            return Some(removed);
        };

        match api.delete(id).await {
            Ok(()) => self.notifier.notify(
                NoticeKind::Success,
                "Note deleted",
                "Note has been removed successfully.",
            ),
            Err(error) => {
                tracing::warn!("Failed to delete note {}: {}", id, error);
                if self
                    .commit(|state| state.restore_deleted(removed.clone()))
                    .is_none()
                {
                    tracing::debug!("Note {} reappeared locally, skipping restore", id);
                }
                self.notifier.notify(
                    NoticeKind::ConnectivityError,
                    "Error",
                    &format!("Failed to delete note from server. {error}"),
                );
            }
        }
        Some(removed)
    }

    /// Flip the pin state. A failed push restores the previous pin state and
    /// timestamp. Returns the note as it stands afterwards.
    pub async fn toggle_pin(&self, id: &NoteId) -> Option<Note> {
        let (before, toggled, revision) = self.commit(|state| {
            let note = state.find_mut(id)?;
            let before = PinSnapshot {
                is_pinned: note.is_pinned,
                updated_at: note.updated_at,
            };
            note.is_pinned = !note.is_pinned;
            note.touch();
            let toggled = note.clone();
            Some((before, toggled, state.stamp(id)))
        })?;

        let Some(api) = self.online_api() else {
            return Some(toggled);
        };

        if let Err(error) = api.toggle_pin(id, toggled.is_pinned).await {
            tracing::warn!("Failed to update pin status of note {}: {}", id, error);
            if self
                .commit(|state| state.revert_pin(id, revision, before))
                .is_none()
            {
                tracing::debug!("Discarding stale pin rollback for note {}", id);
            }
            self.notifier.notify(
                NoticeKind::ConnectivityError,
                "Error",
                "Failed to update pin status.",
            );
        }
        self.get(id)
    }

    // -----------------------------------------------------------------------
    // Private
    // -----------------------------------------------------------------------

    /// Move a provisional note onto its server-assigned id. Local edits made
    /// while the create was in flight win over the server copy and are pushed
    /// again under the new id.
    async fn adopt_created(
        &self,
        api: &dyn RemoteApi,
        provisional_id: &NoteId,
        revision: u64,
        server_note: Note,
    ) -> Option<Note> {
        let Some(adopted) =
            self.commit(|state| state.reconcile_created(provisional_id, revision, server_note))
        else {
            tracing::debug!("Note {} was removed before the server confirmed it", provisional_id);
            return None;
        };

        match adopted {
            Reconciled::Confirmed(note) => Some(note),
            Reconciled::Rekeyed(note) => {
                tracing::debug!(
                    "Note {} changed while being created, resending it as {}",
                    provisional_id,
                    note.id
                );
                let patch = NotePatch::default()
                    .title(note.title.clone())
                    .content(note.content.clone())
                    .color(note.color);
                if let Err(error) = api.update(&note.id, &patch).await {
                    tracing::warn!("Failed to resend local edits of note {}: {}", note.id, error);
                }
                Some(note)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn online_api(&self) -> Option<&dyn RemoteApi> {
        self.connectivity.is_online().then(|| self.api.as_ref())
    }

    /// Run a mutation; when it reports a change, persist the collection and
    /// wake subscribers.
    fn commit<T>(&self, mutate: impl FnOnce(&mut StoreState) -> Option<T>) -> Option<T> {
        let mut state = self.lock();
        let outcome = mutate(&mut *state)?;
        if let Err(error) = self.cache.save(&state.notes) {
            tracing::warn!("Failed to persist notes to local cache: {}", error);
        }
        drop(state);
        self.publish();
        Some(outcome)
    }

    fn restore_from_cache(&self) {
        match self.cache.load() {
            Ok(Some(notes)) => {
                tracing::info!("Restored {} notes from local cache", notes.len());
                self.commit(|state| {
                    state.replace_notes(notes);
                    Some(())
                });
            }
            Ok(None) => tracing::debug!("Local cache is empty"),
            Err(error) => tracing::warn!("Failed to read local cache: {}", error),
        }
    }

    fn set_loading(&self, is_loading: bool) {
        self.lock().is_loading = is_loading;
        self.publish();
    }

    fn publish(&self) {
        self.changes.send_modify(|revision| *revision += 1);
    }
}
