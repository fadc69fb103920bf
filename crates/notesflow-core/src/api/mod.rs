//! Notes REST API boundary.
//!
//! [`RemoteApi`] is the seam the store talks through; [`HttpNotesApi`] is the
//! production implementation over `reqwest`.

mod http;


use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Note, NoteDraft, NoteId, NotePatch};

pub use http::HttpNotesApi;

/// Operations the notes service exposes
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Fetch the full note collection; `None` when the service answers
    /// without a payload
    async fn list(&self) -> Result<Option<Vec<Note>>>;

    /// Create a note; `None` when the service answers without a payload
    async fn create(&self, draft: &NoteDraft) -> Result<Option<Note>>;

    /// Send a partial update
    async fn update(&self, id: &NoteId, patch: &NotePatch) -> Result<()>;

    /// Delete a note
    async fn delete(&self, id: &NoteId) -> Result<()>;

    /// Persist a new pin state
    async fn toggle_pin(&self, id: &NoteId, is_pinned: bool) -> Result<()>;
}
