//! notesflow-core - Core library for NotesFlow
//!
//! This crate contains the note model, the REST client, the local cache and
//! the [`NoteStore`] that keeps them in step for every NotesFlow front-end.

pub mod api;
pub mod cache;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod models;
pub mod notify;
pub mod query;
pub mod store;
pub mod util;

pub use error::{Error, Result};
pub use models::{Note, NoteColor, NoteDraft, NoteId, NotePatch};
pub use store::NoteStore;
