//! Data models for NotesFlow

mod color;
mod draft;
mod note;

pub use color::NoteColor;
pub use draft::{NoteDraft, NotePatch};
pub use note::{decode_notes, Note, NoteId};
