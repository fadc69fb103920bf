use notesflow_core::NoteStore;

use crate::commands::common::{normalize_note_identifier, resolve_note};
use crate::error::CliError;

pub async fn run_pin(store: &NoteStore, id: &str) -> Result<(), CliError> {
    let normalized_id = normalize_note_identifier(id)?;
    let note = resolve_note(&normalized_id, &store.snapshot())?;

    let after = store.toggle_pin(&note.id).await.unwrap_or(note);
    let state = if after.is_pinned { "pinned" } else { "unpinned" };
    println!("{} {state}", after.id);
    Ok(())
}
