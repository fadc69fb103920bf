use notesflow_core::NoteStore;

use crate::commands::common::{normalize_note_identifier, resolve_note};
use crate::error::CliError;

pub async fn run_delete(store: &NoteStore, id: &str) -> Result<(), CliError> {
    let normalized_id = normalize_note_identifier(id)?;
    let note = resolve_note(&normalized_id, &store.snapshot())?;

    store.delete(&note.id).await;
    println!("{}", note.id);
    Ok(())
}
