use notesflow_core::{NoteColor, NotePatch, NoteStore};

use crate::commands::common::{
    capture_editor_input_with_initial, normalize_note_identifier, resolve_note,
};
use crate::error::CliError;

pub async fn run_edit(
    store: &NoteStore,
    id: &str,
    title: Option<String>,
    content: Option<String>,
    color: Option<NoteColor>,
) -> Result<(), CliError> {
    let normalized_id = normalize_note_identifier(id)?;
    let note = resolve_note(&normalized_id, &store.snapshot())?;

    let mut patch = NotePatch::default();
    if let Some(title) = title {
        patch = patch.title(title.trim());
    }
    if let Some(content) = content {
        patch = patch.content(content.trim());
    }
    if let Some(color) = color {
        patch = patch.color(color);
    }

    if patch.is_empty() {
        let edited_content = capture_editor_input_with_initial(&note.content)?;
        if edited_content.is_none() && note.title.trim().is_empty() {
            return Err(CliError::EmptyEditedContent);
        }
        let edited_content = edited_content.unwrap_or_default();
        if edited_content == note.content {
            println!("{}", note.id);
            return Ok(());
        }
        patch = patch.content(edited_content);
    }

    let updated = store.update(&note.id, patch).await.unwrap_or(note);
    println!("{}", updated.id);
    Ok(())
}
