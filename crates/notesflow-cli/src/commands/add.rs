use notesflow_core::{NoteColor, NoteDraft, NoteStore};

use crate::commands::common::resolve_note_content;
use crate::error::CliError;

pub async fn run_add(
    store: &NoteStore,
    title: Option<&str>,
    color: Option<NoteColor>,
    content_parts: &[String],
) -> Result<(), CliError> {
    let content = resolve_note_content(content_parts)?;
    let draft = NoteDraft::new(title.unwrap_or_default(), content)
        .with_color(color.unwrap_or_default());

    // A blank draft is not an error, there is just nothing to save
    if let Some(note) = store.create(draft).await {
        println!("{}", note.id);
    }
    Ok(())
}
