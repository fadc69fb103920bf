use notesflow_core::query::note_stats;
use notesflow_core::NoteStore;

use crate::commands::common::print_notes;
use crate::error::CliError;

pub fn run_list(
    store: &NoteStore,
    query: Option<&str>,
    limit: usize,
    as_json: bool,
) -> Result<(), CliError> {
    if let Some(query) = query {
        store.set_search_query(query.trim());
    }

    let view = store.view();
    let stats = note_stats(&view);
    let notes = view.into_iter().take(limit).collect::<Vec<_>>();
    print_notes(&notes, stats, as_json)
}
