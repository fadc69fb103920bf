use notesflow_core::NoteStore;

use crate::commands::common::{normalize_search_query, print_notes};
use crate::error::CliError;

pub fn run_search(store: &NoteStore, query: &str, as_json: bool) -> Result<(), CliError> {
    let normalized_query = normalize_search_query(query)?;
    store.set_search_query(normalized_query);

    print_notes(&store.view(), store.stats(), as_json)
}
