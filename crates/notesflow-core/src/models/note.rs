//! Note model

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{NoteColor, NoteDraft, NotePatch};
use crate::util::now_millis;

/// Opaque note identifier.
///
/// Assigned by the notes API, or generated locally (UUID v7) for notes that
/// have not been confirmed by the server yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generate a fresh, globally unique provisional ID
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A note in the system.
///
/// Serializes with camelCase keys and RFC 3339 timestamps. Deserialization is
/// lenient: whatever the API or an old cache snapshot hands back is
/// normalized into a well-formed note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireNote")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub color: NoteColor,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_pinned: bool,
}

impl Note {
    /// Build a provisional note from a draft, stamped with the current time
    #[must_use]
    pub fn provisional(draft: NoteDraft) -> Self {
        let now = now_millis();
        Self {
            id: NoteId::generate(),
            title: draft.title,
            content: draft.content,
            color: draft.color,
            created_at: now,
            updated_at: now,
            is_pinned: false,
        }
    }

    /// Refresh `updated_at`
    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }

    /// Apply the present fields of `patch` and refresh `updated_at`
    pub fn apply_patch(&mut self, patch: &NotePatch) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(content) = &patch.content {
            self.content.clone_from(content);
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        self.touch();
    }

    /// Case-insensitive substring match against title or content.
    ///
    /// `lowered_query` must already be lowercase; an empty query matches.
    #[must_use]
    pub fn matches_query(&self, lowered_query: &str) -> bool {
        lowered_query.is_empty()
            || self.title.to_lowercase().contains(lowered_query)
            || self.content.to_lowercase().contains(lowered_query)
    }
}

/// Loosely-typed note as found on the wire or in a cache snapshot.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireNote {
    #[serde(deserialize_with = "deserialize_id")]
    id: NoteId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    color: Value,
    #[serde(default)]
    created_at: Value,
    #[serde(default)]
    updated_at: Value,
    #[serde(default)]
    is_pinned: Value,
}

impl From<WireNote> for Note {
    fn from(wire: WireNote) -> Self {
        let created_at = parse_timestamp(&wire.created_at).unwrap_or_else(now_millis);
        let updated_at = parse_timestamp(&wire.updated_at).unwrap_or(created_at);
        Self {
            id: wire.id,
            title: wire.title.unwrap_or_default(),
            content: wire.content.unwrap_or_default(),
            color: NoteColor::from_wire(&wire.color),
            created_at,
            updated_at,
            // Only a literal `true` pins; absent, null and anything else do not.
            is_pinned: wire.is_pinned == Value::Bool(true),
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<NoteId, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(raw) if !raw.trim().is_empty() => Ok(NoteId(raw)),
        Value::Number(number) => Ok(NoteId(number.to_string())),
        other => Err(de::Error::custom(format!("invalid note id: {other}"))),
    }
}

/// Decode a note collection element by element, skipping entries that do
/// not form a note.
pub fn decode_notes(entries: Vec<Value>) -> Vec<Note> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<Note>(entry) {
            Ok(note) => Some(note),
            Err(error) => {
                tracing::warn!("Skipping unreadable note at index {}: {}", index, error);
                None
            }
        })
        .collect()
}

/// Offset-less ISO 8601 forms, read as UTC
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let parsed = match value {
        Value::String(raw) => parse_timestamp_text(raw.trim()),
        Value::Number(number) => number.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }?;
    DateTime::from_timestamp_millis(parsed.timestamp_millis())
}

fn parse_timestamp_text(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(NoteId::generate(), NoteId::generate());
    }

    #[test]
    fn provisional_note_is_unpinned_with_equal_timestamps() {
        let note = Note::provisional(NoteDraft::new("Title", "Body"));
        assert_eq!(note.title, "Title");
        assert!(!note.is_pinned);
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn missing_is_pinned_normalizes_to_false() {
        let note: Note = serde_json::from_value(json!({
            "id": "n1",
            "title": "A",
            "content": "",
            "color": "blue",
            "createdAt": "2024-03-01T10:00:00.000Z",
            "updatedAt": "2024-03-02T10:00:00.000Z"
        }))
        .unwrap();
        assert!(!note.is_pinned);
        assert_eq!(note.color, NoteColor::Blue);
        assert!(note.updated_at > note.created_at);
    }

    #[test]
    fn only_literal_true_pins() {
        for (raw, expected) in [
            (json!(true), true),
            (json!(false), false),
            (json!(null), false),
            (json!("true"), false),
            (json!(1), false),
        ] {
            let note: Note = serde_json::from_value(json!({ "id": "n1", "isPinned": raw })).unwrap();
            assert_eq!(note.is_pinned, expected);
        }
    }

    #[test]
    fn accepts_numeric_ids_and_millisecond_timestamps() {
        let note: Note = serde_json::from_value(json!({
            "id": 42,
            "title": "From server",
            "createdAt": 1_700_000_000_000_i64,
        }))
        .unwrap();
        assert_eq!(note.id.as_str(), "42");
        assert_eq!(note.created_at.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(note.updated_at, note.created_at);
        assert_eq!(note.content, "");
        assert_eq!(note.color, NoteColor::Purple);
    }

    #[test]
    fn reads_offsetless_timestamps_as_utc() {
        let note: Note = serde_json::from_value(json!({
            "id": "n1",
            "createdAt": "2024-03-01T10:00:00.123456",
            "updatedAt": "2024-03-02 08:30:00"
        }))
        .unwrap();
        assert_eq!(
            note.created_at,
            DateTime::parse_from_rfc3339("2024-03-01T10:00:00.123Z").unwrap()
        );
        assert_eq!(
            note.updated_at,
            DateTime::parse_from_rfc3339("2024-03-02T08:30:00Z").unwrap()
        );
    }

    #[test]
    fn unparseable_timestamp_falls_back_to_created_at() {
        let note: Note = serde_json::from_value(json!({
            "id": "n1",
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "last tuesday"
        }))
        .unwrap();
        assert_eq!(note.updated_at, note.created_at);
    }

    #[test]
    fn decode_notes_skips_unreadable_entries() {
        let notes = decode_notes(vec![
            json!({ "id": "keep-1", "title": "first" }),
            json!({ "title": "no id" }),
            json!({ "id": "" }),
            json!("not an object"),
            json!({ "id": "keep-2", "title": "second" }),
        ]);
        let ids = notes.iter().map(|note| note.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["keep-1", "keep-2"]);
    }

    #[test]
    fn rejects_missing_id() {
        assert!(serde_json::from_value::<Note>(json!({ "title": "orphan" })).is_err());
        assert!(serde_json::from_value::<Note>(json!({ "id": "  " })).is_err());
    }

    #[test]
    fn serialized_form_reads_back_identically() {
        let mut note = Note::provisional(NoteDraft::new("Cache me", "please"));
        note.is_pinned = true;

        let raw = serde_json::to_value(&note).unwrap();
        assert_eq!(raw["isPinned"], json!(true));
        assert!(raw["createdAt"].is_string());

        let restored: Note = serde_json::from_value(raw).unwrap();
        assert_eq!(restored, note);
    }

    #[test]
    fn apply_patch_only_touches_present_fields() {
        let mut note = Note::provisional(NoteDraft::new("Old", "Body"));
        let before = note.updated_at;
        note.apply_patch(&NotePatch::default().title("New"));
        assert_eq!(note.title, "New");
        assert_eq!(note.content, "Body");
        assert!(note.updated_at >= before);
    }

    #[test]
    fn matches_query_checks_title_and_content() {
        let note = Note::provisional(NoteDraft::new("Weekly plan", "Buy Foo bars"));
        assert!(note.matches_query("foo"));
        assert!(note.matches_query("weekly"));
        assert!(note.matches_query(""));
        assert!(!note.matches_query("baz"));
    }
}
