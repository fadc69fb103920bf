//! Inputs for creating and editing notes

use serde::{Deserialize, Serialize};

use super::NoteColor;

/// Fields collected by the creation form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub color: NoteColor,
}

impl NoteDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            color: NoteColor::default(),
        }
    }

    #[must_use]
    pub const fn with_color(mut self, color: NoteColor) -> Self {
        self.color = color;
        self
    }

    /// Trim title and content, returning `None` when both end up empty.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let title = self.title.trim().to_string();
        let content = self.content.trim().to_string();
        if title.is_empty() && content.is_empty() {
            return None;
        }
        Some(Self {
            title,
            content,
            color: self.color,
        })
    }
}

/// Partial update of the user-editable fields of a note.
///
/// Identity, timestamps and pin state cannot be expressed here; they are
/// owned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<NoteColor>,
}

impl NotePatch {
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub const fn color(mut self, color: NoteColor) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.color.is_none()
    }
}
