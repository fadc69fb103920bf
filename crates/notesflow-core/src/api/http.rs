use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;

use super::RemoteApi;
use crate::config::{normalize_base_url, ClientConfig};
use crate::error::{Error, Result};
use crate::models::{decode_notes, Note, NoteColor, NoteDraft, NoteId, NotePatch};
use crate::util::compact_text;

/// HTTP client for the notes service
#[derive(Debug, Clone)]
pub struct HttpNotesApi {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateNoteRequest<'a> {
    title: &'a str,
    content: &'a str,
    color: NoteColor,
    is_pinned: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TogglePinRequest {
    is_pinned: bool,
}

impl HttpNotesApi {
    /// Builds a client for an explicit API base URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(&base_url.into())?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.api_base_url.clone(), config.request_timeout)
    }

    fn notes_url(&self) -> String {
        format!("{}/notes", self.base_url)
    }

    fn note_url(&self, id: &NoteId) -> String {
        format!("{}/notes/{}", self.base_url, urlencoding::encode(id.as_str()))
    }

    /// Send a request and return the response body, or `None` when the
    /// response carries no payload. Bodies go through `RequestBuilder::json`,
    /// which sets the JSON content type.
    async fn send(&self, request: RequestBuilder) -> Result<Option<String>> {
        let response = request.header(ACCEPT, "application/json").send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(
                "Notes API returned HTTP {}: {}",
                status.as_u16(),
                compact_text(&body)
            );
            return Err(Error::Api {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let headers = response.headers();
        let declared_empty = headers
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            == Some(0);
        if status == StatusCode::NO_CONTENT || !headers.contains_key(CONTENT_TYPE) || declared_empty
        {
            return Ok(None);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(body))
    }
}

#[async_trait]
impl RemoteApi for HttpNotesApi {
    async fn list(&self) -> Result<Option<Vec<Note>>> {
        let Some(body) = self.send(self.client.get(self.notes_url())).await? else {
            return Ok(None);
        };
        let entries: Vec<Value> = serde_json::from_str(&body)?;
        Ok(Some(decode_notes(entries)))
    }

    async fn create(&self, draft: &NoteDraft) -> Result<Option<Note>> {
        let body = CreateNoteRequest {
            title: &draft.title,
            content: &draft.content,
            color: draft.color,
            is_pinned: false,
        };
        let response = self
            .send(self.client.post(self.notes_url()).json(&body))
            .await?;
        response
            .map(|payload| serde_json::from_str(&payload).map_err(Error::from))
            .transpose()
    }

    async fn update(&self, id: &NoteId, patch: &NotePatch) -> Result<()> {
        self.send(self.client.put(self.note_url(id)).json(patch))
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &NoteId) -> Result<()> {
        self.send(self.client.delete(self.note_url(id))).await?;
        Ok(())
    }

    async fn toggle_pin(&self, id: &NoteId, is_pinned: bool) -> Result<()> {
        let url = format!("{}/toggle-pin", self.note_url(id));
        self.send(self.client.patch(url).json(&TogglePinRequest { is_pinned }))
            .await?;
        Ok(())
    }
}
