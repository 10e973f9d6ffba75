//! GitHub Gist API client.
//!
//! Reads are anonymous; writes send the token as a bearer credential.
//! Files larger than the API's inline limit come back `truncated` and are
//! completed from their `raw_url`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::api::{ApiError, DocumentApi, RemoteBlob, RemoteDocument};
use crate::document_id::DocumentId;

/// Default GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const GITHUB_JSON: &str = "application/vnd.github+json";
const CLIENT_AGENT: &str = concat!("prompt-assist/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct GistResponse {
    id: String,
    #[serde(default)]
    files: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GistFile {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    truncated: bool,
    #[serde(default)]
    raw_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct GistUpdate<'a> {
    files: BTreeMap<&'a str, FileUpdate<'a>>,
}

#[derive(Debug, Serialize)]
struct FileUpdate<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct GitHubError {
    message: String,
}

/// Gist API client.
pub struct GistApi {
    http: Client,
    base_url: String,
}

impl GistApi {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Creates a client against a different API root (GitHub Enterprise, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn gist_url(&self, id: &DocumentId) -> String {
        format!("{}/gists/{}", self.base_url, id)
    }

    async fn fetch_raw(&self, url: &str) -> Result<String, ApiError> {
        let resp = self
            .http
            .get(url)
            .header(USER_AGENT, CLIENT_AGENT)
            .send()
            .await
            .map_err(ApiError::transport)?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }

        resp.text().await.map_err(ApiError::transport)
    }
}

impl Default for GistApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentApi for GistApi {
    #[instrument(skip(self), level = "debug")]
    async fn fetch_document(&self, id: &DocumentId) -> Result<RemoteDocument, ApiError> {
        let resp = self
            .http
            .get(self.gist_url(id))
            .header(ACCEPT, GITHUB_JSON)
            .header(USER_AGENT, CLIENT_AGENT)
            .send()
            .await
            .map_err(ApiError::transport)?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }

        let gist: GistResponse = resp.json().await.map_err(ApiError::transport)?;

        let mut blobs = Vec::with_capacity(gist.files.len());
        for (name, value) in gist.files {
            let file: GistFile = serde_json::from_value(value).map_err(|e| {
                ApiError::new(None, format!("Unexpected entry for file {}: {}", name, e))
            })?;
            let content = match (file.truncated, file.raw_url) {
                (true, Some(raw_url)) => {
                    debug!("File {} is truncated, fetching raw content", name);
                    self.fetch_raw(&raw_url).await?
                }
                _ => file.content.unwrap_or_default(),
            };
            blobs.push(RemoteBlob { name, content });
        }

        debug!("Got gist {} with {} file(s)", gist.id, blobs.len());
        Ok(RemoteDocument {
            id: gist.id,
            blobs,
        })
    }

    #[instrument(skip(self, content, credential), level = "debug", fields(content_len = content.len()))]
    async fn update_blob(
        &self,
        id: &DocumentId,
        name: &str,
        content: &str,
        credential: &str,
    ) -> Result<(), ApiError> {
        let body = GistUpdate {
            files: BTreeMap::from([(name, FileUpdate { content })]),
        };

        let resp = self
            .http
            .patch(self.gist_url(id))
            .bearer_auth(credential)
            .header(ACCEPT, GITHUB_JSON)
            .header(USER_AGENT, CLIENT_AGENT)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::transport)?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }

        debug!("Updated file {} in gist {}", name, id);
        Ok(())
    }
}

/// Builds an error from a non-success response, preferring GitHub's
/// `message` field over the raw body.
async fn error_from_response(resp: Response) -> ApiError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GitHubError>(&body)
        .map(|e| e.message)
        .unwrap_or_else(|_| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("").to_string()
            } else {
                body
            }
        });
    ApiError::new(Some(status.as_u16()), message)
}
