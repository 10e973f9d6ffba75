//! Remote document (gist) identifiers.
//!
//! Users paste either a bare gist id or a gist URL. The id is resolved by
//! trying a fixed chain of resolvers in order, stopping at the first one
//! that produces a candidate:
//!
//! 1. a bare token (`9f8e7d6c5b4a`, `my-gist_01`)
//! 2. a URL, taking the last hex-looking path segment, else the last segment
//! 3. the first run of at least five hex digits anywhere in the string

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Minimum length of a hex run to be taken as an id.
pub const MIN_HEX_LEN: usize = 5;

/// Errors that can occur with document IDs
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DocumentIdError {
    #[error("Could not find a document id in {0:?}")]
    Unresolvable(String),
}

/// A canonical remote document id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

type Resolver = fn(&str) -> Option<String>;

const RESOLVERS: [Resolver; 3] = [from_bare_token, from_url, from_hex_scan];

impl DocumentId {
    /// Resolves a user-supplied reference (URL or bare id) to an id.
    pub fn resolve(reference: &str) -> Result<Self, DocumentIdError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(DocumentIdError::Unresolvable(reference.to_string()));
        }

        RESOLVERS
            .iter()
            .find_map(|resolve| resolve(reference))
            .map(Self)
            .ok_or_else(|| DocumentIdError::Unresolvable(reference.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DocumentId {
    type Err = DocumentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_hex_token(s: &str) -> bool {
    s.len() >= MIN_HEX_LEN && s.chars().all(|c| c.is_ascii_hexdigit())
}

fn from_bare_token(reference: &str) -> Option<String> {
    reference
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        .then(|| reference.to_string())
}

fn from_url(reference: &str) -> Option<String> {
    let url = reqwest::Url::parse(reference).ok()?;
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();

    segments
        .iter()
        .rev()
        .find(|s| is_hex_token(s))
        .or_else(|| segments.last())
        .map(|s| s.to_string())
}

fn from_hex_scan(reference: &str) -> Option<String> {
    reference
        .split(|c: char| !c.is_ascii_hexdigit())
        .find(|run| run.len() >= MIN_HEX_LEN)
        .map(str::to_string)
}
