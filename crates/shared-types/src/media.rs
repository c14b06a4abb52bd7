//! # Media
//!
//! Upload payloads and the reference paths the upload endpoint returns.

use serde::{Deserialize, Serialize};

/// A file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Reference returned by the upload endpoint (`{ "path": ... }`).
///
/// Either a path relative to the media-file domain, or an externally hosted
/// absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub path: String,
}

impl MediaRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Externally hosted (absolute URL) references are detected by prefix.
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.path.starts_with("http://") || self.path.starts_with("https://")
    }

    /// URL a view should load this reference from.
    #[must_use]
    pub fn resolve(&self, media_file_domain: &str) -> String {
        if self.is_external() {
            return self.path.clone();
        }
        format!(
            "{}/{}",
            media_file_domain.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}
