use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned image identifier, opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub String);

impl ImageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Comments carry no identifier; they are addressed by position in
/// [`Image::comments`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(rename = "_id", alias = "id")]
    pub id: ImageId,
    #[serde(rename = "originalname")]
    pub original_name: String,
    pub secure_url: String,
    pub format: String,
    pub bytes: u64,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "uploadDate")]
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Image {
    /// Size in whole kilobytes, rounded to nearest.
    pub fn size_kb(&self) -> u64 {
        (self.bytes as f64 / 1024.0).round() as u64
    }
}
