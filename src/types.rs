//! Types serialized between the scan and generate stages.
//!
//! Both stages read and write these through `manifest.json`, so they must
//! stay identical on both sides.

use serde::{Deserialize, Serialize};

/// A photo as the visitor-facing gallery sees it.
///
/// Order in the manifest is display and navigation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    /// Unique within a manifest. Seed photos use their `photos.toml` id,
    /// backend photos their row id.
    pub id: String,
    /// Raw source reference: a direct URL or a Google Drive sharing link.
    pub src: String,
    /// Alt text.
    pub alt: String,
    /// Category name; empty when uncategorized.
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}
