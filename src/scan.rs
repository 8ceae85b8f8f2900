//! Content scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Reads the content directory (and, when
//! asked, the hosted backend) and produces a [`Manifest`] the generate stage
//! consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── photos.toml                  # Seed photos and categories (optional)
//! └── assets/                      # Copied to the output root (optional)
//! ```
//!
//! ## photos.toml
//!
//! ```toml
//! categories = ["Ceremony", "Reception"]   # optional; derived from photos otherwise
//!
//! [[photos]]
//! id = "rings"                             # optional; defaults to the 1-based position
//! src = "https://drive.google.com/file/d/<id>/view"
//! alt = "Wedding rings"
//! category = "Ceremony"
//! caption = "Forever starts here"          # optional
//! ```
//!
//! ## Remote photos
//!
//! With a backend, the `photos` table (newest first, limited by
//! `backend.photo_limit`) replaces the seed photos whenever it returns any
//! rows, and the `categories` table replaces the seed categories likewise.
//! Category ids on photo rows are mapped to category names.
//!
//! ## Validation
//!
//! - Photo ids must be unique
//! - Every photo needs a non-empty `src`

use crate::backend::{Backend, BackendError, CategoryRow, PhotoRow};
use crate::config::{self, SiteConfig};
use crate::types::Photo;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("photos.toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("Duplicate photo id: {0}")]
    DuplicatePhotoId(String),
    #[error("Photo {0} has an empty src")]
    EmptySource(String),
}

/// Where the manifest's photos came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoOrigin {
    /// `photos.toml` in the content directory.
    Seed,
    /// The backend's `photos` table.
    Remote,
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub origin: PhotoOrigin,
    /// Photos in display and navigation order.
    pub photos: Vec<Photo>,
    /// Explicit category names, without "All". Empty means "derive from photos".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    pub config: SiteConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SeedFile {
    categories: Vec<String>,
    photos: Vec<SeedPhoto>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedPhoto {
    #[serde(default)]
    id: Option<String>,
    src: String,
    #[serde(default)]
    alt: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    caption: Option<String>,
}

/// Alt text for photos that have neither alt nor caption.
pub const DEFAULT_ALT: &str = "Wedding photo";

/// Scan the content directory. Seed photos only.
pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    scan_with_backend(root, None)
}

/// Scan the content directory, pulling photos and categories from `backend`
/// when one is given.
pub fn scan_with_backend(
    root: &Path,
    backend: Option<&dyn Backend>,
) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let seed = load_seed(root)?;

    let mut manifest = Manifest {
        origin: PhotoOrigin::Seed,
        photos: seed_photos(seed.photos),
        categories: seed.categories,
        config,
    };

    if let Some(backend) = backend {
        let categories = backend.list_categories()?;
        let rows = backend.list_photos(manifest.config.backend.photo_limit)?;
        if !rows.is_empty() {
            manifest.photos = remote_photos(rows, &categories);
            manifest.origin = PhotoOrigin::Remote;
        }
        if !categories.is_empty() {
            manifest.categories = categories.into_iter().map(|c| c.name).collect();
        }
    }

    validate_photos(&manifest.photos)?;
    Ok(manifest)
}

fn load_seed(root: &Path) -> Result<SeedFile, ScanError> {
    let path = root.join("photos.toml");
    if !path.exists() {
        return Ok(SeedFile::default());
    }
    let content = fs::read_to_string(&path)?;
    Ok(toml::from_str(&content)?)
}

fn seed_photos(entries: Vec<SeedPhoto>) -> Vec<Photo> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let caption = entry.caption.filter(|c| !c.trim().is_empty());
            let alt = if entry.alt.trim().is_empty() {
                caption.clone().unwrap_or_else(|| DEFAULT_ALT.to_string())
            } else {
                entry.alt
            };
            Photo {
                id: entry.id.unwrap_or_else(|| (i + 1).to_string()),
                src: entry.src.trim().to_string(),
                alt,
                category: entry.category.trim().to_string(),
                caption,
            }
        })
        .collect()
}

/// Map backend rows to photos: `public_url` is the source, the caption
/// doubles as alt text, and category ids become names.
fn remote_photos(rows: Vec<PhotoRow>, categories: &[CategoryRow]) -> Vec<Photo> {
    let names: HashMap<&str, &str> = categories
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();
    rows.into_iter()
        .map(|row| {
            let category = row
                .category_id
                .as_deref()
                .and_then(|id| names.get(id))
                .map(|name| name.to_string())
                .unwrap_or_default();
            let caption = row.caption.filter(|c| !c.trim().is_empty());
            Photo {
                id: row.id,
                src: row.public_url,
                alt: caption.clone().unwrap_or_else(|| DEFAULT_ALT.to_string()),
                category,
                caption,
            }
        })
        .collect()
}

fn validate_photos(photos: &[Photo]) -> Result<(), ScanError> {
    let mut seen = BTreeSet::new();
    for photo in photos {
        if !seen.insert(photo.id.as_str()) {
            return Err(ScanError::DuplicatePhotoId(photo.id.clone()));
        }
        if photo.src.is_empty() {
            return Err(ScanError::EmptySource(photo.id.clone()));
        }
    }
    Ok(())
}

/// Write the manifest as pretty JSON.
pub fn write_manifest(manifest: &Manifest, path: &Path) -> Result<(), ScanError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(manifest).map_err(std::io::Error::other)?;
    fs::write(path, json)?;
    Ok(())
}
