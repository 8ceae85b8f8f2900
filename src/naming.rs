//! Filename helpers for generated pages and uploaded objects.
//!
//! ## Category pages
//!
//! Each category gets its own filter page under `category/`. The filename is
//! a slug of the category name:
//! - `"Ceremony"` → `ceremony`
//! - `"First Dance & Toasts"` → `first-dance-toasts`
//! - `"Café"` → `café` (no transliteration, non-ASCII letters are lowercased)
//!
//! The synthetic "All" category has no page of its own; it links to the index.
//!
//! ## Uploaded objects
//!
//! Uploads are stored under a content-addressed path so re-uploading the same
//! bytes lands on the same object.

use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Folder inside the storage bucket that receives uploads.
pub const UPLOAD_FOLDER: &str = "gallery";

/// Hex characters of the SHA-256 digest used in upload paths.
const HASH_PREFIX_LEN: usize = 16;

/// Turn a category name into a filename-safe slug.
///
/// Runs of anything that is not alphanumeric collapse into a single dash;
/// leading and trailing dashes are dropped. Returns `"category"` when nothing
/// usable remains.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "category".to_string()
    } else {
        slug
    }
}

/// Slugs for `names` in order, with `-2`, `-3`, ... appended where two
/// names would otherwise share a slug.
pub fn unique_slugs<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut taken = HashSet::new();
    names
        .iter()
        .map(|name| {
            let base = slugify(name.as_ref());
            let mut slug = base.clone();
            let mut n = 2;
            while !taken.insert(slug.clone()) {
                slug = format!("{base}-{n}");
                n += 1;
            }
            slug
        })
        .collect()
}

/// Storage path for an upload: `gallery/<sha256 prefix>.<ext>`.
///
/// The extension is lowercased; files without one get `bin`.
pub fn upload_path(bytes: &[u8], extension: Option<&str>) -> String {
    let digest = Sha256::digest(bytes);
    let hex: String = digest
        .iter()
        .take(HASH_PREFIX_LEN / 2)
        .map(|b| format!("{b:02x}"))
        .collect();
    let ext = extension
        .map(str::to_ascii_lowercase)
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| "bin".to_string());
    format!("{UPLOAD_FOLDER}/{hex}.{ext}")
}
