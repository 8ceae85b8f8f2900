//! Shared test utilities.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//! let photo = find_photo(&manifest, "rings");
//! assert_eq!(photo.category, "Ceremony");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::Manifest;
use crate::types::Photo;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Overwrite `photos.toml` in a content directory.
pub fn write_photos_toml(root: &Path, content: &str) {
    std::fs::write(root.join("photos.toml"), content).unwrap();
}

// =========================================================================
// Manifest lookups, panicking with a clear message on miss
// =========================================================================

/// Find a photo by id. Panics if not found.
pub fn find_photo<'a>(manifest: &'a Manifest, id: &str) -> &'a Photo {
    manifest
        .photos
        .iter()
        .find(|p| p.id == id)
        .unwrap_or_else(|| {
            let ids: Vec<&str> = manifest.photos.iter().map(|p| p.id.as_str()).collect();
            panic!("photo '{id}' not found. Available: {ids:?}")
        })
}

/// Photo ids in manifest order.
pub fn photo_ids(manifest: &Manifest) -> Vec<&str> {
    manifest.photos.iter().map(|p| p.id.as_str()).collect()
}

/// A photo with a predictable `src` and alt text.
pub fn sample_photo(id: &str, category: &str) -> Photo {
    Photo {
        id: id.to_string(),
        src: format!("https://images.example.com/{id}.jpg"),
        alt: format!("Photo {id}"),
        category: category.to_string(),
        caption: None,
    }
}
