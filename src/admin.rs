//! Admin operations: categories, photo uploads, edits and deletes.
//!
//! Every operation runs against an explicitly passed [`Backend`] and only
//! after the session has passed the allow-list ([`Admin::authorize`]).
//!
//! ## Uploads
//!
//! Paths may be files or directories; directories are walked recursively and
//! every image file inside is picked up in sorted order. Each file is uploaded
//! to storage under a content-addressed path, then recorded in the `photos`
//! table. A failing file is reported and skipped; files already uploaded stay
//! uploaded, so a batch can partially succeed.

use crate::access::{Access, AllowList};
use crate::backend::{Backend, BackendError, CategoryRow, NewPhoto, PhotoPatch, PhotoRow};
use crate::naming;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("not signed in (pass --token or set WEDDING_ALBUM_TOKEN)")]
    NotSignedIn,
    #[error("access denied for {email}; sign out and use an allowed account")]
    AccessDenied { email: String },
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("category name must not be empty")]
    EmptyCategoryName,
    #[error("nothing to change (pass --caption and/or --category)")]
    NothingToChange,
    #[error("no image files found in {0:?}")]
    NoImages(Vec<PathBuf>),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{source}; removing uploaded {path} also failed: {cleanup}")]
    Orphaned {
        source: BackendError,
        path: String,
        cleanup: BackendError,
    },
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Image types accepted for upload, with their content types.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("avif", "image/avif"),
    ("heic", "image/heic"),
];

pub fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, content_type)| *content_type)
}

/// Expand files and directories into the list of image files to upload.
///
/// Explicit files are kept even if their extension is unknown (they are
/// uploaded as `application/octet-stream`); directory contents are filtered to
/// known image types.
pub fn collect_upload_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, AdminError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = Vec::new();
            for entry in WalkDir::new(path).follow_links(true) {
                let entry = entry?;
                if entry.file_type().is_file() && content_type_for(entry.path()).is_some() {
                    found.push(entry.into_path());
                }
            }
            found.sort();
            files.extend(found);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(AdminError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }
    }
    if files.is_empty() {
        return Err(AdminError::NoImages(paths.to_vec()));
    }
    Ok(files)
}

#[derive(Debug)]
pub struct UploadedPhoto {
    pub path: PathBuf,
    pub photo: PhotoRow,
}

#[derive(Debug)]
pub struct FailedUpload {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of an upload batch. Both lists may be non-empty.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub uploaded: Vec<UploadedPhoto>,
    pub failed: Vec<FailedUpload>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Look up the session behind `backend` and gate it with `allow_list`.
pub fn session_access(
    backend: &dyn Backend,
    allow_list: &AllowList,
) -> Result<Access, BackendError> {
    let user = backend.current_user()?;
    let email = user.as_ref().and_then(|u| u.email.as_deref());
    // A session without an email cannot match the list.
    Ok(match (user.is_some(), email) {
        (true, None) => Access::Denied {
            email: String::new(),
        },
        _ => allow_list.check(email),
    })
}

/// An authorized admin session.
pub struct Admin<'a> {
    backend: &'a dyn Backend,
    email: String,
}

impl<'a> Admin<'a> {
    pub fn authorize(backend: &'a dyn Backend, allow_list: &AllowList) -> Result<Self, AdminError> {
        match session_access(backend, allow_list)? {
            Access::SignedOut => Err(AdminError::NotSignedIn),
            Access::Denied { email } => Err(AdminError::AccessDenied { email }),
            Access::Granted { email } => Ok(Self { backend, email }),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn categories(&self) -> Result<Vec<CategoryRow>, AdminError> {
        Ok(self.backend.list_categories()?)
    }

    pub fn add_category(&self, name: &str) -> Result<CategoryRow, AdminError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AdminError::EmptyCategoryName);
        }
        Ok(self.backend.create_category(name)?)
    }

    pub fn photos(&self, limit: usize) -> Result<Vec<PhotoRow>, AdminError> {
        Ok(self.backend.list_photos(limit)?)
    }

    /// Resolve a category name (case-insensitive) to its id.
    fn category_id(&self, name: &str) -> Result<String, AdminError> {
        let wanted = name.trim();
        self.backend
            .list_categories()?
            .into_iter()
            .find(|c| c.name.eq_ignore_ascii_case(wanted) || c.id == wanted)
            .map(|c| c.id)
            .ok_or_else(|| AdminError::UnknownCategory(wanted.to_string()))
    }

    /// Upload `files` with a shared caption and category.
    ///
    /// The category is resolved before anything is uploaded; an unknown name
    /// fails the whole batch. Per-file failures are collected in the report.
    pub fn upload_batch(
        &self,
        files: &[PathBuf],
        caption: Option<&str>,
        category: Option<&str>,
    ) -> Result<BatchReport, AdminError> {
        let category_id = category.map(|name| self.category_id(name)).transpose()?;
        let caption = caption
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let mut report = BatchReport::default();
        for path in files {
            match self.upload_one(path, caption.clone(), category_id.clone()) {
                Ok(photo) => report.uploaded.push(UploadedPhoto {
                    path: path.clone(),
                    photo,
                }),
                Err(e) => report.failed.push(FailedUpload {
                    path: path.clone(),
                    message: e.to_string(),
                }),
            }
        }
        Ok(report)
    }

    fn upload_one(
        &self,
        path: &Path,
        caption: Option<String>,
        category_id: Option<String>,
    ) -> Result<PhotoRow, AdminError> {
        let bytes = std::fs::read(path)?;
        let extension = path.extension().and_then(|e| e.to_str());
        let storage_path = naming::upload_path(&bytes, extension);
        let content_type = content_type_for(path).unwrap_or("application/octet-stream");

        self.backend
            .upload_object(&storage_path, bytes, content_type)?;
        let public_url = self.backend.public_url(&storage_path);
        let row = NewPhoto {
            storage_path: storage_path.clone(),
            public_url,
            caption,
            category_id,
        };
        match self.backend.insert_photo(&row) {
            Ok(photo) => Ok(photo),
            Err(source) => match self.backend.remove_object(&storage_path) {
                Ok(()) => Err(source.into()),
                Err(cleanup) => Err(AdminError::Orphaned {
                    source,
                    path: storage_path,
                    cleanup,
                }),
            },
        }
    }

    /// Change a photo's caption and/or category.
    ///
    /// An empty string clears the field.
    pub fn edit(
        &self,
        id: &str,
        caption: Option<&str>,
        category: Option<&str>,
    ) -> Result<PhotoRow, AdminError> {
        let mut patch = PhotoPatch::default();
        if let Some(caption) = caption {
            let caption = caption.trim();
            patch.caption = Some((!caption.is_empty()).then(|| caption.to_string()));
        }
        if let Some(category) = category {
            patch.category_id = Some(if category.trim().is_empty() {
                None
            } else {
                Some(self.category_id(category)?)
            });
        }
        if patch.is_empty() {
            return Err(AdminError::NothingToChange);
        }
        Ok(self.backend.update_photo(id, &patch)?)
    }

    /// Delete a photo row, then its storage object.
    pub fn delete(&self, id: &str) -> Result<PhotoRow, AdminError> {
        let photo = self.backend.delete_photo(id)?;
        if let Some(path) = &photo.storage_path {
            self.backend.remove_object(path)?;
        }
        Ok(photo)
    }
}
