//! CLI output formatting for the pipeline and admin commands.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (photo, category, page) is its semantic identity:
//! positional index plus title. Sources, URLs and paths are secondary context
//! on indented lines underneath.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Photos (seed, 3)
//! 001 Bride and groom portrait [Portraits]
//!     Source: https://images.unsplash.com/...
//! 002 Wedding rings [Ceremony]
//!     Source: https://drive.google.com/file/d/1AbC/view
//!     Caption: Forever starts here
//!
//! Categories
//!     All, Ceremony, Reception, Portraits
//!
//! Config
//!     config.toml
//!     photos.toml
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! 001 Ceremony → category/ceremony.html
//! 002 Reception → category/reception.html
//!
//! Generated 2 category pages, 3 photo pages, 3 slideshow pages
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::access::Access;
use crate::admin::BatchReport;
use crate::backend::{CategoryRow, PhotoRow};
use crate::countdown::TimeLeft;
use crate::gallery;
use crate::generate::GenerateReport;
use crate::media::ImageSource;
use crate::scan::{Manifest, PhotoOrigin};
use chrono::NaiveDateTime;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Positional index + title, with the category in brackets when present.
///
/// ```text
/// 001 Wedding rings [Ceremony]
/// 002 Wedding photo
/// ```
fn photo_header(index: usize, title: &str, category: &str) -> String {
    if category.is_empty() {
        format!("{} {}", format_index(index), title)
    } else {
        format!("{} {} [{}]", format_index(index), title, category)
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let origin = match manifest.origin {
        PhotoOrigin::Seed => "seed",
        PhotoOrigin::Remote => "remote",
    };
    lines.push(format!("Photos ({}, {})", origin, manifest.photos.len()));
    for (i, photo) in manifest.photos.iter().enumerate() {
        lines.push(photo_header(i + 1, &photo.alt, &photo.category));
        lines.push(format!("{}Source: {}", indent(1), photo.src));
        if let Some(caption) = &photo.caption {
            lines.push(format!("{}Caption: {}", indent(1), truncate(caption, 60)));
        }
    }

    let categories = gallery::category_list(&manifest.photos, &manifest.categories);
    lines.push(String::new());
    lines.push("Categories".to_string());
    lines.push(format!("{}{}", indent(1), categories.join(", ")));

    let story = &manifest.config.story;
    if !story.is_empty() {
        lines.push(String::new());
        lines.push("Story".to_string());
        for (i, event) in story.iter().enumerate() {
            lines.push(format!("{} {} ({})", format_index(i + 1), event.title, event.date));
        }
    }

    let mut config_files = Vec::new();
    for name in ["config.toml", "photos.toml"] {
        if source_root.join(name).exists() {
            config_files.push(name);
        }
    }
    if source_root.join("assets").is_dir() {
        config_files.push("assets/");
    }
    if !config_files.is_empty() {
        lines.push(String::new());
        lines.push("Config".to_string());
        for file in config_files {
            lines.push(format!("{}{}", indent(1), file));
        }
    }
    lines
}

pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    print_lines(format_scan_output(manifest, source_root));
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = vec!["Home → index.html".to_string()];
    for (i, (name, path)) in report.category_pages.iter().enumerate() {
        lines.push(format!("{} {} → {}", format_index(i + 1), name, path));
    }
    if report.photo_pages > 0 {
        lines.push(format!(
            "Photos → photo/1.html .. photo/{}.html",
            report.photo_pages
        ));
    }
    if report.assets_copied > 0 {
        lines.push(format!("Assets: {} files", report.assets_copied));
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {} category pages, {} photo pages, {} slideshow pages",
        report.category_pages.len(),
        report.photo_pages,
        report.slideshow_pages
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    print_lines(format_generate_output(report));
}

// ============================================================================
// Countdown and resolver
// ============================================================================

pub fn format_countdown(time_left: &TimeLeft, target: Option<NaiveDateTime>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(target) = target {
        lines.push(format!("Next anniversary: {}", target.format("%A, %B %-d, %Y")));
    }
    let parts: Vec<String> = time_left
        .units()
        .iter()
        .map(|(value, label)| format!("{} {}", value, label.to_lowercase()))
        .collect();
    lines.push(parts.join(" "));
    lines
}

pub fn print_countdown(time_left: &TimeLeft, target: Option<NaiveDateTime>) {
    print_lines(format_countdown(time_left, target));
}

pub fn format_resolved(raw: &str, image: &ImageSource) -> Vec<String> {
    let mut lines = vec![raw.to_string()];
    lines.push(format!("{}View: {}", indent(1), image.src));
    lines.push(format!("{}Download: {}", indent(1), image.download));
    match &image.fallback {
        Some(fallback) => lines.push(format!("{}Fallback: {}", indent(1), fallback)),
        None => lines.push(format!("{}Fallback: none", indent(1))),
    }
    lines
}

pub fn print_resolved(raw: &str, image: &ImageSource) {
    print_lines(format_resolved(raw, image));
}

// ============================================================================
// Admin
// ============================================================================

pub fn format_access(access: &Access) -> Vec<String> {
    match access {
        Access::SignedOut => vec!["Not signed in".to_string()],
        Access::Denied { email } => vec![
            format!("Access denied for {}", email),
            format!(
                "{}This account is not on the allow-list. Run `admin logout` and sign in with an allowed email.",
                indent(1)
            ),
        ],
        Access::Granted { email } => vec![format!("Signed in as {}", email)],
    }
}

pub fn print_access(access: &Access) {
    print_lines(format_access(access));
}

pub fn format_categories(categories: &[CategoryRow]) -> Vec<String> {
    if categories.is_empty() {
        return vec!["No categories".to_string()];
    }
    categories
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} {} ({})", format_index(i + 1), c.name, c.id))
        .collect()
}

pub fn print_categories(categories: &[CategoryRow]) {
    print_lines(format_categories(categories));
}

/// Photo rows with their category names resolved from `categories`.
pub fn format_photo_rows(photos: &[PhotoRow], categories: &[CategoryRow]) -> Vec<String> {
    if photos.is_empty() {
        return vec!["No photos".to_string()];
    }
    let mut lines = Vec::new();
    for (i, photo) in photos.iter().enumerate() {
        let category = photo
            .category_id
            .as_deref()
            .and_then(|id| categories.iter().find(|c| c.id == id))
            .map(|c| c.name.as_str())
            .unwrap_or("");
        let title = photo.caption.as_deref().unwrap_or("(no caption)");
        lines.push(photo_header(i + 1, &truncate(title, 60), category));
        lines.push(format!("{}Id: {}", indent(1), photo.id));
        lines.push(format!("{}URL: {}", indent(1), photo.public_url));
        if let Some(created) = &photo.created_at {
            lines.push(format!("{}Added: {}", indent(1), created));
        }
    }
    lines
}

pub fn print_photo_rows(photos: &[PhotoRow], categories: &[CategoryRow]) {
    print_lines(format_photo_rows(photos, categories));
}

pub fn format_batch_report(report: &BatchReport) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, item) in report.uploaded.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), item.path.display()));
        lines.push(format!("{}Uploaded: {}", indent(1), item.photo.public_url));
    }
    if !report.failed.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Failed".to_string());
        for (i, item) in report.failed.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), item.path.display()));
            lines.push(format!("{}Error: {}", indent(1), item.message));
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "Uploaded {} of {} files",
        report.uploaded.len(),
        report.uploaded.len() + report.failed.len()
    ));
    lines
}

pub fn print_batch_report(report: &BatchReport) {
    print_lines(format_batch_report(report));
}
