//! End-to-end pipeline tests: content directory → manifest → site.
//!
//! These drive the library the way the `build` command does, on a content
//! directory written into a temp dir.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wedding_album::{gallery, generate, scan};

fn write_content(root: &Path) {
    fs::write(
        root.join("config.toml"),
        r#"
[wedding]
couple_names = "Ana & Luis"
date = "2023-06-10"

[lightbox]
slideshow_seconds = 5

[[story]]
date = "2019"
title = "First Met"
description = "At a **friend's** wedding."
"#,
    )
    .unwrap();
    fs::write(
        root.join("photos.toml"),
        r#"
[[photos]]
id = "vows"
src = "https://drive.google.com/file/d/VOWS1/view?usp=sharing"
alt = "The vows"
category = "Ceremony"

[[photos]]
id = "toast"
src = "https://images.example.com/toast.jpg"
alt = "The toast"
category = "Reception & Party"
caption = "Cheers!"

[[photos]]
id = "kiss"
src = "https://images.example.com/kiss.jpg"
alt = "First kiss"
category = "Ceremony"
"#,
    )
    .unwrap();
    fs::create_dir_all(root.join("assets/icons")).unwrap();
    fs::write(root.join("assets/icons/favicon.svg"), "<svg/>").unwrap();
}

fn build() -> (TempDir, TempDir, generate::GenerateReport) {
    let content = TempDir::new().unwrap();
    write_content(content.path());
    let temp = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    let manifest = scan::scan(content.path()).unwrap();
    let manifest_path = temp.path().join("manifest.json");
    scan::write_manifest(&manifest, &manifest_path).unwrap();
    let report = generate::generate(&manifest_path, content.path(), out.path()).unwrap();
    (content, out, report)
}

fn read(out: &TempDir, path: &str) -> String {
    fs::read_to_string(out.path().join(path))
        .unwrap_or_else(|e| panic!("failed to read {path}: {e}"))
}

#[test]
fn scan_derives_categories_in_first_seen_order() {
    let content = TempDir::new().unwrap();
    write_content(content.path());
    let manifest = scan::scan(content.path()).unwrap();
    assert_eq!(
        gallery::category_list(&manifest.photos, &manifest.categories),
        vec!["All", "Ceremony", "Reception & Party"]
    );
}

#[test]
fn build_writes_every_page() {
    let (_content, out, report) = build();
    assert_eq!(report.photo_pages, 3);
    assert_eq!(report.slideshow_pages, 3);
    assert_eq!(report.assets_copied, 1);

    for path in [
        "index.html",
        "category/ceremony.html",
        "category/reception-party.html",
        "photo/1.html",
        "photo/3.html",
        "slideshow/2.html",
        "icons/favicon.svg",
    ] {
        assert!(out.path().join(path).exists(), "missing {path}");
    }
}

#[test]
fn index_renders_config_and_story() {
    let (_content, out, _) = build();
    let html = read(&out, "index.html");
    assert!(html.contains("Ana &amp; Luis"));
    assert!(html.contains("June 10, 2023"));
    assert!(html.contains("<strong>friend's</strong>") || html.contains("<strong>friend&#39;s</strong>"));
    assert!(html.contains(r#"data-slideshow-ms="5000""#));
}

#[test]
fn lightbox_pages_link_in_a_ring() {
    let (_content, out, _) = build();
    let last = read(&out, "photo/3.html");
    assert!(last.contains("3 / 3"));
    assert!(last.contains(r#"href="1.html" aria-label="Next photo""#));
    assert!(last.contains(r#"href="2.html" aria-label="Previous photo""#));
    assert!(last.contains("../index.html#photo-3"));
}

#[test]
fn slideshow_uses_configured_interval() {
    let (_content, out, _) = build();
    let html = read(&out, "slideshow/3.html");
    assert!(html.contains(r#"content="5; url=1.html""#));
}

#[test]
fn drive_photo_carries_fallback() {
    let (_content, out, _) = build();
    let html = read(&out, "index.html");
    assert!(html.contains("https://drive.google.com/uc?export=view&amp;id=VOWS1"));
    assert!(html.contains("data-fallback=\"https://drive.google.com/thumbnail?id=VOWS1&amp;sz=w2000\""));
}

#[test]
fn category_page_marks_active_filter() {
    let (_content, out, _) = build();
    let html = read(&out, "category/reception-party.html");
    let marker = html.find("filter-button active").expect("active filter");
    let start = html[..marker].rfind('<').unwrap();
    let end = marker + html[marker..].find('>').unwrap();
    let tag = &html[start..end];
    assert!(tag.contains(r#"href="../category/reception-party.html#gallery""#));
    assert!(html.contains("../photo/2.html"));
    assert!(!html.contains("../photo/1.html"));
}
