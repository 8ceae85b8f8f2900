//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and generates the
//! final static site.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): hero with countdown, gallery (filter
//!   "All"), love story, music player, footer
//! - **Category pages** (`/category/{slug}.html`): the gallery filtered to one
//!   category
//! - **Photo pages** (`/photo/{n}.html`): lightbox view with wraparound
//!   prev/next, counter, download link and thumbnail strip
//! - **Slideshow pages** (`/slideshow/{n}.html`): lightbox view that advances
//!   to the next photo after the configured interval
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── category/
//! │   ├── ceremony.html
//! │   └── reception.html
//! ├── photo/
//! │   ├── 1.html
//! │   └── ...
//! ├── slideshow/
//! │   ├── 1.html
//! │   └── ...
//! └── robots.txt                 # anything from content/assets/
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/nav.js`: Keyboard and drag navigation, image fallback, countdown
//!   tick, music player
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::{self, SiteConfig, StoryEvent};
use crate::countdown::{self, TimeLeft};
use crate::gallery::{self, CategoryFilter, FilteredPhoto};
use crate::lightbox::{Cursor, Lightbox, LightboxError};
use crate::media::ImageSource;
use crate::music::{self, Track, TrackSource};
use crate::naming;
use crate::scan::Manifest;
use crate::types::Photo;
use chrono::{Local, NaiveDateTime};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Lightbox error: {0}")]
    Lightbox(#[from] LightboxError),
}

/// What a generate run wrote.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// `(category, path)` for each category page, in filter order.
    pub category_pages: Vec<(String, String)>,
    pub photo_pages: usize,
    pub slideshow_pages: usize,
    pub assets_copied: usize,
    /// Build-time countdown shown in the hero.
    pub countdown: TimeLeft,
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/nav.js");

/// Generate the site from a manifest file on disk.
pub fn generate(
    manifest_path: &Path,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    generate_site(&manifest, source_dir, output_dir, Local::now().naive_local())
}

/// Generate the site from an in-memory manifest, with the countdown taken
/// relative to `now`.
pub fn generate_site(
    manifest: &Manifest,
    source_dir: &Path,
    output_dir: &Path,
    now: NaiveDateTime,
) -> Result<GenerateReport, GenerateError> {
    let config = &manifest.config;
    let color_css = config::generate_color_css(&config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);

    let target = config.wedding.parsed_date()?;
    let hero = Hero {
        time_left: countdown::countdown(target, now),
        target: countdown::next_occurrence(target, now),
    };

    fs::create_dir_all(output_dir)?;
    let mut report = GenerateReport {
        countdown: hero.time_left,
        ..GenerateReport::default()
    };

    // Index page is the "All" filter
    let mut filter = CategoryFilter::for_photos(&manifest.photos, &manifest.categories);
    let site = Site {
        manifest,
        css: &css,
        hero: &hero,
        slugs: category_slugs(filter.categories()),
    };

    fs::write(
        output_dir.join("index.html"),
        render_gallery_page(&site, &filter, "").into_string(),
    )?;

    let category_dir = output_dir.join("category");
    let categories: Vec<String> = filter.categories().to_vec();
    for name in categories.iter().filter(|c| c.as_str() != gallery::ALL) {
        filter.select(name);
        let filename = format!("{}.html", site.slug(name));
        fs::create_dir_all(&category_dir)?;
        fs::write(
            category_dir.join(&filename),
            render_gallery_page(&site, &filter, "../").into_string(),
        )?;
        report
            .category_pages
            .push((name.clone(), format!("category/{filename}")));
    }

    if !manifest.photos.is_empty() {
        let photo_dir = output_dir.join("photo");
        let slideshow_dir = output_dir.join("slideshow");
        fs::create_dir_all(&photo_dir)?;
        fs::create_dir_all(&slideshow_dir)?;

        let settings = config.lightbox.settings();
        let mut lightbox = Lightbox::new(manifest.photos.len(), settings)?;
        for index in 0..manifest.photos.len() {
            lightbox.open_at(index)?;
            let filename = format!("{}.html", index + 1);

            let page = render_photo_page(&site, &lightbox, ViewMode::Browse)?;
            fs::write(photo_dir.join(&filename), page.into_string())?;
            report.photo_pages += 1;

            let page = render_photo_page(&site, &lightbox, ViewMode::Slideshow)?;
            fs::write(slideshow_dir.join(&filename), page.into_string())?;
            report.slideshow_pages += 1;
        }
        lightbox.close();
    }

    let assets = source_dir.join("assets");
    if assets.is_dir() {
        report.assets_copied = copy_dir_recursive(&assets, output_dir)?;
    }

    Ok(report)
}

/// Copy a directory tree, returning the number of files copied.
fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<usize> {
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copied += copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
            copied += 1;
        }
    }
    Ok(copied)
}

struct Hero {
    time_left: TimeLeft,
    target: Option<NaiveDateTime>,
}

/// Page slug for every real category, unique across the build.
fn category_slugs(categories: &[String]) -> HashMap<String, String> {
    let names: Vec<&String> = categories
        .iter()
        .filter(|c| c.as_str() != gallery::ALL)
        .collect();
    let slugs = naming::unique_slugs(&names);
    names.into_iter().cloned().zip(slugs).collect()
}

/// Everything shared by every page of one build.
struct Site<'a> {
    manifest: &'a Manifest,
    css: &'a str,
    hero: &'a Hero,
    slugs: HashMap<String, String>,
}

impl Site<'_> {
    fn config(&self) -> &SiteConfig {
        &self.manifest.config
    }

    fn slug(&self, category: &str) -> String {
        self.slugs
            .get(category)
            .cloned()
            .unwrap_or_else(|| naming::slugify(category))
    }

    fn image(&self, photo: &Photo) -> ImageSource {
        ImageSource::new(&photo.src, self.config().gallery.thumbnail_size)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Browse,
    Slideshow,
}

impl ViewMode {
    fn dir(self) -> &'static str {
        match self {
            ViewMode::Browse => "photo",
            ViewMode::Slideshow => "slideshow",
        }
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    title: &str,
    site: &Site,
    head_extra: Option<Markup>,
    body_class: Option<&str>,
    content: Markup,
) -> Markup {
    let lightbox = &site.config().lightbox;
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if let Some(extra) = head_extra {
                    (extra)
                }
                title { (title) }
                style { (PreEscaped(site.css)) }
            }
            body class=[body_class]
                data-drag-threshold=(lightbox.drag_threshold_px)
                data-slideshow-ms=(lightbox.slideshow_seconds * 1000) {
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// `<img>` for a photo, carrying the one-shot fallback for the page script.
fn photo_img(image: &ImageSource, alt: &str, lazy: bool) -> Markup {
    html! {
        img src=(image.src)
            alt=(alt)
            loading=[lazy.then_some("lazy")]
            data-fallback=[image.fallback.as_deref()];
    }
}

fn render_hero(site: &Site, root: &str) -> Markup {
    let wedding = &site.config().wedding;
    let background = ImageSource::new(&wedding.hero_image, site.config().gallery.thumbnail_size);
    let target = site
        .hero
        .target
        .map(|t| t.format("%Y-%m-%dT%H:%M:%S").to_string());
    html! {
        header.hero style={ "background-image: url('" (background.src) "')" } {
            div.hero-overlay {
                p.hero-kicker { (wedding.tagline) }
                h1.hero-names { (wedding.couple_names) }
                p.hero-date { (wedding.display_date()) }
                div.countdown data-target=[target] {
                    @for (value, label) in site.hero.time_left.units() {
                        div.countdown-unit {
                            span.countdown-value data-unit=(label.to_lowercase()) { (value) }
                            span.countdown-label { (label) }
                        }
                    }
                }
                a.hero-scroll href={ (root) "index.html#gallery" } { "View Gallery" }
            }
        }
    }
}

fn render_filter_bar(site: &Site, filter: &CategoryFilter, root: &str) -> Markup {
    html! {
        nav.gallery-filters aria-label="Photo categories" {
            @for name in filter.categories() {
                @let active = name == filter.active();
                @let href = if name == gallery::ALL {
                    format!("{root}index.html#gallery")
                } else {
                    format!("{root}category/{}.html#gallery", site.slug(name))
                };
                a.filter-button.active[active] href=(href)
                    aria-current=[active.then_some("page")] {
                    (name)
                }
            }
        }
    }
}

fn render_masonry(site: &Site, visible: &[FilteredPhoto], root: &str) -> Markup {
    html! {
        @if visible.is_empty() {
            p.gallery-empty { "No photos yet." }
        } @else {
            div.masonry {
                @for item in visible {
                    @let image = site.image(item.photo);
                    a.masonry-item id={ "photo-" (item.index + 1) }
                        href={ (root) "photo/" (item.index + 1) ".html" } {
                        (photo_img(&image, &item.photo.alt, true))
                        @if let Some(caption) = &item.photo.caption {
                            span.masonry-caption { (caption) }
                        }
                    }
                }
            }
        }
    }
}

fn render_story(events: &[StoryEvent]) -> Markup {
    html! {
        @if !events.is_empty() {
            section.story id="story" {
                h2 { "Our Love Story" }
                ol.timeline {
                    @for event in events {
                        li.timeline-event {
                            span.timeline-date { (event.date) }
                            h3 { (event.title) }
                            @if !event.description.is_empty() {
                                div.timeline-body { (PreEscaped(markdown_to_html(&event.description))) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

/// Playback element for one track: `<audio>` for files, `<iframe>` for
/// embedded videos.
fn track_player(track: &Track, volume: f32) -> Markup {
    let url = track.source.playback_url();
    html! {
        @match &track.source {
            TrackSource::DirectAudio { .. } => {
                audio.music-audio src=(url) preload="none" data-volume=(volume) {}
            }
            TrackSource::EmbeddedVideo { .. } => {
                iframe.music-embed src=(url) title=(track.title)
                    allow="autoplay; encrypted-media" loading="lazy" {}
            }
        }
    }
}

fn source_kind(source: &TrackSource) -> &'static str {
    match source {
        TrackSource::DirectAudio { .. } => "direct_audio",
        TrackSource::EmbeddedVideo { .. } => "embedded_video",
    }
}

fn render_music(site: &Site) -> Markup {
    let music = &site.config().music;
    let playlist = music::playlist_from_config(&music.tracks);
    let Some(first) = playlist.first() else {
        return html! {};
    };
    html! {
        aside.music-player data-volume=(music.volume) {
            div.music-prompt role="dialog" aria-label="Background music" {
                p { "Would you like some music while you browse?" }
                button.music-start type="button" { "Play music" }
                button.music-dismiss type="button" { "Continue without" }
            }
            div.music-stage { (track_player(first, music.volume)) }
            div.music-controls {
                button.music-prev type="button" aria-label="Previous track" { "⏮" }
                button.music-toggle type="button" aria-label="Play or pause" { "▶" }
                button.music-next type="button" aria-label="Next track" { "⏭" }
                button.music-mute type="button" aria-label="Mute" { "🔊" }
                input.music-volume type="range" min="0" max="1" step="0.05"
                    value=(music.volume) aria-label="Volume";
                span.music-title { (first.title) }
            }
            ol.music-playlist hidden {
                @for track in &playlist {
                    li data-kind=(source_kind(&track.source))
                        data-src=(track.source.playback_url()) { (track.title) }
                }
            }
        }
    }
}

fn render_footer(site: &Site) -> Markup {
    let wedding = &site.config().wedding;
    html! {
        footer.site-footer {
            p.footer-heading { "Thank You" }
            p.footer-message { (wedding.thank_you) }
            p.footer-names { (wedding.couple_names) }
            p.footer-date { (wedding.display_date()) }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the one-page site with the gallery filtered by `filter`.
///
/// `root` is the relative path back to the output root (`""` or `"../"`).
fn render_gallery_page(site: &Site, filter: &CategoryFilter, root: &str) -> Markup {
    let config = site.config();
    let visible = filter.apply(&site.manifest.photos);
    let title = if filter.active() == gallery::ALL {
        config.wedding.couple_names.clone()
    } else {
        format!("{} · {}", filter.active(), config.wedding.couple_names)
    };

    let content = html! {
        (render_hero(site, root))
        main {
            section.gallery id="gallery" {
                header.section-header {
                    p.section-kicker { (config.gallery.subtitle) }
                    h2 { (config.gallery.title) }
                }
                (render_filter_bar(site, filter, root))
                (render_masonry(site, &visible, root))
            }
            (render_story(&config.story))
        }
        (render_music(site))
        (render_footer(site))
    };

    base_document(&title, site, None, Some("gallery-view"), content)
}

/// Renders one lightbox view for the photo `lightbox` is open at.
fn render_photo_page(
    site: &Site,
    lightbox: &Lightbox,
    mode: ViewMode,
) -> Result<Markup, GenerateError> {
    let photos = &site.manifest.photos;
    let cursor = Cursor::new(lightbox.len(), lightbox.index())?;
    let index = cursor.index();
    let photo = &photos[index];
    let image = site.image(photo);
    let number = |i: usize| i + 1;

    let dir = mode.dir();
    let prev_url = format!("{}.html", number(cursor.peek_previous()));
    let next_url = format!("{}.html", number(cursor.peek_next()));
    let close_url = format!("../index.html#photo-{}", number(index));
    let interval = site.config().lightbox.slideshow_seconds;

    let head_extra = (mode == ViewMode::Slideshow).then(|| {
        html! {
            meta http-equiv="refresh" content={ (interval) "; url=" (next_url) };
        }
    });

    let content = html! {
        div.lightbox data-mode=(dir) data-close=(close_url) {
            div.lightbox-toolbar {
                span.lightbox-counter { (lightbox.counter()) }
                div.lightbox-actions {
                    label.lightbox-zoom for="zoom-toggle" { "Zoom" }
                    @match mode {
                        ViewMode::Browse => {
                            a.lightbox-play href={ "../slideshow/" (number(index)) ".html" } { "Play slideshow" }
                        }
                        ViewMode::Slideshow => {
                            a.lightbox-play.active href={ "../photo/" (number(index)) ".html" } { "Stop slideshow" }
                        }
                    }
                    a.lightbox-download href=(image.download) download target="_blank" rel="noopener" { "Download" }
                    a.lightbox-close href=(close_url) aria-label="Close" { "×" }
                }
            }
            input #zoom-toggle .zoom-toggle type="checkbox" hidden;
            figure.lightbox-stage {
                label.lightbox-image for="zoom-toggle" {
                    (photo_img(&image, &photo.alt, false))
                }
                @if let Some(caption) = &photo.caption {
                    figcaption { (caption) }
                }
            }
            a.lightbox-prev href=(prev_url) aria-label="Previous photo" data-nav="prev" { "‹" }
            a.lightbox-next href=(next_url) aria-label="Next photo" data-nav="next" { "›" }
            nav.thumbnail-strip {
                @for i in lightbox.thumbnail_strip() {
                    @let thumb = site.image(&photos[i]);
                    a.thumb.current[i == index] href={ (number(i)) ".html" } {
                        (photo_img(&thumb, &photos[i].alt, true))
                    }
                }
            }
        }
    };

    let title = format!("{} · {}", photo.alt, lightbox.counter());
    Ok(base_document(
        &title,
        site,
        head_extra,
        Some("lightbox-view"),
        content,
    ))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{self, PhotoOrigin};
    use crate::test_helpers::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn manifest(photos: Vec<Photo>) -> Manifest {
        Manifest {
            origin: PhotoOrigin::Seed,
            photos,
            categories: vec![],
            config: SiteConfig::default(),
        }
    }

    fn build(manifest: &Manifest) -> (TempDir, GenerateReport) {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let report = generate_site(manifest, src.path(), out.path(), at(2024, 9, 14)).unwrap();
        (out, report)
    }

    fn read(dir: &TempDir, path: &str) -> String {
        fs::read_to_string(dir.path().join(path)).unwrap()
    }

    #[test]
    fn generates_all_pages_for_fixtures() {
        let content = setup_fixtures();
        let manifest = scan::scan(content.path()).unwrap();
        let out = TempDir::new().unwrap();
        let report =
            generate_site(&manifest, content.path(), out.path(), at(2024, 9, 14)).unwrap();

        assert_eq!(report.photo_pages, 6);
        assert_eq!(report.slideshow_pages, 6);
        assert_eq!(report.category_pages.len(), 3);
        assert_eq!(report.assets_copied, 1);
        assert!(out.path().join("index.html").exists());
        assert!(out.path().join("category/ceremony.html").exists());
        assert!(out.path().join("photo/6.html").exists());
        assert!(out.path().join("slideshow/1.html").exists());
        assert!(out.path().join("robots.txt").exists());
    }

    #[test]
    fn index_has_hero_countdown_one_day_out() {
        let (out, report) = build(&manifest(vec![sample_photo("a", "")]));
        assert_eq!(report.countdown.days, 1);
        let html = read(&out, "index.html");
        assert!(html.contains("Emma &amp; James"));
        assert!(html.contains("September 15, 2024"));
        assert!(html.contains(r#"data-target="2024-09-15T00:00:00""#));
    }

    #[test]
    fn index_shows_all_photos_and_filter_links() {
        let photos = vec![
            sample_photo("a", "Ceremony"),
            sample_photo("b", "Reception"),
        ];
        let (out, _) = build(&manifest(photos));
        let html = read(&out, "index.html");
        assert!(html.contains("photo/1.html"));
        assert!(html.contains("photo/2.html"));
        assert!(html.contains("category/ceremony.html#gallery"));
        assert!(html.contains("category/reception.html#gallery"));
    }

    #[test]
    fn category_page_filters_but_keeps_global_index() {
        let photos = vec![
            sample_photo("a", "Ceremony"),
            sample_photo("b", "Reception"),
            sample_photo("c", "Ceremony"),
        ];
        let (out, _) = build(&manifest(photos));
        let html = read(&out, "category/ceremony.html");
        assert!(html.contains("../photo/1.html"));
        assert!(html.contains("../photo/3.html"));
        assert!(!html.contains("../photo/2.html"));
        assert!(html.contains("../index.html#gallery"));
    }

    #[test]
    fn colliding_category_slugs_get_distinct_pages() {
        let photos = vec![
            sample_photo("a", "Reception & Party"),
            sample_photo("b", "Reception Party"),
        ];
        let (out, report) = build(&manifest(photos));
        assert_eq!(
            report.category_pages,
            vec![
                (
                    "Reception & Party".to_string(),
                    "category/reception-party.html".to_string()
                ),
                (
                    "Reception Party".to_string(),
                    "category/reception-party-2.html".to_string()
                ),
            ]
        );

        let first = read(&out, "category/reception-party.html");
        assert!(first.contains("../photo/1.html"));
        assert!(!first.contains("../photo/2.html"));
        let second = read(&out, "category/reception-party-2.html");
        assert!(second.contains("../photo/2.html"));
        assert!(!second.contains("../photo/1.html"));

        let index = read(&out, "index.html");
        assert!(index.contains("category/reception-party.html#gallery"));
        assert!(index.contains("category/reception-party-2.html#gallery"));
    }

    #[test]
    fn photo_pages_wrap_around() {
        let photos = vec![
            sample_photo("a", ""),
            sample_photo("b", ""),
            sample_photo("c", ""),
        ];
        let (out, _) = build(&manifest(photos));
        let first = read(&out, "photo/1.html");
        assert!(first.contains(r#"href="3.html" aria-label="Previous photo""#));
        assert!(first.contains(r#"href="2.html" aria-label="Next photo""#));
        assert!(first.contains("1 / 3"));

        let last = read(&out, "photo/3.html");
        assert!(last.contains(r#"href="1.html" aria-label="Next photo""#));
    }

    #[test]
    fn slideshow_page_refreshes_to_next() {
        let photos = vec![sample_photo("a", ""), sample_photo("b", "")];
        let (out, _) = build(&manifest(photos));
        let html = read(&out, "slideshow/2.html");
        assert!(html.contains(r#"http-equiv="refresh" content="3; url=1.html""#));
        assert!(html.contains("Stop slideshow"));
    }

    #[test]
    fn drive_photos_get_fallback_and_download() {
        let mut photo = sample_photo("a", "");
        photo.src = "https://drive.google.com/file/d/FILE123/view".to_string();
        let (out, _) = build(&manifest(vec![photo]));
        let html = read(&out, "photo/1.html");
        assert!(html.contains("https://drive.google.com/uc?export=view&amp;id=FILE123"));
        assert!(html.contains(r#"data-fallback="https://drive.google.com/thumbnail?id=FILE123&amp;sz=w2000""#));
        assert!(html.contains("https://drive.google.com/uc?export=download&amp;id=FILE123"));
    }

    #[test]
    fn photo_page_has_zoom_toggle() {
        let (out, _) = build(&manifest(vec![sample_photo("a", "")]));
        let html = read(&out, "photo/1.html");
        assert!(html.contains(r#"id="zoom-toggle""#));
        assert!(html.contains(r#"class="zoom-toggle""#));
        assert!(html.contains(r#"for="zoom-toggle""#));
    }

    #[test]
    fn direct_photos_have_no_fallback() {
        let (out, _) = build(&manifest(vec![sample_photo("a", "")]));
        let html = read(&out, "photo/1.html");
        assert!(html.contains(r#"<img src="https://images.example.com/a.jpg""#));
        assert!(!html.contains(r#"data-fallback=""#));
    }

    #[test]
    fn thumbnail_strip_is_windowed() {
        let photos: Vec<Photo> = (0..10).map(|i| sample_photo(&i.to_string(), "")).collect();
        let (out, _) = build(&manifest(photos));
        let html = read(&out, "photo/1.html");
        let strip = html.split(r#"<nav class="thumbnail-strip">"#).nth(1).unwrap();
        assert!(strip.contains(r#"href="4.html""#));
        assert!(!strip.contains(r#"href="5.html""#));
    }

    #[test]
    fn empty_gallery_renders_placeholder() {
        let (out, report) = build(&manifest(vec![]));
        assert_eq!(report.photo_pages, 0);
        assert!(read(&out, "index.html").contains("No photos yet."));
        assert!(!out.path().join("photo").exists());
    }

    #[test]
    fn music_dispatches_on_source_kind() {
        let mut m = manifest(vec![]);
        m.config.music.tracks = vec![config::TrackConfig {
            title: "Our Song".to_string(),
            url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
        }];
        let (out, _) = build(&m);
        let html = read(&out, "index.html");
        assert!(html.contains("<iframe"));
        assert!(html.contains(r#"data-kind="embedded_video""#));
        assert!(html.contains("Continue without"));
    }

    #[test]
    fn no_tracks_no_player() {
        let mut m = manifest(vec![]);
        m.config.music.tracks.clear();
        let (out, _) = build(&m);
        assert!(!read(&out, "index.html").contains(r#"<aside class="music-player""#));
    }

    #[test]
    fn story_markdown_is_rendered() {
        let mut m = manifest(vec![]);
        m.config.story = vec![StoryEvent {
            date: "June 2020".to_string(),
            title: "First Date".to_string(),
            description: "Coffee that turned into *dinner*.".to_string(),
        }];
        let (out, _) = build(&m);
        let html = read(&out, "index.html");
        assert!(html.contains("Our Love Story"));
        assert!(html.contains("<em>dinner</em>"));
    }

    #[test]
    fn generate_reads_manifest_file() {
        let content = setup_fixtures();
        let manifest = scan::scan(content.path()).unwrap();
        let manifest_path = content.path().join("tmp/manifest.json");
        scan::write_manifest(&manifest, &manifest_path).unwrap();
        let out = TempDir::new().unwrap();
        let report = generate(&manifest_path, content.path(), out.path()).unwrap();
        assert_eq!(report.photo_pages, 6);
    }
}
