//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML value, the user file is merged on top key-by-key, and
//! the result is deserialized and validated.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml      # Site config (overrides stock defaults)
//! ├── photos.toml      # Seed photo list (optional)
//! └── assets/          # Copied verbatim into the output root (optional)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! [wedding]
//! couple_names = "Emma & James"
//! date = "2024-09-15"          # ISO date; the countdown targets its month/day
//! hero_image = "https://..."
//!
//! [gallery]
//! thumbnail_size = 2000        # Max width for the Drive thumbnail fallback
//!
//! [lightbox]
//! drag_threshold_px = 100.0
//! slideshow_seconds = 3
//!
//! [access]
//! allowed_emails = ["bride@example.com"]
//!
//! [backend]
//! url = "https://project.supabase.co"
//! anon_key = "..."
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::access::AllowList;
use crate::lightbox::LightboxSettings;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Couple, date and hero banner.
    pub wedding: WeddingConfig,
    /// Gallery section headings and image fallback size.
    pub gallery: GalleryConfig,
    /// Lightbox gesture and slideshow tuning.
    pub lightbox: LightboxConfig,
    /// Admin allow-list.
    pub access: AccessConfig,
    /// Hosted backend connection (optional).
    pub backend: BackendConfig,
    /// Background music playlist.
    pub music: MusicConfig,
    /// Love-story timeline entries, in display order.
    pub story: Vec<StoryEvent>,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.wedding.parsed_date()?;
        if self.wedding.couple_names.trim().is_empty() {
            return Err(ConfigError::Validation(
                "wedding.couple_names must not be empty".into(),
            ));
        }
        if self.gallery.thumbnail_size == 0 {
            return Err(ConfigError::Validation(
                "gallery.thumbnail_size must be non-zero".into(),
            ));
        }
        if !(self.lightbox.drag_threshold_px.is_finite() && self.lightbox.drag_threshold_px > 0.0)
        {
            return Err(ConfigError::Validation(
                "lightbox.drag_threshold_px must be a positive number".into(),
            ));
        }
        if self.lightbox.slideshow_seconds == 0 {
            return Err(ConfigError::Validation(
                "lightbox.slideshow_seconds must be non-zero".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.music.volume) {
            return Err(ConfigError::Validation(
                "music.volume must be between 0.0 and 1.0".into(),
            ));
        }
        if let Some(track) = self.music.tracks.iter().find(|t| t.url.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "music track '{}' has an empty url",
                track.title
            )));
        }
        if let Some(raw) = &self.backend.url {
            url::Url::parse(raw).map_err(|e| {
                ConfigError::Validation(format!("backend.url '{raw}' is not a valid URL: {e}"))
            })?;
        }
        if self.backend.photo_limit == 0 {
            return Err(ConfigError::Validation(
                "backend.photo_limit must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// The couple and the day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeddingConfig {
    /// Names shown in the hero banner and footer.
    pub couple_names: String,
    /// Wedding date as `YYYY-MM-DD`. The countdown targets the next
    /// occurrence of its month and day.
    pub date: String,
    /// Human-readable date for the hero banner. Derived from `date` when absent.
    pub date_label: Option<String>,
    /// Hero background image (any source the media resolver accepts).
    pub hero_image: String,
    /// Line under the couple names.
    pub tagline: String,
    /// Footer message.
    pub thank_you: String,
}

impl Default for WeddingConfig {
    fn default() -> Self {
        Self {
            couple_names: "Emma & James".to_string(),
            date: "2024-09-15".to_string(),
            date_label: None,
            hero_image: "https://images.unsplash.com/photo-1519225421980-715cb0215aed?w=1920&q=80"
                .to_string(),
            tagline: "Wedding Celebration".to_string(),
            thank_you: "For being part of our special day and celebrating love with us. \
                        These moments will forever be treasured in our hearts."
                .to_string(),
        }
    }
}

impl WeddingConfig {
    pub fn parsed_date(&self) -> Result<NaiveDate, ConfigError> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|e| {
            ConfigError::Validation(format!(
                "wedding.date '{}' must be YYYY-MM-DD: {e}",
                self.date
            ))
        })
    }

    /// `date_label` if set, otherwise the date spelled out (`September 15, 2024`).
    pub fn display_date(&self) -> String {
        match (&self.date_label, self.parsed_date()) {
            (Some(label), _) => label.clone(),
            (None, Ok(date)) => date.format("%B %-d, %Y").to_string(),
            (None, Err(_)) => self.date.clone(),
        }
    }
}

/// Gallery section settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    pub title: String,
    pub subtitle: String,
    /// Max width requested from the Drive thumbnail endpoint when the
    /// direct view URL fails to load.
    pub thumbnail_size: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            title: "Our Gallery".to_string(),
            subtitle: "Cherished Moments".to_string(),
            thumbnail_size: crate::media::DEFAULT_THUMBNAIL_SIZE,
        }
    }
}

/// Lightbox tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightboxConfig {
    /// Horizontal drag distance (px) beyond which a drag navigates.
    pub drag_threshold_px: f64,
    /// Slideshow advance interval.
    pub slideshow_seconds: u64,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        let settings = LightboxSettings::default();
        Self {
            drag_threshold_px: settings.drag_threshold_px,
            slideshow_seconds: settings.slideshow_interval.as_secs(),
        }
    }
}

impl LightboxConfig {
    pub fn settings(&self) -> LightboxSettings {
        LightboxSettings {
            drag_threshold_px: self.drag_threshold_px,
            slideshow_interval: Duration::from_secs(self.slideshow_seconds),
        }
    }
}

/// Admin access control.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessConfig {
    /// Emails allowed to use the admin commands. Compared case-insensitively.
    pub allowed_emails: Vec<String>,
}

impl AccessConfig {
    pub fn allow_list(&self) -> AllowList {
        AllowList::new(self.allowed_emails.as_slice())
    }
}

/// Hosted backend connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://abc.supabase.co`.
    pub url: Option<String>,
    /// Public (anon) API key.
    pub anon_key: Option<String>,
    /// Storage bucket holding uploaded photos.
    pub bucket: String,
    /// Maximum number of photos fetched from the `photos` table.
    pub photo_limit: usize,
    /// Where magic-link emails send the user back to.
    pub redirect_url: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            bucket: "gallery".to_string(),
            photo_limit: 50,
            redirect_url: None,
        }
    }
}

impl BackendConfig {
    pub fn is_configured(&self) -> bool {
        self.url.is_some() && self.anon_key.is_some()
    }
}

/// Background music.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MusicConfig {
    /// Initial volume, 0.0 to 1.0.
    pub volume: f32,
    pub tracks: Vec<TrackConfig>,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            volume: crate::music::DEFAULT_VOLUME,
            tracks: vec![
                TrackConfig {
                    title: "Romantic Piano".to_string(),
                    url: "https://cdn.pixabay.com/audio/2022/01/18/audio_d0a13f69d2.mp3"
                        .to_string(),
                },
                TrackConfig {
                    title: "Relaxing Harp".to_string(),
                    url: "https://cdn.pixabay.com/audio/2023/10/06/audio_1411544863.mp3"
                        .to_string(),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackConfig {
    pub title: String,
    /// Direct audio file URL or a YouTube link.
    pub url: String,
}

/// One entry of the love-story timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoryEvent {
    /// Free-form date label, e.g. `"June 2020"`.
    pub date: String,
    pub title: String,
    /// Markdown.
    #[serde(default)]
    pub description: String,
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Headings kicker, captions, counters.
    pub text_muted: String,
    /// Ornaments, active filter, buttons.
    pub accent: String,
    pub border: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#fdf8f3".to_string(),
            text: "#3b2a2a".to_string(),
            text_muted: "#8a7570".to_string(),
            accent: "#c9a35b".to_string(),
            border: "#eadccf".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#1c1616".to_string(),
            text: "#f3e9e2".to_string(),
            text_muted: "#b3a19a".to_string(),
            accent: "#d8b46a".to_string(),
            border: "#3d3030".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Wedding Album Configuration
# ===========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# The couple and the day
# ---------------------------------------------------------------------------
[wedding]
couple_names = "Emma & James"
# ISO date. The hero countdown targets the next occurrence of this month/day.
date = "2024-09-15"
# Shown under the names; defaults to the date spelled out.
# date_label = "September 15, 2024"
hero_image = "https://images.unsplash.com/photo-1519225421980-715cb0215aed?w=1920&q=80"
tagline = "Wedding Celebration"
thank_you = "For being part of our special day and celebrating love with us. These moments will forever be treasured in our hearts."

# ---------------------------------------------------------------------------
# Gallery
# ---------------------------------------------------------------------------
[gallery]
title = "Our Gallery"
subtitle = "Cherished Moments"
# Max width requested from the Google Drive thumbnail endpoint, used once
# when a Drive image fails to load through the direct view URL.
thumbnail_size = 2000

# ---------------------------------------------------------------------------
# Lightbox
# ---------------------------------------------------------------------------
[lightbox]
# Horizontal drag distance in pixels that turns a drag into prev/next.
drag_threshold_px = 100.0
# Seconds between slides while the slideshow runs.
slideshow_seconds = 3

# ---------------------------------------------------------------------------
# Admin access (compared case-insensitively, surrounding spaces ignored)
# ---------------------------------------------------------------------------
[access]
allowed_emails = []

# ---------------------------------------------------------------------------
# Hosted backend (Supabase-compatible). Leave url/anon_key unset to build
# from photos.toml only.
# ---------------------------------------------------------------------------
[backend]
# url = "https://your-project.supabase.co"
# anon_key = "public-anon-key"
bucket = "gallery"
photo_limit = 50
# redirect_url = "https://example.com/admin"

# ---------------------------------------------------------------------------
# Background music. YouTube links are embedded, anything else is played as
# a plain audio file.
# ---------------------------------------------------------------------------
[music]
volume = 0.4

[[music.tracks]]
title = "Romantic Piano"
url = "https://cdn.pixabay.com/audio/2022/01/18/audio_d0a13f69d2.mp3"

[[music.tracks]]
title = "Relaxing Harp"
url = "https://cdn.pixabay.com/audio/2023/10/06/audio_1411544863.mp3"

# ---------------------------------------------------------------------------
# Love story timeline (markdown descriptions)
# ---------------------------------------------------------------------------
# [[story]]
# date = "March 2020"
# title = "First Met"
# description = "Our eyes met across a crowded room."

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors.light]
background = "#fdf8f3"
text = "#3b2a2a"
text_muted = "#8a7570"
accent = "#c9a35b"
border = "#eadccf"

[colors.dark]
background = "#1c1616"
text = "#f3e9e2"
text_muted = "#b3a19a"
accent = "#d8b46a"
border = "#3d3030"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-accent: {light_accent};
    --color-border: {light_border};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-accent: {dark_accent};
        --color-border: {dark_border};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_accent = colors.light.accent,
        light_border = colors.light.border,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_accent = colors.dark.accent,
        dark_border = colors.dark.border,
    )
}
