//! # Wedding Album
//!
//! A static site generator for a single-page wedding photo album: a hero
//! banner with an anniversary countdown, a filterable masonry gallery, a
//! full-screen lightbox with slideshow, a background music player, and a
//! small admin CLI over a hosted backend for uploading and curating photos.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/ (+ backend)  →  manifest.json   (sources → structured data)
//! 2. Generate  manifest              →  dist/           (final HTML site)
//! ```
//!
//! The manifest is human-readable JSON you can inspect, and each stage can be
//! exercised on its own in tests without the network.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: reads `photos.toml` and, optionally, the backend into a manifest |
//! | [`generate`] | Stage 2: renders the site from the manifest using Maud |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Shared types serialized between stages (`Photo`) |
//! | [`media`] | Google Drive link resolution and the one-shot image fallback |
//! | [`gallery`] | Category list derivation and filtering |
//! | [`lightbox`] | Lightbox navigation state: cursor, zoom, drag, slideshow, thumbnail strip |
//! | [`countdown`] | Next-anniversary countdown |
//! | [`music`] | Playlist model and playback lifecycle |
//! | [`access`] | Email allow-list |
//! | [`backend`] | `Backend` trait and the Supabase REST client |
//! | [`admin`] | Admin operations: categories, uploads, edits, deletes |
//! | [`naming`] | Page slugs and content-addressed upload paths |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Static Output
//!
//! Every view is a real page: each category filter, each lightbox position,
//! each slideshow step. The embedded script adds keyboard and drag navigation,
//! the image fallback, the live countdown and music, but the site works
//! without it.
//!
//! ## Explicit Backend Handle
//!
//! Nothing talks to the network implicitly. Code that needs the backend takes
//! a `&dyn Backend`, which keeps scan and admin logic testable against an
//! in-memory fake.
//!
//! ## Caller-Owned Clocks
//!
//! Countdown and slideshow state never read the clock themselves; the caller
//! passes the current time or the elapsed duration.

pub mod access;
pub mod admin;
pub mod backend;
pub mod config;
pub mod countdown;
pub mod gallery;
pub mod generate;
pub mod lightbox;
pub mod media;
pub mod music;
pub mod naming;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
