//! Category filtering for the masonry gallery.
//!
//! The filter bar always starts with the synthetic "All" category, followed
//! either by an explicit category list (from the backend or `photos.toml`) or,
//! when none is given, by the distinct photo categories in first-seen order.
//! The active filter must always be a member of that list; anything else
//! resets to "All".

use crate::types::Photo;

/// Name of the synthetic category that shows every photo.
pub const ALL: &str = "All";

/// Build the filter list: "All" first, then `explicit` if non-empty,
/// otherwise the categories derived from `photos`. Duplicates and empty
/// names are dropped.
pub fn category_list(photos: &[Photo], explicit: &[String]) -> Vec<String> {
    let base: Vec<&str> = if explicit.is_empty() {
        photos.iter().map(|p| p.category.as_str()).collect()
    } else {
        explicit.iter().map(String::as_str).collect()
    };

    let mut list = vec![ALL.to_string()];
    for name in base {
        if !name.is_empty() && !list.iter().any(|c| c == name) {
            list.push(name.to_string());
        }
    }
    list
}

/// A photo that survived filtering, with its position in the full list.
///
/// The position is what the lightbox navigates by, so opening a filtered
/// photo lands on the right place in the unfiltered sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilteredPhoto<'a> {
    pub index: usize,
    pub photo: &'a Photo,
}

/// The active category over a category list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    categories: Vec<String>,
    active: String,
}

impl CategoryFilter {
    pub fn new(categories: Vec<String>) -> Self {
        let mut filter = Self {
            categories,
            active: ALL.to_string(),
        };
        filter.reconcile();
        filter
    }

    pub fn for_photos(photos: &[Photo], explicit: &[String]) -> Self {
        Self::new(category_list(photos, explicit))
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    /// Select `name`. A name outside the category list resets to "All".
    /// Returns the category that ends up active.
    pub fn select(&mut self, name: &str) -> &str {
        self.active = name.to_string();
        self.reconcile();
        &self.active
    }

    /// Replace the category list, keeping the active filter if it still exists.
    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.categories = categories;
        self.reconcile();
    }

    fn reconcile(&mut self) {
        if !self.categories.iter().any(|c| c == &self.active) {
            self.active = ALL.to_string();
        }
    }

    pub fn matches(&self, photo: &Photo) -> bool {
        self.active == ALL || photo.category == self.active
    }

    /// Photos in the active category, in original order.
    pub fn apply<'a>(&self, photos: &'a [Photo]) -> Vec<FilteredPhoto<'a>> {
        photos
            .iter()
            .enumerate()
            .filter(|(_, p)| self.matches(p))
            .map(|(index, photo)| FilteredPhoto { index, photo })
            .collect()
    }
}
