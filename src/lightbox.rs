//! Lightbox navigation state.
//!
//! The lightbox is a full-screen single-photo viewer over a fixed, ordered,
//! non-empty list of photos. It owns a [`Cursor`] that wraps in both
//! directions, a zoom flag, an optional slideshow timer and the offset of an
//! in-progress drag.
//!
//! Nothing here touches a clock. The host feeds elapsed time into
//! [`Lightbox::advance_time`], so cancelling the slideshow is just dropping
//! its state.
//!
//! ## Input contracts
//!
//! - **Keyboard**: Escape closes, unless zoomed, in which case it only exits
//!   zoom. Left/Right go previous/next, but only when not zoomed.
//! - **Drag**: releasing a horizontal drag beyond the threshold goes previous
//!   (dragged right) or next (dragged left). Shorter drags snap back.
//! - **Slideshow**: each full interval of elapsed time advances once.
//!   Closing the lightbox or toggling the slideshow off cancels it.
//! - **Thumbnail strip**: shows up to [`STRIP_RADIUS`] photos either side of
//!   the current one. Selecting a thumbnail walks the cursor one step at a
//!   time instead of jumping.

use std::num::NonZeroUsize;
use std::ops::Range;
use std::time::Duration;
use thiserror::Error;

/// Drag distance in pixels that turns a drag into navigation.
pub const DRAG_THRESHOLD_PX: f64 = 100.0;

/// Time between slideshow advances.
pub const SLIDESHOW_INTERVAL: Duration = Duration::from_secs(3);

/// Photos shown on each side of the current one in the thumbnail strip.
pub const STRIP_RADIUS: usize = 3;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LightboxError {
    #[error("lightbox needs at least one photo")]
    Empty,
    #[error("photo index {index} out of range for {len} photos")]
    OutOfRange { index: usize, len: usize },
    #[error("invalid lightbox settings: {0}")]
    InvalidSettings(&'static str),
}

/// An index into a non-empty list that wraps in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: NonZeroUsize,
}

impl Cursor {
    pub fn new(len: usize, index: usize) -> Result<Self, LightboxError> {
        let len = NonZeroUsize::new(len).ok_or(LightboxError::Empty)?;
        if index >= len.get() {
            return Err(LightboxError::OutOfRange {
                index,
                len: len.get(),
            });
        }
        Ok(Self { index, len })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len.get()
    }

    /// Always false; a cursor can only be built over a non-empty list.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.len.get();
        self.index
    }

    pub fn previous(&mut self) -> usize {
        self.index = self.index.checked_sub(1).unwrap_or(self.len.get() - 1);
        self.index
    }

    /// Index after `next()` without moving.
    pub fn peek_next(&self) -> usize {
        let mut c = *self;
        c.next()
    }

    /// Index after `previous()` without moving.
    pub fn peek_previous(&self) -> usize {
        let mut c = *self;
        c.previous()
    }
}

/// Tunables for gesture and slideshow behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightboxSettings {
    pub drag_threshold_px: f64,
    pub slideshow_interval: Duration,
}

impl LightboxSettings {
    /// The drag threshold must be a positive finite distance and the
    /// slideshow interval non-zero.
    pub fn validate(&self) -> Result<(), LightboxError> {
        if !(self.drag_threshold_px.is_finite() && self.drag_threshold_px > 0.0) {
            return Err(LightboxError::InvalidSettings(
                "drag threshold must be a positive number",
            ));
        }
        if self.slideshow_interval.is_zero() {
            return Err(LightboxError::InvalidSettings(
                "slideshow interval must be non-zero",
            ));
        }
        Ok(())
    }
}

impl Default for LightboxSettings {
    fn default() -> Self {
        Self {
            drag_threshold_px: DRAG_THRESHOLD_PX,
            slideshow_interval: SLIDESHOW_INTERVAL,
        }
    }
}

/// Keys the lightbox reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

/// What a key press or drag release did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    Closed,
    ZoomExited,
    Previous,
    Next,
    SnappedBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slideshow {
    elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lightbox {
    cursor: Cursor,
    open: bool,
    zoomed: bool,
    slideshow: Option<Slideshow>,
    drag_offset: f64,
    settings: LightboxSettings,
}

impl Lightbox {
    /// A closed lightbox over `len` photos, positioned at the first.
    pub fn new(len: usize, settings: LightboxSettings) -> Result<Self, LightboxError> {
        settings.validate()?;
        Ok(Self {
            cursor: Cursor::new(len, 0)?,
            open: false,
            zoomed: false,
            slideshow: None,
            drag_offset: 0.0,
            settings,
        })
    }

    pub fn open_at(&mut self, index: usize) -> Result<(), LightboxError> {
        self.cursor = Cursor::new(self.cursor.len(), index)?;
        self.open = true;
        Ok(())
    }

    /// Close and tear down zoom, drag and the slideshow timer.
    pub fn close(&mut self) {
        self.open = false;
        self.zoomed = false;
        self.slideshow = None;
        self.drag_offset = 0.0;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn index(&self) -> usize {
        self.cursor.index()
    }

    pub fn len(&self) -> usize {
        self.cursor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.is_empty()
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn is_slideshow_active(&self) -> bool {
        self.slideshow.is_some()
    }

    pub fn drag_offset(&self) -> f64 {
        self.drag_offset
    }

    /// 1-based `current / total` label.
    pub fn counter(&self) -> String {
        format!("{} / {}", self.index() + 1, self.len())
    }

    pub fn next(&mut self) -> usize {
        self.cursor.next()
    }

    pub fn previous(&mut self) -> usize {
        self.cursor.previous()
    }

    pub fn toggle_zoom(&mut self) {
        self.zoomed = !self.zoomed;
    }

    pub fn handle_key(&mut self, key: Key) -> Outcome {
        if !self.open {
            return Outcome::Ignored;
        }
        match key {
            Key::Escape if self.zoomed => {
                self.zoomed = false;
                Outcome::ZoomExited
            }
            Key::Escape => {
                self.close();
                Outcome::Closed
            }
            Key::ArrowLeft if !self.zoomed => {
                self.previous();
                Outcome::Previous
            }
            Key::ArrowRight if !self.zoomed => {
                self.next();
                Outcome::Next
            }
            _ => Outcome::Ignored,
        }
    }

    /// Record the current horizontal drag offset (positive = dragged right).
    pub fn drag_to(&mut self, offset_px: f64) {
        self.drag_offset = offset_px;
    }

    /// Release the drag: navigate if past the threshold, then reset the offset.
    pub fn end_drag(&mut self) -> Outcome {
        let offset = std::mem::take(&mut self.drag_offset);
        if offset > self.settings.drag_threshold_px {
            self.previous();
            Outcome::Previous
        } else if offset < -self.settings.drag_threshold_px {
            self.next();
            Outcome::Next
        } else {
            Outcome::SnappedBack
        }
    }

    /// Start or cancel the slideshow. Returns whether it is now running.
    pub fn toggle_slideshow(&mut self) -> bool {
        self.slideshow = match self.slideshow {
            Some(_) => None,
            None => Some(Slideshow {
                elapsed: Duration::ZERO,
            }),
        };
        self.slideshow.is_some()
    }

    /// Feed elapsed wall time to the slideshow timer.
    ///
    /// Advances once per full interval and returns how many times it advanced.
    /// Does nothing unless the lightbox is open and the slideshow running.
    pub fn advance_time(&mut self, elapsed: Duration) -> u32 {
        if !self.open {
            return 0;
        }
        let interval = self.settings.slideshow_interval;
        let Some(slideshow) = self.slideshow.as_mut() else {
            return 0;
        };
        slideshow.elapsed += elapsed;
        let mut advanced = 0;
        while slideshow.elapsed >= interval {
            slideshow.elapsed -= interval;
            self.cursor.next();
            advanced += 1;
        }
        advanced
    }

    /// Indices shown in the thumbnail strip.
    pub fn thumbnail_strip(&self) -> Range<usize> {
        thumbnail_window(self.index(), self.len())
    }

    /// Move to a thumbnail by stepping next/previous once per index of
    /// distance, rather than jumping. Returns the number of steps taken.
    pub fn select_thumbnail(&mut self, target: usize) -> Result<usize, LightboxError> {
        if target >= self.len() {
            return Err(LightboxError::OutOfRange {
                index: target,
                len: self.len(),
            });
        }
        let current = self.index();
        let steps = current.abs_diff(target);
        for _ in 0..steps {
            if target > current {
                self.next();
            } else {
                self.previous();
            }
        }
        Ok(steps)
    }
}

/// Window of up to [`STRIP_RADIUS`] indices either side of `index`, clamped
/// to `0..len`.
pub fn thumbnail_window(index: usize, len: usize) -> Range<usize> {
    let start = index.saturating_sub(STRIP_RADIUS);
    let end = (index + STRIP_RADIUS + 1).min(len);
    start..end.max(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_lightbox(len: usize) -> Lightbox {
        let mut lb = Lightbox::new(len, LightboxSettings::default()).unwrap();
        lb.open_at(0).unwrap();
        lb
    }

    #[test]
    fn empty_list_is_rejected() {
        assert_eq!(
            Lightbox::new(0, LightboxSettings::default()),
            Err(LightboxError::Empty)
        );
        assert_eq!(Cursor::new(0, 0), Err(LightboxError::Empty));
    }

    #[test]
    fn degenerate_settings_are_rejected() {
        let zero_interval = LightboxSettings {
            slideshow_interval: Duration::ZERO,
            ..LightboxSettings::default()
        };
        assert!(matches!(
            Lightbox::new(3, zero_interval),
            Err(LightboxError::InvalidSettings(_))
        ));

        for threshold in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let settings = LightboxSettings {
                drag_threshold_px: threshold,
                ..LightboxSettings::default()
            };
            assert!(
                matches!(
                    Lightbox::new(3, settings),
                    Err(LightboxError::InvalidSettings(_))
                ),
                "threshold {threshold} accepted"
            );
        }
    }

    #[test]
    fn open_out_of_range_is_rejected() {
        let mut lb = Lightbox::new(3, LightboxSettings::default()).unwrap();
        assert_eq!(
            lb.open_at(3),
            Err(LightboxError::OutOfRange { index: 3, len: 3 })
        );
        assert!(!lb.is_open());
    }

    #[test]
    fn cursor_wraps_both_directions() {
        let mut c = Cursor::new(3, 0).unwrap();
        assert_eq!(c.previous(), 2);
        assert_eq!(c.next(), 0);
        assert_eq!(c.next(), 1);
        assert_eq!(c.next(), 2);
        assert_eq!(c.next(), 0);
    }

    #[test]
    fn cursor_stays_in_range_and_cycles() {
        for len in 1..=7 {
            for start in 0..len {
                let mut c = Cursor::new(len, start).unwrap();
                for _ in 0..len {
                    assert!(c.next() < len);
                }
                assert_eq!(c.index(), start);
                for _ in 0..len {
                    assert!(c.previous() < len);
                }
                assert_eq!(c.index(), start);
            }
        }
    }

    #[test]
    fn single_photo_cursor_stays_put() {
        let mut c = Cursor::new(1, 0).unwrap();
        assert_eq!(c.next(), 0);
        assert_eq!(c.previous(), 0);
    }

    #[test]
    fn peek_does_not_move() {
        let c = Cursor::new(4, 0).unwrap();
        assert_eq!(c.peek_previous(), 3);
        assert_eq!(c.peek_next(), 1);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn escape_closes_when_not_zoomed() {
        let mut lb = open_lightbox(5);
        assert_eq!(lb.handle_key(Key::Escape), Outcome::Closed);
        assert!(!lb.is_open());
    }

    #[test]
    fn escape_exits_zoom_first() {
        let mut lb = open_lightbox(5);
        lb.toggle_zoom();
        assert_eq!(lb.handle_key(Key::Escape), Outcome::ZoomExited);
        assert!(lb.is_open());
        assert!(!lb.is_zoomed());
        assert_eq!(lb.handle_key(Key::Escape), Outcome::Closed);
    }

    #[test]
    fn arrows_navigate_only_when_not_zoomed() {
        let mut lb = open_lightbox(5);
        assert_eq!(lb.handle_key(Key::ArrowRight), Outcome::Next);
        assert_eq!(lb.index(), 1);
        assert_eq!(lb.handle_key(Key::ArrowLeft), Outcome::Previous);
        assert_eq!(lb.handle_key(Key::ArrowLeft), Outcome::Previous);
        assert_eq!(lb.index(), 4);

        lb.toggle_zoom();
        assert_eq!(lb.handle_key(Key::ArrowRight), Outcome::Ignored);
        assert_eq!(lb.handle_key(Key::ArrowLeft), Outcome::Ignored);
        assert_eq!(lb.index(), 4);
    }

    #[test]
    fn keys_ignored_while_closed() {
        let mut lb = Lightbox::new(5, LightboxSettings::default()).unwrap();
        assert_eq!(lb.handle_key(Key::ArrowRight), Outcome::Ignored);
        assert_eq!(lb.index(), 0);
        assert_eq!(lb.handle_key(Key::Other), Outcome::Ignored);
    }

    #[test]
    fn drag_right_past_threshold_goes_previous() {
        let mut lb = open_lightbox(5);
        lb.open_at(2).unwrap();
        lb.drag_to(150.0);
        assert_eq!(lb.end_drag(), Outcome::Previous);
        assert_eq!(lb.index(), 1);
        assert_eq!(lb.drag_offset(), 0.0);
    }

    #[test]
    fn drag_left_past_threshold_goes_next() {
        let mut lb = open_lightbox(5);
        lb.open_at(2).unwrap();
        lb.drag_to(-150.0);
        assert_eq!(lb.end_drag(), Outcome::Next);
        assert_eq!(lb.index(), 3);
    }

    #[test]
    fn short_drag_snaps_back() {
        let mut lb = open_lightbox(5);
        lb.open_at(2).unwrap();
        for offset in [50.0, -50.0, 100.0, -100.0] {
            lb.drag_to(offset);
            assert_eq!(lb.end_drag(), Outcome::SnappedBack);
            assert_eq!(lb.drag_offset(), 0.0);
            assert_eq!(lb.index(), 2);
        }
    }

    #[test]
    fn slideshow_advances_per_interval() {
        let mut lb = open_lightbox(4);
        assert!(lb.toggle_slideshow());
        assert_eq!(lb.advance_time(Duration::from_millis(2999)), 0);
        assert_eq!(lb.advance_time(Duration::from_millis(1)), 1);
        assert_eq!(lb.index(), 1);
        assert_eq!(lb.advance_time(Duration::from_secs(7)), 2);
        assert_eq!(lb.index(), 3);
        assert_eq!(lb.advance_time(Duration::from_secs(2)), 1);
        assert_eq!(lb.index(), 0);
    }

    #[test]
    fn slideshow_idle_until_started() {
        let mut lb = open_lightbox(4);
        assert_eq!(lb.advance_time(Duration::from_secs(30)), 0);
        assert_eq!(lb.index(), 0);
    }

    #[test]
    fn toggling_slideshow_cancels_timer() {
        let mut lb = open_lightbox(4);
        lb.toggle_slideshow();
        lb.advance_time(Duration::from_secs(2));
        assert!(!lb.toggle_slideshow());
        assert_eq!(lb.advance_time(Duration::from_secs(10)), 0);

        // Restarting begins a fresh interval
        lb.toggle_slideshow();
        assert_eq!(lb.advance_time(Duration::from_secs(2)), 0);
        assert_eq!(lb.index(), 0);
    }

    #[test]
    fn closing_cancels_slideshow_and_zoom() {
        let mut lb = open_lightbox(4);
        lb.toggle_slideshow();
        lb.toggle_zoom();
        lb.drag_to(40.0);
        lb.close();
        assert!(!lb.is_slideshow_active());
        assert!(!lb.is_zoomed());
        assert_eq!(lb.drag_offset(), 0.0);

        lb.open_at(0).unwrap();
        assert_eq!(lb.advance_time(Duration::from_secs(10)), 0);
    }

    #[test]
    fn custom_settings_change_thresholds() {
        let settings = LightboxSettings {
            drag_threshold_px: 40.0,
            slideshow_interval: Duration::from_secs(1),
        };
        let mut lb = Lightbox::new(3, settings).unwrap();
        lb.open_at(0).unwrap();
        lb.drag_to(-50.0);
        assert_eq!(lb.end_drag(), Outcome::Next);
        lb.toggle_slideshow();
        assert_eq!(lb.advance_time(Duration::from_secs(1)), 1);
        assert_eq!(lb.index(), 2);
    }

    #[test]
    fn counter_is_one_based() {
        let mut lb = open_lightbox(12);
        lb.previous();
        assert_eq!(lb.counter(), "12 / 12");
    }

    #[test]
    fn thumbnail_window_clamps_to_bounds() {
        assert_eq!(thumbnail_window(0, 10), 0..4);
        assert_eq!(thumbnail_window(5, 10), 2..9);
        assert_eq!(thumbnail_window(9, 10), 6..10);
        assert_eq!(thumbnail_window(1, 2), 0..2);
    }

    #[test]
    fn select_thumbnail_steps_through_delta() {
        let mut lb = open_lightbox(10);
        lb.open_at(5).unwrap();
        assert_eq!(lb.select_thumbnail(8), Ok(3));
        assert_eq!(lb.index(), 8);
        assert_eq!(lb.select_thumbnail(6), Ok(2));
        assert_eq!(lb.index(), 6);
        assert_eq!(lb.select_thumbnail(6), Ok(0));
        assert_eq!(
            lb.select_thumbnail(10),
            Err(LightboxError::OutOfRange { index: 10, len: 10 })
        );
    }
}
