//! Background music playlist.
//!
//! A track is either a plain audio file or a video embed (YouTube), modelled
//! as [`TrackSource`]. Playback itself is delegated to a [`PlaybackFactory`]
//! that turns a track into a [`Playback`] handle; the generated site uses an
//! `<audio>` element or an `<iframe>`, tests use a recording fake.
//!
//! The player keeps at most one live handle. Changing track pauses and drops
//! the old handle before the new one is opened, so two tracks never play at
//! once.

use crate::config::TrackConfig;
use serde::Serialize;

/// Initial volume.
pub const DEFAULT_VOLUME: f32 = 0.4;

/// Where a track's audio comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackSource {
    /// A file the browser can play directly.
    DirectAudio { url: String },
    /// A YouTube video played through its embed player.
    EmbeddedVideo { video_id: String },
}

impl TrackSource {
    /// Classify a URL. YouTube links become [`TrackSource::EmbeddedVideo`],
    /// everything else is treated as direct audio.
    pub fn from_url(url: &str) -> Self {
        match youtube_video_id(url) {
            Some(video_id) => TrackSource::EmbeddedVideo { video_id },
            None => TrackSource::DirectAudio {
                url: url.trim().to_string(),
            },
        }
    }

    /// URL handed to the playback element.
    pub fn playback_url(&self) -> String {
        match self {
            TrackSource::DirectAudio { url } => url.clone(),
            TrackSource::EmbeddedVideo { video_id } => {
                format!("https://www.youtube-nocookie.com/embed/{video_id}?enablejsapi=1")
            }
        }
    }
}

/// Extract a YouTube video id from `watch?v=`, `youtu.be/`, `/embed/` or
/// `/shorts/` links.
pub fn youtube_video_id(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;
    let host = host
        .strip_prefix("www.")
        .or_else(|| host.strip_prefix("m."))
        .unwrap_or(host);

    let id = match host {
        "youtu.be" => parsed.path_segments()?.next().map(str::to_string),
        "youtube.com" | "youtube-nocookie.com" | "music.youtube.com" => {
            let mut segments = parsed.path_segments()?;
            match segments.next()? {
                "watch" => parsed
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned()),
                "embed" | "shorts" | "live" => segments.next().map(str::to_string),
                _ => None,
            }
        }
        _ => None,
    }?;
    (!id.is_empty()).then_some(id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    pub title: String,
    pub source: TrackSource,
}

impl From<&TrackConfig> for Track {
    fn from(config: &TrackConfig) -> Self {
        Track {
            title: config.title.clone(),
            source: TrackSource::from_url(&config.url),
        }
    }
}

pub fn playlist_from_config(tracks: &[TrackConfig]) -> Vec<Track> {
    tracks.iter().map(Track::from).collect()
}

/// A live playback object for one track.
pub trait Playback {
    fn play(&mut self);
    fn pause(&mut self);
    fn set_volume(&mut self, volume: f32);
    fn set_muted(&mut self, muted: bool);
}

/// Strategy that opens playback for a track, dispatching on its source.
pub trait PlaybackFactory {
    fn open(&mut self, track: &Track) -> Box<dyn Playback>;
}

/// Playlist state plus the single live playback handle.
pub struct MusicPlayer<F: PlaybackFactory> {
    factory: F,
    playlist: Vec<Track>,
    current: usize,
    playing: bool,
    muted: bool,
    volume: f32,
    show_prompt: bool,
    handle: Option<Box<dyn Playback>>,
}

impl<F: PlaybackFactory> MusicPlayer<F> {
    /// Returns `None` for an empty playlist.
    pub fn new(factory: F, playlist: Vec<Track>, volume: f32) -> Option<Self> {
        if playlist.is_empty() {
            return None;
        }
        let mut player = Self {
            factory,
            playlist,
            current: 0,
            playing: false,
            muted: false,
            volume: volume.clamp(0.0, 1.0),
            show_prompt: true,
            handle: None,
        };
        player.load_current();
        Some(player)
    }

    pub fn current_track(&self) -> &Track {
        &self.playlist[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Whether the one-time "play music?" prompt is still showing.
    pub fn shows_prompt(&self) -> bool {
        self.show_prompt
    }

    pub fn dismiss_prompt(&mut self) {
        self.show_prompt = false;
    }

    pub fn toggle_play(&mut self) {
        let Some(handle) = self.handle.as_mut() else {
            return;
        };
        if self.playing {
            handle.pause();
        } else {
            handle.play();
            self.show_prompt = false;
        }
        self.playing = !self.playing;
    }

    pub fn next(&mut self) {
        self.select((self.current + 1) % self.playlist.len());
    }

    pub fn previous(&mut self) {
        let len = self.playlist.len();
        self.select((self.current + len - 1) % len);
    }

    /// The current track finished; move on.
    pub fn on_ended(&mut self) {
        self.next();
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        if let Some(handle) = self.handle.as_mut() {
            handle.set_muted(self.muted);
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(handle) = self.handle.as_mut() {
            handle.set_volume(self.volume);
        }
    }

    fn select(&mut self, index: usize) {
        self.current = index;
        self.load_current();
    }

    fn load_current(&mut self) {
        if let Some(mut old) = self.handle.take() {
            old.pause();
        }
        let mut handle = self.factory.open(&self.playlist[self.current]);
        handle.set_volume(self.volume);
        handle.set_muted(self.muted);
        if self.playing {
            handle.play();
        }
        self.handle = Some(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        name: String,
        log: Log,
    }

    impl Playback for Recorder {
        fn play(&mut self) {
            self.log.borrow_mut().push(format!("play {}", self.name));
        }
        fn pause(&mut self) {
            self.log.borrow_mut().push(format!("pause {}", self.name));
        }
        fn set_volume(&mut self, volume: f32) {
            self.log
                .borrow_mut()
                .push(format!("volume {} {volume:.2}", self.name));
        }
        fn set_muted(&mut self, muted: bool) {
            self.log.borrow_mut().push(format!("muted {} {muted}", self.name));
        }
    }

    impl Drop for Recorder {
        fn drop(&mut self) {
            self.log.borrow_mut().push(format!("drop {}", self.name));
        }
    }

    struct RecordingFactory {
        log: Log,
    }

    impl PlaybackFactory for RecordingFactory {
        fn open(&mut self, track: &Track) -> Box<dyn Playback> {
            let kind = match track.source {
                TrackSource::DirectAudio { .. } => "audio",
                TrackSource::EmbeddedVideo { .. } => "video",
            };
            let name = format!("{kind}:{}", track.title);
            self.log.borrow_mut().push(format!("open {name}"));
            Box::new(Recorder {
                name,
                log: self.log.clone(),
            })
        }
    }

    fn playlist() -> Vec<Track> {
        vec![
            Track {
                title: "A".to_string(),
                source: TrackSource::from_url("https://cdn.example.com/a.mp3"),
            },
            Track {
                title: "B".to_string(),
                source: TrackSource::from_url("https://youtu.be/dQw4w9WgXcQ"),
            },
            Track {
                title: "C".to_string(),
                source: TrackSource::from_url("https://cdn.example.com/c.mp3"),
            },
        ]
    }

    fn player() -> (MusicPlayer<RecordingFactory>, Log) {
        let log: Log = Rc::default();
        let player = MusicPlayer::new(RecordingFactory { log: log.clone() }, playlist(), 0.4)
            .unwrap();
        log.borrow_mut().clear();
        (player, log)
    }

    #[test]
    fn classifies_sources() {
        assert_eq!(
            TrackSource::from_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10"),
            TrackSource::EmbeddedVideo {
                video_id: "dQw4w9WgXcQ".to_string()
            }
        );
        assert_eq!(
            TrackSource::from_url("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            TrackSource::EmbeddedVideo {
                video_id: "dQw4w9WgXcQ".to_string()
            }
        );
        assert_eq!(
            TrackSource::from_url("https://cdn.pixabay.com/audio/x.mp3"),
            TrackSource::DirectAudio {
                url: "https://cdn.pixabay.com/audio/x.mp3".to_string()
            }
        );
        assert!(matches!(
            TrackSource::from_url("https://www.youtube.com/channel/abc"),
            TrackSource::DirectAudio { .. }
        ));
    }

    #[test]
    fn embedded_playback_url_uses_embed_player() {
        let source = TrackSource::from_url("https://youtu.be/dQw4w9WgXcQ");
        assert!(
            source
                .playback_url()
                .starts_with("https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ")
        );
    }

    #[test]
    fn empty_playlist_has_no_player() {
        let log: Log = Rc::default();
        assert!(MusicPlayer::new(RecordingFactory { log }, vec![], 0.4).is_none());
    }

    #[test]
    fn changing_track_tears_down_previous_before_opening_next() {
        let (mut player, log) = player();
        player.toggle_play();
        log.borrow_mut().clear();

        player.next();
        let entries = log.borrow().clone();
        assert_eq!(entries[0], "pause audio:A");
        assert_eq!(entries[1], "drop audio:A");
        assert_eq!(entries[2], "open video:B");
        assert_eq!(entries.last().unwrap(), "play video:B");
    }

    #[test]
    fn paused_player_does_not_autoplay_new_track() {
        let (mut player, log) = player();
        player.next();
        assert!(!log.borrow().iter().any(|e| e.starts_with("play")));
        assert_eq!(player.current_track().title, "B");
    }

    #[test]
    fn navigation_wraps() {
        let (mut player, _log) = player();
        player.previous();
        assert_eq!(player.current_index(), 2);
        player.on_ended();
        assert_eq!(player.current_index(), 0);
    }

    #[test]
    fn first_play_dismisses_prompt() {
        let (mut player, _log) = player();
        assert!(player.shows_prompt());
        player.toggle_play();
        assert!(player.is_playing());
        assert!(!player.shows_prompt());
        player.toggle_play();
        assert!(!player.is_playing());
    }

    #[test]
    fn volume_is_clamped_and_carried_to_new_tracks() {
        let (mut player, log) = player();
        player.set_volume(3.0);
        assert_eq!(player.volume(), 1.0);
        player.toggle_mute();
        log.borrow_mut().clear();

        player.next();
        let entries = log.borrow();
        assert!(entries.contains(&"volume video:B 1.00".to_string()));
        assert!(entries.contains(&"muted video:B true".to_string()));
    }
}
