//! Media subsystem (spec.md §4 component table, row "Media subsystem"): a
//! page-addressed registry of media items with play/pause/mute lifecycle.
//! The actual decode/playback is an external media-player backend
//! (spec.md §1 "Out of scope"); what lives here is bookkeeping — which
//! pages have which media, and when a playback provider should be torn
//! down (spec.md §5 "Cancellation & timeouts").

use crate::util::Rect;

/// Audio or video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
}

/// Where the media's bytes come from.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaSource {
    /// Embedded directly in the PDF.
    Embedded(Vec<u8>),
    /// A link to an external file or stream.
    Url(String),
}

/// How playback repeats once it reaches the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayMode {
    #[default]
    Once,
    Loop,
    /// Play forward, then play reverse, then repeat. Declared but not
    /// implemented in the source this spec was distilled from (spec.md §9
    /// Design Notes, Open Question 1); the state machine here is
    /// complete, but there is no media-player backend to drive frame
    /// playback in reverse against in this crate's test suite.
    Palindrome,
}

/// A media annotation as reported by the PDF backend for one page
/// (spec.md §6 `annotations(index)`).
#[derive(Debug, Clone, PartialEq)]
pub struct MediaAnnotation {
    pub rect: Rect,
    pub kind: MediaKind,
    pub source: MediaSource,
    pub autoplay: bool,
    pub mute: bool,
    pub play_mode: PlayMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

/// Which leg of a palindrome cycle is currently playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PalindromeLeg {
    Forward,
    Reverse,
}

/// One live media item attached to a page: the annotation plus its
/// current playback state. The scene creates these on demand (spec.md
/// §4.5) and the registry below evicts them once they scroll out of the
/// look-ahead/look-behind window.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub page: u32,
    pub annotation: MediaAnnotation,
    state: PlaybackState,
    muted: bool,
    palindrome_leg: PalindromeLeg,
}

impl MediaItem {
    pub fn new(page: u32, annotation: MediaAnnotation) -> Self {
        let muted = annotation.mute;
        Self {
            page,
            state: PlaybackState::Stopped,
            muted,
            palindrome_leg: PalindromeLeg::Forward,
            annotation,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Toggles between playing and paused, the behavior spec.md §4.5 "No
    /// tool click" wires to clicking inside a media item's rect.
    pub fn toggle_play_pause(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused | PlaybackState::Stopped => self.play(),
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Called by the playback provider when it reaches the end of the
    /// clip; decides whether playback stops, restarts, or flips direction.
    pub fn on_reached_end(&mut self) {
        match self.annotation.play_mode {
            PlayMode::Once => self.state = PlaybackState::Stopped,
            PlayMode::Loop => self.state = PlaybackState::Playing,
            PlayMode::Palindrome => {
                self.palindrome_leg = match self.palindrome_leg {
                    PalindromeLeg::Forward => PalindromeLeg::Reverse,
                    PalindromeLeg::Reverse => PalindromeLeg::Forward,
                };
                self.state = PlaybackState::Playing;
            }
        }
    }

    pub fn is_playing_in_reverse(&self) -> bool {
        self.annotation.play_mode == PlayMode::Palindrome
            && self.palindrome_leg == PalindromeLeg::Reverse
    }
}

/// Page-addressed registry of live media items. Keeps a playback provider
/// alive for a page that is "current, current+1, current-1, or
/// current-2" (spec.md §5) — one level of cached look-ahead plus
/// immediate look-behind — and tears down everything else.
#[derive(Debug, Default)]
pub struct MediaRegistry {
    items: Vec<MediaItem>,
}

impl MediaRegistry {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn items_on_page(&self, page: u32) -> impl Iterator<Item = &MediaItem> {
        self.items.iter().filter(move |m| m.page == page)
    }

    pub fn items_on_page_mut(&mut self, page: u32) -> impl Iterator<Item = &mut MediaItem> {
        self.items.iter_mut().filter(move |m| m.page == page)
    }

    /// Loads media for `page` from the backend's annotation list if it
    /// isn't already registered.
    pub fn ensure_loaded(&mut self, page: u32, annotations: Vec<MediaAnnotation>) {
        if self.items.iter().any(|m| m.page == page) {
            return;
        }
        for annotation in annotations {
            self.items.push(MediaItem::new(page, annotation));
        }
    }

    /// Evicts every item whose page has scrolled outside the retention
    /// window around `current_page` (spec.md §5).
    pub fn evict_outside_window(&mut self, current_page: u32) {
        let window = retention_window(current_page);
        self.items.retain(|m| window.contains(&m.page));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finds the media item (if any) whose rect contains `point`, scene
    /// coordinates, on `page` — used by the "no tool click" handler.
    pub fn hit_test(&mut self, page: u32, x: i32, y: i32) -> Option<&mut MediaItem> {
        self.items
            .iter_mut()
            .find(|m| m.page == page && m.annotation.rect.contains(x, y))
    }
}

fn retention_window(current_page: u32) -> std::ops::RangeInclusive<u32> {
    current_page.saturating_sub(2)..=current_page.saturating_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotation() -> MediaAnnotation {
        MediaAnnotation {
            rect: Rect::new(0, 0, 10, 10).unwrap(),
            kind: MediaKind::Video,
            source: MediaSource::Url("clip.mp4".into()),
            autoplay: false,
            mute: false,
            play_mode: PlayMode::Once,
        }
    }

    #[test]
    fn toggle_play_pause_cycles_state() {
        let mut item = MediaItem::new(0, annotation());
        assert_eq!(item.state(), PlaybackState::Stopped);
        item.toggle_play_pause();
        assert_eq!(item.state(), PlaybackState::Playing);
        item.toggle_play_pause();
        assert_eq!(item.state(), PlaybackState::Paused);
    }

    #[test]
    fn once_mode_stops_at_end() {
        let mut item = MediaItem::new(0, annotation());
        item.play();
        item.on_reached_end();
        assert_eq!(item.state(), PlaybackState::Stopped);
    }

    #[test]
    fn loop_mode_restarts_at_end() {
        let mut a = annotation();
        a.play_mode = PlayMode::Loop;
        let mut item = MediaItem::new(0, a);
        item.play();
        item.on_reached_end();
        assert_eq!(item.state(), PlaybackState::Playing);
    }

    #[test]
    fn palindrome_flips_direction_each_end() {
        let mut a = annotation();
        a.play_mode = PlayMode::Palindrome;
        let mut item = MediaItem::new(0, a);
        item.play();
        assert!(!item.is_playing_in_reverse());
        item.on_reached_end();
        assert!(item.is_playing_in_reverse());
        item.on_reached_end();
        assert!(!item.is_playing_in_reverse());
    }

    #[test]
    fn eviction_keeps_only_the_retention_window() {
        let mut registry = MediaRegistry::new();
        for page in 0..8 {
            registry.ensure_loaded(page, vec![annotation()]);
        }
        registry.evict_outside_window(5);
        let pages: Vec<u32> = registry.items.iter().map(|m| m.page).collect();
        for page in pages {
            assert!((3..=6).contains(&page), "page {page} should have been evicted");
        }
    }

    #[test]
    fn hit_test_finds_item_under_point() {
        let mut registry = MediaRegistry::new();
        registry.ensure_loaded(0, vec![annotation()]);
        assert!(registry.hit_test(0, 5, 5).is_some());
        assert!(registry.hit_test(0, 50, 50).is_none());
    }
}
