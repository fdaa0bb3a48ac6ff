//! The slide view (spec.md §4.7 "Slide view, magnifier, and pointing
//! foreground"): per-viewport resolution fitting, magnifier enlarged-render
//! bookkeeping, and foreground-paint descriptions for the transient
//! pointing tools. The concrete GUI toolkit is an external collaborator
//! (spec.md §1 "Out of scope") — this module only describes *what* should
//! be painted or requested; a host painter sink and widget layer consume
//! that description.
//!
//! Grounded on the teacher's `ui::canvas` viewport (resolution-fit-to-page,
//! refit-on-resize) generalized to the multi-viewport case (independent
//! resolution per slide/notes pane) and the teacher's `draw::render`
//! foreground-tool overlays, now expressed as paint descriptions rather
//! than direct Cairo calls since drawing itself is the host's job here.

use crate::backend::RenderedPixmap;
use crate::draw::Color;
use crate::media::{MediaItem, MediaKind, MediaRegistry};
use crate::tool::{SelectionRegion, Tool};
use crate::util::{Point, Rect};

/// One page-background pixmap a view has received, at the resolution it
/// was rendered. Kept around (not just the latest) so the magnifier can
/// pick whatever is already available instead of blocking on a fresh
/// render every time the lens moves.
#[derive(Debug, Clone)]
struct BackgroundPixmap {
    resolution: f64,
    pixmap: RenderedPixmap,
}

/// A stable handle identifying one media slider, so a host can associate
/// its own widget with the item it controls without this crate knowing
/// about widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaSliderId {
    pub page: u32,
    pub index: usize,
}

/// One media item's slider: just enough state for the host to draw and
/// drive a scrub control (spec.md §4.7 "a list of media sliders created
/// for media items that opt in").
#[derive(Debug, Clone)]
pub struct MediaSlider {
    pub id: MediaSliderId,
    pub rect: Rect,
    pub kind: MediaKind,
}

/// A description of what the foreground (pointing-tool) layer should
/// paint after the scene itself has been composited. Spec.md §4.7 lists
/// one of these per active pointing tool; `None` means nothing transient
/// is active.
#[derive(Debug, Clone, PartialEq)]
pub enum ForegroundPaint {
    None,
    /// Fill the viewport minus a circular hole at each tool position.
    Torch { positions: Vec<Point>, radius: f64, color: Color },
    /// A darker circle (Darken composite) then an opaque circle
    /// (source-over) at each position.
    Pointer { positions: Vec<Point>, radius: f64, color: Color },
    /// Clip to a circle at `center`, source a `size · 2 · scale` rect of
    /// the scene from `source` (if one is available yet), then outline.
    Magnifier { center: Point, radius: f64, scale: f64, source: Option<RenderedPixmap> },
    /// Outline circle with a `scale`-wide pen at each position.
    Eraser { positions: Vec<Point>, radius: f64, scale: f64 },
    /// The selection tool's in-progress marquee rect/polygon.
    Selection { region: SelectionRegion },
}

/// Per-viewport render/scale state (spec.md §4.7). One instance per pane
/// that shows a page (e.g. the slide pane and, independently, a notes
/// pane in dual-output mode).
pub struct SlideView {
    /// Pixels per point, fitted to the page aspect the last time
    /// [`SlideView::refit`] ran.
    resolution: f64,
    viewport_width: f64,
    viewport_height: f64,
    backgrounds: Vec<BackgroundPixmap>,
    sliders: Vec<MediaSlider>,
}

impl SlideView {
    pub fn new() -> Self {
        Self {
            resolution: 1.0,
            viewport_width: 0.0,
            viewport_height: 0.0,
            backgrounds: Vec::new(),
            sliders: Vec::new(),
        }
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Refits `resolution` to the viewport/page aspect and reports whether
    /// it changed (the caller should re-request the page background at
    /// the new resolution when it has). Spec.md §4.7: "On resize it refits
    /// and re-requests the page at the new resolution."
    pub fn refit(&mut self, viewport_width: f64, viewport_height: f64, page_width: f64, page_height: f64) -> bool {
        self.viewport_width = viewport_width;
        self.viewport_height = viewport_height;
        if page_width <= 0.0 || page_height <= 0.0 || viewport_width <= 0.0 || viewport_height <= 0.0 {
            return false;
        }
        let fit = (viewport_width / page_width).min(viewport_height / page_height);
        let changed = (fit - self.resolution).abs() > 1e-9;
        self.resolution = fit;
        changed
    }

    /// Records a newly-rendered page background pixmap, keyed by the
    /// resolution it was rendered at. Superseding renders at the same
    /// resolution replace the old entry; different resolutions stack up
    /// so the magnifier has a choice of sizes to pick from.
    pub fn install_background(&mut self, resolution: f64, pixmap: RenderedPixmap) {
        if let Some(existing) = self.backgrounds.iter_mut().find(|b| (b.resolution - resolution).abs() < 1e-9) {
            existing.pixmap = pixmap;
        } else {
            self.backgrounds.push(BackgroundPixmap { resolution, pixmap });
        }
    }

    /// Drops every stored background (called on page navigation — the
    /// previous page's pixmaps are no longer relevant to this view).
    pub fn clear_backgrounds(&mut self) {
        self.backgrounds.clear();
    }

    /// The background pixmap this view should paint at its current fitted
    /// resolution, if one has arrived yet.
    pub fn current_background(&self) -> Option<&RenderedPixmap> {
        self.backgrounds
            .iter()
            .find(|b| (b.resolution - self.resolution).abs() < 1e-9)
            .map(|b| &b.pixmap)
    }

    /// Whether a background pixmap of width ≥ `zoom · resolution ·
    /// page_width` is already available, per spec.md §4.7's magnifier
    /// precondition. If not, the caller should issue a non-blocking
    /// request at `zoom · resolution`.
    pub fn has_sufficient_magnifier_background(&self, zoom: f64, page_width: f64) -> bool {
        let target_width = zoom * self.resolution * page_width;
        self.backgrounds.iter().any(|b| b.pixmap.width as f64 >= target_width)
    }

    /// The resolution a magnifier render request should ask the cache for,
    /// given the view's current fitted resolution and the requested zoom.
    pub fn magnifier_request_resolution(&self, zoom: f64) -> f64 {
        zoom * self.resolution
    }

    /// Picks the background pixmap the magnifier should use right now:
    /// the smallest one whose width is ≥ the target width
    /// (next-larger-or-equal), or failing that the largest one available.
    /// Returns `None` only if no background has arrived at all.
    pub fn magnifier_source(&self, zoom: f64, page_width: f64) -> Option<&RenderedPixmap> {
        let target_width = zoom * self.resolution * page_width;
        self.backgrounds
            .iter()
            .filter(|b| b.pixmap.width as f64 >= target_width)
            .min_by(|a, b| a.pixmap.width.cmp(&b.pixmap.width))
            .or_else(|| self.backgrounds.iter().max_by_key(|b| b.pixmap.width))
            .map(|b| &b.pixmap)
    }

    /// Rebuilds the slider list from the media items currently loaded for
    /// `page`. A slider is hosted for every item that isn't set to
    /// autoplay silently in the background — spec.md §4.7's "media items
    /// that opt in" is read here as: an item needs a user-visible scrub
    /// control unless it's an unattended autoplaying background clip.
    pub fn sync_media_sliders(&mut self, media: &MediaRegistry, page: u32) {
        self.sliders = media
            .items_on_page(page)
            .enumerate()
            .filter(|(_, item)| slider_opts_in(item))
            .map(|(index, item)| MediaSlider {
                id: MediaSliderId { page, index },
                rect: item.annotation.rect,
                kind: item.annotation.kind,
            })
            .collect();
    }

    pub fn media_sliders(&self) -> &[MediaSlider] {
        &self.sliders
    }
}

impl Default for SlideView {
    fn default() -> Self {
        Self::new()
    }
}

fn slider_opts_in(item: &MediaItem) -> bool {
    !(item.annotation.autoplay && item.annotation.mute)
}

/// Builds the foreground paint description for the currently-active tool
/// (spec.md §4.7's five cases). `trail` is the tool's current pointer
/// positions ([`crate::scene::SlideScene::transient_trail`]);
/// `selection_region` is the in-progress marquee, if any; `magnifier_view`
/// supplies the enlarged background pixmap lookup for the `Magnifier` case.
pub fn foreground_paint(
    tool: &Tool,
    trail: &[Point],
    selection_region: Option<&SelectionRegion>,
    view: &SlideView,
) -> ForegroundPaint {
    match tool {
        Tool::Torch { radius } => ForegroundPaint::Torch {
            positions: trail.to_vec(),
            radius: *radius,
            color: crate::draw::BLACK,
        },
        Tool::Pointer { color, radius } => ForegroundPaint::Pointer {
            positions: trail.to_vec(),
            radius: *radius,
            color: *color,
        },
        Tool::Magnifier { radius, zoom } => {
            let center = trail.last().copied().unwrap_or_default();
            ForegroundPaint::Magnifier {
                center,
                radius: *radius,
                scale: *zoom,
                source: view.magnifier_source(*zoom, view.viewport_width).cloned(),
            }
        }
        Tool::Eraser(brush) => ForegroundPaint::Eraser {
            positions: trail.to_vec(),
            radius: brush.size / 2.0,
            scale: brush.size,
        },
        Tool::Selection(_) => match selection_region {
            Some(region) => ForegroundPaint::Selection { region: region.clone() },
            None => ForegroundPaint::None,
        },
        _ => ForegroundPaint::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MediaAnnotation, MediaSource, PlayMode};
    use crate::tool::SelectionKind;

    fn pixmap(width: u32) -> RenderedPixmap {
        RenderedPixmap { width, height: width, rgba: vec![0; (width * width * 4) as usize] }
    }

    #[test]
    fn refit_fits_the_smaller_of_width_or_height_ratio() {
        let mut view = SlideView::new();
        let changed = view.refit(800.0, 300.0, 400.0, 300.0);
        assert!(changed);
        assert!((view.resolution() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn refit_reports_no_change_when_resolution_is_unchanged() {
        let mut view = SlideView::new();
        view.refit(400.0, 300.0, 400.0, 300.0);
        let changed_again = view.refit(400.0, 300.0, 400.0, 300.0);
        assert!(!changed_again);
    }

    #[test]
    fn magnifier_source_prefers_next_larger_or_equal() {
        let mut view = SlideView::new();
        view.refit(400.0, 300.0, 400.0, 300.0);
        view.install_background(1.0, pixmap(400));
        view.install_background(2.0, pixmap(800));
        view.install_background(4.0, pixmap(1600));

        // target width = zoom(2.0) * resolution(1.0) * page_width(400) = 800
        let source = view.magnifier_source(2.0, 400.0).unwrap();
        assert_eq!(source.width, 800);
    }

    #[test]
    fn magnifier_source_falls_back_to_largest_available() {
        let mut view = SlideView::new();
        view.refit(400.0, 300.0, 400.0, 300.0);
        view.install_background(1.0, pixmap(400));
        // target width = 10.0 * 1.0 * 400 = 4000, nothing is that big
        let source = view.magnifier_source(10.0, 400.0).unwrap();
        assert_eq!(source.width, 400);
    }

    #[test]
    fn has_sufficient_magnifier_background_reflects_stored_widths() {
        let mut view = SlideView::new();
        view.refit(400.0, 300.0, 400.0, 300.0);
        assert!(!view.has_sufficient_magnifier_background(2.0, 400.0));
        view.install_background(2.0, pixmap(800));
        assert!(view.has_sufficient_magnifier_background(2.0, 400.0));
    }

    #[test]
    fn media_slider_sync_skips_silent_autoplay_items() {
        let mut registry = MediaRegistry::new();
        registry.ensure_loaded(
            0,
            vec![
                MediaAnnotation {
                    rect: Rect::new(0, 0, 10, 10).unwrap(),
                    kind: MediaKind::Video,
                    source: MediaSource::Url("a.mp4".into()),
                    autoplay: true,
                    mute: true,
                    play_mode: PlayMode::Once,
                },
                MediaAnnotation {
                    rect: Rect::new(20, 20, 10, 10).unwrap(),
                    kind: MediaKind::Audio,
                    source: MediaSource::Url("b.mp3".into()),
                    autoplay: false,
                    mute: false,
                    play_mode: PlayMode::Loop,
                },
            ],
        );
        let mut view = SlideView::new();
        view.sync_media_sliders(&registry, 0);
        assert_eq!(view.media_sliders().len(), 1);
        assert_eq!(view.media_sliders()[0].kind, MediaKind::Audio);
    }

    #[test]
    fn foreground_paint_torch_carries_trail_and_radius() {
        let view = SlideView::new();
        let tool = Tool::Torch { radius: 50.0 };
        let trail = vec![Point::new(1.0, 2.0)];
        match foreground_paint(&tool, &trail, None, &view) {
            ForegroundPaint::Torch { positions, radius, .. } => {
                assert_eq!(positions, trail);
                assert_eq!(radius, 50.0);
            }
            other => panic!("expected Torch, got {other:?}"),
        }
    }

    #[test]
    fn foreground_paint_selection_uses_supplied_region() {
        let view = SlideView::new();
        let tool = Tool::Selection(SelectionKind::Rect);
        let region = SelectionRegion::Rect { start: Point::new(0.0, 0.0), end: Point::new(5.0, 5.0) };
        match foreground_paint(&tool, &[], Some(&region), &view) {
            ForegroundPaint::Selection { region: got } => assert_eq!(got, region),
            other => panic!("expected Selection, got {other:?}"),
        }
    }

    #[test]
    fn foreground_paint_drag_tool_paints_nothing() {
        let view = SlideView::new();
        assert_eq!(foreground_paint(&Tool::Drag, &[], None, &view), ForegroundPaint::None);
    }
}
