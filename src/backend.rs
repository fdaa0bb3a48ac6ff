//! The external PDF parsing backend (spec.md §1 "Out of scope", §6
//! "External interfaces"): a thin object-safe trait this crate consumes
//! but never implements. A host application wires in whatever concrete
//! PDF library it uses; this crate only needs page sizes, annotations,
//! links, and rendered pixmaps out of it.

use crate::media::MediaAnnotation;
use crate::transitions::TransitionRecord;
use crate::util::{Point, Rect};

/// Which portion of a page a render request wants — spec.md §3's
/// "page-part" (whole page, left half, right half), used to split a
/// dual-output deck into presenter notes on one half and slide content
/// on the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageCrop {
    Full,
    LeftHalf,
    RightHalf,
}

/// A rendered page (or page-part), decoded to straight RGBA8 rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPixmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl RenderedPixmap {
    pub fn matches_resolution(&self, resolution: f64, page_width: f64, page_height: f64) -> bool {
        let expected_w = resolution * page_width;
        let expected_h = resolution * page_height;
        (self.width as f64 - expected_w).abs() <= 2.0
            && (self.height as f64 - expected_h).abs() <= 2.0
    }
}

/// Where a click on a PDF link annotation navigates (spec.md §4.5 "No
/// tool click").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    GoToPage(u32),
    Action(String),
    Url(String),
    Media { annotation_index: usize },
}

/// One hit from [`PdfBackend::search`]: a page number plus the scene
/// rects (in page coordinates) the query matched on that page.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub page: u32,
    pub rects: Vec<Rect>,
}

/// The object-safe interface this crate consumes from a concrete PDF
/// parser. Every method is synchronous from the trait's point of view;
/// callers that need async rendering (the rendering cache worker, spec.md
/// §4.8) invoke it from a background thread themselves.
pub trait PdfBackend: Send + Sync {
    fn page_count(&self) -> u32;
    fn page_size(&self, index: u32) -> Option<(f64, f64)>;
    fn page_label(&self, index: u32) -> Option<String>;
    /// Whether overlay annotations on pages after `index` must shift their
    /// page index by `shift` (e.g. a page was inserted/removed upstream).
    fn overlays_shifted(&self, index: u32, shift: i32) -> bool;
    fn transition(&self, index: u32) -> Option<TransitionRecord>;
    fn annotations(&self, index: u32) -> Vec<MediaAnnotation>;
    fn link_at(&self, index: u32, point: Point) -> Option<LinkTarget>;
    fn render(&self, index: u32, resolution: f64, part: PageCrop) -> Option<RenderedPixmap>;
    fn search(&self, query: &str) -> Vec<SearchHit>;
}

#[cfg(test)]
pub(crate) mod test_double {
    //! A minimal in-memory [`PdfBackend`] used by integration tests —
    //! generates a flat-colored pixmap of the requested size rather than
    //! decoding a real PDF.
    use super::*;
    use std::collections::HashMap;

    pub struct FakeBackend {
        pub page_sizes: Vec<(f64, f64)>,
        pub transitions: HashMap<u32, TransitionRecord>,
        pub annotations: HashMap<u32, Vec<MediaAnnotation>>,
    }

    impl FakeBackend {
        pub fn new(pages: usize, width: f64, height: f64) -> Self {
            Self {
                page_sizes: vec![(width, height); pages],
                transitions: HashMap::new(),
                annotations: HashMap::new(),
            }
        }
    }

    impl PdfBackend for FakeBackend {
        fn page_count(&self) -> u32 {
            self.page_sizes.len() as u32
        }

        fn page_size(&self, index: u32) -> Option<(f64, f64)> {
            self.page_sizes.get(index as usize).copied()
        }

        fn page_label(&self, index: u32) -> Option<String> {
            self.page_sizes.get(index as usize).map(|_| (index + 1).to_string())
        }

        fn overlays_shifted(&self, _index: u32, _shift: i32) -> bool {
            false
        }

        fn transition(&self, index: u32) -> Option<TransitionRecord> {
            self.transitions.get(&index).copied()
        }

        fn annotations(&self, index: u32) -> Vec<MediaAnnotation> {
            self.annotations.get(&index).cloned().unwrap_or_default()
        }

        fn link_at(&self, _index: u32, _point: Point) -> Option<LinkTarget> {
            None
        }

        fn render(&self, index: u32, resolution: f64, part: PageCrop) -> Option<RenderedPixmap> {
            let (w, h) = self.page_size(index)?;
            let w = match part {
                PageCrop::Full => w,
                PageCrop::LeftHalf | PageCrop::RightHalf => w / 2.0,
            };
            let px_w = (w * resolution).round().max(1.0) as u32;
            let px_h = (h * resolution).round().max(1.0) as u32;
            Some(RenderedPixmap {
                width: px_w,
                height: px_h,
                rgba: vec![128; (px_w as usize) * (px_h as usize) * 4],
            })
        }

        fn search(&self, _query: &str) -> Vec<SearchHit> {
            Vec::new()
        }
    }
}
