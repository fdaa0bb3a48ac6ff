//! Accumulates damage regions so callers can issue minimal repaint requests.

use crate::util::Rect;

/// Accumulates a set of dirty rectangles, merging them into their union.
///
/// The engine never computes a minimal disjoint rectangle cover; it tracks a
/// single bounding union, which is cheap and sufficient for damage hints to
/// a host renderer that will usually just repaint the containing page.
#[derive(Debug, Default, Clone)]
pub struct DirtyTracker {
    union: Option<Rect>,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self { union: None }
    }

    pub fn mark(&mut self, rect: Rect) {
        self.union = Some(match self.union {
            Some(existing) => union_rect(existing, rect),
            None => rect,
        });
    }

    pub fn mark_optional(&mut self, rect: Option<Rect>) {
        if let Some(rect) = rect {
            self.mark(rect);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.union.is_some()
    }

    pub fn take(&mut self) -> Option<Rect> {
        self.union.take()
    }

    pub fn peek(&self) -> Option<Rect> {
        self.union
    }

    pub fn clear(&mut self) {
        self.union = None;
    }
}

fn union_rect(a: Rect, b: Rect) -> Rect {
    let min_x = a.x.min(b.x);
    let min_y = a.y.min(b.y);
    let max_x = (a.x + a.width).max(b.x + b.width);
    let max_y = (a.y + a.height).max(b.y + b.height);
    Rect::from_min_max(min_x, min_y, max_x, max_y).unwrap_or(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marking_nothing_is_not_dirty() {
        let tracker = DirtyTracker::new();
        assert!(!tracker.is_dirty());
    }

    #[test]
    fn union_grows_to_cover_both_rects() {
        let mut tracker = DirtyTracker::new();
        tracker.mark(Rect::new(0, 0, 10, 10).unwrap());
        tracker.mark(Rect::new(20, 20, 10, 10).unwrap());
        let union = tracker.peek().unwrap();
        assert_eq!(union, Rect::from_min_max(0, 0, 30, 30).unwrap());
    }

    #[test]
    fn take_clears_state() {
        let mut tracker = DirtyTracker::new();
        tracker.mark(Rect::new(0, 0, 5, 5).unwrap());
        assert!(tracker.take().is_some());
        assert!(!tracker.is_dirty());
    }
}
