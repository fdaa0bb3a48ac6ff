//! Post-stroke shape recognition: fits a freehand path to a line,
//! rectangle, or ellipse using weighted moments over its points.
//!
//! Pure and stateless — [`recognize`] takes a finalized path and a
//! [`RecognizerConfig`] and returns at most one candidate shape. Nothing
//! here touches `PathContainer` or any engine state, so it is unit
//! testable without a live container (spec §4.3 supplement).

mod config;
mod ellipse;
mod line;
mod moments;
mod rect;

pub use config::RecognizerConfig;

use moments::{HigherMoments, Moments};

/// A freehand path ready for recognition: points in scene coordinates plus
/// an optional per-point pressure weight (absent for fixed-width paths,
/// per spec §4.3 "weight = per-point pressure for full paths, 1 otherwise").
#[derive(Debug, Clone)]
pub struct FinalizedPath {
    points: Vec<(f64, f64)>,
    pressures: Option<Vec<f32>>,
}

impl FinalizedPath {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self {
            points,
            pressures: None,
        }
    }

    pub fn with_pressures(points: Vec<(f64, f64)>, pressures: Vec<f32>) -> Self {
        assert_eq!(points.len(), pressures.len());
        Self {
            points,
            pressures: Some(pressures),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn weight(&self, i: usize) -> f64 {
        self.pressures
            .as_ref()
            .map(|p| p[i] as f64)
            .unwrap_or(1.0)
    }

    pub(crate) fn weights(&self) -> Vec<f64> {
        (0..self.points.len()).map(|i| self.weight(i)).collect()
    }

    pub(crate) fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn bounding_rect(&self) -> Option<(f64, f64, f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        let (mut min_x, mut min_y) = (f64::MAX, f64::MAX);
        let (mut max_x, mut max_y) = (f64::MIN, f64::MIN);
        for &(x, y) in &self.points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Some((min_x, min_y, max_x, max_y))
    }

    pub fn first_last(&self) -> Option<((f64, f64), (f64, f64))> {
        let first = *self.points.first()?;
        let last = *self.points.last()?;
        Some((first, last))
    }

    pub(crate) fn moments(&self) -> Moments {
        let mut m = Moments::default();
        for (i, &(x, y)) in self.points.iter().enumerate() {
            m.add_point(x, y, self.weight(i));
        }
        m
    }

    pub(crate) fn higher_moments(&self) -> HigherMoments {
        let mut h = HigherMoments::default();
        for (i, &(x, y)) in self.points.iter().enumerate() {
            h.add_point(x, y, self.weight(i));
        }
        h
    }
}

/// A shape the recognizer decided a freehand stroke most likely represents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecognizedShape {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    /// Axis-aligned extent plus a rotation (radians, about the rect's own
    /// center) since `draw::Shape::Rect` itself carries no angle field —
    /// callers apply the angle as the item's scene transform (spec.md §9
    /// Design Notes, Open Question 1 in DESIGN.md).
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        angle: f64,
    },
    Ellipse {
        center_x: f64,
        center_y: f64,
        rx: f64,
        ry: f64,
    },
}

/// Runs the full recognizer pipeline over a finalized path: line first
/// (cheapest, and a rectangle/ellipse stroke with this few points is
/// already a degenerate case), then rectangle (requires exactly four
/// segments), then ellipse. Returns `None` ("no recognition") rather than
/// guessing on ambiguous or degenerate input — the gradient descent in the
/// ellipse fit in particular can land on a local minimum and spec.md §9
/// calls for falling back to no-op rather than reporting a bad fit.
pub fn recognize(path: &FinalizedPath, config: &RecognizerConfig) -> Option<RecognizedShape> {
    if path.len() < 3 {
        return None;
    }

    let moments = path.moments();
    if let Some(line_shape) = line::recognize_line(path, &moments, config) {
        return Some(line_shape);
    }

    let weights = path.weights();
    let segments = line::segment_and_combine(path.points(), &weights);
    if let Some(rect_shape) = rect::recognize_rect(path, &segments, config) {
        return Some(rect_shape);
    }

    ellipse::recognize_ellipse(path, &moments, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_path_never_recognized() {
        let path = FinalizedPath::new(vec![(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(recognize(&path, &RecognizerConfig::default()), None);
    }

    #[test]
    fn near_horizontal_stroke_recognizes_as_snapped_line() {
        let mut points = Vec::new();
        for i in 0..100 {
            let x = i as f64 * 2.0;
            // deterministic small wobble, no real randomness needed to
            // exercise the snap-to-horizontal path.
            let y = if i % 2 == 0 { 0.2 } else { -0.2 };
            points.push((x, y));
        }
        let path = FinalizedPath::new(points);
        match recognize(&path, &RecognizerConfig::default()) {
            Some(RecognizedShape::Line { y1, y2, .. }) => {
                assert!((y1 - y2).abs() < 1e-9, "line should snap to horizontal");
            }
            other => panic!("expected a recognized line, got {other:?}"),
        }
    }

    #[test]
    fn closed_circle_recognizes_as_ellipse() {
        let mut points = Vec::new();
        let n = 120;
        for i in 0..=n {
            let t = std::f64::consts::TAU * i as f64 / n as f64;
            points.push((50.0 + 40.0 * t.cos(), 50.0 + 40.0 * t.sin()));
        }
        let path = FinalizedPath::new(points);
        match recognize(&path, &RecognizerConfig::default()) {
            Some(RecognizedShape::Ellipse { rx, ry, .. }) => {
                assert!((rx - 40.0).abs() < 2.0);
                assert!((ry - 40.0).abs() < 2.0);
            }
            other => panic!("expected a recognized ellipse, got {other:?}"),
        }
    }

    #[test]
    fn closed_square_recognizes_as_rect() {
        let mut points = Vec::new();
        // four sides, 25 points each, traced clockwise starting at origin.
        for i in 0..25 {
            points.push((i as f64 * 4.0, 0.0));
        }
        for i in 0..25 {
            points.push((100.0, i as f64 * 4.0));
        }
        for i in 0..25 {
            points.push((100.0 - i as f64 * 4.0, 100.0));
        }
        for i in 0..25 {
            points.push((0.0, 100.0 - i as f64 * 4.0));
        }
        points.push((0.0, 0.0));
        let path = FinalizedPath::new(points);
        match recognize(&path, &RecognizerConfig::default()) {
            Some(RecognizedShape::Rect { w, h, .. }) => {
                assert!((w - 100.0).abs() < 5.0);
                assert!((h - 100.0).abs() < 5.0);
            }
            other => panic!("expected a recognized rect, got {other:?}"),
        }
    }
}
