//! Rectangle recognition: accepted only when line segmentation produced
//! exactly four segments whose angles agree (pairwise at a right angle)
//! and whose stroke closes on itself (spec.md §4.3 "Rectangle decision").

use super::config::RecognizerConfig;
use super::line::angles_agree;
use super::moments::{Line, Moments};
use super::{FinalizedPath, RecognizedShape};

pub(super) fn recognize_rect(
    path: &FinalizedPath,
    segments: &[Moments],
    config: &RecognizerConfig,
) -> Option<RecognizedShape> {
    if segments.len() != 4 {
        return None;
    }

    let (first, last) = path.first_last()?;
    let mut combined = Moments::default();
    for seg in segments {
        combined.add_assign(seg);
    }
    let var = combined.var().max(0.0);
    let closing_tolerance = (config.rect_closing_tolerance * var).sqrt();
    let end_distance =
        ((last.0 - first.0).powi(2) + (last.1 - first.1).powi(2)).sqrt();
    if end_distance > closing_tolerance {
        return None;
    }

    let lines: Vec<Line> = segments.iter().map(|m| m.line(true)).collect();
    let total_weight: f64 = lines.iter().map(|l| l.weight).sum();

    let base = lines[0].angle.rem_euclid(std::f64::consts::FRAC_PI_2);
    for l in &lines {
        let folded = l.angle.rem_euclid(std::f64::consts::FRAC_PI_2);
        if !angles_agree(folded, base, config.rect_angle_tolerance * total_weight.max(1e-9)) {
            return None;
        }
    }

    let mut angle = base;
    if angle < config.snap_angle || (std::f64::consts::FRAC_PI_2 - angle) < config.snap_angle {
        angle = 0.0;
    }

    let corners = intersect_ring(&lines)?;
    let (x, y, w, h) = bounding_box_of(&corners);
    if w < 1e-6 || h < 1e-6 {
        return None;
    }

    Some(RecognizedShape::Rect { x, y, w, h, angle })
}

/// Intersects each pair of consecutive fitted lines (as the stroke visits
/// them in order) to find the four corners of the rectangle they bound.
fn intersect_ring(lines: &[Line]) -> Option<[(f64, f64); 4]> {
    let mut corners = [(0.0, 0.0); 4];
    for i in 0..4 {
        let a = &lines[i];
        let b = &lines[(i + 1) % 4];
        corners[i] = line_intersection(a, b)?;
    }
    Some(corners)
}

fn line_intersection(a: &Line, b: &Line) -> Option<(f64, f64)> {
    let (dx1, dy1) = (a.angle.cos(), a.angle.sin());
    let (dx2, dy2) = (b.angle.cos(), b.angle.sin());
    let denom = dx1 * dy2 - dy1 * dx2;
    if denom.abs() < 1e-9 {
        return None;
    }
    let t = ((b.bx - a.bx) * dy2 - (b.by - a.by) * dx2) / denom;
    Some((a.bx + t * dx1, a.by + t * dy1))
}

fn bounding_box_of(corners: &[(f64, f64); 4]) -> (f64, f64, f64, f64) {
    let (mut min_x, mut min_y) = (f64::MAX, f64::MAX);
    let (mut max_x, mut max_y) = (f64::MIN, f64::MIN);
    for &(x, y) in corners {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    (min_x, min_y, max_x - min_x, max_y - min_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_exactly_four_segments() {
        let path = FinalizedPath::new(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let segments = vec![Moments::default(); 3];
        assert_eq!(
            recognize_rect(&path, &segments, &RecognizerConfig::default()),
            None
        );
    }
}
