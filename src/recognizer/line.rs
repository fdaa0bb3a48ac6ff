//! Whole-stroke line recognition and the line-segmentation pass that feeds
//! the rectangle recognizer.

use super::config::RecognizerConfig;
use super::moments::Moments;
use super::{FinalizedPath, RecognizedShape};

const SEGMENT_LOSS_CEILING: f64 = 0.005;
const COMBINE_ANGLE_TOLERANCE: f64 = 0.3;

/// Walks the stroke in steps of `len/50` points, fitting a running line on
/// each step's moments. A step is committed as its own segment when the
/// running fit's loss exceeds [`SEGMENT_LOSS_CEILING`] or grows too fast
/// relative to the segment's length so far (spec.md §4.3 "Line
/// segmentation"), then consecutive segments whose angles agree are
/// merged back together when the combined fit is still good.
pub(super) fn segment_and_combine(points: &[(f64, f64)], weights: &[f64]) -> Vec<Moments> {
    combine_segments(segment_path(points, weights))
}

fn segment_path(points: &[(f64, f64)], weights: &[f64]) -> Vec<Moments> {
    let n = points.len();
    if n == 0 {
        return Vec::new();
    }
    let step = (n / 50).max(1);

    let mut segments = Vec::new();
    let mut running = Moments::default();
    let mut start = 0usize;
    let mut prev_loss = 0.0f64;
    let mut i = 0usize;

    while i < n {
        let next = (i + step).min(n);
        let mut candidate = running;
        for k in i..next {
            candidate.add_point(points[k].0, points[k].1, weights[k]);
        }
        let loss = candidate.line(false).loss;
        let elapsed = (i - start).max(1) as f64;
        let grew_too_fast = i > start && loss > prev_loss + 8.0 * step as f64 / elapsed;

        if loss > SEGMENT_LOSS_CEILING || grew_too_fast {
            if running.s > 0.0 {
                segments.push(running);
            }
            running = Moments::default();
            for k in i..next {
                running.add_point(points[k].0, points[k].1, weights[k]);
            }
            start = i;
            prev_loss = running.line(false).loss;
        } else {
            running = candidate;
            prev_loss = loss;
        }
        i = next;
    }
    if running.s > 0.0 {
        segments.push(running);
    }
    segments
}

fn combine_segments(segments: Vec<Moments>) -> Vec<Moments> {
    let mut result: Vec<Moments> = Vec::new();
    for seg in segments {
        if let Some(&last) = result.last() {
            let a1 = last.line(false).angle;
            let a2 = seg.line(false).angle;
            if angles_agree(a1, a2, COMBINE_ANGLE_TOLERANCE) {
                let mut combined = last;
                combined.add_assign(&seg);
                if combined.line(false).loss < SEGMENT_LOSS_CEILING {
                    *result.last_mut().expect("just checked Some") = combined;
                    continue;
                }
            }
        }
        result.push(seg);
    }
    result
}

/// True if `a` and `b` differ by less than `tolerance`, either directly or
/// after folding by `pi` (a line's angle has no inherent direction).
pub(super) fn angles_agree(a: f64, b: f64, tolerance: f64) -> bool {
    let diff = (a - b).rem_euclid(std::f64::consts::PI);
    diff < tolerance || (std::f64::consts::PI - diff) < tolerance
}

/// Whole-stroke line decision (spec.md §4.3 "Line decision"): accepts if
/// the single line fit over all points has loss below
/// `config.line_sensitivity`, replacing the stroke with a straight segment
/// spanning its own bounding rect, snapped to horizontal/vertical if close.
pub(super) fn recognize_line(
    path: &FinalizedPath,
    moments: &Moments,
    config: &RecognizerConfig,
) -> Option<RecognizedShape> {
    let line = moments.line(false);
    if line.loss > config.line_sensitivity {
        return None;
    }
    let (min_x, min_y, max_x, max_y) = path.bounding_rect()?;

    let (dx, dy) = (line.angle.cos(), line.angle.sin());
    let (cx, cy) = (line.bx, line.by);
    let corners = [
        (min_x, min_y),
        (max_x, min_y),
        (max_x, max_y),
        (min_x, max_y),
    ];
    let mut t_min = f64::MAX;
    let mut t_max = f64::MIN;
    for (x, y) in corners {
        let t = (x - cx) * dx + (y - cy) * dy;
        t_min = t_min.min(t);
        t_max = t_max.max(t);
    }

    let mut x1 = cx + dx * t_min;
    let mut y1 = cy + dy * t_min;
    let mut x2 = cx + dx * t_max;
    let mut y2 = cy + dy * t_max;

    let folded = line.angle.rem_euclid(std::f64::consts::PI);
    if folded < config.snap_angle || (std::f64::consts::PI - folded) < config.snap_angle {
        let avg_y = (y1 + y2) / 2.0;
        y1 = avg_y;
        y2 = avg_y;
    } else if (folded - std::f64::consts::FRAC_PI_2).abs() < config.snap_angle {
        let avg_x = (x1 + x2) / 2.0;
        x1 = avg_x;
        x2 = avg_x;
    }

    Some(RecognizedShape::Line { x1, y1, x2, y2 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_agree_folds_by_pi() {
        assert!(angles_agree(0.05, std::f64::consts::PI - 0.05, 0.2));
        assert!(!angles_agree(0.0, std::f64::consts::FRAC_PI_2, 0.2));
    }

    #[test]
    fn segmentation_of_a_straight_line_yields_one_segment() {
        let points: Vec<(f64, f64)> = (0..200).map(|i| (i as f64, 0.0)).collect();
        let weights = vec![1.0; points.len()];
        let segments = segment_and_combine(&points, &weights);
        assert_eq!(segments.len(), 1);
    }
}
