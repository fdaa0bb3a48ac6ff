//! Point-sequence splitting for the eraser tool: walks a stroke's stored
//! coordinates and breaks them into the runs that survive outside the
//! brush, rather than deleting the whole item on any contact.
//!
//! Shapes that aren't built from a point sequence (lines, rects, text,
//! pictures, ...) have no meaningful "partial" erase — contact deletes
//! them whole.

use crate::draw::{EraserBrush, EraserKind, Shape};
use crate::util::{Point, Transform};

/// What erasing at one brush position did to an item.
pub enum EraseOutcome {
    Untouched,
    DeleteWhole,
    /// The item is removed and replaced by these fresh fragments.
    Split(Vec<Shape>),
}

fn brush_hits(brush: &EraserBrush, center: Point, p: Point) -> bool {
    match brush.kind {
        EraserKind::Circle => center.distance_to(p) <= brush.size,
        EraserKind::Rect => {
            (p.x - center.x).abs() <= brush.size && (p.y - center.y).abs() <= brush.size
        }
    }
}

/// Splits a point sequence at every point the brush touches, dropping
/// runs shorter than two points (no drawable fragment). Returns `None`
/// if nothing in `points` was touched.
fn split_points<T: Copy>(points: &[T], hits: impl Fn(T) -> bool) -> Option<Vec<Vec<T>>> {
    let mut runs: Vec<Vec<T>> = Vec::new();
    let mut current: Vec<T> = Vec::new();
    let mut touched = false;
    for &pt in points {
        if hits(pt) {
            touched = true;
            if current.len() >= 2 {
                runs.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        } else {
            current.push(pt);
        }
    }
    if !touched {
        return None;
    }
    if current.len() >= 2 {
        runs.push(current);
    }
    Some(runs)
}

/// Erases at a single brush position, given in scene coordinates.
/// `to_scene` is the item's own `Entry::transform` (identity for an item
/// that has never been moved/rotated/resized by the selection tool).
pub fn erase_at(shape: &Shape, to_scene: &Transform, pos: Point, brush: &EraserBrush) -> EraseOutcome {
    match shape {
        Shape::Freehand { points, color, thick } => {
            let hits = |(x, y): (i32, i32)| brush_hits(brush, pos, to_scene.apply(Point::new(x as f64, y as f64)));
            match split_points(points, hits) {
                None => EraseOutcome::Untouched,
                Some(runs) if runs.is_empty() => EraseOutcome::DeleteWhole,
                Some(runs) => EraseOutcome::Split(
                    runs.into_iter()
                        .map(|pts| Shape::Freehand {
                            points: pts,
                            color: *color,
                            thick: *thick,
                        })
                        .collect(),
                ),
            }
        }
        Shape::MarkerStroke { points, color, thick } => {
            let hits = |(x, y): (i32, i32)| brush_hits(brush, pos, to_scene.apply(Point::new(x as f64, y as f64)));
            match split_points(points, hits) {
                None => EraseOutcome::Untouched,
                Some(runs) if runs.is_empty() => EraseOutcome::DeleteWhole,
                Some(runs) => EraseOutcome::Split(
                    runs.into_iter()
                        .map(|pts| Shape::MarkerStroke {
                            points: pts,
                            color: *color,
                            thick: *thick,
                        })
                        .collect(),
                ),
            }
        }
        Shape::FreehandPressure { points, color } => {
            let hits = |(x, y, _): (i32, i32, f32)| {
                brush_hits(brush, pos, to_scene.apply(Point::new(x as f64, y as f64)))
            };
            match split_points(points, hits) {
                None => EraseOutcome::Untouched,
                Some(runs) if runs.is_empty() => EraseOutcome::DeleteWhole,
                Some(runs) => EraseOutcome::Split(
                    runs.into_iter()
                        .map(|pts| Shape::FreehandPressure {
                            points: pts,
                            color: *color,
                        })
                        .collect(),
                ),
            }
        }
        other => {
            if whole_shape_hit(other, to_scene, pos, brush) {
                EraseOutcome::DeleteWhole
            } else {
                EraseOutcome::Untouched
            }
        }
    }
}

fn whole_shape_hit(shape: &Shape, to_scene: &Transform, pos: Point, brush: &EraserBrush) -> bool {
    let Some(bounds) = shape.bounding_box() else {
        return false;
    };
    let corners = [
        Point::new(bounds.x as f64, bounds.y as f64),
        Point::new((bounds.x + bounds.width) as f64, bounds.y as f64),
        Point::new(bounds.x as f64, (bounds.y + bounds.height) as f64),
        Point::new((bounds.x + bounds.width) as f64, (bounds.y + bounds.height) as f64),
    ];
    let mapped: Vec<Point> = corners.iter().map(|&p| to_scene.apply(p)).collect();
    let min_x = mapped.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = mapped.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = mapped.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = mapped.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    let half = brush.size / 2.0;
    pos.x + half >= min_x && pos.x - half <= max_x && pos.y + half >= min_y && pos.y - half <= max_y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{EraserKind, BLACK};

    fn brush(size: f64) -> EraserBrush {
        EraserBrush {
            size,
            kind: EraserKind::Circle,
        }
    }

    #[test]
    fn untouched_stroke_is_reported_untouched() {
        let shape = Shape::Freehand {
            points: vec![(0, 0), (10, 0), (20, 0)],
            color: BLACK,
            thick: 1.0,
        };
        let outcome = erase_at(&shape, &Transform::IDENTITY, Point::new(1000.0, 1000.0), &brush(4.0));
        assert!(matches!(outcome, EraseOutcome::Untouched));
    }

    #[test]
    fn middle_contact_splits_into_two_fragments() {
        let shape = Shape::Freehand {
            points: vec![(0, 0), (10, 0), (20, 0), (30, 0), (40, 0), (50, 0)],
            color: BLACK,
            thick: 1.0,
        };
        let outcome = erase_at(&shape, &Transform::IDENTITY, Point::new(25.0, 0.0), &brush(8.0));
        match outcome {
            EraseOutcome::Split(fragments) => assert_eq!(fragments.len(), 2),
            _ => panic!("expected a split"),
        }
    }

    #[test]
    fn contact_across_whole_stroke_deletes_it() {
        let shape = Shape::Freehand {
            points: vec![(0, 0), (1, 0), (2, 0)],
            color: BLACK,
            thick: 1.0,
        };
        let outcome = erase_at(&shape, &Transform::IDENTITY, Point::new(1.0, 0.0), &brush(20.0));
        assert!(matches!(outcome, EraseOutcome::DeleteWhole));
    }

    #[test]
    fn non_point_shape_erases_whole_on_bbox_contact() {
        let shape = Shape::Rect {
            x: 0,
            y: 0,
            w: 10,
            h: 10,
            fill: false,
            color: BLACK,
            thick: 1.0,
        };
        let hit = erase_at(&shape, &Transform::IDENTITY, Point::new(5.0, 5.0), &brush(2.0));
        assert!(matches!(hit, EraseOutcome::DeleteWhole));
        let miss = erase_at(&shape, &Transform::IDENTITY, Point::new(500.0, 500.0), &brush(2.0));
        assert!(matches!(miss, EraseOutcome::Untouched));
    }
}
