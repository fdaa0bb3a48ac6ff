//! Selection-tool sub-modes and the transform operations it can apply to a
//! live selection.

use crate::util::{Point, Transform};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a selection gesture decides membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum SelectionKind {
    /// Click an item directly, or click-drag a rubber-band rect.
    Basic,
    /// Drag out an axis-aligned rectangle; every item that intersects it
    /// is selected.
    Rect,
    /// Draw a freehand lasso polygon; every item fully inside it is
    /// selected.
    Freehand,
}

/// An operation the selection tool applies to every currently-selected
/// item. Each item stores its own `initial_scene_transform` captured once
/// at gesture start (see `container::PathContainer::apply_selection_op`);
/// this type is the pure "what op" half, replayed fresh on every pointer
/// move rather than accumulated, so repeated small rounding errors never
/// compound (redesign flag 4).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SelectionOp {
    Move { delta: Point },
    Rotate { center: Point, radians: f64 },
    Resize { center: Point, scale_x: f64, scale_y: f64 },
}

impl SelectionOp {
    /// The transform this operation represents, independent of any item's
    /// starting state — callers compose it with `initial_scene_transform`.
    pub fn as_transform(&self) -> Transform {
        match *self {
            SelectionOp::Move { delta } => Transform::translation(delta.x, delta.y),
            SelectionOp::Rotate { center, radians } => Transform::rotation_about(radians, center),
            SelectionOp::Resize {
                center,
                scale_x,
                scale_y,
            } => Transform::scale_about(scale_x, scale_y, center),
        }
    }
}

/// The region a selection gesture is still being dragged out, before it
/// commits to a concrete set of selected item ids.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionRegion {
    Rect { start: Point, end: Point },
    Polygon { points: Vec<Point> },
}

impl SelectionRegion {
    /// Point-in-region test used to decide membership against each
    /// candidate item's bounding-rect corners.
    pub fn contains(&self, p: Point) -> bool {
        match self {
            SelectionRegion::Rect { start, end } => {
                let (min_x, max_x) = (start.x.min(end.x), start.x.max(end.x));
                let (min_y, max_y) = (start.y.min(end.y), start.y.max(end.y));
                p.x >= min_x && p.x <= max_x && p.y >= min_y && p.y <= max_y
            }
            SelectionRegion::Polygon { points } => point_in_polygon(p, points),
        }
    }
}

/// Standard even-odd ray-casting point-in-polygon test.
fn point_in_polygon(p: Point, points: &[Point]) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let pi = points[i];
        let pj = points[j];
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_at_y = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_at_y {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_op_is_pure_translation() {
        let op = SelectionOp::Move {
            delta: Point::new(3.0, -2.0),
        };
        let t = op.as_transform();
        let p = t.apply(Point::new(1.0, 1.0));
        assert_eq!(p, Point::new(4.0, -1.0));
    }

    #[test]
    fn rect_region_contains_respects_bounds() {
        let region = SelectionRegion::Rect {
            start: Point::new(0.0, 0.0),
            end: Point::new(10.0, 10.0),
        };
        assert!(region.contains(Point::new(5.0, 5.0)));
        assert!(!region.contains(Point::new(11.0, 5.0)));
    }

    #[test]
    fn polygon_region_uses_point_in_polygon() {
        let region = SelectionRegion::Polygon {
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
        };
        assert!(region.contains(Point::new(5.0, 5.0)));
        assert!(!region.contains(Point::new(15.0, 5.0)));
    }
}
