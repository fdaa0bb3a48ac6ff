//! Recognizer thresholds, exposed as named configurable fields rather than
//! literals scattered through the fit code.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Thresholds controlling how aggressively freehand strokes snap to lines,
/// rectangles, and ellipses.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Maximum acceptable loss for the whole-stroke line fit.
    pub line_sensitivity: f64,
    /// Angle (radians) within which a fitted line/rectangle edge snaps to
    /// horizontal, vertical, or a right angle.
    pub snap_angle: f64,
    /// Maximum acceptable normalized loss for the ellipse fit.
    pub ellipse_sensitivity: f64,
    /// Fraction of `rx + ry` within which the two radii snap to a circle.
    pub ellipse_to_circle_snapping: f64,
    /// Per-segment angle-agreement tolerance for the rectangle fit, scaled
    /// by total segment weight.
    pub rect_angle_tolerance: f64,
    /// How close the stroke's start and end point must be (relative to the
    /// stroke's point variance) to accept a rectangle fit.
    pub rect_closing_tolerance: f64,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            line_sensitivity: 0.1,
            snap_angle: 0.1,
            ellipse_sensitivity: 0.1,
            ellipse_to_circle_snapping: 0.1,
            rect_angle_tolerance: 0.3,
            rect_closing_tolerance: 0.1,
        }
    }
}
