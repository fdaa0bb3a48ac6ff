//! Ellipse fit: minimizes a quartic loss in `(mx, my, ax, ay)` where
//! `ax = 1/rx^2`, `ay = 1/ry^2` (used in place of the radii themselves so the
//! loss stays polynomial) via up to 12 gradient-descent steps.

use super::config::RecognizerConfig;
use super::moments::{HigherMoments, Moments};
use super::{FinalizedPath, RecognizedShape};

const OPTIMIZE_ITERATIONS: usize = 12;
const STEP_CENTER: f64 = 0.07;
const STEP_RADII: f64 = 0.15;
const STOP_THRESHOLD: f64 = 1e-3;
const START_END_MAX_DISTANCE: f64 = 0.1;

/// `sum_k w_k * [(x_k - mx)^2 * ax + (y_k - my)^2 * ay - 1]^2`
fn loss(m: &Moments, h: &HigherMoments, mx: f64, my: f64, ax: f64, ay: f64) -> f64 {
    let bc = mx * mx * ax + my * my * ay - 1.0;
    m.s * bc * bc
        + h.sxxxx * ax * ax
        + h.syyyy * ay * ay
        + 2.0 * h.sxxyy * ax * ay
        + 2.0 * (2.0 * mx * mx * ax + bc) * m.sxx * ax
        + 2.0 * (2.0 * my * my * ay + bc) * m.syy * ay
        + 8.0 * mx * my * m.sxy * ax * ay
        - 4.0 * mx * ax * (h.sxxx * ax + h.sxyy * ay)
        - 4.0 * my * ay * (h.sxxy * ax + h.syyy * ay)
        - 4.0 * bc * (mx * m.sx * ax + my * m.sy * ay)
}

fn grad_mx(m: &Moments, h: &HigherMoments, mx: f64, my: f64, ax: f64, ay: f64) -> f64 {
    let bc = mx * mx * ax + my * my * ay - 1.0;
    4.0 * m.s * bc * mx * ax
        + 12.0 * mx * m.sxx * ax * ax
        + 4.0 * mx * m.syy * ax * ay
        + 8.0 * my * m.sxy * ax * ay
        - 4.0 * ax * (h.sxxx * ax + h.sxyy * ay)
        - 4.0 * bc * m.sx * ax
        - 8.0 * mx * ax * (mx * m.sx * ax + my * m.sy * ay)
}

fn grad_my(m: &Moments, h: &HigherMoments, mx: f64, my: f64, ax: f64, ay: f64) -> f64 {
    let bc = mx * mx * ax + my * my * ay - 1.0;
    4.0 * m.s * bc * my * ay
        + 12.0 * my * m.syy * ay * ay
        + 4.0 * my * m.sxx * ax * ay
        + 8.0 * mx * m.sxy * ax * ay
        - 4.0 * ay * (h.sxxy * ax + h.syyy * ay)
        - 4.0 * bc * m.sy * ay
        - 8.0 * my * ay * (mx * m.sx * ax + my * m.sy * ay)
}

fn grad_ax(m: &Moments, h: &HigherMoments, mx: f64, my: f64, ax: f64, ay: f64) -> f64 {
    let bc = mx * mx * ax + my * my * ay - 1.0;
    2.0 * m.s * mx * mx * bc
        + 2.0 * h.sxxxx * ax
        + 2.0 * h.sxxyy * ay
        + 2.0 * (5.0 * mx * mx * ax + bc) * m.sxx
        + 2.0 * mx * mx * m.syy * ay
        + 8.0 * mx * my * m.sxy * ay
        - 4.0 * mx * (2.0 * h.sxxx * ax + h.sxyy * ay)
        - 4.0 * my * ay * h.sxxy
        - 4.0 * mx * mx * (mx * m.sx * ax + my * m.sy * ay)
        - 4.0 * bc * mx * m.sx
}

fn grad_ay(m: &Moments, h: &HigherMoments, mx: f64, my: f64, ax: f64, ay: f64) -> f64 {
    let bc = mx * mx * ax + my * my * ay - 1.0;
    2.0 * m.s * my * my * bc
        + 2.0 * h.syyyy * ay
        + 2.0 * h.sxxyy * ax
        + 2.0 * (5.0 * my * my * ay + bc) * m.syy
        + 2.0 * my * my * m.sxx * ax
        + 8.0 * mx * my * m.sxy * ax
        - 4.0 * my * (h.sxxy * ax + 2.0 * h.syyy * ay)
        - 4.0 * mx * ax * h.sxyy
        - 4.0 * my * my * (mx * m.sx * ax + my * m.sy * ay)
        - 4.0 * bc * my * m.sy
}

pub(super) fn recognize_ellipse(
    path: &FinalizedPath,
    moments: &Moments,
    config: &RecognizerConfig,
) -> Option<RecognizedShape> {
    let bounds = path.bounding_rect()?;
    let (mut mx, mut my) = ((bounds.0 + bounds.2) / 2.0, (bounds.1 + bounds.3) / 2.0);
    let mut rx = (bounds.2 - bounds.0) / 2.0;
    let mut ry = (bounds.3 - bounds.1) / 2.0;
    if rx < 1e-6 || ry < 1e-6 {
        return None;
    }

    let higher = path.higher_moments();

    let mut ax = 1.0 / (rx * rx);
    let mut ay = 1.0 / (ry * ry);
    let initial_loss = loss(moments, &higher, mx, my, ax, ay) / (moments.s + 10.0);
    if initial_loss > 4.0 * config.ellipse_sensitivity {
        return None;
    }

    for i in 0..OPTIMIZE_ITERATIONS {
        let gmx = grad_mx(moments, &higher, mx, my, ax, ay);
        let gmy = grad_my(moments, &higher, mx, my, ax, ay);
        let gax = grad_ax(moments, &higher, mx, my, ax, ay);
        let gay = grad_ay(moments, &higher, mx, my, ax, ay);
        if gmx.abs() * (rx + ry) < STOP_THRESHOLD * moments.s
            && gmy.abs() * (rx + ry) < STOP_THRESHOLD * moments.s
            && gax.abs() * ax < STOP_THRESHOLD * moments.s
            && gay.abs() * ay < STOP_THRESHOLD * moments.s
        {
            break;
        }
        let scale = 1.0 + (i * i) as f64;
        let mnorm = STEP_CENTER / (scale * (gmx * gmx + gmy * gmy).sqrt());
        let anorm = STEP_RADII / (scale * (gax * gax + gay * gay).sqrt());
        mx -= (rx + ry) * mnorm * gmx;
        my -= (rx + ry) * mnorm * gmy;
        ax -= ax * anorm * gax;
        ay -= ay * anorm * gay;
    }

    let final_loss = loss(moments, &higher, mx, my, ax, ay) / (moments.s + 10.0);
    if final_loss > config.ellipse_sensitivity {
        return None;
    }
    rx = 1.0 / ax.abs().sqrt();
    ry = 1.0 / ay.abs().sqrt();
    if (rx - ry).abs() < config.ellipse_to_circle_snapping * (rx + ry) {
        rx = (rx + ry) / 2.0;
        ry = rx;
    }

    let (first, last) = path.first_last()?;
    let end_distance = ((last.0 - first.0).powi(2) + (last.1 - first.1).powi(2)).sqrt();
    if end_distance > START_END_MAX_DISTANCE * (rx + ry) {
        return None;
    }

    Some(RecognizedShape::Ellipse {
        center_x: mx,
        center_y: my,
        rx,
        ry,
    })
}
