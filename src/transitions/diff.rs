//! The per-channel diff pixmap Fly/FlyRectangle transitions translate
//! across the page (spec.md §4.6): a single RGBA buffer such that, for
//! every pixel, blending `diff` over `old` with *some* alpha reproduces
//! `new` exactly. We solve for the minimal alpha that makes that possible
//! for all three color channels at once, then back out the corresponding
//! diff color — the same idea as minimal-alpha keyframe diffing.

use crate::backend::RenderedPixmap;

pub fn compute_diff_pixmap(old: &RenderedPixmap, new: &RenderedPixmap) -> RenderedPixmap {
    debug_assert_eq!(old.width, new.width);
    debug_assert_eq!(old.height, new.height);
    let mut rgba = vec![0u8; old.rgba.len()];

    for (i, chunk) in old.rgba.chunks_exact(4).enumerate() {
        let base = i * 4;
        let new_px = &new.rgba[base..base + 4];
        let mut alpha = 0.0f64;
        for c in 0..3 {
            alpha = alpha.max(channel_alpha(chunk[c], new_px[c]));
        }
        alpha = alpha.clamp(0.0, 1.0);

        for c in 0..3 {
            let diff = if alpha <= 1e-9 {
                chunk[c]
            } else {
                let o = chunk[c] as f64;
                let n = new_px[c] as f64;
                (((n - (1.0 - alpha) * o) / alpha).round()).clamp(0.0, 255.0) as u8
            };
            rgba[base + c] = diff;
        }
        rgba[base + 3] = (alpha * 255.0).round() as u8;
    }

    RenderedPixmap {
        width: old.width,
        height: old.height,
        rgba,
    }
}

/// The minimal alpha, in `0.0..=1.0`, a single channel needs so that some
/// `diff` byte in `0..=255` blends `old` into `new`.
fn channel_alpha(old: u8, new: u8) -> f64 {
    if new >= old {
        let den = 255 - old;
        if den == 0 {
            0.0
        } else {
            (new - old) as f64 / den as f64
        }
    } else {
        if old == 0 {
            0.0
        } else {
            (old - new) as f64 / old as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(color: [u8; 4], n: usize) -> RenderedPixmap {
        let mut rgba = Vec::with_capacity(n * 4);
        for _ in 0..n {
            rgba.extend_from_slice(&color);
        }
        RenderedPixmap {
            width: n as u32,
            height: 1,
            rgba,
        }
    }

    #[test]
    fn identical_pixmaps_diff_to_zero_alpha() {
        let old = solid([10, 20, 30, 255], 4);
        let new = solid([10, 20, 30, 255], 4);
        let diff = compute_diff_pixmap(&old, &new);
        assert!(diff.rgba.chunks_exact(4).all(|px| px[3] == 0));
    }

    #[test]
    fn blending_diff_over_old_reproduces_new() {
        let old = solid([10, 20, 30, 255], 1);
        let new = solid([200, 50, 5, 255], 1);
        let diff = compute_diff_pixmap(&old, &new);
        let px = &diff.rgba[0..4];
        let alpha = px[3] as f64 / 255.0;
        for c in 0..3 {
            let blended = (1.0 - alpha) * old.rgba[c] as f64 + alpha * px[c] as f64;
            assert!((blended - new.rgba[c] as f64).abs() < 2.0);
        }
    }
}
