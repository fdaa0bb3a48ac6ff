//! Slide transition effects (spec.md §4.6): nine named animations played
//! over a captured snapshot of the outgoing page as a property animation
//! runs toward the incoming page.
//!
//! Per spec.md §9 Design Notes / redesign flag 6, the mask a transition
//! paints through is a closed sum type ([`Mask`]) rather than a mutated
//! pixmap-item property — the painter sink (an external collaborator,
//! spec.md §1) clips to whichever variant is active for the current frame.

mod diff;
mod easing;

pub use diff::compute_diff_pixmap;

use crate::backend::RenderedPixmap;

/// One of the nine transition effects spec.md §4.6 names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionType {
    Split,
    Blinds,
    Box,
    Wipe,
    Dissolve,
    Glitter,
    Fly,
    FlyRectangle,
    Push,
    Cover,
    Uncover,
    Fade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inward,
    Outward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Which edge (or the center) a rect/wipe mask grows from or collapses
/// toward. Wipe picks this from the transition's `angle_degrees` (0/90/
/// 180/270); Split/Box always anchor at `Center`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

impl Anchor {
    /// Maps a wipe transition's `angle_degrees` to the edge it collapses
    /// toward (spec.md §4.6 "Wipe" row).
    pub fn from_wipe_angle(angle_degrees: u32) -> Anchor {
        match angle_degrees % 360 {
            0 => Anchor::Right,
            90 => Anchor::Top,
            180 => Anchor::Left,
            270 => Anchor::Bottom,
            other => {
                log::warn!("wipe angle {other} is not axis-aligned; defaulting to Right");
                Anchor::Right
            }
        }
    }
}

/// The as-implemented representation of "what shape of hole/cover is
/// visible this frame" — replaces the source's single mutable mask
/// property (spec.md §9 Design Notes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mask {
    /// A rect covering `fraction` of the page, growing from `anchor`.
    Rect { anchor: Anchor, fraction: f64 },
    /// The complement of `Rect`: everywhere *except* the rect is covered.
    InverseRect { anchor: Anchor, fraction: f64 },
    /// `count` equal-width/height strips along `axis`, each individually
    /// shrunk from full to `fraction` remaining.
    Blinds {
        count: u32,
        axis: Orientation,
        fraction: f64,
    },
    /// `revealed` of `total` shuffled tile groups are currently showing
    /// through to the new page.
    Glitter { revealed: u32, total: u32 },
}

/// A transition effect's static parameters, as reported by the PDF
/// backend for an outgoing page (spec.md §6 `transition(index)`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRecord {
    pub kind: TransitionType,
    pub duration_secs: f64,
    pub angle_degrees: u32,
    pub direction: Direction,
    /// Extra per-type tuning the PDF spec allows (e.g. a custom scale
    /// factor); unused by several transition types.
    pub scale: f64,
}

/// What the painter needs to draw for one frame of a running transition:
/// an optional clip mask, and old/new-page opacity and translation, all
/// already eased. Not every field is meaningful for every transition
/// kind — the caller reads only what its `kind` match arm cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub mask: Option<Mask>,
    pub old_opacity: f64,
    pub new_opacity: f64,
    /// Translation applied to the outgoing-page snapshot, in page-size
    /// fractions (1.0 == one full page width/height).
    pub old_translate: (f64, f64),
    /// Translation applied to the incoming page, same units.
    pub new_translate: (f64, f64),
    /// True once `new_translate`/`new_opacity` should actually be shown;
    /// Fly/Push/Cover/Uncover differ on exactly when the new page first
    /// becomes visible (spec.md §4.6 "Fly / FlyRectangle" row).
    pub new_page_visible: bool,
}

const GLITTER_TILE_COUNT: u32 = 137;
const GLITTER_ROW: u32 = 71;

/// A running transition: the static record plus elapsed time. Spec.md
/// §8's boundary behavior #12 ("duration ≤ 1e-3s is skipped") is enforced
/// by the caller before ever constructing one of these — see
/// [`TransitionRecord::is_instant`].
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    record: TransitionRecord,
    elapsed_secs: f64,
}

impl TransitionRecord {
    /// spec.md §8 boundary behavior #12.
    pub fn is_instant(&self) -> bool {
        self.duration_secs <= 1e-3
    }
}

impl Transition {
    pub fn start(record: TransitionRecord) -> Self {
        Self {
            record,
            elapsed_secs: 0.0,
        }
    }

    pub fn advance(&mut self, dt_secs: f64) {
        self.elapsed_secs = (self.elapsed_secs + dt_secs).min(self.record.duration_secs);
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_secs >= self.record.duration_secs
    }

    fn raw_progress(&self) -> f64 {
        if self.record.duration_secs <= 0.0 {
            1.0
        } else {
            (self.elapsed_secs / self.record.duration_secs).clamp(0.0, 1.0)
        }
    }

    /// Blind count: 8 for vertical blinds, 6 for horizontal, per spec.md
    /// §4.6's "N = 6 or 8".
    fn blinds_layout(&self) -> (u32, Orientation) {
        if self.record.angle_degrees % 180 == 90 {
            (6, Orientation::Horizontal)
        } else {
            (8, Orientation::Vertical)
        }
    }

    /// The frame to paint right now. Pure function of elapsed time; the
    /// caller (the slide scene) drives `advance` on a repaint tick and
    /// re-reads this each time, so cancelling mid-flight is just "stop
    /// calling advance and discard the `Transition`" (spec.md §4.6
    /// "On animation finish (or cancel)").
    pub fn frame(&self) -> AnimationFrame {
        let t = self.raw_progress();
        match self.record.kind {
            TransitionType::Split => AnimationFrame {
                mask: Some(Mask::Rect {
                    anchor: Anchor::Center,
                    fraction: directed(t, self.record.direction),
                }),
                old_opacity: 1.0,
                new_opacity: 1.0,
                old_translate: (0.0, 0.0),
                new_translate: (0.0, 0.0),
                new_page_visible: true,
            },
            TransitionType::Box => AnimationFrame {
                mask: Some(Mask::Rect {
                    anchor: Anchor::Center,
                    fraction: directed(t, self.record.direction),
                }),
                old_opacity: 1.0,
                new_opacity: 1.0,
                old_translate: (0.0, 0.0),
                new_translate: (0.0, 0.0),
                new_page_visible: true,
            },
            TransitionType::Wipe => AnimationFrame {
                mask: Some(Mask::Rect {
                    anchor: Anchor::from_wipe_angle(self.record.angle_degrees),
                    fraction: t,
                }),
                old_opacity: 1.0,
                new_opacity: 1.0,
                old_translate: (0.0, 0.0),
                new_translate: (0.0, 0.0),
                new_page_visible: true,
            },
            TransitionType::Dissolve => AnimationFrame {
                mask: None,
                old_opacity: 1.0 - t,
                new_opacity: 1.0,
                old_translate: (0.0, 0.0),
                new_translate: (0.0, 0.0),
                new_page_visible: true,
            },
            TransitionType::Blinds => {
                let (count, axis) = self.blinds_layout();
                AnimationFrame {
                    mask: Some(Mask::Blinds {
                        count,
                        axis,
                        fraction: 1.0 - t,
                    }),
                    old_opacity: 1.0,
                    new_opacity: 1.0,
                    old_translate: (0.0, 0.0),
                    new_translate: (0.0, 0.0),
                    new_page_visible: true,
                }
            }
            TransitionType::Glitter => {
                let revealed = ((1.0 - t) * GLITTER_TILE_COUNT as f64).round() as u32;
                AnimationFrame {
                    mask: Some(Mask::Glitter {
                        revealed: GLITTER_TILE_COUNT.saturating_sub(revealed),
                        total: GLITTER_TILE_COUNT,
                    }),
                    old_opacity: 1.0,
                    new_opacity: 1.0,
                    old_translate: (0.0, 0.0),
                    new_translate: (0.0, 0.0),
                    new_page_visible: true,
                }
            }
            TransitionType::Fly | TransitionType::FlyRectangle => {
                let eased = easing::sine_ease(t);
                let (dx, dy) = angle_unit_vector(self.record.angle_degrees);
                let inward = self.record.direction == Direction::Inward;
                let offset = if inward { 1.0 - eased } else { eased };
                AnimationFrame {
                    mask: None,
                    old_opacity: 1.0,
                    new_opacity: 1.0,
                    old_translate: (0.0, 0.0),
                    new_translate: (dx * offset, dy * offset),
                    new_page_visible: inward,
                }
            }
            TransitionType::Push => {
                let eased = easing::sine_ease(t);
                let (dx, dy) = angle_unit_vector(self.record.angle_degrees);
                AnimationFrame {
                    mask: None,
                    old_opacity: 1.0,
                    new_opacity: 1.0,
                    old_translate: (-dx * eased, -dy * eased),
                    new_translate: (dx * (1.0 - eased), dy * (1.0 - eased)),
                    new_page_visible: true,
                }
            }
            TransitionType::Cover => {
                let eased = easing::ease_out_sine(t);
                let (dx, dy) = angle_unit_vector(self.record.angle_degrees);
                AnimationFrame {
                    mask: None,
                    old_opacity: 1.0,
                    new_opacity: 1.0,
                    old_translate: (0.0, 0.0),
                    new_translate: (dx * (1.0 - eased), dy * (1.0 - eased)),
                    new_page_visible: true,
                }
            }
            TransitionType::Uncover => {
                let eased = easing::ease_in_sine(t);
                let (dx, dy) = angle_unit_vector(self.record.angle_degrees);
                AnimationFrame {
                    mask: None,
                    old_opacity: 1.0,
                    new_opacity: 1.0,
                    old_translate: (-dx * eased, -dy * eased),
                    new_translate: (0.0, 0.0),
                    new_page_visible: true,
                }
            }
            TransitionType::Fade => AnimationFrame {
                mask: None,
                old_opacity: 1.0 - easing::ease_out_quart(t),
                new_opacity: easing::ease_in_quart(t),
                old_translate: (0.0, 0.0),
                new_translate: (0.0, 0.0),
                new_page_visible: true,
            },
        }
    }
}

fn directed(t: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Inward => t,
        Direction::Outward => 1.0 - t,
    }
}

fn angle_unit_vector(angle_degrees: u32) -> (f64, f64) {
    let radians = (angle_degrees as f64).to_radians();
    (radians.cos(), -radians.sin())
}

/// Deterministic shuffle of the glitter grid's tile indices. Avoids a
/// `rand` dependency: a fixed multiplicative step coprime with the tile
/// count produces a full-period permutation, which is all a one-shot
/// reveal order needs (spec.md §4.6 "Glitter").
pub fn glitter_tile_order() -> Vec<u32> {
    const STEP: u32 = 53; // coprime with GLITTER_TILE_COUNT (137, prime)
    (0..GLITTER_TILE_COUNT)
        .map(|i| (i * STEP) % GLITTER_TILE_COUNT)
        .collect()
}

pub fn glitter_row() -> u32 {
    GLITTER_ROW
}

#[allow(dead_code)]
fn assert_pixmap_sized(pixmap: &RenderedPixmap) {
    debug_assert!(pixmap.width > 0 && pixmap.height > 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade(duration: f64) -> Transition {
        Transition::start(TransitionRecord {
            kind: TransitionType::Fade,
            duration_secs: duration,
            angle_degrees: 0,
            direction: Direction::Inward,
            scale: 1.0,
        })
    }

    #[test]
    fn fade_starts_opaque_old_transparent_new() {
        let t = fade(1.0);
        let frame = t.frame();
        assert!((frame.old_opacity - 1.0).abs() < 1e-9);
        assert!(frame.new_opacity.abs() < 1e-9);
    }

    #[test]
    fn fade_ends_transparent_old_opaque_new() {
        let mut t = fade(1.0);
        t.advance(1.0);
        assert!(t.is_finished());
        let frame = t.frame();
        assert!(frame.old_opacity.abs() < 1e-6);
        assert!((frame.new_opacity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn instant_duration_is_flagged_skip() {
        let record = TransitionRecord {
            kind: TransitionType::Dissolve,
            duration_secs: 0.0005,
            angle_degrees: 0,
            direction: Direction::Inward,
            scale: 1.0,
        };
        assert!(record.is_instant());
    }

    #[test]
    fn wipe_anchor_follows_angle() {
        assert_eq!(Anchor::from_wipe_angle(0), Anchor::Right);
        assert_eq!(Anchor::from_wipe_angle(90), Anchor::Top);
        assert_eq!(Anchor::from_wipe_angle(180), Anchor::Left);
        assert_eq!(Anchor::from_wipe_angle(270), Anchor::Bottom);
    }

    #[test]
    fn glitter_tile_order_is_a_permutation() {
        let mut order = glitter_tile_order();
        order.sort();
        let expected: Vec<u32> = (0..GLITTER_TILE_COUNT).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn fly_inward_shows_new_page_from_the_start() {
        let t = Transition::start(TransitionRecord {
            kind: TransitionType::Fly,
            duration_secs: 1.0,
            angle_degrees: 0,
            direction: Direction::Inward,
            scale: 1.0,
        });
        assert!(t.frame().new_page_visible);
    }

    #[test]
    fn fly_outward_shows_new_page_only_once_finished_is_reached_by_caller() {
        let t = Transition::start(TransitionRecord {
            kind: TransitionType::Fly,
            duration_secs: 1.0,
            angle_degrees: 0,
            direction: Direction::Outward,
            scale: 1.0,
        });
        assert!(!t.frame().new_page_visible);
    }
}
