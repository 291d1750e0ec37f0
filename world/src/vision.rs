//! Per-actor cached visibility scores.

use tallgrass_core::{Fov, Grid, Point};

use crate::tiles::Tile;

/// Score recorded for cells no ray reached.
pub const NOT_VISIBLE: i32 = -1;
/// Budget lost when a ray enters obscuring terrain.
pub const OBSCURE_LOSS: i32 = 95;
/// Extra budget lost when that step is diagonal.
pub const DIAGONAL_LOSS: i32 = 46;
/// Rounding term of [`tallgrass_core::Point::len_nethack`], scaled by 100.
const NETHACK_ROUNDING: i32 = 25;

/// Budget seeded at the viewer's own cell.
///
/// The losses mirror the weights of [`tallgrass_core::Point::len_nethack`]
/// scaled by 100, so that in a field of obscuring terrain only cells with a
/// nethack distance of at most `vision_radius` keep a non-negative score.
#[must_use]
pub const fn initial_visibility(vision_radius: i32) -> i32 {
    100 * (vision_radius + 1) - OBSCURE_LOSS - DIAGONAL_LOSS - NETHACK_ROUNDING
}

/// Cached visibility of a single actor.
///
/// Scores are stored in a square grid of side `2 * fov_radius + 1` centred on
/// the actor; `offset` translates world points into that grid. The entry is
/// only trusted while it is clean.
#[derive(Clone, Debug, PartialEq)]
pub struct Vision {
    offset: Point,
    dirty: bool,
    scores: Grid<i32>,
}

impl Vision {
    pub(crate) fn new(fov_radius: i32) -> Self {
        let side = 2 * fov_radius.max(0) + 1;
        Self {
            offset: Point::ORIGIN,
            dirty: true,
            scores: Grid::new(Point::new(side, side), NOT_VISIBLE),
        }
    }

    /// Translation from world points into score-grid indices.
    #[must_use]
    pub const fn offset(&self) -> Point {
        self.offset
    }

    /// Whether the scores may be stale.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Remaining sight budget at a world point, or [`NOT_VISIBLE`].
    #[must_use]
    pub fn visibility_at(&self, point: Point) -> i32 {
        *self.scores.get(point + self.offset)
    }

    /// Reports whether the world point is visible.
    #[must_use]
    pub fn can_see(&self, point: Point) -> bool {
        self.visibility_at(point) >= 0
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Recomputes the scores for a viewer standing at `pos`.
    pub(crate) fn recompute<'t, F>(&mut self, fov: &Fov, pos: Point, vision_radius: i32, tile_at: F)
    where
        F: Fn(Point) -> &'t Tile,
    {
        let radius = fov.radius();
        let center = Point::new(radius, radius);
        let initial = initial_visibility(vision_radius);
        let scores = &mut self.scores;
        scores.fill(NOT_VISIBLE);

        fov.field_of_vision(|point, parent| {
            let score = match parent {
                None => initial,
                Some(parent) => {
                    let tile = tile_at(point + pos);
                    if tile.is_blocked() {
                        0
                    } else {
                        let loss = if tile.is_obscure() {
                            let diagonal = point.x != parent.x && point.y != parent.y;
                            OBSCURE_LOSS + if diagonal { DIAGONAL_LOSS } else { 0 }
                        } else {
                            0
                        };
                        (*scores.get(parent + center) - loss).max(0)
                    }
                }
            };

            // Rays may reach a cell along several branches; keep the best.
            let cell = point + center;
            if *scores.get(cell) < score {
                let _ = scores.set(cell, score);
            }
            score <= 0
        });

        self.offset = center - pos;
        self.dirty = false;
    }
}
