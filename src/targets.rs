//! Search-space bounds and tentative target placement.
//!
//! When a target node has no fixed position yet, candidates are tried at a
//! fixed displacement of 3 from the source (one cube-pipe-cube segment),
//! closest configurations first: single-axis offsets, then two-axis, then
//! all three axes.

use rustc_hash::FxHashSet;

use crate::geometry::{is_move_allowed, Coord};
use crate::kinds::Block;

/// Axis displacement used for every target candidate tier.
pub const TARGET_STEP: i32 = 3;

/// Padding added around the tight bounding box on every side.
pub const DEFAULT_MARGIN: i32 = 5;

/// Axis-aligned bounding box of the search space.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GridBounds {
    pub min: Coord,
    pub max: Coord,
}

impl GridBounds {
    /// Whether a coordinate lies inside the box (inclusive on both ends).
    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        (self.min.0..=self.max.0).contains(&coord.0)
            && (self.min.1..=self.max.1).contains(&coord.1)
            && (self.min.2..=self.max.2).contains(&coord.2)
    }
}

/// Computes the smallest box containing the endpoints and all obstacles,
/// expanded by `margin` on every side.
pub fn determine_bounds(
    start: Coord,
    end: Coord,
    obstacles: impl IntoIterator<Item = Coord>,
    margin: i32,
) -> GridBounds {
    let mut min = (start.0.min(end.0), start.1.min(end.1), start.2.min(end.2));
    let mut max = (start.0.max(end.0), start.1.max(end.1), start.2.max(end.2));

    for (x, y, z) in obstacles {
        min = (min.0.min(x), min.1.min(y), min.2.min(z));
        max = (max.0.max(x), max.1.max(y), max.2.max(z));
    }

    GridBounds {
        min: (min.0 - margin, min.1 - margin, min.2 - margin),
        max: (max.0 + margin, max.1 + margin, max.2 + margin),
    }
}

/// Picks a tentative coordinate for the target block.
///
/// An override coordinate is returned unconditionally. Otherwise the three
/// candidate tiers are scanned in order and the first candidate that lies
/// within bounds, is unoccupied, and is reachable from the source under the
/// sublattice alignment check wins. Returns `None` when every tier is
/// exhausted.
pub fn tentative_target_position(
    source: &Block,
    bounds: &GridBounds,
    obstacles: &FxHashSet<Coord>,
    override_coord: Option<Coord>,
) -> Option<Coord> {
    if let Some(coord) = override_coord {
        return Some(coord);
    }

    let source_coord = source.coord;
    let usable = |candidate: &Coord| {
        bounds.contains(*candidate)
            && !obstacles.contains(candidate)
            && is_move_allowed(source_coord, *candidate)
    };

    for (tier, candidates) in [
        single_axis_candidates(source_coord),
        two_axis_candidates(source_coord),
        three_axis_candidates(source_coord),
    ]
    .into_iter()
    .enumerate()
    {
        if let Some(found) = candidates.into_iter().find(|c| usable(c)) {
            log::debug!("target candidate at tier {}: {:?}", tier + 1, found);
            return Some(found);
        }
    }

    log::debug!("no tentative target within the prioritized displacements");
    None
}

fn single_axis_candidates((sx, sy, sz): Coord) -> Vec<Coord> {
    let s = TARGET_STEP;
    vec![
        (sx + s, sy, sz),
        (sx - s, sy, sz),
        (sx, sy + s, sz),
        (sx, sy - s, sz),
        (sx, sy, sz + s),
        (sx, sy, sz - s),
    ]
}

fn two_axis_candidates((sx, sy, sz): Coord) -> Vec<Coord> {
    let s = TARGET_STEP;
    let mut candidates = Vec::new();
    let mut push = |c: Coord| {
        // first-occurrence dedup keeps tier order stable
        if !candidates.contains(&c) {
            candidates.push(c);
        }
    };

    for dx in [-s, s] {
        for dy in [-s, s] {
            push((sx + dx, sy + dy, sz));
            push((sx + dy, sy + dx, sz));
        }
        for dz in [-s, s] {
            push((sx + dx, sy, sz + dz));
            push((sx + dz, sy, sz + dx));
        }
        for dy in [-s, s] {
            for dz in [-s, s] {
                push((sx, sy + dy, sz + dz));
                push((sx, sy + dz, sz + dy));
            }
        }
    }

    candidates
}

fn three_axis_candidates((sx, sy, sz): Coord) -> Vec<Coord> {
    let s = TARGET_STEP;
    let mut candidates = Vec::new();
    for dx in [-s, s] {
        for dy in [-s, s] {
            for dz in [-s, s] {
                candidates.push((sx + dx, sy + dy, sz + dz));
            }
        }
    }
    candidates
}
