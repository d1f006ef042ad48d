//! Coordinates, axes, and the small geometric predicates the search relies on.
//!
//! All positions are integer triples on an unbounded 3D grid. Cubes occupy a
//! single cell; pipes span two adjacent cells along their open axis, so cube
//! centers always sit on a step-3 sublattice of the grid.

/// A 3D coordinate representing a unit cell position.
pub type Coord = (i32, i32, i32);

/// One of the three grid axes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in component order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis (0, 1, or 2).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// The six axis-aligned unit moves, in fixed expansion order.
pub const UNIT_MOVES: [Coord; 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Component-wise addition of a coordinate and a scaled move.
#[inline]
pub fn step(from: Coord, dir: Coord, scale: i32) -> Coord {
    (
        from.0 + dir.0 * scale,
        from.1 + dir.1 * scale,
        from.2 + dir.2 * scale,
    )
}

/// Manhattan distance between two coordinates.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs() + (a.2 - b.2).abs()
}

/// Returns the first axis along which the two coordinates differ.
///
/// Face and exit checks are only defined for axis-aligned displacements, so
/// callers always pass coordinates one grid step (or one pipe span) apart;
/// identical coordinates yield `None`.
#[inline]
pub fn displacement_axis(a: Coord, b: Coord) -> Option<Axis> {
    if a.0 != b.0 {
        Some(Axis::X)
    } else if a.1 != b.1 {
        Some(Axis::Y)
    } else if a.2 != b.2 {
        Some(Axis::Z)
    } else {
        None
    }
}

/// Signed displacement accumulator steering Hadamard reorientation.
///
/// Sums `a_i + b_i` over every axis where the two coordinates differ. The
/// sign of this value decides whether a Hadamard pipe's colors are flipped
/// in addition to rotating its open axis.
#[inline]
pub fn signed_drift(a: Coord, b: Coord) -> i32 {
    let mut total = 0;
    if a.0 != b.0 {
        total += a.0 + b.0;
    }
    if a.1 != b.1 {
        total += a.1 + b.1;
    }
    if a.2 != b.2 {
        total += a.2 + b.2;
    }
    total
}

/// Checks whether a cube placed at `from` can in principle be connected to a
/// cube placed at `to`.
///
/// Each straight cube-pipe-cube segment displaces exactly 3 cells along one
/// axis, so reachable cube positions differ by a multiple of 3 on every axis.
/// This is an orientation filter only: it does not consider obstacles.
#[inline]
pub fn is_move_allowed(from: Coord, to: Coord) -> bool {
    from != to
        && (to.0 - from.0) % 3 == 0
        && (to.1 - from.1) % 3 == 0
        && (to.2 - from.2) % 3 == 0
}
