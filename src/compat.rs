//! Topological compatibility checks between adjacent blocks.
//!
//! Two blocks may sit next to each other only if their colors agree on the
//! faces transverse to the connection and both expose an open face toward
//! the other. The oracle enumerates which kinds a neighbor cell may take
//! given an already-placed block.

use crate::geometry::{displacement_axis, Axis, Coord};
use crate::kinds::{BlockKind, CUBE_KINDS, PIPE_KINDS};

/// Checks color continuity on the two faces transverse to the displacement.
///
/// Hadamard markers play no role here; only face colors are compared, with
/// open faces treated as a distinct (non-matching) value. Symmetric in its
/// two arguments.
pub fn face_match(a: Coord, a_kind: &BlockKind, b: Coord, b_kind: &BlockKind) -> bool {
    let Some(connection) = displacement_axis(a, b) else {
        return false;
    };

    Axis::ALL
        .into_iter()
        .filter(|&axis| axis != connection)
        .all(|axis| a_kind.color_on(axis) == b_kind.color_on(axis))
}

/// Checks whether a block at `from` exposes an open face toward `toward`.
///
/// A pipe only connects along its open axis; every cube face is a valid
/// exit (the color constraint is `face_match`'s job). The boundary marker
/// is open on all sides.
pub fn is_exit(from: Coord, kind: &BlockKind, toward: Coord) -> bool {
    let Some(connection) = displacement_axis(from, toward) else {
        return false;
    };

    match kind {
        BlockKind::Cube(_) => true,
        BlockKind::Pipe(pipe) => pipe.open_axis() == connection,
        BlockKind::Boundary => true,
    }
}

/// Checks both exits of a prospective connection, from each endpoint.
fn exits_match(current: Coord, current_kind: &BlockKind, next: Coord, next_kind: &BlockKind) -> bool {
    is_exit(current, current_kind, next) && is_exit(next, next_kind, current)
}

/// Enumerates every kind the neighbor cell may legally take.
///
/// Blocks strictly alternate: after a pipe only cubes are tried, after a
/// cube only pipes (plain and Hadamard variants). Candidates are returned
/// in the fixed family order, filtered by the exit and face-match checks.
pub fn valid_next_kinds(current: Coord, current_kind: &BlockKind, next: Coord) -> Vec<BlockKind> {
    let candidates: &[BlockKind] = if current_kind.is_cube() {
        &PIPE_KINDS
    } else {
        &CUBE_KINDS
    };

    candidates
        .iter()
        .filter(|kind| exits_match(current, current_kind, next, kind))
        .filter(|kind| face_match(current, current_kind, next, kind))
        .copied()
        .collect()
}
