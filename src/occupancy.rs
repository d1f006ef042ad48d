//! Derives the set of grid cells occupied by an existing block structure.
//!
//! Callers feed the coordinates returned here back into the route search as
//! obstacles before requesting the next edge's path.

use rustc_hash::FxHashSet;

use crate::geometry::Coord;
use crate::kinds::Block;

/// Collects every cell occupied by a placed structure.
///
/// Cubes occupy their own cell. A pipe additionally occupies the cell one
/// further step along its direction of travel: a pipe one cell past its
/// predecessor spans that cell and the next, reaching the cube placed two
/// cells away.
pub fn occupied_coords(structure: &[Block]) -> FxHashSet<Coord> {
    let mut occupied = FxHashSet::default();

    let Some(first) = structure.first() else {
        return occupied;
    };
    occupied.insert(first.coord);

    for pair in structure.windows(2) {
        let (prev, current) = (pair[0], pair[1]);
        occupied.insert(current.coord);

        if current.kind.spans_two_cells() {
            let (cx, cy, cz) = current.coord;
            let (px, py, pz) = prev.coord;
            let spanned = if cx == px + 1 {
                Some((cx + 1, cy, cz))
            } else if cx == px - 1 {
                Some((cx - 1, cy, cz))
            } else if cy == py + 1 {
                Some((cx, cy + 1, cz))
            } else if cy == py - 1 {
                Some((cx, cy - 1, cz))
            } else if cz == pz + 1 {
                Some((cx, cy, cz + 1))
            } else if cz == pz - 1 {
                Some((cx, cy, cz - 1))
            } else {
                None
            };

            if let Some(cell) = spanned {
                occupied.insert(cell);
            }
        }
    }

    occupied
}
