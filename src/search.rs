//! Constrained breadth-first search over (position, kind) states.
//!
//! The search walks the six axis directions, alternating cubes and pipes,
//! consulting the compatibility oracle for every step. States are keyed by
//! the full (coordinate, kind) pair: a coordinate may be revisited under a
//! different kind, but revisits at equal or worse length are pruned. A
//! global Manhattan-distance circuit breaker bounds runaway expansion.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::compat::valid_next_kinds;
use crate::geometry::{manhattan, signed_drift, step, Coord, UNIT_MOVES};
use crate::kinds::{Block, BlockKind};

/// Abort the whole search once a dequeued state sits further from the target
/// than this multiple of the initial source-target Manhattan distance.
const DISTANCE_BOUND_FACTOR: i32 = 6;

/// Outcome of one search attempt, reported to the injected observer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SearchEvent {
    /// A path of the given length (edge count) was found.
    Found { length: usize },
    /// The distance circuit breaker tripped; the attempt failed.
    DistanceExceeded,
    /// The frontier drained without reaching the target.
    Exhausted,
}

/// Progress sink for search attempts.
///
/// The core performs no I/O; callers that want the classic per-attempt
/// progress characters hook them up here.
pub trait SearchObserver {
    fn on_attempt(&mut self, event: SearchEvent);
}

impl<F: FnMut(SearchEvent)> SearchObserver for F {
    fn on_attempt(&mut self, event: SearchEvent) {
        self(event)
    }
}

/// Finds the shortest topologically valid path from `source` to `target`.
///
/// The source and target cells are treated as free even when present in
/// `obstacles`; they are search endpoints, not obstructions. A `Boundary`
/// target kind acts as a wildcard accepting any kind at the target cell.
/// Returns the path as a block sequence (source first), or `None` when no
/// path exists within the distance bound.
pub fn find_path(
    source: &Block,
    target: &Block,
    obstacles: &FxHashSet<Coord>,
    hadamard_edge: bool,
    observer: &mut dyn SearchObserver,
) -> Option<Vec<Block>> {
    let start = source.coord;
    let end = target.coord;
    let blocked = |cell: Coord| cell != start && cell != end && obstacles.contains(&cell);

    let cutoff = DISTANCE_BOUND_FACTOR * manhattan(start, end);

    // per-state best length and back-pointer path, keyed by (coord, kind)
    let mut best_len: FxHashMap<(Coord, BlockKind), usize> = FxHashMap::default();
    let mut paths: FxHashMap<(Coord, BlockKind), Vec<Block>> = FxHashMap::default();
    let mut queue: VecDeque<(Coord, BlockKind, bool)> = VecDeque::new();

    best_len.insert((start, source.kind), 0);
    paths.insert((start, source.kind), vec![*source]);
    queue.push_back((start, source.kind, hadamard_edge));

    while let Some((coord, kind, pending)) = queue.pop_front() {
        if manhattan(coord, end) > cutoff {
            observer.on_attempt(SearchEvent::DistanceExceeded);
            return None;
        }

        if coord == end && (target.kind == BlockKind::Boundary || kind == target.kind) {
            let key = (coord, kind);
            let length = best_len[&key];
            log::trace!("path found: length {length}");
            observer.on_attempt(SearchEvent::Found { length });
            return paths.remove(&key);
        }

        let key = (coord, kind);
        let length = best_len[&key];
        let path = paths[&key].clone();
        let on_path = |cell: Coord| path.iter().any(|block| block.coord == cell);

        // pipes span two cells, so they step twice as far
        let scale = if kind.spans_two_cells() { 2 } else { 1 };

        // A Hadamard pipe is reoriented once before its expansion: the drift
        // sign relative to the original source picks flip-and-rotate or
        // rotate-only, and the marker is stripped. Its children stop
        // re-tagging further pipes; the pending flag is per branch, never
        // shared across iterations.
        let (expand_kind, child_pending) = match kind {
            BlockKind::Pipe(pipe) if pipe.is_hadamard() => {
                let reoriented = if signed_drift(start, coord) < 0 {
                    pipe.colors_swapped().rotated()
                } else {
                    pipe.rotated()
                };
                (BlockKind::Pipe(reoriented.without_hadamard()), false)
            }
            _ => (kind, pending),
        };

        for dir in UNIT_MOVES {
            let next = step(coord, dir, scale);

            // a pipe also claims the cell between itself and the next cube
            let mut spanned = None;
            if scale == 2 {
                let intermediate = step(coord, dir, 1);
                if on_path(intermediate) || blocked(intermediate) {
                    continue;
                }
                spanned = Some(intermediate);
            }

            if on_path(next) || blocked(next) || spanned == Some(next) {
                continue;
            }

            for candidate in valid_next_kinds(coord, &expand_kind, next) {
                let mut next_kind = candidate;
                if child_pending {
                    if let BlockKind::Pipe(pipe) = candidate {
                        // the pending Hadamard lands on this pipe
                        let mut tagged = pipe.as_hadamard();
                        if signed_drift(coord, next) < 0 {
                            tagged = tagged.rotated();
                        }
                        next_kind = BlockKind::Pipe(tagged);
                    }
                }

                let next_key = (next, next_kind);
                let next_len = length + 1;
                let improves = best_len
                    .get(&next_key)
                    .map_or(true, |&seen| next_len < seen);
                if improves {
                    best_len.insert(next_key, next_len);
                    let mut next_path = path.clone();
                    next_path.push(Block::new(next, next_kind));
                    paths.insert(next_key, next_path);
                    queue.push_back((next, next_kind, child_pending));
                }
            }
        }
    }

    observer.on_attempt(SearchEvent::Exhausted);
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(coord: Coord, kind: &str) -> Block {
        Block::new(coord, kind.parse::<BlockKind>().unwrap())
    }

    fn run(
        source: Block,
        target: Block,
        obstacles: &[Coord],
        hadamard: bool,
    ) -> (Option<Vec<Block>>, Vec<SearchEvent>) {
        let obstacle_set: FxHashSet<Coord> = obstacles.iter().copied().collect();
        let mut events = Vec::new();
        let mut observer = |event: SearchEvent| events.push(event);
        let path = find_path(&source, &target, &obstacle_set, hadamard, &mut observer);
        (path, events)
    }

    #[test]
    fn test_straight_line_to_boundary_target() {
        let (path, events) = run(block((0, 0, 0), "xxz"), block((3, 0, 0), "ooo"), &[], false);
        let path = path.unwrap();
        assert_eq!(
            path,
            vec![
                block((0, 0, 0), "xxz"),
                block((1, 0, 0), "oxz"),
                block((3, 0, 0), "xxz"),
            ]
        );
        assert_eq!(events, vec![SearchEvent::Found { length: 2 }]);
    }

    #[test]
    fn test_exact_target_kind_selects_matching_state() {
        // both xxz and zxz fit at the target cell; requesting zxz gets zxz
        let (path, _) = run(block((0, 0, 0), "xxz"), block((3, 0, 0), "zxz"), &[], false);
        let path = path.unwrap();
        assert_eq!(path.last().unwrap().kind, "zxz".parse::<BlockKind>().unwrap());
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_source_equal_to_target_succeeds_immediately() {
        let (path, events) = run(block((5, 5, 5), "xxz"), block((5, 5, 5), "xxz"), &[], false);
        assert_eq!(path.unwrap(), vec![block((5, 5, 5), "xxz")]);
        assert_eq!(events, vec![SearchEvent::Found { length: 0 }]);
    }

    #[test]
    fn test_blocked_pipe_cell_forces_detour() {
        // (1,0,0) hosts the only direct pipe; the shortest detour needs
        // three cube-pipe-cube segments (six edges)
        let (path, events) = run(
            block((0, 0, 0), "xxz"),
            block((3, 0, 0), "ooo"),
            &[(1, 0, 0)],
            false,
        );
        let path = path.unwrap();
        assert_eq!(path.len(), 7);
        assert_eq!(events, vec![SearchEvent::Found { length: 6 }]);
        assert!(path.iter().all(|b| b.coord != (1, 0, 0)));
        assert_eq!(path.first().unwrap().coord, (0, 0, 0));
        assert_eq!(path.last().unwrap().coord, (3, 0, 0));
    }

    #[test]
    fn test_endpoints_in_obstacle_set_are_ignored() {
        let clear = run(block((0, 0, 0), "xxz"), block((3, 0, 0), "ooo"), &[], false);
        let masked = run(
            block((0, 0, 0), "xxz"),
            block((3, 0, 0), "ooo"),
            &[(0, 0, 0), (3, 0, 0)],
            false,
        );
        assert_eq!(clear.0, masked.0);
        assert_eq!(clear.1, masked.1);
    }

    #[test]
    fn test_fully_surrounded_source_exhausts_frontier() {
        let walls = [
            (1, 0, 0),
            (-1, 0, 0),
            (0, 1, 0),
            (0, -1, 0),
            (0, 0, 1),
            (0, 0, -1),
        ];
        let (path, events) = run(block((0, 0, 0), "xxz"), block((3, 0, 0), "ooo"), &walls, false);
        assert!(path.is_none());
        assert_eq!(events, vec![SearchEvent::Exhausted]);
    }

    #[test]
    fn test_single_free_direction_is_found() {
        // five of six neighbors walled off; the +x corridor stays open
        let walls = [(-1, 0, 0), (0, 1, 0), (0, -1, 0), (0, 0, 1), (0, 0, -1)];
        let (path, events) = run(block((0, 0, 0), "xxz"), block((3, 0, 0), "ooo"), &walls, false);
        assert!(path.is_some());
        assert_eq!(events, vec![SearchEvent::Found { length: 2 }]);
    }

    #[test]
    fn test_unsatisfiable_target_trips_distance_breaker() {
        // a cube can never sit one cell from another cube, so the search
        // wanders until it exceeds six times the initial distance
        let (path, events) = run(block((0, 0, 0), "xxz"), block((1, 0, 0), "xxz"), &[], false);
        assert!(path.is_none());
        assert_eq!(events, vec![SearchEvent::DistanceExceeded]);
    }

    #[test]
    fn test_hadamard_edge_places_one_marked_pipe() {
        // the first pipe takes the marker; its reorientation (open axis
        // rotates x -> y) bends the route, landing the next cube at (1,2,0)
        let (path, events) = run(block((0, 0, 0), "xxz"), block((1, 2, 0), "ooo"), &[], true);
        let path = path.unwrap();
        assert_eq!(events, vec![SearchEvent::Found { length: 2 }]);
        assert_eq!(
            path,
            vec![
                block((0, 0, 0), "xxz"),
                block((1, 0, 0), "oxzh"),
                block((1, 2, 0), "zzx"),
            ]
        );
        assert_eq!(path.iter().filter(|b| b.kind.is_hadamard()).count(), 1);
    }

    #[test]
    fn test_plain_edge_places_no_marked_pipe() {
        let (path, _) = run(block((0, 0, 0), "xxz"), block((3, 0, 0), "ooo"), &[], false);
        assert!(path.unwrap().iter().all(|b| !b.kind.is_hadamard()));
    }

    #[test]
    fn test_path_never_overlaps_its_own_pipe_spans() {
        let (path, _) = run(
            block((0, 0, 0), "xxz"),
            block((3, 0, 0), "ooo"),
            &[(1, 0, 0)],
            false,
        );
        let path = path.unwrap();

        for (i, pair) in path.windows(2).enumerate() {
            let (prev, current) = (pair[0], pair[1]);
            if !current.kind.is_pipe() {
                continue;
            }
            let dir = (
                (current.coord.0 - prev.coord.0).signum(),
                (current.coord.1 - prev.coord.1).signum(),
                (current.coord.2 - prev.coord.2).signum(),
            );
            let spanned = step(current.coord, dir, 1);
            for later in &path[i + 2..] {
                assert_ne!(later.coord, current.coord);
                assert_ne!(later.coord, spanned);
            }
        }
    }
}
