//! Escalation driver: retries the constrained search across target
//! candidates and kinds, keeping the globally shortest path.
//!
//! One call routes a single abstract edge: it derives bounds, proposes a
//! tentative target position, enumerates every concrete kind the target's
//! ZX category admits, runs a search per kind, and aggregates the results.

use rustc_hash::FxHashSet;

use crate::geometry::Coord;
use crate::kinds::{target_kind_family, Block, BlockKind, ZXType};
use crate::search::{find_path, SearchObserver};
use crate::targets::{determine_bounds, tentative_target_position, DEFAULT_MARGIN};

/// Retry limits for one routing call.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EscalationConfig {
    /// Current allowed distance between source and target.
    pub distance: i32,
    /// Routing is abandoned once `distance` exceeds this.
    pub max_distance: i32,
    /// Number of target-position rounds to try.
    pub attempts_per_distance: usize,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            distance: 1,
            max_distance: 30,
            attempts_per_distance: 10,
        }
    }
}

/// Pins the target to a block placed by a previous operation.
#[derive(Clone, Copy, Default, Debug)]
pub struct TargetOverride {
    pub coord: Option<Coord>,
    pub kind: Option<BlockKind>,
}

/// Aggregated result of one routing call.
///
/// `all_paths` keeps every successful path found across the rounds, for
/// downstream diagnostics; `best` is the globally shortest among them.
#[derive(Clone, Debug, Default)]
pub struct RouteOutcome {
    pub best: Option<Vec<Block>>,
    pub all_paths: Vec<Vec<Block>>,
}

impl RouteOutcome {
    /// Whether any path was found.
    pub fn found(&self) -> bool {
        self.best.is_some()
    }

    /// Edge count of the winning path, if any.
    pub fn best_length(&self) -> Option<usize> {
        self.best.as_ref().map(|path| path.len() - 1)
    }
}

/// Routes one edge from `source` to a target of the given ZX category.
///
/// Runs up to `attempts_per_distance` rounds, stopping early once a round
/// succeeds or the configured distance exceeds its maximum. Each round
/// proposes one tentative target coordinate and searches every concrete kind
/// in the category's family; every success is recorded and the shortest
/// becomes the winner. A round without a candidate position is skipped.
pub fn route_edge(
    source: &Block,
    target_zx_type: ZXType,
    config: &EscalationConfig,
    override_target: TargetOverride,
    occupied: &FxHashSet<Coord>,
    hadamard_edge: bool,
    observer: &mut dyn SearchObserver,
) -> RouteOutcome {
    let mut outcome = RouteOutcome::default();
    let mut best_length = usize::MAX;

    let bounds = determine_bounds(
        source.coord,
        override_target.coord.unwrap_or((0, 0, 0)),
        occupied.iter().copied(),
        DEFAULT_MARGIN,
    );

    for attempt in 0..config.attempts_per_distance {
        if config.distance > config.max_distance || outcome.found() {
            break;
        }

        let Some(target_coord) =
            tentative_target_position(source, &bounds, occupied, override_target.coord)
        else {
            continue;
        };

        let family = target_kind_family(target_zx_type, override_target.kind);
        log::debug!(
            "attempt {attempt}: target {target_coord:?}, {} candidate kinds",
            family.len()
        );

        for target_kind in family {
            let target = Block::new(target_coord, target_kind);
            let Some(path) = find_path(source, &target, occupied, hadamard_edge, observer)
            else {
                continue;
            };

            let length = path.len() - 1;
            if length < best_length {
                best_length = length;
                outcome.best = Some(path.clone());
            }
            outcome.all_paths.push(path);
        }
    }

    outcome
}

/// Formats a path as one block per line, e.g. `(1, 0, 0) oxz`.
pub fn format_path(path: &[Block]) -> String {
    path.iter()
        .map(|block| {
            let (x, y, z) = block.coord;
            format!("({x}, {y}, {z}) {}", block.kind)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
