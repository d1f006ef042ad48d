//! Block Route Search Library
//!
//! Computes physically realizable routes of discrete 3D blocks through a
//! lattice-surgery space-time diagram. Each abstract circuit edge becomes a
//! path of alternating cubes and pipes, avoiding previously placed structure,
//! with every adjacent pair of blocks topologically compatible: matching
//! colors on non-connecting faces, aligned open axes, and Hadamard-edge
//! orientation bookkeeping.
//!
//! Entry points: [`route_edge`] retries the constrained search across target
//! candidates and kinds; [`find_path`] runs a single source-to-target search.

pub mod compat;
pub mod geometry;
pub mod kinds;
pub mod occupancy;
pub mod route;
pub mod search;
pub mod targets;

pub use geometry::{Axis, Coord};
pub use kinds::{Block, BlockKind, Color, CubeKind, KindParseError, PipeKind, ZXType};
pub use occupancy::occupied_coords;
pub use route::{format_path, route_edge, EscalationConfig, RouteOutcome, TargetOverride};
pub use search::{find_path, SearchEvent, SearchObserver};
pub use targets::{determine_bounds, tentative_target_position, GridBounds};
