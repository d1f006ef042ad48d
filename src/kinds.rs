//! Block kind definitions and the ZX-type-to-kind families.
//!
//! A kind names the face colors of a block along the three axes. Cubes carry
//! a color on every axis; pipes leave exactly one axis open (the connection
//! axis) and may carry a Hadamard marker. The textual form used throughout
//! tests and logs is three symbols from `{x, z, o}` plus an optional trailing
//! `h`, e.g. `"xxz"`, `"oxz"`, `"zxoh"`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::geometry::{Axis, Coord};

/// A surface-code boundary color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    X,
    Z,
}

impl Color {
    /// The opposite color (the basis change a Hadamard applies).
    #[inline]
    pub fn swapped(self) -> Color {
        match self {
            Color::X => Color::Z,
            Color::Z => Color::X,
        }
    }

    fn symbol(self) -> char {
        match self {
            Color::X => 'x',
            Color::Z => 'z',
        }
    }
}

/// A node block: one color per axis, no open face.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CubeKind {
    faces: [Color; 3],
}

impl CubeKind {
    /// Creates a cube kind from its per-axis face colors.
    pub const fn new(faces: [Color; 3]) -> Self {
        Self { faces }
    }

    /// Face color on the given axis.
    #[inline]
    pub fn face(&self, axis: Axis) -> Color {
        self.faces[axis.index()]
    }
}

/// A connector block: one open axis, colors on the other two, optionally
/// marked as a Hadamard (basis-changing) connection.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PipeKind {
    faces: [Option<Color>; 3],
    hadamard: bool,
}

impl PipeKind {
    /// Creates a pipe kind from its per-axis faces (`None` marks the open axis).
    pub const fn new(faces: [Option<Color>; 3], hadamard: bool) -> Self {
        let mut open = 0;
        let mut i = 0;
        while i < 3 {
            if faces[i].is_none() {
                open += 1;
            }
            i += 1;
        }
        assert!(open == 1, "a pipe kind has exactly one open axis");
        Self { faces, hadamard }
    }

    /// The axis this pipe connects along.
    #[inline]
    pub fn open_axis(&self) -> Axis {
        if self.faces[0].is_none() {
            Axis::X
        } else if self.faces[1].is_none() {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// Face color on the given axis, `None` on the open axis.
    #[inline]
    pub fn face(&self, axis: Axis) -> Option<Color> {
        self.faces[axis.index()]
    }

    /// Whether this pipe carries the Hadamard marker.
    #[inline]
    pub fn is_hadamard(&self) -> bool {
        self.hadamard
    }

    /// Cyclic right rotation of the three face symbols.
    ///
    /// Moves the open axis to the next position; the Hadamard marker is kept.
    #[inline]
    pub fn rotated(&self) -> PipeKind {
        PipeKind {
            faces: [self.faces[2], self.faces[0], self.faces[1]],
            hadamard: self.hadamard,
        }
    }

    /// Exchanges the two transverse colors (x and z swap).
    #[inline]
    pub fn colors_swapped(&self) -> PipeKind {
        let swap = |face: Option<Color>| face.map(Color::swapped);
        PipeKind {
            faces: [swap(self.faces[0]), swap(self.faces[1]), swap(self.faces[2])],
            hadamard: self.hadamard,
        }
    }

    /// The same pipe with the Hadamard marker set.
    #[inline]
    pub fn as_hadamard(&self) -> PipeKind {
        PipeKind {
            hadamard: true,
            ..*self
        }
    }

    /// The same pipe with the Hadamard marker stripped.
    #[inline]
    pub fn without_hadamard(&self) -> PipeKind {
        PipeKind {
            hadamard: false,
            ..*self
        }
    }
}

/// The kind of a placed block.
///
/// `Boundary` is the `"ooo"` marker: open on all axes, never face-matches
/// anything, and acts as a wildcard when used as a search target kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BlockKind {
    Cube(CubeKind),
    Pipe(PipeKind),
    Boundary,
}

impl BlockKind {
    /// Face color on the given axis, `None` for open faces.
    #[inline]
    pub fn color_on(&self, axis: Axis) -> Option<Color> {
        match self {
            BlockKind::Cube(cube) => Some(cube.face(axis)),
            BlockKind::Pipe(pipe) => pipe.face(axis),
            BlockKind::Boundary => None,
        }
    }

    #[inline]
    pub fn is_cube(&self) -> bool {
        matches!(self, BlockKind::Cube(_))
    }

    #[inline]
    pub fn is_pipe(&self) -> bool {
        matches!(self, BlockKind::Pipe(_))
    }

    /// Whether this kind is a Hadamard-marked pipe.
    #[inline]
    pub fn is_hadamard(&self) -> bool {
        matches!(self, BlockKind::Pipe(pipe) if pipe.is_hadamard())
    }

    /// Whether a block of this kind spans two cells along its open axis.
    ///
    /// Pipes and the boundary marker do; cubes occupy a single cell.
    #[inline]
    pub fn spans_two_cells(&self) -> bool {
        !self.is_cube()
    }
}

/// A block placed at a specific grid position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Block {
    pub coord: Coord,
    pub kind: BlockKind,
}

impl Block {
    pub const fn new(coord: Coord, kind: BlockKind) -> Self {
        Self { coord, kind }
    }
}

const fn cube(c0: Color, c1: Color, c2: Color) -> BlockKind {
    BlockKind::Cube(CubeKind::new([c0, c1, c2]))
}

const fn pipe(f0: Option<Color>, f1: Option<Color>, f2: Option<Color>) -> BlockKind {
    BlockKind::Pipe(PipeKind::new([f0, f1, f2], false))
}

const fn hadamard_pipe(f0: Option<Color>, f1: Option<Color>, f2: Option<Color>) -> BlockKind {
    BlockKind::Pipe(PipeKind::new([f0, f1, f2], true))
}

use Color::{X as CX, Z as CZ};

/// All cube kinds, in fixed oracle enumeration order.
pub const CUBE_KINDS: [BlockKind; 6] = [
    cube(CX, CX, CZ), // xxz
    cube(CX, CZ, CZ), // xzz
    cube(CX, CZ, CX), // xzx
    cube(CZ, CZ, CX), // zzx
    cube(CZ, CX, CX), // zxx
    cube(CZ, CX, CZ), // zxz
];

/// All pipe kinds, plain variants first, then the same order Hadamard-marked.
pub const PIPE_KINDS: [BlockKind; 12] = [
    pipe(Some(CZ), Some(CX), None), // zxo
    pipe(Some(CX), Some(CZ), None), // xzo
    pipe(None, Some(CX), Some(CZ)), // oxz
    pipe(None, Some(CZ), Some(CX)), // ozx
    pipe(Some(CX), None, Some(CZ)), // xoz
    pipe(Some(CZ), None, Some(CX)), // zox
    hadamard_pipe(Some(CZ), Some(CX), None), // zxoh
    hadamard_pipe(Some(CX), Some(CZ), None), // xzoh
    hadamard_pipe(None, Some(CX), Some(CZ)), // oxzh
    hadamard_pipe(None, Some(CZ), Some(CX)), // ozxh
    hadamard_pipe(Some(CX), None, Some(CZ)), // xozh
    hadamard_pipe(Some(CZ), None, Some(CX)), // zoxh
];

/// Abstract node category from the circuit graph, prior to resolution into a
/// concrete block kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ZXType {
    X,
    Z,
    Boundary,
    SimplePipe,
    HadamardPipe,
}

/// Returns the concrete kinds that can instantiate a ZX node category.
///
/// An override kind short-circuits to a singleton: the target block already
/// exists from a prior operation and must keep its assigned kind.
pub fn target_kind_family(zx_type: ZXType, override_kind: Option<BlockKind>) -> Vec<BlockKind> {
    if let Some(kind) = override_kind {
        return vec![kind];
    }

    match zx_type {
        ZXType::X => vec![
            cube(CX, CX, CZ), // xxz
            cube(CX, CZ, CX), // xzx
            cube(CZ, CX, CX), // zxx
        ],
        ZXType::Z => vec![
            cube(CX, CZ, CZ), // xzz
            cube(CZ, CZ, CX), // zzx
            cube(CZ, CX, CZ), // zxz
        ],
        ZXType::Boundary => vec![BlockKind::Boundary],
        ZXType::SimplePipe => PIPE_KINDS[..6].to_vec(),
        ZXType::HadamardPipe => PIPE_KINDS[6..].to_vec(),
    }
}

/// Failure to parse a textual kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KindParseError {
    #[error("kind must be three face symbols plus an optional trailing 'h': {0:?}")]
    BadLength(String),
    #[error("invalid face symbol {0:?} (expected 'x', 'z', or 'o')")]
    BadSymbol(char),
    #[error("a kind has zero, one, or three open faces: {0:?}")]
    BadOpenFaces(String),
    #[error("the hadamard marker only applies to pipes: {0:?}")]
    StrayHadamard(String),
}

impl FromStr for BlockKind {
    type Err = KindParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let lower = text.to_ascii_lowercase();
        let symbols: Vec<char> = lower.chars().collect();

        let (face_symbols, hadamard) = match symbols.len() {
            3 => (&symbols[..3], false),
            4 if symbols[3] == 'h' => (&symbols[..3], true),
            _ => return Err(KindParseError::BadLength(text.to_string())),
        };

        let mut faces = [None; 3];
        let mut open = 0;
        for (i, &symbol) in face_symbols.iter().enumerate() {
            faces[i] = match symbol {
                'x' => Some(Color::X),
                'z' => Some(Color::Z),
                'o' => {
                    open += 1;
                    None
                }
                other => return Err(KindParseError::BadSymbol(other)),
            };
        }

        match open {
            0 => {
                if hadamard {
                    return Err(KindParseError::StrayHadamard(text.to_string()));
                }
                match faces {
                    [Some(a), Some(b), Some(c)] => Ok(BlockKind::Cube(CubeKind::new([a, b, c]))),
                    _ => Err(KindParseError::BadOpenFaces(text.to_string())),
                }
            }
            1 => Ok(BlockKind::Pipe(PipeKind { faces, hadamard })),
            3 => {
                if hadamard {
                    return Err(KindParseError::StrayHadamard(text.to_string()));
                }
                Ok(BlockKind::Boundary)
            }
            _ => Err(KindParseError::BadOpenFaces(text.to_string())),
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Cube(cube) => {
                for axis in Axis::ALL {
                    write!(f, "{}", cube.face(axis).symbol())?;
                }
                Ok(())
            }
            BlockKind::Pipe(pipe) => {
                for axis in Axis::ALL {
                    match pipe.face(axis) {
                        Some(color) => write!(f, "{}", color.symbol())?,
                        None => write!(f, "o")?,
                    }
                }
                if pipe.is_hadamard() {
                    write!(f, "h")?;
                }
                Ok(())
            }
            BlockKind::Boundary => write!(f, "ooo"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_roundtrip_for_all_families() {
        for kind in CUBE_KINDS.iter().chain(PIPE_KINDS.iter()) {
            let text = kind.to_string();
            let parsed: BlockKind = text.parse().unwrap();
            assert_eq!(parsed, *kind, "roundtrip failed for {text}");
        }
        assert_eq!("ooo".parse::<BlockKind>().unwrap(), BlockKind::Boundary);
    }

    #[test]
    fn test_parse_rejects_malformed_kinds() {
        assert!(matches!(
            "xx".parse::<BlockKind>(),
            Err(KindParseError::BadLength(_))
        ));
        assert!(matches!(
            "xyz".parse::<BlockKind>(),
            Err(KindParseError::BadSymbol('y'))
        ));
        assert!(matches!(
            "oox".parse::<BlockKind>(),
            Err(KindParseError::BadOpenFaces(_))
        ));
        assert!(matches!(
            "xxzh".parse::<BlockKind>(),
            Err(KindParseError::StrayHadamard(_))
        ));
        assert!(matches!(
            "oooh".parse::<BlockKind>(),
            Err(KindParseError::StrayHadamard(_))
        ));
    }

    #[test]
    fn test_parse_normalizes_case() {
        assert_eq!(
            "XxZ".parse::<BlockKind>().unwrap(),
            "xxz".parse::<BlockKind>().unwrap()
        );
    }

    #[test]
    fn test_rotation_is_cyclic_and_stays_valid() {
        let oxz: BlockKind = "oxz".parse().unwrap();
        let BlockKind::Pipe(pipe) = oxz else {
            panic!("not a pipe")
        };
        let once = BlockKind::Pipe(pipe.rotated());
        let twice = BlockKind::Pipe(pipe.rotated().rotated());
        let thrice = BlockKind::Pipe(pipe.rotated().rotated().rotated());
        assert_eq!(once.to_string(), "zox");
        assert_eq!(twice.to_string(), "xzo");
        assert_eq!(thrice, oxz);
    }

    #[test]
    fn test_color_swap_exchanges_x_and_z() {
        let zxo: BlockKind = "zxo".parse().unwrap();
        let BlockKind::Pipe(pipe) = zxo else {
            panic!("not a pipe")
        };
        assert_eq!(BlockKind::Pipe(pipe.colors_swapped()).to_string(), "xzo");
    }

    #[test]
    fn test_family_sizes_match_zx_categories() {
        assert_eq!(target_kind_family(ZXType::X, None).len(), 3);
        assert_eq!(target_kind_family(ZXType::Z, None).len(), 3);
        assert_eq!(target_kind_family(ZXType::Boundary, None).len(), 1);
        assert_eq!(target_kind_family(ZXType::SimplePipe, None).len(), 6);
        assert_eq!(target_kind_family(ZXType::HadamardPipe, None).len(), 6);
        for kind in target_kind_family(ZXType::HadamardPipe, None) {
            assert!(kind.is_hadamard());
        }
    }

    #[test]
    fn test_family_override_short_circuits() {
        let fixed: BlockKind = "zxo".parse().unwrap();
        assert_eq!(target_kind_family(ZXType::X, Some(fixed)), vec![fixed]);
    }

    #[test]
    fn test_boundary_spans_two_cells_like_a_pipe() {
        assert!(BlockKind::Boundary.spans_two_cells());
        assert!("oxz".parse::<BlockKind>().unwrap().spans_two_cells());
        assert!(!"xxz".parse::<BlockKind>().unwrap().spans_two_cells());
    }
}
