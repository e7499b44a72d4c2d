//! Static board description.
//!
//! ## Layout
//!
//! A `(2R + 1)` square grid with the center at `(R, R)`. The ring of a square
//! is its Chebyshev distance `d` from the center:
//!
//! | `d`       | ring   |
//! |-----------|--------|
//! | `R`       | Outer  |
//! | `2..R`    | Inner  |
//! | `1`       | Middle |
//! | `0`       | Home   |
//!
//! Every color walks the whole outer ring starting from its entry square,
//! then each inner ring in turn (alternating direction), then the center.
//! Red enters at bottom-middle; the other colors use Red's path rotated a
//! quarter turn per color. Path length is `1 + 4R(R + 1)`: 49 on 7x7.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::config::{BoardConfig, ConfigError};
use crate::core::Color;

/// A grid square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub x: u8,
    pub y: u8,
}

impl Square {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Ring classification of a square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ring {
    Outer,
    Inner,
    Middle,
    Home,
}

impl Ring {
    /// Rings behind the blood gate.
    pub const GATED: [Ring; 2] = [Ring::Inner, Ring::Middle];

    #[must_use]
    pub fn is_gated(self) -> bool {
        matches!(self, Ring::Inner | Ring::Middle)
    }
}

/// Immutable board lookups shared by every game on the same layout.
#[derive(Clone, Debug)]
pub struct BoardTopology {
    radius: u8,
    /// Per color, the square at each path index.
    paths: [Vec<Square>; 4],
    /// Ring at each path index (same for every color).
    rings: Vec<Ring>,
    safe: FxHashSet<Square>,
}

impl BoardTopology {
    /// Build the topology for a board configuration.
    pub fn new(config: &BoardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let radius = config.radius;

        let red = red_path(radius);
        let rings = red
            .iter()
            .map(|&sq| classify(radius, chebyshev(radius, sq)))
            .collect();

        let paths = [0, 1, 2, 3].map(|turns| {
            red.iter()
                .map(|&sq| rotate(radius, sq, turns))
                .collect::<Vec<_>>()
        });

        let mut safe: FxHashSet<Square> = config
            .safe_squares
            .iter()
            .map(|&(x, y)| Square::new(x, y))
            .collect();
        safe.insert(Square::new(radius, radius));

        Ok(Self {
            radius,
            paths,
            rings,
            safe,
        })
    }

    /// The default 7x7 board.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(&BoardConfig::default()).expect("default board is valid")
    }

    #[must_use]
    pub fn radius(&self) -> u8 {
        self.radius
    }

    /// Number of squares on each path, entry to Home inclusive.
    #[must_use]
    pub fn path_length(&self) -> usize {
        self.rings.len()
    }

    /// Path index of the Home square.
    #[must_use]
    pub fn home_index(&self) -> u8 {
        (self.rings.len() - 1) as u8
    }

    /// Ring of a grid square.
    #[must_use]
    pub fn ring_of(&self, square: Square) -> Ring {
        classify(self.radius, chebyshev(self.radius, square))
    }

    /// Ring at a path index. Indices past Home classify as Home.
    #[must_use]
    pub fn ring_at(&self, index: u8) -> Ring {
        self.rings.get(index as usize).copied().unwrap_or(Ring::Home)
    }

    /// Whether a capture can happen on `square`.
    #[must_use]
    pub fn is_safe(&self, square: Square) -> bool {
        self.safe.contains(&square) || self.ring_of(square) == Ring::Home
    }

    /// The square a piece occupies right after entering.
    #[must_use]
    pub fn entry_square(&self, color: Color) -> Square {
        self.paths[color.index()][0]
    }

    /// Square at a path index for a color.
    ///
    /// # Panics
    ///
    /// Panics if `index` is past Home.
    #[must_use]
    pub fn square(&self, color: Color, index: u8) -> Square {
        self.paths[color.index()][index as usize]
    }

    /// Path index of a square for a color.
    #[must_use]
    pub fn index_of(&self, color: Color, square: Square) -> Option<u8> {
        self.paths[color.index()]
            .iter()
            .position(|&s| s == square)
            .map(|i| i as u8)
    }

    /// Full path for a color.
    #[must_use]
    pub fn path(&self, color: Color) -> &[Square] {
        &self.paths[color.index()]
    }

    /// Path indices where each ring begins: `(Inner, Middle, Home)`.
    #[must_use]
    pub fn ring_starts(&self) -> (u8, u8, u8) {
        let first = |ring: Ring| {
            self.rings
                .iter()
                .position(|&r| r == ring)
                .unwrap_or(self.rings.len() - 1) as u8
        };
        (first(Ring::Inner), first(Ring::Middle), self.home_index())
    }

    /// First path index of the ring that `index` lies in.
    #[must_use]
    pub fn ring_start_of(&self, index: u8) -> u8 {
        let ring = self.ring_at(index);
        self.rings
            .iter()
            .position(|&r| r == ring)
            .map_or(index, |i| i as u8)
    }
}

fn chebyshev(radius: u8, sq: Square) -> u8 {
    sq.x.abs_diff(radius).max(sq.y.abs_diff(radius))
}

fn classify(radius: u8, distance: u8) -> Ring {
    match distance {
        0 => Ring::Home,
        1 => Ring::Middle,
        d if d == radius => Ring::Outer,
        _ => Ring::Inner,
    }
}

/// Quarter turns about the center: `(x, y) -> (side - 1 - y, x)`.
fn rotate(radius: u8, sq: Square, turns: usize) -> Square {
    let max = radius * 2;
    (0..turns).fold(sq, |s, _| Square::new(max - s.y, s.x))
}

/// Perimeter of ring `r`, anticlockwise (y grows downward), starting at the
/// bottom-middle square `(c, c + r)` and ending just left of it.
fn ring_walk(radius: u8, r: u8) -> Vec<Square> {
    let c = radius as i16;
    let r = r as i16;
    let mut out = Vec::with_capacity(8 * r as usize);
    let (mut x, mut y) = (c, c + r);
    out.push((x, y));

    let legs: [(i16, i16, i16); 5] = [
        (1, 0, r),
        (0, -1, 2 * r),
        (-1, 0, 2 * r),
        (0, 1, 2 * r),
        (1, 0, r - 1),
    ];
    for (dx, dy, steps) in legs {
        for _ in 0..steps {
            x += dx;
            y += dy;
            out.push((x, y));
        }
    }
    out.into_iter()
        .map(|(x, y)| Square::new(x as u8, y as u8))
        .collect()
}

/// Red's path: outer ring anticlockwise, next ring clockwise, and so on.
fn red_path(radius: u8) -> Vec<Square> {
    let mut path = Vec::new();
    for (depth, r) in (1..=radius).rev().enumerate() {
        let mut ring = ring_walk(radius, r);
        if depth % 2 == 1 {
            ring.reverse();
        }
        path.extend(ring);
    }
    path.push(Square::new(radius, radius));
    path
}
