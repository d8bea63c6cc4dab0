pub mod bag;
pub mod board;
pub mod center;
pub mod magics;
pub mod moves;
pub mod state;

use std::fmt;
use thiserror::Error;

/// Wall side length; the wall is `WALL_SIZE * WALL_SIZE` cells.
pub const WALL_SIZE: usize = 5;
pub const NUM_SQUARES: usize = WALL_SIZE * WALL_SIZE;

pub const NUM_TILES: usize = 5;
pub const NUM_FACTORIES: usize = 5;
/// Factories plus the shared center.
pub const NUM_SLOTS: usize = NUM_FACTORIES + 1;
pub const CENTER: usize = NUM_FACTORIES;
/// Five staging rows plus the floor line.
pub const NUM_LINES: usize = WALL_SIZE + 1;
pub const FLOOR: usize = WALL_SIZE;

pub const TILES_PER_FACTORY: usize = 4;
pub const TILES_PER_TYPE: u8 = 20;
pub const BAG_SIZE: usize = NUM_TILES * TILES_PER_TYPE as usize;

/// Size of the move id space: every (slot, tile, line) triple.
pub const NUM_MOVES: usize = NUM_SLOTS * NUM_TILES * NUM_LINES;

/// Tile colors, order fixed for serialization and move ids.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Tile {
    Blue = 0,
    Yellow = 1,
    Red = 2,
    Black = 3,
    White = 4,
}

pub const ALL_TILES: [Tile; NUM_TILES] = [Tile::Blue, Tile::Yellow, Tile::Red, Tile::Black, Tile::White];

impl Tile {
    #[inline]
    pub fn index(self) -> usize { self as usize }

    pub fn from_index(idx: usize) -> Option<Tile> {
        ALL_TILES.get(idx).copied()
    }

    pub fn symbol(self) -> char {
        match self {
            Tile::Blue => 'B',
            Tile::Yellow => 'Y',
            Tile::Red => 'R',
            Tile::Black => 'K',
            Tile::White => 'W',
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Failures at the text/integer boundary of the rules engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("center fixture must be {expected} characters, got {got}")]
    FixtureLength { expected: usize, got: usize },
    #[error("invalid tile character {0:?} in center fixture")]
    FixtureTile(char),
    #[error("bag cannot supply {wanted} {tile} tiles ({available} left)")]
    BagShort { tile: Tile, wanted: u8, available: u8 },
    #[error("move id {0} out of range")]
    MoveId(usize),
}
