use super::{GameError, Tile, ALL_TILES, CENTER, FLOOR, NUM_LINES, NUM_MOVES, NUM_SLOTS, NUM_TILES};
use std::fmt;

/// Take every `tile` from `slot` and place them on `line` (row 0..4 or floor).
///
/// Stored as its id: `slot * NUM_TILES * NUM_LINES + tile * NUM_LINES + line`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move(u8);

impl Move {
    pub fn new(slot: usize, tile: Tile, line: usize) -> Self {
        assert!(slot < NUM_SLOTS && line < NUM_LINES, "move field out of range: slot {slot}, line {line}");
        Move((slot * NUM_TILES * NUM_LINES + tile.index() * NUM_LINES + line) as u8)
    }

    pub fn from_id(id: usize) -> Result<Self, GameError> {
        if id >= NUM_MOVES { return Err(GameError::MoveId(id)); }
        Ok(Move(id as u8))
    }

    #[inline]
    pub fn id(self) -> usize { self.0 as usize }

    #[inline]
    pub fn slot(self) -> usize { self.id() / (NUM_TILES * NUM_LINES) }

    #[inline]
    pub fn tile(self) -> Tile {
        ALL_TILES[(self.id() / NUM_LINES) % NUM_TILES]
    }

    #[inline]
    pub fn line(self) -> usize { self.id() % NUM_LINES }

    pub fn is_floor(self) -> bool { self.line() == FLOOR }

    pub fn from_center(self) -> bool { self.slot() == CENTER }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.from_center() { write!(f, "c")?; } else { write!(f, "f{}", self.slot() + 1)?; }
        write!(f, ":{}->", self.tile())?;
        if self.is_floor() { write!(f, "F") } else { write!(f, "{}", self.line() + 1) }
    }
}

/// Upper bound on legal moves in any position.
pub const MAX_LEGAL: usize = NUM_MOVES;

/// Fixed-capacity buffer filled by `State::legal_moves`.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_LEGAL],
    len: usize,
}

impl Default for MoveList {
    fn default() -> Self { Self::new() }
}

impl MoveList {
    pub fn new() -> Self { Self { moves: [Move(0); MAX_LEGAL], len: 0 } }

    pub fn clear(&mut self) { self.len = 0; }

    pub fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    pub fn as_slice(&self) -> &[Move] { &self.moves[..self.len] }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> { self.as_slice().iter() }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;
    fn index(&self, i: usize) -> &Move { &self.as_slice()[i] }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}
