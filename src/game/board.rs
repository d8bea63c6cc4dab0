use super::bag::TileBag;
use super::magics::get_score;
use super::moves::Move;
use super::{Tile, ALL_TILES, FLOOR, NUM_TILES, WALL_SIZE};
use std::fmt;

pub const ROW_MASKS: [u32; WALL_SIZE] = [0x1f, 0x3e0, 0x7c00, 0xf8000, 0x1f00000];
pub const COL_MASKS: [u32; WALL_SIZE] = [0x108421, 0x210842, 0x421084, 0x842108, 0x1084210];
/// Wall cells of each tile type (the shifted diagonals).
pub const TILE_MASKS: [u32; NUM_TILES] = [0x1041041, 0x182082, 0x20c104, 0x410608, 0x820830];

/// Floor penalty by floor count, clamped at `FLOOR_CAP`.
pub const FLOOR_PENALTY: [i16; 8] = [0, 1, 2, 4, 6, 8, 11, 14];
pub const FLOOR_CAP: u8 = 7;

pub const BONUS_ROW: i16 = 2;
pub const BONUS_COL: i16 = 7;
pub const BONUS_TILE: i16 = 10;

/// Wall column for `tile` in `row`.
#[inline]
pub fn wall_column(row: usize, tile: Tile) -> usize { (row + tile.index()) % WALL_SIZE }

/// One triangular staging row: a single tile type and how many are placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StagingRow {
    tile: u8,
    count: u8,
}

impl StagingRow {
    pub fn tile(self) -> Option<Tile> {
        if self.count == 0 { None } else { Tile::from_index(self.tile as usize) }
    }

    pub fn count(self) -> u8 { self.count }

    /// Empty rows accept anything; others only their own type.
    pub fn accepts(self, tile: Tile) -> bool { self.count == 0 || self.tile == tile as u8 }

    pub fn to_bytes(self) -> [u8; 2] { [self.tile, self.count] }
}

/// One player's wall, staging rows, floor line and score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    wall: u32,
    rows: [StagingRow; WALL_SIZE],
    floor: u8,
    score: i16,
    terminal: bool,
}

impl Board {
    pub fn new() -> Self { Self::default() }

    pub fn reset(&mut self) { *self = Self::default(); }

    pub fn wall(&self) -> u32 { self.wall }
    pub fn row(&self, line: usize) -> StagingRow { self.rows[line] }
    pub fn rows(&self) -> &[StagingRow; WALL_SIZE] { &self.rows }
    pub fn floor(&self) -> u8 { self.floor }
    pub fn score(&self) -> i16 { self.score }
    pub fn is_terminal(&self) -> bool { self.terminal }

    /// Tiles sitting on the staging rows.
    pub fn staged(&self) -> usize { self.rows.iter().map(|r| r.count as usize).sum() }

    /// Capacity left on staging row `line`.
    pub fn room(&self, line: usize) -> u8 { line as u8 + 1 - self.rows[line].count }

    /// Place `num_tiles` taken by `mv`. Whatever the row cannot hold goes to
    /// the floor and onto the bag's discard pile.
    pub fn apply_move(&mut self, mv: Move, num_tiles: u8, bag: &mut TileBag) {
        let tile = mv.tile();
        let mut spill = num_tiles;
        let line = mv.line();
        if line < FLOOR {
            let cap = line as u8 + 1;
            let row = &mut self.rows[line];
            assert!(row.accepts(tile), "staging row {line} holds another tile type");
            row.tile = tile as u8;
            let total = row.count + num_tiles;
            row.count = total.min(cap);
            spill = total - row.count;
        }
        self.add_floor(spill);
        if spill > 0 {
            bag.give_back(tile, spill);
        }
    }

    /// One floor tile for taking the first tile from the center.
    pub fn increase_floorline(&mut self) { self.add_floor(1); }

    fn add_floor(&mut self, n: u8) {
        // Only the penalty saturates; keep the count bounded for the packed byte.
        self.floor = self.floor.saturating_add(n);
    }

    pub fn wall_has_tile(&self, tile: Tile, line: usize) -> bool {
        if line >= FLOOR { return false; }
        self.wall & (1 << (line * WALL_SIZE + wall_column(line, tile))) != 0
    }

    /// Score a freshly set wall cell including completion bonuses.
    fn update_score(&mut self, row: usize, col: usize, tile: Tile) {
        self.score += get_score(row * WALL_SIZE + col, self.wall) as i16;
        if self.wall & ROW_MASKS[row] == ROW_MASKS[row] {
            self.score += BONUS_ROW;
            self.terminal = true;
        }
        if self.wall & COL_MASKS[col] == COL_MASKS[col] {
            self.score += BONUS_COL;
        }
        let tiles = TILE_MASKS[tile.index()];
        if self.wall & tiles == tiles {
            self.score += BONUS_TILE;
        }
    }

    /// End-of-round tiling: move full rows to the wall, score them, charge the
    /// floor penalty.
    pub fn next_round(&mut self, bag: &mut TileBag) {
        for line in 0..WALL_SIZE {
            let row = self.rows[line];
            let Some(tile) = row.tile() else { continue };
            if row.count as usize != line + 1 { continue; }
            let col = wall_column(line, tile);
            assert!(self.wall & (1 << (line * WALL_SIZE + col)) == 0, "wall cell already set");
            self.wall |= 1 << (line * WALL_SIZE + col);
            self.update_score(line, col, tile);
            if row.count > 1 {
                bag.give_back(tile, row.count - 1);
            }
            self.rows[line] = StagingRow::default();
        }

        self.score -= FLOOR_PENALTY[self.floor.min(FLOOR_CAP) as usize];
        self.score = self.score.max(0);
        self.floor = 0;
    }

    /// Set the wall directly (tests and analysis tools).
    pub fn set_wall(&mut self, wall: u32) { self.wall = wall; }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in 0..WALL_SIZE {
            let row = self.rows[line];
            let pad = WALL_SIZE - line - 1;
            write!(f, "{}", " ".repeat(pad))?;
            for i in 0..=line {
                let filled = (line - i) < row.count as usize;
                match row.tile() {
                    Some(t) if filled => write!(f, "{t}")?,
                    _ => write!(f, ".")?,
                }
            }
            write!(f, " | ")?;
            for col in 0..WALL_SIZE {
                let tile = ALL_TILES.iter().copied().find(|&t| wall_column(line, t) == col);
                let set = self.wall & (1 << (line * WALL_SIZE + col)) != 0;
                match tile {
                    Some(t) if set => write!(f, "{t}")?,
                    Some(t) => write!(f, "{}", t.symbol().to_ascii_lowercase())?,
                    None => write!(f, "?")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "floor: {}  score: {}", self.floor, self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::magics::init_table;

    fn board() -> (Board, TileBag) {
        init_table();
        (Board::new(), TileBag::new())
    }

    #[test]
    fn overflow_spills_to_floor_and_bag() {
        let (mut b, mut bag) = board();
        b.apply_move(Move::new(0, Tile::Red, 1), 4, &mut bag);
        assert_eq!(b.row(1).count(), 2);
        assert_eq!(b.floor(), 2);
        assert_eq!(bag.returned(Tile::Red), 2);
    }

    #[test]
    fn floor_move_sends_everything_to_floor() {
        let (mut b, mut bag) = board();
        b.apply_move(Move::new(5, Tile::Blue, FLOOR), 3, &mut bag);
        assert_eq!(b.floor(), 3);
        assert_eq!(b.staged(), 0);
        assert_eq!(bag.returned(Tile::Blue), 3);
    }

    #[test]
    fn partial_row_stays_across_rounds() {
        let (mut b, mut bag) = board();
        b.apply_move(Move::new(0, Tile::Black, 3), 2, &mut bag);
        b.next_round(&mut bag);
        assert_eq!(b.wall(), 0);
        assert_eq!(b.row(3).count(), 2);
        assert_eq!(b.row(3).tile(), Some(Tile::Black));
    }

    #[test]
    fn full_row_returns_extras_to_bag() {
        let (mut b, mut bag) = board();
        b.apply_move(Move::new(0, Tile::Yellow, 4), 5, &mut bag);
        b.next_round(&mut bag);
        assert_eq!(bag.returned(Tile::Yellow), 4);
        assert_eq!(b.staged(), 0);
        assert!(b.wall_has_tile(Tile::Yellow, 4));
    }

    #[test]
    fn first_tile_penalty_applies() {
        let (mut b, mut bag) = board();
        b.apply_move(Move::new(0, Tile::Blue, 0), 1, &mut bag);
        b.increase_floorline();
        b.next_round(&mut bag);
        // 1 for the tile, 1 for the marker on the floor
        assert_eq!(b.score(), 0);
    }

    #[test]
    #[should_panic(expected = "wall cell already set")]
    fn tiling_an_occupied_cell_panics() {
        let (mut b, mut bag) = board();
        b.set_wall(1 << wall_column(0, Tile::Red));
        b.apply_move(Move::new(0, Tile::Red, 0), 1, &mut bag);
        b.next_round(&mut bag);
    }
}
