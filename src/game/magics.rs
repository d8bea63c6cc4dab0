//! Magic-bitboard lookup of placement scores.
//!
//! A placement only scores the contiguous runs through its own row and
//! column, so the score depends on at most eight other cells. For each square
//! those cells are gathered into a relevance mask and every subset of it is
//! hashed into a 256-entry slice with a per-square multiply-and-shift.
//!
//! The key is the set of *empty* relevant cells (`!wall & mask`), which is
//! the encoding the magic multipliers below were searched for.

use super::board::{COL_MASKS, ROW_MASKS};
use super::{NUM_SQUARES, WALL_SIZE};
use log::info;
use rand::rngs::SmallRng;
use rand::Rng;
use std::sync::OnceLock;

/// Index bits per square.
pub const MAGIC_BITS: u32 = 8;
const ENTRIES: usize = 1 << MAGIC_BITS;

/// Multipliers for the 8-bit table, produced by the `find_magics` tool.
pub const MAGICS: [u32; NUM_SQUARES] = [
    0x0401041a, 0x07c23192, 0x08044180, 0x18032080, 0x08091009,
    0x14200419, 0x20100120, 0x2fc02180, 0x09008088, 0x00803149,
    0x01210022, 0x20258020, 0x08020110, 0x38060048, 0x06440041,
    0x940d8801, 0xe0048c01, 0x90082020, 0x18019008, 0x04622011,
    0x4c0a0480, 0x58244480, 0x9804c080, 0x28096280, 0x08010480,
];

struct ScoreTable {
    scores: Vec<u8>,
}

static TABLE: OnceLock<ScoreTable> = OnceLock::new();

/// Row and column of `square`, without the square itself.
pub fn score_mask(square: usize) -> u32 {
    let (row, col) = (square / WALL_SIZE, square % WALL_SIZE);
    (ROW_MASKS[row] | COL_MASKS[col]) ^ (1 << square)
}

/// Direct run-length score of placing on `square` given `occupied` cells.
pub fn compute_score(square: usize, occupied: u32) -> u8 {
    let (row, col) = (square / WALL_SIZE, square % WALL_SIZE);
    let at = |r: usize, c: usize| occupied & (1 << (r * WALL_SIZE + c)) != 0;

    let mut hor = (col + 1..WALL_SIZE).take_while(|&c| at(row, c)).count();
    hor += (0..col).rev().take_while(|&c| at(row, c)).count();
    let mut ver = (row + 1..WALL_SIZE).take_while(|&r| at(r, col)).count();
    ver += (0..row).rev().take_while(|&r| at(r, col)).count();

    // a connected run also counts the placed tile
    if hor > 0 { hor += 1; }
    if ver > 0 { ver += 1; }
    if hor + ver == 0 { return 1; }
    (hor + ver) as u8
}

#[inline]
fn transform(board: u32, magic: u32, bits: u32) -> usize {
    (board.wrapping_mul(magic) >> (32 - bits)) as usize
}

/// Spread the low bits of `index` over the set bits of `mask`.
fn index_to_board(index: usize, mask: u32) -> u32 {
    let mut rest = mask;
    let mut out = 0u32;
    let mut i = 0;
    while rest != 0 {
        let bit = rest & rest.wrapping_neg();
        if index & (1 << i) != 0 { out |= bit; }
        rest &= rest - 1;
        i += 1;
    }
    out
}

/// Every (empty-set key, score) pair for `square`.
fn subsets(square: usize) -> Vec<(u32, u8)> {
    let mask = score_mask(square);
    (0..1usize << mask.count_ones())
        .map(|i| {
            let empty = index_to_board(i, mask);
            (empty, compute_score(square, mask & !empty))
        })
        .collect()
}

/// True if `magic` maps two subsets with different scores to one slot.
pub fn magic_conflicts(square: usize, magic: u32, bits: u32) -> bool {
    let mut used = vec![0u8; 1 << bits];
    for (empty, score) in subsets(square) {
        let j = transform(empty, magic, bits);
        if used[j] == 0 {
            used[j] = score;
        } else if used[j] != score {
            return true;
        }
    }
    false
}

/// Randomised search for a collision-free multiplier (sparse candidates).
pub fn find_magic(square: usize, bits: u32, rng: &mut SmallRng, max_iters: u64) -> Option<u32> {
    (0..max_iters).find_map(|_| {
        let magic = rng.gen::<u32>() & rng.gen::<u32>();
        (!magic_conflicts(square, magic, bits)).then_some(magic)
    })
}

fn build() -> ScoreTable {
    let mut scores = vec![0u8; NUM_SQUARES * ENTRIES];
    for square in 0..NUM_SQUARES {
        let magic = MAGICS[square];
        assert!(magic != 0, "missing magic for square {square}");
        assert!(!magic_conflicts(square, magic, MAGIC_BITS), "magic for square {square} collides");
        let base = square * ENTRIES;
        for (empty, score) in subsets(square) {
            scores[base + transform(empty, magic, MAGIC_BITS)] = score;
        }
    }
    info!("Initialized score table {} bytes", scores.len());
    ScoreTable { scores }
}

fn table() -> &'static ScoreTable {
    TABLE.get_or_init(build)
}

/// Build the lookup table; later calls are no-ops.
pub fn init_table() {
    let _ = table();
}

/// Score of a tile placed on `square` of `wall`. The square's own bit is
/// ignored, so the wall may already contain the placed tile.
pub fn get_score(square: usize, wall: u32) -> u8 {
    let t = table();
    let empty = !wall & score_mask(square);
    t.scores[square * ENTRIES + transform(empty, MAGICS[square], MAGIC_BITS)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_have_eight_relevant_cells() {
        for sq in 0..NUM_SQUARES {
            assert_eq!(score_mask(sq).count_ones(), 8);
            assert_eq!(score_mask(sq) & (1 << sq), 0);
        }
    }

    #[test]
    fn index_to_board_enumerates_distinct_subsets() {
        let mask = score_mask(12);
        let mut seen = std::collections::HashSet::new();
        for i in 0..256 {
            let b = index_to_board(i, mask);
            assert_eq!(b & !mask, 0);
            assert!(seen.insert(b));
        }
    }

    #[test]
    fn compute_score_runs() {
        // lone tile
        assert_eq!(compute_score(12, 0), 1);
        // full row through the center square
        assert_eq!(compute_score(12, ROW_MASKS[2]), 5);
        // row and column
        assert_eq!(compute_score(12, ROW_MASKS[2] | COL_MASKS[2]), 10);
        // gap breaks the run: (2,0) is not adjacent to (2,2)
        assert_eq!(compute_score(12, 1 << 10), 1);
        assert_eq!(compute_score(12, 1 << 11), 2);
    }

    #[test]
    fn degenerate_magic_is_rejected() {
        // every subset lands in slot 0
        assert!(magic_conflicts(12, 0, MAGIC_BITS));
        for sq in 0..NUM_SQUARES {
            assert!(!magic_conflicts(sq, MAGICS[sq], MAGIC_BITS));
        }
    }

    #[test]
    fn search_finds_valid_magic() {
        use rand::SeedableRng;
        let mut rng = SmallRng::seed_from_u64(1);
        let magic = find_magic(0, MAGIC_BITS, &mut rng, 1 << 20).unwrap();
        assert!(!magic_conflicts(0, magic, MAGIC_BITS));
    }
}
