use super::{GameError, Tile, ALL_TILES, BAG_SIZE, NUM_TILES, TILES_PER_TYPE};
use crate::rng;

/// Drawable tile counts plus the discard pile that refills them.
///
/// Tiles handed to [`TileBag::give_back`] are not drawable until the bag runs
/// dry and [`TileBag::pop`] reshuffles them in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileBag {
    tiles: [u8; NUM_TILES],
    returned: [u8; NUM_TILES],
    size: u8,
}

impl Default for TileBag {
    fn default() -> Self { Self::new() }
}

impl TileBag {
    pub fn new() -> Self {
        Self { tiles: [TILES_PER_TYPE; NUM_TILES], returned: [0; NUM_TILES], size: BAG_SIZE as u8 }
    }

    pub fn reset(&mut self) { *self = Self::new(); }

    /// Drawable tiles left.
    pub fn len(&self) -> usize { self.size as usize }

    pub fn is_empty(&self) -> bool { self.size == 0 }

    pub fn count(&self, tile: Tile) -> u8 { self.tiles[tile.index()] }

    pub fn returned(&self, tile: Tile) -> u8 { self.returned[tile.index()] }

    pub fn counts(&self) -> &[u8; NUM_TILES] { &self.tiles }

    pub fn returned_counts(&self) -> &[u8; NUM_TILES] { &self.returned }

    /// Drawable plus pending-return tiles.
    pub fn total(&self) -> usize {
        self.size as usize + self.returned.iter().map(|&n| n as usize).sum::<usize>()
    }

    /// Roulette-wheel draw weighted by the remaining counts.
    pub fn pop(&mut self) -> Tile {
        if self.size == 0 {
            self.reshuffle();
        }
        assert!(self.size > 0, "tile bag underflow: no tiles left to draw");

        let r = rng::gen_f32(1.0);
        let mut sum = 0u32;
        for &tile in &ALL_TILES[..NUM_TILES - 1] {
            sum += self.tiles[tile.index()] as u32;
            if r < sum as f32 / self.size as f32 {
                self.take_one(tile);
                return tile;
            }
        }
        // Float rounding can leave r past the last boundary; take the last
        // non-empty type in that case.
        let tile = ALL_TILES.iter().rev().copied().find(|t| self.tiles[t.index()] > 0).unwrap_or(Tile::White);
        self.take_one(tile);
        tile
    }

    fn take_one(&mut self, tile: Tile) {
        assert!(self.tiles[tile.index()] > 0, "tile bag underflow on {tile}");
        self.tiles[tile.index()] -= 1;
        self.size -= 1;
    }

    /// Merge the discard pile back into the drawable pool.
    pub fn reshuffle(&mut self) {
        self.size = 0;
        for i in 0..NUM_TILES {
            self.tiles[i] += self.returned[i];
            self.returned[i] = 0;
            self.size += self.tiles[i];
        }
    }

    /// Put `n` tiles on the discard pile.
    pub fn give_back(&mut self, tile: Tile, n: u8) {
        let slot = &mut self.returned[tile.index()];
        *slot = slot.checked_add(n).filter(|&v| v <= TILES_PER_TYPE).unwrap_or_else(|| {
            panic!("tile bag overflow returning {n} {tile} tiles")
        });
    }

    /// Remove specific tiles from the drawable pool (fixture setup).
    pub fn remove(&mut self, tile: Tile, n: u8) -> Result<(), GameError> {
        let available = self.tiles[tile.index()];
        if available < n {
            return Err(GameError::BagShort { tile, wanted: n, available });
        }
        self.tiles[tile.index()] -= n;
        self.size -= n;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_bag_draws_everything_once() {
        rng::seed(3);
        let mut bag = TileBag::new();
        let mut seen = [0u8; NUM_TILES];
        for _ in 0..BAG_SIZE {
            seen[bag.pop().index()] += 1;
        }
        assert_eq!(seen, [TILES_PER_TYPE; NUM_TILES]);
        assert!(bag.is_empty());
    }

    #[test]
    fn returned_tiles_wait_for_reshuffle() {
        rng::seed(4);
        let mut bag = TileBag::new();
        bag.remove(Tile::Red, TILES_PER_TYPE).unwrap();
        bag.give_back(Tile::Red, 3);
        // Red is pending only; the drawable pool never yields it.
        for _ in 0..bag.len() {
            assert_ne!(bag.pop(), Tile::Red);
        }
        assert!(bag.is_empty());
        // Exhausted: the next draw reshuffles the pending reds in.
        assert_eq!(bag.pop(), Tile::Red);
        assert_eq!(bag.count(Tile::Red), 2);
        assert_eq!(bag.returned(Tile::Red), 0);
    }

    #[test]
    fn remove_reports_shortage() {
        let mut bag = TileBag::new();
        let err = bag.remove(Tile::Blue, 21).unwrap_err();
        assert_eq!(err, GameError::BagShort { tile: Tile::Blue, wanted: 21, available: 20 });
    }

    #[test]
    #[should_panic(expected = "underflow")]
    fn empty_bag_with_empty_discard_panics() {
        let mut bag = TileBag::new();
        for t in ALL_TILES { bag.remove(t, TILES_PER_TYPE).unwrap(); }
        bag.pop();
    }
}
