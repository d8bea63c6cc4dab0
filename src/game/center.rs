use super::bag::TileBag;
use super::{GameError, Tile, ALL_TILES, CENTER, NUM_FACTORIES, NUM_SLOTS, NUM_TILES, TILES_PER_FACTORY};
use std::fmt;

/// Bits per tile type inside a [`Holder`].
const NBITS: u32 = 5;
const FIELD_MAX: u32 = (1 << NBITS) - 1;

/// Center part of the fixture string (after the factory characters).
pub const FIXTURE_CENTER_LEN: usize = 15;
pub const FIXTURE_LEN: usize = NUM_FACTORIES * TILES_PER_FACTORY + FIXTURE_CENTER_LEN;

/// Per-type tile counts for one slot, packed `NBITS` per type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Holder(u32);

impl Holder {
    #[inline]
    fn shift(tile: Tile) -> u32 { tile.index() as u32 * NBITS }

    #[inline]
    pub fn count(self, tile: Tile) -> u8 { ((self.0 >> Self::shift(tile)) & FIELD_MAX) as u8 }

    pub fn total(self) -> usize { ALL_TILES.iter().map(|&t| self.count(t) as usize).sum() }

    pub fn is_empty(self) -> bool { self.0 == 0 }

    pub fn raw(self) -> u32 { self.0 }

    /// Add `n` tiles, returning the new count for that type.
    pub fn add(&mut self, tile: Tile, n: u8) -> u8 {
        let num = self.count(tile) as u32 + n as u32;
        assert!(num <= FIELD_MAX, "holder overflow: {num} {tile} tiles exceed {NBITS}-bit field");
        self.0 &= !(FIELD_MAX << Self::shift(tile));
        self.0 |= num << Self::shift(tile);
        num as u8
    }

    /// Remove every tile of `tile`, returning how many there were.
    pub fn take(&mut self, tile: Tile) -> u8 {
        let num = self.count(tile);
        self.0 &= !(FIELD_MAX << Self::shift(tile));
        num
    }

    pub fn clear(&mut self) { self.0 = 0; }
}

/// Who took the first tile from the shared center this round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FirstTile {
    #[default]
    Unclaimed,
    Claimed(u8),
}

impl FirstTile {
    pub fn to_byte(self) -> u8 {
        match self {
            FirstTile::Unclaimed => 0,
            FirstTile::Claimed(p) => p + 1,
        }
    }
}

/// Factories plus the shared center pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Center {
    holders: [Holder; NUM_SLOTS],
    first: FirstTile,
}

impl Center {
    pub fn new() -> Self { Self::default() }

    /// Empty every slot and reset the first-tile marker.
    pub fn clear(&mut self) {
        for h in &mut self.holders { h.clear(); }
        self.first = FirstTile::Unclaimed;
    }

    /// Start a round: fill each factory from the bag and reset the marker.
    pub fn refill(&mut self, bag: &mut TileBag) {
        self.first = FirstTile::Unclaimed;
        for factory in 0..NUM_FACTORIES {
            for _ in 0..TILES_PER_FACTORY {
                let t = bag.pop();
                self.holders[factory].add(t, 1);
            }
        }
    }

    pub fn add_tile(&mut self, tile: Tile, slot: usize, n: u8) {
        self.holders[slot].add(tile, n);
    }

    /// Take all `tile` tiles from `slot`. Taking from a factory pushes the
    /// other types it held into the center.
    pub fn take_tiles(&mut self, slot: usize, tile: Tile) -> u8 {
        let num = self.holders[slot].take(tile);
        if slot != CENTER {
            for other in ALL_TILES {
                if other == tile { continue; }
                let n = self.holders[slot].take(other);
                if n > 0 { self.holders[CENTER].add(other, n); }
            }
        }
        num
    }

    pub fn is_round_over(&self) -> bool { self.holders.iter().all(|h| h.is_empty()) }

    pub fn count(&self, slot: usize, tile: Tile) -> u8 { self.holders[slot].count(tile) }

    pub fn slot_total(&self, slot: usize) -> usize { self.holders[slot].total() }

    pub fn total(&self) -> usize { self.holders.iter().map(|h| h.total()).sum() }

    pub fn holders(&self) -> &[Holder; NUM_SLOTS] { &self.holders }

    pub fn first(&self) -> FirstTile { self.first }

    /// Claim the first-tile marker; returns false if already claimed.
    pub fn claim_first(&mut self, player: u8) -> bool {
        if self.first != FirstTile::Unclaimed { return false; }
        self.first = FirstTile::Claimed(player);
        true
    }

    /// Parse the fixture layout: four characters per factory followed by the
    /// center, `_` for empty, `0`..`4` for a tile type.
    pub fn from_fixture(s: &str) -> Result<Center, GameError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != FIXTURE_LEN {
            return Err(GameError::FixtureLength { expected: FIXTURE_LEN, got: chars.len() });
        }
        let mut center = Center::new();
        for (i, &c) in chars.iter().enumerate() {
            if c == '_' { continue; }
            let tile = c.to_digit(10).and_then(|d| Tile::from_index(d as usize)).ok_or(GameError::FixtureTile(c))?;
            let slot = if i < NUM_FACTORIES * TILES_PER_FACTORY { i / TILES_PER_FACTORY } else { CENTER };
            center.add_tile(tile, slot, 1);
        }
        Ok(center)
    }
}

impl fmt::Display for Center {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (slot, h) in self.holders.iter().enumerate() {
            if slot == CENTER { write!(f, "  c:")?; } else { write!(f, "f{}:", slot + 1)?; }
            for t in ALL_TILES {
                for _ in 0..h.count(t) { write!(f, "{t}")?; }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

const _: () = assert!((NUM_TILES as u32) * NBITS <= 32);
