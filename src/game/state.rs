use super::bag::TileBag;
use super::board::Board;
use super::center::{Center, FirstTile};
use super::moves::{Move, MoveList};
use super::{GameError, ALL_TILES, FLOOR, NUM_SLOTS, NUM_TILES, WALL_SIZE};
use crate::search::hash::hash_bytes;
use std::fmt;

/// Length of [`State::serialize`].
pub const STATE_BYTES: usize = 1 + 2 * 2 + NUM_TILES * 2 + NUM_SLOTS * 4 + 1 + 2 * (WALL_SIZE * 2 + 1 + 4) + 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Draw,
    FirstPlayer,
    SecondPlayer,
}

/// Full two-player game: bag, factories, both boards and whose turn it is.
///
/// Plain `Copy` data, so cloning to explore a branch is a memcpy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct State {
    bag: TileBag,
    center: Center,
    boards: [Board; 2],
    turn: u8,
    prev_turn: u8,
}

impl Default for State {
    fn default() -> Self { Self::new() }
}

impl State {
    /// Fresh game with the first round dealt.
    pub fn new() -> Self {
        let mut s = Self {
            bag: TileBag::new(),
            center: Center::new(),
            boards: [Board::new(); 2],
            turn: 0,
            prev_turn: 0,
        };
        s.center.refill(&mut s.bag);
        s
    }

    pub fn reset(&mut self) { *self = Self::new(); }

    /// Empty boards with the factories/center laid out from a fixture string;
    /// the fixture's tiles are taken out of a full bag.
    pub fn from_center_str(fixture: &str) -> Result<Self, GameError> {
        let center = Center::from_fixture(fixture)?;
        let mut bag = TileBag::new();
        for tile in ALL_TILES {
            let n: u8 = (0..NUM_SLOTS).map(|slot| center.count(slot, tile)).sum();
            bag.remove(tile, n)?;
        }
        Ok(Self { bag, center, boards: [Board::new(); 2], turn: 0, prev_turn: 0 })
    }

    pub fn turn(&self) -> usize { self.turn as usize }
    pub fn last_mover(&self) -> usize { self.prev_turn as usize }
    pub fn board(&self, player: usize) -> &Board { &self.boards[player] }
    pub fn center(&self) -> &Center { &self.center }

    /// Replace a player's board (analysis positions and tests).
    pub fn set_board(&mut self, player: usize, board: Board) { self.boards[player] = board; }
    pub fn bag(&self) -> &TileBag { &self.bag }

    /// Legal moves for the player to move, in ascending (slot, tile, line)
    /// order with the floor last for each pair.
    pub fn legal_moves(&self, out: &mut MoveList) -> usize {
        out.clear();
        let b = &self.boards[self.turn as usize];
        for slot in 0..NUM_SLOTS {
            for tile in ALL_TILES {
                if self.center.count(slot, tile) == 0 { continue; }
                for line in 0..FLOOR {
                    let row = b.row(line);
                    if b.room(line) > 0 && row.accepts(tile) && !b.wall_has_tile(tile, line) {
                        out.push(Move::new(slot, tile, line));
                    }
                }
                // the floor always takes tiles
                out.push(Move::new(slot, tile, FLOOR));
            }
        }
        out.len()
    }

    pub fn moves(&self) -> MoveList {
        let mut list = MoveList::new();
        self.legal_moves(&mut list);
        list
    }

    pub fn step(&mut self, mv: Move) {
        let player = self.turn as usize;
        let num = self.center.take_tiles(mv.slot(), mv.tile());
        assert!(num > 0, "move {mv} takes no tiles");
        self.boards[player].apply_move(mv, num, &mut self.bag);

        if mv.from_center() && self.center.claim_first(self.turn) {
            self.boards[player].increase_floorline();
        }

        self.prev_turn = self.turn;
        if self.center.is_round_over() {
            let first = self.center.first();
            for b in &mut self.boards {
                b.next_round(&mut self.bag);
            }
            self.center.refill(&mut self.bag);
            // With only monochrome factories nobody touches the center.
            self.turn = match first {
                FirstTile::Claimed(p) => p,
                FirstTile::Unclaimed => 0,
            };
        } else {
            self.turn ^= 1;
        }
    }

    /// True if playing `mv` takes the last tiles of the round.
    pub fn ends_round(&self, mv: Move) -> bool {
        let total = self.center.total();
        total > 0 && self.center.count(mv.slot(), mv.tile()) as usize == total
    }

    pub fn is_terminal(&self) -> bool { self.boards.iter().any(|b| b.is_terminal()) }

    /// +1/0/-1 from the point of view of the player who made the last move.
    pub fn outcome(&self) -> i32 {
        let me = self.boards[self.prev_turn as usize].score();
        let op = self.boards[(self.prev_turn ^ 1) as usize].score();
        (me - op).signum() as i32
    }

    pub fn outcome_for(&self, player: usize) -> i32 {
        if player == self.prev_turn as usize { self.outcome() } else { -self.outcome() }
    }

    pub fn winner(&self) -> GameResult {
        assert!(self.is_terminal(), "winner() called on a non-terminal state");
        match self.outcome_for(0) {
            1 => GameResult::FirstPlayer,
            -1 => GameResult::SecondPlayer,
            _ => GameResult::Draw,
        }
    }

    /// Canonical fixed-width encoding; equal bytes iff equal states.
    pub fn serialize(&self) -> [u8; STATE_BYTES] {
        let mut out = [0u8; STATE_BYTES];
        let mut w = Writer { buf: &mut out, pos: 0 };
        w.put(&[self.turn]);
        for b in &self.boards {
            w.put(&(b.score() as u16).to_le_bytes());
        }
        w.put(self.bag.counts());
        w.put(self.bag.returned_counts());
        for h in self.center.holders() {
            w.put(&h.raw().to_le_bytes());
        }
        w.put(&[self.center.first().to_byte()]);
        for b in &self.boards {
            for row in b.rows() {
                w.put(&row.to_bytes());
            }
            w.put(&[b.floor()]);
            w.put(&b.wall().to_le_bytes());
        }
        w.put(&[self.prev_turn]);
        debug_assert_eq!(w.pos, STATE_BYTES);
        out
    }

    /// Transposition key: hash of the canonical encoding.
    pub fn hash(&self) -> u64 { hash_bytes(&self.serialize()) }

    /// Tiles anywhere outside the bag's pools (factories, staging rows, walls).
    /// Floor tiles are already on the discard pile.
    pub fn tiles_in_play(&self) -> usize {
        self.center.total()
            + self.boards.iter().map(|b| b.staged() + b.wall().count_ones() as usize).sum::<usize>()
    }
}

struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl Writer<'_> {
    fn put(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.center)?;
        write!(f, "bag:")?;
        for t in ALL_TILES { write!(f, " {}={}", t, self.bag.count(t))?; }
        writeln!(f)?;
        for (p, b) in self.boards.iter().enumerate() {
            let marker = if p == self.turn as usize { '*' } else { ' ' };
            writeln!(f, "{marker}player {}", p + 1)?;
            write!(f, "{b}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::magics::init_table;

    #[test]
    fn serialized_width() {
        assert_eq!(STATE_BYTES, 71);
        assert_eq!(State::new().serialize().len(), STATE_BYTES);
    }

    #[test]
    fn fixture_keeps_tile_count() {
        init_table();
        let s = State::from_center_str("____001____________________________").unwrap();
        assert_eq!(s.bag().total() + s.tiles_in_play(), crate::game::BAG_SIZE);
    }

    #[test]
    #[should_panic(expected = "non-terminal")]
    fn winner_requires_terminal() {
        State::new().winner();
    }
}
