use crate::game::board::wall_column;
use crate::game::moves::Move;
use crate::game::state::State;
use crate::game::{ALL_TILES, NUM_SLOTS, NUM_SQUARES, NUM_TILES, CENTER, TILES_PER_FACTORY, WALL_SIZE};

/// Planes per player: wall, one staging plane per tile type, floor, score.
const PLAYER_PLANES: usize = 1 + NUM_TILES + 1 + 1;
pub const NUM_PLANES: usize = 2 * PLAYER_PLANES + NUM_SLOTS * NUM_TILES + NUM_TILES + 1;
pub const INPUT_SIZE: usize = NUM_PLANES * NUM_SQUARES;

/// Policy head index of a move.
#[inline]
pub fn move_policy_index(mv: Move) -> usize { mv.id() }

fn fill(planes: &mut [f32], plane: usize, v: f32) {
    planes[plane * NUM_SQUARES..(plane + 1) * NUM_SQUARES].fill(v);
}

/// Encode a state as `NUM_PLANES` 5x5 planes, flattened plane-major, from
/// the perspective of the player to move (their planes come first).
///
/// Staging planes mark the wall cell a row would fill with the row's fill
/// fraction, so the network sees where each row is headed.
pub fn encode_planes(state: &State) -> Vec<f32> {
    let mut planes = vec![0.0f32; INPUT_SIZE];
    let me = state.turn();
    for (k, player) in [me, me ^ 1].into_iter().enumerate() {
        let b = state.board(player);
        let base = k * PLAYER_PLANES;
        for sq in 0..NUM_SQUARES {
            if b.wall() & (1 << sq) != 0 { planes[base * NUM_SQUARES + sq] = 1.0; }
        }
        for line in 0..WALL_SIZE {
            let row = b.row(line);
            if let Some(tile) = row.tile() {
                let sq = line * WALL_SIZE + wall_column(line, tile);
                let plane = base + 1 + tile.index();
                planes[plane * NUM_SQUARES + sq] = row.count() as f32 / (line + 1) as f32;
            }
        }
        fill(&mut planes, base + 1 + NUM_TILES, b.floor().min(7) as f32 / 7.0);
        fill(&mut planes, base + 2 + NUM_TILES, b.score() as f32 / 100.0);
    }

    let mut plane = 2 * PLAYER_PLANES;
    for slot in 0..NUM_SLOTS {
        let scale = if slot == CENTER { 20.0 } else { TILES_PER_FACTORY as f32 };
        for tile in ALL_TILES {
            fill(&mut planes, plane, state.center().count(slot, tile) as f32 / scale);
            plane += 1;
        }
    }
    for tile in ALL_TILES {
        fill(&mut planes, plane, state.bag().count(tile) as f32 / 20.0);
        plane += 1;
    }
    let unclaimed = state.center().first() == crate::game::center::FirstTile::Unclaimed;
    fill(&mut planes, plane, if unclaimed { 1.0 } else { 0.0 });
    planes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::magics::init_table;
    use crate::game::{Tile, FLOOR};

    #[test]
    fn plane_count_and_size() {
        assert_eq!(NUM_PLANES, 52);
        let planes = encode_planes(&State::new());
        assert_eq!(planes.len(), INPUT_SIZE);
        // first-tile marker unclaimed at the start of a round
        assert!(planes[(NUM_PLANES - 1) * NUM_SQUARES..].iter().all(|&v| v == 1.0));
    }

    #[test]
    fn perspective_swaps_with_turn() {
        init_table();
        let mut s = State::from_center_str("____001____________________________").unwrap();
        s.step(Move::new(1, Tile::Blue, FLOOR));
        // player 0 now has two floor tiles and player 1 is to move
        let planes = encode_planes(&s);
        let my_floor = planes[(1 + NUM_TILES) * NUM_SQUARES];
        let their_floor = planes[(PLAYER_PLANES + 1 + NUM_TILES) * NUM_SQUARES];
        assert_eq!(my_floor, 0.0);
        assert!((their_floor - 2.0 / 7.0).abs() < 1e-6);
    }
}
