use azulbot::game::bag::TileBag;
use azulbot::game::board::{Board, COL_MASKS, FLOOR_PENALTY, ROW_MASKS, TILE_MASKS};
use azulbot::game::magics::{compute_score, get_score, init_table, MAGICS, MAGIC_BITS, magic_conflicts};
use azulbot::game::moves::Move;
use azulbot::game::{Tile, ALL_TILES, FLOOR, NUM_SQUARES};

fn bag_without(tile: Tile, n: u8) -> TileBag {
    let mut bag = TileBag::new();
    bag.remove(tile, n).unwrap();
    bag
}

#[test]
fn shipped_magics_have_no_conflicts() {
    for sq in 0..NUM_SQUARES {
        assert!(!magic_conflicts(sq, MAGICS[sq], MAGIC_BITS), "square {sq}");
    }
}

#[test]
fn table_matches_direct_count_on_sampled_walls() {
    init_table();
    let mut wall = 0x1234_5678u32 & 0x1ff_ffff;
    for _ in 0..2000 {
        wall = wall.wrapping_mul(1_103_515_245).wrapping_add(12345) & 0x1ff_ffff;
        for sq in 0..NUM_SQUARES {
            assert_eq!(get_score(sq, wall), compute_score(sq, wall), "square {sq} wall {wall:#x}");
        }
    }
}

#[test]
fn isolated_tile_scores_one() {
    init_table();
    for sq in 0..NUM_SQUARES {
        assert_eq!(get_score(sq, 0), 1);
        assert_eq!(get_score(sq, 1 << sq), 1);
    }
}

#[test]
fn full_cross_scores_ten() {
    init_table();
    // center square with its whole row and column occupied
    assert_eq!(get_score(12, ROW_MASKS[2] | COL_MASKS[2]), 10);
}

#[test]
fn row_fill_accumulates_and_ends_game() {
    init_table();
    let mut bag = TileBag::new();
    let mut b = Board::new();
    let mut scores = Vec::new();
    for col in 0..5 {
        // row 0 holds tile type `col` in column `col`
        let tile = ALL_TILES[col];
        b.apply_move(Move::new(0, tile, 0), 1, &mut bag);
        b.next_round(&mut bag);
        scores.push(b.score());
    }
    assert_eq!(scores, vec![1, 3, 6, 10, 17]);
    assert!(b.is_terminal());
    assert_eq!(b.wall(), ROW_MASKS[0]);
}

#[test]
fn column_bonus() {
    init_table();
    let mut bag = bag_without(Tile::Yellow, 5);
    let mut b = Board::new();
    b.set_wall(COL_MASKS[0] & !ROW_MASKS[4]);
    // yellow sits in column 0 on the last row
    b.apply_move(Move::new(0, Tile::Yellow, 4), 5, &mut bag);
    b.next_round(&mut bag);
    assert_eq!(b.wall(), COL_MASKS[0]);
    assert_eq!(b.score(), 5 + 7);
    assert!(!b.is_terminal());
    assert_eq!(bag.returned(Tile::Yellow), 4);
}

#[test]
fn tile_bonus() {
    init_table();
    let mut bag = bag_without(Tile::Blue, 5);
    let mut b = Board::new();
    b.set_wall(TILE_MASKS[Tile::Blue.index()] & !ROW_MASKS[4]);
    b.apply_move(Move::new(0, Tile::Blue, 4), 5, &mut bag);
    b.next_round(&mut bag);
    assert_eq!(b.wall(), TILE_MASKS[Tile::Blue.index()]);
    assert_eq!(b.score(), 1 + 10);
}

#[test]
fn wall_has_tile_follows_diagonals() {
    let mut b = Board::new();
    b.set_wall(ROW_MASKS[1] | COL_MASKS[3]);
    assert!(b.wall_has_tile(Tile::Black, 0));
    assert!(b.wall_has_tile(Tile::Red, 1));
    assert!(b.wall_has_tile(Tile::Blue, 3));
    assert!(!b.wall_has_tile(Tile::Blue, 0));
    assert!(!b.wall_has_tile(Tile::Blue, 4));
    assert!(!b.wall_has_tile(Tile::Blue, FLOOR));
}

#[test]
fn floor_penalty_is_capped_and_score_clamps() {
    init_table();
    for floor in 0..=9u8 {
        let mut bag = bag_without(Tile::Yellow, 5);
        bag.remove(Tile::Red, floor).unwrap();
        let mut b = Board::new();
        b.set_wall(COL_MASKS[0] & !ROW_MASKS[4]);
        b.apply_move(Move::new(0, Tile::Yellow, 4), 5, &mut bag);
        if floor > 0 {
            b.apply_move(Move::new(1, Tile::Red, FLOOR), floor, &mut bag);
        }
        assert_eq!(b.floor(), floor);
        b.next_round(&mut bag);
        let expected = (12 - FLOOR_PENALTY[floor.min(7) as usize]).max(0);
        assert_eq!(b.score(), expected, "floor {floor}");
        assert_eq!(b.floor(), 0);
    }
}
