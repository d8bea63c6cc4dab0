use azulbot::game::bag::TileBag;
use azulbot::game::center::{Center, FirstTile};
use azulbot::game::{Tile, CENTER, NUM_FACTORIES, TILES_PER_FACTORY};
use azulbot::rng;

#[test]
fn factory_take_spills_rest_to_center() {
    let mut c = Center::from_fixture("________2221_______________________").unwrap();
    assert_eq!(c.take_tiles(2, Tile::Yellow), 1);
    assert_eq!(c.slot_total(2), 0);
    assert_eq!(c.count(CENTER, Tile::Red), 3);
    assert_eq!(c.total(), 3);
}

#[test]
fn center_take_leaves_other_types() {
    let mut c = Center::from_fixture("____________________444442_________").unwrap();
    assert_eq!(c.take_tiles(CENTER, Tile::White), 5);
    assert_eq!(c.count(CENTER, Tile::Red), 1);
    assert!(!c.is_round_over());
    assert_eq!(c.take_tiles(CENTER, Tile::Red), 1);
    assert!(c.is_round_over());
}

#[test]
fn first_tile_claimed_once() {
    let mut c = Center::new();
    assert_eq!(c.first(), FirstTile::Unclaimed);
    assert!(c.claim_first(1));
    assert!(!c.claim_first(0));
    assert_eq!(c.first(), FirstTile::Claimed(1));
}

#[test]
fn refill_deals_four_per_factory() {
    rng::seed(11);
    let mut bag = TileBag::new();
    let mut c = Center::new();
    c.claim_first(0);
    c.refill(&mut bag);
    for f in 0..NUM_FACTORIES {
        assert_eq!(c.slot_total(f), TILES_PER_FACTORY);
    }
    assert_eq!(c.slot_total(CENTER), 0);
    assert_eq!(c.first(), FirstTile::Unclaimed);
    assert_eq!(bag.len(), 80);
}

#[test]
fn bad_fixtures_are_rejected() {
    assert!(Center::from_fixture("___").is_err());
    assert!(Center::from_fixture("____00x____________________________").is_err());
}
