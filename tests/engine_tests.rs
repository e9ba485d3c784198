use rand::rngs::SmallRng;
use rand::SeedableRng;
use seabattle::{
    can_place, compute_ship_footprint, fire_at, initialize_game, is_fleet_destroyed, place,
    place_fleet_randomly, Board, BoardError, Cell, Fleet, Orientation, Phase, Position, Ship,
    ShipType, Side, BOARD_SIZE, TOTAL_SHIP_CELLS,
};

fn deploy(layout: &[(ShipType, (usize, usize), Orientation)]) -> (Board, Fleet) {
    let mut board = Board::new();
    let mut fleet = Fleet::new();
    for &(ship_type, start, orientation) in layout {
        let p = place(&board, fleet.get(ship_type), start.into(), orientation).unwrap();
        board = p.board;
        fleet.replace(p.ship);
    }
    (board, fleet)
}

fn rows_layout() -> (Board, Fleet) {
    deploy(&[
        (ShipType::Carrier, (0, 0), Orientation::Horizontal),
        (ShipType::Battleship, (2, 0), Orientation::Horizontal),
        (ShipType::Cruiser, (4, 0), Orientation::Horizontal),
        (ShipType::Submarine, (6, 0), Orientation::Horizontal),
        (ShipType::Destroyer, (8, 0), Orientation::Horizontal),
    ])
}

#[test]
fn test_footprint() {
    let h = compute_ship_footprint(3, Position::new(2, 4), Orientation::Horizontal);
    assert_eq!(h, vec![Position::new(2, 4), Position::new(2, 5), Position::new(2, 6)]);
    let v = compute_ship_footprint(2, Position::new(8, 1), Orientation::Vertical);
    assert_eq!(v, vec![Position::new(8, 1), Position::new(9, 1)]);
    // no bounds checking
    let off = compute_ship_footprint(4, Position::new(0, 8), Orientation::Horizontal);
    assert_eq!(off.last(), Some(&Position::new(0, 11)));
}

#[test]
fn test_carrier_then_overlapping_battleship() {
    let board = Board::new();
    let carrier = Ship::new(ShipType::Carrier);
    let placed = place(&board, &carrier, Position::new(0, 0), Orientation::Horizontal).unwrap();
    let expected: Vec<_> = (0..5).map(|c| Position::new(0, c)).collect();
    assert_eq!(placed.ship.positions(), expected.as_slice());
    for pos in &expected {
        assert_eq!(placed.board.get(*pos), Some(Cell::Occupied(ShipType::Carrier)));
    }
    // input board untouched
    assert_eq!(board, Board::new());

    let battleship = Ship::new(ShipType::Battleship);
    assert!(!can_place(&placed.board, &battleship, Position::new(0, 2), Orientation::Horizontal));
    assert_eq!(
        place(&placed.board, &battleship, Position::new(0, 2), Orientation::Horizontal).unwrap_err(),
        BoardError::ShipOverlaps
    );
    assert!(can_place(&placed.board, &battleship, Position::new(1, 0), Orientation::Horizontal));
}

#[test]
fn test_place_out_of_bounds() {
    let board = Board::new();
    let cruiser = Ship::new(ShipType::Cruiser);
    assert_eq!(
        place(&board, &cruiser, Position::new(0, 8), Orientation::Horizontal).unwrap_err(),
        BoardError::ShipOutOfBounds
    );
    assert_eq!(
        place(&board, &cruiser, Position::new(8, 0), Orientation::Vertical).unwrap_err(),
        BoardError::ShipOutOfBounds
    );
    assert!(can_place(&board, &cruiser, Position::new(7, 0), Orientation::Vertical));
}

#[test]
fn test_place_far_off_grid() {
    let board = Board::new();
    let carrier = Ship::new(ShipType::Carrier);
    for start in [
        Position::new(0, usize::MAX),
        Position::new(usize::MAX, 0),
        Position::new(usize::MAX - 2, usize::MAX - 2),
    ] {
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            assert!(!can_place(&board, &carrier, start, orientation));
            assert_eq!(
                place(&board, &carrier, start, orientation).unwrap_err(),
                BoardError::ShipOutOfBounds
            );
        }
    }
    let edge = compute_ship_footprint(3, Position::new(0, usize::MAX - 1), Orientation::Horizontal);
    assert_eq!(edge.len(), 3);
    assert!(edge.iter().all(|p| !p.in_bounds()));
}

#[test]
fn test_only_occupied_blocks_placement() {
    let (board, fleet) = deploy(&[(ShipType::Destroyer, (5, 5), Orientation::Horizontal)]);
    let shot = fire_at(&board, &fleet, Position::new(5, 5)).unwrap();
    let shot = fire_at(&shot.board, &shot.fleet, Position::new(0, 0)).unwrap();
    let sub = Ship::new(ShipType::Submarine);
    // hit and miss cells do not block, the remaining occupied cell does
    assert!(can_place(&shot.board, &sub, Position::new(0, 0), Orientation::Horizontal));
    assert!(can_place(&shot.board, &sub, Position::new(3, 5), Orientation::Vertical));
    assert!(!can_place(&shot.board, &sub, Position::new(3, 6), Orientation::Vertical));
}

#[test]
fn test_fire_hit_then_redundant() {
    let (board, fleet) = deploy(&[(ShipType::Carrier, (0, 0), Orientation::Horizontal)]);
    let first = fire_at(&board, &fleet, Position::new(0, 0)).unwrap();
    assert!(first.hit);
    assert!(first.sunk.is_none());
    assert_eq!(first.fleet.get(ShipType::Carrier).hit_count(), 1);
    assert!(!first.fleet.get(ShipType::Carrier).is_sunk());
    assert_eq!(first.board.get(Position::new(0, 0)), Some(Cell::Hit(ShipType::Carrier)));
    // input untouched
    assert_eq!(board.get(Position::new(0, 0)), Some(Cell::Occupied(ShipType::Carrier)));
    assert_eq!(fleet.get(ShipType::Carrier).hit_count(), 0);

    let second = fire_at(&first.board, &first.fleet, Position::new(0, 0)).unwrap();
    assert!(!second.hit);
    assert!(second.sunk.is_none());
    assert_eq!(second.board, first.board);
    assert_eq!(second.fleet, first.fleet);
}

#[test]
fn test_fire_miss() {
    let (board, fleet) = rows_layout();
    let shot = fire_at(&board, &fleet, Position::new(1, 1)).unwrap();
    assert!(!shot.hit);
    assert_eq!(shot.board.get(Position::new(1, 1)), Some(Cell::Miss));
    assert_eq!(shot.fleet, fleet);
    let again = fire_at(&shot.board, &shot.fleet, Position::new(1, 1)).unwrap();
    assert_eq!(again.board, shot.board);
}

#[test]
fn test_fire_off_board() {
    let (board, fleet) = rows_layout();
    assert_eq!(
        fire_at(&board, &fleet, Position::new(10, 3)).unwrap_err(),
        BoardError::InvalidPosition(Position::new(10, 3))
    );
}

#[test]
fn test_sinking_whole_fleet() {
    let (mut board, mut fleet) = rows_layout();
    let targets: Vec<Position> = fleet
        .iter()
        .flat_map(|s| s.positions().to_vec())
        .collect();
    assert_eq!(targets.len(), TOTAL_SHIP_CELLS);

    for (i, &pos) in targets.iter().enumerate() {
        assert!(!is_fleet_destroyed(&fleet));
        let cell = board.get(pos).unwrap();
        let shot = fire_at(&board, &fleet, pos).unwrap();
        assert!(shot.hit);
        let owner = cell.occupant().unwrap();
        let ship = shot.fleet.get(owner);
        assert_eq!(ship.is_sunk(), ship.hit_count() == ship.size());
        match &shot.sunk {
            Some(sunk) => {
                assert_eq!(sunk.ship_type(), owner);
                assert!(sunk.is_sunk());
            }
            None => assert!(!ship.is_sunk()),
        }
        board = shot.board;
        fleet = shot.fleet;
        if i + 1 < targets.len() {
            assert!(!is_fleet_destroyed(&fleet));
        }
    }
    assert!(is_fleet_destroyed(&fleet));
    assert_eq!(fleet.remaining(), 0);
}

#[test]
fn test_random_fleet_is_valid() {
    let mut rng = SmallRng::seed_from_u64(42);
    let deployed = place_fleet_randomly(&mut rng, &Board::new(), &Fleet::new()).unwrap();
    assert!(deployed.fleet.all_placed());
    assert_eq!(
        deployed.board.count(|c| matches!(c, Cell::Occupied(_))),
        TOTAL_SHIP_CELLS
    );
    for ship in deployed.fleet.iter() {
        assert_eq!(ship.positions().len(), ship.size());
        for pos in ship.positions() {
            assert!(pos.in_bounds());
            assert_eq!(deployed.board.get(*pos), Some(Cell::Occupied(ship.ship_type())));
        }
    }
}

#[test]
fn test_random_fleet_keeps_placed_ships() {
    let (board, fleet) = deploy(&[(ShipType::Carrier, (9, 0), Orientation::Horizontal)]);
    let mut rng = SmallRng::seed_from_u64(3);
    let deployed = place_fleet_randomly(&mut rng, &board, &fleet).unwrap();
    assert_eq!(deployed.fleet.get(ShipType::Carrier), fleet.get(ShipType::Carrier));
    assert!(deployed.fleet.all_placed());
}

#[test]
fn test_random_fleet_exhaustion_is_reported() {
    // Every cell occupied: no ship can ever fit.
    let mut full = Board::new();
    let filler = Ship::new(ShipType::Destroyer);
    for row in 0..BOARD_SIZE {
        for col in (0..BOARD_SIZE).step_by(2) {
            full = place(&full, &filler, Position::new(row, col), Orientation::Horizontal)
                .unwrap()
                .board;
        }
    }
    let mut rng = SmallRng::seed_from_u64(9);
    assert_eq!(
        place_fleet_randomly(&mut rng, &full, &Fleet::new()).unwrap_err(),
        BoardError::UnableToPlaceShip(ShipType::Carrier)
    );
}

#[test]
fn test_initialize_game() {
    let mut rng = SmallRng::seed_from_u64(2024);
    let state = initialize_game(&mut rng).unwrap();
    assert_eq!(state.phase(), Phase::Setup);
    assert_eq!(state.turn(), Side::Player);
    assert_eq!(state.winner(), None);
    assert_eq!(state.player_board(), &Board::new());
    assert_eq!(state.player_fleet().placed_count(), 0);
    assert!(state.opponent_fleet().all_placed());
    assert_eq!(
        state.opponent_board().count(|c| matches!(c, Cell::Occupied(_))),
        TOTAL_SHIP_CELLS
    );
    assert!(!state.message().is_empty());
}
