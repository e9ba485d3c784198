use crate::ship::ShipType;

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;

/// Fleet composition in the order ships are seeded onto a board.
pub const FLEET: [ShipType; NUM_SHIPS] = [
    ShipType::Carrier,
    ShipType::Battleship,
    ShipType::Cruiser,
    ShipType::Submarine,
    ShipType::Destroyer,
];

/// Total number of ship segments used in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Random placement tries per ship before seeding gives up on it.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Whole-fleet reseeding rounds attempted when a new game is initialized.
pub const MAX_SEEDING_ROUNDS: usize = 8;

/// Environment variable holding the log level filter.
pub const LOG_ENV_VAR: &str = "SEABATTLE_LOG";
