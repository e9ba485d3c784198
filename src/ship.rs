//! Ship types, placed ships and the five-ship fleet.

use alloc::vec::Vec;
use core::fmt;

use crate::common::Position;
use crate::config::{FLEET, NUM_SHIPS};

/// One of the five fixed ship classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum ShipType {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipType {
    pub const ALL: [ShipType; NUM_SHIPS] = FLEET;

    /// Number of cells the ship occupies.
    pub const fn size(self) -> usize {
        match self {
            ShipType::Carrier => 5,
            ShipType::Battleship => 4,
            ShipType::Cruiser => 3,
            ShipType::Submarine => 3,
            ShipType::Destroyer => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShipType::Carrier => "carrier",
            ShipType::Battleship => "battleship",
            ShipType::Cruiser => "cruiser",
            ShipType::Submarine => "submarine",
            ShipType::Destroyer => "destroyer",
        }
    }

    /// Slot of this type inside a [`Fleet`].
    pub const fn index(self) -> usize {
        match self {
            ShipType::Carrier => 0,
            ShipType::Battleship => 1,
            ShipType::Cruiser => 2,
            ShipType::Submarine => 3,
            ShipType::Destroyer => 4,
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A ship record: its class, footprint once placed, and damage taken.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    ship_type: ShipType,
    positions: Vec<Position>,
    hit_count: usize,
}

impl Ship {
    /// A fresh, unplaced and undamaged ship.
    pub fn new(ship_type: ShipType) -> Self {
        Self {
            ship_type,
            positions: Vec::new(),
            hit_count: 0,
        }
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn size(&self) -> usize {
        self.ship_type.size()
    }

    /// Footprint on the board; empty until placed.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn hit_count(&self) -> usize {
        self.hit_count
    }

    pub fn is_placed(&self) -> bool {
        !self.positions.is_empty()
    }

    /// A ship is sunk once it has taken as many hits as it has cells.
    pub fn is_sunk(&self) -> bool {
        self.hit_count >= self.size()
    }

    pub(crate) fn with_positions(&self, positions: Vec<Position>) -> Self {
        Self {
            ship_type: self.ship_type,
            positions,
            hit_count: self.hit_count,
        }
    }

    pub(crate) fn register_hit(&mut self) {
        self.hit_count += 1;
    }
}

/// One side's five ships, one of each type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet {
    ships: [Ship; NUM_SHIPS],
}

impl Fleet {
    /// Five fresh ship records in fleet order.
    pub fn new() -> Self {
        Self {
            ships: core::array::from_fn(|i| Ship::new(FLEET[i])),
        }
    }

    pub fn get(&self, ship_type: ShipType) -> &Ship {
        &self.ships[ship_type.index()]
    }

    pub(crate) fn get_mut(&mut self, ship_type: ShipType) -> &mut Ship {
        &mut self.ships[ship_type.index()]
    }

    /// Swap in an updated record for the ship of the same type.
    pub fn replace(&mut self, ship: Ship) {
        let idx = ship.ship_type().index();
        self.ships[idx] = ship;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter()
    }

    pub fn placed_count(&self) -> usize {
        self.ships.iter().filter(|s| s.is_placed()).count()
    }

    pub fn all_placed(&self) -> bool {
        self.placed_count() == NUM_SHIPS
    }

    /// Ships still afloat.
    pub fn remaining(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Self::new()
    }
}
