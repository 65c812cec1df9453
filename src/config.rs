//! Fixed rules constants: board dimensions and fleet composition.

use crate::ship::ShipType;

pub const BOARD_WIDTH: u32 = 10;
pub const BOARD_HEIGHT: u32 = 10;
pub const FLEET_SIZE: usize = 5;
pub const FLEET: [ShipType; FLEET_SIZE] = [
    ShipType::Carrier,
    ShipType::Battleship,
    ShipType::Cruiser,
    ShipType::Submarine,
    ShipType::Destroyer,
];

/// Total number of ship segments in a complete fleet.
pub const TOTAL_FLEET_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Resolve a ship identifier, ignoring ASCII case. Returns `None` if the
/// name does not match any type in the fleet.
pub fn ship_type_by_id(id: &str) -> Option<ShipType> {
    FLEET.iter().copied().find(|t| t.id().eq_ignore_ascii_case(id))
}
