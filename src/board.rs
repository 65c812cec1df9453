//! One player's territory: ship placements and shot history.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use rand::Rng;

use crate::common::{BoardError, ShotResult};
use crate::config::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::coordinate::Coordinate;
use crate::ship::{Orientation, Ship, ShipState, ShipType};

/// Serializable board state for syncing or saving games.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardState {
    pub width: u32,
    pub height: u32,
    pub ships: Vec<ShipState>,
    pub hit_shots: Vec<Coordinate>,
    pub missed_shots: Vec<Coordinate>,
}

/// Main board state: ship placements, hits, misses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u32,
    height: u32,
    ships: Vec<Ship>,
    occupied: BTreeSet<Coordinate>,
    hit_shots: Vec<Coordinate>,
    missed_shots: Vec<Coordinate>,
}

impl Board {
    /// Create an empty board (no ships placed).
    pub fn new(width: u32, height: u32) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::InvalidDimensions);
        }
        Ok(Board {
            width,
            height,
            ships: Vec::new(),
            occupied: BTreeSet::new(),
            hit_shots: Vec::new(),
            missed_shots: Vec::new(),
        })
    }

    /// Empty board with the standard dimensions.
    pub fn standard() -> Self {
        Board {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            ships: Vec::new(),
            occupied: BTreeSet::new(),
            hit_shots: Vec::new(),
            missed_shots: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Immutable view of placed ships, in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Shots that hit a ship, in firing order.
    pub fn hit_shots(&self) -> &[Coordinate] {
        &self.hit_shots
    }

    /// Shots that landed in open water, in firing order.
    pub fn missed_shots(&self) -> &[Coordinate] {
        &self.missed_shots
    }

    pub fn in_bounds(&self, c: Coordinate) -> bool {
        c.x() < self.width && c.y() < self.height
    }

    pub fn is_occupied(&self, c: Coordinate) -> bool {
        self.occupied.contains(&c)
    }

    /// Returns `true` when `c` has already been fired at.
    pub fn is_shot_at(&self, c: Coordinate) -> bool {
        self.hit_shots.contains(&c) || self.missed_shots.contains(&c)
    }

    pub fn ship_count(&self) -> usize {
        self.ships.len()
    }

    /// Number of placed ships still afloat.
    pub fn remaining_ships(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

    pub fn has_placed_ship(&self, ship_type: ShipType) -> bool {
        self.ships.iter().any(|s| s.ship_type() == ship_type)
    }

    /// Returns `true` when every placed ship is sunk. Vacuously true on an
    /// empty board, so callers check fleet completeness first.
    pub fn all_ships_sunk(&self) -> bool {
        self.ships.iter().all(|s| s.is_sunk())
    }

    /// Cells a ship of `length` would cover from `start`, or the first
    /// cell that falls off the board.
    fn footprint(
        &self,
        length: usize,
        start: Coordinate,
        orientation: Orientation,
    ) -> Result<Vec<Coordinate>, BoardError> {
        let mut cells = Vec::with_capacity(length);
        for i in 0..length {
            let cell = u32::try_from(i)
                .ok()
                .and_then(|i| start.step(orientation, i))
                .ok_or(BoardError::OutOfBounds(start))?;
            if !self.in_bounds(cell) {
                return Err(BoardError::OutOfBounds(cell));
            }
            cells.push(cell);
        }
        Ok(cells)
    }

    /// Place a ship of `ship_type` starting at `start`. Nothing changes on
    /// failure.
    pub fn place_ship(
        &mut self,
        ship_type: ShipType,
        start: Coordinate,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        let cells = self.footprint(ship_type.length(), start, orientation)?;
        if let Some(&taken) = cells.iter().find(|c| self.occupied.contains(c)) {
            return Err(BoardError::Overlap(taken));
        }
        let ship = Ship::new(ship_type, cells)?;
        self.occupied.extend(ship.cells().iter().copied());
        self.ships.push(ship);
        Ok(())
    }

    /// Returns a random non-overlapping `(start, orientation)` for `ship_type`.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        ship_type: ShipType,
    ) -> Result<(Coordinate, Orientation), BoardError> {
        let len = ship_type.length() as u32;
        let mut attempts = 0;
        while attempts < 100 {
            attempts += 1;
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (span_x, span_y) = match orient {
                Orientation::Horizontal => (len, 1),
                Orientation::Vertical => (1, len),
            };
            if span_x > self.width || span_y > self.height {
                continue;
            }
            let x = rng.random_range(0..=self.width - span_x);
            let y = rng.random_range(0..=self.height - span_y);
            let start = Coordinate::at(x, y);
            let cells = self.footprint(ship_type.length(), start, orient)?;
            if cells.iter().all(|c| !self.occupied.contains(c)) {
                return Ok((start, orient));
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// Process a shot at `target`, damaging any ship there. A repeated
    /// target yields `Duplicate` and records nothing.
    pub fn fire_shot(&mut self, target: Coordinate) -> Result<ShotResult, BoardError> {
        if !self.in_bounds(target) {
            return Err(BoardError::OutOfBounds(target));
        }
        if self.is_shot_at(target) {
            return Ok(ShotResult::Duplicate);
        }
        match self.ships.iter_mut().find(|s| s.contains(target)) {
            Some(ship) => {
                let sunk = ship.take_damage();
                self.hit_shots.push(target);
                Ok(if sunk { ShotResult::Sunk } else { ShotResult::Hit })
            }
            None => {
                self.missed_shots.push(target);
                Ok(ShotResult::Miss)
            }
        }
    }
}

impl From<&Board> for BoardState {
    fn from(b: &Board) -> Self {
        BoardState {
            width: b.width,
            height: b.height,
            ships: b.ships.iter().map(ShipState::from).collect(),
            hit_shots: b.hit_shots.clone(),
            missed_shots: b.missed_shots.clone(),
        }
    }
}

impl TryFrom<BoardState> for Board {
    type Error = BoardError;

    fn try_from(state: BoardState) -> Result<Self, Self::Error> {
        let mut board = Board::new(state.width, state.height)?;
        for ship_state in state.ships {
            let ship = Ship::try_from(ship_state)?;
            if board.has_placed_ship(ship.ship_type()) {
                return Err(BoardError::CorruptState("ship type placed twice"));
            }
            for &c in ship.cells() {
                if !board.in_bounds(c) {
                    return Err(BoardError::CorruptState("ship cell out of bounds"));
                }
                if !board.occupied.insert(c) {
                    return Err(BoardError::CorruptState("ships overlap"));
                }
            }
            board.ships.push(ship);
        }
        for &c in &state.hit_shots {
            if !board.in_bounds(c) || !board.occupied.contains(&c) || board.is_shot_at(c) {
                return Err(BoardError::CorruptState("invalid hit shot"));
            }
            board.hit_shots.push(c);
        }
        for &c in &state.missed_shots {
            if !board.in_bounds(c) || board.occupied.contains(&c) || board.is_shot_at(c) {
                return Err(BoardError::CorruptState("invalid missed shot"));
            }
            board.missed_shots.push(c);
        }
        for ship in &board.ships {
            let damage = ship.cells().iter().filter(|c| board.hit_shots.contains(c)).count();
            if ship.health() + damage != ship.size() {
                return Err(BoardError::CorruptState("ship health disagrees with hits"));
            }
        }
        Ok(board)
    }
}
