//! Common types for the rules engine: shot results and error taxonomy.

use alloc::string::String;
use core::fmt;

use crate::coordinate::Coordinate;

/// Outcome of a shot against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ShotResult {
    /// Shot landed in open water.
    Miss,
    /// Shot damaged a ship that is still afloat.
    Hit,
    /// Shot took the last point of health from a ship.
    Sunk,
    /// Cell was already fired at; nothing was recorded.
    Duplicate,
}

/// Errors returned by Board operations and snapshot validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// A coordinate component was negative.
    InvalidCoordinate { x: i64, y: i64 },
    /// Board width or height was zero.
    InvalidDimensions,
    /// A cell lies outside the board.
    OutOfBounds(Coordinate),
    /// Ship placement overlaps another ship.
    Overlap(Coordinate),
    /// Ship cells do not match its type (wrong count or repeated cell).
    InvalidShip,
    /// Random placement gave up without finding a free slot.
    UnableToPlaceShip,
    /// A stored snapshot violates a board invariant.
    CorruptState(&'static str),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidCoordinate { x, y } => {
                write!(f, "Coordinates cannot be negative: ({}, {})", x, y)
            }
            BoardError::InvalidDimensions => write!(f, "Board width and height must be positive"),
            BoardError::OutOfBounds(c) => write!(f, "Cell {} is out of bounds", c),
            BoardError::Overlap(c) => write!(f, "Cell {} is already occupied", c),
            BoardError::InvalidShip => write!(f, "Ship cells do not match its type"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
            BoardError::CorruptState(reason) => write!(f, "Corrupt board state: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

/// Coarse classification used by transports to pick an external status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input; detectable without looking at game state.
    Validation,
    /// Input is well-formed but not allowed in the current game state.
    State,
    /// The referenced game, ship type or participant does not exist.
    NotFound,
}

/// Errors returned by Game operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    Board(BoardError),
    UnknownShipType(String),
    GameFull,
    InvalidState,
    PlayerNotInGame(String),
    DuplicatePlayer(String),
    DuplicateShipType(&'static str),
    NotYourTurn,
    DuplicateShot(Coordinate),
    ViewerNotInGame(String),
    GameNotFound(String),
    /// A stored game snapshot violates a game invariant.
    CorruptState(&'static str),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::Board(_) | GameError::CorruptState(_) => ErrorKind::Validation,
            GameError::GameFull
            | GameError::InvalidState
            | GameError::DuplicatePlayer(_)
            | GameError::DuplicateShipType(_)
            | GameError::NotYourTurn
            | GameError::DuplicateShot(_) => ErrorKind::State,
            GameError::UnknownShipType(_)
            | GameError::PlayerNotInGame(_)
            | GameError::ViewerNotInGame(_)
            | GameError::GameNotFound(_) => ErrorKind::NotFound,
        }
    }
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Board(e) => write!(f, "{}", e),
            GameError::UnknownShipType(id) => write!(f, "Invalid ship type: {}", id),
            GameError::GameFull => write!(f, "Game is already full"),
            GameError::InvalidState => write!(f, "Operation not allowed in the current game state"),
            GameError::PlayerNotInGame(id) => write!(f, "Player {} is not part of this game", id),
            GameError::DuplicatePlayer(id) => write!(f, "Player {} is already in this game", id),
            GameError::DuplicateShipType(name) => write!(f, "{} has already been placed", name),
            GameError::NotYourTurn => write!(f, "It is not your turn"),
            GameError::DuplicateShot(c) => write!(f, "Cell {} was already fired at", c),
            GameError::ViewerNotInGame(id) => write!(f, "Viewer {} is not part of this game", id),
            GameError::GameNotFound(id) => write!(f, "Game not found with ID: {}", id),
            GameError::CorruptState(reason) => write!(f, "Corrupt game state: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Board(e) => Some(e),
            _ => None,
        }
    }
}
