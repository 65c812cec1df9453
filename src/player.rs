use alloc::string::String;

use crate::board::{Board, BoardState};
use crate::common::BoardError;
use crate::config::FLEET_SIZE;

/// Opaque player identifier; only ever compared for equality.
pub type PlayerId = String;

/// A participant in a game together with the board they defend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    board: Board,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, board: Board) -> Self {
        Self {
            id: id.into(),
            board,
        }
    }

    /// A player with an empty standard board.
    pub fn with_standard_board(id: impl Into<PlayerId>) -> Self {
        Self::new(id, Board::standard())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Every ship of the fleet has been placed.
    pub fn fleet_complete(&self) -> bool {
        self.board.ship_count() == FLEET_SIZE
    }

    /// All placed ships are sunk. Also true before any ship is placed.
    pub fn has_lost(&self) -> bool {
        self.board.all_ships_sunk()
    }
}

/// Serializable player record for saving games.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub id: PlayerId,
    pub board: BoardState,
}

impl From<&Player> for PlayerState {
    fn from(p: &Player) -> Self {
        PlayerState {
            id: p.id.clone(),
            board: BoardState::from(&p.board),
        }
    }
}

impl TryFrom<PlayerState> for Player {
    type Error = BoardError;

    fn try_from(state: PlayerState) -> Result<Self, Self::Error> {
        Ok(Player::new(state.id, Board::try_from(state.board)?))
    }
}
