//! Per-viewer projection of a game.
//!
//! A viewer always sees their own fleet in full. Of the opponent they see
//! every shot fired at them, ships that have already been sunk, and the
//! whole fleet once the game is over.

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::common::GameError;
use crate::coordinate::Coordinate;
use crate::game::{Game, GameId, GameStatus};
use crate::player::{Player, PlayerId};
use crate::ship::{Ship, ShipType};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipView {
    pub ship_type: ShipType,
    pub size: usize,
    pub sunk: bool,
    pub coordinates: Vec<Coordinate>,
}

impl From<&Ship> for ShipView {
    fn from(ship: &Ship) -> Self {
        ShipView {
            ship_type: ship.ship_type(),
            size: ship.size(),
            sunk: ship.is_sunk(),
            coordinates: ship.cells().to_vec(),
        }
    }
}

/// What a viewer may see of one side of the game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerView {
    pub player_id: PlayerId,
    /// Fully visible ships: always for the viewer, for the opponent only
    /// after the game is finished.
    pub ships: Vec<ShipView>,
    /// Opponent ships revealed by sinking while the game is still running.
    pub sunk_ships: Vec<ShipView>,
    pub hits: Vec<Coordinate>,
    pub misses: Vec<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameView {
    pub game_id: GameId,
    pub status: GameStatus,
    pub current_turn: PlayerId,
    pub winner: Option<PlayerId>,
    pub me: PlayerView,
    /// Absent until a second player has joined.
    pub opponent: Option<PlayerView>,
}

fn own_view(player: &Player) -> PlayerView {
    let board = player.board();
    PlayerView {
        player_id: player.id().to_string(),
        ships: board.ships().iter().map(ShipView::from).collect(),
        sunk_ships: Vec::new(),
        hits: board.hit_shots().to_vec(),
        misses: board.missed_shots().to_vec(),
    }
}

fn opponent_view(player: &Player, status: GameStatus) -> PlayerView {
    let board = player.board();
    let (ships, sunk_ships) = if status == GameStatus::Finished {
        (board.ships().iter().map(ShipView::from).collect(), Vec::new())
    } else {
        let sunk = board
            .ships()
            .iter()
            .filter(|s| s.is_sunk())
            .map(ShipView::from)
            .collect();
        (Vec::new(), sunk)
    };
    PlayerView {
        player_id: player.id().to_string(),
        ships,
        sunk_ships,
        hits: board.hit_shots().to_vec(),
        misses: board.missed_shots().to_vec(),
    }
}

/// Compute what `viewer_id` is allowed to see of `game`.
pub fn project(game: &Game, viewer_id: &str) -> Result<GameView, GameError> {
    let viewer = game
        .player(viewer_id)
        .ok_or_else(|| GameError::ViewerNotInGame(viewer_id.to_string()))?;
    let opponent = game.opponent_of(viewer_id);
    Ok(GameView {
        game_id: game.id().to_string(),
        status: game.status(),
        current_turn: game.current_turn().to_string(),
        winner: game.winner().map(ToString::to_string),
        me: own_view(viewer),
        opponent: opponent.map(|p| opponent_view(p, game.status())),
    })
}
