//! Match lifecycle: joining, fleet setup, alternating fire and resolution.

use alloc::format;
use alloc::string::{String, ToString};
use log::{debug, info};
use rand::Rng;

use crate::common::{GameError, ShotResult};
use crate::coordinate::Coordinate;
use crate::player::{Player, PlayerId, PlayerState};
use crate::ship::{Orientation, ShipType};

/// Opaque game identifier, generated once at creation.
pub type GameId = String;

/// Current phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum GameStatus {
    /// Only the creator is present.
    WaitingForPlayer,
    /// Both players present, fleets being placed.
    Setup,
    /// Both fleets placed, shots allowed.
    Active,
    /// A fleet has been sunk. Terminal.
    Finished,
}

/// Serializable overall game state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub id: GameId,
    pub player1: PlayerState,
    pub player2: Option<PlayerState>,
    pub current_turn: PlayerId,
    pub status: GameStatus,
    pub winner: Option<PlayerId>,
}

/// A two-player match. Every failing operation leaves the game untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    id: GameId,
    player1: Player,
    player2: Option<Player>,
    current_turn: PlayerId,
    status: GameStatus,
    winner: Option<PlayerId>,
}

/// Render 128 random bits as a hyphenated lowercase hex id.
fn generate_game_id<R: Rng>(rng: &mut R) -> GameId {
    let v: u128 = rng.random();
    format!(
        "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
        (v >> 96) as u32,
        (v >> 80) as u16,
        (v >> 64) as u16,
        (v >> 48) as u16,
        (v & 0xffff_ffff_ffff) as u64,
    )
}

impl Game {
    /// Open a new game for `player1_id` with a fresh random id.
    #[cfg(feature = "std")]
    pub fn create(player1_id: impl Into<PlayerId>) -> Self {
        Self::create_with_rng(&mut rand::rng(), player1_id)
    }

    /// Open a new game, drawing its id from `rng`.
    pub fn create_with_rng<R: Rng>(rng: &mut R, player1_id: impl Into<PlayerId>) -> Self {
        let player1 = Player::with_standard_board(player1_id);
        let game = Game {
            id: generate_game_id(rng),
            current_turn: player1.id().to_string(),
            player1,
            player2: None,
            status: GameStatus::WaitingForPlayer,
            winner: None,
        };
        info!("game {} created by {}", game.id, game.current_turn);
        game
    }

    /// Rebuild a stored game under its existing id.
    pub fn reconstitute(
        id: impl Into<GameId>,
        player1: Player,
        player2: Option<Player>,
        current_turn: impl Into<PlayerId>,
        status: GameStatus,
        winner: Option<PlayerId>,
    ) -> Result<Self, GameError> {
        let game = Game {
            id: id.into(),
            player1,
            player2,
            current_turn: current_turn.into(),
            status,
            winner,
        };
        game.check_consistency()?;
        Ok(game)
    }

    fn check_consistency(&self) -> Result<(), GameError> {
        if let Some(p2) = &self.player2 {
            if p2.id() == self.player1.id() {
                return Err(GameError::CorruptState("players share an id"));
            }
        }
        if (self.status == GameStatus::WaitingForPlayer) != self.player2.is_none() {
            return Err(GameError::CorruptState("second player does not match status"));
        }
        if !self.is_participant(&self.current_turn) {
            return Err(GameError::CorruptState("turn holder is not a participant"));
        }
        let fleets_complete = self.player1.fleet_complete()
            && self.player2.as_ref().is_some_and(Player::fleet_complete);
        match self.status {
            GameStatus::WaitingForPlayer => {}
            GameStatus::Setup if fleets_complete => {
                return Err(GameError::CorruptState("setup with both fleets placed"));
            }
            GameStatus::Setup => {}
            GameStatus::Active | GameStatus::Finished if !fleets_complete => {
                return Err(GameError::CorruptState("fleets incomplete after setup"));
            }
            GameStatus::Active => {
                let someone_lost =
                    self.player1.has_lost() || self.player2.as_ref().is_some_and(Player::has_lost);
                if someone_lost {
                    return Err(GameError::CorruptState("active game with a sunk fleet"));
                }
            }
            GameStatus::Finished => {}
        }
        match (&self.winner, self.status) {
            (Some(w), GameStatus::Finished) => {
                let winner_stands = self.player(w).is_some_and(|p| !p.has_lost());
                let loser_sunk = self.opponent_of(w).is_some_and(Player::has_lost);
                if winner_stands && loser_sunk {
                    Ok(())
                } else {
                    Err(GameError::CorruptState("winner's opponent still has ships afloat"))
                }
            }
            (None, s) if s != GameStatus::Finished => Ok(()),
            _ => Err(GameError::CorruptState("winner does not match status")),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn player1(&self) -> &Player {
        &self.player1
    }

    pub fn player2(&self) -> Option<&Player> {
        self.player2.as_ref()
    }

    /// Id of the player who must move next.
    pub fn current_turn(&self) -> &str {
        &self.current_turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn is_participant(&self, player_id: &str) -> bool {
        self.player(player_id).is_some()
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        if self.player1.id() == player_id {
            Some(&self.player1)
        } else {
            self.player2.as_ref().filter(|p| p.id() == player_id)
        }
    }

    /// The other participant, if both `player_id` and an opponent exist.
    pub fn opponent_of(&self, player_id: &str) -> Option<&Player> {
        if self.player1.id() == player_id {
            self.player2.as_ref()
        } else if self.player2.as_ref().is_some_and(|p| p.id() == player_id) {
            Some(&self.player1)
        } else {
            None
        }
    }

    fn player_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        if self.player1.id() == player_id {
            Some(&mut self.player1)
        } else {
            self.player2.as_mut().filter(|p| p.id() == player_id)
        }
    }

    fn opponent_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        if self.player1.id() == player_id {
            self.player2.as_mut()
        } else {
            Some(&mut self.player1)
        }
    }

    /// Seat the second player and move on to fleet setup.
    pub fn join(&mut self, player2_id: impl Into<PlayerId>) -> Result<(), GameError> {
        match self.status {
            GameStatus::WaitingForPlayer => {}
            GameStatus::Finished => return Err(GameError::InvalidState),
            GameStatus::Setup | GameStatus::Active => return Err(GameError::GameFull),
        }
        let player2_id = player2_id.into();
        if player2_id == self.player1.id() {
            return Err(GameError::DuplicatePlayer(player2_id));
        }
        debug!("game {}: {} joined, entering setup", self.id, player2_id);
        self.player2 = Some(Player::with_standard_board(player2_id));
        self.status = GameStatus::Setup;
        Ok(())
    }

    /// Place one ship of `player_id`'s fleet. Once both fleets are complete
    /// the game becomes active with the turn holder unchanged.
    pub fn place_ship(
        &mut self,
        player_id: &str,
        ship_type: ShipType,
        start: Coordinate,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        if !matches!(self.status, GameStatus::WaitingForPlayer | GameStatus::Setup) {
            return Err(GameError::InvalidState);
        }
        let player = self
            .player_mut(player_id)
            .ok_or_else(|| GameError::PlayerNotInGame(player_id.to_string()))?;
        if player.board().has_placed_ship(ship_type) {
            return Err(GameError::DuplicateShipType(ship_type.id()));
        }
        player.board_mut().place_ship(ship_type, start, orientation)?;
        debug!(
            "game {}: {} placed {} at {} {:?}",
            self.id, player_id, ship_type, start, orientation
        );

        let both_ready = self.player1.fleet_complete()
            && self.player2.as_ref().is_some_and(Player::fleet_complete);
        if both_ready {
            debug!("game {}: fleets complete, {} fires first", self.id, self.current_turn);
            self.status = GameStatus::Active;
        }
        Ok(())
    }

    /// Fire at the opponent of `player_id`. A repeated target is rejected
    /// without costing the turn.
    pub fn fire(&mut self, player_id: &str, target: Coordinate) -> Result<ShotResult, GameError> {
        if self.status != GameStatus::Active {
            return Err(GameError::InvalidState);
        }
        if player_id != self.current_turn {
            return Err(GameError::NotYourTurn);
        }
        let opponent = self
            .opponent_mut(player_id)
            .ok_or(GameError::InvalidState)?;
        let result = opponent.board_mut().fire_shot(target)?;
        let opponent_lost = opponent.has_lost();
        let opponent_id = opponent.id().to_string();
        debug!("game {}: {} fired at {}: {:?}", self.id, player_id, target, result);

        match result {
            ShotResult::Duplicate => Err(GameError::DuplicateShot(target)),
            ShotResult::Sunk if opponent_lost => {
                info!("game {}: {} wins", self.id, player_id);
                self.status = GameStatus::Finished;
                self.winner = Some(player_id.to_string());
                Ok(result)
            }
            _ => {
                self.current_turn = opponent_id;
                Ok(result)
            }
        }
    }

    /// Generate a serializable snapshot of the current state.
    pub fn state(&self) -> GameState {
        GameState {
            id: self.id.clone(),
            player1: PlayerState::from(&self.player1),
            player2: self.player2.as_ref().map(PlayerState::from),
            current_turn: self.current_turn.clone(),
            status: self.status,
            winner: self.winner.clone(),
        }
    }

    /// Restore a game from a previously saved state.
    pub fn from_state(state: GameState) -> Result<Self, GameError> {
        let player1 = Player::try_from(state.player1)?;
        let player2 = state.player2.map(Player::try_from).transpose()?;
        Game::reconstitute(
            state.id,
            player1,
            player2,
            state.current_turn,
            state.status,
            state.winner,
        )
    }
}

impl TryFrom<GameState> for Game {
    type Error = GameError;

    fn try_from(state: GameState) -> Result<Self, Self::Error> {
        Game::from_state(state)
    }
}
