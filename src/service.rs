#![cfg(feature = "std")]

//! Load, mutate and save orchestration on top of a [`GameStore`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use log::warn;

use crate::common::{GameError, ShotResult};
use crate::coordinate::Coordinate;
use crate::game::{Game, GameId};
use crate::ship::{Orientation, ShipType};
use crate::store::GameStore;
use crate::view::{project, GameView};

/// Entry point for transports. Mutations of one game are serialized; games
/// are otherwise independent.
pub struct GameService<S: GameStore> {
    store: S,
    locks: Mutex<HashMap<GameId, Arc<tokio::sync::Mutex<()>>>>,
}

impl<S: GameStore> GameService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn lock_for(&self, game_id: &str) -> anyhow::Result<Arc<tokio::sync::Mutex<()>>> {
        let mut locks = self.locks.lock().map_err(|_| anyhow!("lock table poisoned"))?;
        Ok(locks.entry(game_id.to_string()).or_default().clone())
    }

    fn forget_lock(&self, game_id: &str) -> anyhow::Result<()> {
        self.locks
            .lock()
            .map_err(|_| anyhow!("lock table poisoned"))?
            .remove(game_id);
        Ok(())
    }

    async fn load(&self, game_id: &str) -> anyhow::Result<Game> {
        self.store
            .find_by_id(game_id)
            .await?
            .ok_or_else(|| GameError::GameNotFound(game_id.to_string()).into())
    }

    /// Run `op` against the stored game under its lock and save the result.
    /// A failed `op` saves nothing.
    async fn mutate<T, F>(&self, game_id: &str, op: F) -> anyhow::Result<(T, Game)>
    where
        F: FnOnce(&mut Game) -> Result<T, GameError> + Send,
        T: Send,
    {
        // unknown ids must not leave entries behind in the lock table
        self.load(game_id).await?;
        let lock = self.lock_for(game_id)?;
        let _guard = lock.lock().await;
        let mut game = match self.store.find_by_id(game_id).await? {
            Some(game) => game,
            None => {
                self.forget_lock(game_id)?;
                return Err(GameError::GameNotFound(game_id.to_string()).into());
            }
        };
        let out = match op(&mut game) {
            Ok(out) => out,
            Err(e) => {
                warn!("game {}: rejected: {}", game_id, e);
                return Err(e.into());
            }
        };
        let saved = self.store.save(&game).await?;
        Ok((out, saved))
    }

    pub async fn create_game(&self, player_id: &str) -> anyhow::Result<Game> {
        let game = Game::create(player_id);
        self.store.save(&game).await
    }

    pub async fn join_game(&self, game_id: &str, player_id: &str) -> anyhow::Result<Game> {
        let ((), game) = self.mutate(game_id, |g| g.join(player_id)).await?;
        Ok(game)
    }

    /// Place a ship named by its (case-insensitive) type identifier.
    pub async fn place_ship(
        &self,
        game_id: &str,
        player_id: &str,
        ship_type: &str,
        start: Coordinate,
        orientation: Orientation,
    ) -> anyhow::Result<Game> {
        let ship_type = ShipType::from_id(ship_type)?;
        let ((), game) = self
            .mutate(game_id, |g| g.place_ship(player_id, ship_type, start, orientation))
            .await?;
        Ok(game)
    }

    /// Fire for `player_id`, returning the shot result for notifications.
    pub async fn make_move(
        &self,
        game_id: &str,
        player_id: &str,
        target: Coordinate,
    ) -> anyhow::Result<(ShotResult, Game)> {
        self.mutate(game_id, |g| g.fire(player_id, target)).await
    }

    pub async fn get_game(&self, game_id: &str) -> anyhow::Result<Game> {
        self.load(game_id).await
    }

    /// Load a game and project it for `viewer_id`.
    pub async fn view_game(&self, game_id: &str, viewer_id: &str) -> anyhow::Result<GameView> {
        let game = self.load(game_id).await?;
        Ok(project(&game, viewer_id)?)
    }

    pub async fn list_games(&self, player_id: &str) -> anyhow::Result<Vec<Game>> {
        self.store.list_by_player(player_id).await
    }

    pub async fn hide_game(&self, game_id: &str, player_id: &str) -> anyhow::Result<()> {
        self.store.hide_game(game_id, player_id).await
    }

    pub async fn delete_game(&self, game_id: &str) -> anyhow::Result<()> {
        if self.store.find_by_id(game_id).await?.is_none() {
            return Ok(());
        }
        let lock = self.lock_for(game_id)?;
        let _guard = lock.lock().await;
        self.store.delete(game_id).await?;
        self.forget_lock(game_id)
    }
}
