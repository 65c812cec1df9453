#![cfg(feature = "std")]

//! Game persistence port and an in-memory adapter backed by bincode
//! snapshots.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::anyhow;

use crate::game::{Game, GameId, GameState};
use crate::player::PlayerId;

/// Storage for games. Implementations must round-trip every field of a
/// game exactly.
#[async_trait::async_trait]
pub trait GameStore: Send + Sync {
    /// Insert or replace `game`, returning the stored copy.
    async fn save(&self, game: &Game) -> anyhow::Result<Game>;
    async fn find_by_id(&self, game_id: &str) -> anyhow::Result<Option<Game>>;
    async fn delete(&self, game_id: &str) -> anyhow::Result<()>;
    /// Games `player_id` takes part in and has not hidden, ordered by id.
    async fn list_by_player(&self, player_id: &str) -> anyhow::Result<Vec<Game>>;
    /// Drop the game from `player_id`'s listing without affecting the other
    /// player. Unknown games are ignored.
    async fn hide_game(&self, game_id: &str, player_id: &str) -> anyhow::Result<()>;
}

struct StoredGame {
    bytes: Vec<u8>,
    players: Vec<PlayerId>,
    hidden_for: HashSet<PlayerId>,
}

fn encode(game: &Game) -> anyhow::Result<Vec<u8>> {
    Ok(bincode::serialize(&game.state())?)
}

fn decode(bytes: &[u8]) -> anyhow::Result<Game> {
    let state: GameState = bincode::deserialize(bytes)?;
    Ok(Game::from_state(state)?)
}

fn participants(game: &Game) -> Vec<PlayerId> {
    std::iter::once(game.player1())
        .chain(game.player2())
        .map(|p| p.id().to_string())
        .collect()
}

#[derive(Default)]
pub struct InMemoryGameStore {
    games: Mutex<HashMap<GameId, StoredGame>>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> anyhow::Result<std::sync::MutexGuard<'_, HashMap<GameId, StoredGame>>> {
        self.games.lock().map_err(|_| anyhow!("game store lock poisoned"))
    }
}

#[async_trait::async_trait]
impl GameStore for InMemoryGameStore {
    async fn save(&self, game: &Game) -> anyhow::Result<Game> {
        let bytes = encode(game)?;
        let stored = decode(&bytes)?;
        let mut games = self.lock()?;
        let hidden_for = games
            .remove(game.id())
            .map(|old| old.hidden_for)
            .unwrap_or_default();
        games.insert(
            game.id().to_string(),
            StoredGame {
                bytes,
                players: participants(game),
                hidden_for,
            },
        );
        Ok(stored)
    }

    async fn find_by_id(&self, game_id: &str) -> anyhow::Result<Option<Game>> {
        let games = self.lock()?;
        games.get(game_id).map(|g| decode(&g.bytes)).transpose()
    }

    async fn delete(&self, game_id: &str) -> anyhow::Result<()> {
        self.lock()?.remove(game_id);
        Ok(())
    }

    async fn list_by_player(&self, player_id: &str) -> anyhow::Result<Vec<Game>> {
        let games = self.lock()?;
        let mut ids: Vec<&GameId> = games
            .iter()
            .filter(|(_, g)| {
                g.players.iter().any(|p| p == player_id) && !g.hidden_for.contains(player_id)
            })
            .map(|(id, _)| id)
            .collect();
        ids.sort();
        ids.into_iter().map(|id| decode(&games[id].bytes)).collect()
    }

    async fn hide_game(&self, game_id: &str, player_id: &str) -> anyhow::Result<()> {
        let mut games = self.lock()?;
        if let Some(g) = games.get_mut(game_id) {
            if g.players.iter().any(|p| p == player_id) {
                g.hidden_for.insert(player_id.to_string());
            }
        }
        Ok(())
    }
}
