#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battleship_arena::{
    init_logging, Coordinate, GameService, GameStatus, InMemoryGameStore, ShotResult, FLEET,
};
#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::{Rng, SeedableRng};
#[cfg(feature = "std")]
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Play a full game between two random shooters and report the winner.
    Sim {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Print the result as a JSON object")]
        json: bool,
    },
}

#[cfg(feature = "std")]
const PLAYERS: [&str; 2] = ["player1", "player2"];

#[cfg(feature = "std")]
async fn simulate(rng: &mut SmallRng) -> anyhow::Result<(String, usize)> {
    let service = GameService::new(InMemoryGameStore::new());
    let game = service.create_game(PLAYERS[0]).await?;
    let game_id = game.id().to_string();
    service.join_game(&game_id, PLAYERS[1]).await?;

    for player in PLAYERS {
        for ship_type in FLEET {
            let game = service.get_game(&game_id).await?;
            let board = game
                .player(player)
                .ok_or_else(|| anyhow::anyhow!("{} missing from game", player))?
                .board();
            let (start, orientation) = board.random_placement(rng, ship_type)?;
            service
                .place_ship(&game_id, player, ship_type.id(), start, orientation)
                .await?;
        }
    }

    let mut shots = 0;
    loop {
        let game = service.get_game(&game_id).await?;
        if let Some(winner) = game.winner() {
            return Ok((winner.to_string(), shots));
        }
        if game.status() != GameStatus::Active {
            anyhow::bail!("game stalled in {:?}", game.status());
        }
        let shooter = game.current_turn().to_string();
        let target_board = game
            .opponent_of(&shooter)
            .ok_or_else(|| anyhow::anyhow!("no opponent for {}", shooter))?
            .board();
        let open: Vec<Coordinate> = (0..target_board.height())
            .flat_map(|y| (0..target_board.width()).map(move |x| Coordinate::at(x, y)))
            .filter(|c| !target_board.is_shot_at(*c))
            .collect();
        let target = open[rng.random_range(0..open.len())];
        let (result, _) = service.make_move(&game_id, &shooter, target).await?;
        shots += 1;
        if result == ShotResult::Sunk {
            log::info!("{} sank a ship at {}", shooter, target);
        }
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sim { seed, json } => {
            let mut rng = if let Some(s) = seed {
                SmallRng::seed_from_u64(s)
            } else {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            };
            let (winner, shots) = simulate(&mut rng).await?;
            if json {
                let result = json!({ "winner": winner, "shots": shots });
                println!("{}", serde_json::to_string(&result)?);
            } else {
                println!("{} wins after {} shots", winner, shots);
            }
        }
    }
    Ok(())
}
