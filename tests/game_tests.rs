use battleship_arena::{
    BoardError, Coordinate, ErrorKind, Game, GameError, GameStatus, Orientation, ShipType,
    ShotResult, FLEET,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn c(x: u32, y: u32) -> Coordinate {
    Coordinate::at(x, y)
}

fn new_game() -> Game {
    Game::create_with_rng(&mut SmallRng::seed_from_u64(7), "p1")
}

/// p1: Destroyer on row 0 from x=0, then Submarine, Cruiser, Battleship, Carrier on rows 1..4.
fn place_p1_fleet(game: &mut Game) {
    for (row, ship_type) in FLEET.iter().rev().enumerate() {
        game.place_ship("p1", *ship_type, c(0, row as u32), Orientation::Horizontal)
            .unwrap();
    }
}

/// p2: Carrier..Destroyer on rows 0..4 starting at x=5.
fn place_p2_fleet(game: &mut Game) {
    for (row, ship_type) in FLEET.iter().enumerate() {
        game.place_ship("p2", *ship_type, c(5, row as u32), Orientation::Horizontal)
            .unwrap();
    }
}

fn active_game() -> Game {
    let mut game = new_game();
    game.join("p2").unwrap();
    place_p1_fleet(&mut game);
    place_p2_fleet(&mut game);
    game
}

#[test]
fn test_create_waits_for_second_player() {
    let game = new_game();
    assert_eq!(game.status(), GameStatus::WaitingForPlayer);
    assert_eq!(game.current_turn(), "p1");
    assert!(game.player2().is_none());
    assert!(game.winner().is_none());
    assert_eq!(game.player1().board().width(), 10);
    assert_eq!(game.player1().board().height(), 10);
}

#[test]
fn test_create_ids_are_unique_and_uuid_shaped() {
    let mut rng = SmallRng::seed_from_u64(1);
    let a = Game::create_with_rng(&mut rng, "p1");
    let b = Game::create_with_rng(&mut rng, "p1");
    assert_ne!(a.id(), b.id());
    let groups: Vec<usize> = a.id().split('-').map(str::len).collect();
    assert_eq!(groups, vec![8, 4, 4, 4, 12]);
    assert!(a.id().chars().all(|ch| ch == '-' || ch.is_ascii_hexdigit()));
}

#[test]
fn test_join_moves_to_setup_and_rejects_third_player() {
    let mut game = new_game();
    game.join("p2").unwrap();
    assert_eq!(game.status(), GameStatus::Setup);
    assert_eq!(game.player2().unwrap().id(), "p2");

    let before = game.clone();
    assert_eq!(game.join("p3").unwrap_err(), GameError::GameFull);
    assert_eq!(game, before);
}

#[test]
fn test_join_with_creator_id_is_rejected() {
    let mut game = new_game();
    assert_eq!(
        game.join("p1").unwrap_err(),
        GameError::DuplicatePlayer("p1".to_string())
    );
    assert_eq!(game.status(), GameStatus::WaitingForPlayer);
}

#[test]
fn test_creator_may_place_before_opponent_joins() {
    let mut game = new_game();
    place_p1_fleet(&mut game);
    assert_eq!(game.status(), GameStatus::WaitingForPlayer);
    assert!(game.player1().fleet_complete());

    game.join("p2").unwrap();
    place_p2_fleet(&mut game);
    assert_eq!(game.status(), GameStatus::Active);
}

#[test]
fn test_place_ship_rejections_leave_game_unchanged() {
    let mut game = new_game();
    game.join("p2").unwrap();
    game.place_ship("p1", ShipType::Cruiser, c(0, 0), Orientation::Vertical)
        .unwrap();
    let before = game.clone();

    let err = game
        .place_ship("p1", ShipType::Cruiser, c(5, 5), Orientation::Vertical)
        .unwrap_err();
    assert_eq!(err, GameError::DuplicateShipType("Cruiser"));

    let err = game
        .place_ship("p1", ShipType::Carrier, c(0, 1), Orientation::Horizontal)
        .unwrap_err();
    assert_eq!(err, GameError::Board(BoardError::Overlap(c(0, 1))));

    let err = game
        .place_ship("p1", ShipType::Carrier, c(7, 0), Orientation::Horizontal)
        .unwrap_err();
    assert_eq!(err, GameError::Board(BoardError::OutOfBounds(c(10, 0))));
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = game
        .place_ship("p3", ShipType::Carrier, c(0, 5), Orientation::Horizontal)
        .unwrap_err();
    assert_eq!(err, GameError::PlayerNotInGame("p3".to_string()));
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert_eq!(game, before);
}

#[test]
fn test_fleets_complete_activates_with_creator_first() {
    let game = active_game();
    assert_eq!(game.status(), GameStatus::Active);
    assert_eq!(game.current_turn(), "p1");
}

#[test]
fn test_placing_after_activation_is_invalid() {
    let mut game = active_game();
    let err = game
        .place_ship("p1", ShipType::Carrier, c(0, 8), Orientation::Horizontal)
        .unwrap_err();
    assert_eq!(err, GameError::InvalidState);
}

#[test]
fn test_fire_before_active_is_invalid() {
    let mut game = new_game();
    assert_eq!(game.fire("p1", c(0, 0)).unwrap_err(), GameError::InvalidState);
    game.join("p2").unwrap();
    assert_eq!(game.fire("p1", c(0, 0)).unwrap_err(), GameError::InvalidState);
}

#[test]
fn test_scenario_miss_hit_and_duplicate() {
    let mut game = active_game();

    assert_eq!(game.fire("p1", c(0, 0)).unwrap(), ShotResult::Miss);
    assert_eq!(game.current_turn(), "p2");

    assert_eq!(game.fire("p2", c(0, 0)).unwrap(), ShotResult::Hit);
    assert_eq!(game.current_turn(), "p1");
    let destroyer = &game.player1().board().ships()[0];
    assert_eq!(destroyer.ship_type(), ShipType::Destroyer);
    assert_eq!(destroyer.health(), 1);

    assert_eq!(game.fire("p1", c(9, 9)).unwrap(), ShotResult::Miss);
    assert_eq!(game.fire("p2", c(5, 5)).unwrap(), ShotResult::Miss);

    let before = game.clone();
    let err = game.fire("p1", c(9, 9)).unwrap_err();
    assert_eq!(err, GameError::DuplicateShot(c(9, 9)));
    assert_eq!(err.kind(), ErrorKind::State);
    // duplicate keeps the turn
    assert_eq!(game.current_turn(), "p1");
    assert_eq!(game, before);
}

#[test]
fn test_fire_out_of_turn_is_rejected() {
    let mut game = active_game();
    let before = game.clone();
    assert_eq!(game.fire("p2", c(0, 0)).unwrap_err(), GameError::NotYourTurn);
    assert_eq!(game.fire("p9", c(0, 0)).unwrap_err(), GameError::NotYourTurn);
    assert_eq!(game, before);
}

#[test]
fn test_fire_out_of_bounds_keeps_turn() {
    let mut game = active_game();
    let err = game.fire("p1", c(10, 3)).unwrap_err();
    assert_eq!(err, GameError::Board(BoardError::OutOfBounds(c(10, 3))));
    assert_eq!(game.current_turn(), "p1");
    assert!(game.player2().unwrap().board().missed_shots().is_empty());
}

#[test]
fn test_sinking_last_ship_finishes_game() {
    let mut game = active_game();
    let targets: Vec<Coordinate> = game
        .player2()
        .unwrap()
        .board()
        .ships()
        .iter()
        .flat_map(|s| s.cells().to_vec())
        .collect();
    // p1's rows 5..9 are open water
    let mut decoys = (5..10).flat_map(|y| (0..10).map(move |x| c(x, y)));

    let last = targets.len() - 1;
    for (i, target) in targets.iter().enumerate() {
        let result = game.fire("p1", *target).unwrap();
        if i == last {
            assert_eq!(result, ShotResult::Sunk);
            break;
        }
        assert_ne!(result, ShotResult::Miss);
        assert_eq!(game.status(), GameStatus::Active);
        assert_eq!(game.fire("p2", decoys.next().unwrap()).unwrap(), ShotResult::Miss);
    }

    assert_eq!(game.status(), GameStatus::Finished);
    assert_eq!(game.winner(), Some("p1"));
    assert!(game.player2().unwrap().has_lost());
    assert!(!game.player1().has_lost());

    assert_eq!(game.fire("p1", c(0, 9)).unwrap_err(), GameError::InvalidState);
    assert_eq!(game.fire("p2", c(0, 9)).unwrap_err(), GameError::InvalidState);
    assert_eq!(game.join("p3").unwrap_err(), GameError::InvalidState);
    assert_eq!(
        game.place_ship("p1", ShipType::Carrier, c(0, 9), Orientation::Horizontal)
            .unwrap_err(),
        GameError::InvalidState
    );
}

#[test]
fn test_sinking_one_ship_does_not_end_game() {
    let mut game = active_game();
    // p2's Destroyer sits at (5,4)-(6,4)
    assert_eq!(game.fire("p1", c(5, 4)).unwrap(), ShotResult::Hit);
    game.fire("p2", c(9, 9)).unwrap();
    assert_eq!(game.fire("p1", c(6, 4)).unwrap(), ShotResult::Sunk);
    assert_eq!(game.status(), GameStatus::Active);
    assert_eq!(game.current_turn(), "p2");
    assert_eq!(game.player2().unwrap().board().remaining_ships(), 4);
}

#[test]
fn test_player_lookup_helpers() {
    let mut game = new_game();
    assert!(game.opponent_of("p1").is_none());
    game.join("p2").unwrap();
    assert_eq!(game.opponent_of("p1").unwrap().id(), "p2");
    assert_eq!(game.opponent_of("p2").unwrap().id(), "p1");
    assert!(game.opponent_of("p3").is_none());
    assert!(game.is_participant("p2"));
    assert!(!game.is_participant("p3"));
}
