use battleship_arena::{
    ship_type_by_id, BoardError, Coordinate, ErrorKind, GameError, Ship, ShipType, FLEET,
    FLEET_SIZE,
};

#[test]
fn test_catalog_lengths() {
    let lengths: Vec<(&str, usize)> = FLEET.iter().map(|t| (t.id(), t.length())).collect();
    assert_eq!(
        lengths,
        vec![
            ("Carrier", 5),
            ("Battleship", 4),
            ("Cruiser", 3),
            ("Submarine", 3),
            ("Destroyer", 2),
        ]
    );
    assert_eq!(FLEET.len(), FLEET_SIZE);
}

#[test]
fn test_lookup_is_case_insensitive() {
    assert_eq!(ShipType::from_id("carrier").unwrap(), ShipType::Carrier);
    assert_eq!(ShipType::from_id("SUBMARINE").unwrap(), ShipType::Submarine);
    assert_eq!("dEsTrOyEr".parse::<ShipType>().unwrap(), ShipType::Destroyer);
    assert_eq!(ship_type_by_id("Frigate"), None);

    let err = ShipType::from_id("Frigate").unwrap_err();
    assert_eq!(err, GameError::UnknownShipType("Frigate".to_string()));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_new_ship_validates_cells() {
    let cells = vec![Coordinate::at(0, 0), Coordinate::at(1, 0)];
    let ship = Ship::new(ShipType::Destroyer, cells.clone()).unwrap();
    assert_eq!(ship.id(), "Destroyer");
    assert_eq!(ship.size(), 2);
    assert_eq!(ship.health(), 2);
    assert!(!ship.is_sunk());
    assert_eq!(ship.cells(), cells.as_slice());
    assert!(ship.contains(Coordinate::at(1, 0)));
    assert!(!ship.contains(Coordinate::at(2, 0)));

    assert_eq!(
        Ship::new(ShipType::Cruiser, cells).unwrap_err(),
        BoardError::InvalidShip
    );
    let repeated = vec![Coordinate::at(0, 0), Coordinate::at(0, 0)];
    assert_eq!(
        Ship::new(ShipType::Destroyer, repeated).unwrap_err(),
        BoardError::InvalidShip
    );
}
