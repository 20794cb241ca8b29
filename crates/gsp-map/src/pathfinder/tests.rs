use super::*;
use crate::grid_oracle::GridMapOracle;

#[test]
fn straight_line_on_open_disc() {
    let mut map = GridMapOracle::new();
    map.fill_disc(Coord::new(0, 0), 5, 10);
    let path = find_path(&map, Faction::Red, Coord::new(0, 0), Coord::new(3, 0), 1000).unwrap();
    assert_eq!(path.first().copied(), Some(Coord::new(0, 0)));
    assert_eq!(path.last().copied(), Some(Coord::new(3, 0)));
    // every consecutive pair must be adjacent
    for w in path.windows(2) {
        assert_eq!(w[0].distance(w[1]), 1);
    }
}

#[test]
fn source_equals_target_is_trivially_reachable() {
    let mut map = GridMapOracle::new();
    map.fill_disc(Coord::new(0, 0), 2, 10);
    let path = find_path(&map, Faction::Red, Coord::new(1, 1), Coord::new(1, 1), 100).unwrap();
    assert_eq!(path, vec![Coord::new(1, 1)]);
}

#[test]
fn unreachable_target_off_map_fails() {
    let mut map = GridMapOracle::new();
    map.fill_disc(Coord::new(0, 0), 2, 10);
    let path = find_path(&map, Faction::Red, Coord::new(0, 0), Coord::new(50, 50), 1000);
    assert!(path.is_none());
}

#[test]
fn node_budget_exhausted_fails_cleanly() {
    let mut map = GridMapOracle::new();
    map.fill_disc(Coord::new(0, 0), 20, 10);
    let path = find_path(&map, Faction::Red, Coord::new(-20, -20), Coord::new(20, 20), 3);
    assert!(path.is_none());
}

#[test]
fn starter_zone_reroutes_around_blocked_faction() {
    let mut map = GridMapOracle::new();
    map.fill_disc(Coord::new(0, 0), 3, 10);
    let blocked = Coord::new(1, 0);
    map.set_starter_zone(blocked, Faction::Green);
    let path = find_path(&map, Faction::Red, Coord::new(0, 0), Coord::new(2, 0), 1000).unwrap();
    assert!(!path.contains(&blocked));
}
