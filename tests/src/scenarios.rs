use gsp_config::{Chain, RoConfig};
use gsp_core::{get_state_as_json, query_state, update_state, StateQuery};
use gsp_hexgrid::{region_key_for, Coord};
use gsp_map::GridMapOracle;
use gsp_prng::DeterministicRng;
use gsp_store::domain::entities::{ProspectionResult, Region};
use gsp_store::domain::{CombatData, Inventory, MiningData, MovementData, RegenData};
use gsp_store::domain::entities::{Character, Location};
use gsp_store::Store;
use shared_types::{AccountName, CharacterId, Faction, RegionId};
use std::sync::Arc;

fn straight_line_map() -> GridMapOracle {
    let mut map = GridMapOracle::new();
    for x in -1..=5 {
        map.add_tile(Coord::new(x, 0), 10);
    }
    map
}

fn mining_character(owner: &str, coord: Coord) -> Character {
    Character {
        id: CharacterId(1),
        owner: AccountName(owner.to_string()),
        faction: Faction::Red,
        location: Location::Map(coord),
        enter_building_id: None,
        busy_blocks: 0,
        ongoing_op_id: None,
        is_moving: false,
        is_mining: true,
        attack_range: 4,
        can_regen: true,
        hp: 1000,
        max_hp: 1000,
        regen: RegenData::default(),
        vehicle_type: "basic_tank".to_string(),
        fitments: Vec::new(),
        attacks: Vec::new(),
        self_destruct: None,
        movement: MovementData::default(),
        combat: CombatData::default(),
        mining: MiningData { active: true },
        speed: 10,
        cargo_space: 100,
        inventory: Inventory::new(),
    }
}

/// A freshly registered account can spawn a vehicle and walk it toward
/// a waypoint over successive blocks, with every step going through
/// the full block-application surface rather than `gsp-movement`
/// directly.
#[test]
fn account_registers_spawns_a_vehicle_and_walks_it_toward_a_waypoint() {
    let store = Store::new();
    let map = straight_line_map();
    let config = Arc::new(RoConfig::test_fixture());
    let mut rng = DeterministicRng::from_bytes(b"scenario-spawn-and-walk");

    let setup_block = r#"{
        "block": {"height": 1, "timestamp": 0},
        "moves": [
            {"name": "alice", "move": {"register_account": {"faction": "red"}}},
            {"name": "alice", "move": {"create_character": {"vehicle_type": "basic_tank"}}}
        ]
    }"#;
    update_state(&store, config.clone(), Chain::Regtest, &map, &mut rng, setup_block).unwrap();

    let character = store.checkout_character(CharacterId(1)).unwrap();
    assert_eq!(character.location, Location::Map(Coord::new(0, 0)));
    drop(character);

    let waypoint_block = r#"{
        "block": {"height": 2, "timestamp": 0},
        "moves": [
            {"name": "alice", "move": {"set_waypoints": {"character_id": 1, "waypoints": [{"x": 3, "y": 0}]}}}
        ]
    }"#;
    update_state(&store, config.clone(), Chain::Regtest, &map, &mut rng, waypoint_block).unwrap();

    let moved_once = store.checkout_character(CharacterId(1)).unwrap();
    assert_eq!(moved_once.location, Location::Map(Coord::new(1, 0)));
    drop(moved_once);

    let empty_block = r#"{"block": {"height": 3, "timestamp": 0}}"#;
    update_state(&store, config.clone(), Chain::Regtest, &map, &mut rng, empty_block).unwrap();
    update_state(&store, config, Chain::Regtest, &map, &mut rng, empty_block).unwrap();

    let arrived = store.checkout_character(CharacterId(1)).unwrap();
    assert_eq!(arrived.location, Location::Map(Coord::new(3, 0)));
    assert!(!arrived.is_moving);
}

/// Mining draws the configured resource out of a prospected region and
/// into a miner's cargo hold, across a whole block of pipeline phases
/// rather than a direct call into `gsp-mining`.
#[test]
fn mining_drains_a_prospected_region_through_the_full_pipeline() {
    let store = Store::new();
    let map = straight_line_map();
    let config = Arc::new(RoConfig::test_fixture());
    let mut rng = DeterministicRng::from_bytes(b"scenario-mining");

    let coord = Coord::new(2, 0);
    let region_id = RegionId(region_key_for(coord));
    store.insert_account(gsp_store::domain::entities::Account::new(AccountName("bob".to_string()), Faction::Red));
    store.insert_character(mining_character("bob", coord));
    store.insert_region(Region {
        id: region_id,
        modified_height: 0,
        resource_left: 500,
        prospecting_character: None,
        prospection_result: Some(ProspectionResult { resource_name: "ore".to_string(), height: 0 }),
    });

    let block = r#"{"block": {"height": 1, "timestamp": 0}}"#;
    update_state(&store, config, Chain::Regtest, &map, &mut rng, block).unwrap();

    let region = store.checkout_region(region_id).unwrap();
    assert!(region.resource_left < 500);
    drop(region);

    let character = store.checkout_character(CharacterId(1)).unwrap();
    assert!(character.inventory.quantity("ore") > 0);
}

/// `get_state_as_json` and `query_state` must agree: a row visible in
/// the full snapshot must be independently fetchable by its own query.
#[test]
fn full_snapshot_and_point_query_agree_after_a_block() {
    let store = Store::new();
    let map = straight_line_map();
    let config = Arc::new(RoConfig::test_fixture());
    let mut rng = DeterministicRng::from_bytes(b"scenario-snapshot");

    let block = r#"{
        "block": {"height": 1, "timestamp": 0},
        "moves": [
            {"name": "carol", "move": {"register_account": {"faction": "blue"}}},
            {"name": "carol", "move": {"create_character": {"vehicle_type": "basic_tank"}}}
        ]
    }"#;
    update_state(&store, config, Chain::Regtest, &map, &mut rng, block).unwrap();

    let snapshot = get_state_as_json(&store);
    let accounts = snapshot["accounts"].as_array().unwrap();
    assert_eq!(accounts.len(), 1);

    let queried = query_state(&store, StateQuery::AccountByName("carol".to_string())).unwrap();
    assert_eq!(queried, accounts[0]);

    let character = query_state(&store, StateQuery::CharacterById(1)).unwrap();
    assert_eq!(character["owner"]["0"], serde_json::json!("carol"));

    assert!(query_state(&store, StateQuery::CharacterById(999)).is_none());
}
