use crate::process_mining;
use gsp_config::{Chain, Context, RoConfig};
use gsp_hexgrid::Coord;
use gsp_map::GridMapOracle;
use gsp_prng::DeterministicRng;
use gsp_store::domain::common::{CombatData, Inventory, MiningData, MovementData, RegenData};
use gsp_store::domain::entities::{Character, Location, ProspectionResult, Region};
use gsp_store::Store;
use shared_types::{AccountName, CharacterId, Faction, RegionId};
use std::sync::Arc;

fn test_context(height: u64) -> Context {
    Context::new(Chain::Regtest, height, 0, Arc::new(RoConfig::test_fixture()))
}

fn test_map() -> GridMapOracle {
    let mut map = GridMapOracle::new();
    map.fill_disc(Coord::new(0, 0), 5, 10);
    map.set_region(Coord::new(0, 0), RegionId(1));
    map
}

fn mining_character(id: u64) -> Character {
    Character {
        id: CharacterId(id),
        owner: AccountName("alice".to_string()),
        faction: Faction::Red,
        location: Location::Map(Coord::new(0, 0)),
        enter_building_id: None,
        busy_blocks: 0,
        ongoing_op_id: None,
        is_moving: false,
        is_mining: true,
        attack_range: 4,
        can_regen: true,
        hp: 500,
        max_hp: 1000,
        regen: RegenData::default(),
        vehicle_type: "basic_tank".to_string(),
        fitments: Vec::new(),
        attacks: vec!["autocannon".to_string()],
        self_destruct: None,
        movement: MovementData::default(),
        combat: CombatData::default(),
        mining: MiningData { active: true },
        speed: 10,
        cargo_space: 100,
        inventory: Inventory::new(),
    }
}

#[test]
fn mining_character_depletes_region_into_inventory() {
    let store = Store::new();
    let ctx = test_context(10);
    let map = test_map();
    let mut rng = DeterministicRng::from_bytes(b"mining-test");

    store.insert_character(mining_character(1));
    store.insert_region(Region {
        id: RegionId(1),
        modified_height: 9,
        resource_left: 50,
        prospecting_character: None,
        prospection_result: Some(ProspectionResult { resource_name: "gold".to_string(), height: 9 }),
    });

    process_mining(&store, &ctx, &map, &mut rng);

    let character = store.checkout_character(CharacterId(1)).unwrap();
    let region = store.checkout_region(RegionId(1)).unwrap();
    let mined = character.inventory.quantity("gold");
    assert!(mined >= ctx.config.mining_rate.min && mined <= ctx.config.mining_rate.max);
    assert_eq!(region.resource_left, 50 - mined);
}

#[test]
fn non_mining_character_is_skipped() {
    let store = Store::new();
    let ctx = test_context(10);
    let map = test_map();
    let mut rng = DeterministicRng::from_bytes(b"mining-test");

    let mut character = mining_character(1);
    character.is_mining = false;
    store.insert_character(character);
    store.insert_region(Region {
        id: RegionId(1),
        modified_height: 9,
        resource_left: 50,
        prospecting_character: None,
        prospection_result: Some(ProspectionResult { resource_name: "gold".to_string(), height: 9 }),
    });

    process_mining(&store, &ctx, &map, &mut rng);

    let region = store.checkout_region(RegionId(1)).unwrap();
    assert_eq!(region.resource_left, 50);
}

#[test]
fn mining_stops_when_region_has_no_prospection_result() {
    let store = Store::new();
    let ctx = test_context(10);
    let map = test_map();
    let mut rng = DeterministicRng::from_bytes(b"mining-test");

    store.insert_character(mining_character(1));
    store.insert_region(Region {
        id: RegionId(1),
        modified_height: 0,
        resource_left: 0,
        prospecting_character: None,
        prospection_result: None,
    });

    process_mining(&store, &ctx, &map, &mut rng);

    let character = store.checkout_character(CharacterId(1)).unwrap();
    assert_eq!(character.inventory.quantity("gold"), 0);
}

#[test]
fn mining_caps_by_remaining_cargo_space() {
    let store = Store::new();
    let ctx = test_context(10);
    let map = test_map();
    let mut rng = DeterministicRng::from_bytes(b"mining-test");

    let mut character = mining_character(1);
    character.cargo_space = 2;
    store.insert_character(character);
    store.insert_region(Region {
        id: RegionId(1),
        modified_height: 9,
        resource_left: 1000,
        prospecting_character: None,
        prospection_result: Some(ProspectionResult { resource_name: "gold".to_string(), height: 9 }),
    });

    process_mining(&store, &ctx, &map, &mut rng);

    let character = store.checkout_character(CharacterId(1)).unwrap();
    assert!(character.inventory.quantity("gold") <= 2);
}
