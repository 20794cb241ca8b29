use crate::process_ongoing_operations;
use gsp_config::{Chain, Context, RoConfig};
use gsp_hexgrid::Coord;
use gsp_map::GridMapOracle;
use gsp_prng::DeterministicRng;
use gsp_store::domain::common::{CombatData, Inventory, MiningData, MovementData, RegenData};
use gsp_store::domain::entities::{Character, Location, OngoingOp, OngoingOpVariant};
use gsp_store::Store;
use shared_types::{AccountName, CharacterId, Faction, OngoingOpId};
use std::sync::Arc;

fn test_context(height: u64) -> Context {
    Context::new(Chain::Regtest, height, 0, Arc::new(RoConfig::test_fixture()))
}

fn test_map() -> GridMapOracle {
    let mut map = GridMapOracle::new();
    map.fill_disc(Coord::new(0, 0), 5, 10);
    map
}

fn sample_character(id: u64, busy_blocks: u32, op_id: Option<u64>) -> Character {
    Character {
        id: CharacterId(id),
        owner: AccountName("alice".to_string()),
        faction: Faction::Red,
        location: Location::Map(Coord::new(0, 0)),
        enter_building_id: None,
        busy_blocks,
        ongoing_op_id: op_id.map(OngoingOpId),
        is_moving: false,
        is_mining: false,
        attack_range: 4,
        can_regen: true,
        hp: 500,
        max_hp: 1000,
        regen: RegenData::default(),
        vehicle_type: "basic_tank".to_string(),
        fitments: Vec::new(),
        attacks: vec!["autocannon".to_string()],
        self_destruct: Some("self_destruct_charge".to_string()),
        movement: MovementData::default(),
        combat: CombatData::default(),
        mining: MiningData { active: false },
        speed: 10,
        cargo_space: 100,
        inventory: Inventory::new(),
    }
}

#[test]
fn busy_character_counts_down_without_finalising_early() {
    let store = Store::new();
    let ctx = test_context(1);
    let map = test_map();
    let mut rng = DeterministicRng::from_bytes(b"ops-test");

    store.insert_account(gsp_store::domain::entities::Account::new(
        AccountName("alice".to_string()),
        Faction::Red,
    ));
    store.insert_character(sample_character(1, 3, Some(1)));
    store.insert_ongoing_op(OngoingOp {
        id: OngoingOpId(1),
        height_of_next_processing: 4,
        character_id: Some(CharacterId(1)),
        building_id: None,
        variant: OngoingOpVariant::ArmourRepair,
    });

    process_ongoing_operations(&store, &ctx, &map, &mut rng);

    let character = store.checkout_character(CharacterId(1)).unwrap();
    assert_eq!(character.busy_blocks, 2);
    assert!(character.ongoing_op_id.is_some());
    drop(character);
    assert!(store.ongoing_op_exists(OngoingOpId(1)));
}

#[test]
fn armour_repair_finalises_at_zero_busy_blocks() {
    let store = Store::new();
    let ctx = test_context(1);
    let map = test_map();
    let mut rng = DeterministicRng::from_bytes(b"ops-test");

    store.insert_account(gsp_store::domain::entities::Account::new(
        AccountName("alice".to_string()),
        Faction::Red,
    ));
    let mut character = sample_character(1, 1, Some(1));
    character.hp = 100;
    store.insert_character(character);
    store.insert_ongoing_op(OngoingOp {
        id: OngoingOpId(1),
        height_of_next_processing: 1,
        character_id: Some(CharacterId(1)),
        building_id: None,
        variant: OngoingOpVariant::ArmourRepair,
    });

    process_ongoing_operations(&store, &ctx, &map, &mut rng);

    let character = store.checkout_character(CharacterId(1)).unwrap();
    assert_eq!(character.busy_blocks, 0);
    assert!(character.ongoing_op_id.is_none());
    assert_eq!(character.hp, character.max_hp);
    drop(character);
    assert!(!store.ongoing_op_exists(OngoingOpId(1)));
}

#[test]
fn blueprint_copy_finalises_into_account_banked_goods() {
    let store = Store::new();
    let ctx = test_context(1);
    let map = test_map();
    let mut rng = DeterministicRng::from_bytes(b"ops-test");

    store.insert_account(gsp_store::domain::entities::Account::new(
        AccountName("alice".to_string()),
        Faction::Red,
    ));
    store.insert_character(sample_character(1, 1, Some(1)));
    store.insert_ongoing_op(OngoingOp {
        id: OngoingOpId(1),
        height_of_next_processing: 1,
        character_id: Some(CharacterId(1)),
        building_id: None,
        variant: OngoingOpVariant::BlueprintCopy { blueprint: "widget".to_string(), copies: 2 },
    });

    process_ongoing_operations(&store, &ctx, &map, &mut rng);

    let account = store.checkout_account(&AccountName("alice".to_string())).unwrap();
    assert_eq!(account.banked_goods.quantity("widget"), 1);
    assert_eq!(account.banked_goods.quantity("widget_copy"), 2);
}

#[test]
fn character_less_building_config_update_waits_for_its_height() {
    let store = Store::new();
    let map = test_map();

    store.insert_building(gsp_store::domain::entities::Building {
        id: shared_types::BuildingId(1),
        building_type: "outpost".to_string(),
        owner: Some(AccountName("alice".to_string())),
        faction: Faction::Red,
        centre: Coord::new(0, 0),
        hp: 5000,
        max_hp: 5000,
        regen: RegenData::default(),
        can_regen: true,
        attack_range: 6,
        combat: CombatData::default(),
        attacks: vec!["autocannon".to_string()],
        self_destruct: None,
        is_foundation: false,
        construction_inventory: Inventory::new(),
        rotation: 0,
        ongoing_construction_id: None,
        config: String::new(),
    });
    store.insert_ongoing_op(OngoingOp {
        id: OngoingOpId(1),
        height_of_next_processing: 5,
        character_id: None,
        building_id: Some(shared_types::BuildingId(1)),
        variant: OngoingOpVariant::BuildingConfigUpdate { new_config: "max_speed=2".to_string() },
    });

    let mut rng = DeterministicRng::from_bytes(b"ops-test");
    process_ongoing_operations(&store, &test_context(2), &map, &mut rng);
    assert!(store.ongoing_op_exists(OngoingOpId(1)));
    let building = store.checkout_building(shared_types::BuildingId(1)).unwrap();
    assert_eq!(building.config, "");
    drop(building);

    process_ongoing_operations(&store, &test_context(5), &map, &mut rng);
    assert!(!store.ongoing_op_exists(OngoingOpId(1)));
    let building = store.checkout_building(shared_types::BuildingId(1)).unwrap();
    assert_eq!(building.config, "max_speed=2");
}

#[test]
#[should_panic(expected = "dangling ongoing-operation reference")]
fn dangling_ongoing_op_reference_is_a_fatal_invariant_failure() {
    let store = Store::new();
    let ctx = test_context(1);
    let map = test_map();
    let mut rng = DeterministicRng::from_bytes(b"ops-test");

    store.insert_character(sample_character(1, 1, Some(99)));
    process_ongoing_operations(&store, &ctx, &map, &mut rng);
}
