use super::*;
use gsp_config::{Chain, RoConfig};
use gsp_hexgrid::Coord;
use gsp_store::domain::common::{CombatData, Inventory, MiningData, MovementData, RegenData};
use gsp_store::domain::entities::{Account, Character};
use std::panic;
use std::sync::Arc;

fn test_context() -> Context {
    Context::new(Chain::Regtest, 1, 0, Arc::new(RoConfig::test_fixture()))
}

fn character_at(id: u64, owner: &str, faction: shared_types::Faction, coord: Coord) -> Character {
    Character {
        id: shared_types::CharacterId(id),
        owner: AccountName(owner.to_string()),
        faction,
        location: Location::Map(coord),
        enter_building_id: None,
        busy_blocks: 0,
        ongoing_op_id: None,
        is_moving: false,
        is_mining: false,
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
        mining: MiningData { active: false },
        speed: 10,
        cargo_space: 100,
        inventory: Inventory::new(),
    }
}

#[test]
fn consistent_store_passes_without_panicking() {
    let store = Store::new();
    let ctx = test_context();
    store.insert_account(Account::new(AccountName("alice".to_string()), shared_types::Faction::Red));
    store.insert_character(character_at(1, "alice", shared_types::Faction::Red, Coord::new(0, 0)));

    check_invariants(&store, &ctx);
}

#[test]
fn character_faction_must_match_owner_faction() {
    let store = Store::new();
    let ctx = test_context();
    store.insert_account(Account::new(AccountName("alice".to_string()), shared_types::Faction::Red));
    store.insert_character(character_at(1, "alice", shared_types::Faction::Blue, Coord::new(0, 0)));

    let result = panic::catch_unwind(panic::AssertUnwindSafe(|| check_invariants(&store, &ctx)));
    assert!(result.is_err());
}

#[test]
fn per_owner_character_count_over_the_configured_limit_panics() {
    let store = Store::new();
    let ctx = test_context();
    store.insert_account(Account::new(AccountName("alice".to_string()), shared_types::Faction::Red));
    for i in 0..ctx.config.character_limit_per_account + 1 {
        store.insert_character(character_at(
            u64::from(i) + 1,
            "alice",
            shared_types::Faction::Red,
            Coord::new(i as i32, 0),
        ));
    }

    let result = panic::catch_unwind(panic::AssertUnwindSafe(|| check_invariants(&store, &ctx)));
    assert!(result.is_err());
}

#[test]
fn busy_blocks_without_an_ongoing_op_id_panics() {
    let store = Store::new();
    let ctx = test_context();
    store.insert_account(Account::new(AccountName("alice".to_string()), shared_types::Faction::Red));
    let mut character = character_at(1, "alice", shared_types::Faction::Red, Coord::new(0, 0));
    character.busy_blocks = 3;
    character.ongoing_op_id = None;
    store.insert_character(character);

    let result = panic::catch_unwind(panic::AssertUnwindSafe(|| check_invariants(&store, &ctx)));
    assert!(result.is_err());
}
