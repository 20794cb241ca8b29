use super::*;
use gsp_config::RoConfig;
use gsp_hexgrid::Coord;
use gsp_map::GridMapOracle;
use gsp_store::domain::entities::Account;
use shared_types::Faction;

fn test_map() -> GridMapOracle {
    let mut map = GridMapOracle::new();
    map.fill_disc(Coord::new(0, 0), 5, 10);
    map
}

#[test]
fn setup_schema_is_idempotent() {
    let store = Store::new();
    setup_schema(&store);
    setup_schema(&store);
}

#[test]
fn update_state_applies_a_register_account_move() {
    let store = Store::new();
    let map = test_map();
    let mut rng = DeterministicRng::from_bytes(b"host-update-state-test");
    let block = r#"{
        "block": {"height": 1, "timestamp": 0},
        "admin": [],
        "moves": [{"name": "alice", "move": {"register_account": {"faction": "red"}}}]
    }"#;

    update_state(&store, Arc::new(RoConfig::test_fixture()), Chain::Regtest, &map, &mut rng, block).unwrap();

    assert!(store.account_exists(&AccountName("alice".to_string())));
}

#[test]
fn update_state_rejects_unparseable_payloads() {
    let store = Store::new();
    let map = test_map();
    let mut rng = DeterministicRng::from_bytes(b"host-update-state-malformed");

    let result = update_state(&store, Arc::new(RoConfig::test_fixture()), Chain::Regtest, &map, &mut rng, "not json");

    assert!(result.is_err());
}

#[test]
fn get_state_as_json_reports_every_account() {
    let store = Store::new();
    store.insert_account(Account::new(AccountName("alice".to_string()), Faction::Red));
    store.insert_account(Account::new(AccountName("bob".to_string()), Faction::Blue));

    let snapshot = get_state_as_json(&store);
    assert_eq!(snapshot["accounts"].as_array().unwrap().len(), 2);
}

#[test]
fn query_state_finds_an_existing_account_and_misses_an_unknown_one() {
    let store = Store::new();
    store.insert_account(Account::new(AccountName("alice".to_string()), Faction::Red));

    assert!(query_state(&store, StateQuery::AccountByName("alice".to_string())).is_some());
    assert!(query_state(&store, StateQuery::AccountByName("nobody".to_string())).is_none());
}
