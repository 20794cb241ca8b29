use crate::pipeline::run_block;
use gsp_config::{Chain, Context, GenesisBlock, RoConfig};
use gsp_map::MapOracle;
use gsp_prng::DeterministicRng;
use gsp_store::Store;
use serde_json::{json, Value};
use shared_types::{AccountName, BuildingId, CharacterId, RegionId};
use std::sync::Arc;
use tracing::debug;

/// Idempotent schema setup. The in-memory reference store carries no
/// schema to migrate, so this exists purely to satisfy the host-chain
/// callback contract; calling it against an already-running store, e.g.
/// across a daemon restart, is always safe.
pub fn setup_schema(_store: &Store) {
    debug!("setup_schema called");
}

/// The `(height, hash_hex)` pair `chain`'s state starts from.
pub fn initial_state_block(chain: Chain) -> GenesisBlock {
    chain.initial_state_block()
}

/// Seeds a freshly created store with genesis content. The in-memory
/// adapter starts empty; base-map tile seeding and genesis account
/// grants are host-daemon concerns.
pub fn initialise_state(_store: &Store, _chain: Chain) {}

/// Parses one block's JSON payload and applies it to `store`.
pub fn update_state(
    store: &Store,
    config: Arc<RoConfig>,
    chain: Chain,
    map: &dyn MapOracle,
    rng: &mut DeterministicRng,
    block_json: &str,
) -> anyhow::Result<()> {
    let input = gsp_moves::parse_block_input(block_json)?;
    let ctx = Context::new(chain, input.block.height, input.block.timestamp, config);
    run_block(store, &ctx, map, rng, &input.admin, &input.moves);
    Ok(())
}

/// A full, JSON-serialized snapshot of every table in `store`. Meant for
/// debugging and archival, not for consensus-critical reads — those go
/// through `query_state` instead.
pub fn get_state_as_json(store: &Store) -> Value {
    let accounts: Vec<Value> = store
        .account_names()
        .into_iter()
        .filter_map(|name| store.checkout_account(&name))
        .map(|handle| serde_json::to_value(&*handle).expect("Account always serializes"))
        .collect();

    let mut character_ids = store.character_ids();
    character_ids.sort();
    let characters: Vec<Value> = character_ids
        .into_iter()
        .filter_map(|id| store.checkout_character(id))
        .map(|handle| serde_json::to_value(&*handle).expect("Character always serializes"))
        .collect();

    let mut building_ids = store.building_ids();
    building_ids.sort();
    let buildings: Vec<Value> = building_ids
        .into_iter()
        .filter_map(|id| store.checkout_building(id))
        .map(|handle| serde_json::to_value(&*handle).expect("Building always serializes"))
        .collect();

    let mut region_ids = store.region_ids();
    region_ids.sort();
    let regions: Vec<Value> = region_ids
        .into_iter()
        .filter_map(|id| store.checkout_region(id))
        .map(|handle| serde_json::to_value(&*handle).expect("Region always serializes"))
        .collect();

    let ground_loot: Vec<Value> = store
        .ground_loot_coords()
        .into_iter()
        .filter_map(|coord| store.ground_loot_at(coord))
        .map(|loot| serde_json::to_value(&loot).expect("GroundLoot always serializes"))
        .collect();

    json!({
        "accounts": accounts,
        "characters": characters,
        "buildings": buildings,
        "regions": regions,
        "ground_loot": ground_loot,
    })
}

/// A small, explicit set of supported snapshot queries, matched
/// exhaustively like every other tagged union in the engine rather than
/// accepting a free-form query string.
#[derive(Debug, Clone)]
pub enum StateQuery {
    AccountByName(String),
    CharacterById(u64),
    RegionById(u64),
    BuildingById(u64),
}

/// Answers one ad-hoc query against the current state without
/// committing any change (the checked-out handle is dropped unchanged
/// once read).
pub fn query_state(store: &Store, query: StateQuery) -> Option<Value> {
    match query {
        StateQuery::AccountByName(name) => {
            let handle = store.checkout_account(&AccountName(name))?;
            Some(serde_json::to_value(&*handle).expect("Account always serializes"))
        }
        StateQuery::CharacterById(id) => {
            let handle = store.checkout_character(CharacterId(id))?;
            Some(serde_json::to_value(&*handle).expect("Character always serializes"))
        }
        StateQuery::RegionById(id) => {
            let handle = store.checkout_region(RegionId(id))?;
            Some(serde_json::to_value(&*handle).expect("Region always serializes"))
        }
        StateQuery::BuildingById(id) => {
            let handle = store.checkout_building(BuildingId(id))?;
            Some(serde_json::to_value(&*handle).expect("Building always serializes"))
        }
    }
}

#[cfg(test)]
mod tests;
