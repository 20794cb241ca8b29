use gsp_config::Context;
use gsp_map::{DynamicObstacleIndex, MapOracle};
use gsp_moves::{AdminMove, PlayerMove};
use gsp_prng::DeterministicRng;
use gsp_store::domain::entities::Location;
use gsp_store::Store;
use tracing::{debug, info};

/// Runs one block through every phase, in the fixed order the consensus
/// rules require. Each phase mutates `store` in place through checked-out
/// handles; `rng` is the single per-block stream, advanced strictly in
/// this order, and `map` is read-only for the whole block.
pub fn run_block(
    store: &Store,
    ctx: &Context,
    map: &dyn MapOracle,
    rng: &mut DeterministicRng,
    admin: &[AdminMove],
    moves: &[PlayerMove],
) {
    info!(height = ctx.height, "running block");

    let min_height = ctx.height.saturating_sub(ctx.config.damage_list_window);
    store.prune_damage_list(min_height);

    let dead = gsp_combat::deal_combat_damage(store, ctx, rng);
    gsp_combat::attribute_fame(store, ctx, &dead);
    gsp_combat::process_kills(store, ctx, map, rng, &dead);
    gsp_combat::regenerate_hp(store, ctx);

    gsp_ops::process_ongoing_operations(store, ctx, map, rng);

    let mut obstacles = build_obstacle_index(store);

    gsp_moves::process_admin_and_player_moves(store, ctx, map, admin, moves);

    gsp_mining::process_mining(store, ctx, map, rng);

    gsp_movement::process_movement(store, ctx, map, &mut obstacles);

    process_building_entries(store);

    gsp_combat::find_combat_targets(store, ctx, map, rng);

    #[cfg(debug_assertions)]
    crate::validate::check_invariants(store, ctx);

    debug!(height = ctx.height, killed = dead.len(), "block finished");
}

/// Scans the store for the two kinds of dynamic obstacle: vehicles
/// sitting on the map and building footprints. Rebuilt fresh each block
/// rather than carried over, since kill processing and the HP phase can
/// have removed rows since the last block ran.
fn build_obstacle_index(store: &Store) -> DynamicObstacleIndex {
    let mut index = DynamicObstacleIndex::new();
    for id in store.character_ids() {
        let Some(character) = store.checkout_character(id) else { continue };
        if let Location::Map(coord) = character.location {
            index.add_vehicle(coord, character.faction);
        }
    }
    for id in store.building_ids() {
        let Some(building) = store.checkout_building(id) else { continue };
        index.add_building(building.centre);
    }
    index
}

/// Moves every character with a pending `enter_building_id` into the
/// building, provided it still exists, accepts the character's faction,
/// isn't still a bare foundation, and the character is actually standing
/// on its centre tile. The attempt is consumed whether or not it
/// succeeds — a rejected entry must be resubmitted next block.
fn process_building_entries(store: &Store) {
    let mut character_ids = store.character_ids();
    character_ids.sort();

    for id in character_ids {
        let Some(mut character) = store.checkout_character(id) else { continue };
        let Some(building_id) = character.enter_building_id.take() else { continue };
        let Location::Map(coord) = character.location else { continue };
        let Some(building) = store.checkout_building(building_id) else { continue };

        let faction_ok = building.is_ancient() || building.faction == character.faction;
        if faction_ok && !building.is_foundation && coord == building.centre {
            character.location = Location::Building(building_id);
            character.is_moving = false;
            character.movement.waypoints.clear();
            character.movement.steps.clear();
        }
    }
}
