//! Kill processing.
//!
//! Runs after fame attribution (which needs the dying rows still in
//! place) and before regeneration. Processes each dead target in
//! `(kind, id)` order — characters (sorting first) before buildings —
//! so the drop rolls two nodes make are always made against the same
//! random-stream position.

use gsp_config::Context;
use gsp_hexgrid::region_key_for;
use gsp_map::MapOracle;
use gsp_prng::DeterministicRng;
use gsp_store::domain::common::Inventory;
use gsp_store::domain::entities::{
    BuildingInventoryRow, GroundLoot, Location, OngoingOpVariant, TradeSide,
};
use gsp_store::Store;
use shared_types::{BuildingId, CharacterId, EntityKind, RegionId, TargetKey};

pub fn process_kills(store: &Store, ctx: &Context, map: &dyn MapOracle, rng: &mut DeterministicRng, dead: &[TargetKey]) {
    let mut dead = dead.to_vec();
    dead.sort();
    dead.dedup();

    for key in dead {
        match key.kind {
            EntityKind::Character => kill_character(store, ctx, map, rng, CharacterId(key.id)),
            EntityKind::Building => kill_building(store, ctx, rng, BuildingId(key.id)),
        }
    }
}

fn region_id_for(map: &dyn MapOracle, coord: gsp_hexgrid::Coord) -> RegionId {
    map.region_id(coord).unwrap_or(RegionId(region_key_for(coord)))
}

fn kill_character(store: &Store, ctx: &Context, map: &dyn MapOracle, rng: &mut DeterministicRng, id: CharacterId) {
    let Some(character) = store.checkout_character(id) else { return };

    // Fighters gathered for combat are always on the open map (§4.9
    // "every fighter ... with a map position"), so a combat kill always
    // has a coordinate to cancel prospection at and drop loot on.
    let Location::Map(coord) = character.location else {
        character.discard();
        return;
    };

    let region_id = region_id_for(map, coord);
    if let Some(mut region) = store.checkout_region(region_id) {
        if region.prospecting_character == Some(id) {
            region.prospecting_character = None;
        }
    }

    let inventory = character.inventory.clone();
    let fitments = character.fitments.clone();
    let ongoing_op_id = character.ongoing_op_id;
    character.discard();

    drop_inventory_fully(store, coord, &inventory);
    for fitment in &fitments {
        if rng.probability_roll(ctx.config.equipped_fitment_drop_percent as u64, 100) {
            drop_item(store, coord, fitment, 1);
        }
    }

    if let Some(op_id) = ongoing_op_id {
        if let Some(op) = store.checkout_ongoing_op(op_id) {
            op.discard();
        }
    }
    store.clear_damage_list_for_victim(TargetKey::character(id));
}

/// Deletes a character that died as a side effect of its containing
/// building's destruction, without further drops — its vehicle,
/// fitments, and inventory were already folded into the building's
/// aggregate drop pile by the caller.
fn destroy_character_inside_building(store: &Store, id: CharacterId) {
    let Some(character) = store.checkout_character(id) else { return };
    let ongoing_op_id = character.ongoing_op_id;
    character.discard();
    if let Some(op_id) = ongoing_op_id {
        if let Some(op) = store.checkout_ongoing_op(op_id) {
            op.discard();
        }
    }
    store.clear_damage_list_for_victim(TargetKey::character(id));
}

fn kill_building(store: &Store, ctx: &Context, rng: &mut DeterministicRng, id: BuildingId) {
    let Some(building) = store.checkout_building(id) else { return };
    let centre = building.centre;
    let construction_inventory = building.construction_inventory.clone();
    let ongoing_construction_id = building.ongoing_construction_id;
    building.discard();

    let mut aggregate = Inventory::new();
    aggregate.merge_from(&construction_inventory);

    for row in store.building_inventories_for(id) {
        aggregate.merge_from(&row.inventory);
        store.set_building_inventory(BuildingInventoryRow {
            building_id: id,
            account: row.account,
            inventory: Inventory::new(),
        });
    }

    let mut inhabitants: Vec<CharacterId> = store
        .character_ids()
        .into_iter()
        .filter(|cid| {
            store
                .checkout_character(*cid)
                .map(|h| h.location == Location::Building(id))
                .unwrap_or(false)
        })
        .collect();
    inhabitants.sort();
    for cid in inhabitants {
        let Some(character) = store.checkout_character(cid) else { continue };
        aggregate.merge_from(&character.inventory);
        aggregate.add(&character.vehicle_type, 1);
        for fitment in &character.fitments {
            aggregate.add(fitment, 1);
        }
        drop(character);
        destroy_character_inside_building(store, cid);
    }

    if let Some(op_id) = ongoing_construction_id {
        if let Some(op) = store.checkout_ongoing_op(op_id) {
            op.discard();
        }
    }

    let mut dangling_ops: Vec<_> = store
        .ongoing_op_ids()
        .into_iter()
        .filter(|op_id| {
            store
                .checkout_ongoing_op(*op_id)
                .map(|h| h.building_id == Some(id))
                .unwrap_or(false)
        })
        .collect();
    dangling_ops.sort();
    for op_id in dangling_ops {
        let Some(op) = store.checkout_ongoing_op(op_id) else { continue };
        match &op.variant {
            OngoingOpVariant::BlueprintCopy { blueprint, copies } => {
                aggregate.add(&format!("{blueprint}_copy"), *copies as u64);
            }
            OngoingOpVariant::ItemConstructionCopies { blueprint, copies } => {
                aggregate.add(blueprint, *copies as u64);
            }
            _ => {}
        }
        op.discard();
    }

    for order in store.trade_orders_for_building(id) {
        match order.side {
            TradeSide::Bid => {
                if let Some(mut account) = store.checkout_account(&order.account) {
                    account.coin_balance = account.coin_balance.saturating_add(order.reserved_amount);
                }
            }
            TradeSide::Ask => {
                aggregate.add(&order.item, order.reserved_amount);
            }
        }
    }
    store.remove_trade_orders_for_building(id);

    let mut ground = store
        .ground_loot_at(centre)
        .unwrap_or(GroundLoot { coord: centre, inventory: Inventory::new() });
    // `Inventory` is a `BTreeMap`, so this iterates in ascending
    // item-name order — keeping the per-item drop rolls deterministic.
    for (item, qty) in aggregate.0.iter() {
        if rng.probability_roll(ctx.config.building_inventory_drop_percent as u64, 100) {
            ground.inventory.add(item, qty.get());
        }
    }
    store.set_ground_loot(ground);
}

fn drop_inventory_fully(store: &Store, coord: gsp_hexgrid::Coord, inventory: &Inventory) {
    let mut ground = store
        .ground_loot_at(coord)
        .unwrap_or(GroundLoot { coord, inventory: Inventory::new() });
    ground.inventory.merge_from(inventory);
    store.set_ground_loot(ground);
}

fn drop_item(store: &Store, coord: gsp_hexgrid::Coord, item: &str, quantity: u64) {
    let mut ground = store
        .ground_loot_at(coord)
        .unwrap_or(GroundLoot { coord, inventory: Inventory::new() });
    ground.inventory.add(item, quantity);
    store.set_ground_loot(ground);
}

#[cfg(test)]
mod tests;
