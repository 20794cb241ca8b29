//! # Mining processor
//!
//! For each character actively mining in a region that has already
//! finished prospecting and still has resource left, draws a random
//! per-block yield, caps it by remaining cargo space and remaining
//! regional resource, and moves it from the region into the
//! character's inventory. Iteration is by character id ascending so
//! two characters competing for the tail end of a depleting region
//! always split it the same way on every node.

use gsp_config::Context;
use gsp_hexgrid::region_key_for;
use gsp_map::MapOracle;
use gsp_prng::DeterministicRng;
use gsp_store::domain::entities::Location;
use gsp_store::Store;
use shared_types::RegionId;

/// Runs the mining phase for one block.
pub fn process_mining(store: &Store, ctx: &Context, map: &dyn MapOracle, rng: &mut DeterministicRng) {
    let mut character_ids = store.character_ids();
    character_ids.sort();

    for id in character_ids {
        let Some(mut character) = store.checkout_character(id) else { continue };
        if !character.is_mining {
            continue;
        }
        let Location::Map(coord) = character.location else {
            continue;
        };
        let region_id = map.region_id(coord).unwrap_or(RegionId(region_key_for(coord)));
        let Some(mut region) = store.checkout_region(region_id) else { continue };
        if region.resource_left == 0 || region.prospection_result.is_none() {
            continue;
        }
        let resource_name = region.prospection_result.as_ref().unwrap().resource_name.clone();

        let rate = &ctx.config.mining_rate;
        let span = rate.max.saturating_sub(rate.min) + 1;
        let raw_amount = rng.next_int(span) + rate.min;

        let cargo_used = character
            .inventory
            .cargo_used(|item| ctx.config.items.get(item).map(|i| i.cargo_size).unwrap_or(1));
        let item_size = ctx.config.items.get(&resource_name).map(|i| i.cargo_size).unwrap_or(1);
        let cargo_room = character.cargo_space.saturating_sub(cargo_used) / item_size.max(1);

        let amount = raw_amount.min(region.resource_left).min(cargo_room);
        if amount == 0 {
            continue;
        }

        region.resource_left -= amount;
        region.modified_height = ctx.height;
        character.inventory.add(&resource_name, amount);
    }
}

#[cfg(test)]
mod tests;
