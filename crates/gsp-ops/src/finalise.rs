use gsp_config::Context;
use gsp_hexgrid::region_key_for;
use gsp_map::MapOracle;
use gsp_prng::DeterministicRng;
use gsp_store::domain::common::RegenData;
use gsp_store::domain::entities::{Location, OngoingOp, OngoingOpVariant, Region};
use gsp_store::{Handle, Store};
use shared_types::{CharacterId, RegionId};
use tracing::warn;

/// Finalises the ongoing operation owned by `character_id`, which just
/// reached `busy_blocks == 0`. Every variant is matched exhaustively —
/// an unhandled tag is a fatal invariant failure, never a default
/// branch.
pub(crate) fn finalise_character_op(
    store: &Store,
    ctx: &Context,
    map: &dyn MapOracle,
    rng: &mut DeterministicRng,
    character_id: CharacterId,
    op: Handle<OngoingOp>,
) {
    match &op.variant {
        OngoingOpVariant::Prospection => finalise_prospection(store, ctx, map, rng, character_id, op),
        OngoingOpVariant::ArmourRepair => finalise_armour_repair(store, character_id, op),
        OngoingOpVariant::BlueprintCopy { .. } => finalise_blueprint_copy(store, character_id, op),
        OngoingOpVariant::ItemConstructionOriginal { .. } => {
            finalise_item_construction_original(store, ctx, character_id, op)
        }
        OngoingOpVariant::ItemConstructionCopies { .. } => {
            finalise_item_construction_copies(store, character_id, op)
        }
        OngoingOpVariant::BuildingConstruction { .. } => {
            finalise_building_construction(store, ctx, character_id, op)
        }
        OngoingOpVariant::BuildingConfigUpdate { .. } => {
            panic!("BuildingConfigUpdate op {} has a character_id but is driven by height", op.id);
        }
    }
}

fn clear_character_busy(store: &Store, character_id: CharacterId) {
    let mut character = store.checkout_character(character_id).expect("character exists while its op finalises");
    character.busy_blocks = 0;
    character.ongoing_op_id = None;
}

fn finalise_prospection(
    store: &Store,
    ctx: &Context,
    map: &dyn MapOracle,
    rng: &mut DeterministicRng,
    character_id: CharacterId,
    op: Handle<OngoingOp>,
) {
    op.discard();
    clear_character_busy(store, character_id);

    let mut character = store.checkout_character(character_id).expect("character exists while its op finalises");
    let Location::Map(coord) = character.location else {
        // The character was forced indoors (building entry) while
        // prospecting; finishing with no ground to report on is a
        // silent no-op rather than a crash.
        return;
    };
    let region_id = map.region_id(coord).unwrap_or(RegionId(region_key_for(coord)));

    let mut region = store.checkout_region(region_id).unwrap_or_else(|| {
        store.insert_region(Region {
            id: region_id,
            modified_height: ctx.height,
            resource_left: 0,
            prospecting_character: None,
            prospection_result: None,
        });
        store.checkout_region(region_id).expect("just inserted")
    });
    region.prospecting_character = None;

    let resources = &ctx.config.prospecting_resources;
    let total_weight: u64 = resources.iter().map(|r| r.weight).sum();
    if total_weight > 0 {
        let roll = rng.next_int(total_weight);
        let mut cumulative = 0u64;
        let chosen = resources
            .iter()
            .find(|r| {
                cumulative += r.weight;
                roll < cumulative
            })
            .expect("roll is within total_weight");
        let amount = rng.next_int(chosen.max_amount - chosen.min_amount + 1) + chosen.min_amount;
        region.modified_height = ctx.height;
        region.resource_left = amount;
        region.prospection_result = Some(gsp_store::domain::entities::ProspectionResult {
            resource_name: chosen.name.clone(),
            height: ctx.height,
        });

        let is_low_zone = map.safe_zones().is_low_prize_zone(coord);
        for (name, prize) in &ctx.config.prizes {
            let probability = if is_low_zone { prize.low_zone_probability_per_million } else { prize.probability_per_million };
            if store.prize_found(name) >= prize.cap {
                // Still consumes a draw so the stream stays in lock-step
                // across nodes regardless of how many prizes have
                // already hit their cap.
                rng.probability_roll(probability, 1_000_000);
                continue;
            }
            if rng.probability_roll(probability, 1_000_000) {
                store.increment_prize(name);
                let cargo_used = character.inventory.cargo_used(|item| ctx.config.items.get(item).map(|i| i.cargo_size).unwrap_or(1));
                let item_size = ctx.config.items.get(name).map(|i| i.cargo_size).unwrap_or(1);
                let room = character.cargo_space.saturating_sub(cargo_used) / item_size.max(1);
                if room >= 1 {
                    character.inventory.add(name, 1);
                } else {
                    let mut loot = store
                        .ground_loot_at(coord)
                        .unwrap_or(gsp_store::domain::entities::GroundLoot { coord, inventory: gsp_store::domain::Inventory::new() });
                    loot.inventory.add(name, 1);
                    store.set_ground_loot(loot);
                }
            }
        }
    }
}

fn finalise_armour_repair(store: &Store, character_id: CharacterId, op: Handle<OngoingOp>) {
    op.discard();
    clear_character_busy(store, character_id);
    let mut character = store.checkout_character(character_id).expect("character exists while its op finalises");
    character.hp = character.max_hp;
    character.regen.armour.mhp = 0;
}

fn finalise_blueprint_copy(store: &Store, character_id: CharacterId, op: Handle<OngoingOp>) {
    let OngoingOpVariant::BlueprintCopy { blueprint, copies } = &op.variant else {
        unreachable!("dispatched as BlueprintCopy");
    };
    let blueprint = blueprint.clone();
    let copies = *copies;
    op.discard();
    clear_character_busy(store, character_id);

    let owner = store.checkout_character(character_id).expect("character exists while its op finalises").owner.clone();
    let mut account = store.checkout_account(&owner).expect("owner account exists");
    account.banked_goods.add(&blueprint, 1);
    account.banked_goods.add(&format!("{blueprint}_copy"), copies as u64);
}

fn finalise_item_construction_original(store: &Store, ctx: &Context, character_id: CharacterId, op: Handle<OngoingOp>) {
    let OngoingOpVariant::ItemConstructionOriginal { blueprint, steps_remaining, total_steps } = &op.variant else {
        unreachable!("dispatched as ItemConstructionOriginal");
    };
    let blueprint = blueprint.clone();
    let steps_remaining = *steps_remaining;
    let total_steps = *total_steps;
    let op_id = op.id;
    let building_id = op.building_id;

    let owner = store.checkout_character(character_id).expect("character exists while its op finalises").owner.clone();
    let mut account = store.checkout_account(&owner).expect("owner account exists");
    account.banked_goods.add(&blueprint, 1);
    drop(account);

    if steps_remaining > 1 {
        let mut op = op;
        op.variant = OngoingOpVariant::ItemConstructionOriginal {
            blueprint,
            steps_remaining: steps_remaining - 1,
            total_steps,
        };
        op.height_of_next_processing = ctx.height + 1;
        drop(op);
        let mut character = store.checkout_character(character_id).expect("character exists while its op finalises");
        character.busy_blocks = 1;
        character.ongoing_op_id = Some(op_id);
    } else {
        op.discard();
        clear_character_busy(store, character_id);
        if let Some(building_id) = building_id {
            if let Some(mut building) = store.checkout_building(building_id) {
                building.ongoing_construction_id = None;
            }
        }
    }
}

fn finalise_item_construction_copies(store: &Store, character_id: CharacterId, op: Handle<OngoingOp>) {
    let OngoingOpVariant::ItemConstructionCopies { blueprint, copies } = &op.variant else {
        unreachable!("dispatched as ItemConstructionCopies");
    };
    let blueprint = blueprint.clone();
    let copies = *copies;
    op.discard();
    clear_character_busy(store, character_id);

    let owner = store.checkout_character(character_id).expect("character exists while its op finalises").owner.clone();
    let mut account = store.checkout_account(&owner).expect("owner account exists");
    account.banked_goods.add(&blueprint, copies as u64);
}

/// Finalises a `BuildingConfigUpdate` op, the one variant with no
/// owning character — its due date is driven by
/// `height_of_next_processing` directly in the scheduler's second
/// loop rather than by a busy counter.
pub(crate) fn finalise_building_config_update(store: &Store, op: Handle<OngoingOp>) {
    let building_id = op.building_id.expect("BuildingConfigUpdate op always has a building_id");
    let OngoingOpVariant::BuildingConfigUpdate { new_config } = &op.variant else {
        unreachable!("dispatched as BuildingConfigUpdate");
    };
    let new_config = new_config.clone();
    op.discard();

    let Some(mut building) = store.checkout_building(building_id) else {
        warn!(%building_id, "building config update finalised but building is gone");
        return;
    };
    building.config = new_config;
}

fn finalise_building_construction(store: &Store, ctx: &Context, character_id: CharacterId, op: Handle<OngoingOp>) {
    let building_id = op.building_id.expect("BuildingConstruction op always has a building_id");
    let OngoingOpVariant::BuildingConstruction { building_type } = &op.variant else {
        unreachable!("dispatched as BuildingConstruction");
    };
    let building_type = building_type.clone();
    op.discard();
    clear_character_busy(store, character_id);

    let Some(mut building) = store.checkout_building(building_id) else {
        warn!(%building_id, "building construction finalised but building is gone (destroyed mid-build)");
        return;
    };
    let Some(cfg) = ctx.config.buildings.get(&building_type) else {
        warn!(building_type, "building construction finalised against an unknown building type");
        return;
    };
    building.is_foundation = false;
    building.ongoing_construction_id = None;
    building.max_hp = cfg.max_hp;
    building.hp = cfg.max_hp;
    building.can_regen = cfg.can_regen;
    building.attack_range = cfg.attack_range;
    building.attacks = cfg.attacks.clone();
    building.self_destruct = cfg.self_destruct.clone();
    building.regen = RegenData {
        armour_rate_milli: cfg.armour_regen_rate_milli,
        shield_rate_milli: cfg.shield_regen_rate_milli,
        ..RegenData::default()
    };
    building.combat.max_shield = cfg.max_shield;
    building.combat.shield = cfg.max_shield;
}
