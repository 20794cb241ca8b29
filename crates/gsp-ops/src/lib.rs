//! # Ongoing-operations scheduler
//!
//! Counts down `busy_blocks` for every busy character and dispatches the
//! tagged-union finaliser for whichever ongoing operation variant
//! reaches zero: prospection, armour repair, blueprint copy, item
//! construction, building construction, and building config updates.
//! Ops with no owning character (currently only `BuildingConfigUpdate`)
//! are driven off `height_of_next_processing` directly instead, since
//! there is no character to decrement a busy counter on.

mod finalise;

use gsp_config::Context;
use gsp_map::MapOracle;
use gsp_prng::DeterministicRng;
use gsp_store::domain::entities::OngoingOpVariant;
use gsp_store::Store;
use tracing::debug;

/// Runs the scheduler for one block: decrements every busy character,
/// finalises operations that just reached zero busy blocks, and
/// finalises any character-less op whose processing height has
/// arrived. `rng` is the single per-block random stream, threaded in
/// from the pipeline driver and advanced strictly in this phase's
/// character-ascending order.
pub fn process_ongoing_operations(store: &Store, ctx: &Context, map: &dyn MapOracle, rng: &mut DeterministicRng) {
    let mut character_ids = store.character_ids();
    character_ids.sort();

    for id in character_ids {
        let Some(mut handle) = store.checkout_character(id) else { continue };
        if handle.busy_blocks == 0 {
            continue;
        }
        handle.busy_blocks -= 1;
        if handle.busy_blocks > 0 {
            continue;
        }
        let op_id = handle.ongoing_op_id;
        drop(handle);

        let Some(op_id) = op_id else {
            panic!("character {id} hit busy_blocks==0 with no ongoing_op_id set");
        };
        let Some(op) = store.checkout_ongoing_op(op_id) else {
            panic!("dangling ongoing-operation reference: character {id} -> op {op_id}");
        };
        finalise::finalise_character_op(store, ctx, map, rng, id, op);
    }

    let mut op_ids = store.ongoing_op_ids();
    op_ids.sort();
    for op_id in op_ids {
        let Some(op) = store.checkout_ongoing_op(op_id) else { continue };
        if op.character_id.is_some() || ctx.height < op.height_of_next_processing {
            // Not due yet, or owned by a character and already handled
            // above; just release the checkout unchanged.
            continue;
        }
        match &op.variant {
            OngoingOpVariant::BuildingConfigUpdate { .. } => {
                finalise::finalise_building_config_update(store, op);
            }
            other => {
                debug!(?other, op_id = %op_id, "character-less ongoing op of unexpected variant, discarding");
                op.discard();
            }
        }
    }
}

#[cfg(test)]
mod tests;
