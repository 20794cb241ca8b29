use gsp_config::Context;
use gsp_store::domain::entities::Location;
use gsp_store::Store;
use shared_types::{AccountName, InvariantError, MAX_QUANTITY};
use std::collections::HashMap;

/// Checks every invariant listed for the entity store, aborting the
/// process on the first violation. Runs only in debug builds — these
/// conditions should be structurally impossible, so paying their cost in
/// a release build buys nothing a consensus-critical node needs.
pub fn check_invariants(store: &Store, ctx: &Context) {
    let mut characters_per_owner: HashMap<AccountName, u32> = HashMap::new();

    for id in store.character_ids() {
        let Some(character) = store.checkout_character(id) else { continue };

        let Some(account) = store.checkout_account(&character.owner) else {
            panic!("{}", InvariantError::Other(format!("character {id} owned by unknown account {}", character.owner)));
        };
        if character.faction != account.faction {
            panic!(
                "{}",
                InvariantError::FactionMismatch {
                    entity_id: id.0,
                    entity_faction: format!("{:?}", character.faction),
                    owner_faction: format!("{:?}", account.faction),
                }
            );
        }
        drop(account);
        *characters_per_owner.entry(character.owner.clone()).or_insert(0) += 1;

        if !character.busy_state_consistent() {
            panic!("{}", InvariantError::BusyStateMismatch(id.0));
        }
        if let Some(op_id) = character.ongoing_op_id {
            let back_reference_ok = store
                .checkout_ongoing_op(op_id)
                .is_some_and(|op| op.character_id == Some(id));
            if !back_reference_ok {
                panic!("{}", InvariantError::DanglingOngoingRef { op_id: op_id.0, entity_id: id.0 });
            }
        }

        if let Location::Building(building_id) = character.location {
            let Some(building) = store.checkout_building(building_id) else {
                panic!("{}", InvariantError::Other(format!("character {id} inside missing building {building_id}")));
            };
            if !(building.is_ancient() || building.faction == character.faction) {
                panic!(
                    "{}",
                    InvariantError::Other(format!("character {id} inside faction-incompatible building {building_id}"))
                );
            }
        }

        for quantity in character.inventory.0.values() {
            if quantity.get() > MAX_QUANTITY {
                panic!("{}", InvariantError::QuantityOverflow(quantity.get(), MAX_QUANTITY));
            }
        }
    }

    for (owner, count) in &characters_per_owner {
        if *count > ctx.config.character_limit_per_account {
            panic!(
                "{}",
                InvariantError::Other(format!(
                    "account {owner} owns {count} characters, over the configured limit of {}",
                    ctx.config.character_limit_per_account
                ))
            );
        }
    }

    for id in store.building_ids() {
        let Some(building) = store.checkout_building(id) else { continue };

        if let Some(owner) = &building.owner {
            let Some(account) = store.checkout_account(owner) else {
                panic!("{}", InvariantError::Other(format!("building {id} owned by unknown account {owner}")));
            };
            if building.faction != account.faction {
                panic!(
                    "{}",
                    InvariantError::FactionMismatch {
                        entity_id: id.0,
                        entity_faction: format!("{:?}", building.faction),
                        owner_faction: format!("{:?}", account.faction),
                    }
                );
            }
        }

        if let Some(op_id) = building.ongoing_construction_id {
            let back_reference_ok = store
                .checkout_ongoing_op(op_id)
                .is_some_and(|op| op.building_id == Some(id));
            if !back_reference_ok {
                panic!("{}", InvariantError::DanglingOngoingRef { op_id: op_id.0, entity_id: id.0 });
            }
        }

        for quantity in building.construction_inventory.0.values() {
            if quantity.get() > MAX_QUANTITY {
                panic!("{}", InvariantError::QuantityOverflow(quantity.get(), MAX_QUANTITY));
            }
        }
    }
}

#[cfg(test)]
mod tests;
