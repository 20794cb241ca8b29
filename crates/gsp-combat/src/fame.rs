//! Fame attribution.
//!
//! Runs on the set of fighters that died this phase, before
//! `process_kills` deletes their rows — the attacking accounts are
//! read off the still-live damage list and the still-live attacker
//! entities, then credited fame and a kill count proportional to how
//! many recorded hits each account landed on the victim inside the
//! sliding window.

use gsp_config::Context;
use gsp_store::Store;
use shared_types::{AccountName, BuildingId, CharacterId, EntityKind, TargetKey};
use std::collections::BTreeMap;

/// Credits fame for every id in `dead`. `dead` must already be
/// deduplicated by the caller (as `deal_combat_damage` guarantees) so
/// each victim is attributed exactly once, even across a self-destruct
/// cascade where the same id can never reappear once dead.
pub fn attribute_fame(store: &Store, ctx: &Context, dead: &[TargetKey]) {
    let min_height = ctx.height.saturating_sub(ctx.config.damage_list_window);

    for &victim in dead {
        let pool = match victim.kind {
            EntityKind::Character => ctx.config.fame_per_character_kill,
            EntityKind::Building => ctx.config.fame_per_building_kill,
        };
        if pool == 0 {
            continue;
        }

        let mut hits_by_account: BTreeMap<AccountName, u64> = BTreeMap::new();
        for entry in store.damage_list_for_victim(victim) {
            if entry.height < min_height {
                continue;
            }
            if let Some(account) = attacker_account(store, entry.attacker) {
                *hits_by_account.entry(account).or_insert(0) += 1;
            }
        }
        if hits_by_account.is_empty() {
            continue;
        }

        for (account, amount) in split_fame(pool, &hits_by_account) {
            if amount == 0 {
                continue;
            }
            let Some(mut handle) = store.checkout_account(&account) else { continue };
            handle.fame = handle.fame.saturating_add(amount);
            handle.kills = handle.kills.saturating_add(1);
        }
    }
}

fn attacker_account(store: &Store, attacker: TargetKey) -> Option<AccountName> {
    match attacker.kind {
        EntityKind::Character => store.checkout_character(CharacterId(attacker.id)).map(|h| h.owner.clone()),
        EntityKind::Building => store.checkout_building(BuildingId(attacker.id)).and_then(|h| h.owner.clone()),
    }
}

/// Splits `pool` fame points across accounts proportional to their hit
/// count, floor division first; the remainder (always `< accounts.len()`
/// points) goes one at a time to accounts in ascending name order, the
/// engine's standard deterministic tie-break.
fn split_fame(pool: u64, hits_by_account: &BTreeMap<AccountName, u64>) -> BTreeMap<AccountName, u64> {
    let total_hits: u64 = hits_by_account.values().sum();
    let mut awarded: BTreeMap<AccountName, u64> = BTreeMap::new();
    let mut distributed = 0u64;
    for (account, hits) in hits_by_account {
        let share = pool * hits / total_hits;
        awarded.insert(account.clone(), share);
        distributed += share;
    }
    let mut remainder = pool - distributed;
    for account in hits_by_account.keys() {
        if remainder == 0 {
            break;
        }
        *awarded.get_mut(account).expect("seeded above") += 1;
        remainder -= 1;
    }
    awarded
}
