use crate::modifiers::{self, Modifier};
use crate::snapshot::{gather_fighters, FighterSnapshot};
use gsp_config::{Context, WeaponConfig};
use gsp_prng::DeterministicRng;
use gsp_store::domain::common::{DrainRecord, Effect, EffectKind};
use gsp_store::domain::entities::DamageListEntry;
use gsp_store::Store;
use shared_types::{BuildingId, CharacterId, EntityKind, TargetKey};
use std::collections::{BTreeMap, HashMap};

/// Mutable per-fighter HP/shield pool, worked on in place as hits
/// resolve within a pass; kept separate from `FighterSnapshot` so the
/// read-only modifier snapshot never sees a partially-damaged world.
#[derive(Debug, Clone, Copy)]
struct LivePool {
    hp: u64,
    max_hp: u64,
    shield: u64,
    max_shield: u64,
}

struct PlannedHit {
    attacker: TargetKey,
    victim: TargetKey,
    weapon: String,
}

/// Runs the full damage-dealing phase: gain-HP pass, reconciliation,
/// non-gain-HP pass with range/area gating, effect accumulation, and
/// the self-destruct cascade. Returns every
/// fighter whose HP reached zero this phase, in `(kind, id)` order —
/// callers run fame attribution and kill processing against this set.
pub fn deal_combat_damage(store: &Store, ctx: &Context, rng: &mut DeterministicRng) -> Vec<TargetKey> {
    let fighters = gather_fighters(store, ctx);
    let by_key: HashMap<TargetKey, &FighterSnapshot> = fighters.iter().map(|f| (f.key, f)).collect();
    let modifiers: HashMap<TargetKey, Modifier> = fighters
        .iter()
        .map(|f| {
            let m = modifiers::compute_modifier(&ctx.config, f.hp, f.max_hp, &f.effects, &f.fitments);
            (f.key, m)
        })
        .collect();

    let mut pools: HashMap<TargetKey, LivePool> = fighters
        .iter()
        .map(|f| (f.key, LivePool { hp: f.hp, max_hp: f.max_hp, shield: f.shield, max_shield: f.max_shield }))
        .collect();
    // Seed with every still-live effect, duration decremented by one
    // block; expired effects (blocks_remaining would hit zero) drop out
    // here. Pass B's grants below overwrite/refresh individual kinds on
    // top of this carried-forward baseline before the atomic swap.
    let mut new_effects: HashMap<TargetKey, BTreeMap<EffectKind, Effect>> = fighters
        .iter()
        .map(|f| {
            let carried: BTreeMap<EffectKind, Effect> = f
                .effects
                .iter()
                .filter(|(_, e)| e.blocks_remaining > 1)
                .map(|(k, e)| (*k, Effect { magnitude_percent: e.magnitude_percent, blocks_remaining: e.blocks_remaining - 1 }))
                .collect();
            (f.key, carried)
        })
        .collect();

    // Pass A: gain-HP attacks.
    let gain_hp_plans = plan_hits(&fighters, &ctx.config, true, &pools);
    let mut drains = Vec::new();
    for plan in &gain_hp_plans {
        if let Some(amount) = resolve_hit(plan, &by_key, &modifiers, &mut pools, &ctx.config, rng) {
            store.record_damage(DamageListEntry { victim: plan.victim, attacker: plan.attacker, height: ctx.height });
            if plan.attacker.kind == EntityKind::Character {
                drains.push(DrainRecord { victim: plan.victim, attacker: CharacterId(plan.attacker.id), amount });
            }
        }
    }

    // Reconcile gain-HP now, against the pools exactly as Pass A left
    // them — §4.9 orders this step before Pass B runs, so a later,
    // non-gain-HP attack depleting the same victim must never affect
    // whether a syphon attacker recovers. The eligibility check keys on
    // the drained pool itself (shield), not total remaining HP: two
    // attackers that between them drain a target's shield to exactly
    // zero must both be denied recovery even if the target's armour
    // (untouched by the syphon) is still standing.
    let mut attackers_by_victim: HashMap<TargetKey, Vec<usize>> = HashMap::new();
    for (idx, drain) in drains.iter().enumerate() {
        attackers_by_victim.entry(drain.victim).or_default().push(idx);
    }
    let mut credits: HashMap<CharacterId, u64> = HashMap::new();
    for (victim, indices) in &attackers_by_victim {
        let victim_shield_remaining = pools.get(victim).map(|p| p.shield).unwrap_or(0);
        let can_recover = victim_shield_remaining > 0 || indices.len() == 1;
        if !can_recover {
            continue;
        }
        for &idx in indices {
            let drain = &drains[idx];
            *credits.entry(drain.attacker).or_insert(0) += drain.amount;
        }
    }

    // Pass B: everything else, with range/area gating and effect grants.
    let regular_plans = plan_hits(&fighters, &ctx.config, false, &pools);
    for plan in &regular_plans {
        let weapon = ctx.config.weapons.get(&plan.weapon);
        let Some(_) = resolve_hit(plan, &by_key, &modifiers, &mut pools, &ctx.config, rng) else { continue };
        store.record_damage(DamageListEntry { victim: plan.victim, attacker: plan.attacker, height: ctx.height });
        if let Some(weapon) = weapon {
            if let Some(grant) = &weapon.applies_effect {
                let victim_effects = new_effects.entry(plan.victim).or_default();
                victim_effects.insert(grant.kind, Effect { magnitude_percent: grant.magnitude_percent, blocks_remaining: grant.duration_blocks });
            }
        }
    }

    // Self-destruct cascade.
    let mut new_dead: Vec<TargetKey> = pools.iter().filter(|(_, p)| p.hp == 0).map(|(k, _)| *k).collect();
    new_dead.sort();
    let mut already_dead: Vec<TargetKey> = Vec::new();
    while !new_dead.is_empty() {
        let this_round = std::mem::take(&mut new_dead);
        for key in &this_round {
            already_dead.push(*key);
        }
        for key in &this_round {
            let Some(fighter) = by_key.get(key) else { continue };
            let Some(weapon_name) = &fighter.self_destruct else { continue };
            let Some(weapon) = ctx.config.weapons.get(weapon_name) else { continue };
            let modifier = modifiers.get(key).copied().unwrap_or_default();
            let area = weapon.area.map(|a| modifiers::apply_percent(a as u64, modifier.range_mod_percent) as u32).unwrap_or(0);
            for other in &fighters {
                if other.key == *key || already_dead.contains(&other.key) {
                    continue;
                }
                if other.coord.distance(fighter.coord) > area {
                    continue;
                }
                let hit = PlannedHit { attacker: *key, victim: other.key, weapon: weapon_name.clone() };
                if resolve_hit(&hit, &by_key, &modifiers, &mut pools, &ctx.config, rng).is_some() {
                    store.record_damage(DamageListEntry { victim: other.key, attacker: *key, height: ctx.height });
                }
            }
        }
        new_dead = pools
            .iter()
            .filter(|(k, p)| p.hp == 0 && !already_dead.contains(k))
            .map(|(k, _)| *k)
            .collect();
        new_dead.sort();
    }
    already_dead.sort();
    already_dead.dedup();

    // Credit gained HP only to attackers that survived the cascade.
    for (attacker, amount) in credits {
        let key = TargetKey::character(attacker);
        if already_dead.contains(&key) {
            continue;
        }
        if let Some(pool) = pools.get_mut(&key) {
            pool.hp = (pool.hp + amount).min(pool.max_hp);
        }
    }

    write_back(store, &pools, &new_effects);
    already_dead
}

fn plan_hits(
    fighters: &[FighterSnapshot],
    config: &gsp_config::RoConfig,
    gain_hp_pass: bool,
    pools: &HashMap<TargetKey, LivePool>,
) -> Vec<PlannedHit> {
    let mut plans = Vec::new();
    for attacker in fighters {
        if pools.get(&attacker.key).is_some_and(|p| p.hp == 0) {
            continue;
        }
        let Some(target_key) = attacker.target else { continue };
        for weapon_name in &attacker.attacks {
            let Some(weapon) = config.weapons.get(weapon_name) else { continue };
            if weapon.friendly || weapon.gain_hp != gain_hp_pass {
                continue;
            }
            if gain_hp_pass {
                plans.push(PlannedHit { attacker: attacker.key, victim: target_key, weapon: weapon_name.clone() });
                continue;
            }
            let Some(target) = fighters.iter().find(|f| f.key == target_key) else { continue };
            if let Some(range) = weapon.range {
                if attacker.coord.distance(target.coord) > range {
                    continue;
                }
            }
            if let Some(area) = weapon.area {
                let centre = if weapon.range.is_some() { target.coord } else { attacker.coord };
                for other in fighters {
                    if other.key == attacker.key || other.faction == attacker.faction {
                        continue;
                    }
                    if other.coord.distance(centre) <= area {
                        plans.push(PlannedHit { attacker: attacker.key, victim: other.key, weapon: weapon_name.clone() });
                    }
                }
            } else {
                plans.push(PlannedHit { attacker: attacker.key, victim: target_key, weapon: weapon_name.clone() });
            }
        }
    }
    plans
}

/// Resolves one planned hit against the live pools: rolls to hit,
/// applies the shield/armour split on success, and returns the total
/// HP drained (shield + armour) for gain-HP bookkeeping.
fn resolve_hit(
    plan: &PlannedHit,
    by_key: &HashMap<TargetKey, &FighterSnapshot>,
    modifiers: &HashMap<TargetKey, Modifier>,
    pools: &mut HashMap<TargetKey, LivePool>,
    config: &gsp_config::RoConfig,
    rng: &mut DeterministicRng,
) -> Option<u64> {
    let weapon = config.weapons.get(&plan.weapon)?;
    let attacker_modifier = modifiers.get(&plan.attacker).copied().unwrap_or_default();
    let target_size = by_key.get(&plan.victim).map(|f| f.size).unwrap_or(1);

    let hit_chance = (base_hit_chance(target_size, weapon) as i64 + weapon.hit_chance_mod_percent + attacker_modifier.hit_chance_mod_percent).clamp(0, 100) as u64;
    if !rng.probability_roll(hit_chance, 100) {
        return None;
    }

    let min_dmg = modifiers::apply_percent(weapon.min_damage, attacker_modifier.damage_mod_percent);
    let max_dmg = modifiers::apply_percent(weapon.max_damage, attacker_modifier.damage_mod_percent).max(min_dmg);
    let dmg = rng.next_int(max_dmg - min_dmg + 1) + min_dmg;

    let pool = pools.get_mut(&plan.victim)?;
    let (done_shield, done_armour) = apply_shield_armour_split(dmg, weapon.shield_percent, weapon.armour_percent, pool.shield, pool.hp);
    pool.shield -= done_shield;
    pool.hp -= done_armour;

    Some(done_shield + done_armour)
}

fn base_hit_chance(target_size: u64, weapon: &WeaponConfig) -> u64 {
    modifiers::base_hit_chance(target_size, weapon.weapon_size)
}

/// Shield absorbs its configured percentage of incoming damage first;
/// any damage actually spent on shield is deducted from the pool
/// before armour's share is computed against what's left. If the
/// shield isn't fully exhausted by `done_shield`, armour is untouched —
/// there's no "spillover" from a shield's percentage cut, only from the
/// shield breaking outright.
pub fn apply_shield_armour_split(dmg: u64, shield_percent: u32, armour_percent: u32, shield: u64, armour: u64) -> (u64, u64) {
    let available_for_shield = dmg * shield_percent as u64 / 100;
    let done_shield = available_for_shield.min(shield);
    if done_shield < shield {
        return (done_shield, 0);
    }
    let spent_for_shield = if shield_percent == 0 { 0 } else { done_shield * 100 / shield_percent as u64 };
    let remaining_dmg = dmg.saturating_sub(spent_for_shield);
    let available_for_armour = remaining_dmg * armour_percent as u64 / 100;
    let done_armour = available_for_armour.min(armour);
    (done_shield, done_armour)
}

fn write_back(store: &Store, pools: &HashMap<TargetKey, LivePool>, new_effects: &HashMap<TargetKey, BTreeMap<EffectKind, Effect>>) {
    for (key, pool) in pools {
        let effects = new_effects.get(key).cloned().unwrap_or_default();
        match key.kind {
            EntityKind::Character => {
                let Some(mut character) = store.checkout_character(CharacterId(key.id)) else { continue };
                character.hp = pool.hp;
                character.combat.shield = pool.shield;
                character.combat.effects = effects;
            }
            EntityKind::Building => {
                let Some(mut building) = store.checkout_building(BuildingId(key.id)) else { continue };
                building.hp = pool.hp;
                building.combat.shield = pool.shield;
                building.combat.effects = effects;
            }
        }
    }
}

#[cfg(test)]
mod tests;
