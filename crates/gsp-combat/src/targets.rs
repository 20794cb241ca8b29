use crate::modifiers::{self, Modifier};
use crate::snapshot::{gather_fighters, FighterSnapshot};
use gsp_config::Context;
use gsp_map::MapOracle;
use gsp_prng::DeterministicRng;
use gsp_store::domain::common::EffectKind;
use gsp_store::Store;
use shared_types::{BuildingId, CharacterId, EntityKind, TargetKey};
use std::collections::HashSet;

/// Re-acquires combat targets for every fighter with an attack (normal
/// or friendly-area), skipping fighters standing in a no-combat safe
/// zone. Writes `combat.target` and `combat.friendly_in_range` back to
/// the store.
pub fn find_combat_targets(store: &Store, ctx: &Context, map: &dyn MapOracle, rng: &mut DeterministicRng) {
    let fighters = gather_fighters(store, ctx);

    for fighter in &fighters {
        if fighter.attacks.is_empty() {
            continue;
        }
        if map.safe_zones().is_no_combat(fighter.coord) {
            continue;
        }

        let modifier = modifiers::compute_modifier(&ctx.config, fighter.hp, fighter.max_hp, &fighter.effects, &fighter.fitments);
        let search_radius = modifiers::apply_percent(fighter.attack_range as u64, modifier.range_mod_percent) as u32;
        let ball: HashSet<_> = fighter.coord.ball(search_radius).into_iter().collect();

        let (closest, friendly_in_range) = closest_enemies(fighter, &fighters, &ball, map);
        let chosen = if closest.is_empty() {
            None
        } else {
            Some(closest[rng.pick_index(closest.len())])
        };

        write_back(store, fighter.key, chosen, friendly_in_range);
    }
}

/// `other`'s own `mentecon` affliction makes it count as both friend
/// and foe to everyone searching, regardless of faction.
fn closest_enemies(
    fighter: &FighterSnapshot,
    fighters: &[FighterSnapshot],
    ball: &HashSet<gsp_hexgrid::Coord>,
    map: &dyn MapOracle,
) -> (Vec<TargetKey>, bool) {
    let mut closest = Vec::new();
    let mut min_dist = u32::MAX;
    let mut friendly_in_range = false;

    for other in fighters {
        if other.key == fighter.key {
            continue;
        }
        if !ball.contains(&other.coord) {
            continue;
        }
        if map.safe_zones().is_no_combat(other.coord) {
            continue;
        }
        let other_is_mentecon = other.effects.contains_key(&EffectKind::Mentecon);
        let is_enemy = other_is_mentecon || other.faction != fighter.faction;
        if !is_enemy || other_is_mentecon {
            friendly_in_range = true;
        }
        if !is_enemy {
            continue;
        }
        let dist = fighter.coord.distance(other.coord);
        match dist.cmp(&min_dist) {
            std::cmp::Ordering::Less => {
                min_dist = dist;
                closest.clear();
                closest.push(other.key);
            }
            std::cmp::Ordering::Equal => closest.push(other.key),
            std::cmp::Ordering::Greater => {}
        }
    }

    closest.sort();
    (closest, friendly_in_range)
}

fn write_back(store: &Store, key: TargetKey, target: Option<TargetKey>, friendly_in_range: bool) {
    match key.kind {
        EntityKind::Character => {
            let Some(mut character) = store.checkout_character(CharacterId(key.id)) else { return };
            character.combat.target = target;
            character.combat.friendly_in_range = friendly_in_range;
        }
        EntityKind::Building => {
            let Some(mut building) = store.checkout_building(BuildingId(key.id)) else { return };
            building.combat.target = target;
            building.combat.friendly_in_range = friendly_in_range;
        }
    }
}
