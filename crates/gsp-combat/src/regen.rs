//! Regeneration.
//!
//! Advances armour and shield for every fighter with `can_regen`, in
//! ascending id order. Runs last in the HP phase (after
//! `process_kills`), so only fighters that survived this block's combat
//! are present to regenerate.

use gsp_config::Context;
use gsp_store::domain::common::EffectKind;
use gsp_store::Store;
use shared_types::InvariantError;

pub fn regenerate_hp(store: &Store, _ctx: &Context) {
    let mut character_ids = store.character_ids();
    character_ids.sort();
    for id in character_ids {
        let Some(mut character) = store.checkout_character(id) else { continue };
        if !character.can_regen {
            continue;
        }

        let armour_rate = character.regen.armour_rate_milli;
        let (hp, max_hp) = (character.hp, character.max_hp);
        let gained = character.regen.armour.advance(armour_rate, hp, max_hp);
        character.hp = hp.saturating_add(gained);
        if character.hp > character.max_hp {
            panic!(
                "{}",
                InvariantError::RegenOvershoot { entity_id: id.0, hp: character.hp, max_hp: character.max_hp }
            );
        }

        let shield_mod = character.combat.effects.get(&EffectKind::ShieldRegen).map(|e| e.magnitude_percent).unwrap_or(0);
        let shield_rate = apply_percent_rate(character.regen.shield_rate_milli, shield_mod);
        let (shield, max_shield) = (character.combat.shield, character.combat.max_shield);
        let shield_gained = character.regen.shield.advance(shield_rate, shield, max_shield);
        character.combat.shield = shield.saturating_add(shield_gained);
        if character.combat.shield > character.combat.max_shield {
            panic!(
                "{}",
                InvariantError::RegenOvershoot {
                    entity_id: id.0,
                    hp: character.combat.shield,
                    max_hp: character.combat.max_shield,
                }
            );
        }
    }

    let mut building_ids = store.building_ids();
    building_ids.sort();
    for id in building_ids {
        let Some(mut building) = store.checkout_building(id) else { continue };
        if !building.can_regen {
            continue;
        }

        let armour_rate = building.regen.armour_rate_milli;
        let (hp, max_hp) = (building.hp, building.max_hp);
        let gained = building.regen.armour.advance(armour_rate, hp, max_hp);
        building.hp = hp.saturating_add(gained);
        if building.hp > building.max_hp {
            panic!(
                "{}",
                InvariantError::RegenOvershoot { entity_id: id.0, hp: building.hp, max_hp: building.max_hp }
            );
        }

        let shield_mod = building.combat.effects.get(&EffectKind::ShieldRegen).map(|e| e.magnitude_percent).unwrap_or(0);
        let shield_rate = apply_percent_rate(building.regen.shield_rate_milli, shield_mod);
        let (shield, max_shield) = (building.combat.shield, building.combat.max_shield);
        let shield_gained = building.regen.shield.advance(shield_rate, shield, max_shield);
        building.combat.shield = shield.saturating_add(shield_gained);
        if building.combat.shield > building.combat.max_shield {
            panic!(
                "{}",
                InvariantError::RegenOvershoot {
                    entity_id: id.0,
                    hp: building.combat.shield,
                    max_hp: building.combat.max_shield,
                }
            );
        }
    }
}

/// Applies a percent modifier to a milli-HP rate, floored at zero —
/// the `ShieldRegen` effect can only scale the shield's own rate, never
/// the armour rate.
fn apply_percent_rate(base: u64, percent_mod: i64) -> u64 {
    let adjusted = base as i64 + (base as i64 * percent_mod) / 100;
    adjusted.max(0) as u64
}
