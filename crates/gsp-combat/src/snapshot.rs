use gsp_config::Context;
use gsp_hexgrid::Coord;
use gsp_store::domain::common::{Effect, EffectKind};
use gsp_store::domain::entities::Location;
use gsp_store::Store;
use shared_types::{Faction, TargetKey};
use std::collections::BTreeMap;

/// A building has no configured "size"; this stands in for "always at
/// least as big as any weapon", so `base_hit_chance` against a building
/// is always 100.
const BUILDING_TARGET_SIZE: u64 = u64::MAX;

/// A read-only, pre-mutation view of one fighter (character or
/// building), gathered once per combat phase so modifier and target
/// computations never see a partially-updated world.
#[derive(Debug, Clone)]
pub struct FighterSnapshot {
    pub key: TargetKey,
    pub faction: Faction,
    pub coord: Coord,
    pub size: u64,
    pub attacks: Vec<String>,
    pub attack_range: u32,
    pub self_destruct: Option<String>,
    pub fitments: Vec<String>,
    pub hp: u64,
    pub max_hp: u64,
    pub shield: u64,
    pub max_shield: u64,
    pub target: Option<TargetKey>,
    pub effects: BTreeMap<EffectKind, Effect>,
}

/// Every character on the map and every non-foundation building,
/// ordered by `(kind, id)`. Characters inside a building are not
/// combat-eligible — they are sheltered, matching §4.10 step 8's
/// ordering rationale ("entering shelters from the round's targeting").
pub fn gather_fighters(store: &Store, ctx: &Context) -> Vec<FighterSnapshot> {
    let mut out = Vec::new();

    let mut character_ids = store.character_ids();
    character_ids.sort();
    for id in character_ids {
        let Some(character) = store.checkout_character(id) else { continue };
        let Location::Map(coord) = character.location else { continue };
        let size = ctx
            .config
            .vehicles
            .get(&character.vehicle_type)
            .map(|v| v.size)
            .unwrap_or(1);
        out.push(FighterSnapshot {
            key: TargetKey::character(id),
            faction: character.faction,
            coord,
            size,
            attacks: character.attacks.clone(),
            attack_range: character.attack_range,
            self_destruct: character.self_destruct.clone(),
            fitments: character.fitments.clone(),
            hp: character.hp,
            max_hp: character.max_hp,
            shield: character.combat.shield,
            max_shield: character.combat.max_shield,
            target: character.combat.target,
            effects: character.combat.effects.clone(),
        });
    }

    let mut building_ids = store.building_ids();
    building_ids.sort();
    for id in building_ids {
        let Some(building) = store.checkout_building(id) else { continue };
        if building.is_foundation {
            continue;
        }
        out.push(FighterSnapshot {
            key: TargetKey::building(id),
            faction: building.faction,
            coord: building.centre,
            size: BUILDING_TARGET_SIZE,
            attacks: building.attacks.clone(),
            attack_range: building.attack_range,
            self_destruct: building.self_destruct.clone(),
            fitments: Vec::new(),
            hp: building.hp,
            max_hp: building.max_hp,
            shield: building.combat.shield,
            max_shield: building.combat.max_shield,
            target: building.combat.target,
            effects: building.combat.effects.clone(),
        });
    }

    out.sort_by_key(|f| f.key);
    out
}
