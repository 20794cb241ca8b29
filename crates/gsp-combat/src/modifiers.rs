use gsp_config::RoConfig;
use gsp_store::domain::common::{Effect, EffectKind};
use std::collections::BTreeMap;

/// Per-fighter combat modifier, accumulated from the low-HP boost plus
/// whatever effects currently apply. Percentages stack additively.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifier {
    pub damage_mod_percent: i64,
    pub range_mod_percent: i64,
    pub hit_chance_mod_percent: i64,
}

/// Whether `hp` has fallen to or below the configured low-HP threshold
/// of `max_hp`.
pub fn low_hp_boost_active(config: &RoConfig, hp: u64, max_hp: u64) -> bool {
    max_hp > 0 && hp * 100 <= max_hp * config.low_hp_boost.threshold_percent
}

/// Combines the low-HP boost (if active), every currently-applied
/// effect, and equipped fitments (characters only — buildings pass an
/// empty slice) into one modifier.
pub fn compute_modifier(
    config: &RoConfig,
    hp: u64,
    max_hp: u64,
    effects: &BTreeMap<EffectKind, Effect>,
    fitments: &[String],
) -> Modifier {
    let mut modifier = Modifier::default();

    if low_hp_boost_active(config, hp, max_hp) {
        let boost = &config.low_hp_boost;
        modifier.damage_mod_percent += boost.damage_mod_percent;
        modifier.range_mod_percent += boost.range_mod_percent;
        modifier.hit_chance_mod_percent += boost.hit_chance_mod_percent;
    }

    for (kind, effect) in effects {
        match kind {
            EffectKind::Range => modifier.range_mod_percent += effect.magnitude_percent,
            EffectKind::HitChance => modifier.hit_chance_mod_percent += effect.magnitude_percent,
            // Speed is consumed by the movement processor directly off
            // `CombatData::effects`; ShieldRegen is read in the regen
            // phase; Mentecon is read by target acquisition. None of
            // the three feed the damage-dealing modifier.
            EffectKind::Speed | EffectKind::ShieldRegen | EffectKind::Mentecon => {}
        }
    }

    for name in fitments {
        if let Some(fitment) = config.fitments.get(name) {
            modifier.damage_mod_percent += fitment.damage_mod_percent;
            modifier.range_mod_percent += fitment.range_mod_percent;
            modifier.hit_chance_mod_percent += fitment.hit_chance_mod_percent;
        }
    }

    modifier
}

/// Applies a percent modifier to a base stat, floored at zero.
pub fn apply_percent(base: u64, percent_mod: i64) -> u64 {
    let adjusted = base as i64 + (base as i64 * percent_mod) / 100;
    adjusted.max(0) as u64
}

/// `100` once the target is at least as big as the weapon; otherwise
/// `floor(100 * target_size / weapon_size)`.
pub fn base_hit_chance(target_size: u64, weapon_size: u64) -> u64 {
    if weapon_size == 0 || target_size >= weapon_size {
        100
    } else {
        100 * target_size / weapon_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_hit_chance_caps_at_100_for_large_targets() {
        assert_eq!(base_hit_chance(10, 3), 100);
        assert_eq!(base_hit_chance(3, 3), 100);
    }

    #[test]
    fn base_hit_chance_scales_down_for_small_targets() {
        assert_eq!(base_hit_chance(1, 3), 33);
    }

    #[test]
    fn apply_percent_floors_at_zero() {
        assert_eq!(apply_percent(10, -200), 0);
        assert_eq!(apply_percent(10, 20), 12);
    }
}
