use gsp_hexgrid::Coord;
use serde::{Deserialize, Serialize};
use shared_types::{BoundedQuantity, CharacterId, TargetKey};
use std::collections::BTreeMap;

/// A named, duration-limited combat modifier. `Mentecon` makes the
/// afflicted fighter count as both friend and foe to everyone during
/// target acquisition; the others scale a stat by `magnitude_percent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Speed,
    Range,
    HitChance,
    ShieldRegen,
    Mentecon,
}

/// A named-item inventory. Kept as a `BTreeMap` so iteration for
/// drop/transfer ordering is always ascending by item name without a
/// separate sort step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory(pub BTreeMap<String, BoundedQuantity>);

impl Inventory {
    pub fn new() -> Self {
        Inventory(BTreeMap::new())
    }

    pub fn quantity(&self, item: &str) -> u64 {
        self.0.get(item).map(|q| q.get()).unwrap_or(0)
    }

    pub fn add(&mut self, item: &str, amount: u64) {
        if amount == 0 {
            return;
        }
        let entry = self.0.entry(item.to_string()).or_insert_with(BoundedQuantity::zero);
        *entry = entry.saturating_add(amount);
    }

    /// Removes up to `amount` of `item`, returning how much was actually
    /// removed (never more than what was present).
    pub fn remove(&mut self, item: &str, amount: u64) -> u64 {
        let Some(entry) = self.0.get_mut(item) else { return 0 };
        let have = entry.get();
        let take = have.min(amount);
        *entry = entry.saturating_sub(take);
        if entry.get() == 0 {
            self.0.remove(item);
        }
        take
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|q| q.get() == 0)
    }

    /// Total occupied cargo units given a per-item unit size table.
    pub fn cargo_used(&self, size_of: impl Fn(&str) -> u64) -> u64 {
        self.0.iter().map(|(item, qty)| size_of(item) * qty.get()).sum()
    }

    /// Merges `other` into `self`, item by item.
    pub fn merge_from(&mut self, other: &Inventory) {
        for (item, qty) in &other.0 {
            self.add(item, qty.get());
        }
    }
}

/// The fractional carry for one HP pool's regeneration. The pool's
/// current/max values live on the owning entity (`Character.hp` for
/// armour, `CombatData.shield` for shield) rather than here, so this
/// track only needs to remember the sub-1000 remainder between blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegenTrack {
    pub mhp: u32,
}

impl RegenTrack {
    /// Advances this track by `rate_milli` milli-HP against a pool
    /// currently at `current` out of `max`. Returns the whole-HP gained
    /// this step; callers apply it to the pool themselves. Carry resets
    /// to zero once the pool is full, so a capped pool never silently
    /// accumulates fractional credit it can't spend.
    pub fn advance(&mut self, rate_milli: u64, current: u64, max: u64) -> u64 {
        if current >= max {
            self.mhp = 0;
            return 0;
        }
        let total_milli = self.mhp as u64 + rate_milli;
        let whole = total_milli / 1000;
        self.mhp = (total_milli % 1000) as u32;
        let room = max - current;
        let gained = whole.min(room);
        if current + gained >= max {
            self.mhp = 0;
        }
        gained
    }
}

/// Armour + shield regen state for a fighter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegenData {
    pub armour: RegenTrack,
    pub shield: RegenTrack,
    pub armour_rate_milli: u64,
    pub shield_rate_milli: u64,
}

/// Precomputed path state for a moving character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementData {
    pub waypoints: Vec<Coord>,
    pub steps: Vec<Coord>,
    pub partial_step: u64,
    pub blocked_turns: u32,
}

/// A timed combat modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub magnitude_percent: i64,
    pub blocks_remaining: u32,
}

/// Per-fighter combat bookkeeping: weapon stats live in `RoConfig`
/// (looked up by the attack names the fighter carries); this is the
/// mutable, per-fighter state. `armour` is the fighter's "real" HP and
/// lives on the owning entity as `hp`/`max_hp` directly (it is an
/// indexed column per the data model, not part of this blob); `shield`
/// is the overlay pool damage drains first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatData {
    pub target: Option<TargetKey>,
    pub friendly_in_range: bool,
    pub shield: u64,
    pub max_shield: u64,
    pub effects: BTreeMap<EffectKind, Effect>,
}

/// In-progress mining state for a character assigned to a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiningData {
    pub active: bool,
}

/// A drained-HP record produced by a `gain_hp` attack, keyed so the
/// multi-attacker reconciliation pass can look up every attacker that
/// drained a given victim this block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainRecord {
    pub victim: TargetKey,
    pub attacker: CharacterId,
    pub amount: u64,
}
