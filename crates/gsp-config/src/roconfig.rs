use gsp_hexgrid::Coord;
use gsp_store::EffectKind;
use serde::{Deserialize, Serialize};
use shared_types::Faction;
use std::collections::BTreeMap;

/// A duration-limited modifier a weapon applies to its target on hit,
/// e.g. a slow, a hit-chance debuff, or `mentecon`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectGrant {
    pub kind: EffectKind,
    pub magnitude_percent: i64,
    pub duration_blocks: u32,
}

/// Static stats for one attack a vehicle or building can carry.
///
/// `range`, when set, gates whether a target is even eligible during
/// damage-dealing's pass B (§4.9); it is distinct from the fighter's
/// own `attack_range`, which is the search radius used for target
/// acquisition. `area`, when set without `range`, centres the AoE on
/// the attacker itself (a self-centred pulse); combined with `range`,
/// it centres on the current target instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponConfig {
    pub name: String,
    /// Drains HP from the target and returns it to the attacker,
    /// subject to multi-attacker reconciliation.
    pub gain_hp: bool,
    /// A friendly-facing attack (e.g. a repair beam); target
    /// acquisition tracks these via `friendly_in_range` instead of
    /// picking an enemy target.
    pub friendly: bool,
    pub min_damage: u64,
    pub max_damage: u64,
    /// Compared against the target's `size` for the `base_hit_chance`
    /// formula: `100` when `target_size >= weapon_size`, otherwise
    /// `floor(100 * target_size / weapon_size)`.
    pub weapon_size: u64,
    pub hit_chance_mod_percent: i64,
    /// Percent of incoming damage routed at the shield before armour;
    /// defaults to 100 (all of it) when absent from hand-authored
    /// config.
    pub shield_percent: u32,
    pub armour_percent: u32,
    pub range: Option<u32>,
    pub area: Option<u32>,
    pub applies_effect: Option<EffectGrant>,
}

/// The threshold and stat bonuses of the global low-HP boost: once a
/// fighter's armour falls to or below `threshold_percent` of its max,
/// every one of its attacks gets these bonuses until armour recovers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LowHpBoostConfig {
    pub threshold_percent: u64,
    pub damage_mod_percent: i64,
    pub range_mod_percent: i64,
    pub hit_chance_mod_percent: i64,
}

/// Per-block yield range for a mining region.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MiningRate {
    pub min: u64,
    pub max: u64,
}

/// Static stats for an item template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemConfig {
    pub name: String,
    pub cargo_size: u64,
}

/// Static stats for a vehicle template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleConfig {
    pub name: String,
    pub speed: u64,
    pub cargo_space: u64,
    pub max_hp: u64,
    pub max_shield: u64,
    /// Target size for the `base_hit_chance` formula; bigger vehicles
    /// are easier to hit with small-calibre weapons.
    pub size: u64,
    pub attack_range: u32,
    /// Attack names, looked up in `RoConfig::weapons`.
    pub attacks: Vec<String>,
    pub self_destruct: Option<String>,
    pub armour_regen_rate_milli: u64,
    pub shield_regen_rate_milli: u64,
}

/// Static stats for a building template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingConfig {
    pub name: String,
    pub max_hp: u64,
    pub max_shield: u64,
    pub construction_blocks: u32,
    pub can_regen: bool,
    pub attack_range: u32,
    pub attacks: Vec<String>,
    pub self_destruct: Option<String>,
    pub armour_regen_rate_milli: u64,
    pub shield_regen_rate_milli: u64,
}

/// Static stats for an equippable fitment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitmentConfig {
    pub name: String,
    pub damage_mod_percent: i64,
    pub range_mod_percent: i64,
    pub hit_chance_mod_percent: i64,
}

/// A prize entry reachable via prospecting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizeConfig {
    pub name: String,
    /// Maximum number of times this prize may ever be awarded, chain-wide.
    pub cap: u64,
    /// Chance out of 1_000_000 in a normal-prize zone.
    pub probability_per_million: u64,
    /// Chance out of 1_000_000 in a low-prize zone.
    pub low_zone_probability_per_million: u64,
}

/// One entry in the weighted table prospection draws from to decide a
/// region's resource type once its prospection finalises.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProspectingResourceConfig {
    pub name: String,
    pub weight: u64,
    pub min_amount: u64,
    pub max_amount: u64,
}

/// Definition of one faction's starter zone: every tile it covers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarterZoneConfig {
    pub faction: Faction,
    pub tiles: Vec<Coord>,
}

/// The read-only, per-chain configuration the host daemon supplies.
/// Treated as an immutable value threaded through `Context`, never a
/// module-level global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoConfig {
    pub items: BTreeMap<String, ItemConfig>,
    pub vehicles: BTreeMap<String, VehicleConfig>,
    pub buildings: BTreeMap<String, BuildingConfig>,
    pub fitments: BTreeMap<String, FitmentConfig>,
    pub weapons: BTreeMap<String, WeaponConfig>,
    pub prizes: BTreeMap<String, PrizeConfig>,
    pub starter_zones: Vec<StarterZoneConfig>,
    pub mining_rate: MiningRate,
    pub prospecting_resources: Vec<ProspectingResourceConfig>,
    pub low_hp_boost: LowHpBoostConfig,

    /// Sliding window (in blocks) for damage-list entries and fame
    /// attribution.
    pub damage_list_window: u64,
    /// Per-owner character count cap.
    pub character_limit_per_account: u32,
    /// Duration of a standard prospecting operation, in blocks.
    pub prospecting_blocks: u32,
    /// Chance (percent) an equipped fitment drops on character death.
    pub equipped_fitment_drop_percent: u32,
    /// Chance (percent) a building's stored inventory drops on destruction.
    pub building_inventory_drop_percent: u32,
    /// `blocked_turns` threshold before the movement processor
    /// invalidates cached path steps and forces a recompute.
    pub blocked_turns_recompute_threshold: u32,
    /// Post-hardfork blocked-turn penalty applied when stepping onto a
    /// same-faction vehicle's tile.
    pub same_faction_vehicle_blocked_turn_penalty: u32,
    /// Search-node budget for the path-finder.
    pub pathfinder_node_budget: u32,
    /// Fame points split among attackers' accounts when a character dies.
    pub fame_per_character_kill: u64,
    /// Fame points split among attackers' accounts when a building dies.
    pub fame_per_building_kill: u64,
}

impl RoConfig {
    /// A small, internally-consistent configuration sufficient for unit
    /// and integration tests; production deployments supply their own
    /// deserialized table over a wire format chosen by the host daemon.
    pub fn test_fixture() -> Self {
        let mut items = BTreeMap::new();
        items.insert(
            "gold".to_string(),
            ItemConfig { name: "gold".to_string(), cargo_size: 1 },
        );
        items.insert(
            "silver".to_string(),
            ItemConfig { name: "silver".to_string(), cargo_size: 1 },
        );
        items.insert(
            "bronze".to_string(),
            ItemConfig { name: "bronze".to_string(), cargo_size: 1 },
        );
        items.insert(
            "ore".to_string(),
            ItemConfig { name: "ore".to_string(), cargo_size: 1 },
        );

        let mut weapons = BTreeMap::new();
        weapons.insert(
            "autocannon".to_string(),
            WeaponConfig {
                name: "autocannon".to_string(),
                gain_hp: false,
                friendly: false,
                min_damage: 10,
                max_damage: 20,
                weapon_size: 3,
                hit_chance_mod_percent: 0,
                shield_percent: 100,
                armour_percent: 100,
                range: None,
                area: None,
                applies_effect: None,
            },
        );
        weapons.insert(
            "syphon".to_string(),
            WeaponConfig {
                name: "syphon".to_string(),
                gain_hp: true,
                friendly: false,
                min_damage: 5,
                max_damage: 10,
                weapon_size: 3,
                hit_chance_mod_percent: 0,
                shield_percent: 100,
                armour_percent: 100,
                range: None,
                area: None,
                applies_effect: None,
            },
        );
        weapons.insert(
            "self_destruct_charge".to_string(),
            WeaponConfig {
                name: "self_destruct_charge".to_string(),
                gain_hp: false,
                friendly: false,
                min_damage: 500,
                max_damage: 500,
                weapon_size: 1,
                hit_chance_mod_percent: 10_000,
                shield_percent: 100,
                armour_percent: 100,
                range: Some(0),
                area: Some(1),
                applies_effect: None,
            },
        );

        let mut vehicles = BTreeMap::new();
        vehicles.insert(
            "basic_tank".to_string(),
            VehicleConfig {
                name: "basic_tank".to_string(),
                speed: 10,
                cargo_space: 100,
                max_hp: 1000,
                max_shield: 500,
                size: 3,
                attack_range: 4,
                attacks: vec!["autocannon".to_string()],
                self_destruct: Some("self_destruct_charge".to_string()),
                armour_regen_rate_milli: 2000,
                shield_regen_rate_milli: 5000,
            },
        );

        let mut buildings = BTreeMap::new();
        buildings.insert(
            "outpost".to_string(),
            BuildingConfig {
                name: "outpost".to_string(),
                max_hp: 5000,
                max_shield: 1000,
                construction_blocks: 20,
                can_regen: true,
                attack_range: 6,
                attacks: vec!["autocannon".to_string()],
                self_destruct: None,
                armour_regen_rate_milli: 1000,
                shield_regen_rate_milli: 3000,
            },
        );

        let mut fitments = BTreeMap::new();
        fitments.insert(
            "armour_plate".to_string(),
            FitmentConfig {
                name: "armour_plate".to_string(),
                damage_mod_percent: 0,
                range_mod_percent: 0,
                hit_chance_mod_percent: -5,
            },
        );

        let mut prizes = BTreeMap::new();
        prizes.insert(
            "gold".to_string(),
            PrizeConfig {
                name: "gold".to_string(),
                cap: 1000,
                probability_per_million: 300,
                low_zone_probability_per_million: 30,
            },
        );
        prizes.insert(
            "silver".to_string(),
            PrizeConfig {
                name: "silver".to_string(),
                cap: 1_000_000,
                probability_per_million: 100_000,
                low_zone_probability_per_million: 10_000,
            },
        );
        prizes.insert(
            "bronze".to_string(),
            PrizeConfig {
                name: "bronze".to_string(),
                cap: 1000,
                probability_per_million: 100,
                low_zone_probability_per_million: 10,
            },
        );

        RoConfig {
            items,
            vehicles,
            buildings,
            fitments,
            weapons,
            prizes,
            starter_zones: Vec::new(),
            mining_rate: MiningRate { min: 1, max: 10 },
            prospecting_resources: vec![
                ProspectingResourceConfig { name: "gold".to_string(), weight: 1, min_amount: 50, max_amount: 100 },
                ProspectingResourceConfig { name: "silver".to_string(), weight: 4, min_amount: 100, max_amount: 300 },
                ProspectingResourceConfig { name: "bronze".to_string(), weight: 10, min_amount: 200, max_amount: 500 },
            ],
            low_hp_boost: LowHpBoostConfig {
                threshold_percent: 25,
                damage_mod_percent: 20,
                range_mod_percent: 0,
                hit_chance_mod_percent: 10,
            },
            damage_list_window: 100,
            character_limit_per_account: 20,
            prospecting_blocks: 10,
            equipped_fitment_drop_percent: 20,
            building_inventory_drop_percent: 30,
            blocked_turns_recompute_threshold: 5,
            same_faction_vehicle_blocked_turn_penalty: 3,
            pathfinder_node_budget: 10_000,
            fame_per_character_kill: 10,
            fame_per_building_kill: 100,
        }
    }
}
