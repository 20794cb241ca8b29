use crate::domain::common::{CombatData, Inventory, MiningData, MovementData, RegenData};
use gsp_hexgrid::Coord;
use serde::{Deserialize, Serialize};
use shared_types::{AccountName, BuildingId, CharacterId, Faction, OngoingOpId, RegionId};

/// A registered player account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: AccountName,
    pub faction: Faction,
    pub kills: u64,
    pub fame: u64,
    pub coin_balance: u64,
    pub banked_goods: Inventory,
}

impl Account {
    pub fn new(name: AccountName, faction: Faction) -> Self {
        Account {
            name,
            faction,
            kills: 0,
            fame: 0,
            coin_balance: 0,
            banked_goods: Inventory::new(),
        }
    }
}

/// Where a character physically is: either on the open map, or inside a
/// building. Modelled as an enum rather than two nullable fields so the
/// "never both, never neither" invariant is a type guarantee rather
/// than a runtime check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Map(Coord),
    Building(BuildingId),
}

/// A player-owned character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub owner: AccountName,
    pub faction: Faction,
    pub location: Location,
    /// Set while an `enter building` move is pending for this block;
    /// processed after movement, later in the pipeline.
    pub enter_building_id: Option<BuildingId>,
    pub busy_blocks: u32,
    pub ongoing_op_id: Option<OngoingOpId>,
    pub is_moving: bool,
    pub is_mining: bool,
    pub attack_range: u32,
    pub can_regen: bool,
    pub hp: u64,
    pub max_hp: u64,
    pub regen: RegenData,
    pub vehicle_type: String,
    pub fitments: Vec<String>,
    /// Attack names this vehicle carries, looked up in
    /// `RoConfig::weapons`; copied from the vehicle template at
    /// creation since fitments modify weapon output, not the loadout.
    pub attacks: Vec<String>,
    /// Weapon name used for the self-destruct cascade on death, if any.
    pub self_destruct: Option<String>,
    pub movement: MovementData,
    pub combat: CombatData,
    pub mining: MiningData,
    pub speed: u64,
    pub cargo_space: u64,
    pub inventory: Inventory,
}

impl Character {
    /// Invariant: `busy_blocks > 0 <=> ongoing_op_id set`.
    pub fn busy_state_consistent(&self) -> bool {
        (self.busy_blocks > 0) == self.ongoing_op_id.is_some()
    }
}

/// A player-owned or ancient (neutral) building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub building_type: String,
    /// `None` for ancient (neutral, map-seeded) buildings.
    pub owner: Option<AccountName>,
    pub faction: Faction,
    pub centre: Coord,
    pub hp: u64,
    pub max_hp: u64,
    pub regen: RegenData,
    pub can_regen: bool,
    pub attack_range: u32,
    pub combat: CombatData,
    pub attacks: Vec<String>,
    pub self_destruct: Option<String>,
    pub is_foundation: bool,
    pub construction_inventory: Inventory,
    pub rotation: u8,
    pub ongoing_construction_id: Option<OngoingOpId>,
    /// Opaque config blob, swapped in atomically by the
    /// `BuildingConfigUpdate` ongoing-op finaliser.
    pub config: String,
}

impl Building {
    pub fn is_ancient(&self) -> bool {
        self.owner.is_none() && self.faction == Faction::Ancient
    }
}

/// A mining region. The row is materialised lazily (`resource_left`
/// starts at the configured regional total the first time a
/// non-trivial change happens); modelling it as always-present here
/// keeps the store API simple, with `modified_height == 0` as the
/// lazily-created marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub modified_height: u64,
    pub resource_left: u64,
    pub prospecting_character: Option<CharacterId>,
    pub prospection_result: Option<ProspectionResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProspectionResult {
    pub resource_name: String,
    pub height: u64,
}

/// The tagged union of ongoing-operation variants. An unhandled
/// variant in a `match` is a fatal invariant failure, never a default
/// branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OngoingOpVariant {
    Prospection,
    ArmourRepair,
    BlueprintCopy { blueprint: String, copies: u32 },
    ItemConstructionOriginal { blueprint: String, steps_remaining: u32, total_steps: u32 },
    ItemConstructionCopies { blueprint: String, copies: u32 },
    BuildingConstruction { building_type: String },
    BuildingConfigUpdate { new_config: String },
}

/// A pending operation that finishes processing at a future height.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OngoingOp {
    pub id: OngoingOpId,
    pub height_of_next_processing: u64,
    pub character_id: Option<CharacterId>,
    pub building_id: Option<BuildingId>,
    pub variant: OngoingOpVariant,
}

/// `(victim_id, attacker_id)` keyed by the height of the hit,
/// garbage-collected once out of the sliding window. `attacker_id` is
/// a `TargetKey`-style `(kind, id)` pair rather than a bare
/// `CharacterId` because buildings deal damage too (e.g. ancient
/// turrets), and both must be fame-attributable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageListEntry {
    pub victim: shared_types::TargetKey,
    pub attacker: shared_types::TargetKey,
    pub height: u64,
}

/// Items lying on a map tile, dropped by a character or a kill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundLoot {
    pub coord: Coord,
    pub inventory: Inventory,
}

/// A per-account stash inside a building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingInventoryRow {
    pub building_id: BuildingId,
    pub account: AccountName,
    pub inventory: Inventory,
}

/// Running tally of how many times a prize has been awarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeCounter {
    pub name: String,
    pub found: u64,
}

/// Side of a trade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Bid,
    Ask,
}

/// A pending trade order reserving coin or items inside a building,
/// needed so building destruction has something concrete to refund or
/// drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOrder {
    pub building_id: BuildingId,
    pub account: AccountName,
    pub side: TradeSide,
    pub item: String,
    pub quantity: u64,
    pub unit_price: u64,
    pub reserved_amount: u64,
}
