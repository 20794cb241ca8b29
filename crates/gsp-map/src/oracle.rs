use gsp_hexgrid::Coord;
use shared_types::{Faction, RegionId};

/// Sentinel returned by `edge_weight` when the edge cannot be traversed
/// at all.
pub const NO_CONNECTION: u32 = u32::MAX;

/// Read-only, pure map data. The production implementation is backed by
/// the static base-map tile data, a read-only external input; this
/// trait is the port that collaborator must satisfy.
pub trait MapOracle: Send + Sync {
    fn is_on_map(&self, coord: Coord) -> bool;
    fn is_passable(&self, coord: Coord) -> bool;
    /// `NO_CONNECTION` when `to` is impassable or not adjacent to `from`.
    fn edge_weight(&self, from: Coord, to: Coord) -> u32;
    fn region_id(&self, coord: Coord) -> Option<RegionId>;
    fn safe_zones(&self) -> &dyn SafeZones;
}

/// No-combat zones, per-faction starter zones, and low-prize-probability
/// prospecting zones.
pub trait SafeZones: Send + Sync {
    fn is_no_combat(&self, coord: Coord) -> bool;
    /// The faction whose starter zone covers `coord`, or `Faction::Invalid`.
    fn starter_for(&self, coord: Coord) -> Faction;
    /// Whether prospecting at `coord` uses the low-prize-probability
    /// table instead of the normal one.
    fn is_low_prize_zone(&self, coord: Coord) -> bool;
}
