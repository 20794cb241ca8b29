use gsp_hexgrid::Coord;
use shared_types::Faction;
use std::collections::{HashMap, HashSet};

/// In-memory spatial index of dynamic obstacles: vehicles (by faction)
/// and building-occupied tiles. Rebuilt at the start of
/// combat/movement-relevant phases by scanning the store; kept in sync
/// incrementally within a phase via `add_vehicle`/`remove_vehicle`.
#[derive(Debug, Clone, Default)]
pub struct DynamicObstacleIndex {
    vehicles: HashMap<Coord, Faction>,
    buildings: HashSet<Coord>,
}

impl DynamicObstacleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vehicle(&mut self, coord: Coord, faction: Faction) {
        self.vehicles.insert(coord, faction);
    }

    pub fn remove_vehicle(&mut self, coord: Coord) {
        self.vehicles.remove(&coord);
    }

    pub fn add_building(&mut self, coord: Coord) {
        self.buildings.insert(coord);
    }

    /// Whether a vehicle sits on `coord`, optionally restricted to a
    /// specific faction.
    pub fn has_vehicle(&self, coord: Coord, faction: Option<Faction>) -> bool {
        match (self.vehicles.get(&coord), faction) {
            (Some(_), None) => true,
            (Some(f), Some(want)) => *f == want,
            (None, _) => false,
        }
    }

    pub fn vehicle_faction(&self, coord: Coord) -> Option<Faction> {
        self.vehicles.get(&coord).copied()
    }

    pub fn is_building(&self, coord: Coord) -> bool {
        self.buildings.contains(&coord)
    }

    /// A tile is free iff no building covers it and no vehicle of any
    /// faction sits on it.
    pub fn is_free(&self, coord: Coord) -> bool {
        !self.is_building(coord) && !self.vehicles.contains_key(&coord)
    }
}
