use crate::oracle::{MapOracle, SafeZones, NO_CONNECTION};
use gsp_hexgrid::Coord;
use shared_types::{Faction, RegionId};
use std::collections::{HashMap, HashSet};

/// An in-memory `MapOracle` + `SafeZones` adapter over an explicit tile
/// table. This stands in for the static base-map tile data, a
/// read-only external input — production deployments load that table
/// from the host daemon instead of constructing one of these directly.
#[derive(Debug, Clone, Default)]
pub struct GridMapOracle {
    /// Tiles that exist on the map, with their base traversal weight.
    passable: HashMap<Coord, u32>,
    regions: HashMap<Coord, RegionId>,
    no_combat: HashSet<Coord>,
    starter_zones: HashMap<Coord, Faction>,
    low_prize_zones: HashSet<Coord>,
}

impl GridMapOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tile(&mut self, coord: Coord, weight: u32) -> &mut Self {
        self.passable.insert(coord, weight);
        self
    }

    pub fn set_region(&mut self, coord: Coord, region: RegionId) -> &mut Self {
        self.regions.insert(coord, region);
        self
    }

    pub fn set_no_combat(&mut self, coord: Coord) -> &mut Self {
        self.no_combat.insert(coord);
        self
    }

    pub fn set_starter_zone(&mut self, coord: Coord, faction: Faction) -> &mut Self {
        self.starter_zones.insert(coord, faction);
        self
    }

    pub fn set_low_prize_zone(&mut self, coord: Coord) -> &mut Self {
        self.low_prize_zones.insert(coord);
        self
    }

    /// Fills a filled hex disc of radius `radius` around `centre` with
    /// uniform weight `weight`. Convenient for building small test maps.
    pub fn fill_disc(&mut self, centre: Coord, radius: u32, weight: u32) -> &mut Self {
        for coord in centre.ball(radius) {
            self.passable.insert(coord, weight);
        }
        self
    }
}

impl MapOracle for GridMapOracle {
    fn is_on_map(&self, coord: Coord) -> bool {
        self.passable.contains_key(&coord)
    }

    fn is_passable(&self, coord: Coord) -> bool {
        self.passable.contains_key(&coord)
    }

    fn edge_weight(&self, from: Coord, to: Coord) -> u32 {
        if from.distance(to) != 1 {
            return NO_CONNECTION;
        }
        match self.passable.get(&to) {
            Some(w) => *w,
            None => NO_CONNECTION,
        }
    }

    fn region_id(&self, coord: Coord) -> Option<RegionId> {
        self.regions.get(&coord).copied()
    }

    fn safe_zones(&self) -> &dyn SafeZones {
        self
    }
}

impl SafeZones for GridMapOracle {
    fn is_no_combat(&self, coord: Coord) -> bool {
        self.no_combat.contains(&coord)
    }

    fn starter_for(&self, coord: Coord) -> Faction {
        self.starter_zones.get(&coord).copied().unwrap_or(Faction::Invalid)
    }

    fn is_low_prize_zone(&self, coord: Coord) -> bool {
        self.low_prize_zones.contains(&coord)
    }
}
