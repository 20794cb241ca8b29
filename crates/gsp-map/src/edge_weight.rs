use crate::oracle::{MapOracle, NO_CONNECTION};
use gsp_hexgrid::Coord;
use shared_types::Faction;

/// The movement edge weight for a character of faction `f` stepping
/// from `u` to `v`.
///
/// Base weight comes from the map oracle. If `v` sits in a starter zone
/// of some faction `g != Invalid`: own-faction transit is three times
/// faster (`w / 3`, floor division); any other faction is blocked
/// outright. Otherwise the base weight applies unchanged.
pub fn movement_edge_weight(map: &dyn MapOracle, faction: Faction, u: Coord, v: Coord) -> u32 {
    let w = map.edge_weight(u, v);
    if w == NO_CONNECTION {
        return NO_CONNECTION;
    }
    let starter = map.safe_zones().starter_for(v);
    if starter != Faction::Invalid {
        if starter == faction {
            return w / 3;
        }
        return NO_CONNECTION;
    }
    w
}
