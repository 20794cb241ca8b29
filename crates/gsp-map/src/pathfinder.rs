use crate::edge_weight::movement_edge_weight;
use crate::oracle::{MapOracle, NO_CONNECTION};
use gsp_hexgrid::{coord_order, Coord};
use shared_types::Faction;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// A* over the hex graph: Dijkstra with an L1
/// lower-bound heuristic (every edge costs at least 1, so L1 distance
/// never overestimates the true remaining cost). Ties on equal
/// `f = g + h` are broken by the deterministic coordinate order
/// (lexicographic on `(x, y)`), so two implementations expanding the
/// same frontier always pick the same next node.
///
/// Returns the inclusive step list from `source` to `target`, or `None`
/// if no path exists within `node_budget` expansions.
pub fn find_path(
    map: &dyn MapOracle,
    faction: Faction,
    source: Coord,
    target: Coord,
    node_budget: u32,
) -> Option<Vec<Coord>> {
    if source == target {
        return Some(vec![source]);
    }
    if !map.is_on_map(source) || !map.is_on_map(target) {
        return None;
    }

    #[derive(Clone, Copy, PartialEq, Eq)]
    struct Entry {
        f: u32,
        coord: Coord,
    }

    impl Ord for Entry {
        fn cmp(&self, other: &Self) -> Ordering {
            // BinaryHeap is a max-heap; invert cost ordering to get the
            // smallest f first, then the lexicographically smallest
            // coordinate for deterministic tie-breaks.
            other
                .f
                .cmp(&self.f)
                .then_with(|| coord_order(&other.coord, &self.coord))
        }
    }
    impl PartialOrd for Entry {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    let mut g_score: HashMap<Coord, u32> = HashMap::new();
    let mut came_from: HashMap<Coord, Coord> = HashMap::new();
    let mut open = BinaryHeap::new();

    g_score.insert(source, 0);
    open.push(Entry { f: source.distance(target), coord: source });

    let mut expansions: u32 = 0;

    while let Some(Entry { coord, .. }) = open.pop() {
        if coord == target {
            return Some(reconstruct_path(&came_from, source, target));
        }

        expansions += 1;
        if expansions > node_budget {
            return None;
        }

        let current_g = *g_score.get(&coord).unwrap_or(&u32::MAX);

        let mut neighbours: Vec<Coord> = coord.neighbours().collect();
        neighbours.sort_by(coord_order);

        for next in neighbours {
            if !map.is_on_map(next) {
                continue;
            }
            let w = movement_edge_weight(map, faction, coord, next);
            if w == NO_CONNECTION {
                continue;
            }
            let tentative_g = current_g.saturating_add(w.max(1));
            if tentative_g < *g_score.get(&next).unwrap_or(&u32::MAX) {
                g_score.insert(next, tentative_g);
                came_from.insert(next, coord);
                let f = tentative_g.saturating_add(next.distance(target));
                open.push(Entry { f, coord: next });
            }
        }
    }

    None
}

fn reconstruct_path(came_from: &HashMap<Coord, Coord>, source: Coord, target: Coord) -> Vec<Coord> {
    let mut path = vec![target];
    let mut cursor = target;
    while cursor != source {
        cursor = came_from[&cursor];
        path.push(cursor);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests;
