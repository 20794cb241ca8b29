//! # Map oracle, dynamic obstacles, and path-finding
//!
//! Three tightly-coupled pieces of the read side of the world:
//!
//! - `oracle` / `grid_oracle`: the pure, read-only `MapOracle` port and
//!   an in-memory reference adapter.
//! - `edge_weight`: the faction-aware movement cost rule.
//! - `obstacle_index`: the per-block spatial index of vehicles and
//!   building footprints.
//! - `pathfinder`: A*/Dijkstra step-list search over the hex graph.

pub mod edge_weight;
pub mod grid_oracle;
pub mod obstacle_index;
pub mod oracle;
pub mod pathfinder;

pub use edge_weight::movement_edge_weight;
pub use grid_oracle::GridMapOracle;
pub use obstacle_index::DynamicObstacleIndex;
pub use oracle::{MapOracle, SafeZones, NO_CONNECTION};
pub use pathfinder::find_path;
