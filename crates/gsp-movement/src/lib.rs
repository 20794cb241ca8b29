//! # Movement processor
//!
//! Advances every moving character by its integer speed this block,
//! stepping along a lazily-computed path and consuming the dynamic
//! obstacle index as it goes. `blocked_turns` only ever increases or
//! resets to zero — a sustained blockage eventually invalidates the
//! cached path so the next block recomputes it.

use gsp_config::{Context, Fork};
use gsp_hexgrid::Coord;
use gsp_map::{find_path, movement_edge_weight, DynamicObstacleIndex, MapOracle, NO_CONNECTION};
use gsp_store::domain::entities::Location;
use gsp_store::Store;

/// Runs the movement phase for one block, mutating `obstacles` in step
/// with every character that actually moves so later phases (and later
/// characters processed in this same pass) see an up-to-date index.
pub fn process_movement(store: &Store, ctx: &Context, map: &dyn MapOracle, obstacles: &mut DynamicObstacleIndex) {
    let mut character_ids = store.character_ids();
    character_ids.sort();

    for id in character_ids {
        let Some(mut character) = store.checkout_character(id) else { continue };
        if !character.is_moving {
            continue;
        }
        let Location::Map(mut current) = character.location else { continue };
        let faction = character.faction;

        if let Some(&next) = character.movement.steps.first() {
            if !map.is_on_map(next) || movement_edge_weight(map, faction, current, next) == NO_CONNECTION {
                character.movement.steps.clear();
            }
        }
        recompute_path_if_needed(&mut character.movement, current, map, faction, ctx);

        character.movement.partial_step += character.speed;

        loop {
            let Some(&next) = character.movement.steps.first() else { break };
            let weight = movement_edge_weight(map, faction, current, next);
            if weight == NO_CONNECTION {
                character.movement.steps.clear();
                break;
            }
            if character.movement.partial_step < weight as u64 {
                break;
            }

            let occupant = obstacles.vehicle_faction(next);
            let same_faction_vehicle = occupant == Some(faction);
            let blocked = obstacles.is_building(next)
                || occupant.is_some_and(|f| f != faction)
                || (same_faction_vehicle && !ctx.fork_active(Fork::SameFactionVehiclesDontBlock));

            if blocked {
                character.movement.blocked_turns += 1;
                if character.movement.blocked_turns > ctx.config.blocked_turns_recompute_threshold {
                    character.movement.steps.clear();
                }
                break;
            }

            character.movement.partial_step -= weight as u64;
            obstacles.remove_vehicle(current);
            current = next;
            character.location = Location::Map(current);
            character.movement.steps.remove(0);
            character.movement.blocked_turns = if same_faction_vehicle {
                ctx.config.same_faction_vehicle_blocked_turn_penalty
            } else {
                0
            };
            obstacles.add_vehicle(current, faction);

            if character.movement.steps.is_empty() {
                if character.movement.waypoints.first() == Some(&current) {
                    character.movement.waypoints.remove(0);
                }
                recompute_path_if_needed(&mut character.movement, current, map, faction, ctx);
            }
        }

        if character.movement.steps.is_empty() && character.movement.waypoints.is_empty() {
            character.is_moving = false;
        }
    }
}

fn recompute_path_if_needed(
    movement: &mut gsp_store::domain::common::MovementData,
    current: Coord,
    map: &dyn MapOracle,
    faction: shared_types::Faction,
    ctx: &Context,
) {
    if !movement.steps.is_empty() || movement.waypoints.is_empty() {
        return;
    }
    let target = movement.waypoints[0];
    if target == current {
        movement.waypoints.remove(0);
        return;
    }
    match find_path(map, faction, current, target, ctx.config.pathfinder_node_budget) {
        Some(path) => movement.steps = path.into_iter().skip(1).collect(),
        // Unreachable target: drop it so the character doesn't spin on
        // it forever; remaining waypoints are tried on the next block.
        None => {
            movement.waypoints.remove(0);
        }
    }
}
