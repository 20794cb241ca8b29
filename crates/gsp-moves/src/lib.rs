//! Parses a block's JSON move payload and applies each command against
//! the entity store, in the fixed admin-then-player, array order that
//! makes the pipeline deterministic.

pub mod processor;
pub mod schema;

pub use processor::process_admin_and_player_moves;
pub use schema::{AdminCommand, AdminMove, BlockInput, BlockMeta, MoveCommand, PlayerMove, RawBlockInput};

use shared_types::GspResult;
use tracing::debug;

/// Deserializes a raw block payload. A JSON document that doesn't even
/// parse as an object, or whose `block` field is missing/malformed,
/// fails the whole block — there's no sensible height/timestamp to run
/// a block under otherwise. Each entry of `admin`/`moves` is then
/// decoded independently against the already-parsed JSON values: one
/// unrecognised or malformed command is dropped (logged at debug) and
/// every other command in the batch still applies, in its original
/// order.
pub fn parse_block_input(raw: &str) -> GspResult<BlockInput> {
    let raw_input: RawBlockInput =
        serde_json::from_str(raw).map_err(|err| shared_types::GspError::Malformed(err.to_string()))?;

    let admin = raw_input
        .admin
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<AdminMove>(value.clone()) {
            Ok(mv) => Some(mv),
            Err(err) => {
                debug!(?err, command = %value, "admin command rejected: malformed");
                None
            }
        })
        .collect();

    let moves = raw_input
        .moves
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<PlayerMove>(value.clone()) {
            Ok(mv) => Some(mv),
            Err(err) => {
                debug!(?err, command = %value, "player move rejected: malformed");
                None
            }
        })
        .collect();

    Ok(BlockInput { block: raw_input.block, admin, moves })
}
