use gsp_hexgrid::Coord;
use serde::Deserialize;
use serde_json::Value;

/// Top-level block input. Unknown top-level fields are ignored by
/// `serde`'s default "extra fields are dropped on deserialize"
/// behaviour — there is no `deny_unknown_fields` anywhere in this
/// schema.
///
/// `admin`/`moves` are kept as raw JSON here rather than
/// `Vec<AdminMove>`/`Vec<PlayerMove>` directly: a `Vec<T>` deserialize
/// fails the whole array the moment one element doesn't parse, but
/// consensus requires a malformed *command* to be a no-op for that one
/// command only, never for the rest of the batch. `parse_block_input`
/// decodes each element individually against the raw values here.
#[derive(Debug, Deserialize)]
pub struct RawBlockInput {
    pub block: BlockMeta,
    #[serde(default)]
    pub admin: Vec<Value>,
    #[serde(default)]
    pub moves: Vec<Value>,
}

/// The decoded form of a block: every admin/player command that parsed
/// successfully, in their original array order. Commands that failed
/// to decode are simply absent — see `RawBlockInput`.
#[derive(Debug)]
pub struct BlockInput {
    pub block: BlockMeta,
    pub admin: Vec<AdminMove>,
    pub moves: Vec<PlayerMove>,
}

#[derive(Debug, Deserialize)]
pub struct BlockMeta {
    pub height: u64,
    pub timestamp: i64,
}

/// One player move: an owner name plus a tagged command object. Real
/// move payloads on the host chain nest this under a game-id key inside
/// a larger transaction move; the per-chain transport framing is
/// assumed already stripped away by the time a `PlayerMove` reaches
/// this crate.
#[derive(Debug, Deserialize)]
pub struct PlayerMove {
    pub name: String,
    #[serde(rename = "move")]
    pub command: MoveCommand,
}

/// A move submitted on the single admin channel. Admin moves are
/// processed first, in array order, ahead of every player move.
#[derive(Debug, Deserialize)]
pub struct AdminMove {
    #[serde(rename = "cmd")]
    pub command: AdminCommand,
}

/// Recognised admin commands. Anything else deserialises as a parse
/// failure for that one entry and is skipped; rejection is never
/// fatal to the rest of the batch.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminCommand {
    GrantCoin { account: String, amount: u64 },
    GrantPrize { account: String, prize: String },
    SetRegionResource { region: u64, amount: u64 },
}

/// Recognised player commands. Represented as a serde-default
/// externally-tagged enum: the JSON key names the command, the value
/// carries its fields. Any unrecognised key, or a recognised key with
/// malformed fields, fails to deserialize that one `PlayerMove` and is
/// reported up as a single command-level rejection rather than
/// aborting the whole batch.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveCommand {
    RegisterAccount {
        faction: String,
    },
    CreateCharacter {
        vehicle_type: String,
    },
    SetWaypoints {
        character_id: u64,
        waypoints: Vec<Coord>,
    },
    PickUpLoot {
        character_id: u64,
        item: String,
        quantity: u64,
    },
    DropLoot {
        character_id: u64,
        item: String,
        quantity: u64,
    },
    ConfigureFitments {
        character_id: u64,
        fitments: Vec<String>,
    },
    StartProspection {
        character_id: u64,
    },
    StartConstruction {
        character_id: u64,
        building_type: String,
    },
    EnterBuilding {
        character_id: u64,
        building_id: u64,
    },
    ExitBuilding {
        character_id: u64,
    },
    ConfigureBuilding {
        building_id: u64,
        config: String,
    },
    PlaceTradeOrder {
        building_id: u64,
        side: String,
        item: String,
        quantity: u64,
        unit_price: u64,
    },
    CancelTradeOrder {
        building_id: u64,
        item: String,
    },
}
