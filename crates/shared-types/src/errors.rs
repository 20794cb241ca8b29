use thiserror::Error;

/// The two error taxonomies used across the engine.
///
/// `GspError` covers input rejections: a malformed or disallowed move.
/// Callers at move granularity turn these into a silent no-op plus a
/// `debug!` log line — a `GspError` must never propagate out of the
/// pipeline driver.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GspError {
    #[error("unknown account: {0}")]
    UnknownAccount(String),

    #[error("account already registered: {0}")]
    AccountAlreadyExists(String),

    #[error("character limit reached for account {account} ({limit})")]
    CharacterLimitReached { account: String, limit: u32 },

    #[error("unknown character: {0}")]
    UnknownCharacter(u64),

    #[error("unknown building: {0}")]
    UnknownBuilding(u64),

    #[error("unknown region: {0}")]
    UnknownRegion(u64),

    #[error("character {0} is busy and cannot accept this move")]
    CharacterBusy(u64),

    #[error("character {0} is not on the map")]
    CharacterNotOnMap(u64),

    #[error("target coordinate is not reachable")]
    Unreachable,

    #[error("quantity {0} exceeds the maximum of {1}")]
    QuantityOutOfBounds(u64, u64),

    #[error("move is not signed by the owning account")]
    NotOwner,

    #[error("malformed move: {0}")]
    Malformed(String),

    #[error("building does not accept this faction")]
    FactionMismatch,

    #[error("insufficient cargo space")]
    InsufficientCargo,

    #[error("insufficient inventory")]
    InsufficientInventory,
}

pub type GspResult<T> = Result<T, GspError>;

/// An impossible condition. Never caught; the pipeline driver converts
/// this into a process abort with a diagnostic. Kept
/// distinct from `GspError` so the type system forces the two
/// taxonomies to be handled differently at every call site.
#[derive(Debug, Clone, Error)]
pub enum InvariantError {
    #[error("dangling ongoing-operation back-reference: op {op_id} points to missing entity {entity_id}")]
    DanglingOngoingRef { op_id: u64, entity_id: u64 },

    #[error("faction mismatch: entity {entity_id} faction {entity_faction:?} != owner faction {owner_faction:?}")]
    FactionMismatch {
        entity_id: u64,
        entity_faction: String,
        owner_faction: String,
    },

    #[error("HP regeneration overshoot for entity {entity_id}: {hp} > {max_hp}")]
    RegenOvershoot { entity_id: u64, hp: u64, max_hp: u64 },

    #[error("unknown ongoing-operation variant tag {0}")]
    UnknownOpVariant(u32),

    #[error("character {0} has inconsistent location: both (x,y) and building set, or neither")]
    InconsistentLocation(u64),

    #[error("busy_blocks/ongoing_op_id mismatch for character {0}")]
    BusyStateMismatch(u64),

    #[error("quantity invariant violated: {0} > {1}")]
    QuantityOverflow(u64, u64),

    #[error("other invariant violated: {0}")]
    Other(String),
}
