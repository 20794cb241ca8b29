//! # Shared Types
//!
//! Cross-crate primitives for the game-state processor: entity identity,
//! faction, the bounded-quantity newtype used throughout inventories and
//! mining yields, and the two error taxonomies defined for the engine
//! (invariant failures vs. move rejections).
//!
//! Every other crate in the workspace depends on this one; nothing in here
//! depends on any other workspace crate.

pub mod errors;
pub mod faction;
pub mod ids;
pub mod quantity;

pub use errors::{GspError, GspResult, InvariantError};
pub use faction::Faction;
pub use ids::{AccountName, BuildingId, CharacterId, EntityKind, OngoingOpId, RegionId};
pub use quantity::{BoundedQuantity, MAX_QUANTITY};
