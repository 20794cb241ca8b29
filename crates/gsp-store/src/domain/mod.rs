//! # Domain entities for the game-state processor
//!
//! Pure data definitions for every entity row, plus the small shared
//! substructures (`Inventory`, `RegenData`, `MovementData`, `CombatData`)
//! several of those rows embed.

pub mod common;
pub mod entities;

pub use common::*;
pub use entities::*;
