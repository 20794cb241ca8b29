//! # Combat subsystem
//!
//! Target acquisition, damage dealing (gain-HP pass, reconciliation,
//! regular pass, self-destruct cascade), kill processing, HP/shield
//! regeneration, and fame attribution — the hardest and largest
//! component in the pipeline.
//!
//! `deal_combat_damage` produces the set of fighters that died this
//! phase; the pipeline driver feeds that set to `attribute_fame` (which
//! must run before the dead rows disappear, since it reads the damage
//! list) and then to `process_kills` (which deletes them).

pub mod damage;
pub mod fame;
pub mod kills;
pub mod modifiers;
pub mod regen;
pub mod snapshot;
pub mod targets;

pub use damage::deal_combat_damage;
pub use fame::attribute_fame;
pub use kills::process_kills;
pub use regen::regenerate_hp;
pub use targets::find_combat_targets;
