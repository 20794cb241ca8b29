use serde::{Deserialize, Serialize};

/// A playable faction, plus the two sentinels the map and combat layers
/// need: `Ancient` for neutral map structures and `Invalid` for "no
/// faction" (used by `starter_for` and similar oracle answers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Faction {
    Red,
    Green,
    Blue,
    Yellow,
    /// Built-in faction for neutral map structures.
    Ancient,
    /// Sentinel meaning "no faction applies here".
    Invalid,
}

impl Faction {
    /// All player-controlled factions, in the canonical tie-break order
    /// used wherever factions themselves need a deterministic ordering.
    pub const PLAYABLE: [Faction; 4] = [Faction::Red, Faction::Green, Faction::Blue, Faction::Yellow];

    pub fn is_playable(self) -> bool {
        matches!(
            self,
            Faction::Red | Faction::Green | Faction::Blue | Faction::Yellow
        )
    }
}
