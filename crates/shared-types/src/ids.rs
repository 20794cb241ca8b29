use serde::{Deserialize, Serialize};
use std::fmt;

/// Account primary key. Accounts are keyed by their chosen name rather
/// than a numeric id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountName(pub String);

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! numeric_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(v: u64) -> Self {
                $name(v)
            }
        }
    };
}

numeric_id!(CharacterId);
numeric_id!(BuildingId);
numeric_id!(RegionId);
numeric_id!(OngoingOpId);

/// Discriminant used for the `(kind, id)` tie-break rule: when two
/// entities of different kinds share numeric space (e.g. a character
/// id and a building id could coincide), kind sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Character,
    Building,
}

/// A `(kind, id)` key giving a total, deterministic order across the two
/// entity types that can be combat targets or drop sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TargetKey {
    pub kind: EntityKind,
    pub id: u64,
}

impl TargetKey {
    pub fn character(id: CharacterId) -> Self {
        TargetKey { kind: EntityKind::Character, id: id.0 }
    }

    pub fn building(id: BuildingId) -> Self {
        TargetKey { kind: EntityKind::Building, id: id.0 }
    }
}
