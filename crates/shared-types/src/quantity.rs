use serde::{Deserialize, Serialize};

/// Upper bound on any inventory quantity or "dual" multiplicand: bounded
/// by 10⁹ so products fit in 64 bits.
pub const MAX_QUANTITY: u64 = 1_000_000_000;

/// A quantity that is statically known to be `<= MAX_QUANTITY`.
///
/// Two bounded quantities can always be multiplied into a `u64` without
/// overflow (`10^9 * 10^9 = 10^18 < 2^63`), which is the property the
/// rest of the engine relies on when computing things like drop-roll
/// thresholds or mining yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoundedQuantity(u64);

impl BoundedQuantity {
    pub fn new(value: u64) -> Self {
        BoundedQuantity(value.min(MAX_QUANTITY))
    }

    pub fn zero() -> Self {
        BoundedQuantity(0)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn saturating_add(self, other: u64) -> Self {
        BoundedQuantity::new(self.0.saturating_add(other))
    }

    pub fn saturating_sub(self, other: u64) -> Self {
        BoundedQuantity(self.0.saturating_sub(other))
    }
}
