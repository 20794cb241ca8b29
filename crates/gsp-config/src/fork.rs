use crate::chain::Chain;

/// A named consensus fork. Consumers must never branch on block height
/// directly — every height-dependent rule change goes through
/// `ForkHandler::is_active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fork {
    /// Lifts an early-game restriction on character spawning.
    UnblockSpawns,
    /// Before this fork, a same-faction vehicle fully blocks a tile;
    /// after it, it no longer blocks but the mover incurs a configured
    /// blocked-turn penalty instead.
    SameFactionVehiclesDontBlock,
}

/// Answers `is_active(fork)` for a `(chain, height)` pair. The activation
/// heights below are illustrative per-chain constants; `Regtest` has
/// every fork active from genesis so local testing never has to reason
/// about historical behaviour.
#[derive(Debug, Clone, Copy)]
pub struct ForkHandler {
    chain: Chain,
    height: u64,
}

impl ForkHandler {
    pub fn new(chain: Chain, height: u64) -> Self {
        ForkHandler { chain, height }
    }

    pub fn is_active(self, fork: Fork) -> bool {
        if self.chain == Chain::Regtest {
            return true;
        }
        self.height >= self.activation_height(fork)
    }

    fn activation_height(self, fork: Fork) -> u64 {
        match (self.chain, fork) {
            (Chain::Main, Fork::UnblockSpawns) => 10_000,
            (Chain::Test, Fork::UnblockSpawns) => 1_000,
            (Chain::Main, Fork::SameFactionVehiclesDontBlock) => 50_000,
            (Chain::Test, Fork::SameFactionVehiclesDontBlock) => 5_000,
            (Chain::Regtest, _) => 0,
        }
    }
}
