use serde::{Deserialize, Serialize};

/// Which network this process is tracking. Per-chain genesis constants
/// and fork-activation heights are both keyed on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chain {
    Main,
    Test,
    Regtest,
}

/// The genesis block this chain's state starts from.
#[derive(Debug, Clone, Copy)]
pub struct GenesisBlock {
    pub height: u64,
    pub block_hash_hex: &'static str,
}

impl Chain {
    /// The `(height, hash_hex)` pair this chain's state starts from.
    pub fn initial_state_block(self) -> GenesisBlock {
        match self {
            Chain::Main => GenesisBlock {
                height: 0,
                block_hash_hex: "0000000000000000000000000000000000000000000000000000000000000000",
            },
            Chain::Test => GenesisBlock {
                height: 0,
                block_hash_hex: "1111111111111111111111111111111111111111111111111111111111111111",
            },
            Chain::Regtest => GenesisBlock {
                height: 0,
                block_hash_hex: "2222222222222222222222222222222222222222222222222222222222222222",
            },
        }
    }
}
