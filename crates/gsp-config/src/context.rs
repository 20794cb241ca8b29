use crate::{chain::Chain, fork::{Fork, ForkHandler}, roconfig::RoConfig};
use std::sync::Arc;

/// The process-scoped immutable value threaded through every phase of
/// the pipeline: chain identity, block height/timestamp, and the
/// read-only configuration. Nothing in the engine ever reaches for a
/// module-level global instead of this.
#[derive(Clone)]
pub struct Context {
    pub chain: Chain,
    pub height: u64,
    pub timestamp: i64,
    pub config: Arc<RoConfig>,
}

impl Context {
    pub fn new(chain: Chain, height: u64, timestamp: i64, config: Arc<RoConfig>) -> Self {
        Context { chain, height, timestamp, config }
    }

    pub fn forks(&self) -> ForkHandler {
        ForkHandler::new(self.chain, self.height)
    }

    pub fn fork_active(&self, fork: Fork) -> bool {
        self.forks().is_active(fork)
    }
}
