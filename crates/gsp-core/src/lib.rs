//! # Pipeline driver and host-chain surface
//!
//! Wires every other crate together into one per-block state transition
//! and exposes the small set of callbacks a host chain daemon drives:
//! schema setup, genesis lookup, state initialisation, block application,
//! and state queries.

mod host;
mod pipeline;
mod validate;

pub use host::{
    get_state_as_json, initial_state_block, initialise_state, query_state, setup_schema, update_state, StateQuery,
};
pub use pipeline::run_block;

pub use gsp_config::{Chain, Context, Fork, ForkHandler, GenesisBlock, RoConfig};
pub use gsp_store::Store;
