//! Black-box scenario tests. Every test here drives the engine through
//! `gsp_core`'s host-chain callback surface — `update_state`,
//! `get_state_as_json`, `query_state` — the same way a host daemon
//! would, rather than reaching into any one crate's internals.

#[cfg(test)]
mod determinism;
#[cfg(test)]
mod scenarios;
