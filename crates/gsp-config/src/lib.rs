//! # Read-only configuration, chain identity, and fork gating
//!
//! `RoConfig` is the static, per-chain configuration the host daemon
//! supplies (item/vehicle/building/fitment/prize tables, limits, and
//! tunables). `Chain` carries the per-chain genesis constants. `Fork`
//! and `ForkHandler` answer height-dependent rule questions so the rest
//! of the engine never branches on a raw block height directly.
//! `Context` bundles all of the above plus the current block's height
//! and timestamp into the one value passed through the pipeline.

pub mod chain;
pub mod context;
pub mod fork;
pub mod roconfig;

pub use chain::{Chain, GenesisBlock};
pub use context::Context;
pub use fork::{Fork, ForkHandler};
pub use roconfig::{
    BuildingConfig, EffectGrant, FitmentConfig, ItemConfig, LowHpBoostConfig, MiningRate,
    PrizeConfig, ProspectingResourceConfig, RoConfig, StarterZoneConfig, VehicleConfig,
    WeaponConfig,
};
