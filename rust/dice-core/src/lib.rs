//! dice-core: dice, dice pools with roll history, and advantage/disadvantage rolling.
//!
//! Data flows one way: `RollCoordinator` -> `DiceSet` -> `Die`. Every pool owns
//! its `Chance` source, so seeded pools are fully reproducible.

pub mod chance;
pub mod config;
pub mod coordinator;
pub mod dice_set;
pub mod die;
pub mod error;
pub mod notation;

pub use chance::{derive_seed, Chance};
pub use config::{BattleConfig, ConfigError, PlayerConfig, RollMode};
pub use coordinator::{RollCoordinator, RollInput};
pub use dice_set::{DiceSet, FreezeTarget};
pub use die::{Die, DieKind, Operand};
pub use error::DiceError;
pub use notation::{PoolSpec, MAX_POOL_DICE};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");


#[cfg(test)]
mod chance_tests;
#[cfg(test)]
mod coordinator_tests;
