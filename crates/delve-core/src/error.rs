//! Error types for dungeon generation

use thiserror::Error;

/// Invalid generation parameters, rejected before any carving starts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("dungeon {axis} is {value}, must be at least {min}")]
    TooSmall {
        axis: &'static str,
        value: usize,
        min: usize,
    },

    #[error("room tries must be greater than zero")]
    NoRoomTries,

    #[error("winding percent {0} is outside 0..=100")]
    WindingOutOfRange(u32),

    #[error("extra connector chance must be at least 1 (one-in-n)")]
    ZeroExtraConnectorChance,
}

/// Errors returned by [`crate::dungeon::Dungeon::generate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
