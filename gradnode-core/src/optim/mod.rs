// gradnode-core/src/optim/mod.rs

//! Parameter updates and the optimize loop.
//!
//! This module provides the gradient step applied to learnable constants,
//! the `OptimizeConfig` accepted by the driving loop, and `optimize` itself,
//! which repeats forward, backward and update a fixed number of times.

pub mod config;
pub mod optimize;
pub mod update;

// Re-export key items for easier access
pub use config::OptimizeConfig;
pub use optimize::{optimize, OptimizeReport};
