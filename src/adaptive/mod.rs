#![allow(dead_code)]

pub mod config;
pub mod difficulty;
pub mod emotion;
pub mod engine;
pub mod progress;
pub mod recommend;
pub mod store;
pub mod types;

pub use config::EngineConfig;
pub use engine::AdaptiveEngine;
pub use store::{PerformanceStore, StoreError};
#[allow(unused_imports)]
pub use types::*;
