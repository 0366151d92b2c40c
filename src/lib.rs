#![allow(dead_code)]

pub mod adaptive;
pub mod config;
pub mod logging;
pub mod services;

pub use adaptive::{AdaptiveEngine, EngineConfig, PerformanceStore};
pub use services::session::SessionTracker;
pub use services::training_api::TrainingApiClient;
