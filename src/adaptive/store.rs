use std::collections::HashMap;

use parking_lot::RwLock;
use thiserror::Error;

use super::types::{GameType, PerformanceSample};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation error: {0}")]
    Validation(String),
}

/// Append-only, in-memory log of per-user performance samples.
///
/// Shared by injection (`Arc<PerformanceStore>`): the session flow appends,
/// the analytic components read snapshots. Samples are never mutated or
/// deleted for the lifetime of the process.
#[derive(Debug, Default)]
pub struct PerformanceStore {
    samples: RwLock<HashMap<String, Vec<PerformanceSample>>>,
}

impl PerformanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, sample: PerformanceSample) -> Result<(), StoreError> {
        validate_sample(&sample)?;
        let mut samples = self.samples.write();
        samples
            .entry(sample.user_id.clone())
            .or_default()
            .push(sample);
        Ok(())
    }

    /// Snapshot of a user's samples in insertion order (oldest first),
    /// optionally filtered by game type.
    pub fn query(&self, user_id: &str, game_type: Option<GameType>) -> Vec<PerformanceSample> {
        let samples = self.samples.read();
        let Some(history) = samples.get(user_id) else {
            return Vec::new();
        };
        match game_type {
            Some(game) => history
                .iter()
                .filter(|s| s.game_type == game)
                .cloned()
                .collect(),
            None => history.clone(),
        }
    }

    pub fn sample_count(&self, user_id: &str) -> usize {
        self.samples.read().get(user_id).map_or(0, Vec::len)
    }
}

fn validate_sample(sample: &PerformanceSample) -> Result<(), StoreError> {
    if sample.user_id.trim().is_empty() {
        return Err(StoreError::Validation("userId는 필수입니다".to_string()));
    }
    if sample.timestamp <= 0 {
        return Err(StoreError::Validation(
            "timestamp는 양수여야 합니다".to_string(),
        ));
    }
    Ok(())
}
