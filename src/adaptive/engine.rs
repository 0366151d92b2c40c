use std::sync::Arc;

use crate::adaptive::config::EngineConfig;
use crate::adaptive::difficulty::DifficultyEstimator;
use crate::adaptive::emotion::EmotionClassifier;
use crate::adaptive::progress::ProgressPredictor;
use crate::adaptive::recommend::RecommendationBuilder;
use crate::adaptive::store::{PerformanceStore, StoreError};
use crate::adaptive::types::{
    DifficultyProfile, EmotionAssessment, GameType, PerformanceSample, ProgressForecast,
    TrainingRecommendation,
};

/// Facade over the per-user analytics. All reads go through the shared
/// store, so anything recorded by a session tracker is visible here
/// immediately.
pub struct AdaptiveEngine {
    config: EngineConfig,
    store: Arc<PerformanceStore>,
    difficulty: DifficultyEstimator,
    emotion: EmotionClassifier,
    recommendation: RecommendationBuilder,
    progress: ProgressPredictor,
}

impl AdaptiveEngine {
    pub fn new(config: EngineConfig, store: Arc<PerformanceStore>) -> Self {
        let difficulty = DifficultyEstimator::new(config.difficulty.clone());
        let emotion = EmotionClassifier::new(config.emotion.clone());
        let recommendation = RecommendationBuilder::new(config.recommend.clone());
        let progress = ProgressPredictor::new(config.progress.clone());
        Self {
            config,
            store,
            difficulty,
            emotion,
            recommendation,
            progress,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<PerformanceStore> {
        &self.store
    }

    pub fn record_sample(&self, sample: PerformanceSample) -> Result<(), StoreError> {
        self.store.record(sample)
    }

    /// Difficulty for the user's next session of one game, from that game's
    /// recent samples only.
    pub fn estimate_difficulty(&self, user_id: &str, game_type: GameType) -> DifficultyProfile {
        let history = self.store.query(user_id, Some(game_type));
        self.difficulty.estimate(&history)
    }

    /// Emotional state across the user's whole history, any game.
    pub fn classify_emotion(&self, user_id: &str) -> EmotionAssessment {
        let history = self.store.query(user_id, None);
        self.emotion.classify(&history)
    }

    pub fn recommend(&self, user_id: &str) -> TrainingRecommendation {
        let history = self.store.query(user_id, None);
        self.recommendation.build(&history)
    }

    pub fn predict_progress(&self, user_id: &str) -> ProgressForecast {
        let history = self.store.query(user_id, None);
        self.progress.predict(&history)
    }
}
