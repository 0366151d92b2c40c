use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyParams {
    pub window: usize,
    pub raise_min_accuracy: f64,
    pub raise_max_reaction_ms: f64,
    /// Accuracy pivot the raise boost is measured from.
    pub raise_pivot: f64,
    pub lower_max_accuracy: f64,
    pub lower_min_reaction_ms: f64,
}

impl Default for DifficultyParams {
    fn default() -> Self {
        Self {
            window: 10,
            raise_min_accuracy: 0.85,
            raise_max_reaction_ms: 1000.0,
            raise_pivot: 0.8,
            lower_max_accuracy: 0.6,
            lower_min_reaction_ms: 2000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionParams {
    pub trend_window: usize,
    pub frustrated_max_accuracy: f64,
    pub frustrated_min_reaction_ms: f64,
    pub confident_min_accuracy: f64,
    pub confident_max_reaction_ms: f64,
    pub bored_trend_threshold: f64,
    pub base_confidence: f64,
    pub cold_start_confidence: f64,
}

impl Default for EmotionParams {
    fn default() -> Self {
        Self {
            trend_window: 5,
            frustrated_max_accuracy: 0.5,
            frustrated_min_reaction_ms: 2000.0,
            confident_min_accuracy: 0.9,
            confident_max_reaction_ms: 800.0,
            bored_trend_threshold: -0.1,
            base_confidence: 0.7,
            cold_start_confidence: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendParams {
    pub weak_threshold: f64,
    pub strength_threshold: f64,
    /// Fixed divisor for estimated progress, applied even when fewer
    /// samples exist (progress is 0 below this count).
    pub progress_window: usize,
}

impl Default for RecommendParams {
    fn default() -> Self {
        Self {
            weak_threshold: 0.7,
            strength_threshold: 0.8,
            progress_window: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressParams {
    pub min_samples: usize,
    pub window: usize,
    pub projection_periods: f64,
    /// Substituted for a zero learning rate in the weeks-to-goal division.
    pub rate_epsilon: f64,
    pub base_confidence: f64,
    pub confidence_per_sample: f64,
    pub max_confidence: f64,
    pub fast_rate_threshold: f64,
    pub slow_rate_threshold: f64,
}

impl Default for ProgressParams {
    fn default() -> Self {
        Self {
            min_samples: 5,
            window: 20,
            projection_periods: 4.0,
            rate_epsilon: 0.01,
            base_confidence: 0.5,
            confidence_per_sample: 0.02,
            max_confidence: 0.9,
            fast_rate_threshold: 0.1,
            slow_rate_threshold: 0.05,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub difficulty: DifficultyParams,
    pub emotion: EmotionParams,
    pub recommend: RecommendParams,
    pub progress: ProgressParams,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("ENGINE_DIFFICULTY_WINDOW") {
            config.difficulty.window = val.parse().unwrap_or(config.difficulty.window);
        }
        if let Ok(val) = std::env::var("ENGINE_WEAK_AREA_THRESHOLD") {
            config.recommend.weak_threshold =
                val.parse().unwrap_or(config.recommend.weak_threshold);
        }
        if let Ok(val) = std::env::var("ENGINE_STRENGTH_THRESHOLD") {
            config.recommend.strength_threshold =
                val.parse().unwrap_or(config.recommend.strength_threshold);
        }
        if let Ok(val) = std::env::var("ENGINE_PREDICTION_WINDOW") {
            config.progress.window = val.parse().unwrap_or(config.progress.window);
        }

        config
    }
}
