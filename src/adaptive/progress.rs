use super::config::ProgressParams;
use super::types::{PerformanceSample, ProgressForecast};

const MAX_LEVEL: f64 = 10.0;

const REC_CONTINUE_BASIC: &str = "기초 훈련을 계속 진행하세요";
const REC_CHALLENGE: &str = "빠르게 성장하고 있어요. 더 어려운 도전을 해보세요";
const REC_STEADY: &str = "꾸준한 연습이 필요해요";
const REC_DAILY_ROUTINE: &str = "매일 15분씩 꾸준히 훈련하세요";

#[derive(Debug, Clone)]
pub struct ProgressPredictor {
    params: ProgressParams,
}

impl ProgressPredictor {
    pub fn new(params: ProgressParams) -> Self {
        Self { params }
    }

    /// Projects the user's level from the accuracy trend of the analysis
    /// window. The learning rate is the second half-window mean minus the
    /// first, floored at zero so a slump never projects regression.
    pub fn predict(&self, history: &[PerformanceSample]) -> ProgressForecast {
        if history.len() < self.params.min_samples {
            return ProgressForecast {
                current_level: 1,
                predicted_level: 2.0,
                estimated_weeks_to_goal: 4,
                confidence: 0.3,
                recommendations: vec![REC_CONTINUE_BASIC.to_string()],
            };
        }

        let window_start = history.len().saturating_sub(self.params.window);
        let window = &history[window_start..];
        let mid = window.len() / 2;

        let mean = mean_accuracy(window);
        let learning_rate =
            (mean_accuracy(&window[mid..]) - mean_accuracy(&window[..mid])).max(0.0);

        let current_level = ((mean * 10.0).floor() as u32).clamp(1, MAX_LEVEL as u32);
        let predicted_level =
            (current_level as f64 + learning_rate * self.params.projection_periods).min(MAX_LEVEL);

        // A flat learning rate would divide the remaining distance by zero.
        let rate = if learning_rate > 0.0 {
            learning_rate
        } else {
            self.params.rate_epsilon
        };
        let remaining = MAX_LEVEL - current_level as f64;
        let estimated_weeks_to_goal = (remaining / rate).ceil().max(1.0) as u32;

        let confidence = (self.params.base_confidence
            + history.len() as f64 * self.params.confidence_per_sample)
            .min(self.params.max_confidence);

        let mut recommendations = Vec::new();
        if learning_rate > self.params.fast_rate_threshold {
            recommendations.push(REC_CHALLENGE.to_string());
        } else if learning_rate < self.params.slow_rate_threshold {
            recommendations.push(REC_STEADY.to_string());
        }
        recommendations.push(REC_DAILY_ROUTINE.to_string());

        ProgressForecast {
            current_level,
            predicted_level,
            estimated_weeks_to_goal,
            confidence,
            recommendations,
        }
    }
}

fn mean_accuracy(samples: &[PerformanceSample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|sample| sample.accuracy).sum::<f64>() / samples.len() as f64
}
