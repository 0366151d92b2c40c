use std::collections::HashMap;

use super::config::RecommendParams;
use super::types::{Category, GameType, PerformanceSample, TrainingRecommendation};

const PLAN_BALANCED: &str = "전체 영역 균형 훈련";

#[derive(Debug, Clone)]
pub struct RecommendationBuilder {
    params: RecommendParams,
}

impl RecommendationBuilder {
    pub fn new(params: RecommendParams) -> Self {
        Self { params }
    }

    /// Splits categories into weak areas and strengths by mean accuracy and
    /// proposes the games belonging to the weak ones. Categories the user
    /// has never played land in neither bucket.
    pub fn build(&self, history: &[PerformanceSample]) -> TrainingRecommendation {
        let mut by_category: HashMap<Category, Vec<f64>> = HashMap::new();
        for sample in history {
            by_category
                .entry(sample.game_type.category())
                .or_default()
                .push(sample.accuracy);
        }

        let mut weak_areas = Vec::new();
        let mut strengths = Vec::new();
        for category in Category::ALL {
            let Some(accuracies) = by_category.get(&category) else {
                continue;
            };
            let mean = accuracies.iter().sum::<f64>() / accuracies.len() as f64;
            if mean < self.params.weak_threshold {
                weak_areas.push(category);
            } else if mean > self.params.strength_threshold {
                strengths.push(category);
            }
        }

        let mut recommended_games = Vec::new();
        for category in &weak_areas {
            for game in GameType::ALL {
                if game.category() == *category && !recommended_games.contains(&game) {
                    recommended_games.push(game);
                }
            }
        }

        let mut next_session_plan = Vec::new();
        if let Some(category) = weak_areas.first() {
            next_session_plan.push(format!("{} 영역 집중 훈련", category.label_ko()));
        }
        if let Some(category) = strengths.first() {
            next_session_plan.push(format!("{} 영역 도전 모드", category.label_ko()));
        }
        next_session_plan.push(PLAN_BALANCED.to_string());

        TrainingRecommendation {
            recommended_games,
            weak_areas,
            strengths,
            next_session_plan,
            estimated_progress: self.estimated_progress(history),
        }
    }

    /// Mean accuracy of the last five samples as a percentage. Users with a
    /// shorter history read as 0 until the window fills.
    fn estimated_progress(&self, history: &[PerformanceSample]) -> f64 {
        if history.len() < self.params.progress_window {
            return 0.0;
        }
        let window = &history[history.len() - self.params.progress_window..];
        let sum: f64 = window.iter().map(|sample| sample.accuracy).sum();
        (sum / self.params.progress_window as f64 * 100.0).clamp(0.0, 100.0)
    }
}
