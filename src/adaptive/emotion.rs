use super::config::EmotionParams;
use super::types::{EmotionAssessment, EmotionalState, PerformanceSample, SuggestedAction};

const MSG_FRUSTRATED: &str = "조금 어려우신가요? 난이도를 조절해 드릴게요";
const MSG_CONFIDENT: &str = "훌륭해요! 더 어려운 도전을 준비했어요";
const MSG_BORED: &str = "새로운 게임으로 흥미를 높여볼까요?";
const MSG_ENGAGED: &str = "좋은 페이스로 훈련하고 있어요";
const MSG_START_TRAINING: &str = "훈련을 시작해 보세요";

#[derive(Debug, Clone)]
pub struct EmotionClassifier {
    params: EmotionParams,
}

impl EmotionClassifier {
    pub fn new(params: EmotionParams) -> Self {
        Self { params }
    }

    /// Classifies the user's state from the most recent sample first, then
    /// the short-window accuracy trend. The frustrated and confident rules
    /// win over the trend rule regardless of its direction.
    pub fn classify(&self, recent: &[PerformanceSample]) -> EmotionAssessment {
        let Some(most_recent) = recent.last() else {
            return EmotionAssessment {
                state: EmotionalState::Engaged,
                confidence: self.params.cold_start_confidence,
                suggested_actions: vec![SuggestedAction::StartTraining],
                message: MSG_START_TRAINING.to_string(),
            };
        };

        let reaction_ms = most_recent.reaction_time_ms as f64;

        if most_recent.accuracy < self.params.frustrated_max_accuracy
            && reaction_ms > self.params.frustrated_min_reaction_ms
        {
            return self.assessment(
                EmotionalState::Frustrated,
                vec![
                    SuggestedAction::ReduceDifficulty,
                    SuggestedAction::ShowEncouragement,
                    SuggestedAction::BreakSession,
                ],
                MSG_FRUSTRATED,
            );
        }

        if most_recent.accuracy > self.params.confident_min_accuracy
            && reaction_ms < self.params.confident_max_reaction_ms
        {
            return self.assessment(
                EmotionalState::Confident,
                vec![
                    SuggestedAction::IncreaseDifficulty,
                    SuggestedAction::ChallengeMode,
                    SuggestedAction::Celebrate,
                ],
                MSG_CONFIDENT,
            );
        }

        if self.trend(recent) < self.params.bored_trend_threshold {
            return self.assessment(
                EmotionalState::Bored,
                vec![
                    SuggestedAction::NewGameType,
                    SuggestedAction::IncreaseVariety,
                    SuggestedAction::AddChallenge,
                ],
                MSG_BORED,
            );
        }

        self.assessment(
            EmotionalState::Engaged,
            vec![
                SuggestedAction::MaintainDifficulty,
                SuggestedAction::PositiveFeedback,
            ],
            MSG_ENGAGED,
        )
    }

    /// Accuracy delta across the trend window (last minus first).
    fn trend(&self, recent: &[PerformanceSample]) -> f64 {
        let window_start = recent.len().saturating_sub(self.params.trend_window);
        let window = &recent[window_start..];
        match (window.first(), window.last()) {
            (Some(first), Some(last)) => last.accuracy - first.accuracy,
            _ => 0.0,
        }
    }

    fn assessment(
        &self,
        state: EmotionalState,
        suggested_actions: Vec<SuggestedAction>,
        message: &str,
    ) -> EmotionAssessment {
        EmotionAssessment {
            state,
            confidence: self.params.base_confidence,
            suggested_actions,
            message: message.to_string(),
        }
    }
}
