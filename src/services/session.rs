use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::adaptive::store::PerformanceStore;
use crate::adaptive::types::{EmotionalState, GameType, PerformanceSample, SessionDifficulty};
use crate::services::training_api::{
    CompleteSessionRequest, CompleteSessionResponse, CreateSessionRequest, SessionData,
    SessionFeedback, TrainingApiClient, TrainingApiError, TrainingStats, UpdateSessionRequest,
};

/// Handle on the aggregate push spawned by [`SessionTracker::record_answer`].
/// Callers can await it, collect a batch of them, or drop it outright.
pub type PushTask = JoinHandle<Result<(), TrainingApiError>>;

#[derive(Debug, Clone)]
pub struct StartSession {
    pub game_type: GameType,
    pub module: String,
    pub difficulty: SessionDifficulty,
    pub level: u32,
    pub session_data: SessionData,
}

#[derive(Debug, Clone)]
pub struct AnswerEvent {
    pub correct: bool,
    pub points: u32,
    pub reaction_time_ms: u64,
    pub attempts: u32,
    pub emotional_state: Option<EmotionalState>,
}

impl Default for AnswerEvent {
    fn default() -> Self {
        Self {
            correct: false,
            points: 0,
            reaction_time_ms: 1000,
            attempts: 1,
            emotional_state: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompleteSession {
    pub level_completed: Option<u32>,
    pub feedback: Option<SessionFeedback>,
}

#[derive(Debug, Clone)]
struct ActiveSession {
    id: String,
    game_type: GameType,
    started_at_ms: i64,
    score: u32,
    accuracy: u32,
    attempts: u32,
    correct_answers: u32,
    total_answers: u32,
}

impl ActiveSession {
    fn opened(id: String, game_type: GameType) -> Self {
        Self {
            id,
            game_type,
            started_at_ms: Utc::now().timestamp_millis(),
            score: 0,
            accuracy: 0,
            attempts: 0,
            correct_answers: 0,
            total_answers: 0,
        }
    }

    fn apply_answer(&mut self, event: &AnswerEvent) {
        self.attempts += 1;
        self.total_answers += 1;
        if event.correct {
            self.correct_answers += 1;
            self.score += event.points;
        }
        self.accuracy =
            (self.correct_answers as f64 / self.total_answers as f64 * 100.0).round() as u32;
    }

    fn deduct(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
    }

    fn update_request(&self) -> UpdateSessionRequest {
        UpdateSessionRequest {
            score: self.score,
            accuracy: self.accuracy,
            attempts: self.attempts,
            correct_answers: self.correct_answers,
            total_answers: self.total_answers,
        }
    }

    fn complete_request(
        &self,
        time_spent: u64,
        level_completed: Option<u32>,
        feedback: Option<SessionFeedback>,
    ) -> CompleteSessionRequest {
        CompleteSessionRequest {
            score: self.score,
            accuracy: self.accuracy,
            time_spent,
            attempts: self.attempts,
            correct_answers: self.correct_answers,
            total_answers: self.total_answers,
            level_completed,
            feedback,
        }
    }
}

/// Owns at most one in-progress training session for one user and keeps the
/// collaborator's copy of it up to date. Recorded answers also feed the
/// shared performance store so the analytics see them immediately.
pub struct SessionTracker {
    client: Arc<TrainingApiClient>,
    store: Arc<PerformanceStore>,
    user_id: String,
    active: Option<ActiveSession>,
}

impl SessionTracker {
    pub fn new(
        client: Arc<TrainingApiClient>,
        store: Arc<PerformanceStore>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            store,
            user_id: user_id.into(),
            active: None,
        }
    }

    /// Opens a session with the collaborator and zeroes the local counters.
    /// An already active session is abandoned locally; the collaborator
    /// keeps whatever aggregate it last received for it.
    pub async fn start(&mut self, request: StartSession) -> Result<String, TrainingApiError> {
        if let Some(stale) = self.active.take() {
            warn!(
                session_id = %stale.id,
                game_type = stale.game_type.as_str(),
                "starting a new session while one is active; abandoning the old one"
            );
        }

        let wire = CreateSessionRequest {
            training_type: request.game_type,
            module: request.module,
            difficulty: request.difficulty,
            level: request.level,
            session_data: request.session_data,
        };
        let session = self.client.create_session(&wire).await?;
        let id = session.id.clone();
        self.active = Some(ActiveSession::opened(session.id, request.game_type));
        Ok(id)
    }

    /// Applies one answer to the local aggregate, appends a per-answer
    /// sample to the store, and spawns the collaborator push. Returns `None`
    /// when no session is in progress.
    pub fn record_answer(&mut self, event: AnswerEvent) -> Option<PushTask> {
        let active = self.active.as_mut()?;
        active.apply_answer(&event);

        let sample = PerformanceSample {
            user_id: self.user_id.clone(),
            session_id: active.id.clone(),
            game_type: active.game_type,
            accuracy: if event.correct { 1.0 } else { 0.0 },
            reaction_time_ms: event.reaction_time_ms,
            attempts: event.attempts,
            timestamp: Utc::now().timestamp_millis(),
            emotional_state: event.emotional_state,
        };
        if let Err(err) = self.store.record(sample) {
            warn!(error = %err, "per-answer sample was rejected by the store");
        }

        let client = Arc::clone(&self.client);
        let session_id = active.id.clone();
        let request = active.update_request();
        Some(tokio::spawn(async move {
            client.update_session(&session_id, &request).await
        }))
    }

    /// Wrong-answer penalty, clamped at zero. Applied at the call site so
    /// `record_answer` itself never subtracts.
    pub fn deduct_points(&mut self, points: u32) {
        if let Some(active) = self.active.as_mut() {
            active.deduct(points);
        }
    }

    /// Sends the final aggregate and clears the local session. Completing
    /// without a prior start is a no-op. The session stays active if the
    /// collaborator call fails, so completion can be retried.
    pub async fn complete(
        &mut self,
        request: CompleteSession,
    ) -> Result<Option<CompleteSessionResponse>, TrainingApiError> {
        let Some(active) = self.active.as_ref() else {
            return Ok(None);
        };

        let elapsed_ms = Utc::now().timestamp_millis() - active.started_at_ms;
        let time_spent = (elapsed_ms.max(0) as f64 / 1000.0).round() as u64;
        let wire = active.complete_request(time_spent, request.level_completed, request.feedback);

        let response = self.client.complete_session(&active.id, &wire).await?;
        self.active = None;
        Ok(Some(response))
    }

    pub async fn fetch_stats(&self) -> Result<TrainingStats, TrainingApiError> {
        self.client.fetch_stats().await
    }

    pub fn session_id(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.id.as_str())
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn score(&self) -> u32 {
        self.active.as_ref().map_or(0, |active| active.score)
    }

    pub fn accuracy(&self) -> u32 {
        self.active.as_ref().map_or(0, |active| active.accuracy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active() -> ActiveSession {
        ActiveSession::opened("sess-1".to_string(), GameType::ColorMatching)
    }

    #[test]
    fn test_alternating_answers_give_half_accuracy() {
        let mut session = active();
        for i in 0..10 {
            session.apply_answer(&AnswerEvent {
                correct: i % 2 == 0,
                points: 10,
                ..AnswerEvent::default()
            });
        }

        assert_eq!(session.score, 50);
        assert_eq!(session.accuracy, 50);
        assert_eq!(session.attempts, 10);
        assert_eq!(session.correct_answers, 5);
        assert_eq!(session.total_answers, 10);
    }

    #[test]
    fn test_accuracy_is_rounded_to_whole_percent() {
        let mut session = active();
        session.apply_answer(&AnswerEvent {
            correct: true,
            ..AnswerEvent::default()
        });
        session.apply_answer(&AnswerEvent::default());
        session.apply_answer(&AnswerEvent::default());
        assert_eq!(session.accuracy, 33);

        session.apply_answer(&AnswerEvent {
            correct: true,
            ..AnswerEvent::default()
        });
        session.apply_answer(&AnswerEvent {
            correct: true,
            ..AnswerEvent::default()
        });
        assert_eq!(session.accuracy, 60);
    }

    #[test]
    fn test_deduction_clamps_at_zero() {
        let mut session = active();
        session.apply_answer(&AnswerEvent {
            correct: true,
            points: 10,
            ..AnswerEvent::default()
        });
        session.deduct(25);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_complete_request_carries_the_aggregate() {
        let mut session = active();
        for _ in 0..4 {
            session.apply_answer(&AnswerEvent {
                correct: true,
                points: 5,
                ..AnswerEvent::default()
            });
        }

        let request = session.complete_request(90, Some(2), None);
        assert_eq!(request.score, 20);
        assert_eq!(request.accuracy, 100);
        assert_eq!(request.time_spent, 90);
        assert_eq!(request.level_completed, Some(2));
        assert_eq!(request.total_answers, 4);
    }
}
