use std::sync::Arc;

use neurotrain_engine::adaptive::types::{
    DifficultyProfile, GameType, PerformanceSample, SessionDifficulty,
};
use neurotrain_engine::config::Config;
use neurotrain_engine::logging::init_tracing;
use neurotrain_engine::services::session::{
    AnswerEvent, CompleteSession, SessionTracker, StartSession,
};
use neurotrain_engine::services::training_api::{SessionData, TrainingApiClient, TrainingApiError};
use neurotrain_engine::{AdaptiveEngine, EngineConfig, PerformanceStore};
use uuid::Uuid;

const DEMO_USER: &str = "demo-user";

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = init_tracing(&config.log_level);

    let store = Arc::new(PerformanceStore::new());
    let engine = AdaptiveEngine::new(EngineConfig::from_env(), Arc::clone(&store));

    seed_demo_history(&engine);

    let profile = engine.estimate_difficulty(DEMO_USER, GameType::ColorMatching);
    tracing::info!(
        level = profile.level,
        speed = profile.speed,
        complexity = profile.complexity,
        "difficulty for the next color-matching session"
    );

    let assessment = engine.classify_emotion(DEMO_USER);
    tracing::info!(
        state = assessment.state.as_str(),
        confidence = assessment.confidence,
        message = %assessment.message,
        "emotional state"
    );

    let recommendation = engine.recommend(DEMO_USER);
    tracing::info!(
        weak_areas = ?recommendation.weak_areas,
        plan = ?recommendation.next_session_plan,
        progress = recommendation.estimated_progress,
        "training recommendation"
    );

    let forecast = engine.predict_progress(DEMO_USER);
    tracing::info!(
        current_level = forecast.current_level,
        predicted_level = forecast.predicted_level,
        weeks_to_goal = forecast.estimated_weeks_to_goal,
        "progress forecast"
    );

    let client = Arc::new(TrainingApiClient::from_env());
    if !client.is_available() {
        tracing::info!(
            "TRAINING_API_BASE_URL / TRAINING_API_TOKEN not set; skipping the live session run"
        );
        return;
    }

    if let Err(err) = run_live_session(client, store, profile).await {
        tracing::error!(error = %err, "live session run failed");
    }
}

/// A plausible three-game history so every analytic has data to chew on:
/// one synthetic session per game, six answers each, improving throughout.
fn seed_demo_history(engine: &AdaptiveEngine) {
    let games = [
        GameType::ColorMatching,
        GameType::CardMatching,
        GameType::StroopTest,
    ];
    for (round, game_type) in games.into_iter().enumerate() {
        let session_id = Uuid::new_v4().to_string();
        for answer in 0..6 {
            let step = (round * 6 + answer) as u64;
            let sample = PerformanceSample {
                user_id: DEMO_USER.to_string(),
                session_id: session_id.clone(),
                game_type,
                accuracy: 0.55 + step as f64 * 0.02,
                reaction_time_ms: 1500 - step * 40,
                ..PerformanceSample::default()
            };
            if let Err(err) = engine.record_sample(sample) {
                tracing::warn!(error = %err, "seed sample rejected");
            }
        }
    }
}

async fn run_live_session(
    client: Arc<TrainingApiClient>,
    store: Arc<PerformanceStore>,
    profile: DifficultyProfile,
) -> Result<(), TrainingApiError> {
    let mut tracker = SessionTracker::new(client, store, DEMO_USER);

    let session_id = tracker
        .start(StartSession {
            game_type: GameType::ColorMatching,
            module: "visual-perception".to_string(),
            difficulty: SessionDifficulty::Medium,
            level: profile.level,
            session_data: SessionData {
                profile,
                time_limit_secs: Some(180),
                hints_enabled: true,
            },
        })
        .await?;
    tracing::info!(%session_id, "session opened");

    let mut pushes = Vec::new();
    for i in 0..10u64 {
        let correct = i % 2 == 0;
        let event = AnswerEvent {
            correct,
            points: 10,
            reaction_time_ms: 700 + i * 60,
            ..AnswerEvent::default()
        };
        if let Some(push) = tracker.record_answer(event) {
            pushes.push(push);
        }
        if !correct {
            tracker.deduct_points(2);
        }
    }

    for push in pushes {
        match push.await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => tracing::warn!(error = %err, "aggregate push failed"),
            Err(err) => tracing::warn!(error = %err, "aggregate push task panicked"),
        }
    }

    let completed = tracker
        .complete(CompleteSession {
            level_completed: Some(profile.level),
            feedback: None,
        })
        .await?;

    if let Some(response) = completed {
        tracing::info!(
            score = response.session.score,
            accuracy = response.session.accuracy,
            time_spent = response.session.time_spent,
            "session completed"
        );
    }

    let stats = tracker.fetch_stats().await?;
    tracing::info!(
        total_sessions = stats.overview.total_sessions,
        average_accuracy = stats.overview.average_accuracy,
        "collaborator stats"
    );

    Ok(())
}
