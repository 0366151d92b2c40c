//! Session lifecycle tests against a minimal in-process collaborator that
//! records every request it receives and serves canned JSON responses.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use neurotrain_engine::adaptive::store::PerformanceStore;
use neurotrain_engine::adaptive::types::{GameType, SessionDifficulty};
use neurotrain_engine::services::session::{
    AnswerEvent, CompleteSession, SessionTracker, StartSession,
};
use neurotrain_engine::services::training_api::{
    CollaboratorConfig, SessionData, TrainingApiClient,
};

// ============================================================================
// Mock collaborator
// ============================================================================

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: String,
    path: String,
    authorization: Option<String>,
    body: serde_json::Value,
}

struct MockCollaborator {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockCollaborator {
    async fn spawn() -> Self {
        Self::spawn_with_status(200).await
    }

    async fn spawn_with_status(status: u16) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock listener");
        let addr = listener.local_addr().expect("mock listener addr");
        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let Ok((socket, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(handle_connection(socket, Arc::clone(&log), status));
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    fn client(&self) -> TrainingApiClient {
        TrainingApiClient::new(CollaboratorConfig {
            base_url: Some(self.base_url.clone()),
            auth_token: Some("test-token".to_string()),
            timeout: Duration::from_secs(2),
        })
    }

    fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

async fn handle_connection(
    mut socket: TcpStream,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
    status: u16,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        if buf.len() > 64 * 1024 {
            return;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = header_value(&head, "content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = header_end + 4;
    while buf.len() < body_start + content_length {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();
    let authorization = header_value(&head, "authorization");

    let body_end = (body_start + content_length).min(buf.len());
    let body = serde_json::from_slice(&buf[body_start..body_end]).unwrap_or(serde_json::Value::Null);

    log.lock().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        authorization,
        body,
    });

    let (status_line, payload) = canned_response(status, &method, &path);
    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
        payload.len()
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

fn header_value(head: &str, name: &str) -> Option<String> {
    head.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        if key.eq_ignore_ascii_case(name) {
            Some(value.trim().to_string())
        } else {
            None
        }
    })
}

fn canned_response(status: u16, method: &str, path: &str) -> (&'static str, &'static str) {
    if status == 401 {
        return ("401 Unauthorized", r#"{"error":"invalid token"}"#);
    }
    match (method, path) {
        ("POST", "/training/sessions") => (
            "200 OK",
            r#"{"session":{"id":"sess-42","trainingType":"color-matching","module":"visual-perception","difficulty":"medium","level":3,"startTime":"2024-01-01T00:00:00.000Z"}}"#,
        ),
        ("PUT", p) if p.ends_with("/complete") => (
            "200 OK",
            r#"{"session":{"id":"sess-42","score":50,"accuracy":50,"timeSpent":1,"completedAt":"2024-01-01T00:05:00.000Z"},"userStats":{"totalSessions":3,"totalScore":150,"averageAccuracy":0.61,"totalTimeSpent":540,"completedLevels":2}}"#,
        ),
        ("PUT", _) => ("200 OK", r#"{"session":{"id":"sess-42"}}"#),
        ("GET", "/training/stats") => (
            "200 OK",
            r#"{"overview":{"totalSessions":3,"totalScore":150,"averageAccuracy":0.61,"totalTimeSpent":540,"completedLevels":2},"recentSessions":[{"id":"sess-41","trainingType":"card-matching","score":40,"accuracy":80,"completedAt":"2024-01-01T00:00:00.000Z"}]}"#,
        ),
        _ => ("404 Not Found", r#"{"error":"not found"}"#),
    }
}

fn start_request() -> StartSession {
    StartSession {
        game_type: GameType::ColorMatching,
        module: "visual-perception".to_string(),
        difficulty: SessionDifficulty::Medium,
        level: 3,
        session_data: SessionData::default(),
    }
}

// ============================================================================
// Lifecycle tests
// ============================================================================

#[tokio::test]
async fn complete_without_start_is_a_no_op() {
    let mock = MockCollaborator::spawn().await;
    let store = Arc::new(PerformanceStore::new());
    let mut tracker = SessionTracker::new(Arc::new(mock.client()), store, "user-1");

    let result = tracker
        .complete(CompleteSession::default())
        .await
        .expect("no-op complete should not error");

    assert!(result.is_none());
    assert!(mock.requests().is_empty(), "no network call expected");
}

#[tokio::test]
async fn full_session_flow_persists_the_final_aggregate() {
    let mock = MockCollaborator::spawn().await;
    let store = Arc::new(PerformanceStore::new());
    let mut tracker = SessionTracker::new(Arc::new(mock.client()), Arc::clone(&store), "user-1");

    let session_id = tracker.start(start_request()).await.expect("start");
    assert_eq!(session_id, "sess-42");
    assert_eq!(tracker.session_id(), Some("sess-42"));

    let mut pushes = Vec::new();
    for i in 0..10 {
        let push = tracker
            .record_answer(AnswerEvent {
                correct: i % 2 == 0,
                points: 10,
                ..AnswerEvent::default()
            })
            .expect("session is active");
        pushes.push(push);
    }
    for push in pushes {
        push.await
            .expect("push task should not panic")
            .expect("aggregate push should succeed");
    }

    assert_eq!(tracker.score(), 50);
    assert_eq!(tracker.accuracy(), 50);
    assert_eq!(store.sample_count("user-1"), 10);

    let response = tracker
        .complete(CompleteSession {
            level_completed: Some(3),
            feedback: None,
        })
        .await
        .expect("complete")
        .expect("a session was active");
    assert_eq!(response.session.score, 50);
    assert!(tracker.session_id().is_none());
    assert!(!tracker.is_active());

    let requests = mock.requests();

    let create = requests
        .iter()
        .find(|r| r.method == "POST")
        .expect("create request recorded");
    assert_eq!(create.path, "/training/sessions");
    assert_eq!(create.authorization.as_deref(), Some("Bearer test-token"));
    assert_eq!(create.body["training_type"], "color-matching");
    assert_eq!(create.body["difficulty"], "medium");
    assert!(create.body.get("sessionData").is_some());

    // Pushes arrive in arbitrary order; each carries the snapshot taken at
    // record time, so the tenth snapshot must be present somewhere.
    let updates: Vec<_> = requests
        .iter()
        .filter(|r| r.method == "PUT" && !r.path.ends_with("/complete"))
        .collect();
    assert_eq!(updates.len(), 10);
    assert!(updates
        .iter()
        .all(|r| r.path == "/training/sessions/sess-42"));
    let final_snapshot = updates
        .iter()
        .find(|r| r.body["totalAnswers"] == 10)
        .expect("final aggregate snapshot pushed");
    assert_eq!(final_snapshot.body["score"], 50);
    assert_eq!(final_snapshot.body["correctAnswers"], 5);

    let complete = requests
        .iter()
        .find(|r| r.path.ends_with("/complete"))
        .expect("complete request recorded");
    assert_eq!(complete.method, "PUT");
    assert_eq!(complete.path, "/training/sessions/sess-42/complete");
    assert_eq!(complete.body["score"], 50);
    assert_eq!(complete.body["accuracy"], 50);
    assert_eq!(complete.body["correctAnswers"], 5);
    assert_eq!(complete.body["totalAnswers"], 10);
    assert_eq!(complete.body["levelCompleted"], 3);
    assert!(complete.body.get("feedback").is_none());
}

#[tokio::test]
async fn starting_twice_abandons_the_first_session_locally() {
    let mock = MockCollaborator::spawn().await;
    let store = Arc::new(PerformanceStore::new());
    let mut tracker = SessionTracker::new(Arc::new(mock.client()), store, "user-1");

    tracker.start(start_request()).await.expect("first start");
    if let Some(push) = tracker.record_answer(AnswerEvent {
        correct: true,
        points: 10,
        ..AnswerEvent::default()
    }) {
        let _ = push.await;
    }
    assert_eq!(tracker.score(), 10);

    tracker.start(start_request()).await.expect("second start");

    // Fresh counters, no completion of the abandoned session.
    assert!(tracker.is_active());
    assert_eq!(tracker.score(), 0);
    assert_eq!(tracker.accuracy(), 0);

    let requests = mock.requests();
    assert_eq!(requests.iter().filter(|r| r.method == "POST").count(), 2);
    assert!(requests.iter().all(|r| !r.path.ends_with("/complete")));
}

#[tokio::test]
async fn deductions_clamp_at_zero_and_skip_an_idle_tracker() {
    let mock = MockCollaborator::spawn().await;
    let store = Arc::new(PerformanceStore::new());
    let mut tracker = SessionTracker::new(Arc::new(mock.client()), store, "user-1");

    // No session yet: nothing to deduct from.
    tracker.deduct_points(30);
    assert_eq!(tracker.score(), 0);
    assert!(!tracker.is_active());

    tracker.start(start_request()).await.expect("start");
    if let Some(push) = tracker.record_answer(AnswerEvent {
        correct: true,
        points: 10,
        ..AnswerEvent::default()
    }) {
        let _ = push.await;
    }
    assert_eq!(tracker.score(), 10);

    tracker.deduct_points(4);
    assert_eq!(tracker.score(), 6);

    tracker.deduct_points(100);
    assert_eq!(tracker.score(), 0, "the penalty floors at zero");
    assert_eq!(tracker.accuracy(), 100, "deductions only touch the score");
}

#[tokio::test]
async fn auth_failures_surface_as_a_distinct_error_kind() {
    let mock = MockCollaborator::spawn_with_status(401).await;
    let store = Arc::new(PerformanceStore::new());
    let mut tracker = SessionTracker::new(Arc::new(mock.client()), store, "user-1");

    let err = tracker
        .start(start_request())
        .await
        .expect_err("401 should fail the start");

    assert!(err.is_auth(), "expected auth error, got: {err}");
    assert!(!tracker.is_active());
}

#[tokio::test]
async fn stats_passthrough_decodes_the_overview() {
    let mock = MockCollaborator::spawn().await;
    let store = Arc::new(PerformanceStore::new());
    let tracker = SessionTracker::new(Arc::new(mock.client()), store, "user-1");

    let stats = tracker.fetch_stats().await.expect("stats fetch");

    assert_eq!(stats.overview.total_sessions, 3);
    assert_eq!(stats.overview.completed_levels, 2);
    assert!((stats.overview.average_accuracy - 0.61).abs() < 1e-9);
    assert_eq!(stats.recent_sessions.len(), 1);
    assert_eq!(stats.recent_sessions[0].id, "sess-41");

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/training/stats");
}
