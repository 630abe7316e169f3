//! Runtime worker and bridge against an in-memory API

use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use backoffice::domain::backoffice::{
    DashboardSummary, FetchError, FetchOutcome, FetchRequest, FlaggedEvent, FlaggedSubject,
    LeadDetail,
};
use backoffice::infrastructure::backoffice::BackofficeApi;
use backoffice::infrastructure::runtime::{
    perform, run_async_worker, RuntimeBridge, RuntimeCommand, RuntimeEvent,
};

/// Answers from fixed data; lead "slow" takes a while, "gone" is missing
struct FakeApi;

#[async_trait]
impl BackofficeApi for FakeApi {
    async fn daily_summary(&self) -> Result<DashboardSummary, FetchError> {
        Ok(DashboardSummary {
            total_leads: 1234,
            messages_today: 5,
            spam_percentage: 1.5,
            spam_users: 2,
            last_updated: "2024-05-01T10:00:00".to_string(),
            spam_today: None,
        })
    }

    async fn lead_detail(&self, lead_id: &str) -> Result<LeadDetail, FetchError> {
        match lead_id {
            "gone" => Err(FetchError::Application {
                status: 404,
                message: "not found".to_string(),
            }),
            id => {
                if id == "slow" {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                }
                Ok(serde_json::from_value(serde_json::json!({
                    "lead": { "name": id },
                }))
                .unwrap())
            }
        }
    }

    async fn spam_activities(&self) -> Result<Vec<FlaggedEvent>, FetchError> {
        Ok(Vec::new())
    }

    async fn spam_users(&self) -> Result<Vec<FlaggedSubject>, FetchError> {
        Err(FetchError::Transport("connection refused".to_string()))
    }
}

#[tokio::test]
async fn perform_maps_requests_to_outcomes() {
    let api = FakeApi;

    match perform(&api, FetchRequest::Summary).await {
        FetchOutcome::Summary(Ok(summary)) => assert_eq!(summary.total_leads, 1234),
        other => panic!("unexpected outcome: {other:?}"),
    }

    match perform(&api, FetchRequest::Lead("gone".to_string())).await {
        FetchOutcome::Lead { lead_id, result } => {
            assert_eq!(lead_id, "gone");
            assert!(matches!(result, Err(FetchError::Application { status: 404, .. })));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    let users = perform(&api, FetchRequest::FlaggedSubjects).await;
    assert!(!users.is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn worker_reports_every_ticket_and_stops_on_shutdown() {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (evt_tx, evt_rx) = mpsc::channel();
    let worker = tokio::spawn(run_async_worker(Arc::new(FakeApi), cmd_rx, evt_tx));

    cmd_tx
        .send(RuntimeCommand::Fetch {
            ticket: 1,
            request: FetchRequest::Lead("slow".to_string()),
        })
        .unwrap();
    cmd_tx
        .send(RuntimeCommand::Fetch {
            ticket: 2,
            request: FetchRequest::FlaggedEvents,
        })
        .unwrap();

    let mut tickets = Vec::new();
    let deadline = Instant::now() + Duration::from_secs(5);
    while tickets.len() < 2 && Instant::now() < deadline {
        match evt_rx.try_recv() {
            Ok(RuntimeEvent::Fetched { ticket, .. }) => tickets.push(ticket),
            Ok(RuntimeEvent::Error { message }) => panic!("worker error: {message}"),
            Err(_) => tokio::time::sleep(Duration::from_millis(10)).await,
        }
    }
    // the slow lead was issued first but is not waited on
    assert_eq!(tickets, vec![2, 1]);

    cmd_tx.send(RuntimeCommand::Shutdown).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(2), worker)
        .await
        .expect("worker did not stop")
        .expect("worker panicked");
    assert!(result.is_ok());
}

#[test]
fn bridge_round_trip() {
    let bridge = RuntimeBridge::new(Arc::new(FakeApi)).unwrap();
    bridge
        .send(RuntimeCommand::Fetch {
            ticket: 7,
            request: FetchRequest::Summary,
        })
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    let mut events = Vec::new();
    while events.is_empty() && Instant::now() < deadline {
        events = bridge.poll_events();
        std::thread::sleep(Duration::from_millis(10));
    }
    match events.first() {
        Some(RuntimeEvent::Fetched { ticket, outcome }) => {
            assert_eq!(*ticket, 7);
            assert!(outcome.is_ok());
        }
        other => panic!("unexpected events: {other:?}"),
    }
}
