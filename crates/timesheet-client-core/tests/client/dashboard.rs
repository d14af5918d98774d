use std::time::{Duration, Instant};

use timesheet_shared::{models::PendingCount, uac::Role};

use crate::helpers::{FakeServer, Reply, TIMESHEET_JSON};

const ACTIVITY_JSON: &str = r#"[{"title":"Timesheet approved","time":"2 hours ago","icon":"check","iconColor":"success","timestamp":"2024-03-11T09:30:00"}]"#;

#[tokio::test]
async fn employee_dashboard_counts_drafts() {
    // Arrange
    let submitted = TIMESHEET_JSON.replace("DRAFT", "SUBMITTED");
    let server = FakeServer::spawn(&[
        ("GET /projects/active", Reply::json(200, "[]")),
        (
            "GET /timesheets/employee/5",
            Reply::json(200, &format!("[{TIMESHEET_JSON},{submitted},{TIMESHEET_JSON}]")),
        ),
        ("GET /activities/recent/5?limit=5", Reply::json(200, ACTIVITY_JSON)),
    ])
    .await;

    // Act
    let stats = server
        .client()
        .dashboard_stats(5.into(), Role::Employee)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(stats.pending, Some(PendingCount::Submissions(2)));
    assert_eq!(stats.active_projects, Some(0));
    assert_eq!(stats.recent_activity.unwrap()[0].title, "Timesheet approved");
}

#[tokio::test]
async fn manager_dashboard_uses_manager_endpoints() {
    // Arrange
    let server = FakeServer::spawn(&[
        ("GET /projects/active", Reply::json(200, "[]")),
        (
            "GET /timesheets/pending-approvals?managerId=7",
            Reply::json(200, &format!("[{TIMESHEET_JSON}]")),
        ),
        ("GET /activities/manager/7?limit=5", Reply::json(200, "[]")),
    ])
    .await;

    // Act
    let stats = server
        .client()
        .dashboard_stats(7.into(), Role::Manager)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(stats.pending, Some(PendingCount::Approvals(1)));
    assert_eq!(stats.recent_activity, Some(vec![]));
    assert_eq!(
        server.seen_targets(),
        vec![
            "GET /activities/manager/7?limit=5",
            "GET /projects/active",
            "GET /timesheets/pending-approvals?managerId=7",
        ]
    );
}

#[tokio::test]
async fn failed_figures_are_left_empty() {
    // Arrange - Only the active projects succeed
    let server = FakeServer::spawn(&[(
        "GET /projects/active",
        Reply::json(200, r#"[{"projectCode":"P1","projectName":"One","isActive":true}]"#),
    )])
    .await;

    // Act
    let stats = server
        .client()
        .dashboard_stats(5.into(), Role::Admin)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(stats.active_projects, Some(1));
    assert_eq!(stats.pending, None);
    assert_eq!(stats.recent_activity, None);
}

#[tokio::test]
async fn slow_figures_load_concurrently() {
    // Arrange - Each of the later figures takes a second
    let delay = Duration::from_secs(1);
    let server = FakeServer::spawn(&[
        ("GET /projects/active", Reply::json(200, "[]")),
        (
            "GET /timesheets/pending-approvals?managerId=7",
            Reply::json(200, "[]").after(delay),
        ),
        ("GET /activities/manager/7?limit=5", Reply::json(200, "[]").after(delay)),
    ])
    .await;
    let client = server.client();

    // Act
    let start = Instant::now();
    let stats = client
        .dashboard_stats(7.into(), Role::Admin)
        .await
        .unwrap()
        .unwrap();
    let elapsed = start.elapsed();

    // Assert
    assert_eq!(stats.pending, Some(PendingCount::Approvals(0)));
    assert_eq!(stats.recent_activity, Some(vec![]));
    assert!(elapsed < delay * 2, "figures were fetched one after another: {elapsed:?}");
}
