use chrono::NaiveDate;
use timesheet_shared::{
    id::DbId,
    models::{ReportKind, TimesheetStatus},
    req_args::{
        EmployeeCreateReqArgs, EmployeeReqArgs, EntryCreateReqArgs, ProjectCreateReqArgs,
        RejectReqArgs, ReportReqArgs, TimesheetCreateReqArgs,
    },
    uac::Role,
};

use crate::helpers::{FakeServer, Reply, TIMESHEET_JSON};

const EMPLOYEE_JSON: &str = r#"{"id":3,"email":"e@x.com","firstName":"Eve","lastName":"Xu","fullName":"Eve Xu","role":"EMPLOYEE","managerId":7,"managerName":"Mo Gr"}"#;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn employee_args(manager: Option<u64>) -> EmployeeReqArgs {
    EmployeeReqArgs::new(
        "e@x.com".to_string(),
        "Eve".to_string(),
        "Xu".to_string(),
        Role::Employee,
        manager.map(Into::into),
    )
    .unwrap()
}

#[tokio::test]
async fn create_timesheet_sends_week() {
    // Arrange
    let server = FakeServer::spawn(&[(
        "POST /timesheets?employeeId=5",
        Reply::json(201, TIMESHEET_JSON),
    )])
    .await;
    let args = TimesheetCreateReqArgs::new(date("2024-03-04"));

    // Act
    let timesheet = server
        .client()
        .create_timesheet(5.into(), &args)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(timesheet.status, TimesheetStatus::Draft);
    let body: serde_json::Value = serde_json::from_str(&server.seen()[0].body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"weekStartDate": "2024-03-04", "weekEndDate": "2024-03-10"})
    );
}

#[tokio::test]
async fn add_entry_posts_json() {
    // Arrange
    let server = FakeServer::spawn(&[(
        "POST /timesheets/11/entries",
        Reply::json(
            201,
            r#"{"id":3,"timesheetId":11,"projectId":2,"workDate":"2024-03-05","hoursWorked":7.5,"taskDescription":"coding"}"#,
        ),
    )])
    .await;
    let args = EntryCreateReqArgs::new(2.into(), date("2024-03-05"), 7.5, "coding".to_string())
        .unwrap();

    // Act
    let entry = server
        .client()
        .add_timesheet_entry(11.into(), &args)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(entry.hours_worked, 7.5);
    let seen = server.seen();
    assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(body["projectId"], 2);
    assert_eq!(body["taskDescription"], "coding");
}

#[tokio::test]
async fn status_changes_use_put_with_actor() {
    // Arrange
    let submitted = TIMESHEET_JSON.replace("DRAFT", "SUBMITTED");
    let server = FakeServer::spawn(&[
        ("PUT /timesheets/11/submit?employeeId=5", Reply::json(200, &submitted)),
        ("PUT /timesheets/11/approve?managerId=7", Reply::json(200, &submitted)),
        (
            "PUT /timesheets/11/reject?managerId=7&comment=Missing+Friday",
            Reply::json(200, &submitted),
        ),
    ])
    .await;
    let client = server.client();
    let reject = RejectReqArgs::new(11.into(), "Missing Friday".to_string()).unwrap();

    // Act
    let submit = client.submit_timesheet(11.into(), 5.into()).await.unwrap();
    let approve = client.approve_timesheet(11.into(), 7.into()).await.unwrap();
    let reject = client.reject_timesheet(&reject, 7.into()).await.unwrap();

    // Assert
    assert!(submit.is_ok());
    assert!(approve.is_ok());
    assert!(reject.is_ok());
}

#[tokio::test]
async fn error_message_is_surfaced() {
    // Arrange
    let server = FakeServer::spawn(&[(
        "PUT /timesheets/11/submit?employeeId=5",
        Reply::json(400, r#"{"message":"Timesheet has no entries"}"#),
    )])
    .await;

    // Act
    let actual = server
        .client()
        .submit_timesheet(11.into(), 5.into())
        .await
        .unwrap();

    // Assert
    assert_eq!(actual.unwrap_err().to_string(), "Timesheet has no entries");
}

#[tokio::test]
async fn report_and_export() {
    // Arrange
    let server = FakeServer::spawn(&[
        (
            "GET /reports/project/3?startDate=2024-03-01&endDate=2024-03-31",
            Reply::json(
                200,
                r#"{"projectId":3,"startDate":"2024-03-01","endDate":"2024-03-31","totalHours":12.5,"employeeHours":{"Ann Bell":12.5}}"#,
            ),
        ),
        (
            "GET /reports/project/3/export?startDate=2024-03-01&endDate=2024-03-31",
            Reply::json(200, "Date,Employee,Hours\n2024-03-04,Ann Bell,12.5\n"),
        ),
    ])
    .await;
    let client = server.client();
    let args = ReportReqArgs::new(
        ReportKind::Project,
        Some(3.into()),
        date("2024-03-01"),
        date("2024-03-31"),
    )
    .unwrap();

    // Act
    let report = client.report(&args).await.unwrap().unwrap();
    let export = client.report_export(&args).await.unwrap().unwrap();

    // Assert
    assert_eq!(report.total_hours, 12.5);
    assert_eq!(report.breakdown(ReportKind::Project).get("Ann Bell"), Some(&12.5));
    assert!(export.starts_with("Date,Employee,Hours"));
}

#[tokio::test]
async fn report_filter_options_needs_both_lists() {
    // Arrange - Projects are missing
    let server = FakeServer::spawn(&[(
        "GET /employees",
        Reply::json(200, r#"[{"id":3,"email":"e@x.com","role":"EMPLOYEE"}]"#),
    )])
    .await;

    // Act
    let actual = server.client().report_filter_options().await.unwrap();

    // Assert
    assert!(actual.is_err());
}

#[tokio::test]
async fn create_project_posts_json() {
    // Arrange
    let server = FakeServer::spawn(&[(
        "POST /projects",
        Reply::json(201, r#"{"id":4,"projectCode":"P1","projectName":"One","isActive":true}"#),
    )])
    .await;
    let args = ProjectCreateReqArgs::new(
        "P1".to_string(),
        "One".to_string(),
        None,
        Some(date("2024-01-01")),
        None,
        Some(7.into()),
        true,
    )
    .unwrap();

    // Act
    let project = server.client().create_project(&args).await.unwrap().unwrap();

    // Assert
    assert_eq!(project.label(), "P1 - One");
    let seen = server.seen();
    assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "projectCode": "P1",
            "projectName": "One",
            "description": null,
            "startDate": "2024-01-01",
            "endDate": null,
            "projectManagerId": 7,
            "isActive": true
        })
    );
}

#[tokio::test]
async fn create_employee_sends_password_in_query() {
    // Arrange
    let server = FakeServer::spawn(&[(
        "POST /employees?password=s3cret%21",
        Reply::json(201, EMPLOYEE_JSON),
    )])
    .await;
    let password = secrecy::SecretString::from("s3cret!");
    let args = EmployeeCreateReqArgs::new(employee_args(Some(7)), password).unwrap();

    // Act
    let employee = server.client().create_employee(&args).await.unwrap().unwrap();

    // Assert
    assert_eq!(employee.id, DbId::from(3));
    let seen = server.seen();
    assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
    assert!(!seen[0].body.contains("s3cret"), "{}", seen[0].body);
    let body: serde_json::Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(body["role"], "EMPLOYEE");
    assert_eq!(body["managerId"], 7);
}

#[tokio::test]
async fn employee_show_update_delete() {
    // Arrange
    let server = FakeServer::spawn(&[
        ("GET /employees/3", Reply::json(200, EMPLOYEE_JSON)),
        ("PUT /employees/3", Reply::json(200, EMPLOYEE_JSON)),
        ("DELETE /employees/3", Reply::json(200, "")),
    ])
    .await;
    let client = server.client();

    // Act
    let shown = client.employee(3.into()).await.unwrap().unwrap();
    let updated = client
        .update_employee(3.into(), &employee_args(None))
        .await
        .unwrap()
        .unwrap();
    let deleted = client.delete_employee(3.into()).await.unwrap();

    // Assert
    assert_eq!(shown.display_name(), "Eve Xu");
    assert_eq!(updated.manager_name.as_deref(), Some("Mo Gr"));
    assert!(deleted.is_ok());
    let update = &server.seen()[1];
    let body: serde_json::Value = serde_json::from_str(&update.body).unwrap();
    assert_eq!(body["managerId"], serde_json::Value::Null);
    assert_eq!(
        server.seen_targets(),
        vec!["DELETE /employees/3", "GET /employees/3", "PUT /employees/3"]
    );
}

#[tokio::test]
async fn failed_delete_carries_backend_text() {
    // Arrange
    let server = FakeServer::spawn(&[(
        "DELETE /employees/3",
        Reply::json(400, "Failed to delete employee: has timesheets"),
    )])
    .await;

    // Act
    let actual = server.client().delete_employee(3.into()).await.unwrap();

    // Assert
    assert_eq!(actual.unwrap_err().to_string(), "Failed to delete employee: has timesheets");
}

#[tokio::test]
async fn managers_are_approvers_only() {
    // Arrange
    let server = FakeServer::spawn(&[(
        "GET /employees",
        Reply::json(
            200,
            r#"[{"id":1,"email":"a@x.com","role":"ADMIN"},
                {"id":2,"email":"m@x.com","role":"MANAGER"},
                {"id":3,"email":"e@x.com","role":"EMPLOYEE"}]"#,
        ),
    )])
    .await;

    // Act
    let managers = server.client().managers().await.unwrap().unwrap();

    // Assert
    let ids: Vec<u64> = managers.iter().map(|manager| manager.id.into()).collect();
    assert_eq!(ids, [1, 2]);
}
