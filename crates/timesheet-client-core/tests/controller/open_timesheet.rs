use timesheet_client_core::MemoryStore;
use timesheet_shared::{errors::NotLoggedInError, id::DbId, models::TimesheetStatus, uac::Role};

use crate::helpers::{logged_in, Call, FakeBackend, TestController};

#[test]
fn requires_session() {
    let mut controller = TestController::new(FakeBackend::default(), MemoryStore::new());
    assert_eq!(controller.open_timesheet(3.into()), Err(NotLoggedInError));
    assert!(controller.backend().calls().is_empty());
}

#[test]
fn loads_and_closes() {
    // Arrange
    let mut controller = logged_in(Role::Employee);

    // Act
    controller.open_timesheet(11.into()).unwrap();
    controller.poll();

    // Assert
    assert_eq!(
        controller.backend().calls(),
        vec![Call::LoadTimesheet(11.into())]
    );
    let open = controller.open_timesheet_state().unwrap();
    assert_eq!(open.id, DbId::from(11));
    assert_eq!(open.timesheet().unwrap().status, TimesheetStatus::Draft);
    assert!(open.is_editable());

    controller.close_timesheet();
    assert!(controller.open_timesheet_state().is_none());
}

#[test]
fn logout_closes_timesheet() {
    let mut controller = logged_in(Role::Admin);
    controller.open_timesheet(11.into()).unwrap();
    controller.logout();
    assert!(controller.open_timesheet_state().is_none());
}
