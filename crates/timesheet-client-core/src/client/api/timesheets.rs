use timesheet_shared::{
    const_config::path::{
        PATH_TIMESHEET, PATH_TIMESHEETS_FOR_EMPLOYEE, PATH_TIMESHEETS_PENDING_APPROVAL,
        PATH_TIMESHEET_APPROVE, PATH_TIMESHEET_CREATE, PATH_TIMESHEET_ENTRY_ADD,
        PATH_TIMESHEET_REJECT, PATH_TIMESHEET_SUBMIT,
    },
    id::DbId,
    models::{Timesheet, TimesheetEntry},
    req_args::{EntryCreateReqArgs, RejectReqArgs, TimesheetCreateReqArgs},
};

use crate::{backend::ResponseReceiver, Client};

impl Client {
    #[tracing::instrument]
    pub fn employee_timesheets(&self, employee_id: DbId) -> ResponseReceiver<Vec<Timesheet>> {
        let request = self.request(
            &PATH_TIMESHEETS_FOR_EMPLOYEE,
            &PATH_TIMESHEETS_FOR_EMPLOYEE.with_id(employee_id),
        );
        self.send_request_expect_json(request)
    }

    #[tracing::instrument]
    pub fn timesheet(&self, id: DbId) -> ResponseReceiver<Timesheet> {
        let request = self.request(&PATH_TIMESHEET, &PATH_TIMESHEET.with_id(id));
        self.send_request_expect_json(request)
    }

    /// Timesheets submitted to `manager_id` that are still waiting for a
    /// decision
    #[tracing::instrument]
    pub fn pending_approvals(&self, manager_id: DbId) -> ResponseReceiver<Vec<Timesheet>> {
        let request = self
            .request(
                &PATH_TIMESHEETS_PENDING_APPROVAL,
                PATH_TIMESHEETS_PENDING_APPROVAL.path,
            )
            .query(&[("managerId", manager_id)]);
        self.send_request_expect_json(request)
    }

    #[tracing::instrument]
    pub fn create_timesheet(
        &self,
        employee_id: DbId,
        args: &TimesheetCreateReqArgs,
    ) -> ResponseReceiver<Timesheet> {
        let request = self
            .request(&PATH_TIMESHEET_CREATE, PATH_TIMESHEET_CREATE.path)
            .query(&[("employeeId", employee_id)])
            .json(args);
        self.send_request_expect_json(request)
    }

    #[tracing::instrument]
    pub fn add_timesheet_entry(
        &self,
        timesheet_id: DbId,
        args: &EntryCreateReqArgs,
    ) -> ResponseReceiver<TimesheetEntry> {
        let request = self
            .request(
                &PATH_TIMESHEET_ENTRY_ADD,
                &PATH_TIMESHEET_ENTRY_ADD.with_id(timesheet_id),
            )
            .json(args);
        self.send_request_expect_json(request)
    }

    #[tracing::instrument]
    pub fn submit_timesheet(
        &self,
        timesheet_id: DbId,
        employee_id: DbId,
    ) -> ResponseReceiver<Timesheet> {
        let request = self
            .request(
                &PATH_TIMESHEET_SUBMIT,
                &PATH_TIMESHEET_SUBMIT.with_id(timesheet_id),
            )
            .query(&[("employeeId", employee_id)]);
        self.send_request_expect_json(request)
    }

    #[tracing::instrument]
    pub fn approve_timesheet(
        &self,
        timesheet_id: DbId,
        manager_id: DbId,
    ) -> ResponseReceiver<Timesheet> {
        let request = self
            .request(
                &PATH_TIMESHEET_APPROVE,
                &PATH_TIMESHEET_APPROVE.with_id(timesheet_id),
            )
            .query(&[("managerId", manager_id)]);
        self.send_request_expect_json(request)
    }

    #[tracing::instrument]
    pub fn reject_timesheet(
        &self,
        args: &RejectReqArgs,
        manager_id: DbId,
    ) -> ResponseReceiver<Timesheet> {
        let request = self
            .request(
                &PATH_TIMESHEET_REJECT,
                &PATH_TIMESHEET_REJECT.with_id(args.timesheet_id),
            )
            .query(&[
                ("managerId", manager_id.to_string()),
                ("comment", args.comment().to_string()),
            ]);
        self.send_request_expect_json(request)
    }
}
