use futures::channel::oneshot;
use timesheet_shared::{
    id::DbId,
    models::{DashboardStats, Employee, Project, ReportFilterOptions, Timesheet},
    req_args::LoginReqArgs,
    uac::Identity,
};

use crate::{Client, LoginOutcome};

/// Receives the outcome of a request once the response has been processed
pub type ResponseReceiver<T> = oneshot::Receiver<anyhow::Result<T>>;

/// The requests the [`crate::SessionController`] makes. Every method returns
/// immediately and the result is delivered on the receiver.
pub trait Backend {
    fn login(&self, args: LoginReqArgs) -> ResponseReceiver<LoginOutcome>;

    /// Resolves to `Ok` only if the backend still knows the user
    fn validate_identity(&self, id: DbId) -> ResponseReceiver<()>;

    fn load_dashboard(&self, identity: &Identity) -> ResponseReceiver<DashboardStats>;

    fn load_timesheets(&self, identity: &Identity) -> ResponseReceiver<Vec<Timesheet>>;

    fn load_projects(&self, identity: &Identity) -> ResponseReceiver<Vec<Project>>;

    fn load_pending_approvals(&self, identity: &Identity) -> ResponseReceiver<Vec<Timesheet>>;

    fn load_report_options(&self, identity: &Identity) -> ResponseReceiver<ReportFilterOptions>;

    fn load_employees(&self, identity: &Identity) -> ResponseReceiver<Vec<Employee>>;

    fn load_timesheet(&self, id: DbId) -> ResponseReceiver<Timesheet>;
}

impl Backend for Client {
    fn login(&self, args: LoginReqArgs) -> ResponseReceiver<LoginOutcome> {
        Client::login(self, args)
    }

    fn validate_identity(&self, id: DbId) -> ResponseReceiver<()> {
        self.check_employee_exists(id)
    }

    fn load_dashboard(&self, identity: &Identity) -> ResponseReceiver<DashboardStats> {
        self.dashboard_stats(identity.id(), identity.role())
    }

    fn load_timesheets(&self, identity: &Identity) -> ResponseReceiver<Vec<Timesheet>> {
        self.employee_timesheets(identity.id())
    }

    fn load_projects(&self, _identity: &Identity) -> ResponseReceiver<Vec<Project>> {
        self.projects()
    }

    fn load_pending_approvals(&self, identity: &Identity) -> ResponseReceiver<Vec<Timesheet>> {
        self.pending_approvals(identity.id())
    }

    fn load_report_options(&self, _identity: &Identity) -> ResponseReceiver<ReportFilterOptions> {
        self.report_filter_options()
    }

    fn load_employees(&self, _identity: &Identity) -> ResponseReceiver<Vec<Employee>> {
        self.employees()
    }

    fn load_timesheet(&self, id: DbId) -> ResponseReceiver<Timesheet> {
        self.timesheet(id)
    }
}
