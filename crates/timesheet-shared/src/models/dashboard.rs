use super::{Activity, Employee, Project};

/// The figures shown on the dashboard. Each figure is loaded independently and
/// is `None` if its request failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub pending: Option<PendingCount>,
    pub active_projects: Option<usize>,
    pub recent_activity: Option<Vec<Activity>>,
}

/// What counts as pending depends on the role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingCount {
    /// Own timesheets still in draft
    Submissions(usize),
    /// Timesheets of others waiting for a decision
    Approvals(usize),
}

/// Choices offered when filtering a report
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilterOptions {
    pub employees: Vec<Employee>,
    pub projects: Vec<Project>,
}
