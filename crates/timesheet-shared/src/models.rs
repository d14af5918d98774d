//! Records exchanged with the backend. Field names follow the backend's
//! camelCase JSON.

mod activity;
mod dashboard;
mod employee;
mod project;
mod report;
mod timesheet;

pub use activity::Activity;
pub use dashboard::{DashboardStats, PendingCount, ReportFilterOptions};
pub use employee::Employee;
pub use project::Project;
pub use report::{Report, ReportItem, ReportKind};
pub use timesheet::{Timesheet, TimesheetEntry, TimesheetStatus};
