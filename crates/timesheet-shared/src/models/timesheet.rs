use chrono::{NaiveDate, NaiveDateTime};

use crate::id::DbId;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimesheetStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl TimesheetStatus {
    /// Only drafts may have entries added or be submitted
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Timesheet {
    pub id: DbId,
    pub employee_id: DbId,
    pub employee_name: Option<String>,
    pub week_start_date: NaiveDate,
    pub week_end_date: NaiveDate,
    pub status: TimesheetStatus,
    #[serde(default)]
    pub entries: Vec<TimesheetEntry>,
    pub rejection_comment: Option<String>,
    pub approved_by_id: Option<DbId>,
    pub approved_by_name: Option<String>,
    pub submitted_at: Option<NaiveDateTime>,
    pub approved_at: Option<NaiveDateTime>,
    pub total_hours: Option<f64>,
}

impl Timesheet {
    /// Uses the total reported by the backend when present
    pub fn total_hours(&self) -> f64 {
        self.total_hours
            .unwrap_or_else(|| self.entries.iter().map(|entry| entry.hours_worked).sum())
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetEntry {
    pub id: DbId,
    pub timesheet_id: Option<DbId>,
    pub project_id: DbId,
    pub project_code: Option<String>,
    pub project_name: Option<String>,
    pub work_date: NaiveDate,
    pub hours_worked: f64,
    pub task_description: Option<String>,
}
