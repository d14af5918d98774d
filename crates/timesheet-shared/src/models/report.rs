use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::id::DbId;

/// What the report is about, decides which endpoint is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::AsRefStr, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ReportKind {
    Employee,
    Project,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub employee_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub manager_id: Option<DbId>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub total_hours: f64,
    /// Filled for employee reports
    #[serde(default)]
    pub project_hours: BTreeMap<String, f64>,
    /// Filled for project reports
    #[serde(default)]
    pub employee_hours: BTreeMap<String, f64>,
    #[serde(default)]
    pub entries: Vec<ReportItem>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportItem {
    pub work_date: NaiveDate,
    pub employee_name: Option<String>,
    pub project_name: Option<String>,
    pub project_code: Option<String>,
    pub hours_worked: f64,
    pub task_description: Option<String>,
}

impl Report {
    /// Hours broken down by the dimension that is not the subject of the
    /// report
    pub fn breakdown(&self, kind: ReportKind) -> &BTreeMap<String, f64> {
        match kind {
            ReportKind::Employee => &self.project_hours,
            ReportKind::Project => &self.employee_hours,
        }
    }
}
