use chrono::NaiveDate;

use crate::id::DbId;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Not set when creating a project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    pub project_code: String,
    pub project_name: String,
    pub description: Option<String>,
    pub project_manager_id: Option<DbId>,
    #[serde(default, skip_serializing)]
    pub project_manager_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_active: bool,
}

impl Project {
    /// Label used in selection lists ("CODE - Name")
    pub fn label(&self) -> String {
        format!("{} - {}", self.project_code, self.project_name)
    }
}
