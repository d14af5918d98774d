use chrono::NaiveDateTime;

/// An entry of the recent activity feed shown on the dashboard
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub title: String,
    /// Human readable relative time as formatted by the backend ("2 hours ago")
    pub time: String,
    pub icon: Option<String>,
    pub icon_color: Option<String>,
    pub timestamp: Option<NaiveDateTime>,
}
