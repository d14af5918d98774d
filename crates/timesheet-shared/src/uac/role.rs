use std::fmt::Display;

/// Roles are ordered from least to most privileged
#[derive(
    Debug,
    serde::Serialize,
    serde::Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Role {
    Employee,
    Manager,
    Admin,
}

impl Role {
    /// Roles that review the timesheets of others
    pub fn is_approver(&self) -> bool {
        match self {
            Role::Employee => false,
            Role::Manager | Role::Admin => true,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let display_text = match self {
            Role::Employee => "Employee",
            Role::Manager => "Manager",
            Role::Admin => "Administrator",
        };
        write!(f, "{display_text}")
    }
}
