use std::str::FromStr;

use strum::IntoEnumIterator as _;

use super::Role;

/// The navigable regions of the application
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
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Section {
    Dashboard,
    Timesheets,
    Projects,
    Approvals,
    Reports,
    Employees,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Unknown section: {0:?}")]
pub struct UnknownSectionError(pub String);

impl Section {
    /// Section every role is allowed to enter, used as the landing page and as
    /// the redirect target when access is denied
    pub const DEFAULT: Section = Section::Dashboard;

    pub const fn permitted_roles(self) -> &'static [Role] {
        use Role as r;
        match self {
            Section::Dashboard => &[r::Employee, r::Manager, r::Admin],
            Section::Timesheets => &[r::Employee, r::Manager, r::Admin],
            Section::Projects => &[r::Employee, r::Manager, r::Admin],
            Section::Approvals => &[r::Manager, r::Admin],
            Section::Reports => &[r::Manager, r::Admin],
            Section::Employees => &[r::Admin, r::Manager],
        }
    }

    pub const fn permits(self, role: Role) -> bool {
        let roles = self.permitted_roles();
        let mut i = 0;
        while i < roles.len() {
            if roles[i] as u8 == role as u8 {
                return true;
            }
            i += 1;
        }
        false
    }

    /// Sections the role may enter, in menu order
    pub fn accessible_by(role: Role) -> impl Iterator<Item = Section> {
        Section::iter().filter(move |section| section.permits(role))
    }

    /// Description of the data loaded when the section is opened, used in
    /// messages to the user
    pub fn data_description(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard data",
            Section::Timesheets => "timesheets",
            Section::Projects => "projects",
            Section::Approvals => "pending approvals",
            Section::Reports => "report data",
            Section::Employees => "employees",
        }
    }
}

impl FromStr for Section {
    type Err = UnknownSectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::iter()
            .find(|section| section.as_ref() == s)
            .ok_or_else(|| UnknownSectionError(s.to_string()))
    }
}
