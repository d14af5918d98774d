use std::collections::BTreeSet;

use strum::IntoEnumIterator as _;

use super::Role;

/// Markers a UI element is tagged with to control who sees it
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    strum::AsRefStr,
    strum::EnumString,
)]
pub enum Capability {
    #[strum(serialize = "employee-visible")]
    EmployeeVisible,
    #[strum(serialize = "manager-visible")]
    ManagerVisible,
    #[strum(serialize = "admin-visible")]
    AdminVisible,
}

impl Capability {
    /// Least privileged role that sees elements tagged with this marker
    pub fn minimum_role(&self) -> Role {
        match self {
            Capability::EmployeeVisible => Role::Employee,
            Capability::ManagerVisible => Role::Manager,
            Capability::AdminVisible => Role::Admin,
        }
    }
}

/// The set of markers whose elements are shown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility(BTreeSet<Capability>);

impl Visibility {
    /// Markers shown for `role`. Each role sees everything the roles below it
    /// see.
    pub fn project(role: Role) -> Self {
        Self(
            Capability::iter()
                .filter(|capability| capability.minimum_role() <= role)
                .collect(),
        )
    }

    /// Projection used while nobody is logged in
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn shows(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    /// An element tagged with several markers is shown if any of them is
    pub fn is_element_visible(&self, markers: &[Capability]) -> bool {
        markers.iter().any(|marker| self.shows(*marker))
    }

    pub fn is_superset(&self, other: &Self) -> bool {
        self.0.is_superset(&other.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.0.iter()
    }
}
