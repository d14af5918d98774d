use timesheet_shared::{
    id::DbId,
    models::{DashboardStats, Employee, Project, ReportFilterOptions, Timesheet},
    uac::{Identity, Section},
};

use crate::{Backend, DataState};

/// The data shown by each section, refreshed every time the section is
/// activated
#[derive(Debug, Default)]
pub struct SectionStates {
    pub dashboard: DataState<DashboardStats>,
    pub timesheets: DataState<Vec<Timesheet>>,
    pub projects: DataState<Vec<Project>>,
    pub approvals: DataState<Vec<Timesheet>>,
    pub reports: DataState<ReportFilterOptions>,
    pub employees: DataState<Vec<Employee>>,
}

impl SectionStates {
    /// Starts the load belonging to `section`, replacing any load of that
    /// section that is still in flight
    pub(crate) fn start_load<B: Backend>(
        &mut self,
        section: Section,
        backend: &B,
        identity: &Identity,
    ) {
        match section {
            Section::Dashboard => self
                .dashboard
                .start(|| backend.load_dashboard(identity).into()),
            Section::Timesheets => self
                .timesheets
                .start(|| backend.load_timesheets(identity).into()),
            Section::Projects => self
                .projects
                .start(|| backend.load_projects(identity).into()),
            Section::Approvals => self
                .approvals
                .start(|| backend.load_pending_approvals(identity).into()),
            Section::Reports => self
                .reports
                .start(|| backend.load_report_options(identity).into()),
            Section::Employees => self
                .employees
                .start(|| backend.load_employees(identity).into()),
        }
    }

    /// Advances every pending load and returns the sections whose load failed
    pub(crate) fn poll(&mut self) -> Vec<Section> {
        let outcomes = [
            (Section::Dashboard, self.dashboard.poll()),
            (Section::Timesheets, self.timesheets.poll()),
            (Section::Projects, self.projects.poll()),
            (Section::Approvals, self.approvals.poll()),
            (Section::Reports, self.reports.poll()),
            (Section::Employees, self.employees.poll()),
        ];
        outcomes
            .into_iter()
            .filter_map(|(section, outcome)| matches!(outcome, Some(Err(_))).then_some(section))
            .collect()
    }

    pub fn is_loading(&self, section: Section) -> bool {
        match section {
            Section::Dashboard => self.dashboard.is_awaiting(),
            Section::Timesheets => self.timesheets.is_awaiting(),
            Section::Projects => self.projects.is_awaiting(),
            Section::Approvals => self.approvals.is_awaiting(),
            Section::Reports => self.reports.is_awaiting(),
            Section::Employees => self.employees.is_awaiting(),
        }
    }

    pub fn is_any_loading(&self) -> bool {
        use strum::IntoEnumIterator as _;
        Section::iter().any(|section| self.is_loading(section))
    }

    pub fn is_present(&self, section: Section) -> bool {
        match section {
            Section::Dashboard => self.dashboard.is_present(),
            Section::Timesheets => self.timesheets.is_present(),
            Section::Projects => self.projects.is_present(),
            Section::Approvals => self.approvals.is_present(),
            Section::Reports => self.reports.is_present(),
            Section::Employees => self.employees.is_present(),
        }
    }
}

/// The timesheet currently being viewed or edited
#[derive(Debug)]
pub struct OpenTimesheet {
    pub id: DbId,
    pub state: DataState<Timesheet>,
}

impl OpenTimesheet {
    pub fn timesheet(&self) -> Option<&Timesheet> {
        self.state.present()
    }

    /// Entries may only be added to (and submission done from) a draft
    pub fn is_editable(&self) -> bool {
        self.timesheet()
            .is_some_and(|timesheet| timesheet.status.is_editable())
    }
}
