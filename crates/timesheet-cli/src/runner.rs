//! Drives the [`SessionController`] for one command and prints the results

use anyhow::{bail, Context as _};
use futures::channel::oneshot;
use secrecy::SecretString;
use std::{
    io::{BufRead as _, Write as _},
    sync::{
        mpsc::{self, RecvTimeoutError},
        Arc,
    },
    time::Duration,
};
use timesheet_client_core::{
    Client, ResponseReceiver, SessionController, TopLevelView, WakeFn,
};
use timesheet_shared::{
    const_config::notice::NOTICE_FORBIDDEN,
    errors::NotLoggedInError,
    id::DbId,
    models::{Employee, PendingCount, Report, ReportKind, Timesheet},
    req_args::{
        EmployeeCreateReqArgs, EmployeeReqArgs, EntryCreateReqArgs, LoginReqArgs,
        ProjectCreateReqArgs, RejectReqArgs, ReportReqArgs, TimesheetCreateReqArgs,
    },
    uac::{Identity, Section},
};
use tracing::info;

use crate::{
    cli::{Command, EmployeeCommand, EmployeeDetails, ProjectCommand, TimesheetCommand},
    configuration::Configuration,
    FileStore,
};

/// Environment variable checked for the password before prompting
pub const PASSWORD_ENV_VAR: &str = "TIMESHEET_PASSWORD";

/// Same as [`PASSWORD_ENV_VAR`] but for the password of a new employee
pub const NEW_PASSWORD_ENV_VAR: &str = "TIMESHEET_NEW_PASSWORD";

/// Composite loads (the dashboard) make several requests before waking us
const WAIT_TIMEOUT_MULTIPLIER: u32 = 4;

pub struct Runner {
    controller: SessionController<Client, FileStore>,
    wake_rx: mpsc::Receiver<()>,
    wait_timeout: Duration,
}

impl Runner {
    pub fn new(configuration: &Configuration) -> anyhow::Result<Self> {
        let (wake_tx, wake_rx) = mpsc::channel();
        let wake_fn: WakeFn = Arc::new(move || {
            // Only fails once the runner is gone and nobody is waiting
            let _ = wake_tx.send(());
        });
        let request_timeout = configuration.api.request_timeout();
        let client = Client::new(
            configuration.api.base_url.clone(),
            Some(request_timeout),
            Some(wake_fn),
        )?;
        let store = FileStore::new(configuration.storage.directory.clone());
        Ok(Self {
            controller: SessionController::new(client, store),
            wake_rx,
            wait_timeout: request_timeout * WAIT_TIMEOUT_MULTIPLIER,
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn run(mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Login { email } => self.login(email),
            Command::Logout => {
                self.controller.logout();
                self.settle()
            }
            Command::Status => {
                self.restore_session()?;
                self.print_status();
                Ok(())
            }
            Command::Goto { section } => {
                self.restore_session()?;
                let outcome = self.controller.request_navigation_by_name(&section);
                info!(?outcome);
                self.settle()?;
                self.print_active_section();
                Ok(())
            }
            Command::Timesheet(command) => {
                self.restore_session()?;
                self.run_timesheet(command)
            }
            Command::Project(command) => {
                self.restore_session()?;
                self.run_project(command)
            }
            Command::Employee(command) => {
                self.restore_session()?;
                self.require_section(Section::Employees)?;
                self.run_employee(command)
            }
            Command::Approve { timesheet_id } => {
                self.restore_session()?;
                let identity = self.require_section(Section::Approvals)?;
                let rx = self
                    .client()
                    .approve_timesheet(timesheet_id.into(), identity.id());
                let timesheet = self.await_response(rx)?;
                println!("Approved timesheet #{}", timesheet.id);
                Ok(())
            }
            Command::Reject {
                timesheet_id,
                comment,
            } => {
                self.restore_session()?;
                let identity = self.require_section(Section::Approvals)?;
                let args = RejectReqArgs::new(timesheet_id.into(), comment)?;
                let rx = self.client().reject_timesheet(&args, identity.id());
                let timesheet = self.await_response(rx)?;
                println!("Rejected timesheet #{}", timesheet.id);
                Ok(())
            }
            Command::Report {
                kind,
                id,
                start,
                end,
                export,
            } => {
                self.restore_session()?;
                self.require_section(Section::Reports)?;
                let args = ReportReqArgs::new(kind, Some(id.into()), start, end)?;
                if export {
                    let rx = self.client().report_export(&args);
                    print!("{}", self.await_response(rx)?);
                } else {
                    let rx = self.client().report(&args);
                    let report = self.await_response(rx)?;
                    print_report(&report, kind);
                }
                Ok(())
            }
        }
    }

    fn run_timesheet(&mut self, command: TimesheetCommand) -> anyhow::Result<()> {
        match command {
            TimesheetCommand::Open { id } => {
                self.open_timesheet(id.into())?;
                if let Some(timesheet) = self.opened_timesheet() {
                    print_timesheet(timesheet);
                }
                Ok(())
            }
            TimesheetCommand::Create { week_start } => {
                let identity = self.require_session()?;
                let args = TimesheetCreateReqArgs::new(week_start);
                let rx = self.client().create_timesheet(identity.id(), &args);
                let timesheet = self.await_response(rx)?;
                println!(
                    "Created timesheet #{} for {} to {}",
                    timesheet.id, timesheet.week_start_date, timesheet.week_end_date
                );
                Ok(())
            }
            TimesheetCommand::AddEntry {
                timesheet_id,
                project,
                date,
                hours,
                description,
            } => {
                let args = EntryCreateReqArgs::new(project.into(), date, hours, description)?;
                self.require_editable(timesheet_id.into())?;
                let rx = self.client().add_timesheet_entry(timesheet_id.into(), &args);
                let entry = self.await_response(rx)?;
                println!(
                    "Added {}h on {} to timesheet #{timesheet_id}",
                    entry.hours_worked, entry.work_date
                );
                Ok(())
            }
            TimesheetCommand::Submit { timesheet_id } => {
                let identity = self.require_session()?;
                self.require_editable(timesheet_id.into())?;
                let rx = self
                    .client()
                    .submit_timesheet(timesheet_id.into(), identity.id());
                let timesheet = self.await_response(rx)?;
                println!(
                    "Submitted timesheet #{} ({:?})",
                    timesheet.id, timesheet.status
                );
                Ok(())
            }
        }
    }

    fn run_project(&mut self, command: ProjectCommand) -> anyhow::Result<()> {
        match command {
            ProjectCommand::Create {
                code,
                name,
                description,
                manager,
                start,
                end,
                inactive,
            } => {
                self.require_section(Section::Projects)?;
                let args = ProjectCreateReqArgs::new(
                    code,
                    name,
                    description,
                    start,
                    end,
                    manager.map(DbId::from),
                    !inactive,
                )?;
                let rx = self.client().create_project(&args);
                let project = self.await_response(rx)?;
                println!("Created project {}", project.label());
                Ok(())
            }
        }
    }

    fn run_employee(&mut self, command: EmployeeCommand) -> anyhow::Result<()> {
        match command {
            EmployeeCommand::Show { id } => {
                let rx = self.client().employee(id.into());
                let employee = self.await_response(rx)?;
                print_employee(&employee);
                if let Some(manager) = employee.manager_name.as_deref() {
                    println!("  Reports to: {manager}");
                }
            }
            EmployeeCommand::Managers => {
                let rx = self.client().managers();
                for manager in self.await_response(rx)? {
                    print_employee(&manager);
                }
            }
            EmployeeCommand::Create { details } => {
                let employee = employee_args(details)?;
                let password = read_password(NEW_PASSWORD_ENV_VAR, "New employee password: ")?;
                let args = EmployeeCreateReqArgs::new(employee, password)?;
                let rx = self.client().create_employee(&args);
                let employee = self.await_response(rx)?;
                println!("Created employee #{}", employee.id);
            }
            EmployeeCommand::Update { id, details } => {
                let args = employee_args(details)?;
                let rx = self.client().update_employee(id.into(), &args);
                let employee = self.await_response(rx)?;
                println!("Updated employee #{}", employee.id);
            }
            EmployeeCommand::Delete { id } => {
                let rx = self.client().delete_employee(id.into());
                self.await_response(rx)?;
                println!("Deleted employee #{id}");
            }
        }
        Ok(())
    }

    fn login(&mut self, email: String) -> anyhow::Result<()> {
        let password = read_password(PASSWORD_ENV_VAR, "Password: ")?;
        self.controller.login(LoginReqArgs::new(email, password));
        self.settle()?;
        if self.controller.is_logged_in() {
            self.print_status();
            Ok(())
        } else {
            bail!("login failed")
        }
    }

    /// Confirms the remembered user with the backend
    fn restore_session(&mut self) -> anyhow::Result<()> {
        self.controller.bootstrap();
        self.settle()
    }

    fn open_timesheet(&mut self, id: DbId) -> anyhow::Result<()> {
        self.controller.open_timesheet(id)?;
        self.settle()?;
        if self.opened_timesheet().is_none() {
            bail!("unable to load timesheet #{id}");
        }
        Ok(())
    }

    fn opened_timesheet(&self) -> Option<&Timesheet> {
        self.controller
            .open_timesheet_state()
            .and_then(|open| open.timesheet())
    }

    fn require_editable(&mut self, id: DbId) -> anyhow::Result<()> {
        self.open_timesheet(id)?;
        let editable = self
            .controller
            .open_timesheet_state()
            .is_some_and(|open| open.is_editable());
        if !editable {
            bail!("Only draft timesheets can be changed");
        }
        Ok(())
    }

    fn require_session(&self) -> anyhow::Result<Identity> {
        Ok(self.controller.session().cloned().ok_or(NotLoggedInError)?)
    }

    fn require_section(&self, section: Section) -> anyhow::Result<Identity> {
        let identity = self.require_session()?;
        if !section.permits(identity.role()) {
            bail!(NOTICE_FORBIDDEN);
        }
        Ok(identity)
    }

    fn client(&self) -> &Client {
        self.controller.backend()
    }

    /// Polls the controller until nothing it started is outstanding
    fn settle(&mut self) -> anyhow::Result<()> {
        loop {
            self.controller.poll();
            self.print_notices();
            if !self.controller.is_busy() {
                return Ok(());
            }
            self.wait()?;
        }
    }

    fn await_response<T>(&mut self, mut rx: ResponseReceiver<T>) -> anyhow::Result<T> {
        loop {
            match rx.try_recv() {
                Ok(Some(result)) => return result,
                Ok(None) => self.wait()?,
                Err(oneshot::Canceled) => {
                    bail!("response channel closed before a response arrived")
                }
            }
        }
    }

    fn wait(&self) -> anyhow::Result<()> {
        match self.wake_rx.recv_timeout(self.wait_timeout) {
            Ok(()) => Ok(()),
            Err(RecvTimeoutError::Timeout) => bail!("timed out waiting for the backend"),
            Err(RecvTimeoutError::Disconnected) => bail!("client was dropped"),
        }
    }

    fn print_notices(&mut self) {
        for notice in self.controller.take_notices() {
            println!("{notice}");
        }
    }

    fn print_status(&self) {
        let Some(identity) = self.controller.session() else {
            println!("Not logged in");
            return;
        };
        debug_assert_eq!(self.controller.view(), TopLevelView::LoggedIn);
        if let Some(welcome) = self.controller.welcome_message() {
            println!("{welcome}");
        }
        println!("Email: {}", identity.email());
        println!("Role: {}", identity.role());
        let sections: Vec<&'static str> = Section::accessible_by(identity.role())
            .map(<&'static str>::from)
            .collect();
        println!("Sections: {}", sections.join(", "));
        let markers: Vec<&str> = self
            .controller
            .visibility()
            .iter()
            .map(|marker| marker.as_ref())
            .collect();
        println!("Visible: {}", markers.join(", "));
    }

    fn print_active_section(&self) {
        let Some(section) = self.controller.active_section() else {
            return;
        };
        println!("== {section} ==");
        let states = self.controller.sections();
        match section {
            Section::Dashboard => {
                let Some(stats) = states.dashboard.present() else {
                    return;
                };
                match stats.pending {
                    Some(PendingCount::Submissions(count)) => {
                        println!("Pending submissions: {count}")
                    }
                    Some(PendingCount::Approvals(count)) => println!("Pending approvals: {count}"),
                    None => println!("Pending: -"),
                }
                match stats.active_projects {
                    Some(count) => println!("Active projects: {count}"),
                    None => println!("Active projects: -"),
                }
                match &stats.recent_activity {
                    Some(activities) if activities.is_empty() => println!("No recent activity"),
                    Some(activities) => {
                        println!("Recent activity:");
                        for activity in activities {
                            println!("  {} ({})", activity.title, activity.time);
                        }
                    }
                    None => println!("Recent activity: -"),
                }
            }
            Section::Timesheets | Section::Approvals => {
                let state = if section == Section::Timesheets {
                    &states.timesheets
                } else {
                    &states.approvals
                };
                let Some(timesheets) = state.present() else {
                    return;
                };
                if timesheets.is_empty() {
                    println!("No timesheets");
                }
                for timesheet in timesheets {
                    print_timesheet_line(timesheet);
                }
            }
            Section::Projects => {
                for project in states.projects.present().into_iter().flatten() {
                    let active = if project.is_active { "" } else { " (inactive)" };
                    println!("{}{active}", project.label());
                }
            }
            Section::Reports => {
                let Some(options) = states.reports.present() else {
                    return;
                };
                println!("Employees:");
                for employee in options.employees.iter() {
                    println!("  #{} {}", employee.id, employee.display_name());
                }
                println!("Projects:");
                for project in options.projects.iter() {
                    let id = project.id.map(|id| id.to_string()).unwrap_or_default();
                    println!("  #{id} {}", project.label());
                }
            }
            Section::Employees => {
                for employee in states.employees.present().into_iter().flatten() {
                    print_employee(employee);
                }
            }
        }
    }
}

fn employee_args(details: EmployeeDetails) -> anyhow::Result<EmployeeReqArgs> {
    Ok(EmployeeReqArgs::new(
        details.email,
        details.first_name,
        details.last_name,
        details.role,
        details.manager.map(DbId::from),
    )?)
}

fn read_password(env_var: &str, prompt: &str) -> anyhow::Result<SecretString> {
    if let Ok(password) = std::env::var(env_var) {
        return Ok(password.into());
    }
    print!("{prompt}");
    std::io::stdout().flush().context("failed to flush stdout")?;
    let mut password = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut password)
        .context("failed to read password")?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string().into())
}

fn print_employee(employee: &Employee) {
    println!(
        "#{} {} <{}> {}",
        employee.id,
        employee.display_name(),
        employee.email,
        employee.role
    );
}

fn print_timesheet_line(timesheet: &Timesheet) {
    let employee = timesheet
        .employee_name
        .as_deref()
        .map(|name| format!(" {name}"))
        .unwrap_or_default();
    println!(
        "#{}{employee} {} to {} {:?} {}h",
        timesheet.id,
        timesheet.week_start_date,
        timesheet.week_end_date,
        timesheet.status,
        timesheet.total_hours()
    );
}

fn print_timesheet(timesheet: &Timesheet) {
    print_timesheet_line(timesheet);
    if let Some(comment) = timesheet.rejection_comment.as_deref() {
        println!("Rejected: {comment}");
    }
    for entry in timesheet.entries.iter() {
        let project = entry
            .project_code
            .as_deref()
            .or(entry.project_name.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", entry.project_id));
        println!(
            "  {} {project} {}h {}",
            entry.work_date,
            entry.hours_worked,
            entry.task_description.as_deref().unwrap_or_default()
        );
    }
}

fn print_report(report: &Report, kind: ReportKind) {
    println!(
        "{} to {}: {}h",
        report.start_date, report.end_date, report.total_hours
    );
    for (name, hours) in report.breakdown(kind) {
        println!("  {name}: {hours}h");
    }
}
