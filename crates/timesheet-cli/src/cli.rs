use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use timesheet_shared::{models::ReportKind, uac::Role};

/// Command line client for the timesheet application
///
/// The logged in user is remembered between runs. Every command other than
/// `login` and `logout` first confirms with the backend that the remembered
/// user is still valid.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(
        short = 's',
        long = "stdout",
        action,
        help = "Controls if it logs to stdout/stderr instead of to a file"
    )]
    pub is_to_std_out: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Log in and remember the user
    ///
    /// The password is read from `TIMESHEET_PASSWORD` if set, otherwise it is
    /// prompted for
    Login {
        #[arg(long)]
        email: String,
    },

    /// Forget the remembered user
    Logout,

    /// Show who is logged in and what they can access
    Status,

    /// Open a section and show its data
    Goto {
        /// One of dashboard, timesheets, projects, approvals, reports or
        /// employees
        section: String,
    },

    #[command(subcommand)]
    Timesheet(TimesheetCommand),

    #[command(subcommand)]
    Project(ProjectCommand),

    /// Manage employees (managers and admins only)
    #[command(subcommand)]
    Employee(EmployeeCommand),

    /// Approve a submitted timesheet
    Approve { timesheet_id: u64 },

    /// Reject a submitted timesheet
    Reject {
        timesheet_id: u64,

        /// Reason given to the employee
        #[arg(long)]
        comment: String,
    },

    /// Hours worked by an employee or on a project over a date range
    Report {
        /// employee or project
        kind: ReportKind,

        /// Id of the employee or project
        id: u64,

        #[arg(long)]
        start: NaiveDate,

        #[arg(long)]
        end: NaiveDate,

        /// Print the CSV export instead of the summary
        #[arg(long)]
        export: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum TimesheetCommand {
    /// Show a timesheet and its entries
    Open { id: u64 },

    /// Start a timesheet for the week beginning on the given date
    Create {
        #[arg(long)]
        week_start: NaiveDate,
    },

    /// Add hours to a draft timesheet
    AddEntry {
        timesheet_id: u64,

        #[arg(long)]
        project: u64,

        #[arg(long)]
        date: NaiveDate,

        #[arg(long)]
        hours: f64,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Send a draft timesheet for approval
    Submit { timesheet_id: u64 },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ProjectCommand {
    /// Add a project that hours can be booked against
    Create {
        #[arg(long)]
        code: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,

        /// Id of the employee managing the project
        #[arg(long)]
        manager: Option<u64>,

        #[arg(long)]
        start: Option<NaiveDate>,

        #[arg(long)]
        end: Option<NaiveDate>,

        /// Create the project without accepting hours yet
        #[arg(long)]
        inactive: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum EmployeeCommand {
    /// Show the details of one employee
    Show { id: u64 },

    /// List the employees others can report to
    Managers,

    /// Add an employee
    ///
    /// Their password is read from `TIMESHEET_NEW_PASSWORD` if set, otherwise
    /// it is prompted for
    Create {
        #[command(flatten)]
        details: EmployeeDetails,
    },

    /// Replace the details of an employee
    Update {
        id: u64,

        #[command(flatten)]
        details: EmployeeDetails,
    },

    /// Remove an employee
    Delete { id: u64 },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct EmployeeDetails {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    /// EMPLOYEE, MANAGER or ADMIN
    #[arg(long)]
    pub role: Role,

    /// Id of the manager they report to
    #[arg(long)]
    pub manager: Option<u64>,
}
