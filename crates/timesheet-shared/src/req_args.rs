//! This module stores the expected format of the arguments for the requests.
//! Validation that the front end is expected to do before sending is done when
//! constructing the arguments so an invalid request cannot be built.

use chrono::{Days, NaiveDate};
use secrecy::{ExposeSecret, SecretString};
use std::fmt::Debug;

use crate::{
    const_config::client::{CLIENT_MAX_HOURS_PER_ENTRY, CLIENT_WEEK_LENGTH_DAYS},
    id::DbId,
    models::ReportKind,
    uac::{Email, Role},
};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ReqArgsError {
    #[error("Start date cannot be after end date")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
    #[error("Hours worked must be more than 0 and at most {max} but found {actual}")]
    HoursOutOfRange { max: f64, actual: f64 },
    #[error("A comment is required when rejecting a timesheet")]
    MissingComment,
    #[error("Please select {0}")]
    NoSubjectSelected(&'static str),
    #[error("{0} is required")]
    MissingField(&'static str),
}

fn required(value: String, field: &'static str) -> Result<String, ReqArgsError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ReqArgsError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

#[derive(Clone)]
pub struct LoginReqArgs {
    pub email: String,
    pub password: SecretString,
}

impl LoginReqArgs {
    pub fn new<S: Into<String>>(email: S, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }
}

impl Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReqArgs")
            .field("email", &self.email)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .finish()
    }
}

#[derive(Debug, serde::Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetCreateReqArgs {
    week_start_date: NaiveDate,
    week_end_date: NaiveDate,
}

impl TimesheetCreateReqArgs {
    /// The week end is derived from the start
    pub fn new(week_start_date: NaiveDate) -> Self {
        let week_end_date = week_start_date
            .checked_add_days(Days::new(CLIENT_WEEK_LENGTH_DAYS))
            .unwrap_or(NaiveDate::MAX);
        Self {
            week_start_date,
            week_end_date,
        }
    }

    pub fn week_start_date(&self) -> NaiveDate {
        self.week_start_date
    }

    pub fn week_end_date(&self) -> NaiveDate {
        self.week_end_date
    }
}

#[derive(Debug, serde::Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntryCreateReqArgs {
    project_id: DbId,
    work_date: NaiveDate,
    hours_worked: f64,
    task_description: String,
}

impl EntryCreateReqArgs {
    pub fn new(
        project_id: DbId,
        work_date: NaiveDate,
        hours_worked: f64,
        task_description: String,
    ) -> Result<Self, ReqArgsError> {
        if !(hours_worked > 0.0 && hours_worked <= CLIENT_MAX_HOURS_PER_ENTRY) {
            return Err(ReqArgsError::HoursOutOfRange {
                max: CLIENT_MAX_HOURS_PER_ENTRY,
                actual: hours_worked,
            });
        }
        Ok(Self {
            project_id,
            work_date,
            hours_worked,
            task_description,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectReqArgs {
    pub timesheet_id: DbId,
    comment: String,
}

impl RejectReqArgs {
    pub fn new(timesheet_id: DbId, comment: String) -> Result<Self, ReqArgsError> {
        if comment.trim().is_empty() {
            return Err(ReqArgsError::MissingComment);
        }
        Ok(Self {
            timesheet_id,
            comment,
        })
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}

/// Details of an employee as sent when creating or updating one
#[derive(Debug, serde::Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeReqArgs {
    email: Email,
    first_name: String,
    last_name: String,
    role: Role,
    /// Sent as `null` when the employee reports to nobody
    manager_id: Option<DbId>,
}

impl EmployeeReqArgs {
    pub fn new(
        email: String,
        first_name: String,
        last_name: String,
        role: Role,
        manager_id: Option<DbId>,
    ) -> Result<Self, ReqArgsError> {
        let email = Email::try_from(required(email, "Email")?)
            .map_err(|_| ReqArgsError::MissingField("Email"))?;
        Ok(Self {
            email,
            first_name: required(first_name, "First name")?,
            last_name: required(last_name, "Last name")?,
            role,
            manager_id: manager_id.filter(|id| !id.is_unset()),
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn manager_id(&self) -> Option<DbId> {
        self.manager_id
    }
}

/// A new employee and the password they will log in with. The password is
/// sent in the query string, never in the body.
#[derive(Clone)]
pub struct EmployeeCreateReqArgs {
    pub employee: EmployeeReqArgs,
    pub password: SecretString,
}

impl EmployeeCreateReqArgs {
    pub fn new(employee: EmployeeReqArgs, password: SecretString) -> Result<Self, ReqArgsError> {
        if password.expose_secret().is_empty() {
            return Err(ReqArgsError::MissingField("Password"));
        }
        Ok(Self { employee, password })
    }
}

impl Debug for EmployeeCreateReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployeeCreateReqArgs")
            .field("employee", &self.employee)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .finish()
    }
}

#[derive(Debug, serde::Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreateReqArgs {
    project_code: String,
    project_name: String,
    description: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    project_manager_id: Option<DbId>,
    is_active: bool,
}

impl ProjectCreateReqArgs {
    pub fn new(
        project_code: String,
        project_name: String,
        description: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        project_manager_id: Option<DbId>,
        is_active: bool,
    ) -> Result<Self, ReqArgsError> {
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(ReqArgsError::StartAfterEnd { start, end });
            }
        }
        Ok(Self {
            project_code: required(project_code, "Project code")?,
            project_name: required(project_name, "Project name")?,
            description: description.filter(|text| !text.trim().is_empty()),
            start_date,
            end_date,
            project_manager_id: project_manager_id.filter(|id| !id.is_unset()),
            is_active,
        })
    }

    pub fn project_code(&self) -> &str {
        &self.project_code
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportReqArgs {
    pub kind: ReportKind,
    pub subject_id: DbId,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

/// Query string of a report request
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ReportReqArgs {
    pub fn new(
        kind: ReportKind,
        subject_id: Option<DbId>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, ReqArgsError> {
        let subject_id = subject_id.filter(|id| !id.is_unset()).ok_or(match kind {
            ReportKind::Employee => ReqArgsError::NoSubjectSelected("an employee"),
            ReportKind::Project => ReqArgsError::NoSubjectSelected("a project"),
        })?;
        if start_date > end_date {
            return Err(ReqArgsError::StartAfterEnd {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            kind,
            subject_id,
            start_date,
            end_date,
        })
    }

    pub fn range(&self) -> ReportRange {
        ReportRange {
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}
