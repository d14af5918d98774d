//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

pub mod client {
    /// Address used when no configuration is supplied
    pub const CLIENT_DEFAULT_API_BASE_URL: &str = "http://localhost:8080/timesheet/api";
    pub const CLIENT_DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Number of entries the dashboard asks for when loading recent activity
    pub const CLIENT_RECENT_ACTIVITY_LIMIT: u8 = 5;
    /// Days added to the week start date to get the week end date
    pub const CLIENT_WEEK_LENGTH_DAYS: u64 = 6;
    pub const CLIENT_MAX_HOURS_PER_ENTRY: f64 = 24.0;
}

pub mod storage {
    /// Key under which the serialized identity of the current user is persisted
    pub const STORAGE_KEY_CURRENT_USER: &str = "currentUser";
}

/// Text shown to the user as transient notices
pub mod notice {
    pub const NOTICE_LOGIN_SUCCESS: &str = "Login successful!";
    pub const NOTICE_LOGIN_REJECTED_FALLBACK: &str = "Invalid credentials. Please try again.";
    pub const NOTICE_LOGIN_NETWORK_FAILURE: &str = "Login failed. Please check your connection.";
    pub const NOTICE_LOGOUT: &str = "Logged out successfully";
    pub const NOTICE_MUST_LOGIN: &str = "Please login to access this section";
    pub const NOTICE_FORBIDDEN: &str = "You do not have permission to access this section";
}

pub mod path {
    mod path_spec;
    pub use path_spec::PathSpec;
    pub const PATH_ACTIVITIES_MANAGER: PathSpec = PathSpec::get("/activities/manager/{id}");
    pub const PATH_ACTIVITIES_RECENT: PathSpec = PathSpec::get("/activities/recent/{id}");
    pub const PATH_AUTH_LOGIN: PathSpec = PathSpec::post("/auth/login");
    pub const PATH_EMPLOYEE: PathSpec = PathSpec::get("/employees/{id}");
    pub const PATH_EMPLOYEE_CREATE: PathSpec = PathSpec::post("/employees");
    pub const PATH_EMPLOYEE_DELETE: PathSpec = PathSpec::delete("/employees/{id}");
    pub const PATH_EMPLOYEE_UPDATE: PathSpec = PathSpec::put("/employees/{id}");
    pub const PATH_EMPLOYEES: PathSpec = PathSpec::get("/employees");
    pub const PATH_PROJECT_CREATE: PathSpec = PathSpec::post("/projects");
    pub const PATH_PROJECTS: PathSpec = PathSpec::get("/projects");
    pub const PATH_PROJECTS_ACTIVE: PathSpec = PathSpec::get("/projects/active");
    pub const PATH_REPORT_EMPLOYEE: PathSpec = PathSpec::get("/reports/employee/{id}");
    pub const PATH_REPORT_EMPLOYEE_EXPORT: PathSpec =
        PathSpec::get("/reports/employee/{id}/export");
    pub const PATH_REPORT_PROJECT: PathSpec = PathSpec::get("/reports/project/{id}");
    pub const PATH_REPORT_PROJECT_EXPORT: PathSpec = PathSpec::get("/reports/project/{id}/export");
    pub const PATH_TIMESHEET: PathSpec = PathSpec::get("/timesheets/{id}");
    pub const PATH_TIMESHEET_APPROVE: PathSpec = PathSpec::put("/timesheets/{id}/approve");
    pub const PATH_TIMESHEET_CREATE: PathSpec = PathSpec::post("/timesheets");
    pub const PATH_TIMESHEET_ENTRY_ADD: PathSpec = PathSpec::post("/timesheets/{id}/entries");
    pub const PATH_TIMESHEET_REJECT: PathSpec = PathSpec::put("/timesheets/{id}/reject");
    pub const PATH_TIMESHEET_SUBMIT: PathSpec = PathSpec::put("/timesheets/{id}/submit");
    pub const PATH_TIMESHEETS_FOR_EMPLOYEE: PathSpec = PathSpec::get("/timesheets/employee/{id}");
    pub const PATH_TIMESHEETS_PENDING_APPROVAL: PathSpec =
        PathSpec::get("/timesheets/pending-approvals");
}
