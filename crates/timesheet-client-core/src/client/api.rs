//! Requests used by the individual sections once they are open

use timesheet_shared::{
    const_config::path::{PATH_EMPLOYEES, PATH_PROJECTS, PATH_PROJECT_CREATE},
    models::{Employee, Project, ReportFilterOptions},
    req_args::ProjectCreateReqArgs,
};

use crate::{backend::ResponseReceiver, Client};

use super::process_json_body;

mod employees;
mod reports;
mod timesheets;

impl Client {
    #[tracing::instrument]
    pub fn employees(&self) -> ResponseReceiver<Vec<Employee>> {
        let request = self.request(&PATH_EMPLOYEES, PATH_EMPLOYEES.path);
        self.send_request_expect_json(request)
    }

    #[tracing::instrument]
    pub fn projects(&self) -> ResponseReceiver<Vec<Project>> {
        let request = self.request(&PATH_PROJECTS, PATH_PROJECTS.path);
        self.send_request_expect_json(request)
    }

    #[tracing::instrument]
    pub fn create_project(&self, args: &ProjectCreateReqArgs) -> ResponseReceiver<Project> {
        let request = self
            .request(&PATH_PROJECT_CREATE, PATH_PROJECT_CREATE.path)
            .json(args);
        self.send_request_expect_json(request)
    }

    /// Both lists are needed before a report can be filtered so they are
    /// delivered together
    #[tracing::instrument]
    pub fn report_filter_options(&self) -> ResponseReceiver<ReportFilterOptions> {
        let (tx, rx) = futures::channel::oneshot::channel();
        let request = self.request(&PATH_EMPLOYEES, PATH_EMPLOYEES.path);
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = async {
                let employees: Vec<Employee> = process_json_body(resp).await?;
                let projects_request = client.request(&PATH_PROJECTS, PATH_PROJECTS.path);
                let projects: Vec<Project> =
                    process_json_body(projects_request.send().await).await?;
                anyhow::Ok(ReportFilterOptions {
                    employees,
                    projects,
                })
            }
            .await;
            client.respond(tx, msg);
        };
        self.initiate_request(request, on_done);
        rx
    }
}
