use futures::channel::oneshot;
use secrecy::ExposeSecret as _;
use timesheet_shared::{
    const_config::path::{
        PATH_EMPLOYEE, PATH_EMPLOYEES, PATH_EMPLOYEE_CREATE, PATH_EMPLOYEE_DELETE,
        PATH_EMPLOYEE_UPDATE,
    },
    id::DbId,
    models::Employee,
    req_args::{EmployeeCreateReqArgs, EmployeeReqArgs},
};

use crate::{backend::ResponseReceiver, client::process_json_body, Client};

impl Client {
    #[tracing::instrument]
    pub fn employee(&self, id: DbId) -> ResponseReceiver<Employee> {
        let request = self.request(&PATH_EMPLOYEE, &PATH_EMPLOYEE.with_id(id));
        self.send_request_expect_json(request)
    }

    /// Employees that others can report to (managers and admins)
    #[tracing::instrument]
    pub fn managers(&self) -> ResponseReceiver<Vec<Employee>> {
        let (tx, rx) = oneshot::channel();
        let request = self.request(&PATH_EMPLOYEES, PATH_EMPLOYEES.path);
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_json_body::<Vec<Employee>>(resp).await.map(|employees| {
                employees
                    .into_iter()
                    .filter(|employee| employee.role.is_approver())
                    .collect()
            });
            client.respond(tx, msg);
        };
        self.initiate_request(request, on_done);
        rx
    }

    #[tracing::instrument]
    pub fn create_employee(&self, args: &EmployeeCreateReqArgs) -> ResponseReceiver<Employee> {
        let request = self
            .request(&PATH_EMPLOYEE_CREATE, PATH_EMPLOYEE_CREATE.path)
            .query(&[("password", args.password.expose_secret())])
            .json(&args.employee);
        self.send_request_expect_json(request)
    }

    #[tracing::instrument]
    pub fn update_employee(&self, id: DbId, args: &EmployeeReqArgs) -> ResponseReceiver<Employee> {
        let request = self
            .request(&PATH_EMPLOYEE_UPDATE, &PATH_EMPLOYEE_UPDATE.with_id(id))
            .json(args);
        self.send_request_expect_json(request)
    }

    #[tracing::instrument]
    pub fn delete_employee(&self, id: DbId) -> ResponseReceiver<()> {
        let request = self.request(&PATH_EMPLOYEE_DELETE, &PATH_EMPLOYEE_DELETE.with_id(id));
        self.send_request_expect_empty(request)
    }
}
