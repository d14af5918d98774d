use timesheet_shared::{
    const_config::path::{
        PathSpec, PATH_REPORT_EMPLOYEE, PATH_REPORT_EMPLOYEE_EXPORT, PATH_REPORT_PROJECT,
        PATH_REPORT_PROJECT_EXPORT,
    },
    models::{Report, ReportKind},
    req_args::ReportReqArgs,
};

use crate::{backend::ResponseReceiver, Client};

impl Client {
    #[tracing::instrument]
    pub fn report(&self, args: &ReportReqArgs) -> ResponseReceiver<Report> {
        let path_spec = report_path(args.kind, false);
        let request = self
            .request(&path_spec, &path_spec.with_id(args.subject_id))
            .query(&args.range());
        self.send_request_expect_json(request)
    }

    /// The export is returned as is (CSV text produced by the backend)
    #[tracing::instrument]
    pub fn report_export(&self, args: &ReportReqArgs) -> ResponseReceiver<String> {
        let path_spec = report_path(args.kind, true);
        let request = self
            .request(&path_spec, &path_spec.with_id(args.subject_id))
            .query(&args.range());
        self.send_request_expect_text(request)
    }
}

fn report_path(kind: ReportKind, export: bool) -> PathSpec {
    match (kind, export) {
        (ReportKind::Employee, false) => PATH_REPORT_EMPLOYEE,
        (ReportKind::Employee, true) => PATH_REPORT_EMPLOYEE_EXPORT,
        (ReportKind::Project, false) => PATH_REPORT_PROJECT,
        (ReportKind::Project, true) => PATH_REPORT_PROJECT_EXPORT,
    }
}
