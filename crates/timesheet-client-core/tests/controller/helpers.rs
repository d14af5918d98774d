use std::{
    cell::{Cell, RefCell},
    collections::BTreeSet,
};

use anyhow::anyhow;
use futures::channel::oneshot;
use timesheet_client_core::{
    Backend, LoginOutcome, MemoryStore, ResponseReceiver, SessionController, TopLevelView,
};
use timesheet_shared::{
    const_config::storage::STORAGE_KEY_CURRENT_USER,
    id::DbId,
    models::{DashboardStats, Employee, Project, ReportFilterOptions, Timesheet},
    req_args::LoginReqArgs,
    uac::{Identity, Role, Section},
};

pub type TestController = SessionController<FakeBackend, MemoryStore>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login(String),
    ValidateIdentity(DbId),
    Load(Section),
    LoadTimesheet(DbId),
}

#[derive(Debug, Clone)]
pub enum LoginReply {
    Success(Identity),
    Rejected(Option<String>),
    NetworkError,
}

/// Backend that answers immediately from canned data unless told to hold a
/// reply back
#[derive(Debug)]
pub struct FakeBackend {
    calls: RefCell<Vec<Call>>,
    login_reply: RefCell<LoginReply>,
    validation_ok: Cell<bool>,
    hold_validation: Cell<bool>,
    held_validations: RefCell<Vec<oneshot::Sender<anyhow::Result<()>>>>,
    failing_sections: RefCell<BTreeSet<Section>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            calls: Default::default(),
            login_reply: RefCell::new(LoginReply::Rejected(None)),
            validation_ok: Cell::new(true),
            hold_validation: Cell::new(false),
            held_validations: Default::default(),
            failing_sections: Default::default(),
        }
    }
}

impl FakeBackend {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn loads_of(&self, section: Section) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| **call == Call::Load(section))
            .count()
    }

    pub fn section_loads(&self) -> Vec<Section> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Load(section) => Some(*section),
                _ => None,
            })
            .collect()
    }

    pub fn set_login_reply(&self, reply: LoginReply) {
        *self.login_reply.borrow_mut() = reply;
    }

    pub fn set_validation_ok(&self, value: bool) {
        self.validation_ok.set(value);
    }

    pub fn set_hold_validation(&self, value: bool) {
        self.hold_validation.set(value);
    }

    /// Answers every validation that was held back
    pub fn release_validations(&self, ok: bool) {
        for tx in self.held_validations.borrow_mut().drain(..) {
            let reply = if ok {
                Ok(())
            } else {
                Err(anyhow!("request failed with status code: 404 Not Found"))
            };
            // The controller may have dropped the receiver already
            let _ = tx.send(reply);
        }
    }

    pub fn fail_section(&self, section: Section) {
        self.failing_sections.borrow_mut().insert(section);
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn section_reply<T>(&self, section: Section, value: T) -> ResponseReceiver<T> {
        self.record(Call::Load(section));
        if self.failing_sections.borrow().contains(&section) {
            reply(Err(anyhow!("failed to send request")))
        } else {
            reply(Ok(value))
        }
    }
}

fn reply<T>(value: anyhow::Result<T>) -> ResponseReceiver<T> {
    let (tx, rx) = oneshot::channel();
    let _ = tx.send(value);
    rx
}

impl Backend for FakeBackend {
    fn login(&self, args: LoginReqArgs) -> ResponseReceiver<LoginOutcome> {
        self.record(Call::Login(args.email));
        reply(match self.login_reply.borrow().clone() {
            LoginReply::Success(identity) => Ok(LoginOutcome::Success(identity)),
            LoginReply::Rejected(message) => Ok(LoginOutcome::Rejected(message)),
            LoginReply::NetworkError => Err(anyhow!("failed to send request")),
        })
    }

    fn validate_identity(&self, id: DbId) -> ResponseReceiver<()> {
        self.record(Call::ValidateIdentity(id));
        if self.hold_validation.get() {
            let (tx, rx) = oneshot::channel();
            self.held_validations.borrow_mut().push(tx);
            return rx;
        }
        if self.validation_ok.get() {
            reply(Ok(()))
        } else {
            reply(Err(anyhow!("request failed with status code: 404 Not Found")))
        }
    }

    fn load_dashboard(&self, _identity: &Identity) -> ResponseReceiver<DashboardStats> {
        self.section_reply(Section::Dashboard, DashboardStats::default())
    }

    fn load_timesheets(&self, _identity: &Identity) -> ResponseReceiver<Vec<Timesheet>> {
        self.section_reply(Section::Timesheets, vec![])
    }

    fn load_projects(&self, _identity: &Identity) -> ResponseReceiver<Vec<Project>> {
        self.section_reply(Section::Projects, vec![])
    }

    fn load_pending_approvals(&self, _identity: &Identity) -> ResponseReceiver<Vec<Timesheet>> {
        self.section_reply(Section::Approvals, vec![])
    }

    fn load_report_options(&self, _identity: &Identity) -> ResponseReceiver<ReportFilterOptions> {
        self.section_reply(Section::Reports, ReportFilterOptions::default())
    }

    fn load_employees(&self, _identity: &Identity) -> ResponseReceiver<Vec<Employee>> {
        self.section_reply(Section::Employees, vec![])
    }

    fn load_timesheet(&self, id: DbId) -> ResponseReceiver<Timesheet> {
        self.record(Call::LoadTimesheet(id));
        let json = format!(
            r#"{{"id":{id},"employeeId":5,"weekStartDate":"2024-03-04",
                "weekEndDate":"2024-03-10","status":"DRAFT","entries":[]}}"#
        );
        reply(serde_json::from_str(&json).map_err(Into::into))
    }
}

pub fn identity(role: Role) -> Identity {
    Identity::new(
        5.into(),
        "a@b.com".try_into().unwrap(),
        "Ann Bell".to_string(),
        role,
    )
    .unwrap()
}

pub fn persisted_record(role: Role) -> String {
    serde_json::to_string(&identity(role)).unwrap()
}

pub fn store_with(record: &str) -> MemoryStore {
    MemoryStore::new().with_value(STORAGE_KEY_CURRENT_USER, record)
}

pub fn persisted(controller: &TestController) -> Option<String> {
    use timesheet_client_core::SessionStore as _;
    controller.store().get(STORAGE_KEY_CURRENT_USER).unwrap()
}

/// Controller with a confirmed session for `role` and the history of getting
/// there cleared
pub fn logged_in(role: Role) -> TestController {
    let store = store_with(&persisted_record(role));
    let mut controller = TestController::new(FakeBackend::default(), store);
    controller.bootstrap();
    controller.poll();
    assert_eq!(controller.view(), TopLevelView::LoggedIn);
    controller.poll();
    controller.backend().clear_calls();
    let _ = controller.take_notices();
    controller
}

pub fn login_args() -> LoginReqArgs {
    LoginReqArgs::new("a@b.com", "hunter2".to_string().into())
}
