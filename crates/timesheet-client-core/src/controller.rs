//! Owns the session and decides which section the user is allowed to see
//!
//! The controller never blocks. Operations that need the backend start a
//! request and return, [`SessionController::poll`] must then be called
//! (usually after the wake function fires) to apply the results.

use std::collections::VecDeque;

use futures::channel::oneshot;
use timesheet_shared::{
    const_config::{
        notice::{
            NOTICE_LOGIN_NETWORK_FAILURE, NOTICE_LOGIN_REJECTED_FALLBACK, NOTICE_LOGIN_SUCCESS,
            NOTICE_LOGOUT,
        },
        storage::STORAGE_KEY_CURRENT_USER,
    },
    errors::NotLoggedInError,
    id::DbId,
    log_err_as_warn,
    req_args::LoginReqArgs,
    uac::{Identity, IdentityRecord, Section, Visibility},
};
use tracing::{error, info, warn};

use crate::{Backend, DataState, LoginOutcome, ResponseReceiver, SessionStore};

mod navigation;
mod notice;
mod sections;

pub use navigation::{NavigationOutcome, RedirectReason};
pub use notice::{Notice, NoticeLevel};
pub use sections::{OpenTimesheet, SectionStates};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TopLevelView {
    #[default]
    LoggedOut,
    LoggedIn,
}

/// A restored identity waiting for the backend to confirm it
#[derive(Debug)]
struct PendingValidation {
    identity: Identity,
    rx: ResponseReceiver<()>,
}

#[derive(Debug)]
pub struct SessionController<B, S> {
    backend: B,
    store: S,
    session: Option<Identity>,
    view: TopLevelView,
    visibility: Visibility,
    active_section: Option<Section>,
    sections: SectionStates,
    open_timesheet: Option<OpenTimesheet>,
    pending_validation: Option<PendingValidation>,
    pending_login: Option<ResponseReceiver<LoginOutcome>>,
    notices: VecDeque<Notice>,
}

impl<B: Backend, S: SessionStore> SessionController<B, S> {
    /// Starts logged out. Call [`Self::bootstrap`] to restore a persisted
    /// session.
    pub fn new(backend: B, store: S) -> Self {
        Self {
            backend,
            store,
            session: None,
            view: TopLevelView::LoggedOut,
            visibility: Visibility::hidden(),
            active_section: None,
            sections: SectionStates::default(),
            open_timesheet: None,
            pending_validation: None,
            pending_login: None,
            notices: VecDeque::new(),
        }
    }

    /// Shows the login view then, if a well formed identity was persisted,
    /// asks the backend to confirm it. The session is only committed once the
    /// confirmation arrives (see [`Self::poll`]).
    #[tracing::instrument(skip(self))]
    pub fn bootstrap(&mut self) {
        self.show_logged_out();
        self.pending_validation = None;

        let raw = match self.store.get(STORAGE_KEY_CURRENT_USER) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("no persisted session found");
                return;
            }
            Err(err) => {
                warn!(?err, "unable to read persisted session");
                return;
            }
        };

        let record = match serde_json::from_str::<IdentityRecord>(&raw) {
            Ok(record) => record,
            Err(err) => {
                warn!(?err, "persisted session is malformed, discarding it");
                self.discard_persisted();
                return;
            }
        };

        let identity = match Identity::try_from(record) {
            Ok(identity) => identity,
            Err(err) => {
                warn!(?err, "persisted session is incomplete, discarding it");
                self.discard_persisted();
                return;
            }
        };

        info!(user_id = %identity.id(), "validating persisted session");
        let rx = self.backend.validate_identity(identity.id());
        self.pending_validation = Some(PendingValidation { identity, rx });
    }

    /// Sends the credentials. The outcome is applied by [`Self::poll`] and
    /// reported through the notices.
    #[tracing::instrument(skip(self))]
    pub fn login(&mut self, args: LoginReqArgs) {
        // Whatever the user does now supersedes a restore still in progress
        self.pending_validation = None;
        self.pending_login = Some(self.backend.login(args));
    }

    #[tracing::instrument(skip(self))]
    pub fn logout(&mut self) {
        self.pending_validation = None;
        self.pending_login = None;
        self.discard_persisted();
        self.show_logged_out();
        self.push_notice(Notice::success(NOTICE_LOGOUT));
        info!("logged out");
    }

    /// Applies every response that has arrived since the last call
    pub fn poll(&mut self) {
        self.poll_validation();
        self.poll_login();
        self.poll_sections();
        self.poll_open_timesheet();
    }

    /// True while any request started by the controller is outstanding
    pub fn is_busy(&self) -> bool {
        self.pending_validation.is_some()
            || self.pending_login.is_some()
            || self.sections.is_any_loading()
            || self
                .open_timesheet
                .as_ref()
                .is_some_and(|open| open.state.is_awaiting())
    }

    /// Loads a single timesheet for viewing or editing, replacing the one
    /// open before
    #[tracing::instrument(skip(self))]
    pub fn open_timesheet(&mut self, id: DbId) -> Result<(), NotLoggedInError> {
        if self.session.is_none() {
            return Err(NotLoggedInError);
        }
        let mut state = DataState::default();
        state.start(|| self.backend.load_timesheet(id).into());
        self.open_timesheet = Some(OpenTimesheet { id, state });
        Ok(())
    }

    pub fn close_timesheet(&mut self) {
        self.open_timesheet = None;
    }

    pub fn open_timesheet_state(&self) -> Option<&OpenTimesheet> {
        self.open_timesheet.as_ref()
    }

    pub fn session(&self) -> Option<&Identity> {
        self.session.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn view(&self) -> TopLevelView {
        self.view
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn active_section(&self) -> Option<Section> {
        self.active_section
    }

    pub fn sections(&self) -> &SectionStates {
        &self.sections
    }

    pub fn welcome_message(&self) -> Option<String> {
        self.session
            .as_ref()
            .map(|identity| format!("Welcome, {}", identity.display_name()))
    }

    /// Notices in the order they were raised. They are removed from the
    /// controller.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn poll_validation(&mut self) {
        let Some(pending) = self.pending_validation.as_mut() else {
            return;
        };
        let outcome = match pending.rx.try_recv() {
            Ok(None) => return,
            Ok(Some(outcome)) => outcome,
            Err(oneshot::Canceled) => Err(anyhow::anyhow!("validation request was dropped")),
        };
        let Some(PendingValidation { identity, .. }) = self.pending_validation.take() else {
            return;
        };
        match outcome {
            Ok(()) => {
                info!(user_id = %identity.id(), "persisted session is valid");
                self.commit_session(identity);
            }
            Err(err) => {
                warn!(?err, user_id = %identity.id(), "persisted session rejected");
                self.discard_persisted();
                self.show_logged_out();
            }
        }
    }

    fn poll_login(&mut self) {
        let Some(rx) = self.pending_login.as_mut() else {
            return;
        };
        let outcome = match rx.try_recv() {
            Ok(None) => return,
            Ok(Some(outcome)) => outcome,
            Err(oneshot::Canceled) => Err(anyhow::anyhow!("login request was dropped")),
        };
        self.pending_login = None;
        match outcome {
            Ok(LoginOutcome::Success(identity)) => {
                info!(user_id = %identity.id(), role = ?identity.role(), "login succeeded");
                self.persist(&identity);
                self.commit_session(identity);
                self.push_notice(Notice::success(NOTICE_LOGIN_SUCCESS));
            }
            Ok(LoginOutcome::Rejected(message)) => {
                info!(?message, "login rejected");
                let message = message.unwrap_or_else(|| NOTICE_LOGIN_REJECTED_FALLBACK.to_string());
                self.push_notice(Notice::error(message));
            }
            Err(err) => {
                error!(?err, "login request failed");
                self.push_notice(Notice::error(NOTICE_LOGIN_NETWORK_FAILURE));
            }
        }
    }

    fn poll_sections(&mut self) {
        for section in self.sections.poll() {
            self.push_notice(Notice::error(format!(
                "Failed to load {}",
                section.data_description()
            )));
        }
    }

    fn poll_open_timesheet(&mut self) {
        let Some(open) = self.open_timesheet.as_mut() else {
            return;
        };
        if let Some(Err(_)) = open.state.poll() {
            self.push_notice(Notice::error("Failed to load timesheet"));
        }
    }

    /// The only place a session is started. Data cached for a previous
    /// session is dropped along with its pending loads.
    fn commit_session(&mut self, identity: Identity) {
        self.sections = SectionStates::default();
        self.open_timesheet = None;
        self.active_section = None;
        self.visibility = Visibility::project(identity.role());
        self.session = Some(identity);
        self.view = TopLevelView::LoggedIn;
        let _ = self.request_navigation(Section::DEFAULT);
    }

    /// The only place a session is ended. Requests still in flight for the
    /// ended session are dropped so their results are never applied.
    fn show_logged_out(&mut self) {
        self.session = None;
        self.view = TopLevelView::LoggedOut;
        self.visibility = Visibility::hidden();
        self.active_section = None;
        self.sections = SectionStates::default();
        self.open_timesheet = None;
    }

    fn persist(&mut self, identity: &Identity) {
        match serde_json::to_string(identity) {
            Ok(value) => log_err_as_warn!(
                self.store.set(STORAGE_KEY_CURRENT_USER, value),
                "unable to persist session"
            ),
            Err(err) => error!(?err, "unable to serialize identity for persisting"),
        }
    }

    fn discard_persisted(&mut self) {
        log_err_as_warn!(
            self.store.remove(STORAGE_KEY_CURRENT_USER),
            "unable to remove persisted session"
        );
    }

    fn push_notice(&mut self, notice: Notice) {
        info!(%notice, "notice raised");
        self.notices.push_back(notice);
    }
}
