use timesheet_shared::{
    const_config::notice::{NOTICE_FORBIDDEN, NOTICE_MUST_LOGIN},
    uac::Section,
};
use tracing::{error, info, warn};

use super::{Notice, SessionController, TopLevelView};
use crate::{Backend, SessionStore};

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Activated(Section),
    /// The request was refused and [`Section::DEFAULT`] was activated instead
    Redirected {
        reason: RedirectReason,
        to: Section,
    },
    /// Nobody is logged in, the login view is shown
    LoginRequired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectReason {
    Forbidden(Section),
    UnknownSection(String),
}

impl NavigationOutcome {
    /// The section that ended up active, if any
    pub fn active_section(&self) -> Option<Section> {
        match self {
            NavigationOutcome::Activated(section) => Some(*section),
            NavigationOutcome::Redirected { to, .. } => Some(*to),
            NavigationOutcome::LoginRequired => None,
        }
    }
}

impl<B: Backend, S: SessionStore> SessionController<B, S> {
    #[tracing::instrument(skip(self))]
    pub fn request_navigation(&mut self, target: Section) -> NavigationOutcome {
        let Some(identity) = self.session.as_ref() else {
            warn!("attempted to navigate to {target} without authentication");
            self.push_notice(Notice::warning(NOTICE_MUST_LOGIN));
            self.show_logged_out();
            return NavigationOutcome::LoginRequired;
        };

        let role = identity.role();
        if !target.permits(role) {
            warn!(
                user_id = %identity.id(),
                ?role,
                section = %target,
                "access to section denied"
            );
            self.push_notice(Notice::warning(NOTICE_FORBIDDEN));
            return self.redirect_to_default(RedirectReason::Forbidden(target));
        }

        self.activate(target);
        NavigationOutcome::Activated(target)
    }

    /// For callers that only have the name of the section (for example from a
    /// link or the command line)
    #[tracing::instrument(skip(self))]
    pub fn request_navigation_by_name(&mut self, name: &str) -> NavigationOutcome {
        match name.parse::<Section>() {
            Ok(section) => self.request_navigation(section),
            Err(e) => {
                error!(?e, "navigation requested to a section that does not exist");
                if self.session.is_none() {
                    return self.request_navigation(Section::DEFAULT);
                }
                self.redirect_to_default(RedirectReason::UnknownSection(name.to_string()))
            }
        }
    }

    fn redirect_to_default(&mut self, reason: RedirectReason) -> NavigationOutcome {
        match self.request_navigation(Section::DEFAULT) {
            NavigationOutcome::Activated(to) => NavigationOutcome::Redirected { reason, to },
            other => other,
        }
    }

    /// Switches the visible section first and only then starts loading its
    /// data
    fn activate(&mut self, target: Section) {
        debug_assert_eq!(self.view, TopLevelView::LoggedIn);
        let Some(identity) = self.session.as_ref() else {
            return;
        };
        info!(section = %target, "activating section");
        self.active_section = Some(target);
        self.sections.start_load(target, &self.backend, identity);
    }
}
