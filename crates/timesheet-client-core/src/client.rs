use anyhow::{anyhow, Context};
use closure_traits::{ChannelCallBack, ChannelCallBackOutput};
use futures::channel::oneshot;
use reqwest::StatusCode;
use secrecy::ExposeSecret as _;
use std::fmt::Debug;
use std::sync::Arc;
use timesheet_shared::{
    const_config::{
        client::CLIENT_RECENT_ACTIVITY_LIMIT,
        path::{
            PathSpec, PATH_ACTIVITIES_MANAGER, PATH_ACTIVITIES_RECENT, PATH_AUTH_LOGIN,
            PATH_EMPLOYEE, PATH_PROJECTS_ACTIVE, PATH_TIMESHEETS_FOR_EMPLOYEE,
            PATH_TIMESHEETS_PENDING_APPROVAL,
        },
    },
    id::DbId,
    models::{Activity, DashboardStats, PendingCount, Project, Timesheet, TimesheetStatus},
    req_args::LoginReqArgs,
    uac::{Identity, Role},
};
use tracing::{debug, info, warn};

use crate::backend::ResponseReceiver;

pub mod api;

/// Called after each response has been delivered so the front end can react
/// without busy polling
pub type WakeFn = Arc<dyn Fn() + Send + Sync + 'static>;

#[derive(Clone)]
pub struct Client {
    api_client: reqwest::Client,
    inner: Arc<ClientInner>,
}

struct ClientInner {
    /// Root all endpoint paths are appended to (no trailing slash)
    server_address: String,
    wake_fn: Option<WakeFn>,
}

#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Success(Identity),
    /// The backend refused the credentials, with its explanation if it gave
    /// one
    Rejected(Option<String>),
}

impl LoginOutcome {
    /// Returns `true` if the login outcome is [`Success`]
    ///
    /// [`Success`]: LoginOutcome::Success
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(..))
    }
}

impl Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("server_address", &self.inner.server_address)
            .field("has_wake_fn", &self.inner.wake_fn.is_some())
            .finish()
    }
}

impl Client {
    #[tracing::instrument(name = "NEW CLIENT-CORE", skip(wake_fn))]
    pub fn new(
        server_address: String,
        request_timeout: Option<std::time::Duration>,
        wake_fn: Option<WakeFn>,
    ) -> anyhow::Result<Self> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = {
            let builder = builder.cookie_store(true);
            match request_timeout {
                Some(timeout) => builder.timeout(timeout),
                None => builder,
            }
        };
        #[cfg(target_arch = "wasm32")]
        let _ = request_timeout; // The browser handles cookies and timeouts
        let api_client = builder.build().context("unable to create reqwest client")?;
        Ok(Self {
            api_client,
            inner: Arc::new(ClientInner {
                server_address: server_address.trim_end_matches('/').to_string(),
                wake_fn,
            }),
        })
    }

    pub fn server_address(&self) -> &str {
        &self.inner.server_address
    }

    #[tracing::instrument]
    pub fn login(&self, args: LoginReqArgs) -> ResponseReceiver<LoginOutcome> {
        let (tx, rx) = oneshot::channel();
        let form = [
            ("email", args.email.as_str()),
            ("password", args.password.expose_secret()),
        ];
        let request = self.request(&PATH_AUTH_LOGIN, PATH_AUTH_LOGIN.path).form(&form);
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_login(resp).await;
            client.respond(tx, msg);
        };
        self.initiate_request(request, on_done);
        rx
    }

    /// Used to confirm that a restored session still refers to a user the
    /// backend knows about
    #[tracing::instrument]
    pub fn check_employee_exists(&self, id: DbId) -> ResponseReceiver<()> {
        let request = self.request(&PATH_EMPLOYEE, &PATH_EMPLOYEE.with_id(id));
        self.send_request_expect_empty(request)
    }

    /// Loads each figure independently, a failed figure is left empty instead
    /// of failing the whole dashboard. The figures after the first are
    /// fetched concurrently.
    #[tracing::instrument]
    pub fn dashboard_stats(&self, id: DbId, role: Role) -> ResponseReceiver<DashboardStats> {
        let (tx, rx) = oneshot::channel();
        let request = self.request(&PATH_PROJECTS_ACTIVE, PATH_PROJECTS_ACTIVE.path);
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let active_projects = process_json_body::<Vec<Project>>(resp)
                .await
                .map(|projects| projects.len());
            let (pending, recent_activity) = futures::join!(
                client.fetch_pending_count(id, role),
                client.fetch_recent_activity(id, role)
            );
            let stats = DashboardStats {
                pending: ok_or_log(pending, "pending count"),
                active_projects: ok_or_log(active_projects, "active projects"),
                recent_activity: ok_or_log(recent_activity, "recent activity"),
            };
            client.respond(tx, Ok(stats));
        };
        self.initiate_request(request, on_done);
        rx
    }

    async fn fetch_pending_count(&self, id: DbId, role: Role) -> anyhow::Result<PendingCount> {
        if role.is_approver() {
            let request = self
                .request(
                    &PATH_TIMESHEETS_PENDING_APPROVAL,
                    PATH_TIMESHEETS_PENDING_APPROVAL.path,
                )
                .query(&[("managerId", id)]);
            let pending: Vec<Timesheet> = process_json_body(request.send().await).await?;
            Ok(PendingCount::Approvals(pending.len()))
        } else {
            let request = self.request(
                &PATH_TIMESHEETS_FOR_EMPLOYEE,
                &PATH_TIMESHEETS_FOR_EMPLOYEE.with_id(id),
            );
            let timesheets: Vec<Timesheet> = process_json_body(request.send().await).await?;
            Ok(PendingCount::Submissions(
                timesheets
                    .iter()
                    .filter(|timesheet| timesheet.status == TimesheetStatus::Draft)
                    .count(),
            ))
        }
    }

    async fn fetch_recent_activity(&self, id: DbId, role: Role) -> anyhow::Result<Vec<Activity>> {
        let path_spec = if role.is_approver() {
            PATH_ACTIVITIES_MANAGER
        } else {
            PATH_ACTIVITIES_RECENT
        };
        let request = self
            .request(&path_spec, &path_spec.with_id(id))
            .query(&[("limit", CLIENT_RECENT_ACTIVITY_LIMIT)]);
        process_json_body(request.send().await).await
    }

    fn request(&self, path_spec: &PathSpec, path: &str) -> reqwest::RequestBuilder {
        self.api_client
            .request(path_spec.method.clone(), self.path_to_url(path))
    }

    // WARNING: Do not log the request as it may contain sensitive info and
    // "safe" versions would usually already be logged by the caller
    fn initiate_request<F, O>(&self, request: reqwest::RequestBuilder, on_done: F)
    where
        F: ChannelCallBack<O>,
        O: ChannelCallBackOutput,
    {
        reqwest_cross::fetch(request, on_done)
    }

    fn send_request_expect_json<U>(&self, request: reqwest::RequestBuilder) -> ResponseReceiver<U>
    where
        U: Send + std::fmt::Debug + serde::de::DeserializeOwned + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_json_body(resp).await;
            client.respond(tx, msg);
        };
        self.initiate_request(request, on_done);
        rx
    }

    fn send_request_expect_empty(&self, request: reqwest::RequestBuilder) -> ResponseReceiver<()> {
        let (tx, rx) = oneshot::channel();
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_empty(resp).await;
            client.respond(tx, msg);
        };
        self.initiate_request(request, on_done);
        rx
    }

    fn send_request_expect_text(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ResponseReceiver<String> {
        let (tx, rx) = oneshot::channel();
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_text_body(resp).await;
            client.respond(tx, msg);
        };
        self.initiate_request(request, on_done);
        rx
    }

    /// Delivers the result and wakes the front end. The receiver being gone is
    /// expected, it means the result is no longer wanted (for example the
    /// user logged out while it was in flight).
    fn respond<T>(&self, tx: oneshot::Sender<anyhow::Result<T>>, msg: anyhow::Result<T>) {
        if tx.send(msg).is_err() {
            debug!("receiver dropped before the response was delivered");
        }
        if let Some(wake_fn) = self.inner.wake_fn.as_ref() {
            wake_fn();
        }
    }

    #[tracing::instrument(ret, level = "debug")]
    fn path_to_url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.server_address)
    }
}

fn ok_or_log<T>(result: anyhow::Result<T>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(?err, "failed to load {what}");
            None
        }
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_empty(response: reqwest::Result<reqwest::Response>) -> anyhow::Result<()> {
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        Ok(())
    } else {
        Err(handle_error(response).await)
    }
}

#[tracing::instrument(ret, err(Debug), level = "debug")]
async fn process_json_body<T>(response: reqwest::Result<reqwest::Response>) -> anyhow::Result<T>
where
    T: Debug + serde::de::DeserializeOwned,
{
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        Ok(response
            .json()
            .await
            .context("failed to parse result as json")?)
    } else {
        Err(handle_error(response).await)
    }
}

#[tracing::instrument(err(Debug))]
async fn process_text_body(response: reqwest::Result<reqwest::Response>) -> anyhow::Result<String> {
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        response.text().await.context("failed to read response body")
    } else {
        Err(handle_error(response).await)
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_login(
    response: reqwest::Result<reqwest::Response>,
) -> anyhow::Result<LoginOutcome> {
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        let identity: Identity = response
            .json()
            .await
            .context("failed to parse login response as a user")?;
        Ok(LoginOutcome::Success(identity))
    } else {
        info!(?status, "login rejected");
        let body = response.text().await.unwrap_or_default();
        Ok(LoginOutcome::Rejected(error_message_from_body(&body)))
    }
}

#[tracing::instrument(ret)]
async fn handle_error(response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    debug_assert!(
        !status.is_success(),
        "this is supposed to be an error, right? Status code is: {status}"
    );
    let Ok(body) = response.text().await else {
        return anyhow!("failed to get response body");
    };
    if body.is_empty() {
        anyhow!("request failed with status code: {status} and no body")
    } else if status == StatusCode::NOT_FOUND {
        anyhow!("not found: {}", error_message_from_body(&body).unwrap_or(body))
    } else {
        anyhow!("{}", error_message_from_body(&body).unwrap_or(body))
    }
}

/// The backend reports errors as `{"message": "..."}`. Returns the message if
/// the body has that shape and the message is not blank.
fn error_message_from_body(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|error| error.message)
        .filter(|message| !message.trim().is_empty())
}

/// Provides a way to standardize the error message
#[tracing::instrument(ret, err(Debug), level = "debug")]
fn extract_response(
    response: reqwest::Result<reqwest::Response>,
) -> anyhow::Result<(reqwest::Response, StatusCode)> {
    if response.is_err() {
        info!("Response is err: {:#?}", response);
    }
    let response = response.context("failed to send request")?;
    let status = response.status();
    Ok((response, status))
}

#[cfg(not(target_arch = "wasm32"))]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> + Send {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> + Send {}
}

#[cfg(target_arch = "wasm32")]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> {}
}
