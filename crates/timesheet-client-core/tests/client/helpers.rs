use std::{
    collections::HashMap,
    net::TcpListener,
    sync::{Arc, Mutex},
    time::Duration,
};

use actix_web::{
    http::{header, StatusCode},
    web, App, HttpRequest, HttpResponse, HttpServer,
};
use timesheet_client_core::Client;

pub const API_ROOT: &str = "/timesheet/api";

/// A request as seen by the fake backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRequest {
    pub method: String,
    /// Path relative to the api root, including the query string
    pub target: String,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    /// Holds the reply back for `delay` before sending it
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug)]
struct FakeBackendState {
    /// Keyed on `"METHOD target"`
    routes: HashMap<String, Reply>,
    seen: Mutex<Vec<SeenRequest>>,
}

/// Backend answering every request from canned replies. Unknown routes get a
/// 404 with an empty body.
pub struct FakeServer {
    pub address: String,
    state: Arc<FakeBackendState>,
}

impl FakeServer {
    pub async fn spawn(routes: &[(&str, Reply)]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind random port");
        let port = listener
            .local_addr()
            .expect("failed to get local address of listener")
            .port();
        let state = Arc::new(FakeBackendState {
            routes: routes
                .iter()
                .map(|(key, reply)| (key.to_string(), reply.clone()))
                .collect(),
            seen: Default::default(),
        });
        let app_state = web::Data::from(Arc::clone(&state));
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .default_service(web::route().to(canned_reply))
        })
        .workers(1)
        .listen(listener)
        .expect("failed to bind fake backend to listener")
        .run();
        tokio::spawn(server);
        Self {
            address: format!("http://127.0.0.1:{port}{API_ROOT}"),
            state,
        }
    }

    pub fn client(&self) -> Client {
        Client::new(self.address.clone(), Some(Duration::from_secs(5)), None).unwrap()
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.state.seen.lock().unwrap().clone()
    }

    pub fn seen_targets(&self) -> Vec<String> {
        let mut result: Vec<String> = self
            .seen()
            .into_iter()
            .map(|request| format!("{} {}", request.method, request.target))
            .collect();
        result.sort();
        result
    }
}

async fn canned_reply(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<FakeBackendState>,
) -> HttpResponse {
    let method = req.method().to_string();
    let target = req
        .uri()
        .path_and_query()
        .map(|path_and_query| path_and_query.as_str())
        .unwrap_or_default()
        .trim_start_matches(API_ROOT)
        .to_string();
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let key = format!("{method} {target}");
    state.seen.lock().unwrap().push(SeenRequest {
        method,
        target,
        content_type,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let Some(reply) = state.routes.get(&key) else {
        return HttpResponse::NotFound().finish();
    };
    if let Some(delay) = reply.delay {
        actix_web::rt::time::sleep(delay).await;
    }
    let status = StatusCode::from_u16(reply.status).expect("invalid canned status code");
    HttpResponse::build(status)
        .content_type(header::ContentType::json())
        .body(reply.body.clone())
}

pub const TIMESHEET_JSON: &str = r#"{"id":11,"employeeId":5,"weekStartDate":"2024-03-04","weekEndDate":"2024-03-10","status":"DRAFT","entries":[]}"#;
