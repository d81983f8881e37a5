//! In-memory stand-in for the REST backend, used by tests.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

use crate::error::{DirectoryError, Result};
use crate::transport::{ApiRequest, ApiResponse, Transport};
use crate::types::{FieldErrors, User, UserRequest};
use crate::validation::is_valid_email;

enum Scripted {
    Respond(ApiResponse),
    Disconnect,
}

#[derive(Default)]
struct State {
    users: BTreeMap<u64, User>,
    next_id: u64,
    script: VecDeque<Scripted>,
    log: Vec<(Method, Option<u64>)>,
}

/// Serves the collection from memory with the status codes of the real
/// backend: 200/201/204 on success, 400 with a `fields` map on invalid
/// bodies, 404 for unknown ids.
///
/// Scripted responses queued with [`FakeBackend::respond_with`] or
/// [`FakeBackend::disconnect`] are served first, one per request.
pub struct FakeBackend {
    state: Mutex<State>,
}

impl FakeBackend {
    pub fn empty() -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 1,
                ..State::default()
            }),
        }
    }

    /// Alice (1) and Bob (2), next id 3.
    pub fn seeded() -> Self {
        let backend = Self::empty();
        {
            let mut state = backend.state.lock().unwrap();
            for name in ["Alice", "Bob"] {
                let id = state.next_id;
                state.next_id += 1;
                state.users.insert(
                    id,
                    User {
                        id,
                        name: name.to_string(),
                        email: format!("{}@example.com", name.to_lowercase()),
                    },
                );
            }
        }
        backend
    }

    pub fn respond_with(&self, status: u16, body: &str) {
        self.state
            .lock()
            .unwrap()
            .script
            .push_back(Scripted::Respond(ApiResponse::new(status, body)));
    }

    pub fn disconnect(&self) {
        self.state
            .lock()
            .unwrap()
            .script
            .push_back(Scripted::Disconnect);
    }

    /// Number of requests that reached the backend.
    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().log.len()
    }

    pub fn requests(&self) -> Vec<(Method, Option<u64>)> {
        self.state.lock().unwrap().log.clone()
    }
}

#[async_trait]
impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut state = self.state.lock().unwrap();

        match state.script.pop_front() {
            Some(Scripted::Disconnect) => return Err(network_error()),
            Some(Scripted::Respond(response)) => {
                state.log.push((request.method, request.id));
                return Ok(response);
            }
            None => {}
        }

        state.log.push((request.method.clone(), request.id));
        Ok(state.handle(request))
    }
}

impl State {
    fn handle(&mut self, request: ApiRequest) -> ApiResponse {
        match (request.method, request.id) {
            (Method::GET, None) => {
                let users: Vec<&User> = self.users.values().collect();
                ApiResponse::new(200, json!(users).to_string())
            }
            (Method::GET, Some(id)) => match self.users.get(&id) {
                Some(user) => ApiResponse::new(200, json!(user).to_string()),
                None => not_found(),
            },
            (Method::POST, None) => {
                let body = match parse_body(request.body) {
                    Ok(body) => body,
                    Err(response) => return response,
                };
                let id = self.next_id;
                self.next_id += 1;
                let user = User {
                    id,
                    name: body.name,
                    email: body.email,
                };
                self.users.insert(id, user.clone());
                ApiResponse::new(201, json!(user).to_string())
            }
            (Method::PUT, Some(id)) => {
                let body = match parse_body(request.body) {
                    Ok(body) => body,
                    Err(response) => return response,
                };
                match self.users.get_mut(&id) {
                    Some(user) => {
                        user.name = body.name;
                        user.email = body.email;
                        ApiResponse::new(200, json!(user).to_string())
                    }
                    None => not_found(),
                }
            }
            (Method::DELETE, Some(id)) => match self.users.remove(&id) {
                Some(_) => ApiResponse::new(204, ""),
                None => not_found(),
            },
            _ => ApiResponse::new(405, ""),
        }
    }
}

fn parse_body(body: Option<serde_json::Value>) -> std::result::Result<UserRequest, ApiResponse> {
    let body: UserRequest = body
        .and_then(|value| serde_json::from_value(value).ok())
        .ok_or_else(|| ApiResponse::new(400, r#"{"error":"Malformed body"}"#))?;

    let mut fields = FieldErrors::new();
    if body.name.trim().is_empty() {
        fields.insert("name", "Name is required");
    }
    if !is_valid_email(&body.email) {
        fields.insert("email", "Please enter a valid email address");
    }

    if fields.is_empty() {
        Ok(body)
    } else {
        Err(ApiResponse::new(
            400,
            json!({ "error": "Validation failed", "fields": fields }).to_string(),
        ))
    }
}

fn not_found() -> ApiResponse {
    ApiResponse::new(404, r#"{"detail":"User not found"}"#)
}

/// A genuine transport error, produced without touching the network.
fn network_error() -> DirectoryError {
    let err = reqwest::Client::new()
        .get("not a url")
        .build()
        .expect_err("an unparsable URL must fail to build");
    DirectoryError::Http(err)
}
