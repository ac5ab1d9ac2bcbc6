//! Request builder and response handler for the employee API.
//!
//! # Design
//! `EmployeeClient` is configured once at construction: base URL, credential
//! inclusion, the shared `Session` and the `Notifier`. Every request it builds
//! carries the same defaults. Each domain operation is split into a `build_*`
//! method producing an `HttpRequest` and a `parse_*` method consuming the
//! `HttpResponse`; the round-trip in between belongs to a `Transport` or the
//! caller.
//!
//! Parsing always goes through `handle_response`, which classifies the status
//! and applies the side effects: 401 clears the session, 404 raises a notice,
//! any other failure emits a diagnostic. With `debug` set in the config,
//! diagnostics are shown as notices instead.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ApiError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, APPLICATION_JSON, CONTENT_TYPE, FORM_URLENCODED};
use crate::notify::Notifier;
use crate::session::Session;
use crate::status::ResponseStatus;
use crate::types::{Employee, EmployeeDetail, LoginRequest};

pub const SERVICE_UNAVAILABLE_NOTICE: &str = "The service is not available. Please try again later.";

pub const LOGIN_PATH: &str = "/auth/login";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const EMPLOYEE_LIST_PATH: &str = "/employee/list";
pub const EMPLOYEE_GET_PATH: &str = "/employee/get";
pub const EMPLOYEE_SET_PATH: &str = "/employee/set";

#[derive(Clone)]
pub struct EmployeeClient {
    base_url: String,
    include_credentials: bool,
    debug: bool,
    session: Session,
    notifier: Arc<dyn Notifier>,
}

impl EmployeeClient {
    pub fn new(config: &ClientConfig, session: Session, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            include_credentials: config.include_credentials,
            debug: config.debug,
            session,
            notifier,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Resolve `path` against the base URL and attach the request defaults.
    pub fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
        content_type: Option<&str>,
    ) -> HttpRequest {
        let url = if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        };
        let headers = content_type
            .map(|ct| vec![(CONTENT_TYPE.to_string(), ct.to_string())])
            .unwrap_or_default();
        HttpRequest {
            method,
            url,
            headers,
            body,
            with_credentials: self.include_credentials,
        }
    }

    pub fn get(&self, path: &str) -> HttpRequest {
        self.request(HttpMethod::Get, path, None, None)
    }

    /// POST with an optional form-encoded body.
    pub fn post(&self, path: &str, form: Option<&[(&str, &str)]>) -> HttpRequest {
        match form {
            Some(pairs) => {
                let body = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(pairs.iter().copied())
                    .finish();
                self.request(HttpMethod::Post, path, Some(body), Some(FORM_URLENCODED))
            }
            None => self.request(HttpMethod::Post, path, None, None),
        }
    }

    /// POST with `body` serialized as JSON.
    pub fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(HttpMethod::Post, path, Some(body), Some(APPLICATION_JSON)))
    }

    pub fn build_login(&self, credentials: &LoginRequest) -> HttpRequest {
        self.post(
            LOGIN_PATH,
            Some(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ]),
        )
    }

    pub fn build_logout(&self) -> HttpRequest {
        self.post(LOGOUT_PATH, None)
    }

    pub fn build_employee_list(&self) -> HttpRequest {
        self.get(EMPLOYEE_LIST_PATH)
    }

    pub fn build_employee_details(&self, employee_id: i64) -> HttpRequest {
        self.get(&format!("{EMPLOYEE_GET_PATH}/{employee_id}"))
    }

    /// Accepts any serializable record so callers may send partial edits.
    pub fn build_update_employee<T: Serialize + ?Sized>(&self, record: &T) -> Result<HttpRequest, ApiError> {
        self.post_json(EMPLOYEE_SET_PATH, record)
    }

    pub fn parse_login(&self, response: &HttpResponse) -> Result<(), ApiError> {
        self.handle_response(response)?;
        self.session.mark_logged_in();
        Ok(())
    }

    pub fn parse_logout(&self, response: &HttpResponse) -> Result<(), ApiError> {
        self.handle_response(response)
    }

    pub fn parse_employee_list(&self, response: &HttpResponse) -> Result<Vec<Employee>, ApiError> {
        self.handle_response(response)?;
        decode(response)
    }

    pub fn parse_employee_details(&self, response: &HttpResponse) -> Result<EmployeeDetail, ApiError> {
        self.handle_response(response)?;
        decode(response)
    }

    pub fn parse_update_employee(&self, response: &HttpResponse) -> Result<(), ApiError> {
        self.handle_response(response)
    }

    /// Classify the response status and apply its side effect.
    pub fn handle_response(&self, response: &HttpResponse) -> Result<(), ApiError> {
        match ResponseStatus::classify(response.status) {
            ResponseStatus::Success => Ok(()),
            ResponseStatus::Unauthorized => {
                self.session.mark_logged_out();
                Err(ApiError::Unauthorized)
            }
            ResponseStatus::NotFound => {
                self.notifier.notice(SERVICE_UNAVAILABLE_NOTICE);
                Err(ApiError::NotFound)
            }
            ResponseStatus::OtherError => {
                self.report(&describe_failure(response));
                Err(ApiError::Http {
                    status: response.status,
                    status_text: response.status_text().to_string(),
                    body: response.body.clone(),
                })
            }
        }
    }

    /// Report a request that produced no response at all.
    pub fn transport_failed(&self, err: TransportError) -> ApiError {
        let message = err.to_string();
        self.report(&format!("Request failed: {message}"));
        ApiError::Transport(message)
    }

    fn report(&self, message: &str) {
        if self.debug {
            self.notifier.notice(message);
        } else {
            self.notifier.diagnostic(message);
        }
    }
}

impl fmt::Debug for EmployeeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmployeeClient")
            .field("base_url", &self.base_url)
            .field("include_credentials", &self.include_credentials)
            .field("debug", &self.debug)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// "Internal Server Error (500): body", the body part only when present.
fn describe_failure(response: &HttpResponse) -> String {
    let status_text = match response.status_text() {
        "" => "Error",
        text => text,
    };
    let mut message = format!("{status_text} ({})", response.status);
    let body = response.body.trim();
    if !body.is_empty() {
        message.push_str(": ");
        message.push_str(body);
    }
    message
}
