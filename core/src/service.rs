//! Async execution of client requests.
//!
//! # Design
//! `Transport` is the only place network I/O happens. `EmployeeService`
//! pairs an `EmployeeClient` with a transport so each domain operation is a
//! single future: build the request, execute it, hand the response back to
//! the client. Calls are independent; nothing orders or retries them.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::client::EmployeeClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::notify::Notifier;
use crate::session::Session;
use crate::types::{Employee, EmployeeDetail, LoginRequest};

/// Executes an `HttpRequest` and returns whatever the server answered,
/// including non-2xx statuses.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// reqwest-backed transport. Requests with `with_credentials` share a cookie
/// store; the others go through a client without one.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    credentialed: reqwest::Client,
    anonymous: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        Ok(Self {
            credentialed: reqwest::Client::builder().cookie_store(true).build()?,
            anonymous: reqwest::Client::builder().build()?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let client = if request.with_credentials {
            &self.credentialed
        } else {
            &self.anonymous
        };
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse { status, headers, body })
    }
}

/// The five domain operations as futures.
#[derive(Debug, Clone)]
pub struct EmployeeService<T = ReqwestTransport> {
    client: EmployeeClient,
    transport: T,
}

impl EmployeeService<ReqwestTransport> {
    /// Build a fully configured service over reqwest.
    pub fn connect(
        config: &ClientConfig,
        session: Session,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ApiError> {
        let client = EmployeeClient::new(config, session, notifier);
        let transport = ReqwestTransport::new().map_err(|e| client.transport_failed(e))?;
        Ok(Self::new(client, transport))
    }
}

impl<T: Transport> EmployeeService<T> {
    pub fn new(client: EmployeeClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &EmployeeClient {
        &self.client
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let credentials = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.send(self.client.build_login(&credentials)).await?;
        self.client.parse_login(&response)?;
        tracing::info!(username, "logged in");
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self.send(self.client.build_logout()).await?;
        self.client.parse_logout(&response)
    }

    pub async fn load_employee_list(&self) -> Result<Vec<Employee>, ApiError> {
        let response = self.send(self.client.build_employee_list()).await?;
        self.client.parse_employee_list(&response)
    }

    pub async fn load_employee_details(&self, employee_id: i64) -> Result<EmployeeDetail, ApiError> {
        let response = self.send(self.client.build_employee_details(employee_id)).await?;
        self.client.parse_employee_details(&response)
    }

    pub async fn update_employee<R>(&self, record: &R) -> Result<(), ApiError>
    where
        R: Serialize + Sync + ?Sized,
    {
        let request = self.client.build_update_employee(record)?;
        let response = self.send(request).await?;
        self.client.parse_update_employee(&response)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = %request.method, url = %request.url, "dispatching request");
        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|e| self.client.transport_failed(e))?;
        tracing::debug!(status = response.status, "response received");
        Ok(response)
    }
}
