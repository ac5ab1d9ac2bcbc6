//! API client core and route table for the employee demo application.
//!
//! # Overview
//! `EmployeeClient` builds `HttpRequest` values and interprets `HttpResponse`
//! values without touching the network (host-does-IO pattern).
//! `EmployeeService` runs those requests through a `Transport` so every
//! domain operation is a single future. `RouteTable` maps navigated paths to
//! the page that renders them.
//!
//! # Design
//! - The client is configured once at construction; there is no lazy setup.
//! - Status handling is a `ResponseStatus` classification: 401 clears the
//!   shared `Session`, 404 raises a notice through the injected `Notifier`,
//!   other failures produce a diagnostic. The caller always gets the failure
//!   back as an `ApiError`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod notify;
pub mod routes;
pub mod service;
pub mod session;
pub mod status;
pub mod types;

pub use client::EmployeeClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, RouteError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use notify::{LogNotifier, NoticeNotifier, Notifier};
pub use routes::{Page, Resolved, RouteProps, RouteTable};
pub use service::{EmployeeService, ReqwestTransport, Transport};
pub use session::Session;
pub use status::ResponseStatus;
pub use types::{ColumnMeta, Employee, EmployeeDetail, LoginRequest};
