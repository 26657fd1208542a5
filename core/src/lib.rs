//! Synchronous client core for the DevOps team API.
//!
//! # Overview
//! Manages engineers, developer teams, operations teams and combined
//! devops teams through a REST service. Typed CRUD calls are translated into
//! HTTP requests, executed by a `Transport`, and the JSON answers are decoded
//! into immutable entity values or typed errors.
//!
//! # Design
//! - `DevOpsClient` is immutable after construction; it is built from a typed
//!   `ClientConfig` and can be shared across threads.
//! - Each operation is split into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`), so the I/O boundary is explicit
//!   and every rule is testable without a server.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//! - `ResourceLifecycle` states what resource handlers may rely on across
//!   create/read/update/delete/import.

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod http;
pub mod reconcile;
pub mod transport;
pub mod types;

pub use client::DevOpsClient;
pub use config::{ClientConfig, EngineerLookup, ENDPOINT_ENV};
pub use error::{ApiError, ConfigError, ErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use reconcile::{Drift, Removal, ResourceLifecycle};
pub use transport::{Transport, UreqTransport, DEFAULT_TIMEOUT, MAX_BODY_BYTES};
pub use types::{DevOps, Developer, Engineer, Operations, Resource, ResourceKind};
