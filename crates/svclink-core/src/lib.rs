//! svclink-core — foundation traits and types for svclink.
//!
//! # Overview
//!
//! svclink is the resilient service-to-service call core shared by the
//! record-management services. The core crate defines:
//!
//! - [`ResourceClient`] — the capability trait every remote-resource client
//!   implements ("given an identifier and a trace token, return the resource
//!   or a well-defined absence/failure")
//! - [`CallError`] — structured failure taxonomy for outbound calls
//! - [`EndpointConfig`] / [`RpcEndpointConfig`] — immutable per-dependency
//!   endpoint configuration
//! - [`ApiError`] / [`ErrorEnvelope`] — boundary error translation

pub mod config;
pub mod envelope;
pub mod error;
pub mod resource;

pub use config::{EndpointConfig, RpcEndpointConfig};
pub use envelope::{ApiError, ErrorEnvelope, ErrorObject};
pub use error::CallError;
pub use resource::{Existence, ResourceClient, TraceToken};
