//! svclink-http — retrying HTTP transport client backed by `reqwest`.
//!
//! Features:
//! - Bounded exponential-backoff retry for transient failures
//! - API-key and trace-token header injection on every call
//! - Client errors (4xx) returned immediately, never retried
//! - No cross-call connection pooling: the network resource lives for the
//!   duration of one logical call

mod client;

pub use client::{RestClient, Verb, API_KEY_HEADER, TRACE_HEADER};
