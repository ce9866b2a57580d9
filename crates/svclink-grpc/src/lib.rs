//! svclink-grpc — connection-managed gRPC client for the products service.
//!
//! Features:
//! - Lazy channel establishment with mutual exclusion (at most one channel
//!   construction wins, all callers observe the same channel)
//! - TLS auto-selection: port 443 or an explicit flag picks a secure channel
//! - Keep-alive probing and bounded reconnect backoff so transient partitions
//!   self-heal without caller intervention
//! - "Not found" is an absence result, never an error

mod channel;
mod client;
pub mod proto;

pub use client::{ProductRecord, ProductsClient, TRACE_METADATA_KEY};
