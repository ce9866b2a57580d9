//! Connection-managed client for the products service.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tonic::metadata::MetadataValue;
use tonic::{Code, Request, Status};

use svclink_core::config::RpcEndpointConfig;
use svclink_core::error::CallError;
use svclink_core::resource::{Existence, ResourceClient, TraceToken};

use crate::channel;
use crate::proto::{GetProductRequest, Product, ProductExistsRequest, ProductsStub};

/// Metadata key carrying the propagated trace token.
pub const TRACE_METADATA_KEY: &str = "x-request-id";

/// Product as exposed to the business layer. Wire types never leak out of
/// this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Decimal amount as a string, exactly as the remote reports it.
    pub price: String,
    pub images: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductRecord {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            images: p.images,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Client holding at most one channel to the products service.
///
/// The channel is established lazily on the first call and reused until
/// [`ProductsClient::close`]. The stub slot is guarded by a mutex so
/// concurrent first calls construct exactly one channel.
pub struct ProductsClient {
    config: RpcEndpointConfig,
    stub: Mutex<Option<ProductsStub>>,
}

impl ProductsClient {
    pub fn new(config: RpcEndpointConfig) -> Self {
        Self {
            config,
            stub: Mutex::new(None),
        }
    }

    /// Returns `true` while a channel is held.
    pub async fn is_connected(&self) -> bool {
        self.stub.lock().await.is_some()
    }

    /// Release the channel and clear the cached stub. Idempotent — closing a
    /// never-opened client is a no-op. Any call after this re-establishes
    /// the channel.
    pub async fn close(&self) {
        let mut slot = self.stub.lock().await;
        if slot.take().is_some() {
            tracing::info!(target = %self.config.target, "rpc channel closed");
        }
    }

    // The lock is held across the dial so only one caller constructs the
    // channel; everyone else blocks and then observes it.
    async fn ensure_connected(&self) -> Result<ProductsStub, CallError> {
        let mut slot = self.stub.lock().await;
        if let Some(stub) = slot.as_ref() {
            return Ok(stub.clone());
        }

        let ch = channel::dial(&self.config).await?;
        let stub = ProductsStub::new(ch, self.config.max_message_bytes);
        tracing::info!(
            target = %self.config.target,
            tls = self.config.tls_enabled(),
            "rpc channel established"
        );
        *slot = Some(stub.clone());
        Ok(stub)
    }

    /// Fetch a product by id. Absence is `Ok(None)`, never an error.
    pub async fn get_product(
        &self,
        product_id: &str,
        trace: Option<&TraceToken>,
    ) -> Result<Option<ProductRecord>, CallError> {
        let mut stub = match self.ensure_connected().await {
            Ok(stub) => stub,
            Err(e) => {
                tracing::error!(
                    product_id,
                    trace = trace.map(TraceToken::as_str),
                    error = %e,
                    "rpc channel unavailable"
                );
                return Err(connect_failure(product_id, &e));
            }
        };

        let mut request = Request::new(GetProductRequest {
            product_id: product_id.to_owned(),
        });
        request.set_timeout(self.config.timeout);
        attach_trace(&mut request, trace);

        match stub.get_product(request).await {
            Ok(resp) => Ok(resp.into_inner().product.map(ProductRecord::from)),
            Err(status) if is_absence(&status) => {
                tracing::warn!(
                    product_id,
                    trace = trace.map(TraceToken::as_str),
                    "product not found via rpc"
                );
                Ok(None)
            }
            Err(status) => {
                tracing::error!(
                    product_id,
                    trace = trace.map(TraceToken::as_str),
                    code = ?status.code(),
                    detail = status.message(),
                    "rpc call failed"
                );
                Err(classify_failure(product_id, &status))
            }
        }
    }

    /// Check whether a product exists. Same connection management as
    /// [`ProductsClient::get_product`], but absence never raises — the
    /// response carries a boolean plus the product when the remote includes
    /// it.
    pub async fn product_exists(
        &self,
        product_id: &str,
    ) -> Result<Existence<ProductRecord>, CallError> {
        let mut stub = match self.ensure_connected().await {
            Ok(stub) => stub,
            Err(e) => {
                tracing::error!(product_id, error = %e, "rpc channel unavailable");
                return Err(connect_failure(product_id, &e));
            }
        };

        let mut request = Request::new(ProductExistsRequest {
            product_id: product_id.to_owned(),
        });
        request.set_timeout(self.config.timeout);

        match stub.product_exists(request).await {
            Ok(resp) => {
                let reply = resp.into_inner();
                Ok(Existence {
                    exists: reply.exists,
                    resource: reply.product.map(ProductRecord::from),
                })
            }
            Err(status) => {
                tracing::error!(
                    product_id,
                    code = ?status.code(),
                    detail = status.message(),
                    "rpc existence check failed"
                );
                Err(classify_failure(product_id, &status))
            }
        }
    }
}

#[async_trait]
impl ResourceClient for ProductsClient {
    type Resource = ProductRecord;

    async fn fetch(
        &self,
        id: &str,
        trace: Option<&TraceToken>,
    ) -> Result<Option<ProductRecord>, CallError> {
        self.get_product(id, trace).await
    }

    async fn exists(&self, id: &str) -> Result<Existence<ProductRecord>, CallError> {
        self.product_exists(id).await
    }

    async fn close(&self) {
        ProductsClient::close(self).await;
    }
}

/// The sole absence signal: a remote `NOT_FOUND` status.
fn is_absence(status: &Status) -> bool {
    status.code() == Code::NotFound
}

fn classify_failure(id: &str, status: &Status) -> CallError {
    CallError::Rpc {
        id: id.to_owned(),
        code: format!("{:?}", status.code()),
        detail: status.message().to_owned(),
    }
}

fn connect_failure(id: &str, err: &CallError) -> CallError {
    CallError::Rpc {
        id: id.to_owned(),
        code: "Unavailable".to_owned(),
        detail: err.to_string(),
    }
}

fn attach_trace<T>(request: &mut Request<T>, trace: Option<&TraceToken>) {
    if let Some(token) = trace {
        match MetadataValue::try_from(token.as_str()) {
            Ok(value) => {
                request.metadata_mut().insert(TRACE_METADATA_KEY, value);
            }
            Err(_) => {
                tracing::debug!(trace = token.as_str(), "trace token not valid as metadata");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn unreachable_config() -> RpcEndpointConfig {
        // Port 1 refuses immediately; the reconnect window is shrunk so the
        // dial loop exhausts quickly.
        let mut config = RpcEndpointConfig::new("127.0.0.1:1");
        config.connect_timeout = Duration::from_millis(200);
        config.reconnect_initial = Duration::from_millis(5);
        config.reconnect_max = Duration::from_millis(10);
        config.timeout = Duration::from_millis(500);
        config
    }

    #[tokio::test]
    async fn close_is_idempotent_when_never_connected() {
        let client = ProductsClient::new(RpcEndpointConfig::new("localhost:50051"));
        assert!(!client.is_connected().await);
        client.close().await;
        client.close().await;
        assert!(!client.is_connected().await);
    }

    #[tokio::test]
    async fn fetch_against_unreachable_target_names_the_id() {
        let client = ProductsClient::new(unreachable_config());
        let trace = TraceToken::from("req-9");
        let err = client
            .get_product("p-77", Some(&trace))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("p-77"));
        assert!(!client.is_connected().await);
    }

    #[tokio::test]
    async fn existence_check_against_unreachable_target_fails() {
        let client = ProductsClient::new(unreachable_config());
        let err = client.product_exists("p1").await.unwrap_err();
        assert!(matches!(err, CallError::Rpc { .. }));
    }

    #[test]
    fn not_found_is_absence_not_failure() {
        assert!(is_absence(&Status::not_found("no such product")));
        assert!(!is_absence(&Status::internal("boom")));
        assert!(!is_absence(&Status::unavailable("down")));
    }

    #[test]
    fn classified_failure_carries_id_and_code() {
        let err = classify_failure("p9", &Status::internal("db down"));
        match err {
            CallError::Rpc { id, code, detail } => {
                assert_eq!(id, "p9");
                assert_eq!(code, "Internal");
                assert_eq!(detail, "db down");
            }
            other => panic!("expected rpc failure, got {other:?}"),
        }
    }

    #[test]
    fn record_maps_all_wire_fields() {
        let wire = Product {
            id: "p1".into(),
            name: "Widget".into(),
            description: "A widget".into(),
            price: "9.99".into(),
            images: vec!["a.png".into(), "b.png".into()],
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: "2024-06-01T00:00:00Z".into(),
        };
        let record = ProductRecord::from(wire);
        assert_eq!(record.id, "p1");
        assert_eq!(record.price, "9.99");
        assert_eq!(record.images.len(), 2);
    }
}
