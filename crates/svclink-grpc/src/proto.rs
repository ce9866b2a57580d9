//! Wire types and call stub for the `products.v1.Products` service.
//!
//! The message structs are hand-written `prost` derives and the stub drives
//! `tonic::client::Grpc` directly, mirroring what `tonic-build` would emit,
//! so the crate carries no build-time protoc dependency.

use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tonic::{Request, Response, Status};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Product {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub description: ::prost::alloc::string::String,
    /// Decimal amount serialized as a string to avoid float rounding.
    #[prost(string, tag = "4")]
    pub price: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "5")]
    pub images: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, tag = "6")]
    pub created_at: ::prost::alloc::string::String,
    #[prost(string, tag = "7")]
    pub updated_at: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetProductRequest {
    #[prost(string, tag = "1")]
    pub product_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetProductResponse {
    #[prost(message, optional, tag = "1")]
    pub product: ::core::option::Option<Product>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProductExistsRequest {
    #[prost(string, tag = "1")]
    pub product_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProductExistsResponse {
    #[prost(bool, tag = "1")]
    pub exists: bool,
    #[prost(message, optional, tag = "2")]
    pub product: ::core::option::Option<Product>,
}

/// Unary call stub over an established channel.
///
/// Cheap to clone — clones share the underlying channel.
#[derive(Debug, Clone)]
pub(crate) struct ProductsStub {
    inner: tonic::client::Grpc<Channel>,
}

impl ProductsStub {
    /// Wrap a channel, capping encoded and decoded message sizes.
    pub fn new(channel: Channel, max_message_bytes: usize) -> Self {
        let inner = tonic::client::Grpc::new(channel)
            .max_decoding_message_size(max_message_bytes)
            .max_encoding_message_size(max_message_bytes);
        Self { inner }
    }

    pub async fn get_product(
        &mut self,
        request: Request<GetProductRequest>,
    ) -> Result<Response<GetProductResponse>, Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| Status::unavailable(format!("service not ready: {e}")))?;
        let codec: tonic::codec::ProstCodec<GetProductRequest, GetProductResponse> =
            tonic::codec::ProstCodec::default();
        let path = PathAndQuery::from_static("/products.v1.Products/GetProduct");
        self.inner.unary(request, path, codec).await
    }

    pub async fn product_exists(
        &mut self,
        request: Request<ProductExistsRequest>,
    ) -> Result<Response<ProductExistsResponse>, Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| Status::unavailable(format!("service not ready: {e}")))?;
        let codec: tonic::codec::ProstCodec<ProductExistsRequest, ProductExistsResponse> =
            tonic::codec::ProstCodec::default();
        let path = PathAndQuery::from_static("/products.v1.Products/ProductExists");
        self.inner.unary(request, path, codec).await
    }
}
