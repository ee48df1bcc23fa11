//! # drive-gateway
//!
//! The [`MutationGateway`] trait is the client's only door to the remote
//! file store. [`HttpGateway`] speaks the store's REST API;
//! [`MemoryGateway`] keeps a whole store in memory and can inject failures
//! and delays, which the controller tests rely on.

pub mod gateway;
pub mod http;
pub mod memory;

pub use gateway::{Blob, ByteStream, GatewayOp, MutationGateway};
pub use http::HttpGateway;
pub use memory::MemoryGateway;
