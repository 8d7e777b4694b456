//! Typed facades over the generic [`ResourceClient`](actor_runtime::ResourceClient).

pub mod order_client;

pub use order_client::OrderClient;
