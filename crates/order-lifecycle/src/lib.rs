//! # Order Lifecycle
//!
//! An e-commerce order state machine hosted on the actor runtime. An order is placed, paid
//! (the payment gateway answers asynchronously, and failed payments can be retried), then
//! either shipped, canceled or refunded.
//!
//! - **[model]**: Plain data ([`Order`](model::Order), [`OrderStatus`](model::OrderStatus),
//!   [`Address`](model::Address), [`Card`](model::Card)).
//! - **[order_actor]**: The state machine, as an [`ActorEntity`](actor_runtime::ActorEntity).
//! - **[services]**: Capability traits for the store, catalog, gateway and carrier, plus
//!   in-memory implementations.
//! - **[clients]**: [`OrderClient`](clients::OrderClient), the typed API.
//! - **[config]** / **[lifecycle]**: Loading settings and running the system.

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod services;
