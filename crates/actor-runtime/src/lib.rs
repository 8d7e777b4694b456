//! # Actor Runtime
//!
//! Building blocks for hosting stateful entities behind a mailbox. Each entity type gets a
//! [`ResourceActor`] running in its own Tokio task; callers talk to it through a cloneable
//! [`ResourceClient`]. The actor handles one request at a time, so entity code can check its
//! own state and act on it without locks.
//!
//! The runtime separates concerns into three layers:
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - business rules: which actions are legal and what
//!    they change
//! 2. **Runtime Layer** ([`ResourceActor`]) - the mailbox loop, id assignment, logging
//! 3. **Interface Layer** ([`ResourceClient`], [`WeakResourceClient`], [`ActorClient`]) -
//!    typed request/response over channels
//!
//! ## Context Injection
//!
//! Dependencies are passed to [`ResourceActor::run`], not to [`ResourceActor::new`]. The
//! actor and its client exist before the context is built, so the context may contain a
//! [`WeakResourceClient`] pointing back at the actor itself. Entities use that to receive
//! the outcome of asynchronous work they started (a gateway confirmation, a timer) as an
//! ordinary message, serialized with everything else.
//!
//! ```rust,ignore
//! let (actor, client) = ResourceActor::<Order>::new(32);
//! let context = OrderContext::new(services, client.downgrade());
//! let handle = tokio::spawn(actor.run(context));
//!
//! let id = client.create(params).await?;
//! drop(client);          // last strong handle: the actor drains and stops
//! handle.await?;
//! ```
//!
//! ## Errors
//!
//! Entity errors travel back boxed in [`FrameworkError::EntityError`];
//! [`FrameworkError::into_entity_error`] restores the concrete type so callers can match
//! on it.
//!
//! ## Testing
//!
//! See the [`mock`] module for a scripted client that needs no running actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::{ResourceClient, WeakResourceClient};
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
