//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract an entity must satisfy to be hosted by a
//! [`ResourceActor`](crate::ResourceActor). It names the identifier, the creation payload,
//! the entity-specific actions, the injected context and the error type, and it provides
//! the hooks the actor loop calls (`assign_id`, `on_create`, `handle_action`).
//!
//! # Identity
//! Identifiers are not minted by the runtime. The actor asks the entity type for a fresh
//! id through [`ActorEntity::assign_id`], which usually delegates to a collaborator held in
//! the context (a database sequence, an order store, ...). The id is then passed to
//! [`ActorEntity::from_create_params`] and never changes afterwards.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`] defaults to `Ok(())`.
//!
//! Entities have no generic update or delete path: every mutation goes through an
//! [`ActorEntity::Action`], so the entity stays in charge of which changes are legal.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any entity must implement to be managed by a `ResourceActor`.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can await collaborators. The `Context` is handed to
/// `run()` rather than `new()` ("late binding"), which lets the context hold a handle back
/// to the actor's own mailbox.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Enum of entity-specific operations.
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One error enum covers every hook and action of the entity. The runtime boxes it into
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError); clients can get
    /// the typed value back with [`FrameworkError::into_entity_error`](crate::FrameworkError::into_entity_error).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Obtain a fresh identifier for an entity that is about to be created.
    async fn assign_id(ctx: &Self::Context) -> Result<Self::Id, Self::Error>;

    /// Construct the full entity from its id and creation payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after the entity is constructed and before it is stored.
    /// An error here discards the entity.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle an entity-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
