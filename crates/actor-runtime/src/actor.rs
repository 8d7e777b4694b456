//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the task that owns a set of entities and
//! processes requests for them one at a time.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns a collection of entities.
///
/// **Concurrency Model**:
/// The actor drains its mailbox sequentially. A request is fully handled, including every
/// `await` inside the entity hooks, before the next one is received. Any check-then-act
/// sequence written inside a hook is therefore atomic with respect to every other client
/// call and every callback that reaches the entity through the same mailbox. The store is
/// a plain `HashMap`; no `Mutex` is involved.
///
/// A consequence: a hook must never wait for a reply to a message it sends to its own
/// actor. Work that has to come back to the entity later (for example a payment
/// confirmation) is posted as a new request and handled after the current one returns.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Build the context, optionally with `client.downgrade()` for self-addressed messages.
/// 3.  **Run**: Spawn `actor.run(context)` in a background task.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Order>::new(32);
/// let context = OrderContext::new(services, client.downgrade());
/// let handle = tokio::spawn(actor.run(context));
/// ```
///
/// ## Operations
///
/// * **Create**: asks `T::assign_id` for an id, builds the entity with
///   `T::from_create_params`, runs `on_create`, and only then inserts it.
/// * **Get**: returns a clone of the entity, or `None`.
/// * **Action**: runs `handle_action` against the stored entity and returns its result.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mailbox capacity; once it is full, callers wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop until every strong client handle is dropped.
    pub async fn run(mut self, context: T::Context) {
        // "Order" instead of "order_lifecycle::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(id) => info!(entity_type, %id, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = item
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let boxed = |e: T::Error| FrameworkError::EntityError(Box::new(e));

        let id = T::assign_id(context).await.map_err(boxed)?;
        let mut item = T::from_create_params(id.clone(), params).map_err(boxed)?;
        item.on_create(context).await.map_err(boxed)?;
        self.store.insert(id.clone(), item);
        Ok(id)
    }
}
