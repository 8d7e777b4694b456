//! # Generic Messages
//!
//! Messages exchanged between a `ResourceClient` and its `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to a [`ResourceActor`](crate::ResourceActor).
///
/// - **Create**: Lifecycle start. Uses [`ActorEntity::Create`] to build a new entity.
/// - **Get**: Returns a snapshot (clone) of the entity.
/// - **Action**: Runs an [`ActorEntity::Action`] against one entity.
///
/// Each request carries its own `respond_to` channel, so replies never get mixed up
/// between concurrent callers.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
