//! Error types for the Order actor.

use crate::model::{AttemptToken, OrderId, OrderStatus};
use crate::order_actor::GatewayRequest;
use crate::services::ServiceError;
use actor_runtime::FrameworkError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The operation is not legal in the order's current status. Nothing changed.
    #[error("Cannot {operation} an order in status {status}")]
    InvalidTransition {
        operation: &'static str,
        status: OrderStatus,
    },

    /// A gateway answer for a request that is no longer the one in flight.
    #[error("Stale {request} callback (attempt {attempt}) for order in status {status}")]
    StaleCallback {
        request: GatewayRequest,
        attempt: AttemptToken,
        status: OrderStatus,
    },

    /// The catalog, carrier or gateway failed. The status is unchanged.
    #[error("{service} error: {source}")]
    Collaborator {
        service: &'static str,
        source: ServiceError,
    },

    /// The order store failed. The order keeps its last persisted state.
    #[error("Order persistence error: {0}")]
    Persistence(ServiceError),

    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    pub(crate) fn collaborator(service: &'static str) -> impl FnOnce(ServiceError) -> Self {
        move |source| OrderError::Collaborator { service, source }
    }

    /// Translates a runtime error for a request addressed to `id`.
    pub(crate) fn from_runtime(id: OrderId, e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(_) => OrderError::NotFound(id),
            other => other.into(),
        }
    }
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        e.into_entity_error::<OrderError>()
            .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string()))
    }
}
