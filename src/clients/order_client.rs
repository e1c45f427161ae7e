//! # Order Client
//!
//! Typed wrapper around `ResourceClient<Order>`. Exposes the two writes an
//! order supports: placing a priced draft and a compare-and-swap status change.

use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Order, OrderDraft, OrderId, OrderStatus};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Stores header and lines as a single insert.
    #[instrument(skip(self, draft), fields(restaurant = %draft.restaurant_id, lines = draft.lines.len()))]
    pub async fn place(&self, draft: OrderDraft) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        self.inner.create(draft).await.map_err(Self::map_error)
    }

    /// Writes `next` only if the stored status is still `expected`.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        next: OrderStatus,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::SetStatus { expected, next })
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::Unavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn test_set_status_sends_compare_and_swap_action() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let order_client = OrderClient::new(client);

        let task = tokio::spawn(async move {
            order_client
                .set_status(OrderId(3), OrderStatus::Pending, OrderStatus::Confirmed)
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, OrderId(3));
        assert_eq!(
            action,
            OrderAction::SetStatus {
                expected: OrderStatus::Pending,
                next: OrderStatus::Confirmed,
            }
        );

        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                OrderError::StaleStatus {
                    expected: OrderStatus::Pending,
                    actual: OrderStatus::Cancelled,
                },
            ))))
            .unwrap();

        let result = task.await.unwrap();
        assert_eq!(
            result.unwrap_err(),
            OrderError::StaleStatus {
                expected: OrderStatus::Pending,
                actual: OrderStatus::Cancelled,
            }
        );
    }

    #[tokio::test]
    async fn test_dropped_actor_is_unavailable() {
        let (client, receiver) = create_mock_client::<Order>(1);
        drop(receiver);
        let order_client = OrderClient::new(client);

        let err = order_client.get(OrderId(1)).await.unwrap_err();
        assert!(matches!(err, OrderError::Unavailable(_)));
    }
}
