//! # Order Lifecycle
//!
//! Status changes after placement. Owners move an order along
//! `pending → confirmed → preparing → ready → out_for_delivery → delivered`;
//! customers may only cancel, and only before preparation starts.
//! `delivered` and `cancelled` are final.
//!
//! Every write is a compare-and-swap against the status read at the start
//! of the call. If another writer got there first the call fails with
//! [`OrderError::StaleStatus`] instead of overwriting its change.

use super::deadline::within;
use crate::authz::{OwnershipResolver, ResourceRef};
use crate::clients::OrderClient;
use crate::framework::ActorClient;
use crate::model::{Identity, Order, OrderId, OrderStatus};
use crate::order_actor::OrderError;
use std::time::Duration;
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct OrderLifecycle {
    orders: OrderClient,
    resolver: OwnershipResolver,
    strict_transitions: bool,
    deadline: Duration,
}

impl OrderLifecycle {
    /// With `strict_transitions` off, owners may jump to any non-final
    /// status or cancel. With it on, only the next step forward or a
    /// cancellation is accepted.
    pub fn new(
        orders: OrderClient,
        resolver: OwnershipResolver,
        strict_transitions: bool,
        deadline: Duration,
    ) -> Self {
        Self {
            orders,
            resolver,
            strict_transitions,
            deadline,
        }
    }

    /// Owner-side status change. `new_status` is the wire name.
    #[instrument(skip(self), fields(user = %who.user_id))]
    pub async fn update_status(
        &self,
        who: &Identity,
        order_id: OrderId,
        new_status: &str,
    ) -> Result<Order, OrderError> {
        within(self.deadline, "update_status", async {
            OwnershipResolver::require_owner_role(who)?;
            let next: OrderStatus = new_status.parse()?;

            let order = self.load(order_id).await?;
            self.resolver
                .authorize(who, ResourceRef::Restaurant(order.restaurant_id))
                .await?;

            let current = order.status;
            if current.is_terminal() {
                return Err(OrderError::AlreadyFinal(current));
            }
            if !current.permits(next, self.strict_transitions) {
                warn!(from = %current, to = %next, "Transition rejected");
                return Err(OrderError::TransitionNotAllowed {
                    from: current,
                    to: next,
                });
            }

            let updated = self.orders.set_status(order_id, current, next).await?;
            info!(order = %order_id, from = %current, to = %next, "Order status updated");
            Ok(updated)
        })
        .await
    }

    /// Customer-side cancellation.
    #[instrument(skip(self), fields(user = %who.user_id))]
    pub async fn cancel(&self, who: &Identity, order_id: OrderId) -> Result<Order, OrderError> {
        within(self.deadline, "cancel_order", async {
            let order = self.load(order_id).await?;
            OwnershipResolver::ensure_customer(who, &order)?;

            let current = order.status;
            if !current.is_cancellable() {
                return Err(OrderError::NotCancellable(current));
            }

            let updated = self
                .orders
                .set_status(order_id, current, OrderStatus::Cancelled)
                .await?;
            info!(order = %order_id, from = %current, "Order cancelled");
            Ok(updated)
        })
        .await
    }

    async fn load(&self, id: OrderId) -> Result<Order, OrderError> {
        self.orders
            .get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::AuthzError;
    use crate::clients::{CategoryClient, MenuItemClient, RestaurantClient};
    use crate::error::ErrorKind;
    use crate::framework::mock::MockClient;
    use crate::framework::FrameworkError;
    use crate::model::{
        MenuCategory, MenuItem, PaymentStatus, Restaurant, RestaurantId, Role, UserId,
    };
    use chrono::Utc;
    use rust_decimal::Decimal;

    const OWNER: UserId = UserId(50);
    const CUSTOMER: UserId = UserId(7);

    struct Stores {
        orders: MockClient<Order>,
        restaurants: MockClient<Restaurant>,
        categories: MockClient<MenuCategory>,
        items: MockClient<MenuItem>,
    }

    impl Stores {
        fn new() -> Self {
            Self {
                orders: MockClient::new(),
                restaurants: MockClient::new(),
                categories: MockClient::new(),
                items: MockClient::new(),
            }
        }

        fn lifecycle(&self, strict: bool) -> OrderLifecycle {
            let resolver = OwnershipResolver::new(
                RestaurantClient::new(self.restaurants.client()),
                CategoryClient::new(self.categories.client()),
                MenuItemClient::new(self.items.client()),
            );
            OrderLifecycle::new(
                OrderClient::new(self.orders.client()),
                resolver,
                strict,
                Duration::from_secs(5),
            )
        }

        fn expect_owner(&mut self) {
            let now = Utc::now();
            self.restaurants
                .expect_get(RestaurantId(1))
                .return_ok(Some(Restaurant {
                    id: RestaurantId(1),
                    owner_id: OWNER,
                    name: "Tandoor House".into(),
                    description: String::new(),
                    address: "1 High St".into(),
                    city: "Pune".into(),
                    image_url: String::new(),
                    is_active: true,
                    rating: 0.0,
                    created_at: now,
                    updated_at: now,
                }));
        }

        fn verify(&self) {
            self.orders.verify();
            self.restaurants.verify();
        }
    }

    fn order(status: OrderStatus) -> Order {
        let now = Utc::now();
        Order {
            id: OrderId(1),
            customer_id: CUSTOMER,
            restaurant_id: RestaurantId(1),
            status,
            subtotal: Decimal::new(24000, 2),
            delivery_fee: Decimal::new(5000, 2),
            total_amount: Decimal::new(29000, 2),
            delivery_address: "12 Elm St".into(),
            payment_method: "card".into(),
            payment_status: PaymentStatus::Pending,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_owner_advances_order() {
        let mut stores = Stores::new();
        stores
            .orders
            .expect_get(OrderId(1))
            .return_ok(Some(order(OrderStatus::Pending)));
        stores.expect_owner();
        stores
            .orders
            .expect_action(OrderId(1))
            .return_ok(order(OrderStatus::Confirmed));

        let updated = stores
            .lifecycle(false)
            .update_status(&Identity::owner(OWNER), OrderId(1), "confirmed")
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Confirmed);
        stores.verify();
    }

    #[tokio::test]
    async fn test_unknown_status_is_rejected_before_lookup() {
        let stores = Stores::new();
        let err = stores
            .lifecycle(false)
            .update_status(&Identity::owner(OWNER), OrderId(1), "shipped")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        stores.verify();
    }

    #[tokio::test]
    async fn test_customer_role_cannot_update_status() {
        let stores = Stores::new();
        let err = stores
            .lifecycle(false)
            .update_status(&Identity::customer(CUSTOMER), OrderId(1), "confirmed")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::Access(AuthzError::RoleNotPermitted {
                role: Role::Customer
            })
        );
        stores.verify();
    }

    #[tokio::test]
    async fn test_delivered_order_is_final() {
        let mut stores = Stores::new();
        stores
            .orders
            .expect_get(OrderId(1))
            .return_ok(Some(order(OrderStatus::Delivered)));
        stores.expect_owner();

        let err = stores
            .lifecycle(false)
            .update_status(&Identity::owner(OWNER), OrderId(1), "pending")
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::AlreadyFinal(OrderStatus::Delivered));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        stores.verify();
    }

    #[tokio::test]
    async fn test_strict_policy_rejects_skipping_steps() {
        let mut stores = Stores::new();
        stores
            .orders
            .expect_get(OrderId(1))
            .return_ok(Some(order(OrderStatus::Pending)));
        stores.expect_owner();

        let err = stores
            .lifecycle(true)
            .update_status(&Identity::owner(OWNER), OrderId(1), "delivered")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::TransitionNotAllowed {
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered,
            }
        );
        stores.verify();
    }

    #[tokio::test]
    async fn test_concurrent_writer_surfaces_as_stale_status() {
        let mut stores = Stores::new();
        stores
            .orders
            .expect_get(OrderId(1))
            .return_ok(Some(order(OrderStatus::Pending)));
        stores.expect_owner();
        stores
            .orders
            .expect_action(OrderId(1))
            .return_err(FrameworkError::EntityError(Box::new(OrderError::StaleStatus {
                expected: OrderStatus::Pending,
                actual: OrderStatus::Cancelled,
            })));

        let err = stores
            .lifecycle(false)
            .update_status(&Identity::owner(OWNER), OrderId(1), "confirmed")
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::StaleStatus { .. }));
        stores.verify();
    }

    #[tokio::test]
    async fn test_customer_cancels_pending_order() {
        let mut stores = Stores::new();
        stores
            .orders
            .expect_get(OrderId(1))
            .return_ok(Some(order(OrderStatus::Pending)));
        stores
            .orders
            .expect_action(OrderId(1))
            .return_ok(order(OrderStatus::Cancelled));

        let cancelled = stores
            .lifecycle(false)
            .cancel(&Identity::customer(CUSTOMER), OrderId(1))
            .await
            .unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        stores.verify();
    }

    #[tokio::test]
    async fn test_preparing_order_cannot_be_cancelled() {
        let mut stores = Stores::new();
        stores
            .orders
            .expect_get(OrderId(1))
            .return_ok(Some(order(OrderStatus::Preparing)));

        let err = stores
            .lifecycle(false)
            .cancel(&Identity::customer(CUSTOMER), OrderId(1))
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::NotCancellable(OrderStatus::Preparing));
        assert_eq!(err.to_string(), "cannot cancel order in current status (preparing)");
        stores.verify();
    }

    #[tokio::test]
    async fn test_only_the_ordering_customer_may_cancel() {
        let mut stores = Stores::new();
        stores
            .orders
            .expect_get(OrderId(1))
            .return_ok(Some(order(OrderStatus::Pending)));

        let err = stores
            .lifecycle(false)
            .cancel(&Identity::customer(UserId(8)), OrderId(1))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        stores.verify();
    }
}
