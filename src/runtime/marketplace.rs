use crate::authz::OwnershipResolver;
use crate::clients::{CategoryClient, MenuItemClient, OrderClient, RestaurantClient};
use crate::config::Config;
use crate::restaurant_actor::RestaurantContext;
use crate::services::{CatalogService, OrderBuilder, OrderLifecycle, OrderQueries};
use crate::{menu_actor, order_actor, restaurant_actor};
use tracing::{error, info};

/// Starts the four stores, wires their delete checks together and exposes
/// the services built on top of them.
///
/// Delete checks only ever look downward (restaurant → categories and
/// orders, category → items), so no store waits on one that could be
/// waiting on it.
///
/// # Example
///
/// ```ignore
/// let market = Marketplace::new(Config::from_env()?);
/// let restaurant = market.catalog.create_restaurant(&owner, request).await?;
/// market.shutdown().await?;
/// ```
pub struct Marketplace {
    pub catalog: CatalogService,
    pub builder: OrderBuilder,
    pub lifecycle: OrderLifecycle,
    pub queries: OrderQueries,

    /// Task handles, upstream stores first.
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Marketplace {
    /// Must be called from inside a Tokio runtime.
    pub fn new(config: Config) -> Self {
        let capacity = config.channel_capacity;
        let deadline = config.request_timeout();

        let (item_actor, item_resource_client) = menu_actor::new_items(capacity);
        let items = MenuItemClient::new(item_resource_client);

        let (category_actor, category_resource_client) = menu_actor::new_categories(capacity);
        let categories = CategoryClient::new(category_resource_client);

        let (order_actor, order_resource_client) = order_actor::new(capacity);
        let orders = OrderClient::new(order_resource_client);

        let (restaurant_actor, restaurant_resource_client) = restaurant_actor::new(capacity);
        let restaurants = RestaurantClient::new(restaurant_resource_client);

        let restaurant_handle = tokio::spawn(restaurant_actor.run(RestaurantContext {
            categories: categories.clone(),
            orders: orders.clone(),
        }));
        let category_handle = tokio::spawn(category_actor.run(items.clone()));
        let order_handle = tokio::spawn(order_actor.run(()));
        let item_handle = tokio::spawn(item_actor.run(()));

        let resolver = OwnershipResolver::new(restaurants.clone(), categories.clone(), items.clone());
        let queries = OrderQueries::new(
            orders.clone(),
            restaurants.clone(),
            items.clone(),
            resolver.clone(),
            deadline,
        );
        let builder = OrderBuilder::new(
            restaurants.clone(),
            items.clone(),
            orders.clone(),
            queries.clone(),
            config.delivery_fee,
            deadline,
        );
        let lifecycle = OrderLifecycle::new(
            orders,
            resolver.clone(),
            config.strict_transitions,
            deadline,
        );
        let catalog = CatalogService::new(restaurants, categories, items, resolver, deadline);

        info!(
            delivery_fee = %config.delivery_fee,
            strict_transitions = config.strict_transitions,
            capacity,
            "Marketplace started"
        );

        Self {
            catalog,
            builder,
            lifecycle,
            queries,
            handles: vec![restaurant_handle, category_handle, order_handle, item_handle],
        }
    }

    /// Drops every client and waits for the stores to drain.
    ///
    /// A store stops once no client for it is left, and the restaurant and
    /// category stores hold clients of their children, so shutdown cascades
    /// downward.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down marketplace...");

        drop(self.catalog);
        drop(self.builder);
        drop(self.lifecycle);
        drop(self.queries);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Marketplace shutdown complete.");
        Ok(())
    }
}
