//! Walks one restaurant and one order through the marketplace.
//!
//! An owner opens a restaurant with one dish, a customer orders two of it,
//! the owner delivers the order, and two calls that must be refused are
//! shown failing: rewinding a delivered order, and a stranger reading it.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

use quickbite::config::Config;
use quickbite::model::{
    CreateCategoryRequest, CreateMenuItemRequest, CreateOrderRequest, CreateRestaurantRequest,
    Identity, OrderLineRequest, UserId,
};
use quickbite::runtime::{setup_tracing, Marketplace};
use rust_decimal::Decimal;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = Config::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting QuickBite");
    let market = Marketplace::new(config);

    let owner = Identity::owner(UserId(1));
    let customer = Identity::customer(UserId(2));
    let stranger = Identity::customer(UserId(3));

    let span = tracing::info_span!("menu_setup", user = %owner.user_id);
    let (restaurant_id, dish) = async {
        let restaurant = market
            .catalog
            .create_restaurant(
                &owner,
                CreateRestaurantRequest {
                    name: "Tandoor House".to_string(),
                    description: "North Indian kitchen".to_string(),
                    address: "4 Market Rd".to_string(),
                    city: "Pune".to_string(),
                    image_url: String::new(),
                },
            )
            .await?;
        let category = market
            .catalog
            .create_category(
                &owner,
                CreateCategoryRequest {
                    restaurant_id: restaurant.id,
                    name: "Starters".to_string(),
                    display_order: 1,
                },
            )
            .await?;
        let dish = market
            .catalog
            .create_menu_item(
                &owner,
                CreateMenuItemRequest {
                    category_id: category.id,
                    name: "Paneer Tikka".to_string(),
                    description: "Chargrilled cottage cheese".to_string(),
                    price: Decimal::new(12000, 2),
                    image_url: String::new(),
                    is_veg: true,
                },
            )
            .await?;
        Ok::<_, quickbite::services::CatalogError>((restaurant.id, dish))
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    info!(menu_item = %dish.id, price = %dish.price, "Menu ready");

    let span = tracing::info_span!("order_placement", user = %customer.user_id);
    let placed = async {
        market
            .builder
            .place_order(
                &customer,
                CreateOrderRequest {
                    restaurant_id: Some(restaurant_id),
                    items: vec![OrderLineRequest {
                        menu_item_id: dish.id,
                        quantity: 2,
                    }],
                    delivery_address: "12 Elm St".to_string(),
                    payment_method: "card".to_string(),
                },
            )
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(
        order = %placed.order.id,
        total = %placed.order.total_amount,
        status = %placed.order.status,
        "Order placed"
    );

    let order_id = placed.order.id;
    let delivered = market
        .lifecycle
        .update_status(&owner, order_id, "delivered")
        .await
        .map_err(|e| e.to_string())?;
    info!(order = %order_id, status = %delivered.status, "Order delivered");

    match market.lifecycle.update_status(&owner, order_id, "pending").await {
        Ok(order) => error!(status = %order.status, "Delivered order was reopened"),
        Err(e) => info!(kind = %e.kind(), error = %e, "Rewind refused"),
    }

    match market.queries.get_by_id(&stranger, order_id).await {
        Ok(_) => error!("Order leaked to another customer"),
        Err(e) => info!(kind = %e.kind(), error = %e, "Foreign read refused"),
    }

    market.shutdown().await?;

    info!("Demo completed");
    Ok(())
}
