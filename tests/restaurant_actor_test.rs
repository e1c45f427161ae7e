use quickbite::clients::{CategoryClient, OrderClient, RestaurantClient};
use quickbite::framework::mock::MockClient;
use quickbite::framework::ActorClient;
use quickbite::model::{
    CategoryId, CreateRestaurantRequest, MenuCategory, Order, RestaurantCreate, UserId,
};
use quickbite::restaurant_actor::{RestaurantContext, RestaurantError};

/// Real Restaurant actor with mocked category and order stores.
///
/// Pattern 2: Actor + Mocks
/// - Real Restaurant actor (tests the delete check in `on_delete`)
/// - Mocked Category and Order clients (isolates the child stores)
#[tokio::test]
async fn test_restaurant_delete_checks_child_stores() {
    let mut category_mock = MockClient::<MenuCategory>::new();
    let mut order_mock = MockClient::<Order>::new();

    let (restaurant_actor, restaurant_resource_client) = quickbite::restaurant_actor::new(10);
    let restaurants = RestaurantClient::new(restaurant_resource_client);
    let actor_handle = tokio::spawn(restaurant_actor.run(RestaurantContext {
        categories: CategoryClient::new(category_mock.client()),
        orders: OrderClient::new(order_mock.client()),
    }));

    let id = restaurants
        .create_restaurant(RestaurantCreate {
            owner_id: UserId(1),
            request: CreateRestaurantRequest {
                name: "Tandoor House".to_string(),
                address: "4 Market Rd".to_string(),
                city: "Pune".to_string(),
                ..Default::default()
            },
        })
        .await
        .expect("Failed to create restaurant");

    // First attempt: one category still references the restaurant.
    category_mock.expect_list().return_ok(vec![MenuCategory {
        id: CategoryId(1),
        restaurant_id: id,
        name: "Starters".to_string(),
        display_order: 1,
        created_at: chrono::Utc::now(),
    }]);
    let err = restaurants.delete(id).await.unwrap_err();
    assert_eq!(
        err,
        RestaurantError::HasCategories {
            restaurant: id,
            count: 1,
        }
    );
    assert!(restaurants.get(id).await.unwrap().is_some());

    // Second attempt: both child stores are empty.
    category_mock.expect_list().return_ok(Vec::new());
    order_mock.expect_list().return_ok(Vec::new());
    restaurants.delete(id).await.expect("Failed to delete");
    assert!(restaurants.get(id).await.unwrap().is_none());

    category_mock.verify();
    order_mock.verify();

    drop(restaurants);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_restaurant_requires_listing_fields() {
    let (restaurant_actor, restaurant_resource_client) = quickbite::restaurant_actor::new(10);
    let restaurants = RestaurantClient::new(restaurant_resource_client);
    let category_mock = MockClient::<MenuCategory>::new();
    let order_mock = MockClient::<Order>::new();
    let actor_handle = tokio::spawn(restaurant_actor.run(RestaurantContext {
        categories: CategoryClient::new(category_mock.client()),
        orders: OrderClient::new(order_mock.client()),
    }));

    let err = restaurants
        .create_restaurant(RestaurantCreate {
            owner_id: UserId(1),
            request: CreateRestaurantRequest {
                name: "Nameless".to_string(),
                ..Default::default()
            },
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        RestaurantError::Validation("name, address and city are required".to_string())
    );

    drop(restaurants);
    actor_handle.await.unwrap();
}
