//! # Restaurant Client
//!
//! Typed wrapper around `ResourceClient<Restaurant>`.

use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Restaurant, RestaurantCreate, RestaurantId, UpdateRestaurantRequest};
use crate::restaurant_actor::RestaurantError;
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct RestaurantClient {
    inner: ResourceClient<Restaurant>,
}

impl RestaurantClient {
    pub fn new(inner: ResourceClient<Restaurant>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_restaurant(
        &self,
        params: RestaurantCreate,
    ) -> Result<RestaurantId, RestaurantError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_restaurant(
        &self,
        id: RestaurantId,
        update: UpdateRestaurantRequest,
    ) -> Result<Restaurant, RestaurantError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Restaurant> for RestaurantClient {
    type Error = RestaurantError;

    fn inner(&self) -> &ResourceClient<Restaurant> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<RestaurantError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => RestaurantError::NotFound(id),
            Err(other) => RestaurantError::Unavailable(other.to_string()),
        }
    }
}
