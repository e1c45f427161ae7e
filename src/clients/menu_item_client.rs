//! # Menu Item Client
//!
//! Typed wrapper around `ResourceClient<MenuItem>`.

use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::menu_actor::MenuError;
use crate::model::{CreateMenuItemRequest, MenuItem, MenuItemId, UpdateMenuItemRequest};
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct MenuItemClient {
    inner: ResourceClient<MenuItem>,
}

impl MenuItemClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_item(&self, request: CreateMenuItemRequest) -> Result<MenuItemId, MenuError> {
        debug!("Sending request");
        self.inner.create(request).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        id: MenuItemId,
        update: UpdateMenuItemRequest,
    ) -> Result<MenuItem, MenuError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<MenuItem> for MenuItemClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<MenuError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => MenuError::ItemNotFound(id),
            Err(other) => MenuError::Unavailable(other.to_string()),
        }
    }
}
