//! # Category Client
//!
//! Typed wrapper around `ResourceClient<MenuCategory>`.

use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::menu_actor::MenuError;
use crate::model::{CategoryId, CreateCategoryRequest, MenuCategory};
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct CategoryClient {
    inner: ResourceClient<MenuCategory>,
}

impl CategoryClient {
    pub fn new(inner: ResourceClient<MenuCategory>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_category(
        &self,
        request: CreateCategoryRequest,
    ) -> Result<CategoryId, MenuError> {
        debug!("Sending request");
        self.inner.create(request).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<MenuCategory> for CategoryClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<MenuCategory> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<MenuError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => MenuError::CategoryNotFound(id),
            Err(other) => MenuError::Unavailable(other.to_string()),
        }
    }
}
