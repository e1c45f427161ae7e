//! # Generic Actor Server
//!
//! `ResourceActor` owns the in-memory store for one entity type and processes
//! requests one at a time, so no entity is ever observed half-written.

use super::client::ResourceClient;
use super::entity::ActorEntity;
use super::error::FrameworkError;
use super::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// Each actor runs in its own Tokio task and drains its channel sequentially,
/// which gives every request exclusive access to the store without locks.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2. **Wire**: pass dependencies into `actor.run(context)`.
/// 3. **Run**: spawn the run loop.
///
/// # Operations
///
/// * **Create**: next id from the counter, `from_create_params`, `on_create`,
///   then insert. A failure at any step inserts nothing.
/// * **Get**: clone of the stored entity, or `None`.
/// * **List**: clones of every entity whose `matches(filter)` is true.
/// * **Update** / **Action**: the hook runs on a working copy which replaces
///   the stored entity only on success.
/// * **Delete**: `on_delete` may veto; otherwise the entity is removed.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the channel capacity; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        // "MenuItem" rather than "quickbite::model::menu::MenuItem"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    let created = match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => match item.on_create(&context).await {
                            Ok(()) => Ok(item),
                            Err(e) => {
                                warn!(entity_type, error = %e, "on_create failed");
                                Err(e)
                            }
                        },
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            Err(e)
                        }
                    };

                    match created {
                        Ok(item) => {
                            self.next_id += 1;
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| item.matches(&filter))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?filter, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut draft = item.clone();
                    match draft.on_update(update, &context).await {
                        Ok(()) => {
                            *item = draft;
                            info!(entity_type, %id, "Updated");
                            let _ = respond_to.send(Ok(item.clone()));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut draft = item.clone();
                    let result = match draft.handle_action(action, &context).await {
                        Ok(result) => {
                            *item = draft;
                            info!(entity_type, %id, "Action ok");
                            Ok(result)
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            Err(FrameworkError::EntityError(Box::new(e)))
                        }
                    };
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Ticket {
        id: u32,
        title: String,
        stamps: Vec<String>,
        closed: bool,
    }

    #[derive(Debug)]
    struct TicketCreate {
        title: String,
    }

    #[derive(Debug)]
    struct TicketUpdate {
        title: String,
    }

    #[derive(Debug)]
    enum TicketAction {
        /// Appends a stamp, then fails if the ticket is closed.
        Stamp(String),
        Close,
    }

    #[derive(Debug)]
    enum TicketFilter {
        Open,
    }

    #[derive(Debug, thiserror::Error, PartialEq)]
    enum TicketError {
        #[error("title is required")]
        EmptyTitle,
        #[error("ticket is closed")]
        Closed,
    }

    #[async_trait]
    impl ActorEntity for Ticket {
        type Id = u32;
        type Create = TicketCreate;
        type Update = TicketUpdate;
        type Action = TicketAction;
        type ActionResult = usize;
        type Filter = TicketFilter;
        type Context = ();
        type Error = TicketError;

        fn from_create_params(id: u32, params: TicketCreate) -> Result<Self, TicketError> {
            if params.title.is_empty() {
                return Err(TicketError::EmptyTitle);
            }
            Ok(Self {
                id,
                title: params.title,
                stamps: Vec::new(),
                closed: false,
            })
        }

        fn matches(&self, filter: &TicketFilter) -> bool {
            match filter {
                TicketFilter::Open => !self.closed,
            }
        }

        async fn on_update(&mut self, update: TicketUpdate, _ctx: &()) -> Result<(), TicketError> {
            self.title = update.title;
            if self.title.is_empty() {
                return Err(TicketError::EmptyTitle);
            }
            Ok(())
        }

        async fn on_delete(&self, _ctx: &()) -> Result<(), TicketError> {
            if self.closed {
                return Err(TicketError::Closed);
            }
            Ok(())
        }

        async fn handle_action(&mut self, action: TicketAction, _ctx: &()) -> Result<usize, TicketError> {
            match action {
                TicketAction::Stamp(stamp) => {
                    self.stamps.push(stamp);
                    if self.closed {
                        return Err(TicketError::Closed);
                    }
                    Ok(self.stamps.len())
                }
                TicketAction::Close => {
                    self.closed = true;
                    Ok(self.stamps.len())
                }
            }
        }
    }

    fn spawn_tickets() -> ResourceClient<Ticket> {
        let (actor, client) = ResourceActor::<Ticket>::new(10);
        tokio::spawn(actor.run(()));
        client
    }

    #[tokio::test]
    async fn test_resource_actor_crud_and_actions() {
        let client = spawn_tickets();

        let id = client
            .create(TicketCreate { title: "fryer".into() })
            .await
            .unwrap();
        assert_eq!(id, 1);

        let stamps = client
            .perform_action(id, TicketAction::Stamp("seen".into()))
            .await
            .unwrap();
        assert_eq!(stamps, 1);

        let updated = client
            .update(id, TicketUpdate { title: "grill".into() })
            .await
            .unwrap();
        assert_eq!(updated.title, "grill");

        client.delete(id).await.unwrap();
        assert!(client.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_create_does_not_consume_an_id() {
        let client = spawn_tickets();

        let err = client
            .create(TicketCreate { title: String::new() })
            .await
            .unwrap_err();
        assert_eq!(err.into_entity_error::<TicketError>().unwrap(), TicketError::EmptyTitle);

        let id = client.create(TicketCreate { title: "ok".into() }).await.unwrap();
        assert_eq!(id, 1);
    }

    #[tokio::test]
    async fn test_failed_hooks_leave_stored_entity_untouched() {
        let client = spawn_tickets();
        let id = client.create(TicketCreate { title: "oven".into() }).await.unwrap();
        client.perform_action(id, TicketAction::Close).await.unwrap();

        // Stamp mutates the draft before failing.
        let err = client
            .perform_action(id, TicketAction::Stamp("late".into()))
            .await
            .unwrap_err();
        assert_eq!(err.into_entity_error::<TicketError>().unwrap(), TicketError::Closed);

        // Update assigns the title before failing.
        assert!(client
            .update(id, TicketUpdate { title: String::new() })
            .await
            .is_err());

        let stored = client.get(id).await.unwrap().unwrap();
        assert!(stored.stamps.is_empty());
        assert_eq!(stored.title, "oven");
    }

    #[tokio::test]
    async fn test_on_delete_can_veto() {
        let client = spawn_tickets();
        let id = client.create(TicketCreate { title: "sink".into() }).await.unwrap();
        client.perform_action(id, TicketAction::Close).await.unwrap();

        assert!(client.delete(id).await.is_err());
        assert!(client.get(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_applies_filter() {
        let client = spawn_tickets();
        let a = client.create(TicketCreate { title: "a".into() }).await.unwrap();
        let b = client.create(TicketCreate { title: "b".into() }).await.unwrap();
        client.perform_action(a, TicketAction::Close).await.unwrap();

        let open = client.list(TicketFilter::Open).await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, b);
    }

    #[tokio::test]
    async fn test_missing_entity_reports_not_found() {
        let client = spawn_tickets();
        let err = client
            .update(42, TicketUpdate { title: "x".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, FrameworkError::NotFound(id) if id == "42"));
    }
}
