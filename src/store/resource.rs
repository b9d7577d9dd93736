use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::api::{ApiClient, ApiError, Envelope};
use crate::models::{Entity, Identified};
use crate::mvi::Reducer;
use crate::validation::{Schema, Validated};

use super::error::StoreError;
use super::intent::ResourceIntent;
use super::reducer::ResourceReducer;
use super::state::ResourceState;

/// Endpoint paths of one resource. Missing operations are `None`.
#[derive(Debug, Clone, Copy)]
pub struct Endpoints {
    pub list: &'static str,
    pub show: Option<&'static str>,
    pub create: Option<&'static str>,
    pub update: &'static str,
    pub delete: &'static str,
}

/// Static description of a server collection.
pub trait Resource: Send + Sync + 'static {
    type Entity: Entity;
    type Draft: Schema + Serialize + Send + Sync;
    type Patch: Schema + Serialize + Send + Sync;

    /// Plural name used in logs and errors.
    const NAME: &'static str;
    /// Key carrying the entity in mutation responses.
    const ENVELOPE: &'static str;
    const ENDPOINTS: Endpoints;
}

/// Update body: the patch fields with the target `_id` merged in.
#[derive(Serialize)]
struct WithId<'a, P> {
    #[serde(rename = "_id")]
    id: &'a str,
    #[serde(flatten)]
    patch: &'a P,
}

/// Client-side cache of one resource collection.
///
/// Clones share state. Operations may run concurrently; each response is
/// folded into the state as it lands.
pub struct ResourceStore<R: Resource> {
    api: ApiClient,
    state: Arc<watch::Sender<ResourceState<R::Entity>>>,
}

impl<R: Resource> Clone for ResourceStore<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<R: Resource> ResourceStore<R> {
    pub fn new(api: ApiClient) -> Self {
        let (state, _) = watch::channel(ResourceState::default());
        Self {
            api,
            state: Arc::new(state),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ResourceState<R::Entity> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<R::Entity>> {
        self.state.subscribe()
    }

    pub fn dispatch(&self, intent: ResourceIntent<R::Entity>) {
        self.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = ResourceReducer::reduce(current, intent);
        });
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Marks the store loading, awaits `request` and records a failure.
    ///
    /// Success intents are dispatched by the caller.
    pub(crate) async fn track<T, E, F>(
        &self,
        operation: &'static str,
        request: F,
    ) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<StoreError>,
    {
        self.dispatch(ResourceIntent::Started);
        request.await.map_err(|error| self.fail(operation, error.into()))
    }

    /// Records `error` in state without issuing a request.
    pub(crate) fn fail(&self, operation: &'static str, error: StoreError) -> StoreError {
        tracing::warn!(
            resource = R::NAME,
            operation,
            error = %error,
            "Operation failed"
        );
        self.dispatch(ResourceIntent::Failed {
            message: error.user_message(),
        });
        error
    }

    fn unsupported(&self, operation: &'static str) -> StoreError {
        self.fail(
            operation,
            StoreError::Unsupported {
                resource: R::NAME,
                operation,
            },
        )
    }

    /// Pulls the entity out of a mutation response.
    pub(crate) fn entity_from(
        envelope: &mut Envelope,
        path: &str,
    ) -> Result<Option<R::Entity>, StoreError> {
        envelope.take(R::ENVELOPE).map_err(|source| {
            StoreError::Api(ApiError::Decode {
                path: path.to_string(),
                source,
            })
        })
    }

    /// Applies an entity returned by a side operation (like, pay) as an update.
    pub(crate) async fn apply_returned<F>(
        &self,
        operation: &'static str,
        path: &'static str,
        request: F,
    ) -> Result<Option<R::Entity>, StoreError>
    where
        F: Future<Output = Result<Envelope, ApiError>>,
    {
        let (entity, message) = self
            .track(operation, async {
                let mut envelope = request.await?;
                let entity = Self::entity_from(&mut envelope, path)?;
                Ok::<_, StoreError>((entity, envelope.message))
            })
            .await?;
        self.dispatch(ResourceIntent::Updated {
            entity: entity.clone(),
            message,
        });
        Ok(entity)
    }

    /// Loads a filtered list into `scoped`.
    pub(crate) async fn load_scoped<F>(
        &self,
        operation: &'static str,
        request: F,
    ) -> Result<Vec<R::Entity>, StoreError>
    where
        F: Future<Output = Result<Vec<R::Entity>, ApiError>>,
    {
        let items = self.track(operation, request).await?;
        tracing::debug!(
            resource = R::NAME,
            operation,
            count = items.len(),
            "Scoped list loaded"
        );
        self.dispatch(ResourceIntent::ScopedListed {
            items: items.clone(),
        });
        Ok(items)
    }

    /// Replaces `items` with the server's full collection.
    pub async fn fetch_all(&self) -> Result<Vec<R::Entity>, StoreError> {
        let path = R::ENDPOINTS.list;
        let items: Vec<R::Entity> = self
            .track("fetch_all", self.api.get(path, None))
            .await?;
        tracing::debug!(resource = R::NAME, count = items.len(), "Collection loaded");
        self.dispatch(ResourceIntent::Listed {
            items: items.clone(),
        });
        Ok(items)
    }

    /// Loads one entity into `selected`.
    pub async fn fetch_one(&self, id: &str) -> Result<R::Entity, StoreError> {
        let Some(path) = R::ENDPOINTS.show else {
            return Err(self.unsupported("fetch_one"));
        };
        let entity: R::Entity = self
            .track("fetch_one", self.api.get(path, Some(id)))
            .await?;
        self.dispatch(ResourceIntent::Selected {
            entity: entity.clone(),
        });
        Ok(entity)
    }

    /// Submits a new entity and appends the server's copy of it.
    pub async fn create(&self, draft: Validated<R::Draft>) -> Result<R::Entity, StoreError> {
        let Some(path) = R::ENDPOINTS.create else {
            return Err(self.unsupported("create"));
        };
        let (entity, message) = self
            .track("create", async {
                let mut envelope: Envelope = self.api.post(path, None, &draft).await?;
                let entity = Self::entity_from(&mut envelope, path)?.ok_or(
                    StoreError::MissingEntity {
                        resource: R::NAME,
                        operation: "create",
                        key: R::ENVELOPE,
                    },
                )?;
                Ok::<_, StoreError>((entity, envelope.message))
            })
            .await?;
        tracing::info!(resource = R::NAME, id = entity.id(), "Created");
        self.dispatch(ResourceIntent::Created {
            entity: entity.clone(),
            message,
        });
        Ok(entity)
    }

    /// Updates `id` and replaces the cached copy with the server's.
    ///
    /// A response without the entity succeeds but changes nothing locally.
    pub async fn update(
        &self,
        id: &str,
        patch: Validated<R::Patch>,
    ) -> Result<Option<R::Entity>, StoreError> {
        let path = R::ENDPOINTS.update;
        let body = WithId {
            id,
            patch: &*patch,
        };
        let (entity, message) = self
            .track("update", async {
                let mut envelope: Envelope = self.api.put(path, &body).await?;
                let entity = Self::entity_from(&mut envelope, path)?;
                Ok::<_, StoreError>((entity, envelope.message))
            })
            .await?;
        tracing::info!(
            resource = R::NAME,
            id,
            applied = entity.is_some(),
            "Updated"
        );
        self.dispatch(ResourceIntent::Updated {
            entity: entity.clone(),
            message,
        });
        Ok(entity)
    }

    /// Deletes `id` on the server, then drops it locally.
    pub async fn remove(&self, id: &str) -> Result<Option<String>, StoreError> {
        let path = R::ENDPOINTS.delete;
        let envelope: Envelope = self
            .track("remove", self.api.delete(path, id))
            .await?;
        tracing::info!(resource = R::NAME, id, "Removed");
        self.dispatch(ResourceIntent::Removed {
            id: id.to_string(),
            message: envelope.message.clone(),
        });
        Ok(envelope.message)
    }
}
