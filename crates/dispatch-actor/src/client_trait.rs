//! # ActorClient Trait
//!
//! Common interface for component-specific clients: default `snapshot` and `reset`
//! built on top of the generic [`ComponentClient`].
use crate::{ActorEntity, ComponentClient, FrameworkError};
use async_trait::async_trait;

/// Trait for component-specific clients to inherit the generic operations.
///
/// Implementors supply the inner client and an error mapping; `snapshot()` and
/// `reset()` come for free.
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<MapView> for MapClient {
///     type Error = MapError;
///     fn inner(&self) -> &ComponentClient<MapView> { &self.inner }
///     fn map_error(e: FrameworkError) -> MapError { MapError::ActorCommunicationError(e.to_string()) }
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The component-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &ComponentClient<T>;

    /// Map framework errors to the component error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Read the component's current state.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<T::Snapshot, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().snapshot().await.map_err(Self::map_error)
    }

    /// Return the component to its initial state.
    #[tracing::instrument(skip(self))]
    async fn reset(&self) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().reset().await.map_err(Self::map_error)
    }
}
