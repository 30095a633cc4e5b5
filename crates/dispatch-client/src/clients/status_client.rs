//! # Status Client
//!
//! High-level API for the [`StatusPresenter`] actor.
use crate::status::{Banner, StatusAction, StatusError, StatusPresenter};
use async_trait::async_trait;
use dispatch_actor::{ActorClient, ComponentClient, FrameworkError};
use tracing::{debug, instrument};

#[derive(Clone, Debug)]
pub struct StatusClient {
    inner: ComponentClient<StatusPresenter>,
}

impl StatusClient {
    pub fn new(inner: ComponentClient<StatusPresenter>) -> Self {
        Self { inner }
    }

    /// Replaces the current banner. Returns the new revision.
    #[instrument(skip(self), fields(level = ?banner.level()))]
    pub async fn show(&self, banner: Banner) -> Result<u64, StatusError> {
        debug!("Sending request");
        self.inner
            .perform_action(StatusAction::Show(banner))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<u64, StatusError> {
        debug!("Sending request");
        self.inner
            .perform_action(StatusAction::Clear)
            .await
            .map_err(Self::map_error)
    }

    /// The banner currently shown, if any.
    pub async fn current(&self) -> Result<Option<Banner>, StatusError> {
        Ok(self.snapshot().await?.banner)
    }
}

#[async_trait]
impl ActorClient<StatusPresenter> for StatusClient {
    type Error = StatusError;

    fn inner(&self) -> &ComponentClient<StatusPresenter> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        StatusError::ActorCommunicationError(e.to_string())
    }
}
