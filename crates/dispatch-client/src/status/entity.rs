//! [`ActorEntity`] implementation for [`StatusPresenter`].

use super::banner::Banner;
use super::error::StatusError;
use super::sink::BannerSink;
use async_trait::async_trait;
use dispatch_actor::ActorEntity;
use std::sync::Arc;
use tracing::debug;

/// Holds the current banner. Every write replaces the previous one.
#[derive(Debug, Default)]
pub struct StatusPresenter {
    banner: Option<Banner>,
    revision: u64,
}

#[derive(Debug, Clone)]
pub enum StatusAction {
    Show(Banner),
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub banner: Option<Banner>,
    /// Number of writes since the last reset.
    pub revision: u64,
}

impl StatusPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActorEntity for StatusPresenter {
    type Action = StatusAction;
    type ActionResult = u64;
    type Snapshot = StatusSnapshot;
    type Context = Arc<dyn BannerSink>;
    type Error = StatusError;

    fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            banner: self.banner.clone(),
            revision: self.revision,
        }
    }

    async fn handle_action(
        &mut self,
        action: StatusAction,
        sink: &Arc<dyn BannerSink>,
    ) -> Result<u64, StatusError> {
        self.banner = match action {
            StatusAction::Show(banner) => Some(banner),
            StatusAction::Clear => None,
        };
        self.revision += 1;
        debug!(revision = self.revision, "Banner replaced");
        sink.render(self.banner.as_ref());
        Ok(self.revision)
    }

    async fn on_reset(&mut self, sink: &Arc<dyn BannerSink>) -> Result<(), StatusError> {
        self.banner = None;
        self.revision = 0;
        sink.render(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::MemorySink;

    #[tokio::test]
    async fn test_last_write_wins() {
        let memory = Arc::new(MemorySink::new());
        let sink: Arc<dyn BannerSink> = memory.clone();
        let mut presenter = StatusPresenter::new();

        presenter
            .handle_action(StatusAction::Show(Banner::Acquiring), &sink)
            .await
            .unwrap();
        let revision = presenter
            .handle_action(StatusAction::Show(Banner::LocationUnavailable), &sink)
            .await
            .unwrap();

        assert_eq!(revision, 2);
        assert_eq!(presenter.snapshot().banner, Some(Banner::LocationUnavailable));
        assert_eq!(memory.renders().len(), 2);
        assert_eq!(memory.current(), Some(Banner::LocationUnavailable));

        presenter.on_reset(&sink).await.unwrap();
        assert_eq!(
            presenter.snapshot(),
            StatusSnapshot {
                banner: None,
                revision: 0
            }
        );
        assert_eq!(memory.current(), None);
    }
}
