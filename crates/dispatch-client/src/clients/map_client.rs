//! # Map Client
//!
//! High-level API for the [`MapView`] actor. Wraps a `ComponentClient<MapView>` and
//! unpacks each action's result into a plain return value.
use crate::map_view::{
    LayerId, MapAction, MapActionResult, MapError, MapView, MarkerStyle, Popup, Viewport,
};
use crate::model::{Bounds, Coord};
use async_trait::async_trait;
use dispatch_actor::{ActorClient, ComponentClient, FrameworkError};
use tracing::{debug, instrument};

/// Layers added by [`MapClient::draw_route`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnRoute {
    pub origin_marker: LayerId,
    pub destination_marker: LayerId,
    pub line: LayerId,
    pub bounds: Bounds,
}

#[derive(Clone, Debug)]
pub struct MapClient {
    inner: ComponentClient<MapView>,
}

impl MapClient {
    pub fn new(inner: ComponentClient<MapView>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, popup))]
    pub async fn place_marker(
        &self,
        coord: Coord,
        style: MarkerStyle,
        popup: Popup,
    ) -> Result<LayerId, MapError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(MapAction::PlaceMarker { coord, style, popup })
            .await
            .map_err(Self::map_error)?
        {
            MapActionResult::MarkerPlaced(id) => Ok(id),
            _ => Err(MapError::UnexpectedReply("PlaceMarker")),
        }
    }

    /// Origin marker, destination marker and the line between them.
    #[instrument(skip(self, destination_label))]
    pub async fn draw_route(
        &self,
        origin: Coord,
        destination: Coord,
        destination_label: impl Into<String> + Send,
    ) -> Result<DrawnRoute, MapError> {
        debug!("Sending request");
        let action = MapAction::DrawRoute {
            origin,
            destination,
            destination_label: destination_label.into(),
        };
        match self.inner.perform_action(action).await.map_err(Self::map_error)? {
            MapActionResult::RouteDrawn {
                origin_marker,
                destination_marker,
                line,
                bounds,
            } => Ok(DrawnRoute {
                origin_marker,
                destination_marker,
                line,
                bounds,
            }),
            _ => Err(MapError::UnexpectedReply("DrawRoute")),
        }
    }

    #[instrument(skip(self))]
    pub async fn fit_bounds(&self, region: Bounds) -> Result<Viewport, MapError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(MapAction::FitBounds(region))
            .await
            .map_err(Self::map_error)?
        {
            MapActionResult::ViewportChanged(viewport) => Ok(viewport),
            _ => Err(MapError::UnexpectedReply("FitBounds")),
        }
    }

    /// Removes all overlays and returns how many there were.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<usize, MapError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(MapAction::Clear)
            .await
            .map_err(Self::map_error)?
        {
            MapActionResult::Cleared(removed) => Ok(removed),
            _ => Err(MapError::UnexpectedReply("Clear")),
        }
    }
}

#[async_trait]
impl ActorClient<MapView> for MapClient {
    type Error = MapError;

    fn inner(&self) -> &ComponentClient<MapView> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<MapError>() {
                Ok(map_error) => *map_error,
                Err(other) => MapError::ActorCommunicationError(other.to_string()),
            },
            other => MapError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_actor::mock::{create_mock_client, expect_action, MockClient};

    #[tokio::test]
    async fn test_draw_route_unpacks_result() {
        let (client, mut receiver) = create_mock_client::<MapView>(10);
        let map_client = MapClient::new(client);

        let bounds = Bounds::from_points(Coord::new(28.6, 77.2), Coord::new(28.7, 77.1));
        let task = tokio::spawn(async move {
            map_client
                .draw_route(Coord::new(28.6, 77.2), Coord::new(28.7, 77.1), "WH-Delhi")
                .await
        });

        let (action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        match action {
            MapAction::DrawRoute {
                destination_label, ..
            } => assert_eq!(destination_label, "WH-Delhi"),
            other => panic!("Expected DrawRoute, got {other:?}"),
        }
        responder
            .send(Ok(MapActionResult::RouteDrawn {
                origin_marker: 1,
                destination_marker: 2,
                line: 3,
                bounds,
            }))
            .unwrap();

        let route = task.await.unwrap().unwrap();
        assert_eq!(route.line, 3);
        assert_eq!(route.bounds, bounds);
    }

    #[tokio::test]
    async fn test_entity_error_is_unwrapped() {
        let mut mock = MockClient::<MapView>::new();
        let bad = Coord::new(f64::INFINITY, 0.0);
        mock.expect_action()
            .return_err(FrameworkError::entity(MapError::InvalidCoordinate(bad)));

        let map_client = MapClient::new(mock.client());
        let result = map_client
            .place_marker(bad, MarkerStyle::Origin, Popup::new("a", "b"))
            .await;

        assert_eq!(result, Err(MapError::InvalidCoordinate(bad)));
        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_reply_is_an_error() {
        let mut mock = MockClient::<MapView>::new();
        mock.expect_action().return_ok(MapActionResult::Cleared(0));

        let map_client = MapClient::new(mock.client());
        let result = map_client
            .fit_bounds(Bounds::from_points(Coord::new(0.0, 0.0), Coord::new(1.0, 1.0)))
            .await;

        assert_eq!(result, Err(MapError::UnexpectedReply("FitBounds")));
        assert!(matches!(mock.received_actions()[0], MapAction::FitBounds(_)));
    }

    #[tokio::test]
    async fn test_closed_actor_maps_to_communication_error() {
        let mut mock = MockClient::<MapView>::new();
        mock.expect_action().return_err(FrameworkError::ActorClosed);

        let map_client = MapClient::new(mock.client());
        assert!(matches!(
            map_client.clear().await,
            Err(MapError::ActorCommunicationError(_))
        ));
    }
}
