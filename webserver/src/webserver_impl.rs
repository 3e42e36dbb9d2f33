//! Main webserver implementation
//!
//! Wires the catalog into an axum router and serves it until shutdown.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::sync::mpsc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use shared::{component_info, logging, Component};

use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::traits::CatalogService;
use crate::web::handlers::api;

/// Main webserver struct with dependency injection
pub struct WebServer<C: CatalogService> {
    state: WebServerState<C>,
    shutdown_tx: mpsc::Sender<()>,
    shutdown_rx: mpsc::Receiver<()>,
}

impl<C: CatalogService> WebServer<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        Self {
            state: WebServerState::new(catalog),
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        router(self.state.clone())
    }

    /// Sender that stops `run` gracefully
    pub fn get_shutdown_sender(&self) -> mpsc::Sender<()> {
        self.shutdown_tx.clone()
    }

    pub fn state(&self) -> &WebServerState<C> {
        &self.state
    }

    /// Bind `addr` and serve until a shutdown message arrives
    pub async fn run(self, addr: SocketAddr) -> WebServerResult<()> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| WebServerError::ServerStartupFailed {
                address: addr.to_string(),
                message: e.to_string(),
            })?;

        let mut shutdown_rx = self.shutdown_rx;
        let router = router(self.state);
        serve(listener, router, async move {
            let _ = shutdown_rx.recv().await;
        })
        .await
    }
}

/// Catalog routes; the static `/countries/image` path takes precedence over `/countries/:name`
pub fn router<C: CatalogService>(state: WebServerState<C>) -> Router {
    Router::new()
        .route("/countries/refresh", post(api::refresh_countries::<C>))
        .route("/countries", get(api::list_countries::<C>))
        .route("/countries/image", get(api::summary_image::<C>))
        .route(
            "/countries/:name",
            get(api::get_country::<C>).delete(api::delete_country::<C>),
        )
        .route("/status", get(api::get_status::<C>))
        .route("/health", get(api::health_check::<C>))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .into_inner(),
        )
        .with_state(state)
}

async fn serve<F>(listener: tokio::net::TcpListener, router: Router, shutdown: F) -> WebServerResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local = listener.local_addr()?;
    logging::log_startup(Component::WebServer, &format!("listening on http://{local}"));

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    component_info!(Component::WebServer, "HTTP server stopped accepting connections");
    Ok(())
}
