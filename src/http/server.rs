//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with a single dispatching handler
//! - Wire up middleware (request ID, access log, tracing)
//! - Enforce the body limit only where a handler reads the body
//! - Bind server to listener with graceful shutdown
//! - Hand escalator-requested terminations to the terminator

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::escalator::{counter_for, Escalator};
use crate::handlers;
use crate::http::middleware::log_request;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::response::method_not_allowed;
use crate::lifecycle::termination::Terminator;
use crate::routing::{Dispatcher, InvalidVerb, Route};
use crate::store::Store;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub escalator: Arc<Escalator>,
    pub store: Arc<dyn Store>,
    pub terminator: Arc<dyn Terminator>,
    /// Largest body a create handler will buffer.
    pub max_body_bytes: usize,
}

/// HTTP server for the strange errors API.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Build the server around an opened store and a terminator.
    pub fn new(
        config: &ServerConfig,
        store: Arc<dyn Store>,
        terminator: Arc<dyn Terminator>,
    ) -> Result<Self, InvalidVerb> {
        let dispatcher = Arc::new(Dispatcher::from_config(&config.routing)?);
        let escalator = Arc::new(Escalator::new(
            counter_for(config.escalator.counter),
            store.clone(),
            Duration::from_millis(config.escalator.termination_delay_ms),
        ));

        let state = AppState {
            dispatcher,
            escalator,
            store,
            terminator,
            max_body_bytes: config.limits.max_body_bytes,
        };

        let router = Self::build_router(state.clone());
        Ok(Self { router, state })
    }

    /// Layers run outside-in: request id, propagation, trace span, access
    /// log, dispatch. No global body limit: only the create routes read a body.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(middleware::from_fn(log_request))
            .layer(TraceLayer::new_for_http())
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// The configured router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Shared state, including the escalator whose count tests inspect.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Classify the request and hand it to exactly one handler.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let route = state
        .dispatcher
        .classify(request.method(), request.uri().path());

    tracing::debug!(route = route.name(), "Dispatching");

    match route {
        Route::Escalator => handlers::goat::invoke(&state).await,
        Route::HealthCheck => handlers::health::check(),
        Route::ListArticles => handlers::articles::list(&state).await,
        Route::CreateArticle => {
            let body = read_body(request, state.max_body_bytes).await;
            handlers::articles::create(&state, body.as_deref()).await
        }
        Route::DeleteArticle { id } => handlers::articles::delete(&state, &id).await,
        Route::CreateUser => {
            let body = read_body(request, state.max_body_bytes).await;
            handlers::users::create(&state, body.as_deref()).await
        }
        Route::ListUsers => handlers::users::list(&state).await,
        Route::MethodNotAllowed => method_not_allowed(),
        Route::NotFound => handlers::not_found(),
    }
}

/// Buffer at most `limit` bytes of the body. `None` when the body is larger
/// or the stream fails.
async fn read_body(request: Request<Body>, limit: usize) -> Option<Vec<u8>> {
    match axum::body::to_bytes(request.into_body(), limit).await {
        Ok(bytes) => Some(bytes.to_vec()),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read request body");
            None
        }
    }
}
