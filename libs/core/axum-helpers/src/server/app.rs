use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::security::security_headers;
use axum::{Json, Router, middleware, routing::get};
use core_config::server::ServerConfig;
use std::future::IntoFuture;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

/// Path the OpenAPI document is served from.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Starts the Axum server and shuts it down gracefully on SIGINT/SIGTERM.
///
/// In-flight requests get `server_config.shutdown_timeout` to finish once a
/// signal arrives.
///
/// # Errors
/// Returns an error if:
/// - The TCP listener fails to bind to the configured address
/// - The server encounters an error during operation
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use core_config::server::ServerConfig;
/// use axum_helpers::server::create_app;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let router = Router::new();
///     create_app(router, &ServerConfig::default()).await?;
///     Ok(())
/// }
/// ```
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = TcpListener::bind(server_config.address()).await?;
    let coordinator = ShutdownCoordinator::default();

    let signal_handle = coordinator.clone();
    tokio::spawn(async move {
        signal_handle.wait_for_signal().await;
    });

    serve(listener, router, coordinator, server_config.shutdown_timeout).await
}

/// Serves `router` on an already bound listener until `coordinator` signals shutdown.
///
/// After the signal, open connections are drained for at most `shutdown_timeout`.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    coordinator: ShutdownCoordinator,
    shutdown_timeout: Duration,
) -> io::Result<()> {
    info!("Server starting on {}", listener.local_addr()?);

    let graceful = {
        let coordinator = coordinator.clone();
        async move { coordinator.wait_for_shutdown().await }
    };

    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(graceful)
        .into_future();
    tokio::pin!(server);

    let drain_deadline = async {
        coordinator.wait_for_shutdown().await;
        info!("Draining connections (timeout: {:?})", shutdown_timeout);
        tokio::time::sleep(shutdown_timeout).await;
    };

    tokio::select! {
        result = &mut server => {
            result.inspect_err(|e| {
                tracing::error!("Server encountered an error: {:?}", e);
            })?;
            info!("Server stopped");
            Ok(())
        }
        _ = drain_deadline => {
            warn!(
                "Graceful shutdown exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            );
            Ok(())
        }
    }
}

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - The OpenAPI document of `T` at [`OPENAPI_PATH`]
/// - The given API routes, merged at the root
/// - Common middleware (tracing, security headers, compression)
/// - 404 fallback handler
///
/// Domain routers should apply their own state before being passed in.
///
/// # Example
/// ```ignore
/// use utoipa::OpenApi;
/// use axum_helpers::server::create_router;
///
/// #[derive(OpenApi)]
/// #[openapi(paths(/* your paths */))]
/// struct ApiDoc;
///
/// let router = create_router::<ApiDoc>(api_routes);
/// ```
pub fn create_router<T>(apis: Router) -> Router
where
    T: OpenApi + 'static,
{
    let document = T::openapi();

    Router::new()
        .route(OPENAPI_PATH, get(move || async move { Json(document) }))
        .merge(apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(CompressionLayer::new())
}
