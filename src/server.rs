//! Local static file server for testing PWA installability.

use crate::config::ServerConfig;
use crate::utils::error::Result;
use crate::utils::http::{
    list_directory, rewrite_root, service_worker_scope, SERVICE_WORKER_ALLOWED,
};
use axum::handler::HandlerWithoutStateExt;
use axum::http::Uri;
use axum::{middleware, Router};
use std::future::Future;
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

/// Build the request pipeline for a serve root.
pub fn router(root: &Path) -> Router {
    let listing_root = root.to_path_buf();
    // Directories without an index.html fall through to a generated listing.
    let listing = move |uri: Uri| {
        let root = listing_root.clone();
        async move { list_directory(&root, &uri).await }
    };

    Router::new()
        .fallback_service(ServeDir::new(root).fallback(listing.into_service()))
        // Middleware (order matters - bottom runs first)
        .layer(middleware::map_request(rewrite_root))
        .layer(SetResponseHeaderLayer::overriding(
            SERVICE_WORKER_ALLOWED,
            service_worker_scope(),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Serve `root` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, root: &Path, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(root))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

pub async fn run(config: ServerConfig) -> Result<()> {
    config.validate()?;

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Serving {} on {}", config.root.display(), addr);

    print_checklist(config.port);

    serve(listener, &config.root, shutdown_signal()).await?;

    println!("\n\nServer stopped");
    Ok(())
}

fn print_checklist(port: u16) {
    println!("Server running at http://localhost:{}", port);
    println!("To test PWA installation:");
    println!("   1. Open Chrome/Edge at http://localhost:{}", port);
    println!("   2. Open DevTools (F12) -> Application tab -> Manifest");
    println!("   3. Check for 'Install' button in address bar");
    println!("\nPress Ctrl+C to stop");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a handler the only way out is killing the process.
        error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
}
