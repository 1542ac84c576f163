//! Web interface with a summarization tab and a Q&A tab.
//!
//! Every submission is handled statelessly: the source is extracted again
//! and an uploaded PDF travels back to the browser as base64 so follow-up
//! questions can reuse it.

mod handlers;
mod pages;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;

use crate::config::ServerConfig;
use crate::context::AppContext;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub ctx: AppContext,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(ctx: AppContext, config: &ServerConfig) -> Self {
        Self {
            ctx,
            max_upload_bytes: config.max_upload_bytes(),
        }
    }
}

/// Start the web server.
pub async fn serve(
    ctx: AppContext,
    config: &ServerConfig,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    let app = create_router(AppState::new(ctx, config));

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
