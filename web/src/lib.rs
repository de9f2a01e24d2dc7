//! HTTP surface for the rpi2c I2C bridge
//!
//! A small axum application with three groups of routes:
//!
//! - `POST /i2c` — the plain REST endpoint taking an `I2cCommand`
//! - `GET /tools/list`, `POST /tools/call` — HTTP mirrors of the MCP
//!   tool surface
//! - `GET|POST /api/scan/tools`, `GET /api/scan/info` — discovery
//!   endpoints for MCP server scanners, mirroring the tool routes
//!
//! Tool-call outcomes are always HTTP 200 with `isError` in the body; the
//! plain REST endpoint maps failures to 400.

pub mod routes;
pub mod state;

pub use routes::router;
pub use state::{AppState, ServerInfo};

use std::net::SocketAddr;
use tracing::info;

/// Bind and serve the bridge until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(addr = %addr, "HTTP server listening");

    axum::serve(listener, app).await
}
