use std::net::SocketAddr;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use prometheus::{Encoder, TextEncoder};

use crate::error::{Error, Result};

const LANDING_PAGE: &str = r#"<html>
<head><title>cgroup memory exporter</title></head>
<body>
<h1>cgroup memory exporter</h1>
<p><a href="/metrics">Metrics</a></p>
</body>
</html>
"#;

async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

async fn export_metrics(State(registry): State<prometheus::Registry>) -> Response {
    // sysfs reads are blocking
    let encoded = tokio::task::spawn_blocking(move || {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder
            .encode(&registry.gather(), &mut buffer)
            .map(|()| buffer)
    })
    .await;

    match encoded {
        Ok(Ok(body)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
            body,
        )
            .into_response(),
        Ok(Err(err)) => {
            log::error!("Failed to encode metrics: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to encode metrics").into_response()
        }
        Err(err) => {
            log::error!("Metrics collection task failed: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to collect metrics").into_response()
        }
    }
}

pub struct APIServer {
    router: axum::Router,
}

impl APIServer {
    pub fn new(registry: prometheus::Registry) -> Self {
        let router = axum::Router::new()
            .route("/", get(landing_page))
            .route("/metrics", get(export_metrics))
            .with_state(registry);
        Self { router }
    }

    /// Serves until Ctrl-C is received.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bind`] if the listener cannot be bound and
    /// [`Error::Serve`] if serving fails.
    pub async fn listen(self, addr: SocketAddr) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| Error::Bind { addr, source })?;
        log::info!("Serving metrics on http://{addr}/metrics");
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(Error::Serve)
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
