#[cfg(test)]
pub mod test_utils {
    use crate::config::{HeatmapSettings, initialize_app_state};
    use crate::router::create_router;
    use axum::{
        Json, Router,
        extract::Query,
        http::{HeaderMap, StatusCode, header},
        response::{IntoResponse, Response},
        routing::get,
    };
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// How the stand-in data provider answers every request
    #[derive(Clone, Debug)]
    pub enum ProviderReply {
        /// 200 with a JSON document
        Json(Value),
        /// Bare error status
        Status(StatusCode),
        /// 200 with a raw, non-JSON body
        Body(&'static str),
        /// JSON document after a delay
        Delayed(Duration, Value),
    }

    /// Wraps samples the way the provider does: `{"data": {"load_history": ...}}`.
    pub fn load_history(samples: Value) -> Value {
        json!({ "data": { "name": "Test branch", "load_history": samples } })
    }

    async fn answer(
        reply: ProviderReply,
        query: HashMap<String, String>,
        headers: HeaderMap,
    ) -> Response {
        // Mirror the real provider's expectations on the request itself
        if query.get("extra_bi").map(String::as_str) != Some("true") {
            return (StatusCode::BAD_REQUEST, "extra_bi=true is required").into_response();
        }
        let header_value = |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok());
        if header_value(header::ACCEPT) != Some("application/json") {
            return (StatusCode::NOT_ACCEPTABLE, "JSON only").into_response();
        }
        if !header_value(header::USER_AGENT).is_some_and(|ua| ua.starts_with("Mozilla/5.0")) {
            return (StatusCode::FORBIDDEN, "Automated clients are not allowed").into_response();
        }

        match reply {
            ProviderReply::Json(body) => Json(body).into_response(),
            ProviderReply::Status(status) => (status, "provider failure").into_response(),
            ProviderReply::Body(body) => body.into_response(),
            ProviderReply::Delayed(delay, body) => {
                tokio::time::sleep(delay).await;
                Json(body).into_response()
            }
        }
    }

    /// Serve a fake data provider on an ephemeral local port and return its
    /// base URL.
    pub async fn spawn_provider(reply: ProviderReply) -> String {
        let app = Router::new().route(
            "/api/v1/data/filials/:slug",
            get(
                move |Query(query): Query<HashMap<String, String>>, headers: HeaderMap| {
                    answer(reply.clone(), query, headers)
                },
            ),
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock provider");
        let address = listener
            .local_addr()
            .expect("Mock provider has no local address");
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock provider stopped");
        });

        format!("http://{}", address)
    }

    /// Base URL of a port nobody listens on.
    pub async fn unreachable_provider() -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind probe listener");
        let address = listener
            .local_addr()
            .expect("Probe listener has no local address");
        drop(listener);
        format!("http://{}", address)
    }

    /// Default settings pointed at `provider_url`, with a short timeout.
    pub fn test_settings(provider_url: &str) -> HeatmapSettings {
        HeatmapSettings {
            provider_url: provider_url.to_string(),
            provider_timeout_secs: 0.5,
            ..Default::default()
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG, defaulting to WARN. Only the
    /// first call installs the subscriber.
    fn init_test_tracing() {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    /// Create axum app wired to an already running provider
    pub fn setup_test_app_with_url(provider_url: &str) -> Router {
        init_test_tracing();

        let state = initialize_app_state(&test_settings(provider_url))
            .expect("Failed to initialize test state");
        create_router(state)
    }

    /// Create axum app backed by a fake provider giving `reply`
    pub async fn setup_test_app(reply: ProviderReply) -> Router {
        let provider_url = spawn_provider(reply).await;
        setup_test_app_with_url(&provider_url)
    }
}
