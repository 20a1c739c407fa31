//! Registra is a lightweight account signup API.

#[forbid(unsafe_code)]
#[deny(missing_docs, unused_mut)]
mod account;
pub mod config;
mod crypto;
mod database;
pub mod error;
mod router;
pub mod telemetry;
mod validation;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::http::{Method, header};
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::LatencyUnit;
use tower_http::cors::{Any, CorsLayer};
use tower_http::sensitive_headers::SetSensitiveHeadersLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};

/// MUST NEVER be used in production.
#[cfg(test)]
pub async fn make_request(
    app: Router,
    method: Method,
    path: &str,
    body: String,
) -> axum::http::Response<axum::body::Body> {
    use axum::extract::Request;
    use tower::util::ServiceExt;

    app.oneshot(
        Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// State sharing between routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::Configuration>,
    pub signup: Arc<router::signup::SignupController>,
}

/// Create router.
pub fn app(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        // Add high level tracing/logging to all requests.
        .layer(
            TraceLayer::new_for_http()
                .on_body_chunk(|chunk: &Bytes, latency: Duration, _span: &tracing::Span| {
                    tracing::trace!(size_bytes = chunk.len(), latency = ?latency, "sending body chunk")
                })
                .make_span_with(DefaultMakeSpan::new().include_headers(true).level(tracing::Level::INFO))
                .on_request(DefaultOnRequest::new())
                .on_response(DefaultOnResponse::new().include_headers(true).latency_unit(LatencyUnit::Micros)),
        )
        // Set a timeout.
        .layer(TimeoutLayer::new(Duration::from_secs(10)))
        // Remove sensitive headers from trace.
        .layer(SetSensitiveHeadersLayer::new([
            header::AUTHORIZATION,
            header::COOKIE,
        ]))
        // Add CORS preflight support.
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(Any),
        );

    Router::new()
        // `GET /status.json` goes to `status`.
        .route("/status.json", get(router::status::status))
        // `POST /signup` goes to `signup`.
        .route("/signup", post(router::signup::handler))
        .with_state(state)
        .layer(middleware)
}

/// Initialize the application state.
pub async fn initialize_state() -> Result<AppState, Box<dyn std::error::Error>>
{
    // read configuration file. let it in memory.
    let config = config::Configuration::default().read()?;

    let db = match config.postgres {
        Some(ref cfg) => {
            database::Database::new(
                &cfg.address,
                &cfg.username
                    .clone()
                    .unwrap_or(database::DEFAULT_CREDENTIALS.into()),
                &cfg.password
                    .clone()
                    .unwrap_or(database::DEFAULT_CREDENTIALS.into()),
                &cfg.database
                    .clone()
                    .unwrap_or(database::DEFAULT_DATABASE_NAME.into()),
                cfg.pool_size.unwrap_or(database::DEFAULT_POOL_SIZE),
            )
            .await?
        },
        None => {
            tracing::error!("missing `postgres` entry on `config.yaml` file");
            std::process::exit(0);
        },
    };

    // execute migrations scripts on start.
    sqlx::migrate!().run(&db.postgres).await?;

    let encrypter =
        Arc::new(crypto::PasswordManager::new(config.argon2.clone())?);
    let repository =
        Arc::new(account::PgAccountRepository::new(db.postgres.clone()));
    let add_account = account::DbAddAccount::new(encrypter, repository);

    let signup = Arc::new(router::signup::SignupController::new(
        Arc::new(validation::EmailValidatorAdapter),
        Arc::new(add_account),
    ));

    Ok(AppState { config, signup })
}
