use registra::{app, initialize_state, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init();

    let state = initialize_state().await?;

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "1111".to_string())
        .parse::<u16>()?;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "server started");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolve on ctrl-c so open connections can drain before exit.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "cannot listen for shutdown signal");
        return;
    }

    tracing::info!("shutdown signal received");
}
