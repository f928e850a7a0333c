use std::sync::Arc;

use sms_dispatch::Dispatcher;
use sms_twilio::TwilioClient;
use sms_web_axum::{AppState, router_with_body_limit};
use sms_web_generic::DispatchProcessor;
use smsdispatch::{config::AppConfig, telemetry};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let config = AppConfig::load()?;
    telemetry::init(&config.logging)?;
    if !dotenv_loaded {
        warn!("no .env file found, using process environment only");
    }
    config.validate()?;

    let client = TwilioClient::with_base_url(
        config.twilio.account_sid.clone(),
        config.twilio.auth_token.clone(),
        config.twilio.base_url.clone(),
    );
    let dispatcher = Dispatcher::new(
        Arc::new(client),
        config.twilio.from_number.clone(),
        config.dispatch.to_dispatch_config(),
    );
    info!(
        "Twilio configured, sending from {} with up to {} concurrent sends per batch",
        dispatcher.from_number(),
        config.dispatch.max_in_flight
    );

    let processor = DispatchProcessor::with_service_name(dispatcher, config.service_name.clone());
    let app = router_with_body_limit(AppState { processor }, config.security.max_body_size);

    let addr = config.server.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("could not listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
