//! Fan a message out to a list of numbers through Twilio and print the outcome.
//!
//! Recipients are passed as arguments; credentials come from the same
//! configuration the server uses (`.env`, `config/`, `TWILIO_*`).
//!
//! ```text
//! cargo run --example bulk_dispatch -- "Hello!" +15551111111 +15552222222
//! ```

use std::sync::Arc;

use sms_dispatch::Dispatcher;
use sms_twilio::TwilioClient;
use smsdispatch::{config::AppConfig, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let config = AppConfig::load()?;
    telemetry::init(&config.logging)?;
    config.validate()?;

    let mut args = std::env::args().skip(1);
    let message = args.next().ok_or("usage: bulk_dispatch <message> <number>...")?;
    let recipients: Vec<String> = args.collect();

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

    let result = dispatcher.send_bulk(recipients, &message).await;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
