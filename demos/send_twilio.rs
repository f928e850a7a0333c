//! Send an SMS using the Twilio backend.
use sms_core::{SendRequest, SmsClient};
use sms_twilio::TwilioClient;

use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let account_sid = arg_or_env("--account-sid", "TWILIO_ACCOUNT_SID")?;
    let auth_token = arg_or_env("--auth-token", "TWILIO_AUTH_TOKEN")?;
    let from = arg_or_env("--from", "TWILIO_PHONE_NUMBER")?;
    let to = arg_or_env("--to", "SMS_TO")?;
    let text = arg_or_env("--text", "SMS_TEXT")?;

    let client = TwilioClient::new(account_sid, auth_token);
    let res = client
        .send(SendRequest {
            to: &to,
            from: &from,
            text: &text,
        })
        .await?;
    println!(
        "Sent via {} with id {}\nRaw: {}",
        res.provider,
        res.id,
        serde_json::to_string_pretty(&res.raw)?
    );
    Ok(())
}

fn arg_or_env(flag: &str, env_key: &str) -> Result<String, String> {
    let args: Vec<String> = env::args().collect();
    if let Some(idx) = args.iter().position(|a| a == flag) {
        if let Some(value) = args.get(idx + 1) {
            return Ok(value.clone());
        }
    }
    env::var(env_key).map_err(|_| format!("missing {} (arg {} or env {})", flag, flag, env_key))
}
