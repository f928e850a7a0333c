use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use sms_dispatch::{DEFAULT_MAX_IN_FLIGHT, DispatchConfig};
use sms_web_generic::DEFAULT_SERVICE_NAME;
use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Twilio account and sender number
    pub twilio: TwilioConfig,
    /// Bulk dispatch tuning
    pub dispatch: DispatchSettings,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Name reported by the health endpoint
    pub service_name: String,
}

/// Server configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Server host (default: 0.0.0.0)
    pub host: String,
    /// Server port (default: 8080)
    pub port: u16,
}

/// Twilio provider configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// Sender phone number for every outbound message
    pub from_number: String,
    /// REST API base URL (default: https://api.twilio.com)
    pub base_url: String,
}

/// Dispatch configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DispatchSettings {
    /// Concurrent provider calls per bulk request (default: 10)
    pub max_in_flight: usize,
    /// Per-call provider timeout in seconds, 0 disables (default: 30)
    pub send_timeout_seconds: u64,
}

/// Security configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes (default: 1MB)
    pub max_body_size: usize,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Log level (default: info)
    pub level: String,
    /// Log format: json or pretty (default: pretty)
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            base_url: "https://api.twilio.com".to_string(),
        }
    }
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            send_timeout_seconds: 30,
        }
    }
}

impl DispatchSettings {
    pub fn to_dispatch_config(&self) -> DispatchConfig {
        DispatchConfig {
            max_in_flight: self.max_in_flight,
            send_timeout: (self.send_timeout_seconds > 0)
                .then(|| Duration::from_secs(self.send_timeout_seconds)),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        Self::file_layers(&run_mode)?
            // Add environment variables (prefixed with SMSDISPATCH__)
            .add_source(Environment::with_prefix("SMSDISPATCH").separator("__"))
            // Plain variables understood by earlier deployments of the service
            .set_override_option("twilio.account_sid", env::var("TWILIO_ACCOUNT_SID").ok())?
            .set_override_option("twilio.auth_token", env::var("TWILIO_AUTH_TOKEN").ok())?
            .set_override_option("twilio.from_number", env::var("TWILIO_PHONE_NUMBER").ok())?
            .set_override_option("server.port", env::var("PORT").ok())?
            .build()?
            .try_deserialize()
    }

    fn file_layers(run_mode: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(Config::builder()
            // Start with default configuration
            .add_source(Config::try_from(&AppConfig::default())?)
            // Add configuration file based on environment
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add local configuration file (gitignored)
            .add_source(File::with_name("config/local").required(false)))
    }

    /// Fail fast when the provider cannot possibly accept a message.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing: Vec<&str> = [
            ("TWILIO_ACCOUNT_SID", &self.twilio.account_sid),
            ("TWILIO_AUTH_TOKEN", &self.twilio.auth_token),
            ("TWILIO_PHONE_NUMBER", &self.twilio.from_number),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(format!(
                "missing Twilio configuration: {}",
                missing.join(", ")
            )))
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            twilio: TwilioConfig::default(),
            dispatch: DispatchSettings::default(),
            security: SecurityConfig::default(),
            logging: LoggingConfig::default(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn configured() -> AppConfig {
        let mut config = AppConfig::default();
        config.twilio.account_sid = "AC123".into();
        config.twilio.auth_token = "secret".into();
        config.twilio.from_number = "+15550000000".into();
        config
    }

    #[test]
    fn defaults_listen_on_8080_with_ten_in_flight() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.listen_addr(), "0.0.0.0:8080");
        assert_eq!(config.dispatch.max_in_flight, 10);
        assert_eq!(config.service_name, "twilio-sms-service");
    }

    #[test]
    fn validate_names_every_missing_credential() {
        let err = AppConfig::default().validate().unwrap_err().to_string();
        assert!(err.contains("TWILIO_ACCOUNT_SID"));
        assert!(err.contains("TWILIO_AUTH_TOKEN"));
        assert!(err.contains("TWILIO_PHONE_NUMBER"));

        let mut partial = configured();
        partial.twilio.auth_token = "  ".into();
        let err = partial.validate().unwrap_err().to_string();
        assert!(err.contains("TWILIO_AUTH_TOKEN"));
        assert!(!err.contains("TWILIO_ACCOUNT_SID"));

        assert!(configured().validate().is_ok());
    }

    #[test]
    fn file_overrides_are_layered_on_defaults() {
        let config: AppConfig = AppConfig::file_layers("test")
            .unwrap()
            .add_source(File::from_str(
                r#"
                [dispatch]
                max_in_flight = 25

                [twilio]
                from_number = "+15551112222"
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.dispatch.max_in_flight, 25);
        assert_eq!(config.dispatch.send_timeout_seconds, 30);
        assert_eq!(config.twilio.from_number, "+15551112222");
        assert_eq!(config.twilio.base_url, "https://api.twilio.com");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn zero_timeout_disables_deadline() {
        let settings = DispatchSettings {
            max_in_flight: 5,
            send_timeout_seconds: 0,
        };
        let dispatch = settings.to_dispatch_config();
        assert_eq!(dispatch.max_in_flight, 5);
        assert!(dispatch.send_timeout.is_none());

        let dispatch = DispatchSettings::default().to_dispatch_config();
        assert_eq!(dispatch.send_timeout, Some(Duration::from_secs(30)));
    }
}
