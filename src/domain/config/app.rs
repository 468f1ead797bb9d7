use std::{collections::HashMap, env, str::FromStr};

use thiserror::Error;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
const DEFAULT_MAX_UPLOAD_SIZE: u64 = 2 * 1024 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub api_url: String,
    pub bot_token: String,
    pub channel_id: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub public_base_url: String,
    pub admin_password: String,
    pub max_upload_size: u64,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub telegram: TelegramConfig,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            vars.get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;
        let max_upload_size = parse_or(
            get("MAX_UPLOAD_SIZE"),
            "MAX_UPLOAD_SIZE",
            DEFAULT_MAX_UPLOAD_SIZE,
        )?;

        let public_base_url = get("PUBLIC_BASE_URL")
            .unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if !public_base_url.starts_with("http") {
            return Err(ConfigError::Invalid {
                name: "PUBLIC_BASE_URL",
                value: public_base_url,
            });
        }

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        Ok(Self {
            port,
            public_base_url,
            admin_password: required("ADMIN_PASSWORD")?,
            max_upload_size,
            cors_allowed_origins,
            telegram: TelegramConfig {
                api_url: get("TELEGRAM_API_URL")
                    .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                bot_token: required("TELEGRAM_BOT_TOKEN")?,
                channel_id: required("TELEGRAM_CHANNEL_ID")?,
            },
        })
    }
}

fn parse_or<T: FromStr>(
    value: Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_vars() -> HashMap<String, String> {
        [
            ("ADMIN_PASSWORD", "hunter2"),
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHANNEL_ID", "@files"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_absent() {
        let config = AppConfig::from_vars(base_vars()).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.public_base_url, "http://localhost:5000");
        assert_eq!(config.max_upload_size, 2 * 1024 * 1024 * 1024);
        assert_eq!(config.telegram.api_url, "https://api.telegram.org");
        assert!(config.cors_allowed_origins.is_none());
    }

    #[test]
    fn overrides_are_parsed_and_trimmed() {
        let mut vars = base_vars();
        vars.insert("PORT".into(), "8080".into());
        vars.insert("PUBLIC_BASE_URL".into(), "https://share.example/".into());
        vars.insert("MAX_UPLOAD_SIZE".into(), "1024".into());
        vars.insert(
            "CORS_ALLOWED_ORIGINS".into(),
            "https://a.example, https://b.example".into(),
        );

        let config = AppConfig::from_vars(vars).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.public_base_url, "https://share.example");
        assert_eq!(config.max_upload_size, 1024);
        assert_eq!(
            config.cors_allowed_origins,
            Some(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
    }

    #[test]
    fn missing_secret_is_reported() {
        let mut vars = base_vars();
        vars.remove("TELEGRAM_BOT_TOKEN");
        assert_eq!(
            AppConfig::from_vars(vars).unwrap_err(),
            ConfigError::Missing("TELEGRAM_BOT_TOKEN")
        );
    }

    #[test]
    fn malformed_port_is_rejected() {
        let mut vars = base_vars();
        vars.insert("PORT".into(), "eighty".into());
        assert!(matches!(
            AppConfig::from_vars(vars),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
    }
}
