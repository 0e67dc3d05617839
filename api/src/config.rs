//! Layered configuration loading
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. optional `config.<environment>.{toml,yaml,json}` in the working directory
//! 3. `IDM__<SECTION>__<FIELD>` environment variables, e.g. `IDM__SERVER__PORT=9000`

use config::{Config, ConfigError, Environment as EnvSource, File};
use idm_shared::config::{AppConfig, Environment, MIN_RSA_KEY_BITS};

const ENV_PREFIX: &str = "IDM";
const ENV_SEPARATOR: &str = "__";

/// Load and validate configuration for the environment named by `ENVIRONMENT`
pub fn load() -> Result<AppConfig, ConfigError> {
    load_for(Environment::from_env())
}

/// Load and validate configuration for `environment`
pub fn load_for(environment: Environment) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig {
        environment,
        ..AppConfig::default()
    };

    let settings = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(File::with_name(environment.config_file()).required(false))
        .add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

/// Reject settings the service cannot run with
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let token = &config.token;

    if token.access_token_ttl_seconds == 0 {
        return Err(ConfigError::Message("token.access_token_ttl_seconds must be positive".into()));
    }
    if token.refresh_token_ttl_seconds == 0 {
        return Err(ConfigError::Message("token.refresh_token_ttl_seconds must be positive".into()));
    }
    if token.rsa_key_bits < MIN_RSA_KEY_BITS {
        return Err(ConfigError::Message(format!(
            "token.rsa_key_bits must be at least {}",
            MIN_RSA_KEY_BITS
        )));
    }
    if token.key_id.trim().is_empty() {
        return Err(ConfigError::Message("token.key_id must not be empty".into()));
    }

    if config.environment.is_production() && config.credentials.is_using_demo_credentials() {
        log::warn!("Demo credentials are enabled in production");
    }
    if !config.cache.enabled {
        log::warn!("Redis disabled; refresh tokens are kept in process memory only");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = load_for(Environment::Staging).unwrap();

        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.token.issuer, "auth-service");
        assert_eq!(config.token.key_id, "primary");
        assert_eq!(config.token.access_token_ttl_seconds, 300);
        assert_eq!(config.cache.key_prefix, "refresh");
        assert_eq!(config.server.port, 8080);
        assert!(config.token.sweeper_enabled);
    }

    #[test]
    fn test_sweeper_can_be_disabled_from_file_settings() {
        let settings = Config::builder()
            .add_source(Config::try_from(&AppConfig::default()).unwrap())
            .add_source(File::from_str(
                "[token]\nsweeper_enabled = false\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: AppConfig = settings.try_deserialize().unwrap();
        assert!(!config.token.sweeper_enabled);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let mut config = AppConfig::default();
        config.token.refresh_token_ttl_seconds = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_small_key_is_rejected() {
        let mut config = AppConfig::default();
        config.token.rsa_key_bits = 1024;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_key_id_is_rejected() {
        let mut config = AppConfig::default();
        config.token.key_id = "  ".to_string();
        assert!(validate(&config).is_err());
    }
}
