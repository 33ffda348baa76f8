//! Watcher configuration
//!
//! All of the action's inputs, validated once at the boundary before any
//! network traffic happens.

use std::time::Duration;

/// Watch session configuration
#[derive(Clone)]
pub struct Config {
    /// Cloud host, for both the API and the viewer links
    pub host: String,

    /// API token used as the bearer credential
    pub token: String,

    /// Account the watched job belongs to
    pub account_id: u64,

    /// Job whose most recent run is watched
    pub job_id: u64,

    /// Fixed delay between status checks
    pub poll_interval: Duration,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.host.starts_with("http://") && !self.host.starts_with("https://") {
            anyhow::bail!("host must start with http:// or https://");
        }

        if self.token.is_empty() {
            anyhow::bail!("token cannot be empty");
        }

        if self.account_id == 0 {
            anyhow::bail!("account id must be a positive integer");
        }

        if self.job_id == 0 {
            anyhow::bail!("job id must be a positive integer");
        }

        if self.poll_interval.as_secs() == 0 {
            anyhow::bail!("poll interval must be at least one second");
        }

        Ok(())
    }
}

impl std::fmt::Debug for Config {
    // Never print the credential
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .field("account_id", &self.account_id)
            .field("job_id", &self.job_id)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            host: "https://cloud.getdbt.com".to_string(),
            token: "secret".to_string(),
            account_id: 42,
            job_id: 7,
            poll_interval: Duration::from_secs(30),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();

        config.host = "cloud.getdbt.com".to_string();
        assert!(config.validate().is_err());
        config.host = "https://cloud.getdbt.com".to_string();

        config.token = String::new();
        assert!(config.validate().is_err());
        config.token = "secret".to_string();

        config.account_id = 0;
        assert!(config.validate().is_err());
        config.account_id = 42;

        config.job_id = 0;
        assert!(config.validate().is_err());
        config.job_id = 7;

        config.poll_interval = Duration::from_secs(0);
        assert!(config.validate().is_err());
        config.poll_interval = Duration::from_secs(30);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", valid_config());
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
