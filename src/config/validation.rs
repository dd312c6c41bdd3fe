use crate::config::types::{Config, CrawlerConfig, PushRetryConfig, StoreConfig, UserAgentConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_store_config(&config.store)?;
    validate_push_retry_config(&config.push_retry)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_depth < 1 {
        return Err(ConfigError::Validation(
            "max_depth must be greater than 0".to_string(),
        ));
    }

    if config.workers < 1 {
        return Err(ConfigError::Validation(
            "workers must be greater than 0".to_string(),
        ));
    }

    if config.max_links_per_page < 1 {
        return Err(ConfigError::Validation(
            "max_links_per_page must be >= 1".to_string(),
        ));
    }

    if config.fetch_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "fetch_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates store configuration
fn validate_store_config(config: &StoreConfig) -> Result<(), ConfigError> {
    if config.address.trim().is_empty() {
        return Err(ConfigError::Validation(
            "store address cannot be empty".to_string(),
        ));
    }

    if config.queue_key.is_empty() || config.visited_key.is_empty() {
        return Err(ConfigError::Validation(
            "queue_key and visited_key cannot be empty".to_string(),
        ));
    }

    if config.queue_key == config.visited_key {
        return Err(ConfigError::Validation(format!(
            "queue_key and visited_key must differ, both are '{}'",
            config.queue_key
        )));
    }

    if config.pop_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "pop_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates the frontier push retry policy
fn validate_push_retry_config(config: &PushRetryConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(
            "push-retry max_attempts must be >= 1".to_string(),
        ));
    }

    if config.initial_backoff_ms > config.max_backoff_ms {
        return Err(ConfigError::Validation(format!(
            "initial_backoff_ms ({}) cannot exceed max_backoff_ms ({})",
            config.initial_backoff_ms, config.max_backoff_ms
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    Ok(())
}
