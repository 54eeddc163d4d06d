use crate::config::types::{Config, DirectoryConfig, HostingConfig, HttpConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_directory_config(&config.directory)?;
    validate_hosting_config(&config.hosting)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates the directory site configuration
fn validate_directory_config(config: &DirectoryConfig) -> Result<(), ConfigError> {
    validate_base_url("directory.base-url", &config.base_url)?;
    validate_base_url("directory.geo-base-url", &config.geo_base_url)?;

    if config.countries_path.is_empty() || !config.countries_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "directory.countries-path must be an absolute path, got '{}'",
            config.countries_path
        )));
    }

    if config.by_country_path.is_empty() || !config.by_country_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "directory.by-country-path must be an absolute path, got '{}'",
            config.by_country_path
        )));
    }

    if config.page_param.is_empty() {
        return Err(ConfigError::Validation(
            "directory.page-param cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the hosting site configuration
fn validate_hosting_config(config: &HostingConfig) -> Result<(), ConfigError> {
    validate_base_url("hosting.base-url", &config.base_url)?;

    if config.publish_path.is_empty() || !config.publish_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "hosting.publish-path must be an absolute path, got '{}'",
            config.publish_path
        )));
    }

    if config.player_path.is_empty() || !config.player_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "hosting.player-path must be an absolute path, got '{}'",
            config.player_path
        )));
    }

    if config.search_field.is_empty() {
        return Err(ConfigError::Validation(
            "hosting.search-field cannot be empty".to_string(),
        ));
    }

    if config.search_button.is_empty() {
        return Err(ConfigError::Validation(
            "hosting.search-button cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "http.user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(ConfigError::Validation(
            "http.timeout-seconds must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_seconds == 0 {
        return Err(ConfigError::Validation(
            "http.connect-timeout-seconds must be >= 1".to_string(),
        ));
    }

    for name in config.headers.keys() {
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ConfigError::Validation(format!(
                "http.headers contains an invalid header name '{}'",
                name
            )));
        }
    }

    Ok(())
}

/// Validates that a configured base URL parses and uses http or https
fn validate_base_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", key, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} must use http or https, got '{}'",
            key,
            url.scheme()
        )));
    }

    Ok(())
}
