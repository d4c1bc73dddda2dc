// Configuration for wikirelated
//
// Endpoints, the page-view date window and the classification heuristics are
// plain values handed to the gateway layer. Service sections are read from the
// "services" subtree, with a fallback to the top level for flat config files.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::logging::LoggingConfig;

/// Environment variable that overrides the configured Spotify access token
pub const SPOTIFY_TOKEN_ENV: &str = "SPOTIFY_ACCESS_TOKEN";

/// Format of the page-view window boundaries
pub const DATE_FORMAT: &str = "%Y%m%d";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    Io(String, std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Helper function to get service configuration with backward compatibility
///
/// Looks in the "services" section first, then at the top level.
///
/// # Example
/// ```rust
/// use serde_json::json;
/// use wikirelated::config::get_service_config;
///
/// let config = json!({
///   "services": {
///     "spotify": { "access_token": "abc" }
///   }
/// });
/// let spotify = get_service_config(&config, "spotify").unwrap();
/// assert_eq!(spotify["access_token"], "abc");
///
/// let flat = json!({ "wikidata": { "endpoint": "http://localhost" } });
/// assert!(get_service_config(&flat, "wikidata").is_some());
/// ```
pub fn get_service_config<'a>(config: &'a Value, service_name: &str) -> Option<&'a Value> {
    if let Some(service_config) = config.get("services").and_then(|s| s.get(service_name)) {
        debug!("Found {} configuration in services section", service_name);
        return Some(service_config);
    }

    if let Some(service_config) = config.get(service_name) {
        debug!("Found {} configuration at top level (legacy structure)", service_name);
        return Some(service_config);
    }

    debug!("No {} configuration found, using defaults", service_name);
    None
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikipediaConfig {
    pub endpoint: String,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self { endpoint: "https://en.wikipedia.org/w/api.php".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikidataConfig {
    pub endpoint: String,
}

impl Default for WikidataConfig {
    fn default() -> Self {
        Self { endpoint: "https://www.wikidata.org/w/api.php".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikimediaConfig {
    /// Base of the REST API, without trailing slash
    pub endpoint: String,
    /// Wiki project the page views are counted for
    pub project: String,
    /// First month of the window, YYYYMMDD
    pub date_start: String,
    /// Last day of the window, YYYYMMDD
    pub date_end: String,
}

impl Default for WikimediaConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://wikimedia.org/api/rest_v1".to_string(),
            project: "en.wikipedia.org".to_string(),
            date_start: "20000101".to_string(),
            date_end: "20170228".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotifyConfig {
    /// Web API base, e.g. https://api.spotify.com/v1
    pub endpoint: String,
    /// Bearer token sent with related-artist requests
    pub access_token: Option<String>,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.spotify.com/v1".to_string(),
            access_token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: format!("wikirelated/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Wikidata properties whose presence marks an entity as a musical artist
    pub artist_properties: Vec<String>,
    /// Wikidata property holding the Spotify artist ID
    pub spotify_property: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            // discography, AllMusic artist ID, Spotify artist ID
            artist_properties: vec!["P358".to_string(), "P1728".to_string(), "P1902".to_string()],
            spotify_property: "P1902".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpanderConfig {
    /// Value of the `pllimit` query parameter
    pub pllimit: u32,
    /// Only the first N link titles become candidates; all of them when unset
    pub link_limit: Option<usize>,
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self { pllimit: 100, link_limit: None }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub wikipedia: WikipediaConfig,
    pub wikidata: WikidataConfig,
    pub wikimedia: WikimediaConfig,
    pub spotify: SpotifyConfig,
    pub http: HttpConfig,
    pub classifier: ClassifierConfig,
    pub expander: ExpanderConfig,
    pub logging: LoggingConfig,
}

fn section<T: Default + for<'de> Deserialize<'de>>(value: Option<&Value>) -> Result<T, ConfigError> {
    match value {
        Some(v) => Ok(serde_json::from_value(v.clone())?),
        None => Ok(T::default()),
    }
}

impl Config {
    /// Build a configuration from a parsed JSON document
    pub fn from_json(config: &Value) -> Result<Self, ConfigError> {
        let parsed = Config {
            wikipedia: section(get_service_config(config, "wikipedia"))?,
            wikidata: section(get_service_config(config, "wikidata"))?,
            wikimedia: section(get_service_config(config, "wikimedia"))?,
            spotify: section(get_service_config(config, "spotify"))?,
            http: section(config.get("http"))?,
            classifier: section(config.get("classifier"))?,
            expander: section(config.get("expander"))?,
            logging: section(config.get("logging"))?,
        };
        parsed.validate()?;
        Ok(parsed)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        let value: Value = serde_json::from_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Self::from_json(&value)
    }

    /// Replace the Spotify token with the environment override if it is set
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var(SPOTIFY_TOKEN_ENV) {
            if !token.trim().is_empty() {
                debug!("Using Spotify access token from {}", SPOTIFY_TOKEN_ENV);
                self.spotify.access_token = Some(token.trim().to_string());
            }
        }
    }

    /// Check values that serde cannot check
    pub fn validate(&self) -> Result<(), ConfigError> {
        let start = parse_date(&self.wikimedia.date_start)?;
        let end = parse_date(&self.wikimedia.date_end)?;
        if start > end {
            return Err(ConfigError::Invalid(format!(
                "page view window starts after it ends ({} > {})",
                self.wikimedia.date_start, self.wikimedia.date_end
            )));
        }

        if self.classifier.artist_properties.is_empty() {
            return Err(ConfigError::Invalid("classifier.artist_properties must not be empty".to_string()));
        }

        if self.expander.pllimit == 0 {
            return Err(ConfigError::Invalid("expander.pllimit must be at least 1".to_string()));
        }

        Ok(())
    }
}

fn parse_date(date: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|e| ConfigError::Invalid(format!("bad date '{}': {}", date, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_defaults_match_public_endpoints() {
        let config = Config::default();
        assert_eq!(config.wikipedia.endpoint, "https://en.wikipedia.org/w/api.php");
        assert_eq!(config.wikimedia.date_start, "20000101");
        assert_eq!(config.wikimedia.date_end, "20170228");
        assert_eq!(config.classifier.artist_properties, vec!["P358", "P1728", "P1902"]);
        assert_eq!(config.classifier.spotify_property, "P1902");
        assert_eq!(config.expander.pllimit, 100);
        assert!(config.expander.link_limit.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_services_section_takes_precedence() {
        let value = json!({
            "services": { "wikipedia": { "endpoint": "http://new" } },
            "wikipedia": { "endpoint": "http://legacy" }
        });
        let config = Config::from_json(&value).unwrap();
        assert_eq!(config.wikipedia.endpoint, "http://new");
    }

    #[test]
    fn test_legacy_top_level_section() {
        let value = json!({ "spotify": { "access_token": "tok" } });
        let config = Config::from_json(&value).unwrap();
        assert_eq!(config.spotify.access_token.as_deref(), Some("tok"));
        assert_eq!(config.spotify.endpoint, "https://api.spotify.com/v1");
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let value = json!({
            "classifier": { "artist_properties": ["P358", "P1953", "P434", "P1728", "P1902"] },
            "expander": { "link_limit": 25 }
        });
        let config = Config::from_json(&value).unwrap();
        assert_eq!(config.classifier.artist_properties.len(), 5);
        assert_eq!(config.classifier.spotify_property, "P1902");
        assert_eq!(config.expander.link_limit, Some(25));
        assert_eq!(config.expander.pllimit, 100);
    }

    #[test]
    fn test_inverted_window_rejected() {
        let value = json!({
            "services": { "wikimedia": { "date_start": "20170228", "date_end": "20000101" } }
        });
        assert!(matches!(Config::from_json(&value), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_date_rejected() {
        let value = json!({ "services": { "wikimedia": { "date_start": "2000-01-01" } } });
        assert!(matches!(Config::from_json(&value), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_empty_artist_properties_rejected() {
        let value = json!({ "classifier": { "artist_properties": [] } });
        assert!(Config::from_json(&value).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", json!({ "http": { "timeout_secs": 3 }, "logging": { "level": "debug" } })).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.http.timeout_secs, 3);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file("/nonexistent/wikirelated.json");
        assert!(matches!(result, Err(ConfigError::Io(_, _))));
    }

    #[test]
    fn test_env_override_replaces_token() {
        let mut config = Config::from_json(&json!({ "services": { "spotify": { "access_token": "from-file" } } })).unwrap();

        std::env::set_var(SPOTIFY_TOKEN_ENV, "  from-env \n");
        config.apply_env_overrides();
        assert_eq!(config.spotify.access_token.as_deref(), Some("from-env"));

        // blank values leave the configured token alone
        std::env::set_var(SPOTIFY_TOKEN_ENV, "   ");
        config.spotify.access_token = Some("from-file".to_string());
        config.apply_env_overrides();
        assert_eq!(config.spotify.access_token.as_deref(), Some("from-file"));

        std::env::remove_var(SPOTIFY_TOKEN_ENV);
        config.apply_env_overrides();
        assert_eq!(config.spotify.access_token.as_deref(), Some("from-file"));
    }
}
