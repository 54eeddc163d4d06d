use serde::Deserialize;
use std::collections::BTreeMap;

/// Main configuration structure for camsweep
///
/// Every section has defaults matching the sites the scraper was written
/// against, so the CLI runs without a config file. All endpoint paths, form
/// field names, and request headers are configuration rather than code: they
/// are compatibility concerns with the external services.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub directory: DirectoryConfig,
    pub hosting: HostingConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// IP-camera directory site (country listings, paginated stream-link pages)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Base URL of the directory site
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the JSON country table
    #[serde(rename = "countries-path")]
    pub countries_path: String,

    /// Path prefix for per-country listing pages
    #[serde(rename = "by-country-path")]
    pub by_country_path: String,

    /// Query parameter used for pagination
    #[serde(rename = "page-param")]
    pub page_param: String,

    /// Base URL of the IP geolocation lookup service
    #[serde(rename = "geo-base-url")]
    pub geo_base_url: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://www.insecam.org".to_string(),
            countries_path: "/en/jsoncountries/".to_string(),
            by_country_path: "/en/bycountry".to_string(),
            page_param: "page".to_string(),
            geo_base_url: "http://ip-api.com/json/".to_string(),
        }
    }
}

impl DirectoryConfig {
    /// Full URL of the country table endpoint
    pub fn countries_url(&self) -> String {
        format!("{}{}", self.base_url, self.countries_path)
    }

    /// Full URL of a per-country listing page
    pub fn by_country_url(&self, code: &str) -> String {
        format!("{}{}/{}/", self.base_url, self.by_country_path, code)
    }
}

/// Camera-hosting site (form search, categories, playback player)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HostingConfig {
    /// Base URL of the hosting site
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the published-cameras listing/search page
    #[serde(rename = "publish-path")]
    pub publish_path: String,

    /// Path of the multi-hour playback player
    #[serde(rename = "player-path")]
    pub player_path: String,

    /// Form field carrying the search term
    #[serde(rename = "search-field")]
    pub search_field: String,

    /// Form field for the search submit button
    #[serde(rename = "search-button")]
    pub search_button: String,
}

impl Default for HostingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.cameraftp.com".to_string(),
            publish_path: "/cameraftp/publish/publishedcameras.aspx".to_string(),
            player_path: "/camera/CameraPlayerMultiHours.htm".to_string(),
            search_field: "ctl02$tbSearchbox".to_string(),
            search_button: "ctl02$btnCamSearch".to_string(),
        }
    }
}

impl HostingConfig {
    /// Full URL of the published-cameras page
    pub fn publish_url(&self) -> String {
        format!("{}{}", self.base_url, self.publish_path)
    }

    /// Full URL of the playback player page
    pub fn player_url(&self) -> String {
        format!("{}{}", self.base_url, self.player_path)
    }

    /// Resolves a category href (as extracted from the page) against the
    /// published-cameras page
    pub fn category_url(&self, href: &str) -> String {
        format!("{}{}", self.publish_url(), href)
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header value
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Total request timeout in seconds
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Connect timeout in seconds
    #[serde(rename = "connect-timeout-seconds")]
    pub connect_timeout_seconds: u64,

    /// Extra headers sent with every request
    pub headers: BTreeMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(
            "Accept".to_string(),
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string(),
        );
        headers.insert("Cache-Control".to_string(), "max-age=0".to_string());
        headers.insert("Upgrade-Insecure-Requests".to_string(), "1".to_string());

        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36"
                .to_string(),
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
            headers,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory where link listing files are written
    #[serde(rename = "links-dir")]
    pub links_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            links_dir: ".".to_string(),
        }
    }
}
