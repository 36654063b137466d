use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::core::{
    affiliate::{DEFAULT_PARTNER_KEY, DEFAULT_REDIRECT_BASE, DEFAULT_REDIRECT_HOST},
    normalize::{DEFAULT_NAME_PREFIX, DEFAULT_PLACEHOLDER_IMAGE},
    AffiliateLinker, Normalizer, DEFAULT_TOLERANCE,
};
use crate::models::MeasurementRanges;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub ranges: MeasurementRanges,
    #[serde(default)]
    pub affiliate: AffiliateSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: String,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
    #[serde(default = "default_name_prefix")]
    pub name_prefix: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            cache_ttl_secs: default_cache_ttl_secs(),
            placeholder_image: default_placeholder_image(),
            name_prefix: default_name_prefix(),
        }
    }
}

impl CatalogSettings {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

fn default_catalog_path() -> String { "data/friends.csv".to_string() }
fn default_cache_ttl_secs() -> u64 { 300 }
fn default_placeholder_image() -> String { DEFAULT_PLACEHOLDER_IMAGE.to_string() }
fn default_name_prefix() -> String { DEFAULT_NAME_PREFIX.to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct AffiliateSettings {
    #[serde(default = "default_redirect_base")]
    pub redirect_base: String,
    #[serde(default = "default_redirect_host")]
    pub redirect_host: String,
    #[serde(default = "default_partner_key")]
    pub partner_key: String,
}

impl Default for AffiliateSettings {
    fn default() -> Self {
        Self {
            redirect_base: default_redirect_base(),
            redirect_host: default_redirect_host(),
            partner_key: default_partner_key(),
        }
    }
}

fn default_redirect_base() -> String { DEFAULT_REDIRECT_BASE.to_string() }
fn default_redirect_host() -> String { DEFAULT_REDIRECT_HOST.to_string() }
fn default_partner_key() -> String { DEFAULT_PARTNER_KEY.to_string() }

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_tolerance")]
    pub default_tolerance: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { default_tolerance: default_tolerance() }
    }
}

fn default_tolerance() -> f64 { DEFAULT_TOLERANCE }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "text".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SIZEREF_)
    /// 5. `CATALOG_PATH` for the catalog source
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SIZEREF__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SIZEREF")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    ///
    /// `SIZEREF__*` variables and `CATALOG_PATH` still apply on top of the file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SIZEREF")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }

    /// Build the row normalizer described by this configuration
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(
            self.ranges,
            AffiliateLinker::new(
                self.affiliate.redirect_base.clone(),
                self.affiliate.redirect_host.clone(),
                self.affiliate.partner_key.clone(),
            ),
            self.catalog.placeholder_image.clone(),
            self.catalog.name_prefix.clone(),
        )
    }
}

/// Apply plain environment overrides that do not follow the prefixed scheme
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    with_catalog_path(settings, std::env::var("CATALOG_PATH").ok())
}

fn with_catalog_path(settings: Config, path: Option<String>) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Some(path) = path {
        builder = builder.set_override("catalog.path", path)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Range;
    use std::io::Write;

    #[test]
    fn test_default_ranges() {
        let ranges = Settings::default().ranges;
        assert_eq!(ranges.height, Range::new(50.0, 80.0));
        assert_eq!(ranges.bust, Range::new(25.0, 55.0));
        assert_eq!(ranges.waist, Range::new(18.0, 50.0));
        assert_eq!(ranges.hips, Range::new(25.0, 60.0));
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "text");
    }

    #[test]
    fn test_load_from_file_with_partial_sections() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[catalog]\npath = \"fixtures/ref.csv\"\ncache_ttl_secs = 60\n\n[ranges.height]\nmin = 40.0\nmax = 90.0\n"
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.catalog.path, "fixtures/ref.csv");
        assert_eq!(settings.catalog.cache_ttl(), Duration::from_secs(60));
        assert_eq!(settings.catalog.name_prefix, "Size Reference");
        assert_eq!(settings.ranges.height, Range::new(40.0, 90.0));
        assert_eq!(settings.ranges.waist, Range::new(18.0, 50.0));
        assert_eq!(settings.search.default_tolerance, 2.0);
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn test_catalog_path_override_wins_over_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[catalog]\npath = \"fixtures/ref.csv\"\ncache_ttl_secs = 60\n").unwrap();

        let base = Config::builder()
            .add_source(File::from(file.path()))
            .build()
            .unwrap();
        let settings: Settings = with_catalog_path(base, Some("/srv/friends.csv".to_string()))
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.catalog.path, "/srv/friends.csv");
        assert_eq!(settings.catalog.cache_ttl_secs, 60);
    }

    #[test]
    fn test_missing_catalog_path_override_keeps_file_value() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[catalog]\npath = \"fixtures/ref.csv\"\n").unwrap();

        let base = Config::builder()
            .add_source(File::from(file.path()))
            .build()
            .unwrap();
        let settings: Settings = with_catalog_path(base, None).unwrap().try_deserialize().unwrap();

        assert_eq!(settings.catalog.path, "fixtures/ref.csv");
    }
}
