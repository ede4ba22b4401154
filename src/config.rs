//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Public catalog crawled when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://books.toscrape.com/";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site root; catalog pages live under `{base_url}catalogue/`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// CSV file records are appended to
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Durable log file, written alongside the console
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Politeness delay between pages in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to the delay (0 to this value)
    #[serde(default)]
    pub delay_jitter_ms: u64,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Stop after this many pages even if the catalog continues
    #[serde(default)]
    pub max_pages: Option<u32>,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("books_data.csv")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("crawler.log")
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            output: default_output(),
            log_file: default_log_file(),
            delay_ms: default_delay_ms(),
            delay_jitter_ms: 0,
            timeout_secs: default_timeout_secs(),
            max_pages: None,
            proxy: None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config.normalized())
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("books-crawler").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var("BOOKS_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(output) = std::env::var("BOOKS_OUTPUT") {
            self.output = PathBuf::from(output);
        }

        if let Ok(delay) = std::env::var("BOOKS_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        if let Ok(proxy) = std::env::var("BOOKS_PROXY") {
            self.proxy = Some(proxy);
        }

        self.normalized()
    }

    /// Sets the base URL, keeping exactly one trailing slash.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = normalize_base_url(&base_url.into());
    }

    fn normalized(mut self) -> Self {
        self.base_url = normalize_base_url(&self.base_url);
        self
    }
}

/// Trims trailing slashes and appends a single one.
pub fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim().trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://books.toscrape.com/");
        assert_eq!(config.output, PathBuf::from("books_data.csv"));
        assert_eq!(config.log_file, PathBuf::from("crawler.log"));
        assert_eq!(config.delay_ms, 1000);
        assert_eq!(config.delay_jitter_ms, 0);
        assert_eq!(config.timeout_secs, 10);
        assert!(config.max_pages.is_none());
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("http://localhost:8080"), "http://localhost:8080/");
        assert_eq!(normalize_base_url("http://localhost:8080/"), "http://localhost:8080/");
        assert_eq!(normalize_base_url("http://localhost:8080///"), "http://localhost:8080/");
    }

    #[test]
    fn test_set_base_url() {
        let mut config = Config::new();
        config.set_base_url("http://mirror.local");
        assert_eq!(config.base_url, "http://mirror.local/");
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            output = "out.csv"
            delay_ms = 250
            max_pages = 3
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.output, PathBuf::from("out.csv"));
        assert_eq!(config.delay_ms, 250);
        assert_eq!(config.max_pages, Some(3));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            base_url = "http://localhost:9000"
            timeout_secs = 3
            proxy = "socks5://localhost:1080"
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000/");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.proxy.as_deref(), Some("socks5://localhost:1080"));
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let err = Config::from_file(file.path()).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "delay_jitter_ms = 500").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.delay_jitter_ms, 500);
        assert_eq!(config.delay_ms, 1000);
    }

    #[test]
    fn test_config_with_env() {
        let keys = ["BOOKS_BASE_URL", "BOOKS_OUTPUT", "BOOKS_DELAY", "BOOKS_PROXY"];
        let saved: Vec<_> = keys.iter().map(|k| std::env::var(k).ok()).collect();

        std::env::set_var("BOOKS_BASE_URL", "http://env.local//");
        std::env::set_var("BOOKS_OUTPUT", "env.csv");
        std::env::set_var("BOOKS_DELAY", "not_a_number");
        std::env::set_var("BOOKS_PROXY", "http://proxy:8080");

        let config = Config::new().with_env();
        assert_eq!(config.base_url, "http://env.local/");
        assert_eq!(config.output, PathBuf::from("env.csv"));
        // Invalid numbers are ignored
        assert_eq!(config.delay_ms, 1000);
        assert_eq!(config.proxy.as_deref(), Some("http://proxy:8080"));

        std::env::set_var("BOOKS_DELAY", "42");
        assert_eq!(Config::new().with_env().delay_ms, 42);

        for (key, value) in keys.iter().zip(saved) {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}
