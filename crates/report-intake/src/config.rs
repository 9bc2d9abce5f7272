//! Runtime configuration
//!
//! Values come from defaults, then an optional TOML file, then environment
//! variables, each layer overriding the previous one.
//!
//! | variable | field |
//! |----------|-------|
//! | `REPORT_ENDPOINT_URL` | `endpoint_url` |
//! | `REPORT_RATE_LIMIT_MAX_ATTEMPTS` | `rate_limit.max_attempts` |
//! | `REPORT_RATE_LIMIT_INTERVAL_MS` | `rate_limit.interval_ms` |
//! | `REPORT_HTTP_TIMEOUT_MS` | `timeout_ms` |
//! | `REPORT_STATE_DIR` | `state_dir` |
//! | `REPORT_USER_AGENT` | `user_agent` |
//! | `REPORT_BACKEND` | `backend` (`sheets` or `document_store`) |
//! | `REPORT_DOCSTORE_URL` | `document_store.base_url` |
//! | `REPORT_DOCSTORE_PROJECT` | `document_store.project_id` |
//! | `REPORT_DOCSTORE_APP_ID` | `document_store.app_id` |
//! | `REPORT_DOCSTORE_TOKEN` | `document_store.auth_token` |

use report_security::RateLimitConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{IntakeError, Result};

/// Default client identification sent with every report
pub const DEFAULT_USER_AGENT: &str = concat!("report-intake/", env!("CARGO_PKG_VERSION"));

/// Where submitted reports go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Spreadsheet webhook at `endpoint_url`
    #[default]
    Sheets,
    /// Document store collection described by `document_store`
    DocumentStore,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Sheets => write!(f, "sheets"),
            Backend::DocumentStore => write!(f, "document_store"),
        }
    }
}

impl FromStr for Backend {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sheets" => Ok(Backend::Sheets),
            "document_store" | "document-store" | "docstore" => Ok(Backend::DocumentStore),
            other => Err(IntakeError::config(format!("unknown backend '{}'", other))),
        }
    }
}

/// Document store collection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentStoreConfig {
    /// REST API root
    pub base_url: String,
    /// Project owning the database; empty means unconfigured
    pub project_id: String,
    /// Application segment of the collection path
    pub app_id: String,
    /// Bearer token; empty sends no `Authorization` header
    pub auth_token: String,
}

impl Default for DocumentStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "https://firestore.googleapis.com".to_string(),
            project_id: String::new(),
            app_id: "default-app-id".to_string(),
            auth_token: String::new(),
        }
    }
}

impl DocumentStoreConfig {
    pub fn is_configured(&self) -> bool {
        !self.project_id.trim().is_empty()
    }
}

/// Intake configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Backend used by `submit`
    pub backend: Backend,

    /// Remote endpoint receiving reports; empty means unconfigured
    pub endpoint_url: String,

    /// Collection receiving documents; the questionnaire always goes here
    pub document_store: DocumentStoreConfig,

    /// Submission throttle
    pub rate_limit: RateLimitConfig,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,

    /// Directory holding local state
    pub state_dir: PathBuf,

    /// Value of the `userAgent` metadata field
    pub user_agent: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Sheets,
            endpoint_url: String::new(),
            document_store: DocumentStoreConfig::default(),
            rate_limit: RateLimitConfig::default(),
            timeout_ms: 30_000,
            state_dir: PathBuf::from(".report-intake"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl IntakeConfig {
    /// Create a new config builder
    pub fn builder() -> IntakeConfigBuilder {
        IntakeConfigBuilder::new()
    }

    /// Defaults overridden by environment variables
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Read a TOML file; keys that are absent keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            IntakeError::file_error(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Full layering: defaults, optional file, environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = base.with_env_overrides();
        config.validate()?;

        tracing::debug!(
            backend = %config.backend,
            endpoint_configured = config.is_configured(),
            max_attempts = config.rate_limit.max_attempts,
            interval_ms = config.rate_limit.interval_ms,
            state_dir = %config.state_dir.display(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Apply environment overrides; unparseable values are ignored
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("REPORT_ENDPOINT_URL") {
            self.endpoint_url = url;
        }
        if let Some(v) = env_parse("REPORT_RATE_LIMIT_MAX_ATTEMPTS") {
            self.rate_limit.max_attempts = v;
        }
        if let Some(v) = env_parse("REPORT_RATE_LIMIT_INTERVAL_MS") {
            self.rate_limit.interval_ms = v;
        }
        if let Some(v) = env_parse("REPORT_HTTP_TIMEOUT_MS") {
            self.timeout_ms = v;
        }
        if let Ok(dir) = std::env::var("REPORT_STATE_DIR") {
            self.state_dir = PathBuf::from(dir);
        }
        if let Ok(agent) = std::env::var("REPORT_USER_AGENT") {
            self.user_agent = agent;
        }
        if let Some(backend) = env_parse("REPORT_BACKEND") {
            self.backend = backend;
        }
        if let Ok(url) = std::env::var("REPORT_DOCSTORE_URL") {
            self.document_store.base_url = url;
        }
        if let Ok(project) = std::env::var("REPORT_DOCSTORE_PROJECT") {
            self.document_store.project_id = project;
        }
        if let Ok(app_id) = std::env::var("REPORT_DOCSTORE_APP_ID") {
            self.document_store.app_id = app_id;
        }
        if let Ok(token) = std::env::var("REPORT_DOCSTORE_TOKEN") {
            self.document_store.auth_token = token;
        }
        self
    }

    /// Reject values the guard or client cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.rate_limit.max_attempts == 0 {
            return Err(IntakeError::config("rate_limit.max_attempts must be at least 1"));
        }
        if self.rate_limit.interval_ms <= 0 {
            return Err(IntakeError::config("rate_limit.interval_ms must be positive"));
        }
        if self.timeout_ms == 0 {
            return Err(IntakeError::config("timeout_ms must be positive"));
        }
        if self.document_store.app_id.contains('/') {
            return Err(IntakeError::config("document_store.app_id must not contain '/'"));
        }
        Ok(())
    }

    /// Whether the selected backend has somewhere to send to
    pub fn is_configured(&self) -> bool {
        match self.backend {
            Backend::Sheets => !self.endpoint_url.trim().is_empty(),
            Backend::DocumentStore => self.document_store.is_configured(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(variable = name, value = %raw, "Ignoring unparseable environment value");
            None
        }
    }
}

/// Builder for IntakeConfig
pub struct IntakeConfigBuilder {
    config: IntakeConfig,
}

impl IntakeConfigBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        Self {
            config: IntakeConfig::default(),
        }
    }

    /// Set the remote endpoint
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint_url = url.into();
        self
    }

    /// Set the throttle window
    pub fn rate_limit(mut self, max_attempts: u32, interval_ms: i64) -> Self {
        self.config.rate_limit.max_attempts = max_attempts;
        self.config.rate_limit.interval_ms = interval_ms;
        self
    }

    /// Set the timeout in milliseconds
    pub fn timeout_ms(mut self, timeout: u64) -> Self {
        self.config.timeout_ms = timeout;
        self
    }

    /// Set the local state directory
    pub fn state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.state_dir = dir.into();
        self
    }

    /// Select the submission backend
    pub fn backend(mut self, backend: Backend) -> Self {
        self.config.backend = backend;
        self
    }

    /// Point the document store at a project, optionally on another API root
    pub fn document_store(
        mut self,
        base_url: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        self.config.document_store.base_url = base_url.into();
        self.config.document_store.project_id = project_id.into();
        self
    }

    /// Set the user agent string
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> IntakeConfig {
        self.config
    }
}

impl Default for IntakeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = IntakeConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.rate_limit.max_attempts, 3);
        assert_eq!(config.rate_limit.interval_ms, 300_000);
        assert!(config.user_agent.starts_with("report-intake/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = IntakeConfig::builder()
            .endpoint("https://script.example.com/exec")
            .rate_limit(5, 60_000)
            .timeout_ms(1_000)
            .state_dir("/tmp/state")
            .user_agent("test-agent")
            .build();

        assert!(config.is_configured());
        assert_eq!(config.rate_limit.max_attempts, 5);
        assert_eq!(config.rate_limit.interval_ms, 60_000);
        assert_eq!(config.timeout_ms, 1_000);
        assert_eq!(config.state_dir, PathBuf::from("/tmp/state"));
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
endpoint_url = "https://example.com/hook"

[rate_limit]
max_attempts = 2
interval_ms = 1000
"#
        )
        .unwrap();

        let config = IntakeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.endpoint_url, "https://example.com/hook");
        assert_eq!(config.rate_limit.max_attempts, 2);
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.backend, Backend::Sheets);
        assert_eq!(config.document_store.app_id, "default-app-id");
    }

    #[test]
    fn test_document_store_section() {
        let config: IntakeConfig = toml::from_str(
            r#"
backend = "document_store"

[document_store]
project_id = "canal-protecao"
app_id = "escola-1"
"#,
        )
        .unwrap();

        assert_eq!(config.backend, Backend::DocumentStore);
        assert_eq!(config.document_store.project_id, "canal-protecao");
        assert_eq!(config.document_store.base_url, "https://firestore.googleapis.com");
        assert!(config.is_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("sheets".parse::<Backend>().unwrap(), Backend::Sheets);
        assert_eq!("Document-Store".parse::<Backend>().unwrap(), Backend::DocumentStore);
        assert!(matches!("ftp".parse::<Backend>(), Err(IntakeError::Config(_))));
        assert_eq!(Backend::DocumentStore.to_string(), "document_store");
    }

    #[test]
    fn test_is_configured_follows_backend() {
        let config = IntakeConfig::builder()
            .endpoint("https://script.example.com/exec")
            .backend(Backend::DocumentStore)
            .build();
        assert!(!config.is_configured());

        let config = IntakeConfig::builder()
            .backend(Backend::DocumentStore)
            .document_store("http://localhost:8080", "demo")
            .build();
        assert!(config.is_configured());
    }

    #[test]
    fn test_validate_rejects_app_id_with_slash() {
        let mut config = IntakeConfig::default();
        config.document_store.app_id = "a/b".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_missing_file() {
        let err = IntakeConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, IntakeError::FileError(_)));
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let config = IntakeConfig::builder().rate_limit(0, 1_000).build();
        assert!(matches!(config.validate(), Err(IntakeError::Config(_))));

        let config = IntakeConfig::builder().rate_limit(1, 0).build();
        assert!(config.validate().is_err());
    }
}
