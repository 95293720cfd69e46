//! Service credentials and their loaders

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use zeroize::Zeroizing;

/// Environment variable holding the developer key
pub const ENV_DEVELOPER_KEY: &str = "WETPAINT_DEVELOPER_KEY";
/// Environment variable holding the signing secret
pub const ENV_SECRET: &str = "WETPAINT_SECRET";
/// Environment variable holding the namespace
pub const ENV_NAMESPACE: &str = "WETPAINT_NAMESPACE";
/// Environment variable holding the server host
pub const ENV_SERVER: &str = "WETPAINT_SERVER";

/// Credentials and endpoint for one Wetpaint environment
///
/// Immutable once constructed. Every field is required; constructors reject
/// blank values up front so a misconfigured service never reaches the wire.
#[derive(Clone)]
pub struct ServiceConfig {
    developer_key: String,
    secret: Zeroizing<String>,
    namespace: String,
    server: String,
}

/// One environment entry of a settings document, before validation
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    developer_key: Option<String>,
    secret: Option<String>,
    namespace: Option<String>,
    server: Option<String>,
}

impl ServiceConfig {
    /// Create a validated configuration
    ///
    /// # Errors
    ///
    /// * `ConfigError::MissingField` - a value is empty or whitespace
    /// * `ConfigError::InvalidServer` - `server` is not a usable host
    pub fn new(
        developer_key: impl Into<String>,
        secret: impl Into<String>,
        namespace: impl Into<String>,
        server: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            developer_key: required("developer_key", Some(developer_key.into()))?,
            secret: Zeroizing::new(required_verbatim("secret", Some(secret.into()))?),
            namespace: required("namespace", Some(namespace.into()))?,
            server: required("server", Some(server.into()))?,
        };
        config.server_url()?;
        Ok(config)
    }

    /// Load the settings for `environment` from a YAML document
    ///
    /// The document maps environment names to their settings:
    ///
    /// ```yaml
    /// development:
    ///   developer_key: dev-key
    ///   secret: dev-secret
    ///   namespace: sandbox
    ///   server: api.dev.example.com
    /// ```
    pub fn from_yaml_str(yaml: &str, environment: &str) -> Result<Self, ConfigError> {
        let mut environments: BTreeMap<String, RawSettings> = serde_yaml::from_str(yaml)?;
        let raw = environments
            .remove(environment)
            .ok_or_else(|| ConfigError::UnknownEnvironment(environment.to_string()))?;
        Self::from_raw(raw)
    }

    /// Load the settings for `environment` from a YAML file
    pub fn from_file(path: impl AsRef<Path>, environment: &str) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = Zeroizing::new(std::fs::read_to_string(path).map_err(|source| {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?);
        Self::from_yaml_str(&yaml, environment)
    }

    /// Load settings from the `WETPAINT_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_raw(RawSettings {
            developer_key: std::env::var(ENV_DEVELOPER_KEY).ok(),
            secret: std::env::var(ENV_SECRET).ok(),
            namespace: std::env::var(ENV_NAMESPACE).ok(),
            server: std::env::var(ENV_SERVER).ok(),
        })
    }

    fn from_raw(raw: RawSettings) -> Result<Self, ConfigError> {
        let developer_key = required("developer_key", raw.developer_key)?;
        let secret = Zeroizing::new(required_verbatim("secret", raw.secret)?);
        let namespace = required("namespace", raw.namespace)?;
        let server = required("server", raw.server)?;
        Self::new(developer_key, secret.as_str(), namespace, server)
    }

    /// Developer key sent as `key` on every call
    pub fn developer_key(&self) -> &str {
        &self.developer_key
    }

    /// Shared secret used to sign logins
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Namespace sent as `ns` on every call
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Server host, without scheme
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Base URL of the service (`http://{server}`)
    pub fn server_url(&self) -> Result<reqwest::Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidServer {
            server: self.server.clone(),
            reason,
        };
        let url = reqwest::Url::parse(&format!("http://{}", self.server))
            .map_err(|e| invalid(e.to_string()))?;
        if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("expected a bare host".to_string()));
        }
        Ok(url)
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("developer_key", &self.developer_key)
            .field("secret", &"<redacted>")
            .field("namespace", &self.namespace)
            .field("server", &self.server)
            .finish()
    }
}

fn required(name: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    required_verbatim(name, value).map(|v| v.trim().to_string())
}

/// Like [`required`] but keeps surrounding whitespace, which is significant
/// in the signing secret
fn required_verbatim(name: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingField(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SETTINGS: &str = r#"
development:
  developer_key: dev-key
  secret: dev-secret
  namespace: sandbox
  server: api.dev.example.com
production:
  developer_key: prod-key
  secret: prod-secret
  namespace: live
  server: api.example.com:8080
"#;

    #[test]
    fn test_selects_requested_environment() {
        let config = ServiceConfig::from_yaml_str(SETTINGS, "production").unwrap();
        assert_eq!(config.developer_key(), "prod-key");
        assert_eq!(config.secret(), "prod-secret");
        assert_eq!(config.namespace(), "live");
        assert_eq!(config.server(), "api.example.com:8080");
        assert_eq!(
            config.server_url().unwrap().as_str(),
            "http://api.example.com:8080/"
        );
    }

    #[test]
    fn test_unknown_environment() {
        let err = ServiceConfig::from_yaml_str(SETTINGS, "staging").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEnvironment(env) if env == "staging"));
    }

    #[test]
    fn test_missing_field_fails_fast() {
        let yaml = "test:\n  developer_key: k\n  namespace: ns\n  server: localhost\n";
        let err = ServiceConfig::from_yaml_str(yaml, "test").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("secret")));
    }

    #[test]
    fn test_blank_field_is_missing() {
        let err = ServiceConfig::new("k", "s", "  ", "localhost").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("namespace")));
    }

    #[test]
    fn test_secret_whitespace_is_preserved() {
        let config = ServiceConfig::new(" k ", "  s p  ", "ns", "localhost").unwrap();
        assert_eq!(config.developer_key(), "k");
        assert_eq!(config.secret(), "  s p  ");

        let yaml = "test:\n  developer_key: k\n  secret: \" padded \"\n  namespace: ns\n  server: localhost\n";
        let config = ServiceConfig::from_yaml_str(yaml, "test").unwrap();
        assert_eq!(config.secret(), " padded ");
    }

    #[test]
    fn test_blank_secret_is_missing() {
        let err = ServiceConfig::new("k", " \t ", "ns", "localhost").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("secret")));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ServiceConfig::from_yaml_str("development: [unclosed", "development").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_server_with_path_is_rejected() {
        let err = ServiceConfig::new("k", "s", "ns", "example.com/api").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidServer { .. }));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = ServiceConfig::new("k", "hunter2", "ns", "localhost").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SETTINGS.as_bytes()).unwrap();

        let config = ServiceConfig::from_file(file.path(), "development").unwrap();
        assert_eq!(config.server(), "api.dev.example.com");
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wetpaint.yml");
        let err = ServiceConfig::from_file(&path, "development").unwrap_err();
        assert!(matches!(err, ConfigError::Io { path: p, .. } if p == path));
    }
}
