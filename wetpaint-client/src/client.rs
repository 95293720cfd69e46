//! Wetpaint HTTP client and the shared call pipeline

use crate::cell::CellService;
use crate::config::ServiceConfig;
use crate::error::WetpaintError;
use crate::parser::{ResponseParser, ValidatedResponse};
use crate::transport::{self, CallRequest};
use crate::user::{UserService, UserToken};

/// The main Wetpaint client
///
/// Holds the immutable service configuration and a blocking HTTP client.
/// Operations are grouped into [`UserService`] and [`CellService`] views
/// borrowed from the client.
///
/// # Example
///
/// ```no_run
/// use wetpaint_client::{Role, ServiceConfig, WetpaintClient};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ServiceConfig::from_file("config/wetpaint.yml", "development")?;
/// let client = WetpaintClient::new(config)?;
///
/// let token = client.users().login("42", "user@example.com", Role::Registered, false)?;
/// let cell_id = client
///     .cells(Some(token.clone()))
///     .create_cell("Home", "http://example.com/home", None, None)?;
/// println!("Created cell {}", cell_id);
///
/// client.users().logout(&token)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct WetpaintClient {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
    config: ServiceConfig,
    parser: ResponseParser,
}

impl WetpaintClient {
    /// Create a new client with no redirect policy
    ///
    /// # Errors
    ///
    /// Returns `WetpaintError::ClientInit` if the HTTP client cannot be initialized.
    pub fn new(config: ServiceConfig) -> Result<Self, WetpaintError> {
        Self::builder(config).build()
    }

    /// Create a builder for configuring the client
    pub fn builder(config: ServiceConfig) -> WetpaintClientBuilder {
        WetpaintClientBuilder::new(config)
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Base URL every call path is resolved against
    pub fn server_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    /// Session operations
    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    /// Cell operations, authenticated with `user_token` where a call needs it
    pub fn cells(&self, user_token: Option<UserToken>) -> CellService<'_> {
        CellService::new(self, user_token)
    }

    /// Run one call through the pipeline
    ///
    /// Injects the developer key and namespace, sends the request and checks
    /// the body for a failure payload.
    pub(crate) fn execute_call(
        &self,
        request: CallRequest,
    ) -> Result<ValidatedResponse, WetpaintError> {
        let request = request
            .param("key", self.config.developer_key())
            .param("ns", self.config.namespace());

        let body = transport::send(&self.client, &self.base_url, &request)?;
        Ok(self.parser.validate(body)?)
    }

    pub(crate) fn parser(&self) -> &ResponseParser {
        &self.parser
    }
}

/// Builder for configuring a Wetpaint client
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use wetpaint_client::{ServiceConfig, WetpaintClient};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ServiceConfig::from_env()?;
/// let client = WetpaintClient::builder(config)
///     .client_builder(
///         reqwest::blocking::Client::builder()
///             .timeout(Duration::from_secs(30))
///     )
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WetpaintClientBuilder {
    config: ServiceConfig,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
}

impl WetpaintClientBuilder {
    /// Create a new builder for `config`
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            client_builder: None,
        }
    }

    /// Set a custom HTTP client builder
    ///
    /// This allows customization of timeouts, proxies and the like. The
    /// redirect policy is always overridden to `Policy::none()`.
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// * `WetpaintError::Config` - the configured server is not a valid host
    /// * `WetpaintError::ClientInit` - the HTTP client cannot be initialized
    pub fn build(self) -> Result<WetpaintClient, WetpaintError> {
        let base_url = self.config.server_url()?;

        let builder = self
            .client_builder
            .unwrap_or_else(|| reqwest::blocking::Client::builder().use_rustls_tls());

        let client = builder
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| WetpaintError::ClientInit(e.to_string()))?;

        Ok(WetpaintClient {
            client,
            base_url,
            config: self.config,
            parser: ResponseParser::new(),
        })
    }
}
