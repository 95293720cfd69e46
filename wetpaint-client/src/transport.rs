//! Request description and HTTP dispatch

use crate::error::WetpaintError;
use std::fmt;

/// HTTP method of a service call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// A single service call described as plain data
///
/// Built fresh by each operation and consumed by the client's execution
/// pipeline. Parameters keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub method: HttpMethod,
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl CallRequest {
    /// Start a GET call to `path`
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Start a POST call to `path`
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Append a parameter
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Append a parameter only when a value is present
    pub fn param_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    /// Value of the first parameter called `name`
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Send `request` to `base_url` and return the raw response body
///
/// GET parameters travel in the query string, POST parameters in a
/// form-encoded body. The fully-qualified URL (with parameters) is logged at
/// debug level before dispatch. Status codes are not inspected; error pages
/// are left for the response parser to recognize.
pub(crate) fn send(
    client: &reqwest::blocking::Client,
    base_url: &reqwest::Url,
    request: &CallRequest,
) -> Result<String, WetpaintError> {
    let url = resolve(base_url, &request.path)?;

    let mut url_with_query = url.clone();
    if !request.params.is_empty() {
        url_with_query.query_pairs_mut().extend_pairs(&request.params);
    }
    tracing::debug!("Wetpaint: calling {} {}", request.method, url_with_query);

    let response = match request.method {
        HttpMethod::Get => client.get(url_with_query).send()?,
        HttpMethod::Post => client.post(url).form(&request.params).send()?,
    };

    // Decoding is lossy; the only failure left is reading the body
    Ok(response.text()?)
}

/// Resolve an absolute call path against the server URL
fn resolve(base_url: &reqwest::Url, path: &str) -> Result<reqwest::Url, WetpaintError> {
    let invalid = |reason: String| WetpaintError::InvalidPath {
        path: path.to_string(),
        reason,
    };
    if !path.starts_with('/') || path.starts_with("//") {
        return Err(invalid("expected a path starting with a single `/`".to_string()));
    }
    if path.contains(['?', '#']) {
        return Err(invalid("query and fragment belong in the parameters".to_string()));
    }
    base_url.join(path).map_err(|e| invalid(e.to_string()))
}
