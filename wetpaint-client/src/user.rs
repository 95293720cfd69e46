//! User session operations

use crate::client::WetpaintClient;
use crate::error::WetpaintError;
use crate::signing::login_signature;
use crate::transport::CallRequest;
use std::fmt;

const BASE_PATH: &str = "/UserService/";

/// Role a user is logged in with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Role {
    Moderator,
    #[default]
    Registered,
    Banned,
}

impl Role {
    /// Wire value of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Moderator => "moderator",
            Role::Registered => "registered",
            Role::Banned => "banned",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session ticket issued by [`UserService::login`]
///
/// Opaque to the client. The caller decides how long to keep it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserToken(String);

impl UserToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for UserToken {
    fn from(ticket: String) -> Self {
        Self(ticket)
    }
}

impl From<&str> for UserToken {
    fn from(ticket: &str) -> Self {
        Self(ticket.to_string())
    }
}

impl fmt::Display for UserToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Login and logout calls
#[derive(Debug, Clone, Copy)]
pub struct UserService<'a> {
    client: &'a WetpaintClient,
}

impl<'a> UserService<'a> {
    pub(crate) fn new(client: &'a WetpaintClient) -> Self {
        Self { client }
    }

    /// Log a user in and return their session ticket
    ///
    /// The request is signed with the configured secret over the developer
    /// key, `user_id` and the current Unix timestamp.
    ///
    /// # Errors
    ///
    /// * `WetpaintError::Request` - Network error
    /// * `WetpaintError::Call` - The service rejected the login
    /// * `WetpaintError::MissingField` - The response carried no ticket
    pub fn login(
        &self,
        user_id: &str,
        email: &str,
        role: Role,
        email_opt_in: bool,
    ) -> Result<UserToken, WetpaintError> {
        let timestamp = chrono::Utc::now().timestamp();
        let request = self.build_login(user_id, email, role, email_opt_in, timestamp);

        let response = self.client.execute_call(request)?;
        let ticket = self.client.parser().extract_ticket(&response.document)?;
        Ok(UserToken(ticket))
    }

    pub(crate) fn build_login(
        &self,
        user_id: &str,
        email: &str,
        role: Role,
        email_opt_in: bool,
        timestamp: i64,
    ) -> CallRequest {
        let config = self.client.config();
        let signature =
            login_signature(config.secret(), config.developer_key(), user_id, timestamp);

        CallRequest::post(format!("{BASE_PATH}login.do"))
            .param("user.userId", user_id)
            .param("user.email", email)
            .param("user.role", role.as_str())
            .param("user.emailOptIn", email_opt_in.to_string())
            .param("cred.ts", timestamp.to_string())
            .param("cred.sig", signature)
            .param("output", "api")
    }

    /// End a session
    ///
    /// Best effort: a failure reported by the service is logged and
    /// discarded. Transport errors are still returned.
    pub fn logout(&self, token: &UserToken) -> Result<(), WetpaintError> {
        let request = CallRequest::post(format!("{BASE_PATH}logout.do"))
            .param("ticket", token.as_str())
            .param("output", "api");

        match self.client.execute_call(request) {
            Ok(_) => Ok(()),
            Err(WetpaintError::Call(err)) => {
                tracing::debug!("Wetpaint: ignoring logout failure: {}", err);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}
