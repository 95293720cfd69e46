//! Wetpaint Client Library
//!
//! This library wraps the Wetpaint user session and cell services: signed
//! logins, best-effort logouts and the cell hierarchy calls.
//!
//! # Features
//!
//! - Per-environment configuration from YAML or `WETPAINT_*` variables
//! - HMAC-SHA1 signed logins
//! - Failure detection for both XML failure envelopes and HTML error pages
//! - Blocking synchronous API
//! - Well-typed errors using thiserror
//! - Request logging through `tracing`
//!
//! # Example
//!
//! ```no_run
//! use wetpaint_client::{Role, ServiceConfig, WetpaintClient, WetpaintError};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServiceConfig::from_file("config/wetpaint.yml", "production")?;
//! let client = WetpaintClient::new(config)?;
//!
//! let token = client.users().login("42", "user@example.com", Role::Registered, false)?;
//!
//! let cells = client.cells(Some(token.clone()));
//! match cells.get_cell("home") {
//!     Ok(xml) => println!("{}", xml),
//!     Err(WetpaintError::Call(err)) => println!("Service said no: {}", err.cause),
//!     Err(other) => return Err(other.into()),
//! }
//!
//! client.users().logout(&token)?;
//! # Ok(())
//! # }
//! ```

mod cell;
mod client;
mod config;
mod error;
mod parser;
mod signing;
mod transport;
mod user;

pub use cell::CellService;
pub use client::{WetpaintClient, WetpaintClientBuilder};
pub use config::{ENV_DEVELOPER_KEY, ENV_NAMESPACE, ENV_SECRET, ENV_SERVER, ServiceConfig};
pub use error::{CallError, ConfigError, WetpaintError};
pub use signing::login_signature;
pub use transport::{CallRequest, HttpMethod};
pub use user::{Role, UserService, UserToken};
