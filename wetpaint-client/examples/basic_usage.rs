//! Basic usage example for the Wetpaint client
//!
//! This example demonstrates how to:
//! - Load configuration for one environment
//! - Turn on request logging
//! - Log a user in
//! - Create and fetch cells
//! - Log the user out
//!
//! Note: This example needs a reachable Wetpaint server. Point it at a
//! settings file with `WETPAINT_CONFIG` (defaults to `config/wetpaint.yml`)
//! and pick the environment with `WETPAINT_ENV` (defaults to `development`).

use std::time::Duration;
use tracing_subscriber::EnvFilter;
use wetpaint_client::{Role, ServiceConfig, WetpaintClient, WetpaintError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=wetpaint_client=debug shows every outgoing call
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::var("WETPAINT_CONFIG").unwrap_or_else(|_| "config/wetpaint.yml".into());
    let environment = std::env::var("WETPAINT_ENV").unwrap_or_else(|_| "development".into());

    println!("=== Loading {} settings from {} ===", environment, path);
    let config = ServiceConfig::from_file(&path, &environment)?;

    let client = WetpaintClient::builder(config)
        .client_builder(reqwest::blocking::Client::builder().timeout(Duration::from_secs(30)))
        .build()?;
    println!("✓ Client created for {}", client.server_url());

    println!("\nLogging in...");
    let token = client
        .users()
        .login("42", "user@example.com", Role::Registered, false)?;
    println!("✓ Got ticket {}", token);

    let cells = client.cells(Some(token.clone()));

    println!("\nCreating cell...");
    match cells.create_cell("Home", "http://example.com/home", None, None) {
        Ok(cell_id) => {
            println!("✓ Created cell {}", cell_id);
            let xml = cells.get_cell_with_children(&cell_id)?;
            println!("Cell with children: {}", xml);
        }
        Err(WetpaintError::Call(err)) => {
            println!("✗ Service rejected the cell: {}", err.cause);
            for message in &err.messages {
                println!("  - {}", message);
            }
        }
        Err(e) => return Err(e.into()),
    }

    println!("\nLogging out...");
    client.users().logout(&token)?;
    println!("✓ Done");

    Ok(())
}
