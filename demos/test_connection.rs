//! Test connection to the Cursor admin API
//!
//! Run with: cargo run --example test_connection
//! Requires CURSOR_API_KEY in the environment or a .env file.

use anyhow::Result;
use cursor_admin::{utils, ClientError, CursorAdminClient, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let api_key = Settings::api_key()?;
    let client = CursorAdminClient::new(api_key)?;

    utils::print_info("Testing API connection...");
    match client.test_connection().await {
        Ok(_) => utils::print_success("Successfully connected to Cursor API!"),
        Err(ClientError::InvalidApiKey) => {
            utils::print_error("Connection test failed: Invalid API key");
            std::process::exit(1);
        }
        Err(e) => {
            utils::print_error(&format!("Connection test failed: {}", e));
            std::process::exit(1);
        }
    }

    let members = client.get_team_members().await?;
    println!("Found {} team members:", members.len());
    for (i, member) in members.iter().enumerate() {
        println!("  {}. {} ({}) - {}", i + 1, member.name, member.email, member.role);
    }

    Ok(())
}
