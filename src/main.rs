use anyhow::Result;
use clap::Parser;
use cursor_admin::cli::{Cli, Commands};
use cursor_admin::{
    utils, ClientError, CursorAdminClient, MCPServer, Settings, SpendingOptions, ToolRegistry,
    DAY_MS,
};
use serde::Serialize;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            utils::print_error(&format!("Error: {:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::new()?;
    init_logging(&settings);

    let api_key = Settings::api_key()?;
    let client = CursorAdminClient::with_config(api_key, &settings.api)?;

    match cli.command {
        Commands::Serve => handle_serve(client, &settings).await,
        Commands::TestConnection => handle_test_connection(&client).await,
        Commands::Members => print_json(&client.get_team_members().await?),
        Commands::Usage { start, end, days } => handle_usage(&client, start, end, days).await,
        Commands::Spending {
            search,
            sort_by,
            direction,
            page,
            page_size,
        } => {
            let options = SpendingOptions {
                search_term: search,
                sort_by,
                sort_direction: direction.map(Into::into),
                page: page.map(Into::into),
                page_size: page_size.map(Into::into),
            };
            print_json(&client.get_spending_data(Some(&options)).await?)
        }
        Commands::Debug => handle_debug(&client).await,
    }
}

/// Logs go to stderr; stdout carries MCP frames and command output
fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn handle_serve(client: CursorAdminClient, settings: &Settings) -> Result<()> {
    let registry = ToolRegistry::with_client(Arc::new(client));
    let server = Arc::new(MCPServer::new(settings.server.name.clone(), registry));
    server.run_stdio().await
}

async fn handle_test_connection(client: &CursorAdminClient) -> Result<()> {
    utils::print_header("Testing connection to Cursor API");

    match client.test_connection().await {
        Ok(_) => utils::print_success("Successfully connected to Cursor API"),
        Err(e) => {
            if matches!(e, ClientError::InvalidApiKey) {
                utils::print_hint("Please check that:");
                utils::print_hint("  1. Your API key is correct");
                utils::print_hint("  2. You have admin access to the team");
                utils::print_hint("  3. The API key hasn't been revoked");
            }
            return Err(anyhow::anyhow!("Connection test failed: {}", e));
        }
    }

    let members = client.get_team_members().await?;
    utils::print_info(&format!("Found {} team members:", members.len()));
    for (i, member) in members.iter().enumerate() {
        println!("  {}. {} ({}) - {}", i + 1, member.name, member.email, member.role);
    }

    Ok(())
}

async fn handle_usage(
    client: &CursorAdminClient,
    start: Option<i64>,
    end: Option<i64>,
    days: i64,
) -> Result<()> {
    let (start, end) = match (start, end) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            let now = now_millis()?;
            (now - days * DAY_MS, now)
        }
    };

    print_json(&client.get_daily_usage_data(start, end).await?)
}

async fn handle_debug(client: &CursorAdminClient) -> Result<()> {
    utils::print_header("1. GET /teams/members");
    report(client.get_team_members().await);

    utils::print_header("2. POST /teams/daily-usage-data (last 7 days)");
    let now = now_millis()?;
    report(client.get_daily_usage_data(now - 7 * DAY_MS, now).await);

    utils::print_header("3. POST /teams/spend");
    report(client.get_spending_data(None).await);

    Ok(())
}

fn report<T: Serialize>(result: Result<T, ClientError>) {
    match result {
        Ok(value) => {
            if let Err(e) = print_json(&value) {
                utils::print_error(&format!("Error: {}", e));
            }
        }
        Err(ClientError::Api(e)) => {
            utils::print_error(&format!("Error [{}]: {}", e.status_code, e.message));
            if let Some(response) = e.response {
                utils::print_info(&format!("Response: {}", response));
            }
        }
        Err(e) => utils::print_error(&format!("Error: {}", e)),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn now_millis() -> Result<i64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as i64)
}
