use clap::{Parser, Subcommand, ValueEnum};

use crate::core::types::SortDirection;

#[derive(Parser)]
#[command(name = "cursor-admin")]
#[command(author, version, about = "Cursor team admin API client and MCP server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the MCP server on stdio
    Serve,

    /// Check that the API key works and list the team
    TestConnection,

    /// Print team members as JSON
    Members,

    /// Print daily usage data as JSON
    Usage {
        /// Start date in epoch milliseconds
        #[arg(long, requires = "end")]
        start: Option<i64>,

        /// End date in epoch milliseconds
        #[arg(long, requires = "start")]
        end: Option<i64>,

        /// Look back this many days from now (ignored with --start/--end)
        #[arg(short, long, default_value = "7", value_parser = clap::value_parser!(i64).range(0..=90))]
        days: i64,
    },

    /// Print spending data as JSON
    Spending {
        /// Search term for filtering
        #[arg(short, long)]
        search: Option<String>,

        /// Field to sort by
        #[arg(long)]
        sort_by: Option<String>,

        #[arg(long, value_enum)]
        direction: Option<Direction>,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Call every endpoint and print each raw result or error
    Debug,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Direction {
    Asc,
    Desc,
}

impl From<Direction> for SortDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Asc => SortDirection::Asc,
            Direction::Desc => SortDirection::Desc,
        }
    }
}
