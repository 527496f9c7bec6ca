//! Cursor Admin - client and MCP tool server for the Cursor team admin API
//!
//! The library exposes a typed HTTP client for the three team endpoints
//! (members, daily usage, spending) and a tool layer that publishes the
//! same operations to an MCP host over stdio.

mod config;
pub mod core;
pub mod tools;
pub mod utils;

pub mod cli;

pub use self::config::{ApiConfig, LoggingConfig, ServerConfig, Settings, API_KEY_ENV};
pub use self::core::client::{validate_usage_range, CursorAdminClient};
pub use self::core::error::{ClientError, CursorApiError, ValidationError};
pub use self::core::mcp::MCPServer;
pub use self::core::types::{
    DailyUsageData, DailyUsageEntry, SortDirection, SpendingData, SpendingOptions, TeamMember,
    TeamMemberSpend, UsagePeriod, DAY_MS, MAX_USAGE_RANGE_DAYS,
};
pub use tools::registry::ToolRegistry;
pub use tools::{Tool, ToolError, ToolMetadata, ToolResult};
