pub mod client;
pub mod error;
pub mod mcp;
pub mod types;
