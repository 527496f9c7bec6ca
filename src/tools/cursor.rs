//! Cursor admin tools
//!
//! One tool per client operation. Arguments are already schema-checked by
//! the registry when `execute` runs.

use super::{Tool, ToolError, ToolMetadata, ToolResult};
use crate::core::client::CursorAdminClient;
use crate::core::error::{ClientError, ValidationError};
use crate::core::types::{SpendingOptions, DAY_MS, MAX_USAGE_RANGE_DAYS};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Number, Value};
use std::sync::Arc;

/// Lists team members
pub struct GetTeamMembersTool {
    client: Arc<CursorAdminClient>,
}

impl GetTeamMembersTool {
    pub fn new(client: Arc<CursorAdminClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetTeamMembersTool {
    fn metadata(&self) -> ToolMetadata {
        crate::tool_metadata! {
            name: "get_team_members",
            description: "Get list of team members with their names, emails, and roles",
            parameters: []
        }
    }

    /// Takes no arguments; whatever the host sends is ignored
    fn validate(&self, _args: &Value) -> Result<(), ToolError> {
        Ok(())
    }

    async fn execute(&self, _args: Value) -> Result<ToolResult, ToolError> {
        let members = self
            .client
            .get_team_members()
            .await
            .map_err(ToolError::execution_failed)?;
        ToolResult::json(&members)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailyUsageArgs {
    start_date: Number,
    end_date: Number,
}

/// Fetches daily usage metrics for a date range
pub struct GetDailyUsageDataTool {
    client: Arc<CursorAdminClient>,
}

impl GetDailyUsageDataTool {
    pub fn new(client: Arc<CursorAdminClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetDailyUsageDataTool {
    fn metadata(&self) -> ToolMetadata {
        crate::tool_metadata! {
            name: "get_daily_usage_data",
            description: "Get detailed daily usage metrics for the team including lines added/deleted, AI suggestions, and model usage",
            parameters: [
                {
                    name: "startDate",
                    type: "number",
                    description: "Start date in epoch milliseconds",
                    required: true
                },
                {
                    name: "endDate",
                    type: "number",
                    description: "End date in epoch milliseconds",
                    required: true
                }
            ]
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, ToolError> {
        let args: DailyUsageArgs = serde_json::from_value(args)
            .map_err(|e| ToolError::invalid_arguments(vec![e.to_string()]))?;

        let span_days = (as_f64(&args.end_date) - as_f64(&args.start_date)) / DAY_MS as f64;
        if span_days > MAX_USAGE_RANGE_DAYS as f64 {
            return Err(ToolError::InvalidParams(
                ValidationError::RangeTooLong.to_string(),
            ));
        }

        let start_date = epoch_millis(&args.start_date)
            .ok_or(ClientError::Validation(ValidationError::InvalidStartDate))
            .map_err(ToolError::execution_failed)?;
        let end_date = epoch_millis(&args.end_date)
            .ok_or(ClientError::Validation(ValidationError::InvalidEndDate))
            .map_err(ToolError::execution_failed)?;

        let usage = self
            .client
            .get_daily_usage_data(start_date, end_date)
            .await
            .map_err(ToolError::execution_failed)?;
        ToolResult::json(&usage)
    }
}

/// Fetches per-member spend with optional filtering and pagination
pub struct GetSpendingDataTool {
    client: Arc<CursorAdminClient>,
}

impl GetSpendingDataTool {
    pub fn new(client: Arc<CursorAdminClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetSpendingDataTool {
    fn metadata(&self) -> ToolMetadata {
        crate::tool_metadata! {
            name: "get_spending_data",
            description: "Get team member spending information with optional filtering and pagination",
            parameters: [
                {
                    name: "searchTerm",
                    type: "string",
                    description: "Search term for filtering",
                    required: false
                },
                {
                    name: "sortBy",
                    type: "string",
                    description: "Field to sort by",
                    required: false
                },
                {
                    name: "sortDirection",
                    type: "string",
                    description: "Sort direction",
                    required: false,
                    values: ["asc", "desc"]
                },
                {
                    name: "page",
                    type: "number",
                    description: "Page number",
                    required: false
                },
                {
                    name: "pageSize",
                    type: "number",
                    description: "Number of items per page",
                    required: false
                }
            ]
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, ToolError> {
        let args = match args {
            Value::Null => Value::Object(Default::default()),
            args => args,
        };
        let options: SpendingOptions = serde_json::from_value(args)
            .map_err(|e| ToolError::invalid_arguments(vec![e.to_string()]))?;

        let spending = self
            .client
            .get_spending_data(Some(&options))
            .await
            .map_err(ToolError::execution_failed)?;
        ToolResult::json(&spending)
    }
}

fn as_f64(value: &Number) -> f64 {
    value.as_f64().unwrap_or(f64::NAN)
}

/// Integral JSON number as epoch milliseconds; fractional values are rejected
fn epoch_millis(value: &Number) -> Option<i64> {
    if let Some(v) = value.as_i64() {
        return Some(v);
    }
    let v = value.as_f64()?;
    if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}
