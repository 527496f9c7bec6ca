//! Cursor admin API data model
//!
//! All dates are epoch milliseconds. Values are decoded once per response
//! and never mutated afterwards.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Milliseconds in one day
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Longest span accepted by the daily usage endpoint, in days
pub const MAX_USAGE_RANGE_DAYS: i64 = 90;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TeamMembersResponse {
    pub team_members: Vec<TeamMember>,
}

/// One user's metrics for one day.
///
/// Fields the API adds later land in `extra` and are written back out
/// unchanged when the entry is serialized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyUsageEntry {
    pub date: i64,
    pub email: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub total_lines_added: u64,
    #[serde(default)]
    pub total_lines_deleted: u64,
    #[serde(default)]
    pub accepted_lines_added: u64,
    #[serde(default)]
    pub accepted_lines_deleted: u64,
    #[serde(default)]
    pub total_applies: u64,
    #[serde(default)]
    pub total_accepts: u64,
    #[serde(default)]
    pub total_rejects: u64,
    #[serde(default)]
    pub total_tabs_shown: u64,
    #[serde(default)]
    pub total_tabs_accepted: u64,
    #[serde(default)]
    pub composer_requests: u64,
    #[serde(default)]
    pub chat_requests: u64,
    #[serde(default)]
    pub agent_requests: u64,
    #[serde(default)]
    pub cmdk_usages: u64,
    #[serde(default)]
    pub subscription_included_reqs: u64,
    #[serde(default)]
    pub api_key_reqs: u64,
    #[serde(default)]
    pub usage_based_reqs: u64,
    #[serde(default)]
    pub bugbot_usages: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_used_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_most_used_extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_version: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsagePeriod {
    pub start_date: i64,
    pub end_date: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyUsageData {
    pub period: UsagePeriod,
    pub data: Vec<DailyUsageEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Request modifiers for `/teams/spend`, sent as-is.
///
/// Unset fields are omitted, so `SpendingOptions::default()` serializes to `{}`.
/// Page numbers are kept as the JSON numbers the caller gave; bounds are the
/// service's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<Number>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberSpend {
    pub spend_cents: i64,
    #[serde(default)]
    pub fast_premium_requests: u64,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub hard_limit_override_dollars: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingData {
    pub team_member_spend: Vec<TeamMemberSpend>,
    pub subscription_cycle_start: i64,
    pub total_members: u64,
    pub total_pages: u64,
}
