// file: src/models/incident.rs
// description: Incident record and its nested postmortem sections
// reference: closed incident schema (YAML/JSON wire names)

use super::enums::{
    ActionStatus, ActionType, DetectionSource, Environment, IncidentStatus, Priority, ServiceTier,
    Severity, TimelineType,
};
use super::timestamp::Timestamp;
use chrono::NaiveDate;
use serde::Serialize;
use url::Url;

pub const DEFAULT_VERSION: &str = "1.0";
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// A fully validated incident. Built once by the validator, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Incident {
    pub version: String,
    pub incident_id: String,
    pub title: String,
    pub status: IncidentStatus,
    pub severity: Severity,
    pub service: Service,
    pub time: TimeWindow,
    pub summary: Summary,
    pub impact: Impact,
    pub detection: Detection,
    pub timeline: Vec<TimelineEvent>,
    pub root_cause: RootCause,
    pub response: Response,
    pub communication: Communication,
    pub action_items: Vec<ActionItem>,
    pub tags: Vec<String>,
    pub references: ReferenceList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    pub name: String,
    pub owner_team: String,
    pub environment: Environment,
    pub tier: ServiceTier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub timezone: String,
    pub start: Timestamp,
    pub end: Timestamp,
    pub detected: Timestamp,
    pub mitigated: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub what_happened: String,
    pub user_impact: String,
    pub duration_minutes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlaSlo {
    pub slo_breached: bool,
    pub slo_name: Option<String>,
    pub breach_window: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Impact {
    pub customers_affected_estimate: u64,
    pub regions_affected: Vec<String>,
    pub request_error_rate_peak_percent: f64,
    pub latency_p95_peak_ms: u64,
    pub business_impact: String,
    pub sla_slo: SlaSlo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signal {
    pub source: String,
    pub name: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerReports {
    pub count: u64,
    pub channels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub detected_by: DetectionSource,
    pub signals: Vec<Signal>,
    pub customer_reports: CustomerReports,
    pub gaps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEvent {
    pub time: Timestamp,
    #[serde(rename = "type")]
    pub kind: TimelineType,
    pub actor: String,
    pub message: String,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootCause {
    pub direct_cause: String,
    pub contributing_factors: Vec<String>,
    pub why_it_was_not_prevented: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Response {
    pub what_worked_well: Vec<String>,
    pub what_did_not_work_well: Vec<String>,
    pub where_we_got_lucky: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InternalComms {
    pub channel: String,
    pub started_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalComms {
    pub status_page_used: bool,
    pub first_update_at: Option<Timestamp>,
    pub updates_count: u64,
    pub customer_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Communication {
    pub internal: InternalComms,
    pub external: ExternalComms,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionItem {
    pub id: String,
    pub title: String,
    pub owner: String,
    pub priority: Priority,
    pub due: NaiveDate,
    #[serde(rename = "type")]
    pub kind: ActionType,
    pub status: ActionStatus,
    pub success_criteria: Option<String>,
    pub links: Vec<Link>,
}

impl ActionItem {
    /// Links rendered as `label: url` pairs joined with `; `.
    pub fn joined_links(&self) -> String {
        self.links
            .iter()
            .map(|l| format!("{}: {}", l.label, l.url))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceList {
    pub dashboards: Vec<Link>,
    pub logs: Vec<Link>,
    pub runbooks: Vec<Link>,
}

impl ReferenceList {
    pub fn is_empty(&self) -> bool {
        self.dashboards.is_empty() && self.logs.is_empty() && self.runbooks.is_empty()
    }
}
