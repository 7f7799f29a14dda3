// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod enums;
pub mod incident;
pub mod metrics;
pub mod timestamp;

pub use enums::{
    ActionStatus, ActionType, DetectionSource, Environment, IncidentStatus, Priority, ServiceTier,
    Severity, TimelineType, Variant,
};
pub use incident::{
    ActionItem, Communication, CustomerReports, Detection, ExternalComms, Impact, Incident,
    InternalComms, Link, ReferenceList, Response, RootCause, Service, Signal, SlaSlo, Summary,
    TimeWindow, TimelineEvent,
};
pub use metrics::{IncidentMetrics, format_minute_count, format_minutes};
pub use timestamp::Timestamp;
