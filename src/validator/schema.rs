// file: src/validator/schema.rs
// description: Closed field sets and decoders for every incident section
// reference: incident schema, one decoder per record type

use super::fields::{Decoder, FieldPath};
use super::invariants;
use crate::models::incident::{DEFAULT_TIMEZONE, DEFAULT_VERSION};
use crate::models::{
    ActionItem, Communication, CustomerReports, Detection, ExternalComms, Impact, Incident,
    InternalComms, Link, ReferenceList, Response, RootCause, Service, Signal, SlaSlo, Summary,
    TimeWindow, TimelineEvent,
};
use serde_json::Value;

const INCIDENT_FIELDS: &[&str] = &[
    "version",
    "incident_id",
    "title",
    "status",
    "severity",
    "service",
    "time",
    "summary",
    "impact",
    "detection",
    "timeline",
    "root_cause",
    "response",
    "communication",
    "action_items",
    "tags",
    "references",
];
const LINK_FIELDS: &[&str] = &["label", "url"];
const SERVICE_FIELDS: &[&str] = &["name", "owner_team", "environment", "tier"];
const TIME_WINDOW_FIELDS: &[&str] = &["timezone", "start", "end", "detected", "mitigated"];
const SUMMARY_FIELDS: &[&str] = &["what_happened", "user_impact", "duration_minutes"];
const SLA_SLO_FIELDS: &[&str] = &["slo_breached", "slo_name", "breach_window"];
const IMPACT_FIELDS: &[&str] = &[
    "customers_affected_estimate",
    "regions_affected",
    "request_error_rate_peak_percent",
    "latency_p95_peak_ms",
    "business_impact",
    "sla_slo",
];
const SIGNAL_FIELDS: &[&str] = &["source", "name", "details"];
const CUSTOMER_REPORTS_FIELDS: &[&str] = &["count", "channels"];
const DETECTION_FIELDS: &[&str] = &["detected_by", "signals", "customer_reports", "gaps"];
const TIMELINE_EVENT_FIELDS: &[&str] = &["time", "type", "actor", "message", "links"];
const ROOT_CAUSE_FIELDS: &[&str] = &[
    "direct_cause",
    "contributing_factors",
    "why_it_was_not_prevented",
];
const RESPONSE_FIELDS: &[&str] = &[
    "what_worked_well",
    "what_did_not_work_well",
    "where_we_got_lucky",
];
const INTERNAL_COMMS_FIELDS: &[&str] = &["channel", "started_at"];
const EXTERNAL_COMMS_FIELDS: &[&str] = &[
    "status_page_used",
    "first_update_at",
    "updates_count",
    "customer_message",
];
const COMMUNICATION_FIELDS: &[&str] = &["internal", "external"];
const ACTION_ITEM_FIELDS: &[&str] = &[
    "id",
    "title",
    "owner",
    "priority",
    "due",
    "type",
    "status",
    "success_criteria",
    "links",
];
const REFERENCE_LIST_FIELDS: &[&str] = &["dashboards", "logs", "runbooks"];

pub fn decode_incident(d: &mut Decoder, value: &Value) -> Option<Incident> {
    let obj = d.object(value, FieldPath::root(), INCIDENT_FIELDS)?;

    let version = d.text_or(&obj, "version", DEFAULT_VERSION, 0);
    let incident_id = d.text(&obj, "incident_id");
    let title = d.text(&obj, "title");
    let status = d.choice(&obj, "status");
    let severity = d.choice(&obj, "severity");
    let service = d.nested(&obj, "service", decode_service);
    let time = d.nested(&obj, "time", decode_time_window);
    let summary = d.nested(&obj, "summary", decode_summary);
    let impact = d.nested(&obj, "impact", decode_impact);
    let detection = d.nested(&obj, "detection", decode_detection);
    let timeline = d.list(&obj, "timeline", decode_timeline_event);
    let root_cause = d.nested(&obj, "root_cause", decode_root_cause);
    let response = d.nested(&obj, "response", decode_response);
    let communication = d.nested(&obj, "communication", decode_communication);
    let action_items = d.list(&obj, "action_items", decode_action_item);
    let tags = d.text_list(&obj, "tags");
    let references = d.nested_or_default(&obj, "references", decode_reference_list);

    if let Some(events) = &timeline {
        d.extend(invariants::timeline_order(
            events,
            &obj.path().key("timeline"),
        ));
    }

    Some(Incident {
        version: version?,
        incident_id: incident_id?,
        title: title?,
        status: status?,
        severity: severity?,
        service: service?,
        time: time?,
        summary: summary?,
        impact: impact?,
        detection: detection?,
        timeline: timeline?,
        root_cause: root_cause?,
        response: response?,
        communication: communication?,
        action_items: action_items?,
        tags: tags?,
        references: references?,
    })
}

fn decode_link(d: &mut Decoder, value: &Value, path: FieldPath) -> Option<Link> {
    let obj = d.object(value, path, LINK_FIELDS)?;
    let label = d.text(&obj, "label");
    let url = d.url(&obj, "url");

    Some(Link {
        label: label?,
        url: url?,
    })
}

fn decode_service(d: &mut Decoder, value: &Value, path: FieldPath) -> Option<Service> {
    let obj = d.object(value, path, SERVICE_FIELDS)?;
    let name = d.text(&obj, "name");
    let owner_team = d.text(&obj, "owner_team");
    let environment = d.choice(&obj, "environment");
    let tier = d.choice(&obj, "tier");

    Some(Service {
        name: name?,
        owner_team: owner_team?,
        environment: environment?,
        tier: tier?,
    })
}

fn decode_time_window(d: &mut Decoder, value: &Value, path: FieldPath) -> Option<TimeWindow> {
    let obj = d.object(value, path, TIME_WINDOW_FIELDS)?;
    let timezone = d.text_or(&obj, "timezone", DEFAULT_TIMEZONE, 1);
    let start = d.timestamp(&obj, "start");
    let end = d.timestamp(&obj, "end");
    let detected = d.timestamp(&obj, "detected");
    let mitigated = d.timestamp(&obj, "mitigated");

    let window = TimeWindow {
        timezone: timezone?,
        start: start?,
        end: end?,
        detected: detected?,
        mitigated: mitigated?,
    };
    d.extend(invariants::time_window(&window, obj.path()));

    Some(window)
}

fn decode_summary(d: &mut Decoder, value: &Value, path: FieldPath) -> Option<Summary> {
    let obj = d.object(value, path, SUMMARY_FIELDS)?;
    let what_happened = d.text(&obj, "what_happened");
    let user_impact = d.text(&obj, "user_impact");
    let duration_minutes = d.count(&obj, "duration_minutes");

    Some(Summary {
        what_happened: what_happened?,
        user_impact: user_impact?,
        duration_minutes: duration_minutes?,
    })
}

fn decode_sla_slo(d: &mut Decoder, value: &Value, path: FieldPath) -> Option<SlaSlo> {
    let obj = d.object(value, path, SLA_SLO_FIELDS)?;
    let slo_breached = d.flag(&obj, "slo_breached");
    let slo_name = d.optional_text(&obj, "slo_name");
    let breach_window = d.optional_text(&obj, "breach_window");

    let sla = SlaSlo {
        slo_breached: slo_breached?,
        slo_name: slo_name?,
        breach_window: breach_window?,
    };
    d.extend(invariants::sla_slo(&sla, obj.path()));

    Some(sla)
}

fn decode_impact(d: &mut Decoder, value: &Value, path: FieldPath) -> Option<Impact> {
    let obj = d.object(value, path, IMPACT_FIELDS)?;
    let customers_affected_estimate = d.count(&obj, "customers_affected_estimate");
    let regions_affected = d.text_list(&obj, "regions_affected");
    let request_error_rate_peak_percent = d.measure(&obj, "request_error_rate_peak_percent");
    let latency_p95_peak_ms = d.count(&obj, "latency_p95_peak_ms");
    let business_impact = d.text(&obj, "business_impact");
    let sla_slo = d.nested(&obj, "sla_slo", decode_sla_slo);

    Some(Impact {
        customers_affected_estimate: customers_affected_estimate?,
        regions_affected: regions_affected?,
        request_error_rate_peak_percent: request_error_rate_peak_percent?,
        latency_p95_peak_ms: latency_p95_peak_ms?,
        business_impact: business_impact?,
        sla_slo: sla_slo?,
    })
}

fn decode_signal(d: &mut Decoder, value: &Value, path: FieldPath) -> Option<Signal> {
    let obj = d.object(value, path, SIGNAL_FIELDS)?;
    let source = d.text(&obj, "source");
    let name = d.text(&obj, "name");
    let details = d.text(&obj, "details");

    Some(Signal {
        source: source?,
        name: name?,
        details: details?,
    })
}

fn decode_customer_reports(
    d: &mut Decoder,
    value: &Value,
    path: FieldPath,
) -> Option<CustomerReports> {
    let obj = d.object(value, path, CUSTOMER_REPORTS_FIELDS)?;
    let count = d.count(&obj, "count");
    let channels = d.text_list(&obj, "channels");

    Some(CustomerReports {
        count: count?,
        channels: channels?,
    })
}

fn decode_detection(d: &mut Decoder, value: &Value, path: FieldPath) -> Option<Detection> {
    let obj = d.object(value, path, DETECTION_FIELDS)?;
    let detected_by = d.choice(&obj, "detected_by");
    let signals = d.list(&obj, "signals", decode_signal);
    let customer_reports = d.nested(&obj, "customer_reports", decode_customer_reports);
    let gaps = d.text_list(&obj, "gaps");

    Some(Detection {
        detected_by: detected_by?,
        signals: signals?,
        customer_reports: customer_reports?,
        gaps: gaps?,
    })
}

fn decode_timeline_event(d: &mut Decoder, value: &Value, path: FieldPath) -> Option<TimelineEvent> {
    let obj = d.object(value, path, TIMELINE_EVENT_FIELDS)?;
    let time = d.timestamp(&obj, "time");
    let kind = d.choice(&obj, "type");
    let actor = d.text(&obj, "actor");
    let message = d.text(&obj, "message");
    let links = d.list(&obj, "links", decode_link);

    Some(TimelineEvent {
        time: time?,
        kind: kind?,
        actor: actor?,
        message: message?,
        links: links?,
    })
}

fn decode_root_cause(d: &mut Decoder, value: &Value, path: FieldPath) -> Option<RootCause> {
    let obj = d.object(value, path, ROOT_CAUSE_FIELDS)?;
    let direct_cause = d.text(&obj, "direct_cause");
    let contributing_factors = d.text_list(&obj, "contributing_factors");
    let why_it_was_not_prevented = d.text(&obj, "why_it_was_not_prevented");

    Some(RootCause {
        direct_cause: direct_cause?,
        contributing_factors: contributing_factors?,
        why_it_was_not_prevented: why_it_was_not_prevented?,
    })
}

fn decode_response(d: &mut Decoder, value: &Value, path: FieldPath) -> Option<Response> {
    let obj = d.object(value, path, RESPONSE_FIELDS)?;
    let what_worked_well = d.text_list(&obj, "what_worked_well");
    let what_did_not_work_well = d.text_list(&obj, "what_did_not_work_well");
    let where_we_got_lucky = d.text_list(&obj, "where_we_got_lucky");

    Some(Response {
        what_worked_well: what_worked_well?,
        what_did_not_work_well: what_did_not_work_well?,
        where_we_got_lucky: where_we_got_lucky?,
    })
}

fn decode_internal_comms(d: &mut Decoder, value: &Value, path: FieldPath) -> Option<InternalComms> {
    let obj = d.object(value, path, INTERNAL_COMMS_FIELDS)?;
    let channel = d.text(&obj, "channel");
    let started_at = d.timestamp(&obj, "started_at");

    Some(InternalComms {
        channel: channel?,
        started_at: started_at?,
    })
}

fn decode_external_comms(d: &mut Decoder, value: &Value, path: FieldPath) -> Option<ExternalComms> {
    let obj = d.object(value, path, EXTERNAL_COMMS_FIELDS)?;
    let status_page_used = d.flag(&obj, "status_page_used");
    let first_update_at = d.optional_timestamp(&obj, "first_update_at");
    let updates_count = d.count_or(&obj, "updates_count", 0);
    let customer_message = d.optional_text(&obj, "customer_message");

    let external = ExternalComms {
        status_page_used: status_page_used?,
        first_update_at: first_update_at?,
        updates_count: updates_count?,
        customer_message: customer_message?,
    };
    d.extend(invariants::external_comms(&external, obj.path()));

    Some(external)
}

fn decode_communication(d: &mut Decoder, value: &Value, path: FieldPath) -> Option<Communication> {
    let obj = d.object(value, path, COMMUNICATION_FIELDS)?;
    let internal = d.nested(&obj, "internal", decode_internal_comms);
    let external = d.nested(&obj, "external", decode_external_comms);

    Some(Communication {
        internal: internal?,
        external: external?,
    })
}

fn decode_action_item(d: &mut Decoder, value: &Value, path: FieldPath) -> Option<ActionItem> {
    let obj = d.object(value, path, ACTION_ITEM_FIELDS)?;
    let id = d.text(&obj, "id");
    let title = d.text(&obj, "title");
    let owner = d.text(&obj, "owner");
    let priority = d.choice(&obj, "priority");
    let due = d.date(&obj, "due");
    let kind = d.choice(&obj, "type");
    let status = d.choice(&obj, "status");
    let success_criteria = d.optional_text(&obj, "success_criteria");
    let links = d.list(&obj, "links", decode_link);

    if let Some(id) = &id {
        d.extend(invariants::action_item_id(id, &obj.path().key("id")));
    }

    Some(ActionItem {
        id: id?,
        title: title?,
        owner: owner?,
        priority: priority?,
        due: due?,
        kind: kind?,
        status: status?,
        success_criteria: success_criteria?,
        links: links?,
    })
}

fn decode_reference_list(d: &mut Decoder, value: &Value, path: FieldPath) -> Option<ReferenceList> {
    let obj = d.object(value, path, REFERENCE_LIST_FIELDS)?;
    let dashboards = d.list(&obj, "dashboards", decode_link);
    let logs = d.list(&obj, "logs", decode_link);
    let runbooks = d.list(&obj, "runbooks", decode_link);

    Some(ReferenceList {
        dashboards: dashboards?,
        logs: logs?,
        runbooks: runbooks?,
    })
}
