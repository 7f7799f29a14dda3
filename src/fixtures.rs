// file: src/fixtures.rs
// description: Sample incident trees shared by unit tests
// reference: test support

use serde_json::{Value, json};

/// A complete, valid incident exercising every section.
pub fn sample_incident() -> Value {
    json!({
        "version": "1.0",
        "incident_id": "INC-2024-001",
        "title": "Checkout API elevated 5xx errors",
        "status": "resolved",
        "severity": "SEV-2",
        "service": {
            "name": "checkout-api",
            "owner_team": "payments",
            "environment": "production",
            "tier": "critical"
        },
        "time": {
            "timezone": "UTC",
            "start": "2024-01-01T00:00:00",
            "end": "2024-01-01T01:00:00",
            "detected": "2024-01-01T00:10:00",
            "mitigated": "2024-01-01T00:40:00"
        },
        "summary": {
            "what_happened": "A bad config push exhausted the connection pool.",
            "user_impact": "Checkout failed for a subset of users.",
            "duration_minutes": 60
        },
        "impact": {
            "customers_affected_estimate": 1200,
            "regions_affected": ["eu-west-1", "us-east-1"],
            "request_error_rate_peak_percent": 12.5,
            "latency_p95_peak_ms": 2300,
            "business_impact": "Lost orders during the peak window.",
            "sla_slo": {
                "slo_breached": true,
                "slo_name": "checkout-availability-99.9",
                "breach_window": "00:05-00:40 UTC"
            }
        },
        "detection": {
            "detected_by": "monitoring_alert",
            "signals": [
                {"source": "prometheus", "name": "http_5xx_rate", "details": "5xx above 5% for 5m"}
            ],
            "customer_reports": {"count": 3, "channels": ["support", "twitter"]},
            "gaps": ["No alert on connection pool saturation"]
        },
        "timeline": [
            {"time": "2024-01-01T00:00:00", "type": "trigger", "actor": "deploy-bot", "message": "Config change deployed"},
            {"time": "2024-01-01T00:10:00", "type": "detection", "actor": "alertmanager", "message": "5xx alert fired",
             "links": [{"label": "alert", "url": "https://alerts.example.com/a/1"}]},
            {"time": "2024-01-01T00:40:00", "type": "mitigation", "actor": "alice", "message": "Config rolled back"}
        ],
        "root_cause": {
            "direct_cause": "Pool size set to 1 by a typo.",
            "contributing_factors": ["No config validation in CI"],
            "why_it_was_not_prevented": "Config changes skip canary."
        },
        "response": {
            "what_worked_well": ["Fast rollback"],
            "what_did_not_work_well": ["Paging took 10 minutes"],
            "where_we_got_lucky": ["Low traffic hour"]
        },
        "communication": {
            "internal": {"channel": "#inc-checkout", "started_at": "2024-01-01T00:12:00"},
            "external": {
                "status_page_used": true,
                "first_update_at": "2024-01-01T00:20:00",
                "updates_count": 3,
                "customer_message": "Some checkouts are failing; we are investigating."
            }
        },
        "action_items": [
            {
                "id": "AI-1",
                "title": "Validate pool size in CI",
                "owner": "payments",
                "priority": "P1",
                "due": "2024-02-01",
                "type": "prevention",
                "status": "open",
                "success_criteria": "CI rejects pool size < 10",
                "links": [{"label": "ticket", "url": "https://tracker.example.com/PAY-1"}]
            },
            {
                "id": "AI-2",
                "title": "Alert on pool saturation",
                "owner": "sre",
                "priority": "P2",
                "due": "2024-02-15",
                "type": "detection",
                "status": "in_progress"
            }
        ],
        "tags": ["payments", "config"],
        "references": {
            "dashboards": [{"label": "Checkout", "url": "https://grafana.example.com/d/checkout"}],
            "runbooks": [{"label": "Rollback", "url": "https://wiki.example.com/runbooks/rollback"}]
        }
    })
}

/// The smallest valid incident: every defaulted field left out, one action item.
pub fn minimal_incident() -> Value {
    json!({
        "incident_id": "INC-7",
        "title": "Search latency spike",
        "status": "mitigated",
        "severity": "SEV-3",
        "service": {"name": "search", "owner_team": "discovery", "environment": "staging", "tier": "medium"},
        "time": {
            "start": "2024-03-01T10:00:00Z",
            "end": "2024-03-01T11:00:00Z",
            "detected": "2024-03-01T10:05:00Z",
            "mitigated": "2024-03-01T10:30:00Z"
        },
        "summary": {"what_happened": "Index rebuild", "user_impact": "Slow search", "duration_minutes": 60},
        "impact": {
            "customers_affected_estimate": 0,
            "request_error_rate_peak_percent": 0,
            "latency_p95_peak_ms": 900,
            "business_impact": "Minor",
            "sla_slo": {"slo_breached": false}
        },
        "detection": {"detected_by": "internal_report", "customer_reports": {"count": 0}},
        "root_cause": {"direct_cause": "Rebuild during peak", "why_it_was_not_prevented": "No schedule guard"},
        "response": {},
        "communication": {
            "internal": {"channel": "#search", "started_at": "2024-03-01T10:06:00Z"},
            "external": {"status_page_used": false}
        },
        "action_items": [
            {"id": "AI-100", "title": "Schedule rebuilds off-peak", "owner": "discovery",
             "priority": "P3", "due": "2024-04-01", "type": "process", "status": "open"}
        ]
    })
}

fn child<'a>(value: &'a mut Value, segment: &str) -> &'a mut Value {
    match segment.parse::<usize>() {
        Ok(index) if value.is_array() => &mut value[index],
        _ => &mut value[segment],
    }
}

/// Replaces the value at a dotted path (`timeline.0.time`) inside `root`.
pub fn set(root: &mut Value, path: &str, value: Value) {
    let mut current = root;
    for segment in path.split('.') {
        current = child(current, segment);
    }
    *current = value;
}

/// Removes the key at a dotted path inside `root`.
pub fn remove(root: &mut Value, path: &str) {
    let (parent, key) = match path.rsplit_once('.') {
        Some((parent, key)) => (Some(parent), key),
        None => (None, path),
    };

    let mut current = root;
    if let Some(parent) = parent {
        for segment in parent.split('.') {
            current = child(current, segment);
        }
    }

    if let Some(map) = current.as_object_mut() {
        map.remove(key);
    }
}
