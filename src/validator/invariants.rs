// file: src/validator/invariants.rs
// description: Cross-field rules checked once a sub-record decoded cleanly
// reference: temporal ordering and conditional-requirement rules of the incident schema

use super::fields::FieldPath;
use crate::error::FieldError;
use crate::models::{ExternalComms, SlaSlo, TimeWindow, TimelineEvent};

pub const MIN_ACTION_ID_LEN: usize = 3;

/// `start < end`, `detected` and `mitigated` inside `[start, end]`, `mitigated >= detected`.
pub fn time_window(window: &TimeWindow, path: &FieldPath) -> Vec<FieldError> {
    let start = window.start.instant();
    let end = window.end.instant();
    let detected = window.detected.instant();
    let mitigated = window.mitigated.instant();

    if start >= end {
        return vec![FieldError::new(
            path.key("end").as_str(),
            format!("must be after {}", path.key("start")),
        )];
    }

    let bounds = format!("must be within [{}, {}]", path.key("start"), path.key("end"));
    let mut errors = Vec::new();

    if !(start..=end).contains(&detected) {
        errors.push(FieldError::new(path.key("detected").as_str(), bounds.clone()));
    }

    if !(start..=end).contains(&mitigated) {
        errors.push(FieldError::new(path.key("mitigated").as_str(), bounds));
    }

    if mitigated < detected {
        errors.push(FieldError::new(
            path.key("mitigated").as_str(),
            format!("must be >= {}", path.key("detected")),
        ));
    }

    errors
}

/// A breached SLO must name the objective and the breach window.
pub fn sla_slo(sla: &SlaSlo, path: &FieldPath) -> Vec<FieldError> {
    let missing = |v: &Option<String>| v.as_deref().is_none_or(str::is_empty);

    if sla.slo_breached && (missing(&sla.slo_name) || missing(&sla.breach_window)) {
        return vec![FieldError::new(
            path.as_str(),
            "slo_name and breach_window are required when slo_breached=true",
        )];
    }

    Vec::new()
}

pub fn external_comms(external: &ExternalComms, path: &FieldPath) -> Vec<FieldError> {
    if external.status_page_used && external.first_update_at.is_none() {
        return vec![FieldError::new(
            path.key("first_update_at").as_str(),
            "is required when status_page_used=true",
        )];
    }

    Vec::new()
}

pub fn action_item_id(id: &str, path: &FieldPath) -> Vec<FieldError> {
    if id.chars().count() < MIN_ACTION_ID_LEN {
        return vec![FieldError::new(
            path.as_str(),
            format!("must be at least {MIN_ACTION_ID_LEN} characters"),
        )];
    }

    Vec::new()
}

/// Timeline entries must be in non-decreasing time order; an empty timeline passes.
pub fn timeline_order(events: &[TimelineEvent], path: &FieldPath) -> Vec<FieldError> {
    events
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[1].time.instant() < pair[0].time.instant())
        .map(|(i, _)| {
            FieldError::new(
                path.index(i + 1).key("time").as_str(),
                "timeline events must be sorted by time (ascending)",
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimelineType;

    fn window(start: &str, end: &str, detected: &str, mitigated: &str) -> TimeWindow {
        TimeWindow {
            timezone: "UTC".to_string(),
            start: start.parse().unwrap(),
            end: end.parse().unwrap(),
            detected: detected.parse().unwrap(),
            mitigated: mitigated.parse().unwrap(),
        }
    }

    fn event(time: &str) -> TimelineEvent {
        TimelineEvent {
            time: time.parse().unwrap(),
            kind: TimelineType::Investigation,
            actor: "oncall".to_string(),
            message: "looking".to_string(),
            links: vec![],
        }
    }

    fn time_path() -> FieldPath {
        FieldPath::root().key("time")
    }

    #[test]
    fn test_valid_window() {
        let w = window(
            "2024-01-01T00:00:00",
            "2024-01-01T01:00:00",
            "2024-01-01T00:10:00",
            "2024-01-01T00:40:00",
        );
        assert!(time_window(&w, &time_path()).is_empty());
    }

    #[test]
    fn test_mitigated_before_detected() {
        let w = window(
            "2024-01-01T00:00:00",
            "2024-01-01T01:00:00",
            "2024-01-01T00:30:00",
            "2024-01-01T00:20:00",
        );
        let errors = time_window(&w, &time_path());
        assert_eq!(
            errors,
            vec![FieldError::new("time.mitigated", "must be >= time.detected")]
        );
    }

    #[test]
    fn test_start_must_precede_end() {
        let w = window(
            "2024-01-01T01:00:00",
            "2024-01-01T01:00:00",
            "2024-01-01T01:00:00",
            "2024-01-01T01:00:00",
        );
        let errors = time_window(&w, &time_path());
        assert_eq!(errors, vec![FieldError::new("time.end", "must be after time.start")]);
    }

    #[test]
    fn test_detected_outside_window() {
        let w = window(
            "2024-01-01T00:00:00Z",
            "2024-01-01T01:00:00Z",
            "2024-01-01T02:00:00Z",
            "2024-01-01T00:30:00Z",
        );
        let errors = time_window(&w, &time_path());
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].path, "time.detected");
        assert_eq!(errors[1], FieldError::new("time.mitigated", "must be >= time.detected"));
    }

    #[test]
    fn test_sla_requires_name_and_window_when_breached() {
        let path = FieldPath::root().key("impact").key("sla_slo");
        let breached = SlaSlo {
            slo_breached: true,
            slo_name: None,
            breach_window: Some("10:00-10:30".to_string()),
        };
        assert_eq!(sla_slo(&breached, &path)[0].path, "impact.sla_slo");

        let empty_name = SlaSlo {
            slo_name: Some(String::new()),
            ..breached.clone()
        };
        assert_eq!(sla_slo(&empty_name, &path).len(), 1);

        let not_breached = SlaSlo {
            slo_breached: false,
            slo_name: None,
            breach_window: None,
        };
        assert!(sla_slo(&not_breached, &path).is_empty());
    }

    #[test]
    fn test_status_page_requires_first_update() {
        let path = FieldPath::root().key("communication").key("external");
        let external = ExternalComms {
            status_page_used: true,
            first_update_at: None,
            updates_count: 0,
            customer_message: None,
        };
        let errors = external_comms(&external, &path);
        assert_eq!(errors[0].path, "communication.external.first_update_at");
    }

    #[test]
    fn test_action_item_id_length() {
        let path = FieldPath::root().key("action_items").index(0).key("id");
        assert_eq!(action_item_id("AI", &path)[0].path, "action_items[0].id");
        assert!(action_item_id("AI-1", &path).is_empty());
    }

    #[test]
    fn test_timeline_order() {
        let path = FieldPath::root().key("timeline");
        assert!(timeline_order(&[], &path).is_empty());

        let sorted = vec![
            event("2024-01-01T00:00:00"),
            event("2024-01-01T00:00:00"),
            event("2024-01-01T00:05:00"),
        ];
        assert!(timeline_order(&sorted, &path).is_empty());

        let unsorted = vec![event("2024-01-01T00:10:00"), event("2024-01-01T00:05:00")];
        let errors = timeline_order(&unsorted, &path);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "timeline[1].time");
        assert!(errors[0].message.contains("sorted by time"));
    }
}
