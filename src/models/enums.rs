// file: src/models/enums.rs
// description: Closed enumerations used by the incident schema
// reference: wire names match the incident YAML/JSON format

use serde::Serialize;
use std::fmt;

/// A closed set of string-tagged values.
pub trait Variant: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == value)
    }

    /// Accepted wire names, for error messages.
    fn expected() -> String {
        Self::ALL
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

macro_rules! closed_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl Variant for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_enum!(IncidentStatus {
    Resolved => "resolved",
    Mitigated => "mitigated",
    Ongoing => "ongoing",
});

closed_enum!(Severity {
    Sev1 => "SEV-1",
    Sev2 => "SEV-2",
    Sev3 => "SEV-3",
    Sev4 => "SEV-4",
});

closed_enum!(Environment {
    Production => "production",
    Staging => "staging",
    Dev => "dev",
});

closed_enum!(ServiceTier {
    Critical => "critical",
    High => "high",
    Medium => "medium",
    Low => "low",
});

closed_enum!(DetectionSource {
    MonitoringAlert => "monitoring_alert",
    CustomerReport => "customer_report",
    InternalReport => "internal_report",
    Partner => "partner",
});

closed_enum!(
    /// Phase of the incident a timeline entry belongs to.
    TimelineType {
        Trigger => "trigger",
        Detection => "detection",
        Investigation => "investigation",
        Mitigation => "mitigation",
        Recovery => "recovery",
        Comms => "comms",
        Followup => "followup",
    }
);

closed_enum!(Priority {
    P0 => "P0",
    P1 => "P1",
    P2 => "P2",
    P3 => "P3",
});

closed_enum!(ActionType {
    Prevention => "prevention",
    Detection => "detection",
    Response => "response",
    Reliability => "reliability",
    Process => "process",
    Documentation => "documentation",
});

closed_enum!(ActionStatus {
    Open => "open",
    InProgress => "in_progress",
    Done => "done",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_names() {
        assert_eq!(Severity::parse("SEV-2"), Some(Severity::Sev2));
        assert_eq!(ActionStatus::parse("in_progress"), Some(ActionStatus::InProgress));
        assert_eq!(Severity::parse("sev-2"), None);
        assert_eq!(Priority::parse("P4"), None);
    }

    #[test]
    fn test_expected_lists_every_variant() {
        assert_eq!(IncidentStatus::expected(), "resolved, mitigated, ongoing");
        assert_eq!(TimelineType::ALL.len(), 7);
    }

    #[test]
    fn test_serializes_as_wire_name() {
        let json = serde_json::to_string(&DetectionSource::MonitoringAlert).unwrap();
        assert_eq!(json, "\"monitoring_alert\"");
        assert_eq!(Severity::Sev1.to_string(), "SEV-1");
    }
}
