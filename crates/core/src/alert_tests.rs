// SPDX-License-Identifier: MIT

use super::*;

#[yare::parameterized(
    critical = { AlertKind::Critical, "critical" },
    warning  = { AlertKind::Warning, "warning" },
    info     = { AlertKind::Info, "info" },
)]
fn alert_kind_display(kind: AlertKind, expected: &str) {
    assert_eq!(kind.to_string(), expected);
}

#[test]
fn alert_kind_serde_snake_case() {
    let json = serde_json::to_string(&AlertKind::Critical).unwrap();
    assert_eq!(json, "\"critical\"");
    let parsed: AlertKind = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, AlertKind::Critical);
}

#[test]
fn alert_builder_chain() {
    let alert = Alert::new("service-a", AlertKind::Critical, "High error rate")
        .raised_at("2024-01-15T10:30:00Z")
        .channel("#alerts");
    assert_eq!(alert.service, "service-a");
    assert_eq!(alert.raised_at, "2024-01-15T10:30:00Z");
    assert_eq!(alert.channel.as_deref(), Some("#alerts"));
}

#[test]
fn alert_omits_empty_channel() {
    let alert = Alert::new("svc", AlertKind::Warning, "latency spike");
    let json = serde_json::to_string(&alert).unwrap();
    assert!(!json.contains("channel"));
    let parsed: Alert = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, alert);
}
