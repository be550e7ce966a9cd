//! Render-ready projections of dashboard state. The UI components map these
//! straight into markup.

use crate::geo;
use crate::incident::{Coordinates, Incident, Notification, Severity, Stats, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub fn severity_badge_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "badge sev-low",
        Severity::Medium => "badge sev-medium",
        Severity::High => "badge sev-high",
        Severity::Critical => "badge sev-critical",
    }
}

pub fn status_badge_class(status: Status) -> &'static str {
    match status {
        Status::Active => "badge status-active",
        Status::Investigating => "badge status-investigating",
        Status::Resolved => "badge status-resolved",
    }
}

/// "5 minutes ago" style distance, following date-fns `formatDistanceToNow`.
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(at).num_seconds();
    let future = delta < 0;
    let seconds = delta.unsigned_abs() as f64;
    let minutes = (seconds / 60.0).round() as u64;

    let distance = if minutes < 1 {
        "less than a minute".to_string()
    } else if minutes == 1 {
        "1 minute".to_string()
    } else if minutes < 45 {
        format!("{minutes} minutes")
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if minutes < 1_440 {
        format!("about {} hours", (minutes as f64 / 60.0).round() as u64)
    } else if minutes < 2_520 {
        "1 day".to_string()
    } else if minutes < 43_200 {
        format!("{} days", (minutes as f64 / 1_440.0).round() as u64)
    } else if minutes < 86_400 {
        match (minutes as f64 / 43_200.0).round() as u64 {
            1 => "about 1 month".to_string(),
            months => format!("about {months} months"),
        }
    } else {
        let months = (minutes as f64 / 43_200.0).round() as u64;
        if months < 12 {
            format!("{months} months")
        } else {
            let years = months / 12;
            let plural = |n: u64| if n == 1 { "1 year".to_string() } else { format!("{n} years") };
            match months % 12 {
                0..=2 => format!("about {}", plural(years)),
                3..=8 => format!("over {}", plural(years)),
                _ => format!("almost {}", plural(years + 1)),
            }
        }
    };

    if future {
        format!("in {distance}")
    } else {
        format!("{distance} ago")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IncidentListItem {
    pub id: String,
    pub glyph: &'static str,
    pub title: String,
    pub verified: bool,
    pub description: String,
    pub radius_label: String,
    pub reported: String,
    pub severity_label: String,
    pub severity_class: &'static str,
    pub status_label: String,
    pub status_class: &'static str,
    pub upvotes: u32,
    pub downvotes: u32,
    pub confidence_label: String,
    pub selected: bool,
}

pub fn incident_list(
    incidents: &[Incident],
    selected_id: Option<&str>,
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<IncidentListItem> {
    incidents
        .iter()
        .take(limit)
        .map(|i| IncidentListItem {
            id: i.id.clone(),
            glyph: i.category.glyph(),
            title: i.title.clone(),
            verified: i.verified_by_authority,
            description: i.description.clone(),
            radius_label: format!("{}m radius", i.affected_radius_m),
            reported: relative_time(i.reported_at, now),
            severity_label: i.severity.to_string().to_uppercase(),
            severity_class: severity_badge_class(i.severity),
            status_label: i.status.to_string().to_uppercase(),
            status_class: status_badge_class(i.status),
            upvotes: i.upvotes,
            downvotes: i.downvotes,
            confidence_label: format!("{}%", i.confidence.value()),
            selected: selected_id == Some(i.id.as_str()),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationItem {
    pub id: String,
    pub title: String,
    pub message: String,
    pub class: String,
    pub age: String,
    pub read: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationPanel {
    pub unread: usize,
    pub items: Vec<NotificationItem>,
}

impl NotificationPanel {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub fn notification_panel(notifications: &[Notification], now: DateTime<Utc>) -> NotificationPanel {
    NotificationPanel {
        unread: notifications.iter().filter(|n| !n.read).count(),
        items: notifications
            .iter()
            .map(|n| NotificationItem {
                id: n.id.clone(),
                title: n.title.clone(),
                message: n.message.clone(),
                class: if n.read {
                    "alert read".to_string()
                } else {
                    format!("alert unread sev-{}", n.severity)
                },
                age: relative_time(n.timestamp, now),
                read: n.read,
            })
            .collect(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapFilter {
    pub show_active: bool,
    pub show_investigating: bool,
    pub show_resolved: bool,
    pub critical_only: bool,
    pub verified_only: bool,
}

impl Default for MapFilter {
    fn default() -> Self {
        Self {
            show_active: true,
            show_investigating: true,
            show_resolved: false,
            critical_only: false,
            verified_only: false,
        }
    }
}

impl MapFilter {
    pub fn show_all() -> Self {
        Self {
            show_resolved: true,
            ..Self::default()
        }
    }

    pub fn admits(&self, incident: &Incident) -> bool {
        let status_ok = match incident.status {
            Status::Active => self.show_active,
            Status::Investigating => self.show_investigating,
            Status::Resolved => self.show_resolved,
        };
        status_ok
            && (!self.critical_only || incident.severity == Severity::Critical)
            && (!self.verified_only || incident.verified_by_authority)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: String,
    pub position: Coordinates,
    pub color: &'static str,
    pub glyph: &'static str,
    pub radius_px: f64,
    pub selected: bool,
    pub title: String,
    pub description: String,
    pub severity_label: String,
    pub confidence_label: String,
}

pub fn map_markers(
    incidents: &[Incident],
    filter: &MapFilter,
    selected_id: Option<&str>,
) -> Vec<MapMarker> {
    incidents
        .iter()
        .filter(|i| filter.admits(i) || selected_id == Some(i.id.as_str()))
        .map(|i| MapMarker {
            id: i.id.clone(),
            position: i.location,
            color: i.severity.color(),
            glyph: i.category.glyph(),
            radius_px: geo::marker_radius_px(i.affected_radius_m),
            selected: selected_id == Some(i.id.as_str()),
            title: i.title.clone(),
            description: i.description.clone(),
            severity_label: i.severity.to_string().to_uppercase(),
            confidence_label: format!("AI: {}%", i.confidence.value()),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub change: &'static str,
    pub positive: bool,
    pub color: &'static str,
}

pub fn stat_cards(stats: &Stats) -> Vec<StatCard> {
    vec![
        StatCard {
            title: "Active Emergencies",
            value: stats.total_active.to_string(),
            change: "+3 from yesterday",
            positive: false,
            color: "red",
        },
        StatCard {
            title: "Resolved Today",
            value: stats.total_resolved.to_string(),
            change: "+12 from yesterday",
            positive: true,
            color: "green",
        },
        StatCard {
            title: "Critical Alerts",
            value: stats.critical_alerts.to_string(),
            change: "2 new this hour",
            positive: false,
            color: "yellow",
        },
        StatCard {
            title: "Avg Response Time",
            value: format!("{}min", stats.average_response_minutes),
            change: "-2min improvement",
            positive: true,
            color: "blue",
        },
        StatCard {
            title: "AI Accuracy",
            value: format!("{}%", stats.ai_accuracy_percent),
            change: "+1.2% this month",
            positive: true,
            color: "purple",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::incident::{Category, Confidence};
    use crate::mock;
    use chrono::Duration;

    fn incident(id: &str, status: Status, severity: Severity, verified: bool) -> Incident {
        Incident {
            id: id.into(),
            category: Category::Fire,
            title: format!("title {id}"),
            description: "desc".into(),
            location: Coordinates::new(40.0, -74.0),
            affected_radius_m: 1_250,
            severity,
            status,
            reported_by: "Local Resident".into(),
            reported_at: Utc::now() - Duration::minutes(5),
            confidence: Confidence::new(88),
            upvotes: 4,
            downvotes: 1,
            verified_by_authority: verified,
        }
    }

    #[test]
    fn relative_time_matches_date_fns_buckets() {
        let now = Utc::now();
        let ago = |d: Duration| relative_time(now - d, now);
        assert_eq!(ago(Duration::seconds(10)), "less than a minute ago");
        assert_eq!(ago(Duration::seconds(70)), "1 minute ago");
        assert_eq!(ago(Duration::minutes(5)), "5 minutes ago");
        assert_eq!(ago(Duration::minutes(60)), "about 1 hour ago");
        assert_eq!(ago(Duration::hours(3)), "about 3 hours ago");
        assert_eq!(ago(Duration::hours(30)), "1 day ago");
        assert_eq!(ago(Duration::days(6)), "6 days ago");
        assert_eq!(ago(Duration::days(35)), "about 1 month ago");
        assert_eq!(ago(Duration::days(55)), "about 2 months ago");
        assert_eq!(ago(Duration::days(120)), "4 months ago");
        assert_eq!(ago(Duration::days(365)), "about 1 year ago");
        assert_eq!(ago(Duration::days(540)), "over 1 year ago");
        assert_eq!(ago(Duration::days(700)), "almost 2 years ago");
        assert_eq!(relative_time(now + Duration::minutes(5), now), "in 5 minutes");
    }

    #[test]
    fn list_caps_and_marks_selection() {
        let incidents: Vec<_> = (0..15)
            .map(|n| incident(&format!("emergency-{n}"), Status::Active, Severity::High, false))
            .collect();
        let items = incident_list(&incidents, Some("emergency-3"), 10, Utc::now());
        assert_eq!(items.len(), 10);
        assert_eq!(items.iter().filter(|i| i.selected).count(), 1);
        assert!(items[3].selected);
        assert_eq!(items[0].radius_label, "1250m radius");
        assert_eq!(items[0].severity_label, "HIGH");
        assert_eq!(items[0].status_label, "ACTIVE");
        assert_eq!(items[0].confidence_label, "88%");
        assert_eq!(items[0].reported, "5 minutes ago");
    }

    #[test]
    fn panel_counts_unread_and_handles_empty() {
        let now = Utc::now();
        let panel = notification_panel(&mock::generate_notifications(now), now);
        assert_eq!(panel.unread, 2);
        assert_eq!(panel.items[0].class, "alert unread sev-critical");
        assert_eq!(panel.items[2].class, "alert read");
        assert!(!panel.items[0].read, "unread alerts offer mark-as-read");
        assert!(panel.items[2].read);

        let empty = notification_panel(&[], now);
        assert!(empty.is_empty());
        assert_eq!(empty.unread, 0);
    }

    #[test]
    fn default_filter_hides_resolved_but_keeps_selection() {
        let incidents = vec![
            incident("a", Status::Active, Severity::Low, false),
            incident("r", Status::Resolved, Severity::Critical, true),
        ];
        let markers = map_markers(&incidents, &MapFilter::default(), None);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].radius_px, 12.5);
        assert_eq!(markers[0].confidence_label, "AI: 88%");

        let markers = map_markers(&incidents, &MapFilter::default(), Some("r"));
        assert_eq!(markers.len(), 2);
        assert!(markers[1].selected);
    }

    #[test]
    fn filter_restrictions_compose() {
        let filter = MapFilter {
            critical_only: true,
            verified_only: true,
            ..MapFilter::show_all()
        };
        assert!(filter.admits(&incident("x", Status::Resolved, Severity::Critical, true)));
        assert!(!filter.admits(&incident("y", Status::Active, Severity::Critical, false)));
        assert!(!filter.admits(&incident("z", Status::Active, Severity::High, true)));
    }

    #[test]
    fn stat_cards_format_units() {
        let cards = stat_cards(&mock::generate_stats());
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].value, "23");
        assert_eq!(cards[3].value, "12.5min");
        assert_eq!(cards[4].value, "94.2%");
    }
}
