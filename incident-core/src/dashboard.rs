//! The single owner of incident, statistics and notification state.
//!
//! Views read through the accessors and report user actions through the
//! `&mut self` methods; nothing else mutates these collections.

use crate::config::DashboardConfig;
use crate::error::{DashboardError, GeoError};
use crate::geo;
use crate::incident::{Confidence, Coordinates, Incident, Notification, Severity, Stats, Status};
use crate::mock;
use crate::report::{validate_report, SubmittedReport};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Tab {
    #[default]
    Dashboard,
    Map,
    Report,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Map => "Live Map",
            Tab::Report => "Report Emergency",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IncidentBump {
    pub incident_id: String,
    pub upvotes_added: u32,
    pub confidence_added: u8,
}

/// What one simulated update changed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickOutcome {
    pub bump: Option<IncidentBump>,
    pub notification: Option<Notification>,
}

impl TickOutcome {
    pub fn is_empty(&self) -> bool {
        self.bump.is_none() && self.notification.is_none()
    }
}

/// Serializable view of the whole dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub active_tab: Tab,
    pub selected_id: Option<String>,
    pub user_location: Option<Coordinates>,
    pub stats: Stats,
    pub unread_notifications: usize,
    pub incidents: Vec<Incident>,
    pub notifications: Vec<Notification>,
}

pub struct Dashboard {
    config: DashboardConfig,
    rng: StdRng,
    incidents: Vec<Incident>,
    stats: Stats,
    notifications: Vec<Notification>,
    selected_id: Option<String>,
    active_tab: Tab,
    user_location: Option<Coordinates>,
    next_incident_seq: u64,
    next_notification_seq: u64,
}

impl Dashboard {
    /// Empty dashboard; nothing is generated until [`Dashboard::populate`].
    pub fn new(config: DashboardConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            incidents: Vec::new(),
            stats: mock::generate_stats(),
            notifications: Vec::new(),
            selected_id: None,
            active_tab: Tab::default(),
            user_location: None,
            next_incident_seq: 1,
            next_notification_seq: 1,
        }
    }

    /// New dashboard with the generated incidents, statistics and seed
    /// notifications already loaded.
    pub fn mount(config: DashboardConfig) -> Self {
        let mut dashboard = Self::new(config);
        dashboard.populate(Utc::now());
        dashboard
    }

    pub fn populate(&mut self, now: DateTime<Utc>) {
        self.incidents =
            mock::generate_incidents(&mut self.rng, self.config.mock_incident_count, now);
        self.stats = mock::generate_stats();
        self.notifications = mock::generate_notifications(now);
        self.notifications.truncate(self.config.notification_cap);
        self.next_incident_seq = self.incidents.len() as u64 + 1;
        self.next_notification_seq = self.notifications.len() as u64 + 1;
        tracing::info!(
            incidents = self.incidents.len(),
            notifications = self.notifications.len(),
            "dashboard populated"
        );
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    pub fn incident(&self, id: &str) -> Option<&Incident> {
        self.incidents.iter().find(|i| i.id == id)
    }

    pub fn active_incidents(&self) -> Vec<Incident> {
        self.incidents
            .iter()
            .filter(|i| i.status == Status::Active)
            .cloned()
            .collect()
    }

    pub fn nearby_incidents(&self) -> &[Incident] {
        let n = self.config.nearby_limit.min(self.incidents.len());
        &self.incidents[..n]
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected_incident(&self) -> Option<&Incident> {
        self.selected_id.as_deref().and_then(|id| self.incident(id))
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn user_location(&self) -> Option<Coordinates> {
        self.user_location
    }

    /// Records the outcome of the one-shot geolocation query.
    pub fn apply_geolocation(&mut self, fix: Result<Coordinates, GeoError>) -> Coordinates {
        let coords = geo::resolve_location(fix, self.config.fallback_location);
        self.user_location = Some(coords);
        coords
    }

    pub fn select_incident(&mut self, id: &str) -> Result<&Incident, DashboardError> {
        let Some(pos) = self.incidents.iter().position(|i| i.id == id) else {
            tracing::warn!(incident_id = id, "select ignored: unknown incident");
            return Err(DashboardError::IncidentNotFound(id.to_string()));
        };
        self.selected_id = Some(id.to_string());
        self.active_tab = Tab::Map;
        Ok(&self.incidents[pos])
    }

    pub fn dismiss_notification(&mut self, id: &str) -> Result<Notification, DashboardError> {
        let Some(pos) = self.notifications.iter().position(|n| n.id == id) else {
            tracing::debug!(notification_id = id, "dismiss ignored: unknown notification");
            return Err(DashboardError::NotificationNotFound(id.to_string()));
        };
        Ok(self.notifications.remove(pos))
    }

    pub fn mark_notification_read(&mut self, id: &str) -> Result<(), DashboardError> {
        let Some(note) = self.notifications.iter_mut().find(|n| n.id == id) else {
            tracing::debug!(notification_id = id, "mark-read ignored: unknown notification");
            return Err(DashboardError::NotificationNotFound(id.to_string()));
        };
        note.read = true;
        Ok(())
    }

    pub fn submit_report(&mut self, report: SubmittedReport) -> Result<&Incident, DashboardError> {
        validate_report(&report)?;

        let now = Utc::now();
        let incident = Incident {
            id: self.next_incident_id(),
            category: report.category,
            title: report.title,
            description: report.description,
            location: report.location,
            affected_radius_m: report
                .affected_radius_m
                .unwrap_or(self.config.default_radius_m),
            severity: report.severity,
            status: Status::Investigating,
            reported_by: "You".into(),
            reported_at: now,
            confidence: report
                .confidence
                .unwrap_or_else(|| Confidence::new(self.config.default_confidence)),
            upvotes: 1,
            downvotes: 0,
            verified_by_authority: false,
        };
        let incident_id = incident.id.clone();
        tracing::info!(
            incident_id = %incident_id,
            category = %incident.category,
            severity = %incident.severity,
            "report submitted"
        );

        self.incidents.insert(0, incident);
        self.selected_id = Some(incident_id.clone());
        self.active_tab = Tab::Map;

        let note = Notification {
            id: self.next_notification_id(),
            incident_id,
            title: "Report Submitted Successfully".into(),
            message: "Your emergency report has been processed and is now visible to the community."
                .into(),
            severity: Severity::Medium,
            timestamp: now,
            read: false,
        };
        self.push_notification(note);
        self.stats.total_active += 1;

        Ok(&self.incidents[0])
    }

    /// One step of the simulated live feed: bump a random incident's votes
    /// and confidence, and sometimes raise a notification about a random
    /// incident.
    pub fn tick(&mut self) -> TickOutcome {
        if self.incidents.is_empty() {
            return TickOutcome::default();
        }

        let idx = self.rng.gen_range(0..self.incidents.len());
        let upvotes_added = self.rng.gen_range(0..3u32);
        let confidence_added = self.rng.gen_range(0..5u8);
        let incident = &mut self.incidents[idx];
        incident.upvotes = incident.upvotes.saturating_add(upvotes_added);
        incident.confidence = incident.confidence.raise(confidence_added);
        let bump = IncidentBump {
            incident_id: incident.id.clone(),
            upvotes_added,
            confidence_added,
        };

        let mut notification = None;
        if self.rng.gen_bool(self.config.notification_chance.clamp(0.0, 1.0)) {
            let target = self.rng.gen_range(0..self.incidents.len());
            let note = Notification {
                id: self.next_notification_id(),
                incident_id: self.incidents[target].id.clone(),
                title: "New Emergency Detected".into(),
                message: "AI has detected a potential emergency in your area.".into(),
                severity: mock::random_severity(&mut self.rng),
                timestamp: Utc::now(),
                read: false,
            };
            self.push_notification(note.clone());
            notification = Some(note);
        }

        tracing::debug!(
            incident_id = %bump.incident_id,
            upvotes_added,
            confidence_added,
            notified = notification.is_some(),
            "tick"
        );
        TickOutcome {
            bump: Some(bump),
            notification,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            active_tab: self.active_tab,
            selected_id: self.selected_id.clone(),
            user_location: self.user_location,
            stats: self.stats.clone(),
            unread_notifications: self.unread_count(),
            incidents: self.incidents.clone(),
            notifications: self.notifications.clone(),
        }
    }

    fn push_notification(&mut self, note: Notification) {
        self.notifications.insert(0, note);
        self.notifications.truncate(self.config.notification_cap);
    }

    fn next_incident_id(&mut self) -> String {
        let id = mock::incident_id(self.next_incident_seq);
        self.next_incident_seq += 1;
        id
    }

    fn next_notification_id(&mut self) -> String {
        let id = mock::notification_id(self.next_notification_seq);
        self.next_notification_seq += 1;
        id
    }
}
