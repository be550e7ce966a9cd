use crate::state::AppState;
use incident_core::ticker::{TickSink, Ticker};
use incident_core::TickOutcome;
use std::sync::Arc;

pub trait EventSink: Send + Sync + 'static {
    fn emit_json(&self, event: &str, payload: serde_json::Value);
}

pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit_json(&self, event: &str, payload: serde_json::Value) {
        tracing::info!(event, %payload, "dashboard event");
    }
}

/// Bridges ticker outcomes onto named events.
struct OutcomeRelay<S> {
    state: AppState,
    sink: Arc<S>,
}

impl<S: EventSink> TickSink for OutcomeRelay<S> {
    fn on_tick(&self, outcome: &TickOutcome) {
        emit_updates(&self.state, self.sink.as_ref(), outcome);
    }
}

pub fn start(state: &AppState) -> Ticker {
    start_with_sink(state, TracingSink)
}

pub fn start_with_sink(state: &AppState, sink: impl EventSink) -> Ticker {
    let period = match state.dashboard.lock() {
        Ok(guard) => guard.config().tick_interval(),
        Err(_) => incident_core::DashboardConfig::default().tick_interval(),
    };
    let relay = OutcomeRelay {
        state: state.clone(),
        sink: Arc::new(sink),
    };
    Ticker::spawn(state.dashboard.clone(), period, relay)
}

pub(crate) fn emit_updates(state: &AppState, sink: &impl EventSink, outcome: &TickOutcome) {
    if let Some(bump) = &outcome.bump {
        let confidence = state
            .dashboard
            .lock()
            .ok()
            .and_then(|d| d.incident(&bump.incident_id).map(|i| i.confidence.value()));
        sink.emit_json(
            "incident-updated",
            serde_json::json!({
                "incident_id": bump.incident_id,
                "upvotes_added": bump.upvotes_added,
                "confidence_added": bump.confidence_added,
                "confidence": confidence,
            }),
        );
    }

    if let Some(note) = &outcome.notification {
        sink.emit_json(
            "alert-raised",
            serde_json::json!({
                "id": note.id,
                "incident_id": note.incident_id,
                "severity": note.severity,
                "title": note.title,
            }),
        );
    }

    let Ok(dashboard) = state.dashboard.lock() else {
        return;
    };
    sink.emit_json(
        "dashboard-summary",
        serde_json::json!({
            "incidents": dashboard.incidents().len(),
            "active_incident_count": dashboard.active_incidents().len(),
            "unread_alerts": dashboard.unread_count(),
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use incident_core::DashboardConfig;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default, Clone)]
    struct CaptureSink {
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl EventSink for CaptureSink {
        fn emit_json(&self, event: &str, _payload: serde_json::Value) {
            if let Ok(mut guard) = self.seen.lock() {
                guard.push(event.to_string());
            }
        }
    }

    fn state(chance: f64) -> AppState {
        AppState::mount(DashboardConfig {
            seed: Some(5),
            notification_chance: chance,
            ..DashboardConfig::default()
        })
    }

    #[test]
    fn emits_required_event_names() {
        let state = state(1.0);
        let outcome = state.dashboard.lock().expect("lock").tick();

        let sink = CaptureSink::default();
        emit_updates(&state, &sink, &outcome);

        let seen = sink.seen.lock().expect("lock").clone();
        assert_eq!(
            seen,
            vec!["incident-updated", "alert-raised", "dashboard-summary"]
        );
    }

    #[test]
    fn quiet_tick_skips_alert_event() {
        let state = state(0.0);
        let outcome = state.dashboard.lock().expect("lock").tick();

        let sink = CaptureSink::default();
        emit_updates(&state, &sink, &outcome);

        let seen = sink.seen.lock().expect("lock").clone();
        assert!(!seen.contains(&"alert-raised".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn runtime_relays_ticks_until_stopped() {
        let state = state(0.0);
        let sink = CaptureSink::default();
        let ticker = start_with_sink(&state, sink.clone());

        tokio::time::sleep(Duration::from_secs(21)).await;
        ticker.stop();
        let count = sink.seen.lock().expect("lock").len();
        assert_eq!(count, 4);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(sink.seen.lock().expect("lock").len(), count);
    }
}
