#![cfg(feature = "runtime")]

use incident_core::classifier::{Assessment, FixedClassifier};
use incident_core::config::DashboardConfig;
use incident_core::ticker::{NoopSink, Ticker};
use incident_core::{
    Category, Confidence, Coordinates, Dashboard, GeoError, ReportComposer, ReportDraft, Severity,
    Status, Tab,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn shared(seed: u64) -> Arc<Mutex<Dashboard>> {
    Arc::new(Mutex::new(Dashboard::mount(DashboardConfig {
        seed: Some(seed),
        notification_chance: 1.0,
        ..DashboardConfig::default()
    })))
}

#[tokio::test(start_paused = true)]
async fn teardown_stops_all_further_mutation() {
    let dashboard = shared(21);
    let ticker = Ticker::spawn(dashboard.clone(), Duration::from_secs(10), NoopSink);

    let initial = dashboard.lock().expect("lock").snapshot();
    tokio::time::sleep(Duration::from_secs(25)).await;
    let live = dashboard.lock().expect("lock").snapshot();
    assert_ne!(initial, live, "ticks should mutate state while mounted");

    drop(ticker);
    tokio::time::sleep(Duration::from_secs(1)).await;
    let frozen = dashboard.lock().expect("lock").snapshot();

    tokio::time::sleep(Duration::from_secs(600)).await;
    let later = dashboard.lock().expect("lock").snapshot();
    assert_eq!(frozen, later);
}

#[tokio::test(start_paused = true)]
async fn explicit_stop_also_cancels() {
    let dashboard = shared(22);
    let ticker = Ticker::spawn(dashboard.clone(), Duration::from_secs(10), NoopSink);
    ticker.stop();

    let before = dashboard.lock().expect("lock").snapshot();
    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(dashboard.lock().expect("lock").snapshot(), before);
}

#[tokio::test(start_paused = true)]
async fn window_and_clamp_hold_under_long_runs() {
    let dashboard = shared(23);
    let _ticker = Ticker::spawn(dashboard.clone(), Duration::from_secs(10), NoopSink);

    tokio::time::sleep(Duration::from_secs(10 * 400 + 5)).await;
    let guard = dashboard.lock().expect("lock");
    assert_eq!(guard.notifications().len(), 10);
    assert!(guard.incidents().iter().all(|i| i.confidence.value() <= 100));
}

#[test]
fn report_flow_from_draft_to_selected_incident() {
    let mut dashboard = Dashboard::mount(DashboardConfig {
        seed: Some(24),
        ..DashboardConfig::default()
    });
    let user = dashboard.apply_geolocation(Err(GeoError::Timeout));

    let mut composer = ReportComposer::new(
        FixedClassifier::new(Assessment {
            confidence: Some(Confidence::new(90)),
            affected_radius_m: None,
        }),
        StdRng::seed_from_u64(24),
        dashboard.config().fallback_location,
    );
    let draft = ReportDraft {
        category: Category::Medical,
        title: "Collapsed runner".into(),
        description: "Near the park entrance".into(),
        severity: Severity::Critical,
    };
    let report = composer
        .compose(&draft, dashboard.user_location())
        .expect("compose");
    assert_eq!(report.location, user);

    let id = dashboard.submit_report(report).expect("submit").id.clone();
    let selected = dashboard.selected_incident().expect("selected");
    assert_eq!(selected.id, id);
    assert_eq!(selected.status, Status::Investigating);
    assert_eq!(selected.confidence.value(), 90);
    assert_eq!(selected.affected_radius_m, 800);
    assert_eq!(dashboard.active_tab(), Tab::Map);
    assert_eq!(dashboard.user_location(), Some(Coordinates::new(40.7128, -74.0060)));
}
