pub mod cli;
pub mod runtime;
pub mod state;

use crate::state::AppState;
use incident_core::{Category, DashboardConfig, GeoError, ReportComposer, ReportDraft, Severity};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_tracing(log_level: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("incident_host={log_level},incident_core={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

pub fn build_state(config: DashboardConfig) -> AppState {
    let state = AppState::mount(config);
    // No geolocation source off the browser; this lands on the fallback.
    if let Ok(mut dashboard) = state.dashboard.lock() {
        dashboard.apply_geolocation(Err(GeoError::Unsupported));
    }
    state
}

/// Live mode: ticks on the configured interval until ctrl-c.
pub async fn run(config: DashboardConfig) -> anyhow::Result<()> {
    let state = build_state(config);
    let ticker = runtime::start(&state);
    tracing::info!("live feed running, ctrl-c to stop");

    tokio::signal::ctrl_c().await?;
    ticker.stop();

    let snapshot = state
        .dashboard
        .lock()
        .map_err(|_| anyhow::anyhow!("dashboard lock poisoned"))?
        .snapshot();
    tracing::info!(
        incidents = snapshot.incidents.len(),
        unread = snapshot.unread_notifications,
        "stopped"
    );
    Ok(())
}

/// Demo mode: runs `ticks` updates back to back, files one report through
/// the simulated classifier, then prints the resulting state.
pub async fn run_demo(config: DashboardConfig, ticks: u32) -> anyhow::Result<()> {
    let seed = config.seed;
    let fallback = config.fallback_location;
    let delay = config.processing_delay();
    let state = build_state(config);
    let sink = runtime::TracingSink;

    for _ in 0..ticks {
        let outcome = state
            .dashboard
            .lock()
            .map_err(|_| anyhow::anyhow!("dashboard lock poisoned"))?
            .tick();
        runtime::emit_updates(&state, &sink, &outcome);
    }

    let mut composer = ReportComposer::simulated(seed, fallback, delay);
    let draft = ReportDraft {
        category: Category::Flooding,
        title: "Flood on 5th".into(),
        description: "Water rising fast".into(),
        severity: Severity::High,
    };
    tokio::time::sleep(composer.processing_delay()).await;

    let snapshot = {
        let mut dashboard = state
            .dashboard
            .lock()
            .map_err(|_| anyhow::anyhow!("dashboard lock poisoned"))?;
        let report = composer.compose(&draft, dashboard.user_location())?;
        let incident = dashboard.submit_report(report)?;
        tracing::info!(incident_id = %incident.id, "demo report filed");
        dashboard.snapshot()
    };

    println!(
        "summary:\n{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "active_tab": snapshot.active_tab,
            "selected_id": snapshot.selected_id,
            "user_location": snapshot.user_location,
            "stats": snapshot.stats,
            "unread_notifications": snapshot.unread_notifications,
            "incident_count": snapshot.incidents.len(),
        }))?
    );
    println!(
        "notifications:\n{}",
        serde_json::to_string_pretty(&snapshot.notifications)?
    );
    if let Some(first) = snapshot.incidents.first() {
        println!("newest incident:\n{}", serde_json::to_string_pretty(first)?);
    }
    Ok(())
}
