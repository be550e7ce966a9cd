use crate::browser;
use crate::components::{
    IncidentList, MapFilters, MapView, NotificationPanel, ReportForm, StatsPanel,
};
use chrono::Utc;
use incident_core::view::MapFilter;
use incident_core::{Dashboard, DashboardConfig, ReportComposer, SubmittedReport, Tab};
use leptos::*;
use strum::IntoEnumIterator;

#[component]
pub fn App() -> impl IntoView {
    let config = DashboardConfig::default();
    let dashboard = create_rw_signal(Dashboard::mount(config.clone()));
    let now = create_rw_signal(Utc::now());
    let filter = create_rw_signal(MapFilter::default());
    let composer = store_value(ReportComposer::simulated(
        config.seed,
        config.fallback_location,
        config.processing_delay(),
    ));

    browser::request_location(move |fix| {
        let _ = dashboard.try_update(|d| d.apply_geolocation(fix));
    });

    match set_interval_with_handle(
        move || {
            let _ = dashboard.try_update(|d| d.tick());
            let _ = now.try_set(Utc::now());
        },
        config.tick_interval(),
    ) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(err) => tracing::warn!(?err, "could not start update timer"),
    }

    let active = create_memo(move |_| dashboard.with(|d| d.active_incidents()));
    let incidents = create_memo(move |_| dashboard.with(|d| d.incidents().to_vec()));
    let nearby = create_memo(move |_| dashboard.with(|d| d.nearby_incidents().to_vec()));
    let notifications = create_memo(move |_| dashboard.with(|d| d.notifications().to_vec()));
    let stats = create_memo(move |_| dashboard.with(|d| d.stats().clone()));
    let selected_id = create_memo(move |_| dashboard.with(|d| d.selected_id().map(str::to_owned)));
    let selected = create_memo(move |_| dashboard.with(|d| d.selected_incident().cloned()));
    let user_location = create_memo(move |_| dashboard.with(|d| d.user_location()));
    let unread = create_memo(move |_| dashboard.with(|d| d.unread_count()));
    let tab = create_memo(move |_| dashboard.with(|d| d.active_tab()));

    let on_select = Callback::new(move |id: String| {
        dashboard.update(|d| {
            if let Err(err) = d.select_incident(&id) {
                tracing::debug!(%err, "selection ignored");
            }
        });
    });

    let on_read = Callback::new(move |id: String| {
        dashboard.update(|d| {
            if let Err(err) = d.mark_notification_read(&id) {
                tracing::debug!(%err, "mark read ignored");
            }
        });
    });

    let on_dismiss = Callback::new(move |id: String| {
        dashboard.update(|d| {
            if let Err(err) = d.dismiss_notification(&id) {
                tracing::debug!(%err, "dismiss ignored");
            }
        });
    });

    let on_submit = Callback::new(move |report: SubmittedReport| {
        let _ = dashboard.try_update(|d| match d.submit_report(report) {
            Ok(incident) => tracing::info!(id = %incident.id, "report submitted"),
            Err(err) => tracing::warn!(%err, "report rejected"),
        });
    });

    let list_limit = config.list_limit;
    let nearby_limit = config.nearby_limit;
    let fallback = config.fallback_location;
    let tile_url = config.tile_url.clone();

    view! {
      <div class="app">
        <header class="header">
          <div class="brand">
            <h1>"AERAS"</h1>
            <span class="meta">"AI Emergency Response & Alert System"</span>
          </div>
          <nav class="tabs">
            {Tab::iter()
              .map(|t| view! {
                <button
                  class=move || if tab.get() == t { "tab active" } else { "tab" }
                  on:click=move |_| dashboard.update(|d| d.set_active_tab(t))
                >
                  {t.label()}
                </button>
              })
              .collect_view()}
          </nav>
          <div class="bell" title="Unread alerts">
            "\u{1F514}"
            <Show when=move || (unread.get() > 0) fallback=|| ()>
              <span class="count">{move || unread.get()}</span>
            </Show>
          </div>
        </header>

        <main>
          {move || match tab.get() {
            Tab::Dashboard => view! {
              <StatsPanel stats=stats/>
              <div class="columns">
                <section class="panel">
                  <h2>"Active Incidents"</h2>
                  <IncidentList
                    incidents=active
                    selected_id=selected_id
                    now=now
                    limit=list_limit
                    on_select=on_select
                  />
                </section>
                <NotificationPanel
                  notifications=notifications
                  now=now
                  on_read=on_read
                  on_dismiss=on_dismiss
                />
              </div>
            }
            .into_view(),
            Tab::Map => view! {
              <div class="map-layout">
                <MapView
                  incidents=incidents
                  selected=selected
                  filter=filter
                  user_location=user_location
                  center=user_location.get_untracked().unwrap_or(fallback)
                  tile_url=tile_url.clone()
                  on_select=on_select
                />
                <aside class="panel">
                  <MapFilters filter=filter/>
                  <h3>"Nearby Incidents"</h3>
                  <IncidentList
                    incidents=nearby
                    selected_id=selected_id
                    now=now
                    limit=nearby_limit
                    on_select=on_select
                  />
                </aside>
              </div>
            }
            .into_view(),
            Tab::Report => view! {
              <ReportForm composer=composer user_location=user_location on_submit=on_submit/>
            }
            .into_view(),
          }}
        </main>
      </div>
    }
}
