use incident_core::geo::{self, Viewport};
use incident_core::view::{self, MapFilter};
use incident_core::{Category, Coordinates, Incident, Severity};
use leptos::*;
use strum::IntoEnumIterator;

const MAP_WIDTH: f64 = 900.0;
const MAP_HEIGHT: f64 = 560.0;
const PAN_STEP: f64 = 160.0;

#[component]
pub fn MapView(
    #[prop(into)] incidents: Signal<Vec<Incident>>,
    #[prop(into)] selected: Signal<Option<Incident>>,
    #[prop(into)] filter: Signal<MapFilter>,
    #[prop(into)] user_location: Signal<Option<Coordinates>>,
    center: Coordinates,
    tile_url: String,
    #[prop(into)] on_select: Callback<String>,
) -> impl IntoView {
    let viewport = create_rw_signal(Viewport::overview(center));

    // Only re-center when the selection itself moves, not when a tick bumps its votes.
    let focus = create_memo(move |_| {
        selected.with(|s| s.as_ref().map(|i| (i.id.clone(), i.location)))
    });
    create_effect(move |_| {
        if let Some((_, location)) = focus.get() {
            viewport.set(Viewport::focus(location));
        }
    });

    let tiles = move || {
        viewport
            .get()
            .visible_tiles(MAP_WIDTH, MAP_HEIGHT)
            .into_iter()
            .map(|t| {
                view! {
                  <img
                    class="tile"
                    alt=""
                    src=geo::tile_url(&tile_url, t.z, t.x, t.y)
                    style=format!("left: {:.1}px; top: {:.1}px;", t.left, t.top)
                  />
                }
            })
            .collect_view()
    };

    let markers = move || {
        let current = viewport.get();
        let selected_id = focus.with(|f| f.as_ref().map(|(id, _)| id.clone()));
        let markers = incidents
            .with(|list| filter.with(|f| view::map_markers(list, f, selected_id.as_deref())));
        markers
            .into_iter()
            .filter_map(|m| {
                let (x, y) = current.to_screen(m.position, MAP_WIDTH, MAP_HEIGHT);
                let margin = m.radius_px + 40.0;
                if x < -margin || y < -margin || x > MAP_WIDTH + margin || y > MAP_HEIGHT + margin {
                    return None;
                }
                let id = m.id.clone();
                let diameter = m.radius_px * 2.0;
                Some(view! {
                  <div
                    class=if m.selected { "marker selected" } else { "marker" }
                    style=format!("left: {x:.1}px; top: {y:.1}px;")
                    on:click=move |_| on_select.call(id.clone())
                  >
                    <span
                      class="ring"
                      style=format!(
                        "width: {diameter}px; height: {diameter}px; background: {c}; border-color: {c};",
                        c = m.color,
                      )
                    ></span>
                    <span class="glyph">{m.glyph}</span>
                    {m.selected.then(|| view! {
                      <div class="popup">
                        <b>{m.title.clone()}</b>
                        <p>{m.description.clone()}</p>
                        <span class="meta">
                          {format!("{} \u{b7} {}", m.severity_label, m.confidence_label)}
                        </span>
                      </div>
                    })}
                  </div>
                })
            })
            .collect_view()
    };

    let you_are_here = move || {
        let here = user_location.get()?;
        let (x, y) = viewport.get().to_screen(here, MAP_WIDTH, MAP_HEIGHT);
        Some(view! {
          <div class="you" title="Your location" style=format!("left: {x:.1}px; top: {y:.1}px;")></div>
        })
    };

    view! {
      <div class="map" style=format!("width: {MAP_WIDTH}px; height: {MAP_HEIGHT}px;")>
        <div class="tiles">{tiles}</div>
        <div class="markers">{markers}</div>
        {you_are_here}
        <div class="map-controls">
          <button title="Zoom in" on:click=move |_| viewport.update(|v| *v = v.zoomed(1))>"+"</button>
          <button title="Zoom out" on:click=move |_| viewport.update(|v| *v = v.zoomed(-1))>"\u{2212}"</button>
          <button title="Pan north" on:click=move |_| viewport.update(|v| *v = v.panned(0.0, -PAN_STEP))>"\u{2191}"</button>
          <button title="Pan south" on:click=move |_| viewport.update(|v| *v = v.panned(0.0, PAN_STEP))>"\u{2193}"</button>
          <button title="Pan west" on:click=move |_| viewport.update(|v| *v = v.panned(-PAN_STEP, 0.0))>"\u{2190}"</button>
          <button title="Pan east" on:click=move |_| viewport.update(|v| *v = v.panned(PAN_STEP, 0.0))>"\u{2192}"</button>
          <button title="Reset view" on:click=move |_| viewport.set(Viewport::overview(center))>"\u{2302}"</button>
        </div>
        <Legend/>
        <div class="attribution">{geo::ATTRIBUTION}</div>
      </div>
    }
}

#[component]
fn Legend() -> impl IntoView {
    view! {
      <div class="legend">
        <h4>"Severity"</h4>
        {Severity::iter()
          .rev()
          .map(|s| view! {
            <div class="row">
              <span class="swatch" style=format!("background: {};", s.color())></span>
              {s.label()}
            </div>
          })
          .collect_view()}
        <h4>"Type"</h4>
        {Category::iter()
          .map(|c| view! {
            <div class="row">
              <span>{c.glyph()}</span>
              {c.legend_label()}
            </div>
          })
          .collect_view()}
      </div>
    }
}

#[component]
pub fn MapFilters(filter: RwSignal<MapFilter>) -> impl IntoView {
    let toggle = move |label: &'static str,
                       get: fn(&MapFilter) -> bool,
                       set: fn(&mut MapFilter, bool)| {
        view! {
          <label class="check">
            <input
              type="checkbox"
              prop:checked=move || filter.with(get)
              on:change=move |ev| filter.update(|f| set(f, event_target_checked(&ev)))
            />
            {label}
          </label>
        }
    };

    view! {
      <div class="filters">
        <h3>"Filters"</h3>
        {toggle("Active", |f| f.show_active, |f, on| f.show_active = on)}
        {toggle("Investigating", |f| f.show_investigating, |f, on| f.show_investigating = on)}
        {toggle("Resolved", |f| f.show_resolved, |f, on| f.show_resolved = on)}
        {toggle("Critical only", |f| f.critical_only, |f, on| f.critical_only = on)}
        {toggle("Verified only", |f| f.verified_only, |f, on| f.verified_only = on)}
      </div>
    }
}
