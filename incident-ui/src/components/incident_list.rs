use chrono::{DateTime, Utc};
use incident_core::view;
use incident_core::Incident;
use leptos::*;

#[component]
pub fn IncidentList(
    #[prop(into)] incidents: Signal<Vec<Incident>>,
    #[prop(into)] selected_id: Signal<Option<String>>,
    #[prop(into)] now: Signal<DateTime<Utc>>,
    limit: usize,
    #[prop(into)] on_select: Callback<String>,
) -> impl IntoView {
    let rows = move || {
        incidents.with(|list| view::incident_list(list, selected_id.get().as_deref(), limit, now.get()))
    };

    view! {
      <Show
        when=move || incidents.with(|list| !list.is_empty())
        fallback=|| view! { <p class="empty">"No incidents to show."</p> }
      >
        <ul class="incident-list">
          {move || rows()
            .into_iter()
            .map(|item| {
              let id = item.id.clone();
              view! {
                <li
                  class=if item.selected { "incident selected" } else { "incident" }
                  on:click=move |_| on_select.call(id.clone())
                >
                  <div class="row">
                    <span class="glyph">{item.glyph}</span>
                    <b>{item.title}</b>
                    {item.verified.then(|| view! {
                      <span class="verified" title="Verified by authority">"\u{2713}"</span>
                    })}
                  </div>
                  <p class="meta">{item.description}</p>
                  <div class="row meta">
                    <span>{item.radius_label}</span>
                    <span>{item.reported}</span>
                  </div>
                  <div class="row">
                    <span class=item.severity_class>{item.severity_label}</span>
                    <span class=item.status_class>{item.status_label}</span>
                    <span class="votes">
                      {format!("\u{1F44D} {}  \u{1F44E} {}", item.upvotes, item.downvotes)}
                    </span>
                    <span class="confidence">{format!("AI {}", item.confidence_label)}</span>
                  </div>
                </li>
              }
            })
            .collect_view()}
        </ul>
      </Show>
    }
}
