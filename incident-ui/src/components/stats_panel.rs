use incident_core::view;
use incident_core::Stats;
use leptos::*;

#[component]
pub fn StatsPanel(#[prop(into)] stats: Signal<Stats>) -> impl IntoView {
    view! {
      <div class="stats">
        {move || stats
          .with(view::stat_cards)
          .into_iter()
          .map(|card| view! {
            <div class=format!("stat-card {}", card.color)>
              <span class="meta">{card.title}</span>
              <strong>{card.value}</strong>
              <span class=if card.positive { "change up" } else { "change down" }>{card.change}</span>
            </div>
          })
          .collect_view()}
      </div>
    }
}
