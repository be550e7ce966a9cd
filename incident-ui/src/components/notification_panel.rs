use chrono::{DateTime, Utc};
use incident_core::view;
use incident_core::Notification;
use leptos::*;

#[component]
pub fn NotificationPanel(
    #[prop(into)] notifications: Signal<Vec<Notification>>,
    #[prop(into)] now: Signal<DateTime<Utc>>,
    #[prop(into)] on_read: Callback<String>,
    #[prop(into)] on_dismiss: Callback<String>,
) -> impl IntoView {
    let panel = create_memo(move |_| notifications.with(|n| view::notification_panel(n, now.get())));

    view! {
      <section class="panel alerts">
        <h2>
          "Alerts "
          {move || {
            let unread = panel.with(|p| p.unread);
            (unread > 0).then(|| view! { <span class="count">{unread}</span> })
          }}
        </h2>
        {move || {
          let panel = panel.get();
          if panel.is_empty() {
            return view! { <p class="empty">"No alerts"</p> }.into_view();
          }
          panel
            .items
            .into_iter()
            .map(|item| {
              let read_id = item.id.clone();
              let button_read_id = item.id.clone();
              let dismiss_id = item.id.clone();
              view! {
                <div class=item.class on:click=move |_| on_read.call(read_id.clone())>
                  <div class="row">
                    <b>{item.title}</b>
                    <button
                      class="dismiss"
                      title="Dismiss"
                      on:click=move |ev| {
                        ev.stop_propagation();
                        on_dismiss.call(dismiss_id.clone());
                      }
                    >
                      "\u{2715}"
                    </button>
                  </div>
                  <p>{item.message}</p>
                  <div class="row">
                    <span class="meta">{item.age}</span>
                    {(!item.read).then(|| view! {
                      <button
                        class="mark-read"
                        on:click=move |ev| {
                          ev.stop_propagation();
                          on_read.call(button_read_id.clone());
                        }
                      >
                        "Mark as read"
                      </button>
                    })}
                  </div>
                </div>
              }
            })
            .collect_view()
        }}
      </section>
    }
}
