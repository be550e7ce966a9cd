use crate::browser;
use incident_core::classifier::SimulatedClassifier;
use incident_core::{Category, Coordinates, ReportComposer, ReportDraft, Severity, SubmittedReport};
use leptos::*;
use std::str::FromStr;
use strum::IntoEnumIterator;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn ReportForm(
    composer: StoredValue<ReportComposer<SimulatedClassifier>>,
    #[prop(into)] user_location: Signal<Option<Coordinates>>,
    #[prop(into)] on_submit: Callback<SubmittedReport>,
) -> impl IntoView {
    let draft = create_rw_signal(ReportDraft::default());
    let submitting = create_rw_signal(false);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let current = draft.get_untracked();
        if !current.is_submittable() {
            return;
        }
        submitting.set(true);
        let delay = composer.with_value(|c| c.processing_delay());

        // The composer and location outlive this form; the draft may not if
        // the user switches tabs mid-analysis.
        spawn_local(async move {
            browser::sleep(delay).await;
            let composed = composer
                .try_update_value(|c| c.compose(&current, user_location.get_untracked()));
            let _ = submitting.try_set(false);
            match composed {
                Some(Ok(report)) => {
                    let _ = draft.try_set(ReportDraft::default());
                    on_submit.call(report);
                }
                Some(Err(err)) => tracing::warn!(%err, "report could not be composed"),
                None => {}
            }
        });
    };

    view! {
      <form class="panel report" on:submit=submit>
        <h2>"Report an Emergency"</h2>

        <label>
          "Type"
          <select
            prop:value=move || draft.with(|d| d.category.to_string())
            on:change=move |ev| {
              if let Ok(category) = Category::from_str(&event_target_value(&ev)) {
                draft.update(|d| d.category = category);
              }
            }
          >
            {Category::iter()
              .map(|c| view! {
                <option value=c.to_string()>{format!("{} {}", c.glyph(), c.label())}</option>
              })
              .collect_view()}
          </select>
        </label>

        <label>
          "Title"
          <input
            type="text"
            placeholder="Brief summary of the emergency"
            prop:value=move || draft.with(|d| d.title.clone())
            on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
          />
        </label>

        <label>
          "Description"
          <textarea
            rows="4"
            placeholder="What is happening, and where?"
            prop:value=move || draft.with(|d| d.description.clone())
            on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
          ></textarea>
        </label>

        <div class="severity-picker">
          {Severity::iter()
            .map(|s| view! {
              <button
                type="button"
                class=move || {
                  if draft.with(|d| d.severity == s) {
                    format!("sev sev-{s} active")
                  } else {
                    format!("sev sev-{s}")
                  }
                }
                on:click=move |_| draft.update(|d| d.severity = s)
              >
                {s.label()}
              </button>
            })
            .collect_view()}
        </div>

        <p class="meta">
          {move || match user_location.get() {
            Some(c) => format!("Location: {:.4}, {:.4}", c.latitude, c.longitude),
            None => "Location unavailable, a nearby point will be used".to_string(),
          }}
        </p>

        <button
          type="submit"
          class="primary"
          disabled=move || submitting.get() || !draft.with(ReportDraft::is_submittable)
        >
          {move || if submitting.get() { "AI is analyzing your report..." } else { "Submit Report" }}
        </button>
      </form>
    }
}
