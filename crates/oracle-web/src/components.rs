//! UI Components

use std::time::Duration;

use leptos::prelude::*;

use crate::api::Prediction;
use crate::countdown::{ALPHA_WINDOW_SECS, format_countdown, tick};

/// Clickable preset questions
#[component]
pub fn QueryBubbles(
    #[prop(into)] queries: Signal<Vec<String>>,
    on_select: Callback<String>,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(optional)] right_side: bool,
) -> impl IntoView {
    let class = if right_side { "bubbles bubbles-right" } else { "bubbles" };

    view! {
        <div class=class>
            <For
                each=move || queries.get()
                key=|query| query.clone()
                children=move |query| {
                    let label = query.clone();
                    view! {
                        <button
                            class="bubble"
                            disabled=move || disabled.get()
                            on:click=move |_| on_select.run(query.clone())
                        >
                            {label}
                        </button>
                    }
                }
            />
        </div>
    }
}

/// Prediction floating inside the ball: text, CTA, share and the alpha countdown
#[component]
pub fn PredictionOverlay(
    prediction: Prediction,
    share_url: Option<String>,
    on_close: Callback<()>,
) -> impl IntoView {
    let (time_left, set_time_left) = signal(ALPHA_WINDOW_SECS);

    if let Ok(handle) = set_interval_with_handle(
        move || set_time_left.update(|t| *t = tick(*t)),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || handle.clear());
    }

    let share = share_url.map(|url| {
        view! {
            <button
                class="btn btn-share"
                on:click=move |_| {
                    if let Some(window) = web_sys::window() {
                        let _ = window.open_with_url_and_target(&url, "_blank");
                    }
                }
            >
                "SHARE"
            </button>
        }
    });

    let text_class = format!("prediction-text {}", prediction.sentiment.class());

    view! {
        <div class="prediction-overlay">
            <button class="close" on:click=move |_| on_close.run(())>"×"</button>

            <p class=text_class>"\u{201c}" {prediction.text} "\u{201d}"</p>

            <div class="timer">
                "Alpha expires: " {move || format_countdown(time_left.get())}
            </div>

            <div class="actions">
                <a class="btn btn-primary" href=prediction.cta_url target="_blank" rel="noreferrer">
                    {prediction.cta_label}
                </a>
                {share}
            </div>
        </div>
    }
}

/// Recent predictions, newest first
#[component]
pub fn HistoryDrawer(history: Signal<Vec<Prediction>>, on_close: Callback<()>) -> impl IntoView {
    view! {
        <div class="history-drawer">
            <div class="history-header">
                <h2>"Past Visions"</h2>
                <button on:click=move |_| on_close.run(())>"Close"</button>
            </div>
            <Show
                when=move || !history.get().is_empty()
                fallback=|| view! { <p class="empty">"The mists of time are empty..."</p> }
            >
                <ul class="history">
                    {move || {
                        history
                            .get()
                            .into_iter()
                            .map(|item| {
                                view! {
                                    <li class="vision">
                                        <p>{item.text}</p>
                                        <a href=item.cta_url target="_blank" rel="noreferrer">
                                            {item.cta_label}
                                        </a>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </div>
    }
}
