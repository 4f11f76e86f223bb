//! Crystal Ball Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{HistoryDrawer, PredictionOverlay, QueryBubbles};
use crate::sound::ShakeSound;

#[component]
pub fn OraclePage() -> impl IntoView {
    let oracle = RwSignal::new(api::OracleState::default());
    let queries = RwSignal::new(Vec::<String>::new());
    let share_url = RwSignal::new(None::<String>);
    let shaking = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let (show_history, set_show_history) = signal(false);
    let (input, set_input) = signal(String::new());
    let sound = StoredValue::new_local(ShakeSound::load());

    // Initial state
    spawn_local(async move {
        match api::fetch_queries().await {
            Ok(list) => queries.set(list),
            Err(e) => error.set(Some(e)),
        }
        if let Ok(state) = api::fetch_state().await {
            oracle.set(state);
        }
    });

    let shake = Callback::new(move |query: String| {
        if shaking.get_untracked() || query.trim().is_empty() {
            return;
        }

        shaking.set(true);
        error.set(None);
        share_url.set(None);
        oracle.update(|s| s.current = None);
        sound.with_value(ShakeSound::play);

        spawn_local(async move {
            match api::shake(&query).await {
                Ok(reply) => {
                    oracle.set(reply.state);
                    share_url.set(reply.share_url);
                }
                Err(e) => error.set(Some(e)),
            }
            shaking.set(false);
        });
    });

    let close = Callback::new(move |()| {
        oracle.update(|s| s.current = None);
        spawn_local(async move {
            if let Ok(state) = api::close_prediction().await {
                oracle.set(state);
            }
        });
    });

    let submit = move || {
        let query = input.get();
        if !query.trim().is_empty() {
            shake.run(query);
            set_input.set(String::new());
        }
    };

    let left = Signal::derive(move || queries.get().into_iter().take(5).collect::<Vec<_>>());
    let right = Signal::derive(move || queries.get().into_iter().skip(5).take(5).collect::<Vec<_>>());
    let history = Signal::derive(move || oracle.get().history);

    view! {
        <div class="oracle">
            <header class="hero">
                <h1>"Kalshi Crystal Ball"</h1>
                <p class="tagline">"Shake the Future. Powered by Kalshi & Jupiter."</p>
                <div class="stats">
                    <span>{move || format!("🏆 {} Shakes", oracle.get().shake_count)}</span>
                    <button class="link" on:click=move |_| set_show_history.update(|v| *v = !*v)>
                        "Recent Visions"
                    </button>
                </div>
            </header>

            <section class="stage">
                <QueryBubbles queries=left on_select=shake disabled=shaking />

                <div class="ball-column">
                    <div class=move || if shaking.get() { "ball shaking" } else { "ball" }>
                        {move || {
                            oracle
                                .get()
                                .current
                                .filter(|_| !shaking.get())
                                .map(|prediction| {
                                    view! {
                                        <PredictionOverlay
                                            prediction=prediction
                                            share_url=share_url.get()
                                            on_close=close
                                        />
                                    }
                                })
                        }}
                    </div>

                    <form
                        class="ask"
                        on:submit=move |ev| {
                            ev.prevent_default();
                            submit();
                        }
                    >
                        <input
                            type="text"
                            placeholder="Ask the Oracle anything..."
                            prop:value=move || input.get()
                            on:input=move |ev| set_input.set(event_target_value(&ev))
                            disabled=move || shaking.get()
                        />
                        <button
                            type="submit"
                            disabled=move || shaking.get() || input.get().trim().is_empty()
                        >
                            {move || if shaking.get() { "..." } else { "⚡" }}
                        </button>
                    </form>

                    <Show when=move || error.get().is_some()>
                        <p class="error">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                </div>

                <QueryBubbles queries=right on_select=shake disabled=shaking right_side=true />
            </section>

            <Show when=move || show_history.get()>
                <HistoryDrawer
                    history=history
                    on_close=Callback::new(move |()| set_show_history.set(false))
                />
            </Show>
        </div>
    }
}
