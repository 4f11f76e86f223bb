//! Main App Component

use leptos::prelude::*;
use leptos_router::{components::*, path};

use crate::pages::OraclePage;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <p>"The mists hide this page"</p> }>
                    <Route path=path!("/") view=OraclePage />
                </Routes>
            </main>
        </Router>
    }
}
