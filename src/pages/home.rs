//! Dashboard landing page.

use leptos::prelude::*;

/// Landing page after login. Intentionally spare; the roster is the real
/// working surface.
#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <h1>"Student Information System"</h1>
            <p>"Welcome. Use the navigation above to manage students."</p>
        </div>
    }
}
