//! Page footer with copyright and legal links.

use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <p class="footer__copyright">
                "© 2026 Student Information System. All rights reserved."
            </p>
            <div class="footer__links">
                <a href="/disclaimer">"Disclaimer"</a>
                <a href="/terms">"Terms of Service"</a>
                <a href="/privacy">"Privacy Policy"</a>
                <a href="/contact">"Support / Contact"</a>
            </div>
        </footer>
    }
}
