//! Top navigation bar with school branding, role badge, and login/logout.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::toast::show_toast;
use crate::net::controller::AuthController;
use crate::state::toasts::{ToastState, ToastVariant};

/// Sticky navigation bar. Shows the current role while signed in; the
/// logout button returns to the login page once sign-out completes.
#[component]
pub fn Navigation() -> impl IntoView {
    let controller = expect_context::<AuthController>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let auth = controller.state();
    let navigate = use_navigate();

    let role_label = move || {
        auth.get()
            .role
            .map(|r| r.label().to_owned())
            .unwrap_or_default()
    };

    let on_sign_out = Callback::new(move |()| {
        let controller = controller.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match controller.sign_out().await {
                Ok(()) => navigate("/auth", NavigateOptions::default()),
                Err(err) => {
                    show_toast(toasts, "Sign-out failed", &err.to_string(), ToastVariant::Error);
                }
            }
        });
    });

    view! {
        <nav class="nav-bar">
            <div class="nav-bar__brand">
                <h1>"Milwaukee Marathi School"</h1>
                <p class="nav-bar__subtitle">"Student Information System"</p>
            </div>
            <div class="nav-bar__actions">
                <Show
                    when=move || auth.get().user.is_some()
                    fallback=|| {
                        view! {
                            <a class="btn" href="/auth">
                                "Login"
                            </a>
                        }
                    }
                >
                    <span class="nav-bar__role">{role_label}</span>
                    <button class="btn" on:click=move |_| on_sign_out.run(())>
                        "Logout"
                    </button>
                </Show>
            </div>
        </nav>
    }
}
