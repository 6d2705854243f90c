//! Toast notification host and push helper.

use leptos::prelude::*;

use crate::state::toasts::{ToastState, ToastVariant};

/// How long a toast stays up before auto-dismissal.
#[cfg(feature = "hydrate")]
const TOAST_DURATION_MS: u32 = 5000;

/// Push a toast and schedule its dismissal.
pub fn show_toast(toasts: RwSignal<ToastState>, title: &str, message: &str, variant: ToastVariant) {
    let mut id = String::new();
    toasts.update(|t| id = t.push(title, message, variant));

    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_DURATION_MS).await;
            toasts.update(|t| t.dismiss(&id));
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
    }
}

/// Renders the active toast stack in a corner overlay. Clicking a toast
/// dismisses it early.
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-host">
            {move || {
                toasts
                    .get()
                    .toasts
                    .into_iter()
                    .map(|toast| {
                        let class = match toast.variant {
                            ToastVariant::Info => "toast toast--info",
                            ToastVariant::Success => "toast toast--success",
                            ToastVariant::Error => "toast toast--error",
                        };
                        let id = toast.id.clone();
                        view! {
                            <div class=class on:click=move |_| toasts.update(|t| t.dismiss(&id))>
                                <strong class="toast__title">{toast.title}</strong>
                                <span class="toast__message">{toast.message}</span>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
