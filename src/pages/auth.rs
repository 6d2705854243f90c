//! Login / signup page with a forgot-password action.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::toast::show_toast;
use crate::net::controller::AuthController;
use crate::state::toasts::{ToastState, ToastVariant};

/// Combined login and signup card.
///
/// Sign-in success is not handled here: the session-change listener updates
/// the auth state, and the effect below leaves the page once a user is
/// present. Failures surface as toasts with the backend's message.
#[component]
pub fn AuthPage() -> impl IntoView {
    let controller = expect_context::<AuthController>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let auth = controller.state();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let is_sign_up = RwSignal::new(false);
    let busy = RwSignal::new(false);

    // Already (or newly) signed in: go to the dashboard.
    Effect::new(move || {
        let state = auth.get();
        if !state.loading && state.user.is_some() {
            navigate("/", NavigateOptions::default());
        }
    });

    let submit_controller = controller.clone();
    let submit = Callback::new(move |()| {
        if busy.get() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        let password_value = password.get();
        let full_name_value = full_name.get().trim().to_owned();
        let signing_up = is_sign_up.get();

        if signing_up && full_name_value.is_empty() {
            show_toast(toasts, "Sign up error", "Full name is required.", ToastVariant::Error);
            return;
        }

        busy.set(true);
        let controller = submit_controller.clone();
        leptos::task::spawn_local(async move {
            if signing_up {
                match controller.sign_up(&email_value, &password_value, &full_name_value).await {
                    Ok(()) => {
                        show_toast(
                            toasts,
                            "Account created",
                            "Please check your email to verify your account.",
                            ToastVariant::Success,
                        );
                        is_sign_up.set(false);
                    }
                    Err(err) => {
                        show_toast(toasts, "Sign up failed", &err.to_string(), ToastVariant::Error);
                    }
                }
            } else {
                match controller.sign_in(&email_value, &password_value).await {
                    Ok(()) => {
                        show_toast(toasts, "Welcome back", "Successfully logged in.", ToastVariant::Success);
                    }
                    Err(err) => {
                        show_toast(toasts, "Login failed", &err.to_string(), ToastVariant::Error);
                    }
                }
            }
            busy.set(false);
        });
    });

    let reset_controller = controller.clone();
    let on_reset = Callback::new(move |()| {
        let email_value = email.get().trim().to_owned();
        if email_value.is_empty() {
            show_toast(
                toasts,
                "Reset failed",
                "Enter your email address to receive the reset link.",
                ToastVariant::Error,
            );
            return;
        }
        busy.set(true);
        let controller = reset_controller.clone();
        leptos::task::spawn_local(async move {
            match controller.request_password_reset(&email_value).await {
                Ok(()) => {
                    show_toast(
                        toasts,
                        "Password reset sent",
                        "Check your email for the reset link.",
                        ToastVariant::Success,
                    );
                }
                Err(err) => {
                    show_toast(toasts, "Reset failed", &err.to_string(), ToastVariant::Error);
                }
            }
            busy.set(false);
        });
    });

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1 class="auth-card__title">
                    {move || if is_sign_up.get() { "Create Your Account" } else { "Welcome" }}
                </h1>
                <p class="auth-card__subtitle">
                    {move || {
                        if is_sign_up.get() {
                            "Enter your details to register."
                        } else {
                            "Log in to access your dashboard."
                        }
                    }}
                </p>

                <Show when=move || is_sign_up.get()>
                    <label class="auth-card__label">
                        "Full Name"
                        <input
                            class="auth-card__input"
                            type="text"
                            prop:value=move || full_name.get()
                            on:input=move |ev| full_name.set(event_target_value(&ev))
                        />
                    </label>
                </Show>
                <label class="auth-card__label">
                    "Email"
                    <input
                        class="auth-card__input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="auth-card__label">
                    "Password"
                    <input
                        class="auth-card__input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                submit.run(());
                            }
                        }
                    />
                </label>

                <button
                    class="btn btn--primary auth-card__submit"
                    disabled=move || busy.get()
                    on:click=move |_| submit.run(())
                >
                    {move || match (busy.get(), is_sign_up.get()) {
                        (true, true) => "Creating account...",
                        (true, false) => "Logging in...",
                        (false, true) => "Sign Up",
                        (false, false) => "Login",
                    }}
                </button>

                <Show when=move || !is_sign_up.get()>
                    <button class="btn btn--link" disabled=move || busy.get() on:click=move |_| on_reset.run(())>
                        "Forgot your password?"
                    </button>
                </Show>
                <button class="btn btn--link" disabled=move || busy.get() on:click=move |_| is_sign_up.update(|v| *v = !*v)>
                    {move || {
                        if is_sign_up.get() {
                            "Already have an account? Login"
                        } else {
                            "Don't have an account? Sign Up"
                        }
                    }}
                </button>
            </div>
        </div>
    }
}
