#[cfg(test)]
#[path = "route_guard_test.rs"]
mod route_guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::controller::AuthController;
use crate::state::auth::{AuthState, Role};

/// What the guard decided for the current auth state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Initial session check still running: show a neutral placeholder,
    /// make no redirect decision yet.
    Waiting,
    /// Resolved and unauthenticated: send the user to the login page.
    RedirectToLogin,
    /// Authenticated: render the protected content.
    Render,
}

/// Pure gating decision. Never redirects while the state is still loading,
/// so an unauthenticated instant during startup cannot flash the login
/// page at a user whose session is about to resolve.
pub fn guard_outcome(state: &AuthState) -> GuardOutcome {
    if state.loading {
        GuardOutcome::Waiting
    } else if state.user.is_none() {
        GuardOutcome::RedirectToLogin
    } else {
        GuardOutcome::Render
    }
}

/// True when the (possibly absent) role passes the allow-list. Advisory
/// only — the backend's row security is the real boundary.
pub fn role_allowed(role: Option<Role>, allowed: &[Role]) -> bool {
    role.is_some_and(|r| allowed.contains(&r))
}

/// Wraps protected content: placeholder while loading, redirect to `/auth`
/// when unauthenticated, children otherwise.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<AuthController>().state();
    let navigate = use_navigate();

    // The redirect is a side effect; the render branch below stays pure.
    Effect::new(move || {
        if guard_outcome(&auth.get()) == GuardOutcome::RedirectToLogin {
            navigate("/auth", NavigateOptions::default());
        }
    });

    view! {
        {move || match guard_outcome(&auth.get()) {
            GuardOutcome::Render => children().into_any(),
            GuardOutcome::Waiting | GuardOutcome::RedirectToLogin => view! {
                <div class="route-guard__placeholder">"Loading application..."</div>
            }
            .into_any(),
        }}
    }
}

/// Secondary gate for pages restricted to specific roles. Applied inside a
/// `ProtectedRoute`, so the user is known to be authenticated; this only
/// decides whether their role qualifies.
#[component]
pub fn RoleGate(allowed: Vec<Role>, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<AuthController>().state();

    view! {
        {move || {
            let state = auth.get();
            if state.role_pending {
                view! { <div class="route-guard__placeholder">"Checking access..."</div> }.into_any()
            } else if role_allowed(state.role, &allowed) {
                children().into_any()
            } else {
                view! {
                    <div class="access-denied">
                        "Access Denied: you do not have permission to view this page."
                    </div>
                }
                .into_any()
            }
        }}
    }
}
