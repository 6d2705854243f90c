#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use leptos::prelude::*;

use crate::net::config::BackendConfig;
use crate::net::session::{SessionClient, SessionSubscription};
use crate::net::types::{ApiError, Session};
use crate::state::auth::{AuthState, Role};

/// What [`apply_session_value`] decided to do beyond mutating the state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The state is fully resolved; nothing further to do.
    Settled,
    /// A role lookup for this user must run. The result is keyed to the
    /// user id: if another identity supersedes it before the lookup
    /// resolves, the late result is discarded.
    FetchRole { user_id: String },
}

/// The single transition function through which every session value —
/// initial check or change notification — is applied.
///
/// Idempotent: applying the same session value twice is a no-op beyond
/// refreshing the stored token bundle, and never triggers a second role
/// lookup for an identity whose role is already resolved or in flight.
pub fn apply_session_value(state: &mut AuthState, incoming: Option<Session>) -> ApplyOutcome {
    match incoming {
        None => {
            // Signed out (or no prior session): clear everything. An
            // in-flight role lookup is implicitly cancelled because its
            // user id no longer matches.
            state.session = None;
            state.user = None;
            state.role = None;
            state.role_pending = false;
            state.loading = false;
            ApplyOutcome::Settled
        }
        Some(session) => {
            let same_identity =
                state.user.as_ref().is_some_and(|u| u.id == session.user.id);
            if same_identity {
                // Token refresh or a redundant notification for the same
                // identity. Keep the newer token bundle; the role (resolved
                // or pending) is still keyed to this user.
                state.session = Some(session);
                if !state.role_pending {
                    state.loading = false;
                }
                ApplyOutcome::Settled
            } else {
                let user = session.user.clone();
                state.session = Some(session);
                state.user = Some(user.clone());
                state.role = None;
                state.role_pending = true;
                // `loading` stays put: it only falls once the role lookup
                // for the first identity resolves.
                ApplyOutcome::FetchRole { user_id: user.id }
            }
        }
    }
}

/// Complete a role lookup started for `user_id`.
///
/// Returns false (leaving the state untouched) when the lookup is stale —
/// the identity changed while it was in flight. Last write wins, keyed by
/// identity rather than call order.
pub fn resolve_role_fetch(state: &mut AuthState, user_id: &str, role: Option<Role>) -> bool {
    let current = state.user.as_ref().is_some_and(|u| u.id == user_id);
    if !current {
        return false;
    }
    state.role = role;
    state.role_pending = false;
    state.loading = false;
    true
}

struct ControllerInner {
    state: RwSignal<AuthState>,
    session: SessionClient,
    disposed: AtomicBool,
    subscription: Mutex<Option<SessionSubscription>>,
}

/// Owner of the authoritative [`AuthState`] and broker of every identity
/// transition.
///
/// Constructed once at the application root and handed to the UI tree;
/// consumers read state through [`state`](Self::state) and invoke the
/// credential operations, which delegate to the backend and never mutate
/// state directly — the session-change notification is the single write
/// path.
#[derive(Clone)]
pub struct AuthController {
    inner: Arc<ControllerInner>,
}

impl AuthController {
    pub fn new(session: SessionClient) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                state: RwSignal::new(AuthState::default()),
                session,
                disposed: AtomicBool::new(false),
                subscription: Mutex::new(None),
            }),
        }
    }

    /// Read-only view of the auth state for the UI.
    pub fn state(&self) -> ReadSignal<AuthState> {
        self.inner.state.read_only()
    }

    pub fn config(&self) -> BackendConfig {
        self.inner.session.config()
    }

    /// Start the session lifecycle: subscribe to change notifications,
    /// then check for a persisted session. Both paths funnel into the same
    /// apply routine, so whichever lands first wins and the other is a
    /// harmless no-op. `loading` is guaranteed to fall once the check
    /// resolves, including on backend failure.
    pub fn initialize(&self) {
        let listener_ctrl = self.clone();
        let subscription = self
            .inner
            .session
            .on_session_change(move |session| listener_ctrl.apply_session(session));
        if let Ok(mut slot) = self.inner.subscription.lock() {
            *slot = Some(subscription);
        }

        #[cfg(feature = "hydrate")]
        {
            let ctrl = self.clone();
            leptos::task::spawn_local(async move {
                let session = ctrl.inner.session.load_persisted_session().await;
                ctrl.apply_session(session);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            // No persisted storage outside the browser: resolve as
            // signed-out so the loading gate cannot stick.
            self.apply_session(None);
        }
    }

    /// Stop reacting to session changes. No state writes happen after this.
    pub fn teardown(&self) {
        self.inner.disposed.store(true, Ordering::Relaxed);
        if let Ok(mut slot) = self.inner.subscription.lock() {
            slot.take();
        }
    }

    /// Apply a session snapshot and kick off the role lookup when a new
    /// identity appeared.
    fn apply_session(&self, incoming: Option<Session>) {
        if self.inner.disposed.load(Ordering::Relaxed) {
            return;
        }
        let access_token = incoming
            .as_ref()
            .map(|s| s.access_token.clone())
            .unwrap_or_default();
        let mut outcome = ApplyOutcome::Settled;
        self.inner.state.update(|state| {
            outcome = apply_session_value(state, incoming);
        });
        if let ApplyOutcome::FetchRole { user_id } = outcome {
            self.spawn_role_fetch(user_id, access_token);
        }
    }

    /// Run the role lookup for `user_id` and resolve it against the state.
    ///
    /// A lookup failure is non-fatal: the user proceeds with an unknown
    /// role and role-gated views treat them as unauthorized.
    fn spawn_role_fetch(&self, user_id: String, access_token: String) {
        #[cfg(feature = "hydrate")]
        {
            let ctrl = self.clone();
            leptos::task::spawn_local(async move {
                let config = ctrl.config();
                let role = match crate::net::rest::fetch_role(&config, &access_token, &user_id).await
                {
                    Ok(Some(label)) => {
                        let role = Role::from_label(&label);
                        if role.is_none() {
                            leptos::logging::warn!("unrecognized role label {label:?} for {user_id}");
                        }
                        role
                    }
                    Ok(None) => None,
                    Err(err) => {
                        leptos::logging::warn!("role lookup failed for {user_id}: {err}");
                        None
                    }
                };
                if ctrl.inner.disposed.load(Ordering::Relaxed) {
                    return;
                }
                ctrl.inner.state.update(|state| {
                    if !resolve_role_fetch(state, &user_id, role) {
                        leptos::logging::log!("discarding stale role result for {user_id}");
                    }
                });
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            // No browser, no lookup: resolve immediately as role-unknown so
            // `loading` cannot stick.
            let _ = access_token;
            self.inner.state.update(|state| {
                resolve_role_fetch(state, &user_id, None);
            });
        }
    }

    // ---------------------------------------------------------
    // Credential operations (non-mutating: state updates arrive
    // through the session-change listener)
    // ---------------------------------------------------------

    /// # Errors
    ///
    /// [`ApiError::Auth`] with a displayable message on bad credentials.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), ApiError> {
        self.inner.session.sign_in_with_password(email, password).await
    }

    /// # Errors
    ///
    /// [`ApiError::Auth`] with a displayable message on rejection.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<(), ApiError> {
        self.inner.session.sign_up(email, password, full_name).await
    }

    /// # Errors
    ///
    /// Currently infallible in practice; kept fallible for symmetry with
    /// the other credential operations.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        self.inner.session.sign_out().await
    }

    /// # Errors
    ///
    /// [`ApiError::Auth`] when the backend rejects the request.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        self.inner.session.reset_password_for_email(email).await
    }
}
