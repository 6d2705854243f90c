#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::net::config::BackendConfig;
use crate::net::types::{ApiError, Session};

#[cfg(feature = "hydrate")]
use crate::net::types::{TokenResponse, auth_error_message};

/// `localStorage` key holding the persisted session JSON.
#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "sis_client_session";

/// Margin subtracted from the expiry so a token is refreshed slightly
/// before it actually lapses.
const EXPIRY_SKEW_SECS: u64 = 30;

/// True when the session's access token is expired (or about to be) at
/// `now_secs`. Sessions without a known expiry are assumed valid.
pub fn session_is_expired(session: &Session, now_secs: u64) -> bool {
    session
        .expires_at
        .is_some_and(|at| at <= now_secs.saturating_add(EXPIRY_SKEW_SECS))
}

type ChangeListener = Arc<dyn Fn(Option<Session>) + Send + Sync>;
type ListenerList = Arc<Mutex<Vec<(u64, ChangeListener)>>>;

/// Client for the auth backend: credential operations, session persistence,
/// and push-style change notifications.
///
/// Cheap to clone; clones share the listener registry. All listener
/// callbacks run synchronously on the UI event loop when a session change
/// is emitted.
#[derive(Clone)]
pub struct SessionClient {
    config: BackendConfig,
    listeners: ListenerList,
    next_listener_id: Arc<AtomicU64>,
}

/// Handle returned by [`SessionClient::on_session_change`]; dropping it (or
/// calling [`unsubscribe`](Self::unsubscribe)) deregisters the listener.
pub struct SessionSubscription {
    id: u64,
    listeners: Weak<Mutex<Vec<(u64, ChangeListener)>>>,
}

impl SessionSubscription {
    pub fn unsubscribe(&self) {
        if let Some(listeners) = self.listeners.upgrade() {
            if let Ok(mut listeners) = listeners.lock() {
                listeners.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl SessionClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener_id: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn config(&self) -> BackendConfig {
        self.config
    }

    /// Register a listener for session changes (sign-in, sign-out, refresh).
    pub fn on_session_change(
        &self,
        listener: impl Fn(Option<Session>) + Send + Sync + 'static,
    ) -> SessionSubscription {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push((id, Arc::new(listener)));
        }
        SessionSubscription { id, listeners: Arc::downgrade(&self.listeners) }
    }

    /// Notify all listeners of a new session value.
    ///
    /// The listener list is snapshotted first, and the lock released, so a
    /// callback that unsubscribes (or subscribes) cannot deadlock or
    /// invalidate the iteration.
    fn emit(&self, session: Option<&Session>) {
        let snapshot: Vec<ChangeListener> = match self.listeners.lock() {
            Ok(listeners) => listeners.iter().map(|(_, l)| Arc::clone(l)).collect(),
            Err(_) => return,
        };
        for listener in snapshot {
            listener(session.cloned());
        }
    }

    /// Load any valid persisted session, refreshing an expired one when a
    /// refresh token is available. Returns `None` (and clears storage) when
    /// nothing usable remains.
    pub async fn load_persisted_session(&self) -> Option<Session> {
        let stored = self.read_persisted()?;
        if !session_is_expired(&stored, now_secs()) {
            return Some(stored);
        }
        match self.refresh(&stored.refresh_token).await {
            Ok(fresh) => {
                self.write_persisted(&fresh);
                Some(fresh)
            }
            Err(err) => {
                leptos::logging::warn!("session refresh failed: {err}");
                self.clear_persisted();
                None
            }
        }
    }

    /// Exchange email + password for a session. On success the session is
    /// persisted and emitted to listeners; this method itself does not
    /// touch any UI state.
    ///
    /// # Errors
    ///
    /// [`ApiError::Auth`] with the backend's message on bad credentials,
    /// [`ApiError::Network`] when the request cannot complete.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let session = self
            .token_request(
                "token?grant_type=password",
                &serde_json::json!({ "email": email, "password": password }),
            )
            .await?;
        self.write_persisted(&session);
        self.emit(Some(&session));
        Ok(())
    }

    /// Create an account with the full name stored as profile metadata.
    ///
    /// When the backend auto-confirms the address it returns a session,
    /// which is persisted and emitted; otherwise the caller should prompt
    /// the user to verify their email before logging in.
    ///
    /// # Errors
    ///
    /// Same contract as [`sign_in_with_password`](Self::sign_in_with_password).
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let body = serde_json::json!({
                "email": email,
                "password": password,
                "data": { "full_name": full_name },
            });
            let resp = gloo_net::http::Request::post(&self.config.auth_url("signup"))
                .header("apikey", self.config.anon_key)
                .json(&body)
                .map_err(|e| ApiError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status();
            let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
            if !(200..300).contains(&status) {
                return Err(ApiError::Auth(auth_error_message(status, &text)));
            }
            // Auto-confirmed deployments return a full token bundle here.
            if let Ok(token) = serde_json::from_str::<TokenResponse>(&text) {
                let session = token.into_session(now_secs());
                self.write_persisted(&session);
                self.emit(Some(&session));
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password, full_name);
            Err(ApiError::Network("not available on server".to_owned()))
        }
    }

    /// Sign out: best-effort token revocation, then clear local state and
    /// emit `None`. Local sign-out always succeeds; a failed revocation is
    /// logged, not surfaced.
    ///
    /// # Errors
    ///
    /// None today; fallible for symmetry with the other credential
    /// operations.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            if let Some(session) = self.read_persisted() {
                let result = gloo_net::http::Request::post(&self.config.auth_url("logout"))
                    .header("apikey", self.config.anon_key)
                    .header("Authorization", &format!("Bearer {}", session.access_token))
                    .send()
                    .await;
                if let Err(err) = result {
                    leptos::logging::warn!("sign-out revocation failed: {err}");
                }
            }
        }
        self.clear_persisted();
        self.emit(None);
        Ok(())
    }

    /// Request a password-reset email linking back to the login page.
    ///
    /// # Errors
    ///
    /// [`ApiError::Auth`] with the backend's message on rejection.
    pub async fn reset_password_for_email(&self, email: &str) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let redirect = origin().map(|o| format!("{o}/auth")).unwrap_or_default();
            let url = format!("{}?redirect_to={redirect}", self.config.auth_url("recover"));
            let resp = gloo_net::http::Request::post(&url)
                .header("apikey", self.config.anon_key)
                .json(&serde_json::json!({ "email": email }))
                .map_err(|e| ApiError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            if !resp.ok() {
                let status = resp.status();
                let text = resp.text().await.unwrap_or_default();
                return Err(ApiError::Auth(auth_error_message(status, &text)));
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = email;
            Err(ApiError::Network("not available on server".to_owned()))
        }
    }

    /// Set a new password for the signed-in user (the reset-link landing
    /// flow arrives here with a valid recovery session).
    ///
    /// # Errors
    ///
    /// [`ApiError::Auth`] when no session is present or the backend
    /// rejects the new password.
    pub async fn update_password(&self, new_password: &str) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let Some(session) = self.read_persisted() else {
                return Err(ApiError::Auth("not signed in".to_owned()));
            };
            let resp = gloo_net::http::Request::put(&self.config.auth_url("user"))
                .header("apikey", self.config.anon_key)
                .header("Authorization", &format!("Bearer {}", session.access_token))
                .json(&serde_json::json!({ "password": new_password }))
                .map_err(|e| ApiError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            if !resp.ok() {
                let status = resp.status();
                let text = resp.text().await.unwrap_or_default();
                return Err(ApiError::Auth(auth_error_message(status, &text)));
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = new_password;
            Err(ApiError::Network("not available on server".to_owned()))
        }
    }

    /// Exchange a refresh token for a fresh session.
    async fn refresh(&self, refresh_token: &str) -> Result<Session, ApiError> {
        self.token_request(
            "token?grant_type=refresh_token",
            &serde_json::json!({ "refresh_token": refresh_token }),
        )
        .await
    }

    /// POST to a token endpoint and parse the session bundle.
    #[cfg(feature = "hydrate")]
    async fn token_request(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<Session, ApiError> {
        let resp = gloo_net::http::Request::post(&self.config.auth_url(path))
            .header("apikey", self.config.anon_key)
            .json(body)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(ApiError::Auth(auth_error_message(status, &text)));
        }
        let token: TokenResponse =
            serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(token.into_session(now_secs()))
    }

    #[cfg(not(feature = "hydrate"))]
    #[allow(clippy::unused_async)]
    async fn token_request(
        &self,
        _path: &str,
        _body: &serde_json::Value,
    ) -> Result<Session, ApiError> {
        Err(ApiError::Network("not available on server".to_owned()))
    }

    // ---------------------------------------------------------
    // localStorage persistence
    // ---------------------------------------------------------

    fn read_persisted(&self) -> Option<Session> {
        #[cfg(feature = "hydrate")]
        {
            let storage = web_sys::window()?.local_storage().ok()??;
            let raw = storage.get_item(STORAGE_KEY).ok()??;
            match serde_json::from_str(&raw) {
                Ok(session) => Some(session),
                Err(err) => {
                    leptos::logging::warn!("discarding unreadable persisted session: {err}");
                    let _ = storage.remove_item(STORAGE_KEY);
                    None
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn write_persisted(&self, session: &Session) {
        #[cfg(feature = "hydrate")]
        {
            if let Ok(raw) = serde_json::to_string(session) {
                if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
                    let _ = storage.set_item(STORAGE_KEY, &raw);
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = session;
        }
    }

    fn clear_persisted(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
                let _ = storage.remove_item(STORAGE_KEY);
            }
        }
    }
}

/// Current unix time in seconds. Zero on the server, where session logic
/// never runs.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn now_secs() -> u64 {
    #[cfg(feature = "hydrate")]
    {
        (js_sys::Date::now() / 1000.0) as u64
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0
    }
}

#[cfg(feature = "hydrate")]
fn origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}
