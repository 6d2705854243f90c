//! Backend endpoint configuration.
//!
//! The backend URL and publishable (anon) API key are baked in at compile
//! time from `SIS_BACKEND_URL` and `SIS_BACKEND_ANON_KEY`. A missing value
//! is a fatal startup error — the app refuses to mount rather than failing
//! silently on every request.

use crate::net::types::ApiError;

/// Resolved backend endpoint configuration.
#[derive(Clone, Copy, Debug)]
pub struct BackendConfig {
    pub url: &'static str,
    pub anon_key: &'static str,
}

impl BackendConfig {
    /// Read the compile-time environment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] naming the missing variable.
    pub fn from_env() -> Result<Self, ApiError> {
        let url = option_env!("SIS_BACKEND_URL").ok_or(ApiError::Config("SIS_BACKEND_URL"))?;
        let anon_key =
            option_env!("SIS_BACKEND_ANON_KEY").ok_or(ApiError::Config("SIS_BACKEND_ANON_KEY"))?;
        Ok(Self { url, anon_key })
    }

    /// Auth endpoint path under the backend base URL.
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.url.trim_end_matches('/'))
    }

    /// Table endpoint path under the backend base URL.
    pub fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{path}", self.url.trim_end_matches('/'))
    }
}
