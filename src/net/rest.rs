//! Table access over the backend's REST layer.
//!
//! Every call sends the publishable key plus the caller's bearer token;
//! row-level security on the backend decides what actually comes back.
//! Failures degrade: callers get `Result` values, never panics.

#![allow(clippy::unused_async)]

use crate::net::config::BackendConfig;
use crate::net::types::{ApiError, NewStudent, Student};

#[cfg(feature = "hydrate")]
use crate::net::types::rest_error;

/// Look up the role label for a user in the `user_roles` table.
///
/// Returns `Ok(None)` when no row exists. A lookup failure is expected to
/// be treated as "role unknown" by the caller, not as fatal.
///
/// # Errors
///
/// [`ApiError::AccessRestricted`] on a row-level-security denial,
/// [`ApiError::Network`] otherwise.
pub async fn fetch_role(
    config: &BackendConfig,
    access_token: &str,
    user_id: &str,
) -> Result<Option<String>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        #[derive(serde::Deserialize)]
        struct RoleRow {
            role: String,
        }

        let url = config.rest_url(&format!("user_roles?select=role&user_id=eq.{user_id}"));
        let resp = gloo_net::http::Request::get(&url)
            .header("apikey", config.anon_key)
            .header("Authorization", &format!("Bearer {access_token}"))
            // Single-object response; 406 when the row does not exist.
            .header("Accept", "application/vnd.pgrst.object+json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        match resp.status() {
            200 => {
                let row: RoleRow =
                    resp.json().await.map_err(|e| ApiError::Decode(e.to_string()))?;
                Ok(Some(row.role))
            }
            406 => Ok(None),
            status => {
                let text = resp.text().await.unwrap_or_default();
                Err(rest_error(status, &text))
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, access_token, user_id);
        Ok(None)
    }
}

/// Fetch the student roster, ordered by last name.
///
/// # Errors
///
/// [`ApiError::AccessRestricted`] when row-level security denies the read
/// (the client must not infer a specific role from this), network and
/// decode variants otherwise.
pub async fn fetch_students(
    config: &BackendConfig,
    access_token: &str,
) -> Result<Vec<Student>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = config.rest_url("students?select=*&order=last_name.asc");
        let resp = gloo_net::http::Request::get(&url)
            .header("apikey", config.anon_key)
            .header("Authorization", &format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(rest_error(status, &text));
        }
        resp.json().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, access_token);
        Err(ApiError::Network("not available on server".to_owned()))
    }
}

/// Insert a new student record.
///
/// # Errors
///
/// [`ApiError::DuplicateKey`] when the student id is already taken,
/// [`ApiError::AccessRestricted`] on a row-level-security denial, network
/// variants otherwise.
pub async fn create_student(
    config: &BackendConfig,
    access_token: &str,
    student: &NewStudent,
) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = config.rest_url("students");
        let resp = gloo_net::http::Request::post(&url)
            .header("apikey", config.anon_key)
            .header("Authorization", &format!("Bearer {access_token}"))
            .header("Prefer", "return=minimal")
            .json(student)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(rest_error(status, &text));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, access_token, student);
        Err(ApiError::Network("not available on server".to_owned()))
    }
}
