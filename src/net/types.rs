#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

/// The authenticated principal as issued by the auth backend.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// Profile attributes attached at sign-up.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
}

impl User {
    /// Best-effort display name: full name, then email, then the raw id.
    pub fn display_name(&self) -> &str {
        self.user_metadata
            .full_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}

/// A backend-issued session: token bundle plus the user it belongs to.
///
/// Expiry and refresh are handled inside the session client; the rest of
/// the app only cares whether a session is present.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds at which the access token expires, when known.
    #[serde(default)]
    pub expires_at: Option<u64>,
    pub user: User,
}

/// Raw token-endpoint response. `expires_at` is preferred when present;
/// otherwise it is derived from `expires_in` at receipt time.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub expires_at: Option<u64>,
    pub user: User,
}

impl TokenResponse {
    /// Convert to a [`Session`], deriving `expires_at` from `expires_in`
    /// relative to `now_secs` when the backend did not supply it.
    pub fn into_session(self, now_secs: u64) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|d| now_secs + d));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

/// A student roster record, matching the `students` table.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Student {
    pub id: String,
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub class: String,
    pub date_of_birth: String,
}

/// Payload for creating a student; the backend assigns `id`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct NewStudent {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub class: String,
    pub date_of_birth: String,
}

/// Errors surfaced by the backend client layer.
///
/// All calls return these as values; nothing panics past the `net`
/// boundary. The UI displays messages verbatim and only interprets
/// `DuplicateKey` specially.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("backend configuration missing: {0}")]
    Config(&'static str),
    #[error("network error: {0}")]
    Network(String),
    /// Credential failure with the backend's human-readable message.
    #[error("{0}")]
    Auth(String),
    /// Unique-constraint violation on insert (Postgres code 23505).
    #[error("{0}")]
    DuplicateKey(String),
    /// Row-level security denial. Deliberately vague: the client must not
    /// infer anything about roles from it.
    #[error("access restricted")]
    AccessRestricted,
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Postgres unique-violation SQLSTATE, reported by the REST layer.
const DUPLICATE_KEY_CODE: &str = "23505";

/// Extract a human-readable message from an auth-endpoint error body.
///
/// The auth backend uses several shapes over its versions
/// (`error_description`, `msg`, `message`); fall back to the status code.
pub fn auth_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["error_description", "msg", "message"]
                .iter()
                .find_map(|k| v.get(k).and_then(|m| m.as_str()).map(ToOwned::to_owned))
        })
        .unwrap_or_else(|| format!("authentication failed (status {status})"))
}

/// Map a REST-endpoint failure to the error taxonomy.
///
/// 401/403 are row-level-security denials. Error bodies carry a Postgres
/// `code`; 23505 is the distinguished duplicate-key case.
pub fn rest_error(status: u16, body: &str) -> ApiError {
    if status == 401 || status == 403 {
        return ApiError::AccessRestricted;
    }
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let code = parsed
        .as_ref()
        .and_then(|v| v.get("code"))
        .and_then(|c| c.as_str());
    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(|m| m.as_str())
        .map(ToOwned::to_owned);
    if code == Some(DUPLICATE_KEY_CODE) {
        return ApiError::DuplicateKey(
            message.unwrap_or_else(|| "duplicate key value violates a unique constraint".to_owned()),
        );
    }
    ApiError::Network(message.unwrap_or_else(|| format!("request failed (status {status})")))
}
