use super::*;

fn user(id: &str) -> User {
    User {
        id: id.to_owned(),
        email: Some(format!("{id}@school.example")),
        user_metadata: UserMetadata { full_name: Some("Asha Kulkarni".to_owned()) },
    }
}

// =============================================================
// Token response → session
// =============================================================

#[test]
fn into_session_prefers_explicit_expires_at() {
    let resp = TokenResponse {
        access_token: "at".to_owned(),
        refresh_token: "rt".to_owned(),
        expires_in: Some(3600),
        expires_at: Some(5000),
        user: user("u-1"),
    };
    assert_eq!(resp.into_session(1000).expires_at, Some(5000));
}

#[test]
fn into_session_derives_expiry_from_expires_in() {
    let resp = TokenResponse {
        access_token: "at".to_owned(),
        refresh_token: "rt".to_owned(),
        expires_in: Some(3600),
        expires_at: None,
        user: user("u-1"),
    };
    assert_eq!(resp.into_session(1000).expires_at, Some(4600));
}

#[test]
fn session_round_trips_through_json() {
    let session = Session {
        access_token: "at".to_owned(),
        refresh_token: "rt".to_owned(),
        expires_at: Some(42),
        user: user("u-1"),
    };
    let json = serde_json::to_string(&session).expect("serialize");
    let back: Session = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, session);
}

#[test]
fn user_deserializes_without_metadata() {
    let u: User = serde_json::from_str(r#"{"id":"u-9"}"#).expect("user");
    assert_eq!(u.id, "u-9");
    assert!(u.email.is_none());
    assert_eq!(u.display_name(), "u-9");
}

#[test]
fn display_name_prefers_full_name_then_email() {
    let mut u = user("u-1");
    assert_eq!(u.display_name(), "Asha Kulkarni");
    u.user_metadata.full_name = None;
    assert_eq!(u.display_name(), "u-1@school.example");
}

// =============================================================
// Error mapping
// =============================================================

#[test]
fn auth_error_message_reads_known_shapes() {
    assert_eq!(
        auth_error_message(400, r#"{"error_description":"Invalid login credentials"}"#),
        "Invalid login credentials"
    );
    assert_eq!(auth_error_message(422, r#"{"msg":"Password too short"}"#), "Password too short");
    assert_eq!(auth_error_message(400, r#"{"message":"bad request"}"#), "bad request");
}

#[test]
fn auth_error_message_falls_back_to_status() {
    assert_eq!(auth_error_message(500, "<html>"), "authentication failed (status 500)");
}

#[test]
fn rest_error_distinguishes_duplicate_key() {
    let err = rest_error(
        409,
        r#"{"code":"23505","message":"duplicate key value violates unique constraint \"students_student_id_key\""}"#,
    );
    match err {
        ApiError::DuplicateKey(msg) => assert!(msg.contains("students_student_id_key")),
        other => panic!("expected DuplicateKey, got {other:?}"),
    }
}

#[test]
fn rest_error_maps_rls_denial_to_access_restricted() {
    assert_eq!(rest_error(401, ""), ApiError::AccessRestricted);
    assert_eq!(rest_error(403, r#"{"code":"42501","message":"permission denied"}"#), ApiError::AccessRestricted);
}

#[test]
fn rest_error_generic_failure_keeps_message() {
    assert_eq!(
        rest_error(500, r#"{"message":"server exploded"}"#),
        ApiError::Network("server exploded".to_owned())
    );
    assert_eq!(
        rest_error(502, "not json"),
        ApiError::Network("request failed (status 502)".to_owned())
    );
}
