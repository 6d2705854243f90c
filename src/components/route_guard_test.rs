use super::*;
use crate::net::types::{Session, User, UserMetadata};

fn signed_in_state() -> AuthState {
    let user = User {
        id: "u-1".to_owned(),
        email: None,
        user_metadata: UserMetadata::default(),
    };
    AuthState {
        session: Some(Session {
            access_token: "at".to_owned(),
            refresh_token: "rt".to_owned(),
            expires_at: None,
            user: user.clone(),
        }),
        user: Some(user),
        role: Some(Role::Teacher),
        role_pending: false,
        loading: false,
    }
}

// =============================================================
// guard_outcome ordering
// =============================================================

#[test]
fn waits_while_loading_even_without_a_user() {
    // No redirect decision may be made before the session check resolves.
    let state = AuthState::default();
    assert!(state.loading && state.user.is_none());
    assert_eq!(guard_outcome(&state), GuardOutcome::Waiting);
}

#[test]
fn waits_while_loading_even_with_a_user() {
    let mut state = signed_in_state();
    state.loading = true;
    assert_eq!(guard_outcome(&state), GuardOutcome::Waiting);
}

#[test]
fn redirects_once_resolved_without_user() {
    let mut state = AuthState::default();
    state.loading = false;
    assert_eq!(guard_outcome(&state), GuardOutcome::RedirectToLogin);
}

#[test]
fn renders_once_resolved_with_user() {
    assert_eq!(guard_outcome(&signed_in_state()), GuardOutcome::Render);
}

// =============================================================
// role_allowed
// =============================================================

#[test]
fn role_allowed_requires_membership() {
    let staff = [Role::Admin, Role::Teacher];
    assert!(role_allowed(Some(Role::Admin), &staff));
    assert!(role_allowed(Some(Role::Teacher), &staff));
    assert!(!role_allowed(Some(Role::Guardian), &staff));
}

#[test]
fn unknown_role_is_never_allowed() {
    assert!(!role_allowed(None, &[Role::Admin, Role::Teacher, Role::Guardian]));
}

#[test]
fn role_gate_is_case_insensitive_via_parser() {
    // Labels normalize before the allow-list check, so storage casing is
    // irrelevant.
    for label in ["Admin", "admin", "ADMIN"] {
        let role = Role::from_label(label);
        assert!(role_allowed(role, &[Role::Admin]), "label {label:?}");
    }
}
