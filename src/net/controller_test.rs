use leptos::prelude::GetUntracked;

use super::*;
use crate::net::types::{User, UserMetadata};

fn session_for(user_id: &str) -> Session {
    Session {
        access_token: format!("token-{user_id}"),
        refresh_token: "rt".to_owned(),
        expires_at: None,
        user: User {
            id: user_id.to_owned(),
            email: Some(format!("{user_id}@school.example")),
            user_metadata: UserMetadata::default(),
        },
    }
}

fn client() -> SessionClient {
    SessionClient::new(BackendConfig { url: "https://school.example", anon_key: "anon" })
}

// =============================================================
// apply_session_value: the single transition function
// =============================================================

#[test]
fn initial_no_session_resolves_signed_out() {
    let mut state = AuthState::default();
    assert!(state.loading);

    let outcome = apply_session_value(&mut state, None);

    assert_eq!(outcome, ApplyOutcome::Settled);
    assert!(state.session.is_none());
    assert!(state.user.is_none());
    assert!(state.role.is_none());
    assert!(!state.loading);
}

#[test]
fn new_identity_requests_role_fetch_and_keeps_loading() {
    let mut state = AuthState::default();

    let outcome = apply_session_value(&mut state, Some(session_for("u-1")));

    assert_eq!(outcome, ApplyOutcome::FetchRole { user_id: "u-1".to_owned() });
    assert_eq!(state.user.as_ref().map(|u| u.id.as_str()), Some("u-1"));
    assert!(state.role_pending);
    // Loading falls only once the role lookup resolves.
    assert!(state.loading);
}

#[test]
fn applying_same_session_twice_is_idempotent() {
    let mut state = AuthState::default();
    apply_session_value(&mut state, Some(session_for("u-1")));
    assert!(resolve_role_fetch(&mut state, "u-1", Some(Role::Teacher)));

    let before = state.clone();
    let outcome = apply_session_value(&mut state, Some(session_for("u-1")));

    // No second role fetch, no state drift.
    assert_eq!(outcome, ApplyOutcome::Settled);
    assert_eq!(state, before);
}

#[test]
fn redundant_apply_while_role_pending_keeps_waiting() {
    let mut state = AuthState::default();
    apply_session_value(&mut state, Some(session_for("u-1")));

    let outcome = apply_session_value(&mut state, Some(session_for("u-1")));

    assert_eq!(outcome, ApplyOutcome::Settled);
    assert!(state.role_pending);
    assert!(state.loading, "loading must not fall before the role resolves");
}

#[test]
fn token_refresh_keeps_identity_and_updates_session() {
    let mut state = AuthState::default();
    apply_session_value(&mut state, Some(session_for("u-1")));
    resolve_role_fetch(&mut state, "u-1", Some(Role::Admin));

    let mut rotated = session_for("u-1");
    rotated.access_token = "token-rotated".to_owned();
    let outcome = apply_session_value(&mut state, Some(rotated));

    assert_eq!(outcome, ApplyOutcome::Settled);
    assert_eq!(state.access_token(), Some("token-rotated"));
    assert_eq!(state.role, Some(Role::Admin));
}

#[test]
fn signing_out_clears_session_user_and_role() {
    let mut state = AuthState::default();
    apply_session_value(&mut state, Some(session_for("u-1")));
    resolve_role_fetch(&mut state, "u-1", Some(Role::Guardian));

    apply_session_value(&mut state, None);

    assert!(state.session.is_none());
    assert!(state.user.is_none());
    assert!(state.role.is_none());
    assert!(!state.role_pending);
    assert!(!state.loading);
}

// =============================================================
// resolve_role_fetch: identity-keyed, last write wins
// =============================================================

#[test]
fn role_resolution_applies_for_current_identity() {
    let mut state = AuthState::default();
    apply_session_value(&mut state, Some(session_for("u-1")));

    assert!(resolve_role_fetch(&mut state, "u-1", Some(Role::Teacher)));
    assert_eq!(state.role, Some(Role::Teacher));
    assert!(!state.role_pending);
    assert!(!state.loading);
}

#[test]
fn stale_role_result_is_discarded_after_identity_change() {
    let mut state = AuthState::default();
    apply_session_value(&mut state, Some(session_for("u-1")));
    // Identity B supersedes A before A's lookup resolves.
    apply_session_value(&mut state, Some(session_for("u-2")));
    resolve_role_fetch(&mut state, "u-2", Some(Role::Teacher));

    // A's lookup arrives late.
    assert!(!resolve_role_fetch(&mut state, "u-1", Some(Role::Admin)));
    assert_eq!(state.role, Some(Role::Teacher));
}

#[test]
fn stale_role_result_after_sign_out_does_not_resurrect_state() {
    let mut state = AuthState::default();
    apply_session_value(&mut state, Some(session_for("u-1")));
    apply_session_value(&mut state, None);

    assert!(!resolve_role_fetch(&mut state, "u-1", Some(Role::Admin)));
    assert!(state.role.is_none());
    assert!(state.user.is_none());
}

#[test]
fn failed_role_lookup_resolves_as_unknown_not_fatal() {
    let mut state = AuthState::default();
    apply_session_value(&mut state, Some(session_for("u-1")));

    assert!(resolve_role_fetch(&mut state, "u-1", None));
    assert!(state.role.is_none());
    assert!(!state.loading);
    assert!(state.user.is_some());
}

// =============================================================
// Loading is bounded and one-shot
// =============================================================

#[test]
fn loading_never_reverts_across_session_cycles() {
    let mut state = AuthState::default();
    apply_session_value(&mut state, None);
    assert!(!state.loading);

    // Later sign-in: loading stays down; role_pending covers the gap.
    apply_session_value(&mut state, Some(session_for("u-1")));
    assert!(!state.loading);
    assert!(state.role_pending);

    resolve_role_fetch(&mut state, "u-1", Some(Role::Teacher));
    apply_session_value(&mut state, None);
    assert!(!state.loading);
}

// =============================================================
// Controller lifecycle
// =============================================================

#[test]
fn controller_initialize_resolves_loading() {
    let ctrl = AuthController::new(client());
    assert!(ctrl.state().get_untracked().loading);

    ctrl.initialize();

    let state = ctrl.state().get_untracked();
    assert!(!state.loading);
    assert!(state.user.is_none());
}

#[test]
fn controller_apply_updates_state_through_single_path() {
    let ctrl = AuthController::new(client());
    ctrl.initialize();

    ctrl.apply_session(Some(session_for("u-1")));

    let state = ctrl.state().get_untracked();
    assert_eq!(state.user.as_ref().map(|u| u.id.as_str()), Some("u-1"));
    // Without a browser the role lookup resolves immediately as unknown.
    assert!(!state.role_pending);
    assert!(!state.loading);
}

#[test]
fn controller_ignores_updates_after_teardown() {
    let ctrl = AuthController::new(client());
    ctrl.initialize();
    let before = ctrl.state().get_untracked();

    ctrl.teardown();
    ctrl.apply_session(Some(session_for("u-1")));

    assert_eq!(ctrl.state().get_untracked(), before);
}
