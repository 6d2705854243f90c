use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use super::*;
use crate::net::types::{User, UserMetadata};

fn config() -> BackendConfig {
    BackendConfig { url: "https://school.example", anon_key: "anon" }
}

fn session(expires_at: Option<u64>) -> Session {
    Session {
        access_token: "at".to_owned(),
        refresh_token: "rt".to_owned(),
        expires_at,
        user: User {
            id: "u-1".to_owned(),
            email: None,
            user_metadata: UserMetadata::default(),
        },
    }
}

// =============================================================
// Expiry check
// =============================================================

#[test]
fn session_without_expiry_never_expires() {
    assert!(!session_is_expired(&session(None), u64::MAX));
}

#[test]
fn session_expired_at_and_past_deadline() {
    let s = session(Some(1000));
    assert!(session_is_expired(&s, 1000));
    assert!(session_is_expired(&s, 2000));
}

#[test]
fn session_near_expiry_counts_as_expired() {
    // Within the 30s skew window.
    let s = session(Some(1000));
    assert!(session_is_expired(&s, 980));
    assert!(!session_is_expired(&s, 900));
}

// =============================================================
// Change-listener registry
// =============================================================

#[test]
fn listeners_receive_emitted_sessions() {
    let client = SessionClient::new(config());
    let seen = Arc::new(AtomicU32::new(0));
    let seen_in_cb = Arc::clone(&seen);
    let _sub = client.on_session_change(move |s| {
        assert!(s.is_some());
        seen_in_cb.fetch_add(1, Ordering::Relaxed);
    });

    client.emit(Some(&session(None)));
    client.emit(Some(&session(Some(5))));
    assert_eq!(seen.load(Ordering::Relaxed), 2);
}

#[test]
fn unsubscribe_stops_delivery() {
    let client = SessionClient::new(config());
    let seen = Arc::new(AtomicU32::new(0));
    let seen_in_cb = Arc::clone(&seen);
    let sub = client.on_session_change(move |_| {
        seen_in_cb.fetch_add(1, Ordering::Relaxed);
    });

    client.emit(None);
    sub.unsubscribe();
    client.emit(None);
    assert_eq!(seen.load(Ordering::Relaxed), 1);
}

#[test]
fn dropping_the_subscription_unsubscribes() {
    let client = SessionClient::new(config());
    let seen = Arc::new(AtomicU32::new(0));
    let seen_in_cb = Arc::clone(&seen);
    {
        let _sub = client.on_session_change(move |_| {
            seen_in_cb.fetch_add(1, Ordering::Relaxed);
        });
        client.emit(None);
    }
    client.emit(None);
    assert_eq!(seen.load(Ordering::Relaxed), 1);
}

#[test]
fn clones_share_the_listener_registry() {
    let client = SessionClient::new(config());
    let clone = client.clone();
    let seen = Arc::new(AtomicU32::new(0));
    let seen_in_cb = Arc::clone(&seen);
    let _sub = client.on_session_change(move |_| {
        seen_in_cb.fetch_add(1, Ordering::Relaxed);
    });

    clone.emit(None);
    assert_eq!(seen.load(Ordering::Relaxed), 1);
}

#[test]
fn listener_unsubscribing_during_emit_is_safe() {
    let client = SessionClient::new(config());
    let seen = Arc::new(AtomicU32::new(0));
    let sub_slot: Arc<std::sync::Mutex<Option<SessionSubscription>>> =
        Arc::new(std::sync::Mutex::new(None));

    let seen_in_cb = Arc::clone(&seen);
    let slot_in_cb = Arc::clone(&sub_slot);
    let sub = client.on_session_change(move |_| {
        seen_in_cb.fetch_add(1, Ordering::Relaxed);
        // Self-unsubscribe mid-delivery.
        slot_in_cb.lock().expect("slot lock").take();
    });
    *sub_slot.lock().expect("slot lock") = Some(sub);

    client.emit(None);
    client.emit(None);
    assert_eq!(seen.load(Ordering::Relaxed), 1);
}
