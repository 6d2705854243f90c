use super::*;

#[test]
fn toast_state_default_empty() {
    let state = ToastState::default();
    assert!(state.toasts.is_empty());
}

#[test]
fn push_returns_id_of_new_toast() {
    let mut state = ToastState::default();
    let id = state.push("Saved", "Student registered.", ToastVariant::Success);
    assert_eq!(state.toasts.len(), 1);
    assert_eq!(state.toasts[0].id, id);
    assert_eq!(state.toasts[0].variant, ToastVariant::Success);
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut state = ToastState::default();
    let first = state.push("a", "1", ToastVariant::Info);
    let second = state.push("b", "2", ToastVariant::Error);
    state.dismiss(&first);
    assert_eq!(state.toasts.len(), 1);
    assert_eq!(state.toasts[0].id, second);
    // Dismissing again is a no-op.
    state.dismiss(&first);
    assert_eq!(state.toasts.len(), 1);
}

#[test]
fn queue_evicts_oldest_beyond_cap() {
    let mut state = ToastState::default();
    for i in 0..(MAX_TOASTS + 3) {
        state.push("t", &i.to_string(), ToastVariant::Info);
    }
    assert_eq!(state.toasts.len(), MAX_TOASTS);
    assert_eq!(state.toasts[0].message, "3");
}
