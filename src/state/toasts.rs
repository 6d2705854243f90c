#[cfg(test)]
#[path = "toasts_test.rs"]
mod toasts_test;

/// Visual style of a toast notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastVariant {
    #[default]
    Info,
    Success,
    Error,
}

/// A single transient notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: String,
    pub title: String,
    pub message: String,
    pub variant: ToastVariant,
}

/// Queue of active toasts, newest last. Oldest entries are evicted once the
/// queue exceeds `MAX_TOASTS` so a burst of errors cannot fill the screen.
#[derive(Clone, Debug, Default)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
}

/// Maximum number of toasts shown at once.
pub const MAX_TOASTS: usize = 5;

impl ToastState {
    /// Append a toast and return its generated id (used for timed dismissal).
    pub fn push(&mut self, title: &str, message: &str, variant: ToastVariant) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.toasts.push(Toast {
            id: id.clone(),
            title: title.to_owned(),
            message: message.to_owned(),
            variant,
        });
        if self.toasts.len() > MAX_TOASTS {
            let excess = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..excess);
        }
        id
    }

    /// Remove a toast by id. Unknown ids are ignored (it may already have
    /// been dismissed by the user before the timer fired).
    pub fn dismiss(&mut self, id: &str) {
        self.toasts.retain(|t| t.id != id);
    }
}
