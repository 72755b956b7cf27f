use crate::upload::{FileInput, Notifier, PickedFile};
use std::time::{Duration, Instant};

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub is_error: bool,
    shown_at: Instant,
}

/// Short-lived success/error banners.
#[derive(Default)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Toasts {
    pub fn prune(&mut self) {
        self.items.retain(|t| t.shown_at.elapsed() < TOAST_TTL);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn push(&mut self, text: &str, is_error: bool) {
        self.items.push(Toast {
            text: text.to_string(),
            is_error,
            shown_at: Instant::now(),
        });
    }
}

impl Notifier for Toasts {
    fn success(&mut self, message: &str) {
        self.push(message, false);
    }

    fn error(&mut self, message: &str) {
        self.push(message, true);
    }
}

/// What the file dialog last returned. Cleared so the same name can be picked again.
#[derive(Default)]
pub struct SelectedFiles {
    files: Vec<PickedFile>,
}

impl SelectedFiles {
    pub fn set(&mut self, files: Vec<PickedFile>) {
        self.files = files;
    }
}

impl FileInput for SelectedFiles {
    fn files(&self) -> &[PickedFile] {
        &self.files
    }

    fn clear(&mut self) {
        self.files.clear();
    }
}
