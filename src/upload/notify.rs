use super::types::PickedFile;

/// Toast surface the session reports outcomes to.
pub trait Notifier {
    fn success(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// The file-selection control. Its list is read-only; it can only be emptied.
pub trait FileInput {
    fn files(&self) -> &[PickedFile];
    fn clear(&mut self);
}
