mod client;
mod dedup;
mod dispatch;
mod notify;
mod reconcile;
mod session;
mod store;
mod types;

pub use client::UploaderClient;
pub use dedup::deduplicate;
pub use dispatch::Dispatcher;
pub use notify::{FileInput, Notifier};
pub use reconcile::reconcile;
pub use session::{
    Completion, DeleteAction, DeleteRequest, Request, UploadContext, UploadRequest, UploadSession,
};
pub use store::{FileStore, PendingDeletes};
pub use types::{ApiResponse, BatchId, FileState, PickedFile, StatusCode, TrackedFile, UploadedFile};
