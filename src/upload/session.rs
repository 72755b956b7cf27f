use super::dedup::{deduplicate, skipped_names};
use super::notify::{FileInput, Notifier};
use super::reconcile::reconcile;
use super::store::{FileStore, PendingDeletes};
use super::types::{ApiResponse, BatchId, PickedFile, TrackedFile, UploadedFile};
use crate::config::UploadType;
use crate::error::UploaderError;
use crate::i18n::Translator;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Caller-supplied fields forwarded untouched with every batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadContext {
    pub owner_id: String,
    pub upload_type: UploadType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub batch: BatchId,
    pub owner_id: String,
    pub upload_type: UploadType,
    pub files: Vec<PickedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub identity: String,
    pub id: String,
}

/// Work for the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Upload(UploadRequest),
    Delete(DeleteRequest),
}

/// A settled network call, delivered back to the thread that owns the session.
#[derive(Debug)]
pub enum Completion {
    Upload {
        batch: BatchId,
        result: Result<ApiResponse, UploaderError>,
    },
    Delete {
        identity: String,
        result: Result<ApiResponse, UploaderError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteAction {
    /// Not uploaded; dropped from the list without a request.
    Removed,
    Dispatch(DeleteRequest),
    /// Unknown file, or a delete for it is already in flight.
    Ignored,
}

/// State of one uploader widget: its file list and its in-flight deletes.
#[derive(Debug)]
pub struct UploadSession {
    store: FileStore,
    pending_deletes: PendingDeletes,
    next_batch: u64,
    success_code: String,
    translator: Translator,
}

impl UploadSession {
    pub fn new(success_code: impl Into<String>, translator: Translator) -> Self {
        Self {
            store: FileStore::new(),
            pending_deletes: PendingDeletes::default(),
            next_batch: 0,
            success_code: success_code.into(),
            translator,
        }
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    pub fn pending_deletes(&self) -> &PendingDeletes {
        &self.pending_deletes
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Admits the untracked part of a selection as `Uploading` entries and
    /// returns the single request that uploads them, if there is anything to send.
    pub fn select(
        &mut self,
        selection: &[PickedFile],
        context: &UploadContext,
    ) -> Option<UploadRequest> {
        let files = deduplicate(selection, &self.store);
        let skipped = skipped_names(selection, &files);
        if !skipped.is_empty() {
            debug!("Skipping already tracked files: {:?}", skipped);
        }
        if files.is_empty() {
            return None;
        }

        let batch = BatchId(self.next_batch);
        self.next_batch += 1;
        self.store
            .append(files.iter().map(|f| TrackedFile::uploading(f.name.clone(), batch)));

        info!("Batch {} admitted {} file(s)", batch, files.len());
        Some(UploadRequest {
            batch,
            owner_id: context.owner_id.clone(),
            upload_type: context.upload_type,
            files,
        })
    }

    /// Resolves every entry still uploading as part of `batch` to one outcome.
    pub fn resolve_upload(
        &mut self,
        batch: BatchId,
        result: Result<ApiResponse, UploaderError>,
        notifier: &mut dyn Notifier,
    ) {
        let members: Vec<String> = self
            .store
            .entries()
            .iter()
            .filter(|f| f.belongs_to(batch))
            .map(|f| f.identity.clone())
            .collect();

        if members.is_empty() {
            debug!("Batch {} has no entries left to update", batch);
            return;
        }

        let mut succeeded = HashMap::new();
        let mut failed = HashMap::new();

        match self.accept_upload(result, &members) {
            Ok((uploaded, message)) => {
                let by_name: HashMap<&str, &UploadedFile> =
                    uploaded.iter().map(|u| (u.name.as_str(), u)).collect();
                for name in &members {
                    if let Some(u) = by_name.get(name.as_str()) {
                        succeeded.insert(
                            name.clone(),
                            TrackedFile::succeeded(name.clone(), u.id.clone(), u.url.clone()),
                        );
                    }
                }
                info!("Batch {} uploaded {} file(s)", batch, members.len());
                let text = message.unwrap_or_else(|| self.translator.t("uploadSucceeded"));
                notifier.success(&text);
            }
            Err(e) => {
                match &e {
                    UploaderError::MalformedResponse { detail, .. } => {
                        warn!("Batch {}: malformed upload response: {}", batch, detail)
                    }
                    other => warn!("Batch {} failed: {}", batch, other),
                }
                for name in &members {
                    failed.insert(name.clone(), TrackedFile::failed(name.clone()));
                }
                let text = match &e {
                    UploaderError::ReadFile { .. } => e.to_string(),
                    _ => e
                        .server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| self.translator.t("failToUploadFilesDueToNetwork")),
                };
                notifier.error(&text);
            }
        }

        let entries = self.store.take_entries();
        self.store
            .replace_all(reconcile(entries, &succeeded, &failed));
    }

    /// Handles a click on an entry's delete button.
    pub fn request_delete(&mut self, identity: &str, input: &mut dyn FileInput) -> DeleteAction {
        let Some(entry) = self.store.get(identity) else {
            debug!("Delete for untracked file {} ignored", identity);
            return DeleteAction::Ignored;
        };

        if !entry.is_succeeded() {
            self.store.remove(identity);
            input.clear();
            debug!("Removed {} locally", identity);
            return DeleteAction::Removed;
        }

        if !self.pending_deletes.insert(identity) {
            debug!("Delete for {} already in flight", identity);
            return DeleteAction::Ignored;
        }

        let id = entry.id().to_string();
        self.store.set_deleting(identity, true);
        info!("Deleting {} (id {})", identity, id);
        DeleteAction::Dispatch(DeleteRequest {
            identity: identity.to_string(),
            id,
        })
    }

    pub fn resolve_delete(
        &mut self,
        identity: &str,
        result: Result<ApiResponse, UploaderError>,
        input: &mut dyn FileInput,
        notifier: &mut dyn Notifier,
    ) {
        self.pending_deletes.release(identity);

        match self.accept(result) {
            Ok(response) => {
                if !self.store.remove(identity) {
                    debug!("{} was already gone when its delete settled", identity);
                }
                input.clear();
                info!("Deleted {}", identity);
                let text = response
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.translator.t("fileDeleted"));
                notifier.success(&text);
            }
            Err(e) => {
                warn!("Failed to delete {}: {}", identity, e);
                self.store.set_deleting(identity, false);
                let text = match &e {
                    UploaderError::Transport(_) => self.translator.t("failToDeleteFileDueToNetwork"),
                    _ => e
                        .server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| self.translator.t("failToDeleteFile")),
                };
                notifier.error(&text);
            }
        }
    }

    /// Routes a settled call to the matching resolver.
    pub fn apply(
        &mut self,
        completion: Completion,
        input: &mut dyn FileInput,
        notifier: &mut dyn Notifier,
    ) {
        match completion {
            Completion::Upload { batch, result } => self.resolve_upload(batch, result, notifier),
            Completion::Delete { identity, result } => {
                self.resolve_delete(&identity, result, input, notifier)
            }
        }
    }

    fn accept(
        &self,
        result: Result<ApiResponse, UploaderError>,
    ) -> Result<ApiResponse, UploaderError> {
        let response = result?;
        if response.status.matches(&self.success_code) {
            Ok(response)
        } else {
            Err(UploaderError::ServerRejection {
                status: response.status.to_string(),
                message: response.server_message().map(str::to_string),
            })
        }
    }

    /// Accepts a batch response only if it carries a result row for every member.
    fn accept_upload(
        &self,
        result: Result<ApiResponse, UploaderError>,
        members: &[String],
    ) -> Result<(Vec<UploadedFile>, Option<String>), UploaderError> {
        let response = self.accept(result)?;
        let message = response.server_message().map(str::to_string);
        let malformed = |detail: String| UploaderError::MalformedResponse {
            detail,
            message: message.clone(),
        };
        let data = match response.data {
            Some(data @ serde_json::Value::Array(_)) => data,
            Some(other) => return Err(malformed(format!("expected an array, got {}", other))),
            None => return Err(malformed("missing data array".to_string())),
        };
        let uploaded: Vec<UploadedFile> =
            serde_json::from_value(data).map_err(|e| malformed(e.to_string()))?;

        let missing: Vec<&str> = members
            .iter()
            .map(String::as_str)
            .filter(|name| !uploaded.iter().any(|u| u.name == *name))
            .collect();
        if !missing.is_empty() {
            return Err(malformed(format!("no result row for {}", missing.join(", "))));
        }
        Ok((uploaded, message))
    }
}
