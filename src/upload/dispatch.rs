use super::client::UploaderClient;
use super::session::{Completion, Request};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing::debug;

/// Runs requests on a tokio runtime and posts each result back as a [`Completion`].
///
/// Every request is its own task, so batches and deletes overlap freely. The
/// session is never touched here; the owner drains the channel on its own thread.
pub struct Dispatcher {
    runtime: Runtime,
    client: Arc<UploaderClient>,
    completions: Sender<Completion>,
}

impl Dispatcher {
    pub fn new(client: UploaderClient, completions: Sender<Completion>) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("uploader-io")
            .enable_all()
            .build()?;
        Ok(Self {
            runtime,
            client: Arc::new(client),
            completions,
        })
    }

    /// Dropping the returned handle detaches the task; it still reports back.
    pub fn dispatch(&self, request: Request) -> JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let completions = self.completions.clone();

        self.runtime.spawn(async move {
            let completion = match request {
                Request::Upload(upload) => Completion::Upload {
                    batch: upload.batch,
                    result: client.upload_files(&upload).await,
                },
                Request::Delete(delete) => Completion::Delete {
                    result: client.delete_file(&delete.id).await,
                    identity: delete.identity,
                },
            };
            // The widget may be gone by now; its store must not be revived.
            if completions.send(completion).is_err() {
                debug!("Uploader closed, dropping completion");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{UploadType, UploaderConfig};
    use crate::error::UploaderError;
    use crate::i18n::{Locale, Translator};
    use crate::upload::{
        BatchId, DeleteRequest, PickedFile, UploadContext, UploadRequest, UploadSession,
    };
    use std::sync::mpsc;
    use std::time::Duration;

    fn dispatcher(tx: Sender<Completion>) -> Dispatcher {
        let client = UploaderClient::new(&UploaderConfig {
            base_url: "http://127.0.0.1:1".into(),
            timeout_ms: 2_000,
            ..Default::default()
        })
        .unwrap();
        Dispatcher::new(client, tx).unwrap()
    }

    #[test]
    fn unreadable_file_fails_the_batch() {
        let (tx, rx) = mpsc::channel();
        let d = dispatcher(tx);
        d.dispatch(Request::Upload(UploadRequest {
            batch: BatchId(4),
            owner_id: "o".into(),
            upload_type: UploadType::Bid,
            files: vec![PickedFile {
                name: "missing.pdf".into(),
                path: "/definitely/not/here/missing.pdf".into(),
            }],
        }));

        match rx.recv_timeout(Duration::from_secs(10)).unwrap() {
            Completion::Upload { batch, result } => {
                assert_eq!(batch, BatchId(4));
                assert!(matches!(result, Err(UploaderError::ReadFile { .. })));
            }
            other => panic!("unexpected completion: {:?}", other),
        }
    }

    #[test]
    fn unreachable_backend_is_a_transport_failure() {
        let (tx, rx) = mpsc::channel();
        let d = dispatcher(tx);
        d.dispatch(Request::Delete(DeleteRequest {
            identity: "a.pdf".into(),
            id: "1".into(),
        }));

        match rx.recv_timeout(Duration::from_secs(10)).unwrap() {
            Completion::Delete { identity, result } => {
                assert_eq!(identity, "a.pdf");
                assert!(matches!(result, Err(UploaderError::Transport(_))));
            }
            other => panic!("unexpected completion: {:?}", other),
        }
    }

    #[test]
    fn completions_after_the_receiver_is_dropped_are_discarded() {
        let (tx, rx) = mpsc::channel();
        let d = dispatcher(tx);
        let mut session = UploadSession::new("200", Translator::new(Locale::En));
        let request = session
            .select(
                &[PickedFile {
                    name: "gone.pdf".into(),
                    path: "/definitely/not/here/gone.pdf".into(),
                }],
                &UploadContext {
                    owner_id: "o".into(),
                    upload_type: UploadType::Bid,
                },
            )
            .unwrap();
        drop(rx);

        let upload = d.dispatch(Request::Upload(request));
        let delete = d.dispatch(Request::Delete(DeleteRequest {
            identity: "a.pdf".into(),
            id: "1".into(),
        }));

        assert!(d.runtime.block_on(upload).is_ok());
        assert!(d.runtime.block_on(delete).is_ok());
        assert!(session.store().entries()[0].is_uploading());
    }
}
