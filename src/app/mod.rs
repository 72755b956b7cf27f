mod state;
mod ui;

use crate::config::UploaderConfig;
use crate::i18n::Translator;
use crate::upload::{
    Completion, DeleteAction, Dispatcher, FileInput, PickedFile, Request, UploadContext,
    UploadSession, UploaderClient,
};
use eframe::{egui, App};
use state::{SelectedFiles, Toasts};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct FileUploaderApp {
    session: UploadSession,
    context: UploadContext,
    dispatcher: Dispatcher,
    completions: Receiver<Completion>,
    input: SelectedFiles,
    toasts: Toasts,
}

impl FileUploaderApp {
    pub fn new(config: &UploaderConfig, translator: Translator) -> anyhow::Result<Self> {
        info!(
            "Initializing uploader for owner '{}' ({})",
            config.owner_id, config.upload_type
        );
        let (sender, completions) = mpsc::channel();
        let dispatcher = Dispatcher::new(UploaderClient::new(config)?, sender)?;

        Ok(Self {
            session: UploadSession::new(config.success_code.clone(), translator),
            context: UploadContext {
                owner_id: config.owner_id.clone(),
                upload_type: config.upload_type,
            },
            dispatcher,
            completions,
            input: SelectedFiles::default(),
            toasts: Toasts::default(),
        })
    }

    fn t(&self, key: &str) -> String {
        self.session.translator().t(key)
    }

    pub fn on_files_chosen(&mut self, paths: Vec<PathBuf>) {
        let files: Vec<PickedFile> = paths
            .into_iter()
            .filter_map(|p| {
                let picked = PickedFile::from_path(&p);
                if picked.is_none() {
                    warn!("Ignoring selected path without a file name: {}", p.display());
                }
                picked
            })
            .collect();
        self.input.set(files);

        if let Some(request) = self.session.select(self.input.files(), &self.context) {
            self.dispatcher.dispatch(Request::Upload(request));
        }
    }

    pub fn on_delete_clicked(&mut self, identity: &str) {
        match self.session.request_delete(identity, &mut self.input) {
            DeleteAction::Dispatch(request) => {
                self.dispatcher.dispatch(Request::Delete(request));
            }
            DeleteAction::Removed | DeleteAction::Ignored => {}
        }
    }

    pub fn on_name_clicked(&self, url: &str) {
        if url.is_empty() {
            return;
        }
        if let Err(e) = open::that(url) {
            warn!("Failed to open {}: {}", url, e);
        }
    }

    /// Applies every completion that arrived since the last frame.
    pub fn update_state(&mut self, ctx: &egui::Context) {
        let mut applied = 0;
        while let Ok(completion) = self.completions.try_recv() {
            self.session.apply(completion, &mut self.input, &mut self.toasts);
            applied += 1;
        }
        if applied > 0 {
            debug!("Applied {} completion(s)", applied);
            ctx.request_repaint();
        }

        self.toasts.prune();

        let busy = self
            .session
            .store()
            .entries()
            .iter()
            .any(|f| f.is_uploading() || f.deleting);
        if busy || !self.toasts.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl App for FileUploaderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
