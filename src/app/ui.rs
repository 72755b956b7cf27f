use super::FileUploaderApp;
use crate::upload::TrackedFile;
use eframe::egui::{self, Color32, RichText};
use rfd::FileDialog;

const ACCENT: Color32 = Color32::from_rgb(24, 144, 255);
const DANGER: Color32 = Color32::from_rgb(245, 34, 45);
const OK_GREEN: Color32 = Color32::from_rgb(82, 196, 26);

enum RowAction {
    Delete(String),
    Open(String),
}

impl FileUploaderApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        self.render_toasts(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(12.0);

            let label = format!("📎 {}", self.t("fileUploader"));
            if ui
                .add(egui::Button::new(RichText::new(label).color(ACCENT)))
                .clicked()
            {
                if let Some(paths) = FileDialog::new().pick_files() {
                    self.on_files_chosen(paths);
                }
            }

            ui.add_space(10.0);

            let entries = self.session.store().entries().to_vec();
            let mut action = None;
            egui::ScrollArea::vertical().show(ui, |ui| {
                for file in &entries {
                    if let Some(a) = self.render_row(ui, file) {
                        action = Some(a);
                    }
                    ui.add_space(4.0);
                }
            });

            match action {
                Some(RowAction::Delete(identity)) => self.on_delete_clicked(&identity),
                Some(RowAction::Open(url)) => self.on_name_clicked(&url),
                None => {}
            }
        });
    }

    fn render_row(&self, ui: &mut egui::Ui, file: &TrackedFile) -> Option<RowAction> {
        let mut action = None;
        ui.horizontal(|ui| {
            if file.is_uploading() {
                ui.add(egui::Spinner::new());
            }

            let name = if file.is_succeeded() {
                RichText::new(&file.identity)
            } else {
                RichText::new(&file.identity).color(DANGER)
            };
            let response = ui.add(egui::Label::new(name).sense(egui::Sense::click()));
            if file.is_succeeded() && !file.url().is_empty() {
                let response = response.on_hover_text(file.url());
                if response.clicked() {
                    action = Some(RowAction::Open(file.url().to_string()));
                }
            }

            if !file.is_uploading() {
                let text = if file.deleting {
                    self.t("deleting")
                } else {
                    self.t("delete")
                };
                if ui
                    .add_enabled(!file.deleting, egui::Button::new(text).small())
                    .clicked()
                {
                    action = Some(RowAction::Delete(file.identity.clone()));
                }
            }
        });
        action
    }

    fn render_toasts(&self, ctx: &egui::Context) {
        if self.toasts.is_empty() {
            return;
        }
        egui::TopBottomPanel::bottom("toasts").show(ctx, |ui| {
            ui.add_space(4.0);
            for toast in self.toasts.items() {
                let (icon, color) = if toast.is_error {
                    ("❌", DANGER)
                } else {
                    ("✅", OK_GREEN)
                };
                ui.horizontal(|ui| {
                    ui.label(icon);
                    ui.colored_label(color, &toast.text);
                });
            }
            ui.add_space(4.0);
        });
    }
}
