//! The extractor window.

use std::time::Instant;

use eframe::egui;

use crate::clipboard::copy_to_clipboard;
use crate::dialogs::{pick_pdf, pick_save_destination};
use crate::state::{NoticeKind, Phase, Session};
use crate::thumbnails::{build_strip, Thumbnail};

pub struct HarvestApp {
    session: Session,
    thumbnails: Vec<Thumbnail>,
    shown_title: &'static str,
}

impl HarvestApp {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            thumbnails: Vec::new(),
            shown_title: "",
        }
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        let title = self.session.title();
        if title != self.shown_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.to_string()));
            self.shown_title = title;
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.label("PDF file:");
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.session.path_input)
                    .desired_width(ui.available_width() - 80.0),
            );
            if ui.button("Browse").clicked() {
                if let Some(path) = pick_pdf() {
                    self.session.path_input = path.display().to_string();
                }
            }
        });

        ui.add_space(4.0);
        if ui.button("Start Processing").clicked() {
            self.session.request_start();
        }
        if self.session.is_processing() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Processing...");
            });
        }
    }

    fn preview(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("JSON");
            let copy = ui.add_enabled(
                !self.session.preview().is_empty(),
                egui::Button::new("Copy JSON"),
            );
            if copy.clicked() {
                match copy_to_clipboard(self.session.preview()) {
                    Ok(()) => self.session.mark_copied(Instant::now()),
                    Err(e) => {
                        log::error!("Clipboard unavailable: {}", e);
                        self.session.copy_failed(e);
                    }
                }
            }
            if self
                .session
                .copy_confirmation_remaining(Instant::now())
                .is_some()
            {
                ui.colored_label(egui::Color32::DARK_GREEN, "Copied to clipboard");
            }
        });

        egui::ScrollArea::vertical()
            .id_source("json_preview")
            .max_height((ui.available_height() - 170.0).max(120.0))
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.session.preview())
                        .code_editor()
                        .desired_width(f32::INFINITY),
                );
            });
    }

    fn strip(&mut self, ui: &mut egui::Ui) {
        ui.heading("Images");
        let mut save_request = None;

        egui::ScrollArea::horizontal()
            .id_source("thumbnail_strip")
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    for (i, thumbnail) in self.thumbnails.iter().enumerate() {
                        ui.vertical(|ui| {
                            match &thumbnail.texture {
                                Some(texture) => {
                                    ui.image((texture.id(), thumbnail.size()));
                                }
                                None => {
                                    let (rect, _) = ui.allocate_exact_size(
                                        thumbnail.size(),
                                        egui::Sense::hover(),
                                    );
                                    ui.painter().rect_filled(rect, 4.0, egui::Color32::DARK_GRAY);
                                    ui.painter().text(
                                        rect.center(),
                                        egui::Align2::CENTER_CENTER,
                                        "No preview",
                                        egui::FontId::proportional(12.0),
                                        egui::Color32::LIGHT_GRAY,
                                    );
                                }
                            }
                            if ui.button("Save").clicked() {
                                save_request = Some(i);
                            }
                        });
                    }
                    if self.thumbnails.is_empty() && self.session.phase() == Phase::Done {
                        ui.label("(no images)");
                    }
                });
            });

        if let Some(i) = save_request {
            let image = &self.thumbnails[i].image;
            let destination = pick_save_destination(&image.file_name());
            self.session.save_image(image, destination);
        }
    }

    fn notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.session.notice() else {
            return;
        };
        let color = match notice.kind {
            NoticeKind::Info => ctx.style().visuals.text_color(),
            NoticeKind::Error => ctx.style().visuals.error_fg_color,
        };

        let mut dismissed = false;
        egui::Window::new(notice.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.colored_label(color, notice.message.as_str());
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.session.acknowledge();
        }
    }
}

impl eframe::App for HarvestApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.session.run_pending() {
            self.thumbnails = match self.session.manifest() {
                Some(manifest) => build_strip(ctx, manifest),
                None => Vec::new(),
            };
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let enabled = self.session.is_interactive();
            ui.add_enabled_ui(enabled, |ui| {
                self.controls(ui);
                ui.separator();
                self.preview(ui);
                ui.separator();
                self.strip(ui);
            });
        });

        self.notice(ctx);
        self.sync_title(ctx);

        if self.session.is_processing() {
            // The processing frame is on screen; run on the next one.
            self.session.mark_painted();
            ctx.request_repaint();
        }
        if let Some(remaining) = self.session.copy_confirmation_remaining(Instant::now()) {
            ctx.request_repaint_after(remaining);
        }
    }
}
