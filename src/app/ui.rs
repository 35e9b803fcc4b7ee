use super::view::{selected_file_details, session_views, Feedback, FileRow, OutcomeView};
use super::FileUploader;
use eframe::egui::{self, Color32, RichText};
use tracing::warn;

const ACCENT: Color32 = Color32::from_rgb(13, 110, 253);
const SUCCESS: Color32 = Color32::from_rgb(25, 135, 84);
const WARNING: Color32 = Color32::from_rgb(255, 160, 0);
const DANGER: Color32 = Color32::from_rgb(220, 53, 69);

impl FileUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.heading(RichText::new("☁ File Upload").color(ACCENT));
                });
                ui.add_space(20.0);

                self.render_selection_input(ui);
                ui.add_space(15.0);

                self.render_selected_files(ui);
                self.render_actions(ui);
                ui.add_space(15.0);

                self.render_feedback(ui);
                ui.add_space(20.0);

                self.render_sessions(ui);
                ui.add_space(20.0);
            });
        });
    }

    fn render_selection_input(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Select Files").strong());
        ui.add_space(5.0);
        ui.group(|ui| {
            ui.horizontal(|ui| {
                let button = egui::Button::new("📁 Choose Files");
                if ui.add_enabled(!self.state.is_uploading, button).clicked() {
                    self.pick_files();
                }
                ui.label(
                    RichText::new("or drop files onto this window")
                        .color(ui.visuals().text_color().gamma_multiply(0.7)),
                );
            });
        });
        ui.label(
            RichText::new("You can select multiple files to upload at once.")
                .small()
                .color(ui.visuals().text_color().gamma_multiply(0.7)),
        );
    }

    fn render_selected_files(&mut self, ui: &mut egui::Ui) {
        if self.state.selected_files.is_empty() {
            return;
        }

        ui.label(
            RichText::new(format!(
                "Selected Files ({})",
                self.state.selected_files.len()
            ))
            .strong(),
        );
        ui.add_space(5.0);

        let mut remove_index = None;
        let can_edit = !self.state.is_uploading;

        egui::ScrollArea::vertical()
            .id_source("selected_files")
            .max_height(220.0)
            .show(ui, |ui| {
                for (index, file) in self.state.selected_files.iter().enumerate() {
                    ui.group(|ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.label(RichText::new(&file.name).strong());
                                ui.label(RichText::new(selected_file_details(file)).small());
                            });
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                let button = egui::Button::new(
                                    RichText::new("Remove").color(DANGER),
                                );
                                if ui.add_enabled(can_edit, button).clicked() {
                                    remove_index = Some(index);
                                }
                            });
                        });
                    });
                }
            });

        if let Some(index) = remove_index {
            self.state.remove_at(index);
        }
        ui.add_space(15.0);
    }

    fn render_actions(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let label = if self.state.is_uploading {
                "Uploading..."
            } else {
                "📤 Upload Files"
            };
            let upload = egui::Button::new(label).min_size(egui::vec2(160.0, 36.0));
            if ui.add_enabled(self.state.can_submit(), upload).clicked() {
                self.start_upload(ui.ctx());
            }
            if self.state.is_uploading {
                ui.spinner();
            }

            let clear = egui::Button::new("🗑 Clear All").min_size(egui::vec2(120.0, 36.0));
            if ui.add_enabled(!self.state.is_uploading, clear).clicked() {
                self.state.clear();
            }
        });
    }

    fn render_feedback(&mut self, ui: &mut egui::Ui) {
        match Feedback::from_state(&self.state) {
            Feedback::None => {}
            Feedback::Error(message) => {
                egui::Frame::group(ui.style())
                    .stroke(egui::Stroke::new(1.0, DANGER))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.colored_label(DANGER, format!("⚠ {}", message));
                    });
            }
            Feedback::Outcome(view) => self.render_outcome(ui, view),
        }
    }

    fn render_outcome(&mut self, ui: &mut egui::Ui, view: OutcomeView) {
        let mut delete_id = None;
        let can_delete = self.state.can_delete();

        egui::Frame::group(ui.style())
            .stroke(egui::Stroke::new(1.0, SUCCESS))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new("✅ Upload Successful!").strong().color(SUCCESS));
                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Session ID:").strong());
                    ui.label(view.session_id.as_str());
                });
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Files Uploaded:").strong());
                    ui.label(view.summary.as_str());
                });
                if let Some(warning) = &view.failed_warning {
                    ui.colored_label(WARNING, warning.as_str());
                }

                if !view.rows.is_empty() {
                    ui.add_space(10.0);
                    ui.label(RichText::new("Uploaded Files:").strong());
                }
                for row in &view.rows {
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&row.name).strong());
                            ui.label(RichText::new(&row.details).small());
                            ui.horizontal(|ui| {
                                ui.label(RichText::new("Status:").small());
                                ui.label(RichText::new(&row.status).small().color(SUCCESS));
                            });
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let deleting =
                                self.state.deleting_file.as_deref() == Some(row.id.as_str());
                            if deleting {
                                ui.spinner();
                            } else if ui
                                .add_enabled(can_delete, egui::Button::new("Delete"))
                                .clicked()
                            {
                                delete_id = Some(row.id.clone());
                            }
                            if ui.button("View File").clicked() {
                                if let Err(e) = open::that(&row.url) {
                                    warn!("Failed to open {}: {}", row.url, e);
                                }
                            }
                        });
                    });
                }

                if let Some(error) = &self.state.delete_error {
                    ui.add_space(5.0);
                    ui.colored_label(DANGER, error.as_str());
                }
            });

        if let Some(file_id) = delete_id {
            self.start_delete(ui.ctx(), file_id);
        }
    }

    fn render_sessions(&mut self, ui: &mut egui::Ui) {
        let mut refresh_all = false;
        let mut refresh_one = None;

        egui::CollapsingHeader::new(RichText::new("Recent uploads").strong())
            .id_source("recent_uploads")
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let button = egui::Button::new("🔄 Refresh");
                    if ui.add_enabled(!self.state.sessions_loading, button).clicked() {
                        refresh_all = true;
                    }
                    if self.state.sessions_loading {
                        ui.spinner();
                    }
                });

                if let Some(error) = &self.state.sessions_error {
                    ui.colored_label(DANGER, error.as_str());
                }

                let views = session_views(&self.state);
                if views.is_empty() && self.state.sessions_error.is_none() {
                    ui.label(
                        RichText::new("No uploads loaded yet.")
                            .small()
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                }

                for view in views {
                    egui::CollapsingHeader::new(view.title.as_str())
                        .id_source(view.id.as_str())
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new("Session ID:").strong());
                                ui.label(view.id.as_str());
                            });
                            ui.label(format!("{} • {}", view.summary, view.total_size));
                            let button = egui::Button::new("Reload");
                            if ui.add_enabled(!self.state.sessions_loading, button).clicked() {
                                refresh_one = Some(view.id.clone());
                            }
                            for row in &view.rows {
                                ui.separator();
                                render_session_row(ui, row);
                            }
                        });
                }
            });

        if refresh_all {
            self.refresh_sessions(ui.ctx());
        } else if let Some(session_id) = refresh_one {
            self.refresh_session(ui.ctx(), session_id);
        }
    }
}

fn render_session_row(ui: &mut egui::Ui, row: &FileRow) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(&row.name).strong());
            ui.label(RichText::new(&row.details).small());
            let color = if row.status == "failed" { DANGER } else { SUCCESS };
            ui.label(RichText::new(&row.status).small().color(color));
        });
        if !row.url.is_empty() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("View File").clicked() {
                    if let Err(e) = open::that(&row.url) {
                        warn!("Failed to open {}: {}", row.url, e);
                    }
                }
            });
        }
    });
}
