use std::collections::HashSet;
use std::path::{Path, PathBuf};

use eframe::egui;
use tracing::warn;

use tidyscan::cleaner;
use tidyscan::disk_info::{self, DiskInfo};
use tidyscan::entry::ScanResult;
use tidyscan::scanner::DEPTH_CHOICES;
use tidyscan::session::ScanSession;
use tidyscan::utils;

use crate::config::Settings;

const NAME_WIDTH: f32 = 300.0;
const SIZE_WIDTH: f32 = 100.0;

/// Confirmation dialog state, filled from the selection when opened.
struct ConfirmDialog {
    file_count: usize,
    total_bytes: u64,
}

pub struct TidyScanApp {
    settings: Settings,
    search_path: String,
    depth: usize,
    session: ScanSession,
    result: Option<ScanResult>,
    selected: HashSet<PathBuf>,
    freed_space: u64,
    confirm_dialog: Option<ConfirmDialog>,
    error_message: Option<String>,
    disk: Option<DiskInfo>,
}

fn depth_label(depth: usize) -> String {
    if depth == 1 {
        "1 level".to_string()
    } else {
        format!("{depth} levels")
    }
}

/// Show `path` in the platform file browser.
fn reveal_in_file_browser(path: &Path) {
    let spawned = if cfg!(target_os = "macos") {
        std::process::Command::new("open").arg("-R").arg(path).spawn()
    } else if cfg!(target_os = "windows") {
        std::process::Command::new("explorer")
            .arg(format!("/select,{}", path.display()))
            .spawn()
    } else {
        let folder = path.parent().unwrap_or(path);
        std::process::Command::new("xdg-open").arg(folder).spawn()
    };
    if let Err(e) = spawned {
        warn!(path = %path.display(), error = %e, "could not open file browser");
    }
}

fn row_context_menu(response: &egui::Response, path: &Path) {
    response.context_menu(|ui| {
        if ui.button("Reveal in file browser").clicked() {
            reveal_in_file_browser(path);
            ui.close_menu();
        }
        if ui.button("Copy path").clicked() {
            ui.ctx().copy_text(path.display().to_string());
            ui.close_menu();
        }
    });
}

impl TidyScanApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let search_path = if settings.root_input.is_empty() {
            dirs::home_dir()
                .map(|h| h.display().to_string())
                .unwrap_or_default()
        } else {
            settings.root_input.clone()
        };
        let depth = settings.max_depth;

        let mut app = Self {
            settings,
            search_path,
            depth,
            session: ScanSession::new(),
            result: None,
            selected: HashSet::new(),
            freed_space: 0,
            confirm_dialog: None,
            error_message: None,
            disk: None,
        };
        app.start_scan();
        app
    }

    fn is_scanning(&self) -> bool {
        self.session.is_scanning()
    }

    fn start_scan(&mut self) {
        self.result = None;
        self.selected.clear();
        let options = self.settings.scan_options_with_depth(self.depth);
        self.session.start(self.search_path.clone(), options);
    }

    fn drain_scan(&mut self) {
        let Some(outcome) = self.session.poll() else {
            return;
        };
        match outcome {
            Ok(result) => {
                self.disk = disk_info::volume_space(result.root());
                self.result = Some(result);
            }
            Err(e) => {
                warn!(error = %e, "scan failed");
                self.error_message = Some(e.user_message().to_string());
            }
        }
    }

    fn open_confirm_dialog(&mut self) {
        let total_bytes = self
            .result
            .as_ref()
            .map(|r| r.known_sizes(&self.selected).values().sum::<u64>())
            .unwrap_or(0);
        self.confirm_dialog = Some(ConfirmDialog {
            file_count: self.selected.len(),
            total_bytes,
        });
    }

    fn delete_selected(&mut self) {
        self.confirm_dialog = None;
        let Some(result) = &self.result else {
            return;
        };

        let sizes = result.known_sizes(&self.selected);
        let outcome = cleaner::delete_all(&self.selected, &sizes);
        let updated = result.without_deleted(&outcome);

        self.freed_space += outcome.bytes_freed;
        self.disk = disk_info::volume_space(updated.root());
        self.result = Some(updated);
        self.selected.clear();

        if let Some(message) = outcome.failure_message() {
            self.error_message = Some(message);
        }
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(
                egui::RichText::new("TidyScan")
                    .strong()
                    .color(egui::Color32::from_rgb(80, 180, 220)),
            );
            if let Some(disk) = &self.disk {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{} free of {} ({:.0}% used)",
                            utils::format_size(disk.available),
                            utils::format_size(disk.total),
                            disk.usage_percent() * 100.0
                        ))
                        .color(egui::Color32::GRAY),
                    );
                });
            }
        });
    }

    fn render_search_bar(&mut self, ui: &mut egui::Ui) {
        let is_busy = self.is_scanning();

        ui.horizontal(|ui| {
            ui.label("\u{1F50D}");
            let field = ui.add(
                egui::TextEdit::singleline(&mut self.search_path)
                    .hint_text("Search path (default: home directory)")
                    .desired_width((ui.available_width() - 220.0).max(120.0)),
            );
            let submitted =
                field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            egui::ComboBox::from_id_salt("scan_depth")
                .width(100.0)
                .selected_text(depth_label(self.depth))
                .show_ui(ui, |ui| {
                    for &choice in DEPTH_CHOICES {
                        ui.selectable_value(&mut self.depth, choice, depth_label(choice));
                    }
                })
                .response
                .on_hover_text("How many levels of directories to scan");

            let clicked = ui
                .add_enabled(!is_busy, egui::Button::new("Search"))
                .clicked();
            if (clicked || submitted) && !is_busy {
                self.start_scan();
            }
        });
    }

    fn render_file_list(&mut self, ui: &mut egui::Ui) {
        if self.is_scanning() {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.spinner();
                ui.label("Scanning directory...");
            });
            return;
        }

        ui.horizontal(|ui| {
            ui.add_space(24.0);
            ui.add_sized(
                [NAME_WIDTH, 18.0],
                egui::Label::new(egui::RichText::new("Name").strong()),
            );
            ui.add_sized(
                [SIZE_WIDTH, 18.0],
                egui::Label::new(egui::RichText::new("Size").strong()),
            );
            ui.label(egui::RichText::new("Path").strong());
        });
        ui.separator();

        let Some(result) = &self.result else {
            return;
        };
        if result.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.label(
                    egui::RichText::new("No files found in this directory.")
                        .size(18.0)
                        .color(egui::Color32::GRAY),
                );
            });
            return;
        }

        let selected = &mut self.selected;
        let row_height = ui.spacing().interact_size.y;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show_rows(ui, row_height, result.len(), |ui, rows| {
                for entry in &result.entries()[rows] {
                    let path = entry.path();
                    ui.horizontal(|ui| {
                        let mut checked = selected.contains(path);
                        if ui.checkbox(&mut checked, "").changed() {
                            if checked {
                                selected.insert(path.to_path_buf());
                            } else {
                                selected.remove(path);
                            }
                        }

                        let name = ui.add_sized(
                            [NAME_WIDTH, row_height],
                            egui::Label::new(entry.name().into_owned())
                                .truncate()
                                .sense(egui::Sense::click()),
                        );
                        row_context_menu(&name, path);

                        ui.add_sized(
                            [SIZE_WIDTH, row_height],
                            egui::Label::new(
                                egui::RichText::new(utils::format_size(entry.size()))
                                    .color(egui::Color32::from_rgb(220, 180, 50)),
                            ),
                        );

                        let full_path = ui.add(
                            egui::Label::new(
                                egui::RichText::new(path.display().to_string())
                                    .color(egui::Color32::from_rgb(160, 160, 170)),
                            )
                            .truncate()
                            .sense(egui::Sense::click()),
                        );
                        row_context_menu(&full_path, path);
                    });
                }
            });
    }

    fn render_footer(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(format!("Selected: {} files", self.selected.len()));
                if self.freed_space > 0 {
                    ui.label(
                        egui::RichText::new(format!(
                            "Freed space: {}",
                            utils::format_size(self.freed_space)
                        ))
                        .strong()
                        .color(egui::Color32::from_rgb(80, 200, 80)),
                    );
                }
                if let Some(result) = &self.result {
                    if result.is_truncated() {
                        ui.label(
                            egui::RichText::new(format!(
                                "Showing the largest {} of {} files",
                                result.len(),
                                result.total_found()
                            ))
                            .small()
                            .color(egui::Color32::GRAY),
                        );
                    }
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let can_delete = !self.selected.is_empty() && !self.is_scanning();
                if ui
                    .add_enabled(
                        can_delete,
                        egui::Button::new(egui::RichText::new("Delete Selected").color(
                            if can_delete {
                                egui::Color32::from_rgb(220, 60, 60)
                            } else {
                                egui::Color32::GRAY
                            },
                        )),
                    )
                    .clicked()
                {
                    self.open_confirm_dialog();
                }

                let has_rows = self.result.as_ref().is_some_and(|r| !r.is_empty());
                if ui
                    .add_enabled(!self.selected.is_empty(), egui::Button::new("Select None"))
                    .clicked()
                {
                    self.selected.clear();
                }
                if ui
                    .add_enabled(has_rows, egui::Button::new("Select All"))
                    .clicked()
                {
                    if let Some(result) = &self.result {
                        self.selected = result
                            .entries()
                            .iter()
                            .map(|e| e.path().to_path_buf())
                            .collect();
                    }
                }
            });
        });
        ui.add_space(4.0);
    }

    fn render_confirm_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &self.confirm_dialog else {
            return;
        };
        let mut should_delete = false;
        let mut should_cancel = false;

        // Dark overlay behind the dialog to block background interaction
        egui::Area::new(egui::Id::new("confirm_overlay"))
            .fixed_pos(egui::Pos2::ZERO)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let screen = ui.ctx().screen_rect();
                ui.allocate_rect(screen, egui::Sense::click());
                ui.painter()
                    .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(160));
            });

        egui::Window::new("Confirm Deletion")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([340.0, 0.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Permanently delete {} files ({})?",
                    dialog.file_count,
                    utils::format_size(dialog.total_bytes)
                ));
                ui.label(
                    egui::RichText::new("This action cannot be undone.")
                        .small()
                        .color(egui::Color32::from_rgb(200, 100, 100)),
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        should_cancel = true;
                    }
                    if ui
                        .button(
                            egui::RichText::new("Delete Files")
                                .strong()
                                .color(egui::Color32::from_rgb(220, 60, 60)),
                        )
                        .clicked()
                    {
                        should_delete = true;
                    }
                });
            });

        if should_cancel {
            self.confirm_dialog = None;
        }
        if should_delete {
            self.delete_selected();
        }
    }

    fn render_error_dialog(&mut self, ctx: &egui::Context) {
        let Some(message) = &self.error_message else {
            return;
        };
        let mut dismissed = false;

        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([360.0, 0.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.label(message.as_str());
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.error_message = None;
        }
    }
}

impl eframe::App for TidyScanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_scan();

        if self.is_scanning() {
            ctx.request_repaint();
        }

        self.render_confirm_dialog(ctx);
        self.render_error_dialog(ctx);

        egui::TopBottomPanel::top("search").show(ctx, |ui| {
            ui.add_space(6.0);
            self.render_header(ui);
            self.render_search_bar(ui);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            self.render_footer(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_file_list(ui);
        });
    }
}
