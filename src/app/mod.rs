//! Main application state and frame loop

mod audio_tab;
mod video_tab;

use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::time::Duration;

use eframe::egui;
use log::{info, warn};

use crate::encode::{self, AudioFormat};
use crate::job::{ConversionReport, JobKind};
use crate::probe;
use crate::runner::{self, ConversionRequest};
use crate::settings::AppSettings;
use crate::utils;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Audio,
    Video,
}

pub struct QuickConvApp {
    settings: AppSettings,
    tab: Tab,
    reports: Vec<ConversionReport>,
}

impl QuickConvApp {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            settings,
            tab: Tab::Audio,
            reports: Vec::new(),
        }
    }

    fn pick_input_file() -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_directory(utils::documents_dir())
            .pick_file()
    }

    /// File picker, probe, dispatch, report. A probe failure skips the
    /// dispatch and lands the report directly in its failed state.
    fn launch(
        &mut self,
        kind: JobKind,
        encode_args: Vec<String>,
        suffix: &str,
        output_label: String,
    ) {
        let Some(input) = Self::pick_input_file() else {
            return;
        };
        let output = utils::output_path_for(&input, suffix);
        let container = probe::container_of(&input);

        match probe::probe(&input) {
            Ok(media) => {
                let input_label = match kind {
                    JobKind::Audio => format!(
                        "{}-{}",
                        container,
                        media.audio_codec.as_deref().unwrap_or("unknown")
                    ),
                    JobKind::Video => format!(
                        "{}-{}-{}",
                        container,
                        media.video_codec.as_deref().unwrap_or("unknown"),
                        media.audio_codec.as_deref().unwrap_or("unknown")
                    ),
                };
                let (tx, rx) = channel();
                runner::spawn_conversion(
                    ConversionRequest {
                        input: input.clone(),
                        output: output.clone(),
                        encode_args,
                        duration_secs: media.duration_secs,
                    },
                    tx,
                );
                self.reports.push(ConversionReport::new(
                    kind,
                    input_label,
                    output_label,
                    input,
                    output,
                    rx,
                ));
            }
            Err(e) => {
                warn!("probe failed for {}: {e:#}", input.display());
                self.reports.push(ConversionReport::failed(
                    kind,
                    format!("{container}-unknown"),
                    output_label,
                    input,
                    output,
                    format!("{e:#}"),
                ));
            }
        }
    }

    fn start_audio_conversion(&mut self, format: AudioFormat) {
        info!("starting audio conversion to {format:?}");
        let args = encode::audio_args(format, &self.settings.audio);
        let label = format!("{}-{}", format.container_label(), format.codec_label());
        self.launch(JobKind::Audio, args, format.output_suffix(), label);
    }

    fn start_video_conversion(&mut self) {
        info!("starting video conversion to {}", self.settings.video.output_label());
        let args = encode::video_args(&self.settings.video);
        let suffix = self.settings.video.output_suffix();
        let label = self.settings.video.output_label();
        self.launch(JobKind::Video, args, &suffix, label);
    }

    fn reports_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Conversion reports");
        ui.separator();

        if self.reports.is_empty() {
            ui.weak("No conversion reports. Start a conversion and its progress will show up here.");
            return;
        }

        let mut closed: Vec<u32> = Vec::new();
        egui::ScrollArea::vertical()
            .id_salt("reports_scroll")
            .show(ui, |ui| {
                // newest first
                for report in self.reports.iter_mut().rev() {
                    if report.ui(ui) {
                        closed.push(report.id);
                    }
                    ui.add_space(6.0);
                }
            });
        if !closed.is_empty() {
            self.reports.retain(|r| !closed.contains(&r.id));
        }
    }
}

impl eframe::App for QuickConvApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.settings.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        let mut any_running = false;
        for report in &mut self.reports {
            report.poll();
            any_running |= report.is_running();
        }
        // keep progress bars moving without waiting for input events
        if any_running {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::SidePanel::right("reports_panel")
            .resizable(true)
            .default_width(ctx.screen_rect().width() / 3.0)
            .show(ctx, |ui| self.reports_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Audio, "Audio");
                ui.selectable_value(&mut self.tab, Tab::Video, "Video");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.checkbox(&mut self.settings.dark_mode, "Dark mode");
                });
            });
            ui.separator();
            egui::ScrollArea::vertical()
                .id_salt("form_scroll")
                .show(ui, |ui| match self.tab {
                    Tab::Audio => audio_tab::show(self, ui),
                    Tab::Video => video_tab::show(self, ui),
                });
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(json) = serde_json::to_string(&self.settings) {
            storage.set_string(eframe::APP_KEY, json);
        }
    }
}
