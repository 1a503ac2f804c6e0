//! Video tab: container/codec selection and per-codec controls

use eframe::egui;

use crate::encode::{
    RateControl, RateSettings, VideoCodec, VideoContainer, H264_PRESETS, H265_PRESETS,
};

use super::QuickConvApp;

pub fn show(app: &mut QuickConvApp, ui: &mut egui::Ui) {
    let mut convert_clicked = false;

    ui.label(
        "Recommendations:\n\
         - High or low quality: AV1 svt;\n\
         - High or low quality but PAINFULLY SLOW: AV1 libaom;\n\
         - Compatibility/fast: MP4 h264.",
    );
    ui.add_space(8.0);

    {
        let video = &mut app.settings.video;

        egui::Grid::new("video_target")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label("Container:");
                egui::ComboBox::from_id_salt("video_container")
                    .selected_text(video.container.to_string())
                    .show_ui(ui, |ui| {
                        for container in VideoContainer::all() {
                            ui.selectable_value(
                                &mut video.container,
                                *container,
                                container.to_string(),
                            );
                        }
                    });
                ui.end_row();

                ui.label("Codec:");
                egui::ComboBox::from_id_salt("video_codec")
                    .selected_text(video.codec.to_string())
                    .show_ui(ui, |ui| {
                        for codec in VideoCodec::all() {
                            ui.selectable_value(&mut video.codec, *codec, codec.to_string());
                        }
                    });
                ui.end_row();
            });

        ui.add_space(8.0);

        match video.codec {
            VideoCodec::X264 => rate_controls(ui, "h264", &mut video.h264, 51, H264_PRESETS),
            VideoCodec::X265 => rate_controls(ui, "h265", &mut video.h265, 51, H265_PRESETS),
            VideoCodec::AomAv1 => {
                ui.add(
                    egui::Slider::new(&mut video.av1_crf, 0..=63)
                        .text("Quality (CRF, lower is better)"),
                );
                ui.add(
                    egui::Slider::new(&mut video.aom_cpu_used, 0..=8)
                        .text("Speed (cpu-used, higher is faster)"),
                );
            }
            VideoCodec::SvtAv1 => {
                ui.add(
                    egui::Slider::new(&mut video.av1_crf, 0..=63)
                        .text("Quality (CRF, lower is better)"),
                );
                ui.add(
                    egui::Slider::new(&mut video.svt_preset, 0..=13)
                        .text("Preset (higher is faster)"),
                );
            }
        }

        ui.add_space(8.0);

        ui.checkbox(&mut video.keep_resolution, "Maintain resolution");
        if !video.keep_resolution {
            ui.horizontal(|ui| {
                ui.label("Scale to:");
                ui.add(egui::DragValue::new(&mut video.width).range(16..=7680));
                ui.label("x");
                ui.add(egui::DragValue::new(&mut video.height).range(16..=4320));
            });
        }

        ui.checkbox(&mut video.keep_framerate, "Maintain frame rate");
        if !video.keep_framerate {
            ui.horizontal(|ui| {
                ui.label("Frame rate:");
                ui.add(
                    egui::DragValue::new(&mut video.fps)
                        .range(1.0..=240.0)
                        .suffix(" fps"),
                );
            });
        }

        ui.add_space(12.0);
    }

    if ui
        .add(egui::Button::new("Convert video").min_size(egui::vec2(130.0, 24.0)))
        .clicked()
    {
        convert_clicked = true;
    }

    if convert_clicked {
        app.start_video_conversion();
    }
}

fn rate_controls(
    ui: &mut egui::Ui,
    id: &str,
    settings: &mut RateSettings,
    crf_max: u32,
    presets: &[&str],
) {
    ui.horizontal(|ui| {
        ui.label("Rate control:");
        egui::ComboBox::from_id_salt(format!("{id}_rate_control"))
            .selected_text(settings.rate_control.to_string())
            .show_ui(ui, |ui| {
                for mode in RateControl::all() {
                    ui.selectable_value(&mut settings.rate_control, *mode, mode.to_string());
                }
            });
    });

    match settings.rate_control {
        RateControl::Crf => {
            ui.add(
                egui::Slider::new(&mut settings.crf, 0..=crf_max)
                    .text("Quality (CRF, lower is better)"),
            );
        }
        RateControl::Cbr => {
            ui.horizontal(|ui| {
                ui.label("Bitrate:");
                ui.add(
                    egui::DragValue::new(&mut settings.bitrate_kbps)
                        .range(100..=100_000)
                        .suffix(" kbit/s"),
                );
            });
        }
    }

    ui.horizontal(|ui| {
        ui.label("Preset:");
        let idx = settings.preset_idx.min(presets.len() - 1);
        egui::ComboBox::from_id_salt(format!("{id}_preset"))
            .selected_text(presets[idx])
            .show_ui(ui, |ui| {
                for (i, preset) in presets.iter().enumerate() {
                    ui.selectable_value(&mut settings.preset_idx, i, *preset);
                }
            });
    });
}
