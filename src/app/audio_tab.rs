//! Audio tab: format sections, quality combos, convert buttons

use eframe::egui;

use crate::encode::{
    AudioFormat, AAC_CBR_BITRATES, AAC_VBR_OPTIONS, MP3_CBR_BITRATES, MP3_VBR_OPTIONS,
    OPUS_BITRATE_MAX, OPUS_BITRATE_MIN,
};

use super::QuickConvApp;

const BUTTON_SIZE: egui::Vec2 = egui::Vec2::new(150.0, 24.0);

pub fn show(app: &mut QuickConvApp, ui: &mut egui::Ui) {
    let mut clicked: Option<AudioFormat> = None;

    ui.label(
        "Recommendations:\n\
         - Editing: any uncompressed;\n\
         - Listening: OGG (Opus);\n\
         - Compatibility: MP3.",
    );
    ui.add_space(8.0);

    egui::CollapsingHeader::new("Uncompressed")
        .default_open(true)
        .show(ui, |ui| {
            ui.collapsing("Info", |ui| {
                ui.label(
                    "Bit-exact 16-bit PCM audio. Large files, zero quality loss, plays \
                     everywhere. PCM/RAW are headerless streams for samplers and embedded use.",
                );
                ui.horizontal(|ui| {
                    ui.hyperlink_to("WAV", "https://en.wikipedia.org/wiki/WAV");
                    ui.hyperlink_to("AIFF", "https://en.wikipedia.org/wiki/Audio_Interchange_File_Format");
                    ui.hyperlink_to("PCM", "https://en.wikipedia.org/wiki/Pulse-code_modulation");
                    ui.hyperlink_to("RAW", "https://en.wikipedia.org/wiki/Raw_audio_format");
                });
            });
            ui.horizontal(|ui| {
                for (label, format) in [
                    ("Convert to WAV", AudioFormat::Wav),
                    ("Convert to AIFF", AudioFormat::Aiff),
                    ("Convert to PCM", AudioFormat::Pcm),
                    ("Convert to RAW", AudioFormat::Raw),
                ] {
                    if ui.add(egui::Button::new(label).min_size(BUTTON_SIZE)).clicked() {
                        clicked = Some(format);
                    }
                }
            });
        });

    ui.add_space(4.0);

    egui::CollapsingHeader::new("Lossless compression")
        .default_open(true)
        .show(ui, |ui| {
            ui.collapsing("Info", |ui| {
                ui.label(
                    "Roughly half the size of WAV with identical audio. FLAC is the open \
                     standard; ALAC is the Apple-ecosystem equivalent.",
                );
                ui.horizontal(|ui| {
                    ui.hyperlink_to("FLAC", "https://en.wikipedia.org/wiki/FLAC");
                    ui.hyperlink_to("ALAC", "https://en.wikipedia.org/wiki/Apple_Lossless_Audio_Codec");
                });
            });
            ui.horizontal(|ui| {
                for (label, format) in [
                    ("Convert to FLAC", AudioFormat::Flac),
                    ("Convert to ALAC", AudioFormat::Alac),
                ] {
                    if ui.add(egui::Button::new(label).min_size(BUTTON_SIZE)).clicked() {
                        clicked = Some(format);
                    }
                }
            });
        });

    ui.add_space(4.0);

    egui::CollapsingHeader::new("Lossy compression")
        .default_open(true)
        .show(ui, |ui| {
            ui.collapsing("Info", |ui| {
                ui.label(
                    "Small files at a quality most ears can't tell apart from the source. \
                     MP3 for maximum compatibility, AAC for better quality at the same \
                     bitrate, Opus for the best codec where players support it.",
                );
                ui.horizontal(|ui| {
                    ui.hyperlink_to("MP3", "https://en.wikipedia.org/wiki/MP3");
                    ui.hyperlink_to("M4A (AAC)", "https://en.wikipedia.org/wiki/MP4_file_format");
                    ui.hyperlink_to("AAC", "https://en.wikipedia.org/wiki/Advanced_Audio_Coding");
                    ui.hyperlink_to("OGG Opus", "https://en.wikipedia.org/wiki/Opus_(audio_format)");
                });
            });

            let audio = &mut app.settings.audio;

            // MP3
            ui.horizontal(|ui| {
                if ui.add(egui::Button::new("Convert to MP3").min_size(BUTTON_SIZE)).clicked() {
                    clicked = Some(AudioFormat::Mp3);
                }
                ui.checkbox(&mut audio.mp3_vbr, "VBR");
                if audio.mp3_vbr {
                    egui::ComboBox::from_id_salt("mp3_vbr_quality")
                        .selected_text(MP3_VBR_OPTIONS[audio.mp3_vbr_idx.min(MP3_VBR_OPTIONS.len() - 1)])
                        .show_ui(ui, |ui| {
                            for (i, label) in MP3_VBR_OPTIONS.iter().enumerate() {
                                ui.selectable_value(&mut audio.mp3_vbr_idx, i, *label);
                            }
                        });
                } else {
                    let current = MP3_CBR_BITRATES[audio.mp3_cbr_idx.min(MP3_CBR_BITRATES.len() - 1)];
                    egui::ComboBox::from_id_salt("mp3_cbr_bitrate")
                        .selected_text(format!("{current} kbit/s"))
                        .show_ui(ui, |ui| {
                            for (i, rate) in MP3_CBR_BITRATES.iter().enumerate() {
                                ui.selectable_value(
                                    &mut audio.mp3_cbr_idx,
                                    i,
                                    format!("{rate} kbit/s"),
                                );
                            }
                        });
                }
            });

            // AAC, in an m4a container or as a raw ADTS stream
            ui.horizontal(|ui| {
                if ui.add(egui::Button::new("Convert to M4A (AAC)").min_size(BUTTON_SIZE)).clicked() {
                    clicked = Some(AudioFormat::M4aAac);
                }
                if ui.add(egui::Button::new("Convert to AAC").min_size(BUTTON_SIZE)).clicked() {
                    clicked = Some(AudioFormat::Aac);
                }
                ui.checkbox(&mut audio.aac_vbr, "VBR");
                if audio.aac_vbr {
                    let idx = audio.aac_vbr_idx.min(AAC_VBR_OPTIONS.len() - 1);
                    egui::ComboBox::from_id_salt("aac_vbr_quality")
                        .selected_text(AAC_VBR_OPTIONS[idx].0)
                        .show_ui(ui, |ui| {
                            for (i, (label, _)) in AAC_VBR_OPTIONS.iter().enumerate() {
                                ui.selectable_value(&mut audio.aac_vbr_idx, i, *label);
                            }
                        });
                } else {
                    let current = AAC_CBR_BITRATES[audio.aac_cbr_idx.min(AAC_CBR_BITRATES.len() - 1)];
                    egui::ComboBox::from_id_salt("aac_cbr_bitrate")
                        .selected_text(format!("{current} kbit/s"))
                        .show_ui(ui, |ui| {
                            for (i, rate) in AAC_CBR_BITRATES.iter().enumerate() {
                                ui.selectable_value(
                                    &mut audio.aac_cbr_idx,
                                    i,
                                    format!("{rate} kbit/s"),
                                );
                            }
                        });
                }
            });

            // Opus
            ui.horizontal(|ui| {
                if ui.add(egui::Button::new("Convert to OGG (Opus)").min_size(BUTTON_SIZE)).clicked() {
                    clicked = Some(AudioFormat::OggOpus);
                }
                ui.label("Bitrate:");
                ui.add(
                    egui::DragValue::new(&mut audio.opus_bitrate)
                        .range(OPUS_BITRATE_MIN..=OPUS_BITRATE_MAX)
                        .suffix(" kbit/s"),
                );
            });
        });

    if let Some(format) = clicked {
        app.start_audio_conversion(format);
    }
}
