//! Conversion reports
//!
//! One `ConversionReport` per launched conversion. The report owns the
//! receiving end of its worker's channel and walks a three-state machine:
//! Running until the worker reports a terminal update, then Succeeded or
//! Failed forever. The card stays on screen until the user closes it.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::mpsc::{channel, Receiver, TryRecvError};

use eframe::egui;
use log::warn;

use crate::runner::JobUpdate;

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobKind {
    Audio,
    Video,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobState {
    Running,
    Succeeded,
    Failed,
}

pub struct ConversionReport {
    pub id: u32,
    pub kind: JobKind,
    /// "container-codec" label of the input, e.g. "mp4-h264-aac".
    input_label: String,
    /// Same for the output.
    output_label: String,
    input_path: PathBuf,
    output_path: PathBuf,
    progress: f64,
    error: String,
    state: JobState,
    rx: Receiver<JobUpdate>,
}

impl ConversionReport {
    /// A report for a dispatched job, starting in `Running`.
    pub fn new(
        kind: JobKind,
        input_label: String,
        output_label: String,
        input_path: PathBuf,
        output_path: PathBuf,
        rx: Receiver<JobUpdate>,
    ) -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            kind,
            input_label,
            output_label,
            input_path,
            output_path,
            progress: 0.0,
            error: String::new(),
            state: JobState::Running,
            rx,
        }
    }

    /// A report born terminal, for jobs that failed before dispatch
    /// (typically a probe error).
    pub fn failed(
        kind: JobKind,
        input_label: String,
        output_label: String,
        input_path: PathBuf,
        output_path: PathBuf,
        error: String,
    ) -> Self {
        let (_tx, rx) = channel();
        let mut report = Self::new(kind, input_label, output_label, input_path, output_path, rx);
        report.state = JobState::Failed;
        report.error = error;
        report
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == JobState::Running
    }

    #[cfg(test)]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[cfg(test)]
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Drain pending worker updates. Terminal states ignore anything that
    /// arrives late. A channel that disconnects while the job is still
    /// running means the worker died without a verdict; that counts as a
    /// failure, otherwise the card would show Running forever with no
    /// Close button.
    pub fn poll(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(update) => {
                    if self.state != JobState::Running {
                        continue;
                    }
                    match update {
                        JobUpdate::Progress(pct) => self.progress = pct.clamp(0.0, 100.0),
                        JobUpdate::Succeeded => {
                            self.progress = 100.0;
                            self.state = JobState::Succeeded;
                        }
                        JobUpdate::Failed(message) => {
                            self.error = message;
                            self.state = JobState::Failed;
                        }
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.state == JobState::Running {
                        self.error =
                            "conversion worker exited without reporting a result".to_string();
                        self.state = JobState::Failed;
                    }
                    break;
                }
            }
        }
    }

    fn progress_text(&self) -> String {
        format!("{:.0}%", self.progress.clamp(0.0, 100.0))
    }

    fn header(&self) -> String {
        match self.state {
            JobState::Running => {
                format!("Converting {} to {}", self.input_label, self.output_label)
            }
            JobState::Succeeded => {
                format!("Converted {} to {} !", self.input_label, self.output_label)
            }
            JobState::Failed => format!(
                "Failed to convert {} to {} !",
                self.input_label, self.output_label
            ),
        }
    }

    /// Render the card. Returns true when the user clicked Close.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> bool {
        let mut close_requested = false;
        ui.push_id(self.id, |ui| {
            ui.group(|ui| {
                ui.set_width(ui.available_width());
                ui.strong(self.header());
                ui.add_space(4.0);

                match self.state {
                    JobState::Running => {
                        self.input_links(ui);
                        ui.add_space(4.0);
                        ui.add(
                            egui::ProgressBar::new((self.progress / 100.0) as f32)
                                .text(self.progress_text()),
                        );
                    }
                    JobState::Succeeded => {
                        self.input_links(ui);
                        self.output_links(ui);
                        ui.add_space(4.0);
                        close_requested = ui.button("Close").clicked();
                    }
                    JobState::Failed => {
                        self.input_links(ui);
                        ui.add_space(4.0);
                        ui.label("Error message:");
                        let mut error_text = self.error.as_str();
                        ui.add(
                            egui::TextEdit::multiline(&mut error_text)
                                .desired_width(f32::INFINITY)
                                .desired_rows(3),
                        );
                        ui.add_space(4.0);
                        close_requested = ui.button("Close").clicked();
                    }
                }
            });
        });
        close_requested
    }

    fn input_links(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            path_link(ui, "Open input file", &self.input_path);
            if let Some(dir) = self.input_path.parent() {
                path_link(ui, "Open input directory", dir);
            }
        });
    }

    fn output_links(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            path_link(ui, "Open output file", &self.output_path);
            if let Some(dir) = self.output_path.parent() {
                path_link(ui, "Open output directory", dir);
            }
        });
    }
}

/// A clickable link that opens a file or directory in the system handler.
fn path_link(ui: &mut egui::Ui, text: &str, path: &Path) {
    if ui.link(text).clicked() {
        if let Err(e) = open::that(path) {
            warn!("failed to open {}: {e}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    fn report_with_channel() -> (std::sync::mpsc::Sender<JobUpdate>, ConversionReport) {
        let (tx, rx) = channel();
        let report = ConversionReport::new(
            JobKind::Audio,
            "mp3-mp3".into(),
            "wav-pcm_s16le".into(),
            PathBuf::from("/tmp/in.mp3"),
            PathBuf::from("/tmp/in_wav-output.wav"),
            rx,
        );
        (tx, report)
    }

    #[test]
    fn starts_running_with_zero_progress() {
        let (_tx, report) = report_with_channel();
        assert_eq!(report.state(), JobState::Running);
        assert_eq!(report.progress(), 0.0);
        assert_eq!(report.progress_text(), "0%");
    }

    #[test]
    fn progress_updates_accumulate() {
        let (tx, mut report) = report_with_channel();
        tx.send(JobUpdate::Progress(12.4)).unwrap();
        tx.send(JobUpdate::Progress(57.9)).unwrap();
        report.poll();
        assert_eq!(report.state(), JobState::Running);
        assert_eq!(report.progress_text(), "58%");
    }

    #[test]
    fn success_is_terminal_and_pins_progress() {
        let (tx, mut report) = report_with_channel();
        tx.send(JobUpdate::Progress(80.0)).unwrap();
        tx.send(JobUpdate::Succeeded).unwrap();
        // late updates after the terminal transition must be ignored
        tx.send(JobUpdate::Progress(5.0)).unwrap();
        tx.send(JobUpdate::Failed("too late".into())).unwrap();
        report.poll();
        assert_eq!(report.state(), JobState::Succeeded);
        assert_eq!(report.progress(), 100.0);
        assert!(report.error().is_empty());
    }

    #[test]
    fn failure_captures_the_message() {
        let (tx, mut report) = report_with_channel();
        tx.send(JobUpdate::Failed("Unknown encoder 'libfoo'".into()))
            .unwrap();
        report.poll();
        assert_eq!(report.state(), JobState::Failed);
        assert_eq!(report.error(), "Unknown encoder 'libfoo'");
    }

    #[test]
    fn predispatch_failure_is_born_terminal() {
        let mut report = ConversionReport::failed(
            JobKind::Video,
            "mkv-unknown".into(),
            "mp4-h264-aac".into(),
            PathBuf::from("/tmp/in.mkv"),
            PathBuf::from("/tmp/in_mp4-h264-output.mp4"),
            "ffprobe exited with 1".into(),
        );
        assert_eq!(report.state(), JobState::Failed);
        assert!(!report.is_running());
        assert_eq!(report.error(), "ffprobe exited with 1");

        // polling the dummy (already disconnected) channel must not
        // rewrite the error
        report.poll();
        assert_eq!(report.error(), "ffprobe exited with 1");
    }

    #[test]
    fn dead_worker_channel_fails_the_report() {
        let (tx, mut report) = report_with_channel();
        tx.send(JobUpdate::Progress(30.0)).unwrap();
        // worker dies without sending a verdict
        drop(tx);
        report.poll();
        assert_eq!(report.state(), JobState::Failed);
        assert!(!report.is_running());
        assert!(!report.error().is_empty());
    }

    #[test]
    fn disconnect_after_terminal_update_is_not_a_failure() {
        let (tx, mut report) = report_with_channel();
        tx.send(JobUpdate::Succeeded).unwrap();
        drop(tx);
        report.poll();
        report.poll();
        assert_eq!(report.state(), JobState::Succeeded);
        assert!(report.error().is_empty());
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let (_t1, a) = report_with_channel();
        let (_t2, b) = report_with_channel();
        assert!(b.id > a.id);
    }

    #[test]
    fn headers_follow_state() {
        let (tx, mut report) = report_with_channel();
        assert_eq!(report.header(), "Converting mp3-mp3 to wav-pcm_s16le");
        tx.send(JobUpdate::Succeeded).unwrap();
        report.poll();
        assert_eq!(report.header(), "Converted mp3-mp3 to wav-pcm_s16le !");
    }
}
