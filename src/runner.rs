//! ffmpeg process runner
//!
//! Each conversion gets its own worker thread. The thread spawns ffmpeg with
//! `-progress pipe:1`, turns `out_time_us=` lines into percentages against
//! the probed duration and reports over an mpsc channel. The UI thread polls
//! the receiving end once per frame.

use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc::Sender;
use std::thread;

use log::{debug, info, warn};

/// Updates flowing from a worker thread to its report card.
#[derive(Clone, Debug, PartialEq)]
pub enum JobUpdate {
    /// Progress percentage, already clamped to 0..=100.
    Progress(f64),
    Succeeded,
    Failed(String),
}

/// Everything a worker needs to run one conversion.
#[derive(Clone, Debug)]
pub struct ConversionRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Encoder arguments, inserted between `-i <input>` and the output path.
    pub encode_args: Vec<String>,
    /// Probed input duration; 0.0 disables percentage reporting.
    pub duration_secs: f64,
}

/// Spawn a worker thread that runs ffmpeg and streams updates into `tx`.
///
/// Send errors are ignored on purpose: a dropped receiver means the report
/// card was closed and nobody cares about the result anymore.
pub fn spawn_conversion(req: ConversionRequest, tx: Sender<JobUpdate>) {
    let builder = thread::Builder::new().name("quickconv-ffmpeg".to_string());
    let worker_tx = tx.clone();
    if let Err(e) = builder.spawn(move || run_ffmpeg(req, &worker_tx)) {
        warn!("failed to spawn conversion worker: {e}");
        let _ = tx.send(JobUpdate::Failed(format!(
            "failed to start conversion worker: {e}"
        )));
    }
}

fn run_ffmpeg(req: ConversionRequest, tx: &Sender<JobUpdate>) {
    info!(
        "converting {} -> {} [{}]",
        req.input.display(),
        req.output.display(),
        req.encode_args.join(" ")
    );

    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-hide_banner", "-v", "error", "-progress", "pipe:1", "-nostdin"])
        .arg("-i")
        .arg(&req.input)
        .args(&req.encode_args)
        .arg("-n") // never overwrite an existing output
        .arg(&req.output)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            let _ = tx.send(JobUpdate::Failed(format!(
                "failed to launch ffmpeg (is it on the PATH?): {e}"
            )));
            return;
        }
    };

    // drain stderr concurrently so a chatty encoder can't deadlock the pipe
    let stderr_handle = child.stderr.take().map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = String::new();
            let _ = pipe.read_to_string(&mut buf);
            buf
        })
    });

    if let Some(stdout) = child.stdout.take() {
        for line in BufReader::new(stdout).lines().map_while(Result::ok) {
            if let Some(pct) = parse_progress_line(&line, req.duration_secs) {
                let _ = tx.send(JobUpdate::Progress(pct));
            } else if line.trim() == "progress=end" {
                break;
            }
        }
    }

    let stderr_text = stderr_handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default();

    match child.wait() {
        Ok(status) if status.success() => {
            debug!("ffmpeg finished ok for {}", req.output.display());
            let _ = tx.send(JobUpdate::Succeeded);
        }
        Ok(status) => {
            let _ = tx.send(JobUpdate::Failed(error_summary(&stderr_text, &format!(
                "ffmpeg exited with {status}"
            ))));
        }
        Err(e) => {
            let _ = tx.send(JobUpdate::Failed(format!("failed to wait on ffmpeg: {e}")));
        }
    }
}

/// Parse one `key=value` progress line into a percentage.
///
/// Only `out_time_us` lines count; everything else (fps=, speed=, ...) is
/// skipped. With an unknown duration there is nothing to divide by, so no
/// percentage is produced and the bar stays at zero.
pub(crate) fn parse_progress_line(line: &str, duration_secs: f64) -> Option<f64> {
    let micros: i64 = line.strip_prefix("out_time_us=")?.trim().parse().ok()?;
    if duration_secs <= 0.0 {
        return None;
    }
    let pct = (micros as f64 / 1_000_000.0) / duration_secs * 100.0;
    Some(pct.clamp(0.0, 100.0))
}

/// Condense captured stderr into a short error message.
///
/// ffmpeg prints its real complaint in the last few lines; keep those and
/// fall back to the exit status when stderr is empty.
fn error_summary(stderr: &str, fallback: &str) -> String {
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return fallback.to_string();
    }
    let tail_start = lines.len().saturating_sub(8);
    lines[tail_start..].join("\n")
}
