//! Input inspection via ffprobe
//!
//! Runs `ffprobe` synchronously before a conversion is dispatched; the probed
//! duration drives progress percentages, the codec names feed the report
//! headers.

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// What we need to know about an input file before converting it.
#[derive(Clone, Debug, Default)]
pub struct MediaInfo {
    /// Total duration in seconds, 0.0 when ffprobe doesn't report one.
    pub duration_secs: f64,
    /// Codec name of the first audio stream, if any.
    pub audio_codec: Option<String>,
    /// Codec name of the first video stream, if any.
    pub video_codec: Option<String>,
}

#[derive(Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    format: ProbeFormat,
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Deserialize, Default)]
struct ProbeFormat {
    duration: Option<String>,
}

#[derive(Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
}

/// Probe `path` with ffprobe and parse its JSON report.
pub fn probe(path: &Path) -> Result<MediaInfo> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .context("failed to run ffprobe (is it on the PATH?)")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("ffprobe exited with {}: {}", output.status, stderr.trim());
    }

    parse_probe_json(&output.stdout)
}

fn parse_probe_json(bytes: &[u8]) -> Result<MediaInfo> {
    let report: ProbeOutput =
        serde_json::from_slice(bytes).context("unparseable ffprobe output")?;

    let duration_secs = report
        .format
        .duration
        .as_deref()
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    let mut info = MediaInfo {
        duration_secs,
        ..Default::default()
    };
    // first stream of each type wins
    for stream in &report.streams {
        match stream.codec_type.as_deref() {
            Some("audio") if info.audio_codec.is_none() => {
                info.audio_codec = stream.codec_name.clone();
            }
            Some("video") if info.video_codec.is_none() => {
                info.video_codec = stream.codec_name.clone();
            }
            _ => {}
        }
    }
    Ok(info)
}

/// Container label for a path, taken from its extension.
pub fn container_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parses_full_probe_report() {
        let json = br#"{
            "streams": [
                {"codec_type": "video", "codec_name": "h264"},
                {"codec_type": "audio", "codec_name": "aac"},
                {"codec_type": "audio", "codec_name": "mp3"}
            ],
            "format": {"duration": "123.456000"}
        }"#;
        let info = parse_probe_json(json).unwrap();
        assert!((info.duration_secs - 123.456).abs() < 1e-9);
        assert_eq!(info.video_codec.as_deref(), Some("h264"));
        // first audio stream wins
        assert_eq!(info.audio_codec.as_deref(), Some("aac"));
    }

    #[test]
    fn missing_duration_defaults_to_zero() {
        let json = br#"{"streams": [{"codec_type": "audio", "codec_name": "flac"}], "format": {}}"#;
        let info = parse_probe_json(json).unwrap();
        assert_eq!(info.duration_secs, 0.0);
        assert_eq!(info.audio_codec.as_deref(), Some("flac"));
        assert!(info.video_codec.is_none());
    }

    #[test]
    fn garbage_output_is_an_error() {
        assert!(parse_probe_json(b"not json at all").is_err());
    }

    #[test]
    fn container_from_extension() {
        assert_eq!(container_of(&PathBuf::from("/tmp/song.MP3")), "mp3");
        assert_eq!(container_of(&PathBuf::from("/tmp/clip.mkv")), "mkv");
        assert_eq!(container_of(&PathBuf::from("/tmp/noext")), "unknown");
    }
}
