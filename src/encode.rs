//! Encoding targets and ffmpeg argument assembly
//!
//! Every button and combo in the UI maps to a fixed argument list here.
//! The functions are pure: widget state in, `Vec<String>` of ffmpeg
//! arguments out, so the whole mapping table is unit-testable.

use serde::{Deserialize, Serialize};

/// MP3 VBR quality levels (`-qscale:a 0..9`), highest first.
pub const MP3_VBR_OPTIONS: &[&str] = &[
    "220-260 kbit/s",
    "190-250 kbit/s",
    "170-210 kbit/s",
    "150-195 kbit/s",
    "140-185 kbit/s",
    "120-150 kbit/s",
    "100-130 kbit/s",
    "80-120 kbit/s",
    "70-105 kbit/s",
    "45-85 kbit/s",
];

/// MP3 CBR bitrates in kbit/s.
pub const MP3_CBR_BITRATES: &[u32] = &[
    320, 256, 224, 192, 160, 128, 112, 96, 80, 64, 48, 40, 32, 24, 16, 8,
];

/// AAC VBR quality levels: label + `-q:a` value.
pub const AAC_VBR_OPTIONS: &[(&str, &str)] = &[
    ("Highest (0.1)", "0.1"),
    ("Excellent (1.0)", "1.0"),
    ("Very good (2.0)", "2.0"),
    ("Good (3.0)", "3.0"),
    ("Fair (4.0)", "4.0"),
];

/// AAC CBR bitrates in kbit/s.
pub const AAC_CBR_BITRATES: &[u32] = &[320, 256, 192, 160, 128, 96, 64, 48, 32];

/// Opus bitrate bounds in kbit/s (libopus accepts 6..510).
pub const OPUS_BITRATE_MIN: u32 = 6;
pub const OPUS_BITRATE_MAX: u32 = 510;

/// libx264 presets.
pub const H264_PRESETS: &[&str] = &[
    "ultrafast", "superfast", "veryfast", "faster", "fast", "medium", "slow", "slower", "veryslow",
];

/// libx265 presets (adds placebo).
pub const H265_PRESETS: &[&str] = &[
    "ultrafast", "superfast", "veryfast", "faster", "fast", "medium", "slow", "slower", "veryslow",
    "placebo",
];

/// Audio output format, one per convert button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioFormat {
    Wav,
    Aiff,
    Pcm,
    Raw,
    Flac,
    Alac,
    Mp3,
    M4aAac,
    Aac,
    OggOpus,
}

impl AudioFormat {
    /// Container label used in report headers (matches the output extension,
    /// except ALAC which lives in an m4a container).
    pub fn container_label(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Aiff => "aiff",
            AudioFormat::Pcm => "pcm",
            AudioFormat::Raw => "raw",
            AudioFormat::Flac => "flac",
            AudioFormat::Alac => "m4a",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::M4aAac => "m4a",
            AudioFormat::Aac => "aac",
            AudioFormat::OggOpus => "ogg",
        }
    }

    /// Codec label used in report headers.
    pub fn codec_label(&self) -> &'static str {
        match self {
            AudioFormat::Wav | AudioFormat::Pcm | AudioFormat::Raw => "pcm_s16le",
            AudioFormat::Aiff => "pcm_s16be",
            AudioFormat::Flac => "flac",
            AudioFormat::Alac => "alac",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::M4aAac | AudioFormat::Aac => "aac",
            AudioFormat::OggOpus => "opus",
        }
    }

    /// Filename suffix appended to the input stem, extension included.
    pub fn output_suffix(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "_wav-output.wav",
            AudioFormat::Aiff => "_aiff-output.aiff",
            AudioFormat::Pcm => "_pcm-output.pcm",
            AudioFormat::Raw => "_raw-output.raw",
            AudioFormat::Flac => "_flac-output.flac",
            AudioFormat::Alac => "_alac-output.m4a",
            AudioFormat::Mp3 => "_mp3-output.mp3",
            AudioFormat::M4aAac => "_m4a-output.m4a",
            AudioFormat::Aac => "_aac-output.aac",
            AudioFormat::OggOpus => "_ogg-output.ogg",
        }
    }
}

/// Persisted widget state of the Audio tab.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioOptions {
    pub mp3_vbr: bool,
    pub mp3_vbr_idx: usize,
    pub mp3_cbr_idx: usize,
    pub aac_vbr: bool,
    pub aac_vbr_idx: usize,
    pub aac_cbr_idx: usize,
    pub opus_bitrate: u32,
}

impl Default for AudioOptions {
    fn default() -> Self {
        Self {
            mp3_vbr: true,
            mp3_vbr_idx: 0,
            mp3_cbr_idx: 1,
            aac_vbr: true,
            aac_vbr_idx: 1,
            aac_cbr_idx: 2,
            opus_bitrate: 192,
        }
    }
}

/// Build the encoder argument list for an audio conversion.
///
/// Indices out of table range fall back to the table's last entry so a stale
/// persisted settings file can never panic the UI thread.
pub fn audio_args(format: AudioFormat, opts: &AudioOptions) -> Vec<String> {
    match format {
        AudioFormat::Wav => svec(&["-c:a", "pcm_s16le"]),
        AudioFormat::Aiff => svec(&["-c:a", "pcm_s16be"]),
        // ffmpeg can't infer a muxer from .pcm/.raw extensions
        AudioFormat::Pcm | AudioFormat::Raw => svec(&["-f", "s16le", "-c:a", "pcm_s16le"]),
        AudioFormat::Flac => svec(&["-c:a", "flac"]),
        AudioFormat::Alac => svec(&["-c:a", "alac", "-movflags", "+faststart"]),
        AudioFormat::Mp3 => {
            if opts.mp3_vbr {
                let q = opts.mp3_vbr_idx.min(MP3_VBR_OPTIONS.len() - 1);
                svec(&["-c:a", "libmp3lame", "-qscale:a", &q.to_string()])
            } else {
                let idx = opts.mp3_cbr_idx.min(MP3_CBR_BITRATES.len() - 1);
                let rate = format!("{}k", MP3_CBR_BITRATES[idx]);
                svec(&["-c:a", "libmp3lame", "-b:a", &rate])
            }
        }
        AudioFormat::M4aAac | AudioFormat::Aac => {
            if opts.aac_vbr {
                let idx = opts.aac_vbr_idx.min(AAC_VBR_OPTIONS.len() - 1);
                svec(&["-c:a", "aac", "-q:a", AAC_VBR_OPTIONS[idx].1])
            } else {
                let idx = opts.aac_cbr_idx.min(AAC_CBR_BITRATES.len() - 1);
                let rate = format!("{}k", AAC_CBR_BITRATES[idx]);
                svec(&["-c:a", "aac", "-b:a", &rate])
            }
        }
        AudioFormat::OggOpus => {
            let kbps = opts.opus_bitrate.clamp(OPUS_BITRATE_MIN, OPUS_BITRATE_MAX);
            let rate = format!("{kbps}k");
            svec(&["-c:a", "libopus", "-vbr", "on", "-b:a", &rate])
        }
    }
}

/// Video container format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoContainer {
    Mp4,
    Mkv,
}

impl VideoContainer {
    pub fn all() -> &'static [VideoContainer] {
        &[VideoContainer::Mp4, VideoContainer::Mkv]
    }

    pub fn extension(&self) -> &'static str {
        match self {
            VideoContainer::Mp4 => "mp4",
            VideoContainer::Mkv => "mkv",
        }
    }
}

impl std::fmt::Display for VideoContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoContainer::Mp4 => write!(f, "MP4"),
            VideoContainer::Mkv => write!(f, "MKV"),
        }
    }
}

/// Video codec / encoder implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoCodec {
    X264,
    X265,
    AomAv1,
    SvtAv1,
}

impl VideoCodec {
    pub fn all() -> &'static [VideoCodec] {
        &[
            VideoCodec::X264,
            VideoCodec::X265,
            VideoCodec::AomAv1,
            VideoCodec::SvtAv1,
        ]
    }

    /// ffmpeg encoder name (`-c:v` value).
    pub fn encoder_name(&self) -> &'static str {
        match self {
            VideoCodec::X264 => "libx264",
            VideoCodec::X265 => "libx265",
            VideoCodec::AomAv1 => "libaom-av1",
            VideoCodec::SvtAv1 => "libsvtav1",
        }
    }

    /// Short codec label used in report headers and output filenames.
    pub fn label(&self) -> &'static str {
        match self {
            VideoCodec::X264 => "h264",
            VideoCodec::X265 => "h265",
            VideoCodec::AomAv1 | VideoCodec::SvtAv1 => "av1",
        }
    }
}

impl std::fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoCodec::X264 => write!(f, "H.264 / AVC (libx264)"),
            VideoCodec::X265 => write!(f, "H.265 / HEVC (libx265)"),
            VideoCodec::AomAv1 => write!(f, "AV1 (libaom-av1, slow, best)"),
            VideoCodec::SvtAv1 => write!(f, "AV1 (svt-av1, fast, great)"),
        }
    }
}

/// Rate control mode for H.264/H.265.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateControl {
    Crf,
    Cbr,
}

impl RateControl {
    pub fn all() -> &'static [RateControl] {
        &[RateControl::Crf, RateControl::Cbr]
    }
}

impl std::fmt::Display for RateControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateControl::Crf => write!(f, "CRF (constant quality)"),
            RateControl::Cbr => write!(f, "CBR (constant bitrate)"),
        }
    }
}

/// Rate-control settings for the x264/x265 family.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RateSettings {
    pub rate_control: RateControl,
    pub crf: u32,
    pub bitrate_kbps: u32,
    pub preset_idx: usize,
}

impl RateSettings {
    fn with_crf(crf: u32) -> Self {
        Self {
            rate_control: RateControl::Crf,
            crf,
            bitrate_kbps: 5000,
            preset_idx: 5, // medium
        }
    }
}

impl Default for RateSettings {
    fn default() -> Self {
        Self::with_crf(23)
    }
}

/// Persisted widget state of the Video tab.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoOptions {
    pub container: VideoContainer,
    pub codec: VideoCodec,
    pub h264: RateSettings,
    pub h265: RateSettings,
    pub av1_crf: u32,
    pub aom_cpu_used: u32,
    pub svt_preset: u32,
    pub keep_resolution: bool,
    pub width: u32,
    pub height: u32,
    pub keep_framerate: bool,
    pub fps: f64,
}

impl Default for VideoOptions {
    fn default() -> Self {
        Self {
            container: VideoContainer::Mp4,
            codec: VideoCodec::X264,
            h264: RateSettings::with_crf(23),
            h265: RateSettings::with_crf(28),
            av1_crf: 30,
            aom_cpu_used: 1,
            svt_preset: 8,
            keep_resolution: true,
            width: 1920,
            height: 1080,
            keep_framerate: true,
            fps: 30.0,
        }
    }
}

impl VideoOptions {
    /// Filename suffix for the selected container/codec pair.
    pub fn output_suffix(&self) -> String {
        format!(
            "_{}-{}-output.{}",
            self.container.extension(),
            self.codec.label(),
            self.container.extension()
        )
    }

    /// Output stream label ("mp4-h264-aac" style) for report headers.
    pub fn output_label(&self) -> String {
        format!("{}-{}-aac", self.container.extension(), self.codec.label())
    }
}

fn rate_args(out: &mut Vec<String>, settings: &RateSettings, presets: &[&str]) {
    match settings.rate_control {
        RateControl::Crf => {
            out.push("-crf".into());
            out.push(settings.crf.to_string());
        }
        RateControl::Cbr => {
            out.push("-b:v".into());
            out.push(format!("{}k", settings.bitrate_kbps));
        }
    }
    let idx = settings.preset_idx.min(presets.len() - 1);
    out.push("-preset".into());
    out.push(presets[idx].into());
}

/// Build the encoder argument list for a video conversion.
///
/// Output audio is always re-encoded to AAC; resolution and framerate flags
/// are only emitted when the corresponding "maintain" checkbox is off.
pub fn video_args(opts: &VideoOptions) -> Vec<String> {
    let mut out: Vec<String> = vec!["-c:v".into(), opts.codec.encoder_name().into()];

    match opts.codec {
        VideoCodec::X264 => rate_args(&mut out, &opts.h264, H264_PRESETS),
        VideoCodec::X265 => rate_args(&mut out, &opts.h265, H265_PRESETS),
        VideoCodec::AomAv1 => {
            out.push("-crf".into());
            out.push(opts.av1_crf.to_string());
            out.push("-cpu-used".into());
            out.push(opts.aom_cpu_used.to_string());
        }
        VideoCodec::SvtAv1 => {
            out.push("-crf".into());
            out.push(opts.av1_crf.to_string());
            out.push("-preset".into());
            out.push(opts.svt_preset.to_string());
        }
    }

    out.push("-c:a".into());
    out.push("aac".into());

    if !opts.keep_resolution {
        out.push("-vf".into());
        out.push(format!("scale={}:{}", opts.width, opts.height));
    }
    if !opts.keep_framerate {
        out.push("-r".into());
        out.push(opts.fps.to_string());
    }

    out
}

fn svec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn uncompressed_audio_args() {
        let opts = AudioOptions::default();
        assert_eq!(audio_args(AudioFormat::Wav, &opts), strs(&["-c:a", "pcm_s16le"]));
        assert_eq!(audio_args(AudioFormat::Aiff, &opts), strs(&["-c:a", "pcm_s16be"]));
        assert_eq!(
            audio_args(AudioFormat::Pcm, &opts),
            strs(&["-f", "s16le", "-c:a", "pcm_s16le"])
        );
        assert_eq!(
            audio_args(AudioFormat::Raw, &opts),
            strs(&["-f", "s16le", "-c:a", "pcm_s16le"])
        );
    }

    #[test]
    fn lossless_audio_args() {
        let opts = AudioOptions::default();
        assert_eq!(audio_args(AudioFormat::Flac, &opts), strs(&["-c:a", "flac"]));
        assert_eq!(
            audio_args(AudioFormat::Alac, &opts),
            strs(&["-c:a", "alac", "-movflags", "+faststart"])
        );
    }

    #[test]
    fn mp3_vbr_uses_qscale_index() {
        let opts = AudioOptions {
            mp3_vbr: true,
            mp3_vbr_idx: 3,
            ..Default::default()
        };
        assert_eq!(
            audio_args(AudioFormat::Mp3, &opts),
            strs(&["-c:a", "libmp3lame", "-qscale:a", "3"])
        );
    }

    #[test]
    fn mp3_cbr_uses_bitrate_table() {
        let opts = AudioOptions {
            mp3_vbr: false,
            mp3_cbr_idx: 0,
            ..Default::default()
        };
        assert_eq!(
            audio_args(AudioFormat::Mp3, &opts),
            strs(&["-c:a", "libmp3lame", "-b:a", "320k"])
        );
    }

    #[test]
    fn stale_index_falls_back_to_last_entry() {
        let opts = AudioOptions {
            mp3_vbr: false,
            mp3_cbr_idx: 999,
            ..Default::default()
        };
        assert_eq!(
            audio_args(AudioFormat::Mp3, &opts),
            strs(&["-c:a", "libmp3lame", "-b:a", "8k"])
        );
    }

    #[test]
    fn aac_vbr_and_cbr_args() {
        let vbr = AudioOptions {
            aac_vbr: true,
            aac_vbr_idx: 0,
            ..Default::default()
        };
        assert_eq!(
            audio_args(AudioFormat::M4aAac, &vbr),
            strs(&["-c:a", "aac", "-q:a", "0.1"])
        );

        // quality values pass through verbatim, no float reformatting
        let vbr_one = AudioOptions {
            aac_vbr: true,
            aac_vbr_idx: 1,
            ..Default::default()
        };
        assert_eq!(
            audio_args(AudioFormat::Aac, &vbr_one),
            strs(&["-c:a", "aac", "-q:a", "1.0"])
        );

        let cbr = AudioOptions {
            aac_vbr: false,
            aac_cbr_idx: 2,
            ..Default::default()
        };
        assert_eq!(
            audio_args(AudioFormat::Aac, &cbr),
            strs(&["-c:a", "aac", "-b:a", "192k"])
        );
    }

    #[test]
    fn opus_bitrate_is_clamped() {
        let low = AudioOptions { opus_bitrate: 1, ..Default::default() };
        assert_eq!(
            audio_args(AudioFormat::OggOpus, &low),
            strs(&["-c:a", "libopus", "-vbr", "on", "-b:a", "6k"])
        );

        let high = AudioOptions { opus_bitrate: 9000, ..Default::default() };
        assert_eq!(
            audio_args(AudioFormat::OggOpus, &high),
            strs(&["-c:a", "libopus", "-vbr", "on", "-b:a", "510k"])
        );

        let normal = AudioOptions::default();
        assert_eq!(
            audio_args(AudioFormat::OggOpus, &normal),
            strs(&["-c:a", "libopus", "-vbr", "on", "-b:a", "192k"])
        );
    }

    #[test]
    fn x264_crf_args() {
        let opts = VideoOptions::default();
        assert_eq!(
            video_args(&opts),
            strs(&["-c:v", "libx264", "-crf", "23", "-preset", "medium", "-c:a", "aac"])
        );
    }

    #[test]
    fn x264_cbr_args() {
        let mut opts = VideoOptions::default();
        opts.h264.rate_control = RateControl::Cbr;
        opts.h264.bitrate_kbps = 8000;
        opts.h264.preset_idx = 0;
        assert_eq!(
            video_args(&opts),
            strs(&["-c:v", "libx264", "-b:v", "8000k", "-preset", "ultrafast", "-c:a", "aac"])
        );
    }

    #[test]
    fn x265_default_crf_is_28() {
        let opts = VideoOptions {
            codec: VideoCodec::X265,
            ..Default::default()
        };
        assert_eq!(
            video_args(&opts),
            strs(&["-c:v", "libx265", "-crf", "28", "-preset", "medium", "-c:a", "aac"])
        );
    }

    #[test]
    fn av1_encoders_map_preset_flags() {
        let aom = VideoOptions {
            codec: VideoCodec::AomAv1,
            ..Default::default()
        };
        assert_eq!(
            video_args(&aom),
            strs(&["-c:v", "libaom-av1", "-crf", "30", "-cpu-used", "1", "-c:a", "aac"])
        );

        let svt = VideoOptions {
            codec: VideoCodec::SvtAv1,
            ..Default::default()
        };
        assert_eq!(
            video_args(&svt),
            strs(&["-c:v", "libsvtav1", "-crf", "30", "-preset", "8", "-c:a", "aac"])
        );
    }

    #[test]
    fn scale_and_framerate_flags_only_when_overridden() {
        let opts = VideoOptions {
            keep_resolution: false,
            width: 1280,
            height: 720,
            keep_framerate: false,
            fps: 24.0,
            ..Default::default()
        };
        let args = video_args(&opts);
        let tail = &args[args.len() - 4..];
        assert_eq!(tail, &strs(&["-vf", "scale=1280:720", "-r", "24"])[..]);

        let default_args = video_args(&VideoOptions::default());
        assert!(!default_args.iter().any(|a| a == "-vf" || a == "-r"));
    }

    #[test]
    fn output_suffixes_follow_selection() {
        assert_eq!(AudioFormat::Mp3.output_suffix(), "_mp3-output.mp3");
        assert_eq!(AudioFormat::Alac.output_suffix(), "_alac-output.m4a");

        let opts = VideoOptions::default();
        assert_eq!(opts.output_suffix(), "_mp4-h264-output.mp4");

        let mkv = VideoOptions {
            container: VideoContainer::Mkv,
            codec: VideoCodec::SvtAv1,
            ..Default::default()
        };
        assert_eq!(mkv.output_suffix(), "_mkv-av1-output.mkv");
        assert_eq!(mkv.output_label(), "mkv-av1-aac");
    }

    #[test]
    fn quality_tables_are_consistent() {
        assert_eq!(MP3_VBR_OPTIONS.len(), 10);
        assert_eq!(MP3_CBR_BITRATES.len(), 16);
        assert_eq!(AAC_CBR_BITRATES.len(), 9);
        assert_eq!(AAC_VBR_OPTIONS.len(), 5);
        // tables are sorted highest-quality first
        assert!(MP3_CBR_BITRATES.windows(2).all(|w| w[0] > w[1]));
        assert!(AAC_CBR_BITRATES.windows(2).all(|w| w[0] > w[1]));
    }
}
