//! Persisted application settings
//!
//! Saved as JSON under `eframe::APP_KEY` through eframe's storage; every
//! field carries a default so old settings files keep loading after fields
//! are added.

use serde::{Deserialize, Serialize};

use crate::encode::{AudioOptions, VideoOptions};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub audio: AudioOptions,
    pub video: VideoOptions,
    pub dark_mode: bool,
}

impl AppSettings {
    pub fn load_or_default(storage: Option<&dyn eframe::Storage>) -> Self {
        storage
            .and_then(|s| s.get_string(eframe::APP_KEY))
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{RateControl, VideoCodec};

    #[test]
    fn settings_round_trip() {
        let mut settings = AppSettings::default();
        settings.audio.opus_bitrate = 96;
        settings.video.codec = VideoCodec::SvtAv1;
        settings.video.h264.rate_control = RateControl::Cbr;
        settings.dark_mode = true;

        let json = serde_json::to_string(&settings).unwrap();
        let back: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.audio.opus_bitrate, 96);
        assert_eq!(back.video.codec, VideoCodec::SvtAv1);
        assert_eq!(back.video.h264.rate_control, RateControl::Cbr);
        assert!(back.dark_mode);
    }

    #[test]
    fn unknown_and_missing_fields_are_tolerated() {
        let back: AppSettings =
            serde_json::from_str(r#"{"dark_mode": true, "someday": 42}"#).unwrap();
        assert!(back.dark_mode);
        assert_eq!(back.audio.opus_bitrate, 192);
        assert!(back.video.keep_resolution);
    }
}
