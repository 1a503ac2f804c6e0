//! QuickConv - quick media converter library
//!
//! Re-exports all modules for use by binary targets.

pub mod app;
pub mod cli;
pub mod config;
pub mod encode;
pub mod job;
pub mod probe;
pub mod runner;
pub mod settings;
pub mod utils;

// Re-export commonly used types
pub use app::QuickConvApp;
pub use encode::{AudioFormat, AudioOptions, VideoCodec, VideoContainer, VideoOptions};
pub use job::{ConversionReport, JobKind, JobState};
pub use probe::MediaInfo;
pub use runner::{ConversionRequest, JobUpdate};
pub use settings::AppSettings;
