//! Path helpers

use std::path::{Path, PathBuf};

/// Output path for a conversion: same directory as the input, input stem
/// plus the format suffix (which carries its own extension).
pub fn output_path_for(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let name = format!("{stem}{suffix}");
    match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(name),
        _ => PathBuf::from(name),
    }
}

/// Starting directory for the file picker.
pub fn documents_dir() -> PathBuf {
    dirs_next::document_dir()
        .or_else(dirs_next::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_lands_next_to_input() {
        let out = output_path_for(Path::new("/music/track.flac"), "_mp3-output.mp3");
        assert_eq!(out, PathBuf::from("/music/track_mp3-output.mp3"));
    }

    #[test]
    fn dotted_stems_keep_their_dots() {
        let out = output_path_for(Path::new("/v/take.01.final.mov"), "_mp4-h264-output.mp4");
        assert_eq!(out, PathBuf::from("/v/take.01.final_mp4-h264-output.mp4"));
    }

    #[test]
    fn bare_filename_stays_relative() {
        let out = output_path_for(Path::new("song.wav"), "_flac-output.flac");
        assert_eq!(out, PathBuf::from("song_flac-output.flac"));
    }
}
