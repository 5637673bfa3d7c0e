use clap::Parser;
use std::path::PathBuf;

const AFTER_HELP: &str = "\
Usage examples:
  tagscrub song.mp3                    # Remove metadata from a single file
  tagscrub -r /path/to/music/          # Process an entire directory recursively
  tagscrub -b -r /path/to/music/       # Process recursively with backups

Supported formats: MP3, FLAC, OGG, M4A, AAC, WAV, WMA";

/// Removes metadata from audio files using ffmpeg.
#[derive(Parser, Debug)]
#[command(author, version, about, after_help = AFTER_HELP)]
pub struct Args {
    /// The file or directory to process
    #[arg(required_unless_present = "check_ffmpeg")]
    pub target: Option<PathBuf>,

    /// Process all files in the directory recursively
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Create backups of the original files (.backup extension)
    #[arg(short = 'b', long)]
    pub backup: bool,

    /// Show ffmpeg command lines and diagnostics.
    #[arg(short = 'g', long)]
    pub debug: bool,

    /// ffmpeg executable to run.
    #[arg(long = "ffmpeg", value_name = "PATH", default_value = crate::ffmpeg::DEFAULT_PROGRAM)]
    pub ffmpeg: PathBuf,

    /// Check the ffmpeg installation and report its version, then exit.
    #[arg(short = 'c', long)]
    pub check_ffmpeg: bool,

    /// Write a JSON report of every processed file to this path.
    #[arg(short = 'w', long = "write-report", value_name = "FILE")]
    pub write_report: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_short_flags() {
        let args = Args::try_parse_from(["tagscrub", "-r", "-b", "/music"]).unwrap();
        assert!(args.recursive);
        assert!(args.backup);
        assert_eq!(args.target, Some(PathBuf::from("/music")));
        assert_eq!(args.ffmpeg, PathBuf::from("ffmpeg"));
    }

    #[test]
    fn parses_long_flags() {
        let args = Args::try_parse_from([
            "tagscrub",
            "--recursive",
            "--backup",
            "--write-report",
            "out.json",
            "song.flac",
        ])
        .unwrap();
        assert!(args.recursive && args.backup);
        assert_eq!(args.write_report, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn target_is_required() {
        assert!(Args::try_parse_from(["tagscrub", "-r"]).is_err());
    }

    #[test]
    fn check_ffmpeg_needs_no_target() {
        let args = Args::try_parse_from(["tagscrub", "--check-ffmpeg"]).unwrap();
        assert!(args.check_ffmpeg);
        assert!(args.target.is_none());
    }

    #[test]
    fn help_lists_supported_formats() {
        let help = Args::command().render_long_help().to_string();
        assert!(help.contains("Supported formats: MP3, FLAC, OGG, M4A, AAC, WAV, WMA"));
        assert!(help.contains("--recursive"));
    }
}
