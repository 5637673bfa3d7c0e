use crate::ffmpeg::{FFmpegError, Ffmpeg};
use crate::report::FileReport;
use crate::scan::is_audio_file;
use serde::Serialize;
use std::{
    ffi::OsString,
    fs::{self, FileTimes},
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StripError {
    #[error("File '{}' not found", .0.display())]
    FileMissing(PathBuf),
    #[error("'{}' (unsupported format)", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("Error creating backup '{}': {source}", .path.display())]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Tool(#[from] FFmpegError),
    #[error("Could not replace the original with the stripped copy: {source}")]
    Replace {
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingOutcome {
    Success,
    SkippedUnsupported,
    SkippedMissing,
    Failed,
}

impl StripError {
    pub fn outcome(&self) -> ProcessingOutcome {
        match self {
            StripError::FileMissing(_) => ProcessingOutcome::SkippedMissing,
            StripError::UnsupportedFormat(_) => ProcessingOutcome::SkippedUnsupported,
            StripError::BackupFailed { .. } | StripError::Tool(_) | StripError::Replace { .. } => {
                ProcessingOutcome::Failed
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Stripped {
    pub backup: Option<PathBuf>,
}

/// `song.mp3` -> `song.mp3.backup`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".backup");
    PathBuf::from(name)
}

/// `song.mp3` -> `song.temp.mp3`. The original extension stays last so
/// ffmpeg picks the same container for the output.
pub fn temp_path(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) => {
            let mut temp_ext = OsString::from("temp.");
            temp_ext.push(ext);
            path.with_extension(temp_ext)
        }
        None => path.with_extension("temp"),
    }
}

/// Removes every metadata tag from `path` in place.
///
/// The original is only replaced once ffmpeg has written a complete temporary
/// output; on failure the temporary file is deleted and the original is left
/// as it was. A backup, when requested, is taken before ffmpeg runs and is
/// kept whatever happens afterwards.
pub fn strip_metadata(
    ffmpeg: &Ffmpeg,
    path: &Path,
    make_backup: bool,
) -> Result<Stripped, StripError> {
    if !path.exists() {
        return Err(StripError::FileMissing(path.to_path_buf()));
    }
    if !is_audio_file(path) {
        return Err(StripError::UnsupportedFormat(path.to_path_buf()));
    }

    println!("🔧 Processing: {}", path.display());

    let mut stripped = Stripped::default();
    if make_backup {
        let backup = backup_path(path);
        copy_preserving_times(path, &backup).map_err(|source| StripError::BackupFailed {
            path: backup.clone(),
            source,
        })?;
        println!("💾 Backup created: {}", backup.display());
        stripped.backup = Some(backup);
    }

    let temp = temp_path(path);
    let result = ffmpeg
        .strip_metadata(path, &temp)
        .map_err(StripError::from)
        .and_then(|()| fs::rename(&temp, path).map_err(|source| StripError::Replace { source }));

    if result.is_err() {
        remove_temp(&temp);
    }
    result.map(|()| stripped)
}

/// Runs [`strip_metadata`] and prints the file's outcome line.
pub fn process_file(ffmpeg: &Ffmpeg, path: &Path, make_backup: bool) -> FileReport {
    match strip_metadata(ffmpeg, path, make_backup) {
        Ok(stripped) => {
            println!("✅ Metadata removed from: {}", path.display());
            FileReport::success(path, stripped.backup)
        }
        Err(e) => {
            println!("{}", failure_line(path, &e));
            let backup = backup_path(path);
            let backup = (make_backup && e.outcome() == ProcessingOutcome::Failed && backup.exists())
                .then_some(backup);
            FileReport::failure(path, &e, backup)
        }
    }
}

fn failure_line(path: &Path, e: &StripError) -> String {
    match e {
        StripError::UnsupportedFormat(_) => format!("⚠️  Skipping: {}", e),
        StripError::FileMissing(_) => format!("❌ Error: {}", e),
        StripError::BackupFailed { .. } => format!("❌ {}", e),
        StripError::Tool(FFmpegError::CommandFailed { stderr, .. }) => {
            format!("❌ Error processing '{}': {}", path.display(), stderr.trim_end())
        }
        StripError::Tool(_) | StripError::Replace { .. } => format!(
            "❌ Unexpected error while processing '{}': {}",
            path.display(),
            e
        ),
    }
}

fn copy_preserving_times(src: &Path, dst: &Path) -> io::Result<()> {
    fs::copy(src, dst)?;

    let meta = fs::metadata(src)?;
    let mut times = FileTimes::new().set_modified(meta.modified()?);
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    // The copy inherits the source permissions, so a read-only original
    // yields a backup we cannot reopen for writing. Keep the backup anyway.
    if let Err(e) = fs::File::options()
        .write(true)
        .open(dst)
        .and_then(|f| f.set_times(times))
    {
        log::warn!("Could not preserve timestamps on {}: {}", dst.display(), e);
    }
    Ok(())
}

fn remove_temp(temp: &Path) {
    if temp.exists() {
        if let Err(e) = fs::remove_file(temp) {
            log::warn!("Could not remove temporary file {}: {}", temp.display(), e);
        }
    }
}
