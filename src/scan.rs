use anyhow::Context;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions (lower-case, without the dot) the stripper accepts.
pub const SUPPORTED_EXTENSIONS: [&str; 7] = ["mp3", "flac", "ogg", "m4a", "aac", "wav", "wma"];

pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// A path is eligible when its extension is on the allow-list.
/// Directories never are, whatever their name.
pub fn is_audio_file(path: &Path) -> bool {
    has_supported_extension(path) && !path.is_dir()
}

/// Lists the eligible audio files below `dir`, immediate children only unless
/// `recursive` is set. Entries below `dir` that cannot be read are skipped with
/// a warning; failing to read `dir` itself is an error.
pub fn collect_audio_files(dir: &Path, recursive: bool) -> anyhow::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("'{}' is not a directory", dir.display());
    }

    let mut walker = WalkDir::new(dir)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(e).with_context(|| format!("Cannot read '{}'", dir.display()));
            }
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if entry.file_type().is_file() && has_supported_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    log::debug!(
        "Found {} audio file(s) in {} ({})",
        files.len(),
        dir.display(),
        if recursive { "recursive" } else { "flat" }
    );
    Ok(files)
}
