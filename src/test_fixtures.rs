//! Stand-in ffmpeg executables for tests
//!
//! The fakes answer `-version` like a real ffmpeg 7.1.1 and treat the last
//! argument as the output path, so the stripping workflow can be exercised
//! without ffmpeg installed.

#![cfg(all(test, unix))]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Prefix the succeeding fake writes in front of the copied input.
pub const STRIPPED_MARKER: &[u8] = b"stripped:";

const SUCCEEDING: &str = r#"#!/bin/sh
if [ "$1" = "-version" ]; then
    echo "ffmpeg version 7.1.1 Copyright (c) 2000-2025 the FFmpeg developers"
    exit 0
fi
prev=""
for arg in "$@"; do
    if [ "$prev" = "-i" ]; then input="$arg"; fi
    prev="$arg"
    output="$arg"
done
printf 'stripped:' > "$output"
cat "$input" >> "$output"
"#;

const FAILING: &str = r#"#!/bin/sh
if [ "$1" = "-version" ]; then
    echo "ffmpeg version 7.1.1 Copyright (c) 2000-2025 the FFmpeg developers"
    exit 0
fi
for arg in "$@"; do output="$arg"; done
printf 'partial' > "$output"
echo "Invalid data found when processing input" >&2
exit 1
"#;

const BROKEN: &str = "#!/bin/sh\nexit 3\n";

pub struct FakeTools {
    dir: TempDir,
}

impl FakeTools {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create fake tool directory");
        for (name, body) in [
            ("ffmpeg-ok", SUCCEEDING),
            ("ffmpeg-fail", FAILING),
            ("ffmpeg-broken", BROKEN),
        ] {
            write_executable(&dir.path().join(name), body);
        }
        Self { dir }
    }

    /// Copies input to output with [`STRIPPED_MARKER`] in front.
    pub fn succeeding(&self) -> PathBuf {
        self.dir.path().join("ffmpeg-ok")
    }

    /// Leaves a partial output behind and exits 1 with a diagnostic.
    pub fn failing(&self) -> PathBuf {
        self.dir.path().join("ffmpeg-fail")
    }

    /// Exits non-zero even for `-version`.
    pub fn broken(&self) -> PathBuf {
        self.dir.path().join("ffmpeg-broken")
    }
}

fn write_executable(path: &Path, body: &str) {
    fs::write(path, body).expect("Failed to write fake tool");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("Failed to mark fake tool executable");
}

/// Names of the entries directly inside `dir`, sorted.
pub fn dir_listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to list directory")
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
