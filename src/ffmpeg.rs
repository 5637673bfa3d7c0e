use regex::Regex;
use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Stdio},
};
use thiserror::Error;

pub const DEFAULT_PROGRAM: &str = "ffmpeg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FFmpegVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

#[derive(Debug, Error)]
pub enum FFmpegError {
    #[error("`{0}` command not found. Please ensure it is installed and in your PATH.")]
    CommandNotFound(String),
    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("ffmpeg exited with {status}: {stderr}")]
    CommandFailed { status: ExitStatus, stderr: String },
    #[error("Could not parse ffmpeg version from output.")]
    VersionParseError,
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

/// Handle on the ffmpeg executable used for every invocation of a run.
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    program: PathBuf,
    debug: bool,
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl Ffmpeg {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            debug: false,
        }
    }

    /// Log command lines and the tool's diagnostics at debug level.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Runs `<program> -version` with its output suppressed.
    /// True only if the executable was found and exited with status zero.
    pub fn is_available(&self) -> bool {
        match Command::new(&self.program)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) => status.success(),
            Err(e) => {
                log::debug!("{} -version failed: {}", self.program.display(), e);
                false
            }
        }
    }

    pub fn version(&self) -> Result<FFmpegVersion, FFmpegError> {
        let output = Command::new(&self.program)
            .arg("-version")
            .output()
            .map_err(|e| self.spawn_error(e))?;
        if !output.status.success() {
            return Err(FFmpegError::CommandFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        parse_version(&String::from_utf8_lossy(&output.stdout))
    }

    /// Copies the audio streams of `input` into `output` without re-encoding,
    /// dropping every metadata tag and using bit-exact muxing.
    pub fn strip_metadata(&self, input: &Path, output: &Path) -> Result<(), FFmpegError> {
        self.run(&strip_metadata_args(input, output))
    }

    fn run(&self, args: &[OsString]) -> Result<(), FFmpegError> {
        if self.debug {
            log::debug!(
                "running: {} {}",
                self.program.display(),
                args.iter()
                    .map(|a| a.to_string_lossy())
                    .collect::<Vec<_>>()
                    .join(" ")
            );
        }

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if self.debug && !stderr.is_empty() {
            log::debug!("ffmpeg stderr:\n{}", stderr.trim_end());
        }

        if !output.status.success() {
            return Err(FFmpegError::CommandFailed {
                status: output.status,
                stderr,
            });
        }
        Ok(())
    }

    fn spawn_error(&self, e: io::Error) -> FFmpegError {
        let program = self.program.display().to_string();
        if e.kind() == io::ErrorKind::NotFound {
            FFmpegError::CommandNotFound(program)
        } else {
            FFmpegError::Spawn { program, source: e }
        }
    }
}

pub fn strip_metadata_args(input: &Path, output: &Path) -> Vec<OsString> {
    let mut args = vec![
        OsString::from("-y"),
        OsString::from("-i"),
        input.as_os_str().to_owned(),
    ];
    args.extend(
        [
            "-map",
            "0:a",
            "-c",
            "copy",
            "-map_metadata",
            "-1",
            "-fflags",
            "+bitexact",
        ]
        .map(OsString::from),
    );
    args.push(output.as_os_str().to_owned());
    args
}

pub fn parse_version(version_info: &str) -> Result<FFmpegVersion, FFmpegError> {
    let re = Regex::new(r"ffmpeg version n?(\d+)\.(\d+)(?:\.(\d+))?")?;
    let caps = re
        .captures(version_info)
        .ok_or(FFmpegError::VersionParseError)?;

    let number = |i: usize| -> Option<u32> { caps.get(i).and_then(|m| m.as_str().parse().ok()) };
    Ok(FFmpegVersion {
        major: number(1).ok_or(FFmpegError::VersionParseError)?,
        minor: number(2).ok_or(FFmpegError::VersionParseError)?,
        patch: number(3).unwrap_or(0),
    })
}
