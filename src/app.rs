use crate::{
    cli::Args,
    ffmpeg::Ffmpeg,
    interrupt,
    report::BatchReport,
    scan::collect_audio_files,
    strip::process_file,
};
use anyhow::Result;
use std::path::Path;

/// Runs one invocation. `Ok(false)` means a failure that has already been
/// reported to the user; the caller only turns it into the exit code.
pub fn run(args: Args) -> Result<bool> {
    interrupt::install();

    let ffmpeg = Ffmpeg::new(&args.ffmpeg).with_debug(args.debug);

    if args.check_ffmpeg {
        return Ok(handle_ffmpeg_check(&ffmpeg));
    }

    let target = args
        .target
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("a target file or directory is required"))?;

    if !ffmpeg.is_available() {
        // Ctrl-C during the version query kills the child, not a missing tool.
        interrupt::check()?;
        println!("❌ Error: ffmpeg is not installed. Please install it:");
        print_install_help();
        return Ok(false);
    }

    if !target.exists() {
        println!("❌ Error: '{}' does not exist", target.display());
        return Ok(false);
    }

    let mut report = BatchReport::new(target, args.recursive);
    let success = if target.is_file() {
        let file = process_file(&ffmpeg, target, args.backup);
        let succeeded = file.succeeded();
        report.push(file);
        interrupt::check()?;
        succeeded
    } else if target.is_dir() {
        process_directory(&ffmpeg, target, args.recursive, args.backup, &mut report)?
    } else {
        println!("❌ Error: '{}' is not a file or a directory", target.display());
        return Ok(false);
    };

    if let Some(path) = &args.write_report {
        report.write_json(path)?;
    }

    Ok(success)
}

/// Strips every eligible file in `dir`. Individual failures only show up in
/// the summary; the result is `false` only when `dir` is not a directory.
pub fn process_directory(
    ffmpeg: &Ffmpeg,
    dir: &Path,
    recursive: bool,
    make_backup: bool,
    report: &mut BatchReport,
) -> Result<bool> {
    if !dir.is_dir() {
        println!("❌ Error: '{}' is not a directory", dir.display());
        return Ok(false);
    }

    println!("📁 Processing directory: {}", dir.display());
    println!(
        "🔄 Mode: {}",
        if recursive {
            "recursive"
        } else {
            "current directory only"
        }
    );

    let files = collect_audio_files(dir, recursive)?;
    if files.is_empty() {
        println!("⚠️  No audio files found");
        return Ok(true);
    }

    println!("🎵 Audio files found: {}", files.len());

    for file in &files {
        interrupt::check()?;
        report.push(process_file(ffmpeg, file, make_backup));
    }
    interrupt::check()?;

    println!("{}", report.summary_line());
    if let Some(table) = report.failure_table() {
        println!("{table}");
    }
    Ok(true)
}

fn handle_ffmpeg_check(ffmpeg: &Ffmpeg) -> bool {
    println!("🔍 Checking FFmpeg installation...\n");

    if !ffmpeg.is_available() {
        println!("❌ FFmpeg not found: {}", ffmpeg.program().display());
        println!("   Please install it:");
        print_install_help();
        return false;
    }

    match ffmpeg.version() {
        Ok(version) => {
            println!("✅ FFmpeg found: {}", ffmpeg.program().display());
            println!(
                "   Version: {}.{}.{}",
                version.major, version.minor, version.patch
            );
        }
        Err(e) => {
            log::debug!("version check failed: {}", e);
            println!("⚠️  Could not parse FFmpeg version from output");
        }
    }

    println!("\n🎉 FFmpeg check complete!");
    true
}

fn print_install_help() {
    println!("   Ubuntu/Debian: sudo apt install ffmpeg");
    println!("   CentOS/RHEL: sudo yum install ffmpeg");
    println!("   Arch: sudo pacman -S ffmpeg");
    println!("   macOS: brew install ffmpeg");
    println!("   Windows: download from https://ffmpeg.org/download.html");
}
