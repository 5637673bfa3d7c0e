mod app;
mod cli;
mod ffmpeg;
mod interrupt;
mod report;
mod scan;
mod strip;
#[cfg(test)]
mod test_fixtures;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Args::parse();

    let default_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();

    match app::run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) if e.is::<interrupt::Interrupted>() => {
            println!("\n⚠️  Operation interrupted by user");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::debug!("{:?}", e);
            println!("❌ An unexpected error occurred: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
