use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

static REQUESTED: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Error)]
#[error("Operation interrupted by user")]
pub struct Interrupted;

/// Registers the Ctrl-C handler. ffmpeg shares our process group, so the
/// running child gets the signal too and its file fails through the normal
/// cleanup path; the batch then stops at the next file boundary.
pub fn install() {
    if let Err(e) = ctrlc::set_handler(|| REQUESTED.store(true, Ordering::SeqCst)) {
        log::warn!("Could not install Ctrl-C handler: {}", e);
    }
}

pub fn requested() -> bool {
    REQUESTED.load(Ordering::SeqCst)
}

pub fn check() -> Result<(), Interrupted> {
    if requested() { Err(Interrupted) } else { Ok(()) }
}
