//! Log output setup
//!
//! Diagnostics go to stdout through `tracing-subscriber`'s fmt layer.

use tracing::Level;

/// Map the `-v` count to a maximum log level
pub fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbose: u8) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level_for(verbose))
        .with_target(verbose > 0)
        .try_init();
}
