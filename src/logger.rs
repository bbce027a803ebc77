use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Maps the number of `-v` flags to a log level.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

// Initializer for logger
pub fn init(verbosity: u8) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level_for(verbosity))
        .with_writer(std::io::stderr)
        .finish();

    // A subscriber may already be installed (tests, embedding); keep that one.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
