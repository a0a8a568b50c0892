use tracing_subscriber::{EnvFilter, FmtSubscriber};

const LOG_ENV: &str = "HNPROBE_LOG";

/// Installs the global subscriber. Log lines go to stderr so stdout stays
/// free for case listings and the run summary.
pub fn init_logging(verbose: bool, no_color: bool) {
    let directive = filter_directive(
        std::env::var(LOG_ENV).ok(),
        std::env::var("RUST_LOG").ok(),
        verbose,
    );
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

/// `HNPROBE_LOG`, then `RUST_LOG`, then the verbosity flag.
fn filter_directive(hnprobe_log: Option<String>, rust_log: Option<String>, verbose: bool) -> String {
    hnprobe_log
        .filter(|value| !value.trim().is_empty())
        .or_else(|| rust_log.filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| {
            if verbose {
                "debug".to_owned()
            } else {
                "info".to_owned()
            }
        })
}
