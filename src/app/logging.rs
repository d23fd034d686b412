use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::util::SubscriberInitExt;

pub fn subscriber(level: Level) -> FmtSubscriber {
    FmtSubscriber::builder().with_max_level(level).finish()
}

/// Run `load` under a temporary subscriber.
///
/// The configured log level is only known once the config is loaded, but
/// loading can already warn (bad env overrides, corrupt files).
pub fn with_startup_logging<T>(verbose: bool, load: impl FnOnce() -> T) -> T {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let _guard = subscriber(level).set_default();
    load()
}
