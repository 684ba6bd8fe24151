use tracing_subscriber::EnvFilter;

use crate::args::LogArgs;

/// Installs the global subscriber. `RUST_LOG` wins over the configured filter.
pub fn init_logger(args: &LogArgs) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.filter));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if args.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
