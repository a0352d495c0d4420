use tracing_subscriber::EnvFilter;

const VERBOSE_FILTER: &str = "info,docsync_server=debug,docsync_core=debug,docsync_client=debug";

/// `RUST_LOG` wins when set; otherwise `info`, or debug for our crates with `--verbose`.
pub fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { VERBOSE_FILTER } else { "info" })
    })
}

pub fn init(verbose: bool) {
    tracing_subscriber::fmt().with_env_filter(filter(verbose)).with_target(false).init();
}
