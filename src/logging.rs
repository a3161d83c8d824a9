//! Tracing setup.
//!
//! Diagnostics go to stderr so they never mix with the table on stdout.
//! `RUST_LOG` overrides the default filter, e.g. `RUST_LOG=repostat=debug`.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "repostat=warn,reqwest=error";
const VERBOSE_FILTER: &str = "repostat=debug,reqwest=warn";

pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let default_filter = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
