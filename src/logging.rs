use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Directive used when `RUST_LOG` is not set.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "elixir2txt=error";
    }

    match verbose {
        0 => "elixir2txt=warn",
        1 => "elixir2txt=info",
        2 => "elixir2txt=debug",
        _ => "elixir2txt=trace",
    }
}

/// Install the global diagnostic subscriber on stderr.
///
/// Stdout is left to the output formatter. Calling this twice is harmless:
/// the second subscriber is simply not installed.
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter_layer)
        .try_init();
}
