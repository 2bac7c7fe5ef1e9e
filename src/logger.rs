use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// The filter for the given verbosity flags. `RUST_LOG` applies only when neither is set.
pub fn filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("polymer_externs=debug")
    } else if quiet {
        EnvFilter::new("polymer_externs=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("polymer_externs=info"))
    }
}

/// Installs the global subscriber. Logs go to stderr so stdout carries only the externs.
pub fn init_logger(verbose: bool, quiet: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter(verbose, quiet))
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters() {
        assert_eq!(filter(true, false).to_string(), "polymer_externs=debug");
        assert_eq!(filter(false, true).to_string(), "polymer_externs=error");
        assert_eq!(filter(true, true).to_string(), "polymer_externs=debug");
    }
}
