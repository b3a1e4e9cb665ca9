use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive that overrides the
/// command-line level.
pub const LOG_ENV: &str = "GRAPH_SEARCH_LOG";

/// Initialize structured logging to stderr based on CLI arguments.
///
/// Both crates log under targets starting with `graph_search`, so a bare
/// level such as `debug` is scoped to them.
pub fn init_tracing(verbose: bool, log_level: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let level = match (verbose, log_level) {
        (_, Some(level)) => level,
        (true, None) => "debug",
        (false, None) => "warn",
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(directive(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}

fn directive(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        format!("graph_search={level}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level_is_scoped() {
        assert_eq!(directive("debug"), "graph_search=debug");
    }

    #[test]
    fn test_full_directive_passes_through() {
        assert_eq!(directive("graph_search_core=trace"), "graph_search_core=trace");
    }
}
