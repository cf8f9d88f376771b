use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for a `-v` count; `RUST_LOG` takes precedence when set.
pub fn filter_directive(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "rivals_reader=error";
    }

    match verbosity {
        0 => "rivals_reader=warn",
        1 => "rivals_reader=info",
        2 => "rivals_reader=debug",
        _ => "rivals_reader=trace",
    }
}

pub fn init_logger(verbosity: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity, quiet)));

    // A second initialisation (e.g. from tests) is harmless.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive(0, false), "rivals_reader=warn");
        assert_eq!(filter_directive(1, false), "rivals_reader=info");
        assert_eq!(filter_directive(2, false), "rivals_reader=debug");
        assert_eq!(filter_directive(5, false), "rivals_reader=trace");
        assert_eq!(filter_directive(3, true), "rivals_reader=error");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logger(0, true);
        init_logger(2, false);
    }
}
