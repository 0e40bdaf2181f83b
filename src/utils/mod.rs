pub mod build_info;

use std::sync::Once;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "kana_entry=info";

/// Initializes the global tracing subscriber with sensible defaults.
///
/// Logs go to stderr so they never interleave with shell output on stdout.
/// Unparseable directives are skipped rather than aborting start-up.
pub fn init_tracing(extra_directive: Option<&str>) {
    TRACING_INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        for raw in std::iter::once(DEFAULT_DIRECTIVE).chain(extra_directive) {
            if let Ok(directive) = raw.parse::<Directive>() {
                filter = filter.add_directive(directive);
            }
        }

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        tracing::info!("Kana Entry tracing initialized.");
    });
}
