// ABOUTME: Shared logging setup for keypairs binaries
// ABOUTME: init_for() gives the named crate INFO on stderr and quiets its dependencies

use tracing_subscriber::EnvFilter;

/// Crate-filtered logging to stderr. Default: INFO for the named crate, WARN for
/// everything else. Used by the CLI so sqlx chatter stays quiet.
pub fn init_for(crate_name: &str) {
    let filter = crate_filter(crate_name);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn crate_filter(crate_name: &str) -> EnvFilter {
    let directive = format!("{}=info", crate_name.replace('-', "_"));
    EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into())
        .add_directive(
            directive
                .parse()
                .unwrap_or_else(|_| tracing::Level::INFO.into()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_init_for() {
        let _ = super::init_for as fn(&str);
    }

    #[test]
    fn crate_filter_normalizes_dashes() {
        let filter = crate_filter("keypairs-cli");
        assert!(filter.to_string().contains("keypairs_cli=info"));
    }
}
