//! Tracing setup for the gatekeeper CLI.
//!
//! Logs go to stderr so stdout stays clean JSON. `RUST_LOG` overrides the
//! default `info` filter. Initialization is guarded by `OnceLock` so tests can
//! call it repeatedly.
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static OBS_INIT: OnceLock<()> = OnceLock::new();

pub fn init_tracing(default_filter: &str) {
    OBS_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));
        let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing("warn");
        init_tracing("debug");
        tracing::info!("tracing initialized twice without panicking");
    }
}
