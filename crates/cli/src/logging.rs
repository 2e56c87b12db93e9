use tracing::warn;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

const DEFAULT_FILTER: &str = "info";

/// Debug for this workspace only; HTTP internals stay at info.
const DEBUG_FILTER: &str = "info,sales_extractor=debug,engine_processing=debug,engine_config=debug,engine_core=debug,connectors=debug,model=debug";

/// Lets the configured `debug` parameter raise verbosity after startup.
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
}

/// Installs the global subscriber. `RUST_LOG` wins over the default level.
pub fn init() -> LogHandle {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    LogHandle { filter: handle }
}

impl LogHandle {
    pub fn enable_debug(&self) {
        if let Err(e) = self.filter.reload(EnvFilter::new(DEBUG_FILTER)) {
            warn!("Could not switch log level to debug: {e}");
        }
    }
}

#[cfg(test)]
impl LogHandle {
    /// A handle whose layer is not installed; reloads only log a warning.
    pub fn detached() -> Self {
        let (_, filter) = reload::Layer::<EnvFilter, Registry>::new(EnvFilter::new(DEFAULT_FILTER));
        LogHandle { filter }
    }
}
