//! Tracing setup
//!
//! The subscriber is installed before configuration is loaded so config
//! resolution messages are not lost. The filter starts from `RUST_LOG` (or
//! `info`) and is swapped for the configured `log_level` afterwards, unless
//! `RUST_LOG` is set.

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, reload, EnvFilter, Registry};

/// Filter used until configuration has been read
pub const STARTUP_FILTER: &str = "info";

/// Handle for replacing the active filter
#[derive(Clone)]
pub struct LogHandle(reload::Handle<EnvFilter, Registry>);

impl LogHandle {
    /// Replace the active filter with `directive` (e.g. `debug`, `zpage_site=trace`)
    pub fn set_directive(&self, directive: &str) -> Result<()> {
        let filter = EnvFilter::try_new(directive)
            .with_context(|| format!("Invalid log_level '{}'", directive))?;
        self.0
            .reload(filter)
            .context("Failed to update log filter")
    }

    /// Apply the configured level unless `RUST_LOG` already chose one
    pub fn apply_configured_level(&self, log_level: &str) -> Result<()> {
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            return Ok(());
        }
        self.set_directive(log_level)
    }
}

/// Build a subscriber writing to `make_writer`, starting at `initial`
pub fn subscriber_with<W>(make_writer: W, initial: EnvFilter) -> (impl Subscriber + Send + Sync + 'static, LogHandle)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (filter, handle) = reload::Layer::new(initial);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(make_writer));
    (subscriber, LogHandle(handle))
}

/// Install the global subscriber on stdout
pub fn init_tracing() -> LogHandle {
    use tracing_subscriber::util::SubscriberInitExt;

    let initial = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(STARTUP_FILTER));
    let (subscriber, handle) = subscriber_with(std::io::stdout, initial);
    subscriber.init();
    handle
}
