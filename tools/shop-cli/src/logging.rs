//! Tracing subscriber setup.
//!
//! The subscriber is installed before the config file is read, so config
//! discovery is traced too. Its filter sits behind a reload handle and picks
//! up `[log] level` once the config is known.

use tracing::warn;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Where the active filter came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterSource {
    /// `RUST_LOG` was set.
    Env,
    /// `--verbose` was passed.
    Verbose,
    /// Nothing explicit yet; the configured level may replace it.
    Fallback,
}

impl FilterSource {
    fn pick(env_set: bool, verbose: bool) -> Self {
        if env_set {
            FilterSource::Env
        } else if verbose {
            FilterSource::Verbose
        } else {
            FilterSource::Fallback
        }
    }

    fn accepts_config(self) -> bool {
        self == FilterSource::Fallback
    }
}

/// Handle for adjusting the installed filter.
pub struct Logging {
    handle: reload::Handle<EnvFilter, Registry>,
    source: FilterSource,
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` means `debug`, and
/// `warn` applies until [`Logging::apply_config_level`] runs.
pub fn init(verbose: bool, json: bool) -> Logging {
    let (filter, source) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, FilterSource::Env),
        Err(_) => {
            let level = if verbose { "debug" } else { "warn" };
            (EnvFilter::new(level), FilterSource::pick(false, verbose))
        }
    };
    let (filter, handle) = reload::Layer::new(filter);

    let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry.with(layer.json()).try_init()
    } else {
        registry.with(layer.compact()).try_init()
    };

    Logging { handle, source }
}

impl Logging {
    /// Switch to the configured level unless `RUST_LOG` or `--verbose`
    /// already chose one.
    pub fn apply_config_level(&self, level: &str) {
        if !self.source.accepts_config() {
            return;
        }
        match EnvFilter::try_new(level) {
            Ok(filter) => {
                if let Err(e) = self.handle.reload(filter) {
                    warn!(error = %e, "failed to apply configured log level");
                }
            }
            Err(e) => warn!(level, error = %e, "ignoring invalid log level"),
        }
    }
}
