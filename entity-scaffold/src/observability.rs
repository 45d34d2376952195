//! Logging setup
//!
//! The library only emits `tracing` events. Binaries and tests embedding it
//! call [`init`] once to install a subscriber.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format of the installed subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable, multi-line
    #[cfg_attr(debug_assertions, default)]
    Pretty,
    /// One JSON object per event
    #[cfg_attr(not(debug_assertions), default)]
    Json,
}

/// Filter used when `RUST_LOG` is unset
#[must_use]
pub const fn default_directives() -> &'static str {
    if cfg!(debug_assertions) {
        "debug,entity_scaffold=trace"
    } else {
        "info"
    }
}

/// Install a global subscriber in the build profile's default format
///
/// # Example
///
/// ```rust,no_run
/// use entity_scaffold::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init()?;
/// tracing::info!("scaffolding started");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init() -> anyhow::Result<()> {
    init_with(LogFormat::default())
}

/// Install a global subscriber in the given format
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_with(format: LogFormat) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives()));

    match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format_follows_profile() {
        if cfg!(debug_assertions) {
            assert_eq!(LogFormat::default(), LogFormat::Pretty);
        } else {
            assert_eq!(LogFormat::default(), LogFormat::Json);
        }
    }

    #[test]
    fn test_default_directives_parse() {
        assert!(EnvFilter::try_new(default_directives()).is_ok());
    }

    #[test]
    fn test_second_init_fails() {
        // The first call may lose to another test in the same process
        let _ = init_with(LogFormat::Json);
        assert!(init_with(LogFormat::Json).is_err());
    }
}
