//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Environment variable consulted before the profile's default directive
pub const LOG_ENV_VAR: &str = "FIELDWISE_LOG";

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, predicate start/end events included
    Development,
    /// JSON structured output, warnings and errors only
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Filter directive used when `FIELDWISE_LOG` is unset
    pub fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "fieldwise_core=debug",
            Profile::Production => "fieldwise_core=warn",
            Profile::Test => "fieldwise_core=trace",
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Installs a global subscriber the first time it is called; later calls are
/// no-ops. A library embedding fieldwise that already owns a subscriber should
/// not call this at all.
///
/// # Example
///
/// ```
/// use fieldwise_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            // try_init: a host test harness may already own the global subscriber
            let _ = tracing_subscriber::fmt()
                .with_env_filter(profile.filter())
                .with_target(false)
                .try_init();
        }
        Profile::Production => {
            let _ = tracing_subscriber::fmt()
                .json()
                .with_env_filter(profile.filter())
                .try_init();
        }
        Profile::Test => {
            // Test capture is installed separately via init_test_capture()
            let _ = tracing_subscriber::registry().try_init();
        }
    });
}
