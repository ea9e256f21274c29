//! Log filter selection and subscriber installation.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "FINLENS_LOG";

/// Directives used when `FINLENS_LOG` is unset or unparseable.
pub const DEFAULT_DIRECTIVES: &str = "finlens_core=info,finlens_analysis=info";

/// Build the filter for `directives`, or the default filter when they are
/// absent or malformed.
///
/// Targets are module paths, so one pipeline stage can be raised on its
/// own, e.g. `finlens_analysis::anomaly=debug` or
/// `finlens_analysis::loader=trace,finlens_core=warn`.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the fmt subscriber filtered by `FINLENS_LOG`.
///
/// Only the first call does anything. A subscriber already installed by
/// the host application is left in place.
pub fn init_tracing() {
    INIT.call_once(|| {
        let directives = std::env::var(LOG_ENV_VAR).ok();
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_line_number(true))
            .with(log_filter(directives.as_deref()))
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_directives_use_the_default() {
        let filter = log_filter(None).to_string();
        assert!(filter.contains("finlens_core=info"), "{filter}");
        assert!(filter.contains("finlens_analysis=info"), "{filter}");
    }

    #[test]
    fn stage_directive_is_kept() {
        let filter = log_filter(Some("finlens_analysis::anomaly=debug")).to_string();
        assert!(filter.contains("finlens_analysis::anomaly=debug"), "{filter}");
    }

    #[test]
    fn malformed_directives_fall_back() {
        let filter = log_filter(Some("finlens_analysis=loud")).to_string();
        assert!(filter.contains("finlens_core=info"), "{filter}");
    }
}
