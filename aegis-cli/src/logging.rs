//! Tracing subscriber setup from the `[general]` config section

use tracing_subscriber::EnvFilter;

use aegis_core::config::GeneralConfig;

/// Initialise the global tracing subscriber.
///
/// The level comes from `--log-level` when given, otherwise from
/// `general.log_level`. The format (`json` or `pretty`) comes from
/// `general.log_format`. Safe to call more than once; only the first
/// call installs a subscriber.
pub fn init(general: &GeneralConfig, level_override: Option<&str>) {
    let level = level_override.unwrap_or(&general.log_level);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match general.log_format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    };

    if let Err(e) = result {
        eprintln!("warning: failed to initialise logging: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let general = GeneralConfig::default();
        // second call must warn instead of panicking
        init(&general, None);
        init(&general, Some("debug"));
    }

    #[test]
    fn test_invalid_level_falls_back() {
        let general = GeneralConfig::default();
        init(&general, Some("not-a-level"));
    }
}
