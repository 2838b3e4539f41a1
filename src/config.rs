use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MONTHLY_LIMIT: f64 = 10_000.0;
pub const HISTORY_PREVIEW: usize = 3;

/// Build-time configuration. A WASM bundle has no process environment, so the
/// overrides are baked in by `option_env!` when Trunk compiles the crate.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub auth_timeout: Duration,
    pub default_monthly_limit: f64,
    pub history_preview: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_timeout: Duration::from_secs(DEFAULT_AUTH_TIMEOUT_SECS),
            default_monthly_limit: DEFAULT_MONTHLY_LIMIT,
            history_preview: HISTORY_PREVIEW,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_overrides(
            option_env!("FINANCE_API_BASE_URL"),
            option_env!("FINANCE_AUTH_TIMEOUT_SECS"),
            option_env!("FINANCE_DEFAULT_MONTHLY_LIMIT"),
        )
    }

    pub fn from_overrides(
        base_url: Option<&str>,
        timeout_secs: Option<&str>,
        monthly_limit: Option<&str>,
    ) -> Self {
        let mut config = Self::default();

        if let Some(url) = base_url.map(str::trim).filter(|u| !u.is_empty()) {
            config.api_base_url = url.to_string();
        }

        if let Some(raw) = timeout_secs {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.auth_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = raw, "ignoring invalid FINANCE_AUTH_TIMEOUT_SECS"),
            }
        }

        if let Some(raw) = monthly_limit {
            match raw.trim().parse::<f64>() {
                Ok(limit) if limit.is_finite() && limit >= 0.0 => {
                    config.default_monthly_limit = limit
                }
                _ => tracing::warn!(value = raw, "ignoring invalid FINANCE_DEFAULT_MONTHLY_LIMIT"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_overrides() {
        let config = AppConfig::from_overrides(None, None, None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.auth_timeout, Duration::from_secs(30));
        assert_eq!(config.history_preview, 3);
    }

    #[test]
    fn overrides_replace_defaults() {
        let config =
            AppConfig::from_overrides(Some("https://api.example.com"), Some("5"), Some("2500"));
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.auth_timeout, Duration::from_secs(5));
        assert_eq!(config.default_monthly_limit, 2500.0);
    }

    #[test]
    fn invalid_overrides_fall_back() {
        let config = AppConfig::from_overrides(Some("  "), Some("soon"), Some("-1"));
        assert_eq!(config, AppConfig::default());
    }
}
