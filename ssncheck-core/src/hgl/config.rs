//! Configuration for High Group List refresh

use std::time::Duration;

/// Published location of the SSA high-group text document.
pub const DEFAULT_HGL_URL: &str = "https://www.ssa.gov/employer/highgroup.txt";

/// Configuration for the High Group List cache
#[derive(Debug, Clone)]
pub struct HglConfig {
    /// Remote document URL
    pub url: String,

    /// Minimum interval between refresh attempts
    pub refresh_interval: Duration,

    /// HTTP timeout for fetches
    pub timeout: Duration,

    /// Enable/disable remote refresh
    pub refresh_enabled: bool,
}

impl Default for HglConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_HGL_URL.to_string(),
            refresh_interval: Duration::from_secs(21_600), // 6 hours
            timeout: Duration::from_secs(10),
            refresh_enabled: true,
        }
    }
}

impl HglConfig {
    /// Configure a custom document URL.
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    /// Configure a custom refresh interval.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Configure a custom fetch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disable remote refresh (serve only injected snapshots).
    pub fn without_refresh(mut self) -> Self {
        self.refresh_enabled = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_ssa_publication() {
        let config = HglConfig::default();
        assert_eq!(config.url, DEFAULT_HGL_URL);
        assert_eq!(config.refresh_interval, Duration::from_secs(21_600));
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.refresh_enabled);
    }

    #[test]
    fn test_builder_style_overrides() {
        let config = HglConfig::default()
            .with_url("http://localhost:8080/highgroup.txt")
            .with_refresh_interval(Duration::from_secs(60))
            .without_refresh();
        assert_eq!(config.url, "http://localhost:8080/highgroup.txt");
        assert_eq!(config.refresh_interval, Duration::from_secs(60));
        assert!(!config.refresh_enabled);
    }
}
