//! Dashboard configuration settings, loaded from environment variables.
//!
//! Every recognized option is enumerated here. A missing credential does
//! not fail startup; the corresponding feature degrades to a reported
//! error at call time.

/// Which quote strategy the dashboard uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStrategy {
    /// Keyless chart lookup; change derived from the last two
    /// minute-closes.
    #[default]
    Yahoo,
    /// Keyed single-quote lookup; requires an API key.
    AlphaVantage,
}

impl QuoteStrategy {
    /// Parse a strategy name from a string.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "alphavantage" | "alpha_vantage" => Self::AlphaVantage,
            _ => Self::Yahoo,
        }
    }

    /// Get the strategy name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yahoo => "yahoo",
            Self::AlphaVantage => "alphavantage",
        }
    }
}

/// An upstream API credential.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a credential value.
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Get the credential value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKey").field(&"[REDACTED]").finish()
    }
}

/// Complete dashboard configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Quote strategy selection.
    pub quote_strategy: QuoteStrategy,
    /// Credential for the keyed quote source.
    pub alphavantage_api_key: Option<ApiKey>,
    /// Bearer credential for the social source.
    pub social_bearer_token: Option<ApiKey>,
    /// Default destination for KPI pushes.
    pub kpi_push_url: Option<String>,
    /// Equity symbol shown on the dashboard.
    pub symbol: String,
    /// Coin id shown on the dashboard.
    pub coin_id: String,
    /// Social handle shown on the dashboard.
    pub social_handle: String,
    /// Seconds between refresh cycles.
    pub refresh_interval_secs: u64,
    /// Synthetic orders appended per refresh.
    pub orders_per_refresh: u32,
    /// Trailing KPI window, minutes.
    pub kpi_window_minutes: i64,
    /// Trailing sales-chart window, hours.
    pub sales_window_hours: i64,
    /// Maximum orders retained by the store.
    pub order_store_capacity: usize,
    /// Port for the JSON API.
    pub http_port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            quote_strategy: QuoteStrategy::default(),
            alphavantage_api_key: None,
            social_bearer_token: None,
            kpi_push_url: None,
            symbol: "AAPL".to_string(),
            coin_id: "bitcoin".to_string(),
            social_handle: "twitter".to_string(),
            refresh_interval_secs: 10,
            orders_per_refresh: 2,
            kpi_window_minutes: 60,
            sales_window_hours: 24,
            order_store_capacity: 10_000,
            http_port: 8080,
        }
    }
}

impl DashboardConfig {
    /// Build configuration from environment variables.
    ///
    /// Nothing is required: absent credentials degrade the corresponding
    /// feature, absent tunables fall back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            quote_strategy: std::env::var("QUOTE_SOURCE")
                .map(|s| QuoteStrategy::from_str_case_insensitive(&s))
                .unwrap_or_default(),
            alphavantage_api_key: env_opt("ALPHAVANTAGE_API_KEY").map(ApiKey::new),
            social_bearer_token: env_opt("SOCIAL_BEARER_TOKEN").map(ApiKey::new),
            kpi_push_url: env_opt("KPI_PUSH_URL"),
            symbol: env_opt("DASHBOARD_SYMBOL").unwrap_or(defaults.symbol),
            coin_id: env_opt("DASHBOARD_COIN").unwrap_or(defaults.coin_id),
            social_handle: env_opt("DASHBOARD_SOCIAL_HANDLE").unwrap_or(defaults.social_handle),
            refresh_interval_secs: parse_env_u64(
                "REFRESH_INTERVAL_SECS",
                defaults.refresh_interval_secs,
            ),
            orders_per_refresh: parse_env_u32("ORDERS_PER_REFRESH", defaults.orders_per_refresh),
            kpi_window_minutes: parse_env_i64("KPI_WINDOW_MINUTES", defaults.kpi_window_minutes),
            sales_window_hours: parse_env_i64("SALES_WINDOW_HOURS", defaults.sales_window_hours),
            order_store_capacity: parse_env_usize(
                "ORDER_STORE_CAPACITY",
                defaults.order_store_capacity,
            ),
            http_port: parse_env_u16("HTTP_PORT", defaults.http_port),
        }
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_env_u16(key: &str, default: u16) -> u16 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_env_i64(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
