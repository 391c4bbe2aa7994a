use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Site under test, e.g. "SIAM212". Always uppercased.
    pub site: String,
    /// Tracing filter directive used when RUST_LOG is unset.
    pub log_level: String,

    // Site credentials
    pub username: String,
    pub password: String,

    // Telegram
    pub telegram_token: String,
    pub telegram_chat_id: String,

    // Browser
    pub headless: bool,
    pub chrome_path: Option<String>,
    pub proxy_url: Option<String>,

    // Timings
    pub stable_quiet_ms: u64,
    pub stable_timeout_ms: u64,
    pub page_load_timeout_ms: u64,

    // Retry bounds
    pub run_retry_max: u32,
    pub delivery_retry_max: u32,
    pub delivery_backoff_ms: u64,

    // Artifacts
    pub screenshot_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let site = env::args()
            .nth(1)
            .or_else(|| env::var("SITE").ok())
            .unwrap_or_else(|| "SIAM212".to_string())
            .to_uppercase();

        Ok(Config {
            username: env::var(format!("{}_USERNAME", site)).unwrap_or_default(),
            password: env::var(format!("{}_PASSWORD", site)).unwrap_or_default(),
            site,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info,depobot=debug".to_string()),

            telegram_token: env::var("TELEGRAM_TOKEN").unwrap_or_default(),
            telegram_chat_id: env::var("TELEGRAM_CHAT_ID").unwrap_or_default(),

            headless: env::var("HEADLESS")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
            chrome_path: env::var("CHROME_PATH").ok().filter(|s| !s.is_empty()),
            proxy_url: env::var("PROXY_URL").ok().filter(|s| !s.is_empty()),

            stable_quiet_ms: env::var("STABLE_QUIET_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1500),
            stable_timeout_ms: env::var("STABLE_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(15000),
            page_load_timeout_ms: env::var("PAGE_LOAD_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30000),

            run_retry_max: env::var("RUN_RETRY_MAX")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            delivery_retry_max: env::var("DELIVERY_RETRY_MAX")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            delivery_backoff_ms: env::var("DELIVERY_BACKOFF_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5000),

            screenshot_dir: env::var("SCREENSHOT_DIR").unwrap_or_else(|_| ".".to_string()),
        })
    }
}
