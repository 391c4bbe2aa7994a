use crate::config::Config;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;

/// Launch a fresh CDP browser for one run attempt.
pub async fn create_browser(config: &Config) -> Result<Browser, CdpError> {
    tracing::info!("🚀 Launching browser...");

    let chrome_path = config.chrome_path.clone().unwrap_or_else(|| {
        if cfg!(target_os = "windows") {
            "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe".to_string()
        } else if cfg!(target_os = "macos") {
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome".to_string()
        } else {
            "google-chrome".to_string()
        }
    });

    tracing::info!("🔍 Chrome path: {}", chrome_path);

    let mut args = vec![
        "--disable-blink-features=AutomationControlled",
        "--no-sandbox",
        "--disable-dev-shm-usage",
        "--disable-gpu",
        "--window-size=1920,1080",
        "--disable-features=IsolateOrigins,site-per-process",
        "--disable-site-isolation-trials",
        "--exclude-switches=enable-automation",
        "--disable-infobars",
    ];

    if config.headless {
        args.push("--headless=new");
    }

    let proxy_arg;
    if let Some(proxy_url) = &config.proxy_url {
        proxy_arg = format!("--proxy-server={}", proxy_url);
        args.push(&proxy_arg);
    }

    let builder = BrowserConfig::builder()
        .chrome_executable(chrome_path)
        .window_size(1920, 1080)
        .args(args);

    let (browser, mut handler) = Browser::launch(builder.build().map_err(|e| {
        CdpError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("BrowserConfig build error: {}", e),
        ))
    })?)
    .await?;

    // The handler must be pumped for the lifetime of the browser.
    tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                tracing::warn!("CDP event error: {:?}", e);
            }
        }
        tracing::debug!("CDP handler finished");
    });

    tracing::info!("✅ Browser launched");

    Ok(browser)
}

/// Hide the usual automation fingerprints before any site script runs.
pub async fn inject_anti_detection(page: &Page) -> Result<(), CdpError> {
    let script = r#"
        Object.defineProperty(navigator, 'webdriver', {
            get: () => false,
        });

        window.navigator.chrome = {
            runtime: {},
        };

        const originalQuery = window.navigator.permissions.query;
        window.navigator.permissions.query = (parameters) => (
            parameters.name === 'notifications' ?
                Promise.resolve({ state: Notification.permission }) :
                originalQuery(parameters)
        );

        Object.defineProperty(navigator, 'plugins', {
            get: () => [1, 2, 3, 4, 5],
        });

        Object.defineProperty(navigator, 'languages', {
            get: () => ['th-TH', 'th', 'en-US', 'en'],
        });
    "#;

    page.evaluate(script).await?;
    tracing::debug!("✅ Anti-detection script injected");

    Ok(())
}

/// Poll the page URL until it differs from `start_url` or the timeout lapses.
/// Returns the new URL on navigation, `None` when the page stayed put.
pub async fn wait_for_url_change(
    page: &Page,
    start_url: &str,
    timeout_ms: u64,
) -> Option<String> {
    let rounds = timeout_ms / 250;
    for _ in 0..rounds {
        tokio::time::sleep(std::time::Duration::from_millis(250)).await;

        if let Ok(Some(current_url)) = page.url().await {
            if current_url != start_url {
                tracing::info!("✅ Navigation: {} -> {}", start_url, current_url);
                return Some(current_url);
            }
        }
    }
    None
}
