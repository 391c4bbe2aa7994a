use depobot::browser::{create_browser, inject_anti_detection};
use depobot::config::Config;
use depobot::error::BotError;
use depobot::report::TelegramReporter;
use depobot::runner::run_site;
use depobot::screenshot::ScreenshotStore;
use depobot::sites::SiteRegistry;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenvy::dotenv() {
        Ok(path) => eprintln!("✅ .env loaded from: {:?}", path),
        Err(e) => eprintln!("⚠️  .env not found: {}", e),
    }

    let config = Arc::new(Config::from_env()?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    tracing::info!("🤖 Deposit gateway verification starting");
    tracing::info!("   Site: {}", config.site);
    tracing::info!("   Headless: {}", config.headless);
    tracing::info!("   Screenshot dir: {}", config.screenshot_dir);

    let registry = SiteRegistry::new(config.clone());
    let site = registry.get(&config.site).ok_or_else(|| {
        tracing::error!(
            "❌ Unknown site [{}], known sites: {:?}",
            config.site,
            registry.names()
        );
        BotError::UnknownSite(config.site.clone())
    })?;

    let reporter = TelegramReporter::new(&config);
    let shots = ScreenshotStore::new(config.screenshot_dir.clone(), site.name());

    for attempt in 1..=config.run_retry_max {
        tracing::info!("🏁 Run attempt {}/{}", attempt, config.run_retry_max);

        match run_once(&config, site.as_ref(), &shots, &reporter).await {
            Ok(()) => {
                shots.clear();
                tracing::info!("✅ Run complete");
                return Ok(());
            }
            Err(e) => {
                // Partial results are discarded; the next attempt starts
                // from login with a fresh browser.
                tracing::warn!("⚠️ Run attempt {} lost: {}", attempt, e);
                tracing::info!("Retrying from the beginning...");
            }
        }
    }

    tracing::error!("❌ Reached max retries, stopping");
    reporter.send_aborted(site.name(), config.run_retry_max).await;
    shots.clear();
    Err(BotError::RunIncomplete(config.run_retry_max).into())
}

async fn run_once(
    config: &Config,
    site: &dyn depobot::sites::SiteAdapter,
    shots: &ScreenshotStore,
    reporter: &TelegramReporter,
) -> Result<(), BotError> {
    let mut browser = create_browser(config).await?;

    let outcome = async {
        let page = browser.new_page("about:blank").await?;
        inject_anti_detection(&page).await?;

        site.login(&page).await?;
        let result = run_site(site, &page, shots).await?;

        tracing::info!("📊 [{}] channels classified", result.len());
        reporter.send_channel_reports(site, &result, shots).await;
        reporter.send_summary(site, &result).await;
        Ok(())
    }
    .await;

    if let Err(e) = browser.close().await {
        tracing::warn!("⚠️ Browser close failed: {}", e);
    }

    outcome
}
