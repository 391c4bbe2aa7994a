use crate::browser::{dom, wait_stable};
use crate::config::Config;
use crate::error::BotError;
use crate::sites::beta191::selectors::Beta191Selectors as Sel;
use chromiumoxide::Page;
use std::sync::Arc;
use std::time::Duration;

const OPEN_RETRIES: u32 = 3;

pub async fn login_to_beta191(
    page: &Page,
    base_url: &str,
    config: Arc<Config>,
) -> Result<(), BotError> {
    open_site(page, base_url, &config).await?;

    if let Ok(true) = dom::click_button_named(page, Sel::AGE_GATE_YES).await {
        tracing::info!("Slidedown closed");
    } else {
        tracing::info!("No slidedown, skipping");
    }

    if !dom::click_button_named(page, "Login").await? {
        return Err(BotError::LoginFailed("login button not found".to_string()));
    }
    tracing::info!("🔑 Login button clicked");

    if !dom::fill_textbox_named(page, Sel::USERNAME_TEXTBOX, &config.username).await? {
        return Err(BotError::LoginFailed("username textbox not found".to_string()));
    }
    tracing::info!("Username keyed in");
    if !dom::fill_textbox_named(page, Sel::PASSWORD_TEXTBOX, &config.password).await? {
        return Err(BotError::LoginFailed("password textbox not found".to_string()));
    }
    if !dom::click_button_named_nth(page, "Login", 1).await?
        && !dom::click_button_named(page, "Login").await?
    {
        return Err(BotError::LoginFailed("login submit not found".to_string()));
    }
    tracing::info!("Password keyed in");

    // The credential modal sometimes stays up while the session settles;
    // a second submit click closes it.
    tokio::time::sleep(Duration::from_millis(5000)).await;
    if let Ok(true) = dom::click_button_named(page, "Login").await {
        tracing::info!("Credential box kept loading, login clicked again");
    }
    wait_stable(page, config.stable_quiet_ms, config.stable_timeout_ms).await;

    if let Ok(true) = dom::click_button_named(page, Sel::SKIP_AD_TEXT).await {
        tracing::info!("Advertisement skipped");
    }

    if !dom::click_button_named(page, Sel::DEPOSIT_BUTTON_TEXT).await? {
        return Err(BotError::LoginFailed("deposit button not found".to_string()));
    }
    tracing::info!("✅ Logged in, deposit page opened");
    wait_stable(page, config.stable_quiet_ms, config.stable_timeout_ms).await;

    // The gateway tiles mount well after network-quiet.
    tokio::time::sleep(Duration::from_millis(10_000)).await;

    Ok(())
}

async fn open_site(page: &Page, base_url: &str, config: &Config) -> Result<(), BotError> {
    for attempt in 1..=OPEN_RETRIES {
        tracing::info!("🌐 Opening website ({}/{}): {}", attempt, OPEN_RETRIES, base_url);
        match page.goto(base_url).await {
            Ok(_) => {
                wait_stable(page, config.stable_quiet_ms, config.page_load_timeout_ms).await;
                tracing::info!("✅ Page loaded");
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("⚠️ Page load failed, retrying: {}", e);
                tokio::time::sleep(Duration::from_millis(2000)).await;
            }
        }
    }
    Err(BotError::LoginFailed(format!(
        "page load failed after {} retries",
        OPEN_RETRIES
    )))
}
