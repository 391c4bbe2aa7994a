use crate::browser::{dom, wait_stable};
use crate::config::Config;
use crate::error::BotError;
use crate::sites::siam212::selectors::Siam212Selectors as Sel;
use chromiumoxide::Page;
use std::sync::Arc;
use std::time::Duration;

const OPEN_RETRIES: u32 = 3;

pub async fn login_to_siam212(
    page: &Page,
    base_url: &str,
    config: Arc<Config>,
) -> Result<(), BotError> {
    open_site(page, base_url, &config).await?;

    // First-visit advertisement, not always shown
    match dom::click_selector(page, Sel::AD_CHECKBOX).await {
        Ok(true) => {
            dom::click_button_named(page, "Close").await.ok();
            tracing::info!("First advertisement dismissed");
        }
        _ => tracing::info!("First advertisement didn't appear"),
    }

    let clicked = dom::click_all_in(
        page,
        Sel::LOGIN_CONTAINER,
        Sel::LOGIN_BUTTON,
        Sel::LOGIN_BUTTON_TEXT,
    )
    .await?;
    if clicked == 0 {
        return Err(BotError::LoginFailed(
            "login button not found in topbar".to_string(),
        ));
    }
    tracing::info!("🔑 Login button(s) clicked: {}", clicked);

    if !dom::fill_textbox_named(page, Sel::USERNAME_TEXTBOX, &config.username).await? {
        return Err(BotError::LoginFailed("username textbox not found".to_string()));
    }
    if !dom::click_selector(page, Sel::LOGIN_SUBMIT).await? {
        return Err(BotError::LoginFailed("next button not found".to_string()));
    }
    tracing::info!("Username keyed in");

    tokio::time::sleep(Duration::from_millis(1000)).await;
    if !dom::fill_textbox_named(page, Sel::OTP_TEXTBOX, &config.password).await? {
        return Err(BotError::LoginFailed("password textbox not found".to_string()));
    }
    tracing::info!("Password keyed in");
    wait_stable(page, config.stable_quiet_ms, config.stable_timeout_ms).await;

    // Post-login advertisement, not always shown
    if let Ok(true) = dom::click_selector(page, Sel::AD_CLOSE_ICON).await {
        tracing::info!("Post-login advertisement closed");
    }

    if dom::click_all_in(page, Sel::WALLET_CONTAINER, Sel::DEPOSIT_TOPBAR, "Deposit").await? == 0 {
        return Err(BotError::LoginFailed(
            "deposit topbar button not found".to_string(),
        ));
    }
    tracing::info!("✅ Logged in, deposit page opened");
    wait_stable(page, config.stable_quiet_ms, config.stable_timeout_ms).await;

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
