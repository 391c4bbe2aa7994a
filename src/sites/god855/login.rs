use crate::browser::{dom, wait_stable};
use crate::config::Config;
use crate::error::BotError;
use crate::sites::god855::selectors::God855Selectors as Sel;
use chromiumoxide::Page;
use std::sync::Arc;
use std::time::Duration;

const OPEN_RETRIES: u32 = 3;

pub async fn login_to_god855(
    page: &Page,
    base_url: &str,
    config: Arc<Config>,
) -> Result<(), BotError> {
    open_site(page, base_url, &config).await?;

    if let Ok(true) = dom::click_button_named(page, "Close").await {
        tracing::info!("Notification popup closed");
    } else {
        tracing::info!("No notification popup");
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
    tracing::info!("Username keyed in");
    if !dom::fill_textbox_named(page, Sel::PASSWORD_TEXTBOX, &config.password).await? {
        return Err(BotError::LoginFailed("password textbox not found".to_string()));
    }
    tracing::info!("Password keyed in");

    // The submit button mounts late; give the form a moment.
    tokio::time::sleep(Duration::from_millis(2000)).await;
    if !dom::click_selector(page, Sel::LOGIN_SUBMIT).await? {
        return Err(BotError::LoginFailed("submit button not found".to_string()));
    }
    wait_stable(page, config.stable_quiet_ms, config.stable_timeout_ms).await;

    if !dom::click_button_named(page, Sel::POST_LOGIN_CLOSE).await? {
        return Err(BotError::LoginFailed(
            "post-login close button not found".to_string(),
        ));
    }
    dom::click_button_named(page, "Close").await.ok();

    if !dom::click_button_named(page, Sel::DEPOSIT_BUTTON_TEXT).await? {
        return Err(BotError::LoginFailed("deposit button not found".to_string()));
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
