//! Session recovery: after a probe cycle has mutated the live page (clicked,
//! submitted, possibly navigated away), restore a known deposit-page state so
//! the next channel starts clean.

use crate::browser::wait_stable;
use crate::error::BotError;
use crate::sites::SiteAdapter;
use async_trait::async_trait;
use chromiumoxide::Page;
use std::time::Duration;

const NAV_ATTEMPTS: u32 = 2;
const SETTLE_QUIET_MS: u64 = 1500;
const SETTLE_TIMEOUT_MS: u64 = 30_000;

/// The page operations recovery depends on, separated from the live browser
/// so the re-entry sequence can be exercised against recorded state.
#[async_trait]
pub trait DepositSurface: Send {
    /// Navigate back to `url`. `Ok(false)` means the navigation completed
    /// with a non-OK response; callers treat the page as usable anyway once
    /// it stabilizes.
    async fn reload(&mut self, url: &str) -> Result<bool, BotError>;

    /// Wait for network quiescence, best effort.
    async fn settle(&mut self) -> bool;

    async fn select_method(&mut self, method: &str) -> Result<(), BotError>;
    async fn select_channel(&mut self, channel: &str) -> Result<(), BotError>;
    async fn fill_amount(&mut self, amount: &str) -> Result<(), BotError>;
    async fn submit(&mut self) -> Result<(), BotError>;
}

/// Re-enter the deposit page and restore the (method, channel, amount)
/// selection. With `re_submit` the deposit confirmation is triggered again
/// at the end. Each step failure carries the failing step's name.
pub async fn recover(
    surface: &mut dyn DepositSurface,
    old_url: &str,
    method: &str,
    channel: &str,
    amount: &str,
    re_submit: bool,
) -> Result<(), BotError> {
    for attempt in 1..=NAV_ATTEMPTS {
        tracing::info!(
            "🔁 Re-entering deposit page, attempt {}/{}: {}",
            attempt,
            NAV_ATTEMPTS,
            old_url
        );
        match surface.reload(old_url).await {
            Ok(true) => {
                surface.settle().await;
                tracing::info!("✅ Deposit page reloaded");
                break;
            }
            Ok(false) => {
                // Some sites soft-redirect with a non-200; stable is enough.
                tracing::warn!("⚠️ Navigation response not OK");
                surface.settle().await;
            }
            Err(e) => {
                tracing::warn!("⚠️ Deposit page reload failed: {}", e);
            }
        }
    }

    surface.select_method(method).await?;
    tracing::info!("Re-enter: deposit method [{}] selected", method);

    surface.select_channel(channel).await?;
    tracing::info!("Re-enter: deposit channel [{}] selected", channel);

    surface.fill_amount(amount).await?;
    tracing::info!("Re-enter: minimum amount [{}] keyed in", amount);

    if re_submit {
        surface.submit().await?;
        tracing::info!("Re-enter: deposit confirmation re-triggered");
    }

    Ok(())
}

/// `DepositSurface` over the live browser page, delegating the control-level
/// steps to the site adapter.
pub struct LiveSurface<'a> {
    page: &'a Page,
    site: &'a dyn SiteAdapter,
}

impl<'a> LiveSurface<'a> {
    pub fn new(page: &'a Page, site: &'a dyn SiteAdapter) -> Self {
        Self { page, site }
    }
}

#[async_trait]
impl DepositSurface for LiveSurface<'_> {
    async fn reload(&mut self, url: &str) -> Result<bool, BotError> {
        match self.page.goto(url).await {
            Ok(_) => {
                tokio::time::sleep(Duration::from_millis(2000)).await;
                Ok(true)
            }
            Err(e) => {
                tracing::warn!("⚠️ goto {} failed: {}", url, e);
                Ok(false)
            }
        }
    }

    async fn settle(&mut self) -> bool {
        wait_stable(self.page, SETTLE_QUIET_MS, SETTLE_TIMEOUT_MS).await
    }

    async fn select_method(&mut self, method: &str) -> Result<(), BotError> {
        self.site.select_method(self.page, method).await
    }

    async fn select_channel(&mut self, channel: &str) -> Result<(), BotError> {
        self.site.select_channel(self.page, channel).await
    }

    async fn fill_amount(&mut self, amount: &str) -> Result<(), BotError> {
        self.site.fill_amount(self.page, amount).await
    }

    async fn submit(&mut self) -> Result<(), BotError> {
        self.site.submit_deposit(self.page).await
    }
}
