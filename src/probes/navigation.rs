//! URL-jump detection: trigger the deposit confirmation and watch for a
//! client-side navigation to a processor-hosted payment page, then verify
//! the destination actually finishes loading.

use crate::browser::{wait_for_url_change, wait_stable};
use crate::probes::JumpSignal;
use crate::recovery::{recover, LiveSurface};
use crate::screenshot::ScreenshotStore;
use crate::sites::SiteAdapter;
use chromiumoxide::Page;
use std::time::Duration;

const NAV_CHANGE_TIMEOUT_MS: u64 = 10_000;
const LOAD_RETRIES: u32 = 3;
const LOAD_GRACE_MS: u64 = 10_000;
const LOAD_QUIET_MS: u64 = 1500;
const LOAD_STABLE_TIMEOUT_MS: u64 = 60_000;

#[allow(clippy::too_many_arguments)]
pub async fn probe(
    page: &Page,
    site: &dyn SiteAdapter,
    shots: &ScreenshotStore,
    old_url: &str,
    method: &str,
    channel: &str,
    amount: &str,
) -> JumpSignal {
    if let Err(e) = site.submit_deposit(page).await {
        tracing::warn!("⚠️ Deposit confirmation could not be triggered: {}", e);
        shots.capture(page, method, channel).await;
        return JumpSignal::Stayed;
    }
    tracing::info!("URL jump check: deposit confirmation triggered");

    let new_url = match wait_for_url_change(page, old_url, NAV_CHANGE_TIMEOUT_MS).await {
        Some(url) => url,
        None => {
            tracing::info!("No navigation happened, stays on same page [{}]", old_url);
            shots.capture(page, method, channel).await;
            return JumpSignal::Stayed;
        }
    };
    tracing::info!("Loading into new page [{}]", new_url);

    for retry in 0..LOAD_RETRIES {
        // Processor pages fire trackers for a while; give them a grace
        // period before judging quiescence.
        tokio::time::sleep(Duration::from_millis(LOAD_GRACE_MS)).await;

        if wait_stable(page, LOAD_QUIET_MS, LOAD_STABLE_TIMEOUT_MS).await {
            tracing::info!("✅ New page [{}] loaded successfully", new_url);
            shots.capture(page, method, channel).await;
            return JumpSignal::Loaded;
        }

        tracing::info!(
            "Payment page did not settle, attempt {}/{}",
            retry + 1,
            LOAD_RETRIES
        );

        if retry + 1 == LOAD_RETRIES {
            tracing::info!("❌ Payment page did not load after {} retries", LOAD_RETRIES);
            shots.capture(page, method, channel).await;
            return JumpSignal::FailedLoad;
        }

        let mut surface = LiveSurface::new(page, site);
        if let Err(e) = recover(&mut surface, old_url, method, channel, amount, true).await {
            tracing::warn!("Failed to go back to old page [{}] and retry: {}", old_url, e);
        }
    }

    JumpSignal::FailedLoad
}
