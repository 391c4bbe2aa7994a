//! Per-site verification sweep: walk every deposit method and channel the
//! site lists, classify each one, and restore the deposit page between
//! channels so each check starts clean.

use crate::browser::dom;
use crate::classifier::{classify, Classification};
use crate::error::BotError;
use crate::outcome::{ChannelKey, ChannelOutcome, RunResult};
use crate::probes::LiveProbes;
use crate::recovery::{recover, LiveSurface};
use crate::screenshot::ScreenshotStore;
use crate::sites::{is_excluded, SiteAdapter};
use async_trait::async_trait;
use chromiumoxide::Page;

/// The sweep's view of a site under test. Everything the method/channel
/// walk needs goes through here so the walk itself carries no browser
/// state.
#[async_trait]
pub trait SweepSurface: Send {
    /// Denylist check for manual-bank methods and channels.
    fn is_manual_bank(&self, identity: &str) -> bool;

    async fn current_url(&mut self) -> Result<String, BotError>;

    async fn deposit_methods(&mut self) -> Result<Vec<String>, BotError>;

    async fn select_method(&mut self, method: &str) -> Result<(), BotError>;

    async fn channels(&mut self, method: &str) -> Result<Vec<String>, BotError>;

    async fn select_channel(&mut self, channel: &str) -> Result<(), BotError>;

    async fn read_minimum_amount(&mut self) -> Result<String, BotError>;

    async fn fill_amount(&mut self, amount: &str) -> Result<(), BotError>;

    /// Drive the selected channel to a decision.
    async fn classify_channel(
        &mut self,
        old_url: &str,
        method: &str,
        channel: &str,
        amount: &str,
    ) -> Classification;

    /// Bring the deposit page back to the given method/channel selection.
    async fn restore(
        &mut self,
        old_url: &str,
        method: &str,
        channel: &str,
        amount: &str,
    ) -> Result<(), BotError>;
}

pub async fn run_site(
    site: &dyn SiteAdapter,
    page: &Page,
    shots: &ScreenshotStore,
) -> Result<RunResult, BotError> {
    let mut live = LiveSweep { site, page, shots };
    sweep(&mut live).await
}

/// Walk every listed method and channel, skipping manual banks, and
/// collect one outcome per gateway channel.
pub async fn sweep(surface: &mut dyn SweepSurface) -> Result<RunResult, BotError> {
    let mut result = RunResult::new();

    let methods = surface.deposit_methods().await?;
    tracing::info!("Found [{}] deposit methods", methods.len());

    for method in &methods {
        if surface.is_manual_bank(method) {
            tracing::info!("Deposit method [{}] is not a payment gateway, skipping", method);
            continue;
        }

        let old_url = surface.current_url().await?;
        surface.select_method(method).await?;
        tracing::info!("💳 Deposit method [{}] selected, page [{}]", method, old_url);

        let channels = surface.channels(method).await?;
        tracing::info!(
            "Found [{}] deposit channels for method [{}]",
            channels.len(),
            method
        );

        for channel in &channels {
            if surface.is_manual_bank(channel) {
                tracing::info!(
                    "Deposit channel [{}] is not a payment gateway, skipping",
                    channel
                );
                continue;
            }

            surface.select_channel(channel).await?;
            tracing::info!("Deposit channel [{}] selected", channel);

            let key = ChannelKey::new(method.clone(), channel.clone());

            // A broken amount form means the channel can't be driven to a
            // decision; record that rather than abort the sweep.
            let amount = match surface.read_minimum_amount().await {
                Ok(amount) => amount,
                Err(e) => {
                    tracing::warn!("⚠️ Minimum amount unreadable for [{}]: {}", key, e);
                    result.insert(key, ChannelOutcome::unknown());
                    surface.restore(&old_url, method, channel, "0").await?;
                    continue;
                }
            };
            tracing::info!("Minimum input amount to test: [{}]", amount);

            if let Err(e) = surface.fill_amount(&amount).await {
                tracing::warn!("⚠️ Amount not keyed in for [{}]: {}", key, e);
                result.insert(key, ChannelOutcome::unknown());
                surface.restore(&old_url, method, channel, &amount).await?;
                continue;
            }

            match surface.classify_channel(&old_url, method, channel, &amount).await {
                Classification::Excluded => {
                    tracing::info!(
                        "Deposit channel [{}] is not a payment gateway, skipping",
                        channel
                    );
                }
                Classification::Classified(outcome) => {
                    log_outcome(&key, &outcome);
                    result.insert(key, outcome);
                }
            }

            surface.restore(&old_url, method, channel, &amount).await?;
        }
    }

    Ok(result)
}

struct LiveSweep<'a> {
    site: &'a dyn SiteAdapter,
    page: &'a Page,
    shots: &'a ScreenshotStore,
}

#[async_trait]
impl SweepSurface for LiveSweep<'_> {
    fn is_manual_bank(&self, identity: &str) -> bool {
        is_excluded(identity, self.site.excluded_banks())
    }

    async fn current_url(&mut self) -> Result<String, BotError> {
        dom::current_url(self.page).await
    }

    async fn deposit_methods(&mut self) -> Result<Vec<String>, BotError> {
        self.site.deposit_methods(self.page).await
    }

    async fn select_method(&mut self, method: &str) -> Result<(), BotError> {
        self.site.select_method(self.page, method).await
    }

    async fn channels(&mut self, method: &str) -> Result<Vec<String>, BotError> {
        self.site.channels(self.page, method).await
    }

    async fn select_channel(&mut self, channel: &str) -> Result<(), BotError> {
        self.site.select_channel(self.page, channel).await
    }

    async fn read_minimum_amount(&mut self) -> Result<String, BotError> {
        self.site.read_minimum_amount(self.page).await
    }

    async fn fill_amount(&mut self, amount: &str) -> Result<(), BotError> {
        self.site.fill_amount(self.page, amount).await
    }

    async fn classify_channel(
        &mut self,
        old_url: &str,
        method: &str,
        channel: &str,
        amount: &str,
    ) -> Classification {
        let mut probes = LiveProbes::new(
            self.page,
            self.site,
            self.shots,
            old_url.to_string(),
            method,
            channel,
            amount,
        );
        classify(&mut probes).await
    }

    // Recovery between channels is load-bearing: if the deposit page can't
    // be restored, every later channel would be judged against a stale
    // page, so the failure aborts the sweep.
    async fn restore(
        &mut self,
        old_url: &str,
        method: &str,
        channel: &str,
        amount: &str,
    ) -> Result<(), BotError> {
        let mut surface = LiveSurface::new(self.page, self.site);
        recover(&mut surface, old_url, method, channel, amount, false).await
    }
}

fn log_outcome(key: &ChannelKey, outcome: &ChannelOutcome) {
    match outcome {
        ChannelOutcome::Success { .. } => {
            tracing::info!("✅ [{}] deposit success", key);
        }
        ChannelOutcome::Failed { reason, .. } => {
            tracing::info!("❌ [{}] deposit failed: {}", key, reason);
        }
        ChannelOutcome::Unknown { reason, .. } => {
            tracing::warn!("❓ [{}] {}", key, reason);
        }
    }
}
