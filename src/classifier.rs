//! Per-channel outcome classification. The checks run in a strict priority
//! order and the first conclusive signal wins; later checks are never
//! invoked once an earlier one decides.

use crate::outcome::ChannelOutcome;
use crate::probes::{JumpSignal, ProbeSignal, ToastSignal};
use async_trait::async_trait;

/// The evidence sources the classifier consults, in priority order. Each
/// probe is free to mutate the page; the classifier only promises not to
/// call a lower-priority probe after a decisive signal.
#[async_trait]
pub trait ChannelProbes: Send {
    /// Manual-transfer detection, checked before anything is submitted.
    async fn manual_bank(&mut self) -> ProbeSignal;

    /// Submit the deposit and watch for a navigation to a payment page.
    async fn url_jump(&mut self) -> JumpSignal;

    /// In-page QR payment code.
    async fn qr_code(&mut self) -> ProbeSignal;

    /// Error toast polling, the last resort.
    async fn toast(&mut self) -> ToastSignal;
}

#[derive(Debug, PartialEq, Eq)]
pub enum Classification {
    /// Manual bank-transfer channel; produces no outcome at all.
    Excluded,
    Classified(ChannelOutcome),
}

const FAILED_LOAD_REASON: &str = "payment page failed load";

/// Run the checks in priority order and classify the channel.
///
/// 1. Manual-bank details present → `Excluded`, nothing is submitted.
/// 2. A URL jump that finishes loading → Success; a jump whose target
///    never loads → Failed.
/// 3. A QR code on the (non-navigated) page → Success.
/// 4. A visible error toast → Failed with the toast text.
/// 5. Anything else → Unknown.
pub async fn classify(probes: &mut dyn ChannelProbes) -> Classification {
    match probes.manual_bank().await {
        ProbeSignal::Present(_) => {
            tracing::info!("Manual bank-transfer channel, skipping");
            return Classification::Excluded;
        }
        ProbeSignal::Error(e) => {
            tracing::warn!("⚠️ Manual-bank check errored: {}", e);
        }
        ProbeSignal::Absent => {}
    }

    match probes.url_jump().await {
        JumpSignal::Loaded => {
            return Classification::Classified(ChannelOutcome::success());
        }
        JumpSignal::FailedLoad => {
            return Classification::Classified(ChannelOutcome::failed(FAILED_LOAD_REASON));
        }
        JumpSignal::Stayed => {}
    }

    match probes.qr_code().await {
        ProbeSignal::Present(n) => {
            tracing::info!("QR code found ({} match(es))", n);
            return Classification::Classified(ChannelOutcome::success());
        }
        ProbeSignal::Error(e) => {
            tracing::warn!("⚠️ QR check errored: {}", e);
        }
        ProbeSignal::Absent => {}
    }

    match probes.toast().await {
        ToastSignal::Shown(text) => {
            Classification::Classified(ChannelOutcome::failed(text))
        }
        ToastSignal::Error(e) => {
            tracing::warn!("⚠️ Toast check errored: {}", e);
            Classification::Classified(ChannelOutcome::unknown())
        }
        ToastSignal::NotShown => Classification::Classified(ChannelOutcome::unknown()),
    }
}
