//! Network quiescence detection.
//!
//! A page is considered stable once either no network activity was ever
//! observed, or the time since the last request start/finish/fail event
//! exceeds the quiet window. The CDP event subscription lives only for the
//! duration of one `wait_stable` call and is torn down on every exit path,
//! including timeout and cancellation.

use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams, EventLoadingFailed, EventLoadingFinished, EventRequestWillBeSent,
};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::stream::{BoxStream, SelectAll};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::time::Instant;

const POLL_INTERVAL_MS: u64 = 200;
const SETTLE_MS: u64 = 300;

/// Merged stream of the page's network activity events, torn down on drop.
pub struct NetworkSubscription {
    events: SelectAll<BoxStream<'static, ()>>,
    on_teardown: Option<Box<dyn FnOnce() + Send>>,
}

impl NetworkSubscription {
    pub async fn attach(page: &Page) -> Result<Self, CdpError> {
        page.execute(EnableParams::default()).await?;

        let started = page
            .event_listener::<EventRequestWillBeSent>()
            .await?
            .map(|_| ())
            .boxed();
        let finished = page
            .event_listener::<EventLoadingFinished>()
            .await?
            .map(|_| ())
            .boxed();
        let failed = page
            .event_listener::<EventLoadingFailed>()
            .await?
            .map(|_| ())
            .boxed();

        Ok(Self {
            events: futures::stream::select_all([started, finished, failed]),
            on_teardown: None,
        })
    }

    /// Build a subscription from an arbitrary event stream, with an explicit
    /// teardown hook. Used by tests to observe the teardown contract.
    pub fn from_stream(
        stream: BoxStream<'static, ()>,
        on_teardown: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            events: futures::stream::select_all([stream]),
            on_teardown: Some(Box::new(on_teardown)),
        }
    }
}

impl Drop for NetworkSubscription {
    fn drop(&mut self) {
        if let Some(teardown) = self.on_teardown.take() {
            teardown();
        }
    }
}

/// Subscribe to the page's network events and wait until it goes quiet.
///
/// Returns `true` once no activity at all has been seen, or once
/// `min_quiet_ms` elapsed since the last event. Returns `false` when
/// `timeout_ms` lapses first; callers proceed best-effort either way.
pub async fn wait_stable(page: &Page, min_quiet_ms: u64, timeout_ms: u64) -> bool {
    let sub = match NetworkSubscription::attach(page).await {
        Ok(sub) => sub,
        Err(e) => {
            tracing::warn!("⚠️ Network event subscription failed: {}", e);
            return false;
        }
    };
    wait_stable_on(sub, min_quiet_ms, timeout_ms).await
}

/// Core polling loop, separated from the live CDP attachment so the timing
/// and teardown behavior can be exercised with injected event streams.
pub async fn wait_stable_on(
    mut sub: NetworkSubscription,
    min_quiet_ms: u64,
    timeout_ms: u64,
) -> bool {
    let start = Instant::now();
    let mut seen: u64 = 0;
    let mut last_event = start;

    loop {
        // Drain whatever arrived since the previous poll without blocking.
        while let Some(Some(())) = sub.events.next().now_or_never() {
            seen += 1;
            last_event = Instant::now();
        }

        if seen == 0 || last_event.elapsed() >= Duration::from_millis(min_quiet_ms) {
            tokio::time::sleep(Duration::from_millis(SETTLE_MS)).await;
            return true;
        }

        if start.elapsed() >= Duration::from_millis(timeout_ms) {
            tracing::warn!("⚠️ Page did not reach network-quiet within {}ms", timeout_ms);
            return false;
        }

        tokio::time::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
}
