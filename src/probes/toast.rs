//! Transient status-message detection. Absence after the polling budget is
//! a normal result, not an error.

use crate::browser::dom;
use crate::probes::ToastSignal;
use chromiumoxide::Page;
use std::time::Duration;

const TOAST_SELECTOR: &str = "div.toast-message.text-sm";
const POLL_ROUNDS: u32 = 20;
const POLL_SLEEP_MS: u64 = 500;

/// Poll for a toast element and capture its text on first appearance.
pub async fn poll(page: &Page) -> ToastSignal {
    for round in 0..POLL_ROUNDS {
        match dom::inner_text(page, TOAST_SELECTOR).await {
            Ok(Some(text)) => {
                let text = text.trim();
                if !text.is_empty() {
                    tracing::info!("Toast detected after {} polls: [{}]", round + 1, text);
                    return ToastSignal::Shown(text.to_string());
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("⚠️ Toast probe error: {}", e);
                return ToastSignal::Error(e.to_string());
            }
        }
        tokio::time::sleep(Duration::from_millis(POLL_SLEEP_MS)).await;
    }

    tracing::info!("No toast message within polling budget");
    ToastSignal::NotShown
}
