//! Manual bank-transfer detection. Some channels are offline bank transfers
//! miscategorized as gateways; they render account-detail labels instead of
//! starting a payment flow and must be excluded from classification.

use crate::browser::dom;
use crate::probes::ProbeSignal;
use chromiumoxide::Page;

const INFO_LABELS: &str = "div.deposit_information_content_labels";
const MARKER: &str = "Bank Name";

pub async fn probe(page: &Page) -> ProbeSignal {
    match dom::inner_texts(page, INFO_LABELS).await {
        Ok(texts) => {
            for text in &texts {
                tracing::debug!("Info label text: {}", text);
                if text.contains(MARKER) {
                    tracing::info!("Manual bank text found: {}", text);
                    return ProbeSignal::Present(1);
                }
            }
            tracing::debug!("No manual bank text in {} labels", texts.len());
            ProbeSignal::Absent
        }
        Err(e) => ProbeSignal::Error(e.to_string()),
    }
}
