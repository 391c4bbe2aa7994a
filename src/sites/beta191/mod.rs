mod login;
mod selectors;

use crate::browser::dom;
use crate::config::Config;
use crate::error::BotError;
use crate::sites::base::SiteAdapter;
use crate::utils::{parse_min_decimal, parse_min_from_placeholder};
use async_trait::async_trait;
use chromiumoxide::Page;
use selectors::Beta191Selectors as Sel;
use std::sync::Arc;

/// This layout carries its extra manual-transfer tiles under a plain "Bank"
/// stem on top of the shared Thai labels.
const EXCLUDED_BANKS: &[&str] = &[
    "Bank",
    "Government Savings Bank",
    "Government Saving Bank",
    "ธนาคารออมสิน",
    "ธนาคารกสิกรไทย",
    "ธนาคารไทยพาณิชย์",
    "ธนาคาร",
    "กสิกรไทย",
];

pub struct Beta191 {
    config: Arc<Config>,
}

impl Beta191 {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Tile image srcs in DOM order; each identifies one gateway.
    async fn tile_srcs(&self, page: &Page) -> Result<Vec<String>, BotError> {
        let css = format!("{} {} img", Sel::METHOD_CONTAINER, Sel::METHOD_TILES);
        dom::attrs_of(page, &css, "src").await
    }

    async fn tile_index(&self, page: &Page, method: &str) -> Result<Option<usize>, BotError> {
        let srcs = self.tile_srcs(page).await?;
        Ok(srcs.iter().position(|src| method_stem(src) == method))
    }
}

/// ".../bank_image2/fpay_crypto.png?v=123" → "fpay-crypto". Underscores are
/// normalized so the stem matches the gateway name the processor fans out
/// to on other sites.
fn method_stem(src: &str) -> String {
    src.rsplit('/')
        .next()
        .unwrap_or(src)
        .split('.')
        .next()
        .unwrap_or("")
        .replace('_', "-")
}

#[async_trait]
impl SiteAdapter for Beta191 {
    fn name(&self) -> &'static str {
        "BETA191"
    }

    fn base_url(&self) -> &str {
        "https://www.beta191.co/en-th/"
    }

    fn report_link(&self) -> (&'static str, &'static str) {
        ("beta191.co", "https://www.beta191.co/en-th")
    }

    fn team(&self) -> Option<&'static str> {
        Some("B1T")
    }

    fn excluded_banks(&self) -> &[&str] {
        EXCLUDED_BANKS
    }

    async fn login(&self, page: &Page) -> Result<(), BotError> {
        login::login_to_beta191(page, self.base_url(), self.config.clone()).await
    }

    async fn deposit_methods(&self, page: &Page) -> Result<Vec<String>, BotError> {
        let srcs = self.tile_srcs(page).await?;
        if srcs.is_empty() {
            return Err(BotError::step(
                "discover deposit methods",
                "gateway tile scrollbar not located",
            ));
        }
        Ok(srcs.iter().map(|src| method_stem(src)).collect())
    }

    /// One channel per tile; its title span names the gateway.
    async fn channels(&self, page: &Page, method: &str) -> Result<Vec<String>, BotError> {
        let index = self
            .tile_index(page, method)
            .await?
            .ok_or_else(|| BotError::step("discover deposit channels", method))?;
        let css = format!("{} {}", Sel::METHOD_CONTAINER, Sel::METHOD_TILES);
        let titles = dom::inner_texts(page, &format!("{} {}", css, Sel::CHANNEL_TITLE)).await?;
        match titles.get(index) {
            Some(title) if !title.trim().is_empty() => Ok(vec![title.trim().to_string()]),
            _ => Ok(vec![method.to_string()]),
        }
    }

    async fn select_method(&self, page: &Page, method: &str) -> Result<(), BotError> {
        let index = self
            .tile_index(page, method)
            .await?
            .ok_or_else(|| BotError::step("select deposit method", method))?;
        let css = format!("{} {}", Sel::METHOD_CONTAINER, Sel::METHOD_TILES);
        if !dom::click_selector_nth(page, &css, index).await? {
            return Err(BotError::step("select deposit method", method));
        }
        Ok(())
    }

    /// The tile click already commits the channel; there is no second pick.
    async fn select_channel(&self, _page: &Page, _channel: &str) -> Result<(), BotError> {
        Ok(())
    }

    async fn read_minimum_amount(&self, page: &Page) -> Result<String, BotError> {
        if let Some(text) = dom::inner_text(page, Sel::AMOUNT_RANGE).await? {
            tracing::info!("Money input range: [{}]", text.trim());
            if let Some(min) = parse_min_decimal(&text) {
                return Ok(min);
            }
        }
        // Older layout keeps the range in the input's placeholder
        let placeholders = dom::attrs_of(page, Sel::AMOUNT_INPUT_FALLBACK, "placeholder").await?;
        placeholders
            .first()
            .and_then(|p| parse_min_from_placeholder(p))
            .ok_or_else(|| BotError::step("read amount range", "no minimum amount found"))
    }

    async fn fill_amount(&self, page: &Page, amount: &str) -> Result<(), BotError> {
        if dom::fill_selector(page, Sel::AMOUNT_INPUT, amount).await?
            || dom::fill_selector(page, Sel::AMOUNT_INPUT_FALLBACK, amount).await?
        {
            return Ok(());
        }
        Err(BotError::step("fill amount", "amount input not found"))
    }

    async fn submit_deposit(&self, page: &Page) -> Result<(), BotError> {
        if !dom::click_selector(page, Sel::SUBMIT_BUTTON).await? {
            return Err(BotError::step("submit deposit", "deposit button not found"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_stem_normalizes_image_name() {
        assert_eq!(
            method_stem("https://cdn.example/bank_image2/promptpay.png?v=1760607913821"),
            "promptpay"
        );
        assert_eq!(
            method_stem("https://cdn.example/bank_image2/fpay_crypto.png"),
            "fpay-crypto"
        );
    }

    #[test]
    fn plain_bank_tiles_are_excluded() {
        use crate::sites::base::is_excluded;
        assert!(is_excluded("Bank Transfer", EXCLUDED_BANKS));
        assert!(!is_excluded("CYPAY", EXCLUDED_BANKS));
    }
}
