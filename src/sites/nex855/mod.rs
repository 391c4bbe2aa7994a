mod login;
mod selectors;

use crate::browser::dom;
use crate::config::Config;
use crate::error::BotError;
use crate::sites::base::SiteAdapter;
use crate::utils::parse_min_from_range;
use async_trait::async_trait;
use chromiumoxide::Page;
use selectors::Nex855Selectors as Sel;
use std::sync::Arc;

pub struct Nex855 {
    config: Arc<Config>,
}

impl Nex855 {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SiteAdapter for Nex855 {
    fn name(&self) -> &'static str {
        "NEX855"
    }

    fn base_url(&self) -> &str {
        "https://www.nex855v1.com/en-th"
    }

    fn report_link(&self) -> (&'static str, &'static str) {
        ("nex855.com", "https://www.nex855.com/en-th")
    }

    async fn login(&self, page: &Page) -> Result<(), BotError> {
        login::login_to_nex855(page, self.base_url(), self.config.clone()).await
    }

    async fn deposit_methods(&self, page: &Page) -> Result<Vec<String>, BotError> {
        let labels = dom::attrs_of(page, Sel::METHOD_BUTTONS, "aria-label").await?;
        Ok(labels.into_iter().filter(|l| !l.is_empty()).collect())
    }

    async fn channels(&self, page: &Page, _method: &str) -> Result<Vec<String>, BotError> {
        let labels = dom::attrs_of(page, Sel::CHANNEL_BUTTONS, "aria-label").await?;
        Ok(labels.into_iter().filter(|l| !l.is_empty()).collect())
    }

    async fn select_method(&self, page: &Page, method: &str) -> Result<(), BotError> {
        if !dom::click_button_named(page, method).await? {
            return Err(BotError::step("select deposit method", method));
        }
        Ok(())
    }

    async fn select_channel(&self, page: &Page, channel: &str) -> Result<(), BotError> {
        if !dom::click_button_named(page, channel).await? {
            return Err(BotError::step("select deposit channel", channel));
        }
        Ok(())
    }

    async fn read_minimum_amount(&self, page: &Page) -> Result<String, BotError> {
        let text = dom::inner_text(page, Sel::AMOUNT_RANGE)
            .await?
            .ok_or_else(|| BotError::step("read amount range", "range element missing"))?;
        tracing::info!("Money input range: [{}]", text.trim());
        parse_min_from_range(&text)
            .ok_or_else(|| BotError::step("read amount range", format!("no minimum in [{}]", text)))
    }

    async fn fill_amount(&self, page: &Page, amount: &str) -> Result<(), BotError> {
        if !dom::fill_placeholder(page, Sel::AMOUNT_PLACEHOLDER, amount).await? {
            return Err(BotError::step("fill amount", "amount input not found"));
        }
        Ok(())
    }

    async fn submit_deposit(&self, page: &Page) -> Result<(), BotError> {
        if !dom::click_button_named_nth(page, Sel::DEPOSIT_BUTTON_TEXT, Sel::SUBMIT_NTH).await? {
            return Err(BotError::step("submit deposit", "deposit button not found"));
        }
        Ok(())
    }
}
