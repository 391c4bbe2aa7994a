//! `ChannelProbes` over the live browser page. Each probe delegates the
//! control-level clicks to the site adapter and the detection to the
//! specialized probe modules.

use crate::classifier::ChannelProbes;
use crate::error::BotError;
use crate::probes::{manual_bank, navigation, qr, toast, JumpSignal, ProbeSignal, ToastSignal};
use crate::screenshot::ScreenshotStore;
use crate::sites::SiteAdapter;
use async_trait::async_trait;
use chromiumoxide::Page;

pub struct LiveProbes<'a> {
    page: &'a Page,
    site: &'a dyn SiteAdapter,
    shots: &'a ScreenshotStore,
    old_url: String,
    method: String,
    channel: String,
    amount: String,
}

impl<'a> LiveProbes<'a> {
    pub fn new(
        page: &'a Page,
        site: &'a dyn SiteAdapter,
        shots: &'a ScreenshotStore,
        old_url: impl Into<String>,
        method: impl Into<String>,
        channel: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            page,
            site,
            shots,
            old_url: old_url.into(),
            method: method.into(),
            channel: channel.into(),
            amount: amount.into(),
        }
    }

    /// Re-select the channel and re-key the amount so the toast check runs
    /// against a freshly triggered confirmation.
    async fn rearm(&self) -> Result<(), BotError> {
        self.site.select_method(self.page, &self.method).await?;
        self.site.select_channel(self.page, &self.channel).await?;
        self.site.fill_amount(self.page, &self.amount).await?;
        self.site.submit_deposit(self.page).await?;
        Ok(())
    }
}

#[async_trait]
impl ChannelProbes for LiveProbes<'_> {
    async fn manual_bank(&mut self) -> ProbeSignal {
        manual_bank::probe(self.page).await
    }

    async fn url_jump(&mut self) -> JumpSignal {
        navigation::probe(
            self.page,
            self.site,
            self.shots,
            &self.old_url,
            &self.method,
            &self.channel,
            &self.amount,
        )
        .await
    }

    async fn qr_code(&mut self) -> ProbeSignal {
        qr::probe(self.page).await
    }

    async fn toast(&mut self) -> ToastSignal {
        if let Err(e) = self.rearm().await {
            return ToastSignal::Error(e.to_string());
        }
        let signal = toast::poll(self.page).await;
        if let ToastSignal::Shown(_) = &signal {
            self.shots.capture(self.page, &self.method, &self.channel).await;
        }
        signal
    }
}
