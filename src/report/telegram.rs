//! Telegram delivery over the Bot HTTP API. Reporting is best effort: a
//! delivery failure is logged and never fails the verification run.

use crate::config::Config;
use crate::outcome::{ChannelKey, ChannelOutcome, RunResult};
use crate::report::escape_md;
use crate::screenshot::ScreenshotStore;
use crate::sites::SiteAdapter;
use std::time::Duration;

const API_BASE: &str = "https://api.telegram.org";

pub struct TelegramReporter {
    client: reqwest::Client,
    token: String,
    chat_id: String,
    retry_max: u32,
    backoff_ms: u64,
}

impl TelegramReporter {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            client,
            token: config.telegram_token.clone(),
            chat_id: config.telegram_chat_id.clone(),
            retry_max: config.delivery_retry_max,
            backoff_ms: config.delivery_backoff_ms,
        }
    }

    /// One message per problem channel, screenshot attached. Successful
    /// channels appear only in the summary.
    pub async fn send_channel_reports(
        &self,
        site: &dyn SiteAdapter,
        result: &RunResult,
        shots: &ScreenshotStore,
    ) {
        for (key, outcome) in result.iter() {
            if outcome.is_success() {
                continue;
            }
            let caption = channel_caption(site, key, outcome);
            let path = shots.path_for(&key.method, &key.channel);
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    self.send_photo_with_retry(bytes, &caption).await;
                }
                Err(e) => {
                    tracing::warn!("⚠️ Screenshot missing for [{}]: {}", key, e);
                    self.send_message_with_retry(&caption, "MarkdownV2").await;
                }
            }
        }
    }

    /// Grouped end-of-run summary: success, failed and unidentified blocks.
    pub async fn send_summary(&self, site: &dyn SiteAdapter, result: &RunResult) {
        let caption = summary_caption(site, result);
        self.send_message_with_retry(&caption, "MarkdownV2").await;
    }

    /// Full-run abort notice, sent when every retry round was lost.
    pub async fn send_aborted(&self, site_name: &str, attempts: u32) {
        let text = aborted_text(site_name, attempts);
        self.send_message_with_retry(&text, "Markdown").await;
    }

    async fn send_message_with_retry(&self, text: &str, parse_mode: &str) {
        let url = format!("{}/bot{}/sendMessage", API_BASE, self.token);
        for attempt in 1..=self.retry_max {
            let response = self
                .client
                .post(&url)
                .form(&[
                    ("chat_id", self.chat_id.as_str()),
                    ("text", text),
                    ("parse_mode", parse_mode),
                    ("disable_web_page_preview", "true"),
                ])
                .send()
                .await;
            if self.delivered(response, attempt, "message").await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(self.backoff_ms)).await;
        }
        tracing::error!("❌ Message not delivered after {} attempts", self.retry_max);
    }

    async fn send_photo_with_retry(&self, bytes: Vec<u8>, caption: &str) {
        let url = format!("{}/bot{}/sendPhoto", API_BASE, self.token);
        for attempt in 1..=self.retry_max {
            let part = reqwest::multipart::Part::bytes(bytes.clone())
                .file_name("payment_page.png")
                .mime_str("image/png")
                .unwrap_or_else(|_| reqwest::multipart::Part::bytes(bytes.clone()));
            let form = reqwest::multipart::Form::new()
                .text("chat_id", self.chat_id.clone())
                .text("caption", caption.to_string())
                .text("parse_mode", "MarkdownV2")
                .part("photo", part);

            let response = self.client.post(&url).multipart(form).send().await;
            if self.delivered(response, attempt, "screenshot").await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(self.backoff_ms)).await;
        }
        tracing::error!("❌ Screenshot not delivered after {} attempts", self.retry_max);
    }

    async fn delivered(
        &self,
        response: Result<reqwest::Response, reqwest::Error>,
        attempt: u32,
        what: &str,
    ) -> bool {
        match response {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!("📨 Telegram {} sent", what);
                true
            }
            Ok(resp) => {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                tracing::warn!(
                    "⚠️ Telegram {} rejected ({}), attempt {}/{}: {}",
                    what,
                    status,
                    attempt,
                    self.retry_max,
                    body
                );
                false
            }
            Err(e) => {
                tracing::warn!(
                    "⚠️ Telegram {} send failed, attempt {}/{}: {}",
                    what,
                    attempt,
                    self.retry_max,
                    e
                );
                false
            }
        }
    }
}

fn aborted_text(site_name: &str, attempts: u32) -> String {
    format!(
        "⚠️ *{} RETRY {} TIMES FAILED*\n\
         OVERALL FLOW CAN'T COMPLETE DUE TO NETWORK ISSUE OR INTERFACE CHANGES \
         IN LOGIN PAGE OR CLOUDFLARE BLOCK\n\
         KINDLY CONTACT PAYMENT TEAM TO CHECK IF ISSUE PERSISTS CONTINUOUSLY IN TWO HOURS",
        site_name, attempts
    )
}

fn status_line(outcome: &ChannelOutcome) -> (&'static str, &'static str) {
    match outcome {
        ChannelOutcome::Success { .. } => ("✅", "deposit success"),
        ChannelOutcome::Failed { .. } => ("❌", "deposit failed"),
        ChannelOutcome::Unknown { .. } => ("❓", "no reason found, check manually"),
    }
}

fn caption_header(site: &dyn SiteAdapter) -> String {
    let (label, url) = site.report_link();
    let mut header = format!(
        "*Subject: Bot Testing Deposit Gateway*  \nURL: [{}]({})\n",
        escape_md(label),
        url
    );
    if let Some(team) = site.team() {
        header.push_str(&format!("TEAM : {}\n", team));
    }
    header
}

fn channel_caption(site: &dyn SiteAdapter, key: &ChannelKey, outcome: &ChannelOutcome) -> String {
    let (emoji, status) = status_line(outcome);
    let timestamp = outcome.at().format("%Y-%m-%d %H:%M:%S").to_string();
    let fail_line = match outcome.reason() {
        Some(reason) => format!("│ **Failed Reason:** `{}`\n", escape_md(reason)),
        None => String::new(),
    };

    format!(
        "{header}\
         ┌─ **Deposit Testing Result** ──────────┐\n\
         │ {emoji} **{status}** \n\
         │  \n\
         │ **PaymentGateway:** `{method}`  \n\
         │ **Channel:** `{channel}`  \n\
         └───────────────────────────┘\n\
         \n\
         **Failed reason**  \n\
         {fail_line}\n\
         **Time Detail**  \n\
         ├─ **TimeOccurred:** `{timestamp}`",
        header = caption_header(site),
        emoji = emoji,
        status = status,
        method = escape_md(&key.method),
        channel = escape_md(&key.channel),
        fail_line = fail_line,
        timestamp = escape_md(&timestamp),
    )
}

fn block(title: &str, records: &[(String, String)]) -> String {
    if records.is_empty() {
        return String::new();
    }
    let items: Vec<String> = records
        .iter()
        .map(|(m, c)| format!("│ **• Method:{}**  \n│   ├─ Channel:{}  \n│", m, c))
        .collect();
    format!(
        "┌─ {} **Result** ────────────┐\n{}\n└───────────────────────────┘\n",
        title,
        items.join("\n")
    )
}

fn summary_caption(site: &dyn SiteAdapter, result: &RunResult) -> String {
    let mut succeeded = Vec::new();
    let mut failed = Vec::new();
    let mut unknown = Vec::new();

    for (key, outcome) in result.iter() {
        let record = (escape_md(&key.method), escape_md(&key.channel));
        match outcome {
            ChannelOutcome::Success { .. } => succeeded.push(record),
            ChannelOutcome::Failed { .. } => failed.push(record),
            ChannelOutcome::Unknown { .. } => unknown.push(record),
        }
    }

    let (label, url) = site.report_link();
    let time = crate::outcome::bangkok_now()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    let mut caption = format!(
        "*Deposit Payment Gateway Testing Result Summary *  \nURL: [{}]({})\n",
        escape_md(label),
        url
    );
    if let Some(team) = site.team() {
        caption.push_str(&format!("TEAM : {}\n", team));
    }
    caption.push_str(&format!("TIME: {}\n\n", escape_md(&time)));
    caption.push_str(&block("✅ Success", &succeeded));
    caption.push_str(&block("❌ Failed", &failed));
    caption.push_str(&block("❓ Unidentified", &unknown));
    caption
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::ChannelKey;

    struct FakeSite;

    #[async_trait::async_trait]
    impl SiteAdapter for FakeSite {
        fn name(&self) -> &'static str {
            "FAKE"
        }
        fn base_url(&self) -> &str {
            "https://example.com"
        }
        fn report_link(&self) -> (&'static str, &'static str) {
            ("fake.com", "https://example.com")
        }
        fn team(&self) -> Option<&'static str> {
            Some("F1T")
        }
        async fn login(&self, _: &chromiumoxide::Page) -> Result<(), crate::error::BotError> {
            unimplemented!()
        }
        async fn deposit_methods(
            &self,
            _: &chromiumoxide::Page,
        ) -> Result<Vec<String>, crate::error::BotError> {
            unimplemented!()
        }
        async fn channels(
            &self,
            _: &chromiumoxide::Page,
            _: &str,
        ) -> Result<Vec<String>, crate::error::BotError> {
            unimplemented!()
        }
        async fn select_method(
            &self,
            _: &chromiumoxide::Page,
            _: &str,
        ) -> Result<(), crate::error::BotError> {
            unimplemented!()
        }
        async fn select_channel(
            &self,
            _: &chromiumoxide::Page,
            _: &str,
        ) -> Result<(), crate::error::BotError> {
            unimplemented!()
        }
        async fn read_minimum_amount(
            &self,
            _: &chromiumoxide::Page,
        ) -> Result<String, crate::error::BotError> {
            unimplemented!()
        }
        async fn fill_amount(
            &self,
            _: &chromiumoxide::Page,
            _: &str,
        ) -> Result<(), crate::error::BotError> {
            unimplemented!()
        }
        async fn submit_deposit(
            &self,
            _: &chromiumoxide::Page,
        ) -> Result<(), crate::error::BotError> {
            unimplemented!()
        }
    }

    #[test]
    fn failed_caption_carries_reason_and_escapes() {
        let key = ChannelKey::new("เติมเงินผ่าน QR", "FPAY-CRYPTO");
        let outcome = ChannelOutcome::failed("amount.too_low!");
        let caption = channel_caption(&FakeSite, &key, &outcome);

        assert!(caption.contains("❌ **deposit failed**"));
        assert!(caption.contains("FPAY\\-CRYPTO"));
        assert!(caption.contains("amount\\.too\\_low\\!"));
        assert!(caption.contains("TEAM : F1T"));
    }

    #[test]
    fn success_caption_has_no_failed_reason_line() {
        let key = ChannelKey::new("QR", "GLOBALPAY");
        let caption = channel_caption(&FakeSite, &key, &ChannelOutcome::success());
        assert!(!caption.contains("**Failed Reason:**"));
        assert!(caption.contains("✅ **deposit success**"));
    }

    #[test]
    fn summary_groups_by_outcome() {
        let mut result = RunResult::new();
        result.insert(ChannelKey::new("QR", "A"), ChannelOutcome::success());
        result.insert(ChannelKey::new("QR", "B"), ChannelOutcome::failed("toast"));
        result.insert(ChannelKey::new("QR", "C"), ChannelOutcome::unknown());

        let summary = summary_caption(&FakeSite, &result);
        assert!(summary.contains("✅ Success"));
        assert!(summary.contains("❌ Failed"));
        assert!(summary.contains("❓ Unidentified"));
        assert!(summary.contains("Channel:A"));
        assert!(summary.contains("Channel:B"));
        assert!(summary.contains("Channel:C"));
    }

    #[test]
    fn abort_notice_names_the_configured_retry_bound() {
        let text = aborted_text("GOD855", 5);
        assert!(text.contains("GOD855 RETRY 5 TIMES FAILED"));
    }

    #[test]
    fn empty_blocks_are_omitted() {
        let mut result = RunResult::new();
        result.insert(ChannelKey::new("QR", "A"), ChannelOutcome::success());
        let summary = summary_caption(&FakeSite, &result);
        assert!(!summary.contains("❌ Failed"));
        assert!(!summary.contains("❓ Unidentified"));
    }
}
