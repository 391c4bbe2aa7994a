use crate::error::BotError;
use async_trait::async_trait;
use chromiumoxide::Page;

/// Known manual/offline bank-transfer labels. Channels (or methods) whose
/// identity contains any of these are not payment gateways and are skipped.
pub const DEFAULT_EXCLUDED_BANKS: &[&str] = &[
    "Government Savings Bank",
    "Government Saving Bank",
    "ธนาคารออมสิน",
    "ธนาคารกสิกรไทย",
    "ธนาคารไทยพาณิชย์",
    "ธนาคาร",
    "กสิกรไทย",
];

pub fn is_excluded(identity: &str, denylist: &[&str]) -> bool {
    denylist.iter().any(|bank| identity.contains(bank))
}

/// One gambling site's deposit surface. The outcome classifier, probes and
/// session recovery are written once against this interface; each site
/// supplies the selector-level implementation.
#[async_trait]
pub trait SiteAdapter: Send + Sync {
    /// Site identifier, e.g. "SIAM212". Uppercase, used in artifact names.
    fn name(&self) -> &'static str;

    fn base_url(&self) -> &str;

    /// (display label, link target) used in report captions. The label is
    /// the marketing domain, which may differ from the mirror under test.
    fn report_link(&self) -> (&'static str, &'static str);

    /// Operator team tag shown in report captions, when one exists.
    fn team(&self) -> Option<&'static str> {
        None
    }

    fn excluded_banks(&self) -> &[&str] {
        DEFAULT_EXCLUDED_BANKS
    }

    /// Authenticate and leave the page positioned at the deposit-method
    /// listing.
    async fn login(&self, page: &Page) -> Result<(), BotError>;

    /// Identities of the deposit methods currently listed.
    async fn deposit_methods(&self, page: &Page) -> Result<Vec<String>, BotError>;

    /// Identities of the channels available under `method`. The method must
    /// already be selected.
    async fn channels(&self, page: &Page, method: &str) -> Result<Vec<String>, BotError>;

    async fn select_method(&self, page: &Page, method: &str) -> Result<(), BotError>;

    async fn select_channel(&self, page: &Page, channel: &str) -> Result<(), BotError>;

    /// Minimum deposit amount as entered into the amount field (no grouping
    /// separators).
    async fn read_minimum_amount(&self, page: &Page) -> Result<String, BotError>;

    async fn fill_amount(&self, page: &Page, amount: &str) -> Result<(), BotError>;

    /// Trigger the deposit confirmation for the selected channel.
    async fn submit_deposit(&self, page: &Page) -> Result<(), BotError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thai_bank_names_are_excluded() {
        assert!(is_excluded("ธนาคารออมสิน", DEFAULT_EXCLUDED_BANKS));
        assert!(is_excluded(
            "Government Savings Bank",
            DEFAULT_EXCLUDED_BANKS
        ));
        // Substring match, not equality
        assert!(is_excluded("โอน ธนาคารออมสิน 01", DEFAULT_EXCLUDED_BANKS));
    }

    #[test]
    fn gateways_are_not_excluded() {
        assert!(!is_excluded("FPAY-CRYPTO", DEFAULT_EXCLUDED_BANKS));
        assert!(!is_excluded("GLOBALPAY", DEFAULT_EXCLUDED_BANKS));
    }
}
