//! Sweep contract: every listed gateway channel ends up with exactly one
//! outcome, manual banks are skipped on both the method and channel level,
//! broken amount forms degrade to Unknown without stopping the walk, and a
//! failed restore aborts the run.

use async_trait::async_trait;
use depobot::classifier::Classification;
use depobot::error::BotError;
use depobot::outcome::{ChannelKey, ChannelOutcome};
use depobot::runner::{sweep, SweepSurface};
use std::collections::HashMap;

#[derive(Clone, Copy)]
enum Verdict {
    ManualBank,
    Success,
    Failed(&'static str),
}

struct ScriptedSweep {
    methods: Vec<(&'static str, Vec<&'static str>)>,
    denylist: Vec<&'static str>,
    verdicts: HashMap<&'static str, Verdict>,
    amount_fail: Vec<&'static str>,
    restore_fails: bool,
    selected_channel: String,
    entered_methods: Vec<String>,
    restores: Vec<(String, String)>,
}

impl ScriptedSweep {
    fn new(methods: Vec<(&'static str, Vec<&'static str>)>) -> Self {
        Self {
            methods,
            denylist: vec!["ธนาคาร", "Bank Transfer"],
            verdicts: HashMap::new(),
            amount_fail: Vec::new(),
            restore_fails: false,
            selected_channel: String::new(),
            entered_methods: Vec::new(),
            restores: Vec::new(),
        }
    }

    fn verdict(mut self, channel: &'static str, verdict: Verdict) -> Self {
        self.verdicts.insert(channel, verdict);
        self
    }

    fn broken_amount_form(mut self, channel: &'static str) -> Self {
        self.amount_fail.push(channel);
        self
    }

    fn failing_restore(mut self) -> Self {
        self.restore_fails = true;
        self
    }
}

#[async_trait]
impl SweepSurface for ScriptedSweep {
    fn is_manual_bank(&self, identity: &str) -> bool {
        self.denylist.iter().any(|bank| identity.contains(bank))
    }

    async fn current_url(&mut self) -> Result<String, BotError> {
        Ok("https://site/deposit".to_string())
    }

    async fn deposit_methods(&mut self) -> Result<Vec<String>, BotError> {
        Ok(self.methods.iter().map(|(m, _)| m.to_string()).collect())
    }

    async fn select_method(&mut self, method: &str) -> Result<(), BotError> {
        self.entered_methods.push(method.to_string());
        Ok(())
    }

    async fn channels(&mut self, method: &str) -> Result<Vec<String>, BotError> {
        let (_, channels) = self
            .methods
            .iter()
            .find(|(m, _)| *m == method)
            .expect("channels queried for an unlisted method");
        Ok(channels.iter().map(|c| c.to_string()).collect())
    }

    async fn select_channel(&mut self, channel: &str) -> Result<(), BotError> {
        self.selected_channel = channel.to_string();
        Ok(())
    }

    async fn read_minimum_amount(&mut self) -> Result<String, BotError> {
        if self.amount_fail.iter().any(|c| *c == self.selected_channel) {
            return Err(BotError::Parse("no minimum amount in range text".to_string()));
        }
        Ok("100".to_string())
    }

    async fn fill_amount(&mut self, _amount: &str) -> Result<(), BotError> {
        Ok(())
    }

    async fn classify_channel(
        &mut self,
        _old_url: &str,
        _method: &str,
        channel: &str,
        _amount: &str,
    ) -> Classification {
        match self.verdicts.get(channel) {
            Some(Verdict::ManualBank) => Classification::Excluded,
            Some(Verdict::Success) => Classification::Classified(ChannelOutcome::success()),
            Some(Verdict::Failed(reason)) => {
                Classification::Classified(ChannelOutcome::failed(*reason))
            }
            None => Classification::Classified(ChannelOutcome::unknown()),
        }
    }

    async fn restore(
        &mut self,
        _old_url: &str,
        _method: &str,
        channel: &str,
        amount: &str,
    ) -> Result<(), BotError> {
        if self.restore_fails {
            return Err(BotError::step("open deposit page", "stale session"));
        }
        self.restores.push((channel.to_string(), amount.to_string()));
        Ok(())
    }
}

#[tokio::test]
async fn every_gateway_channel_gets_exactly_one_outcome() {
    // Five channels listed under the gateway method; one is denylisted and
    // one turns out to be a manual bank, so three outcomes remain.
    let mut surface = ScriptedSweep::new(vec![
        (
            "QR Payment",
            vec![
                "FPAY",
                "ธนาคารกสิกรไทย",
                "SIAM-GATE",
                "TRUE WALLET",
                "GLOBALPAY",
            ],
        ),
        ("ธนาคารออมสิน", vec!["UNREACHED"]),
    ])
    .verdict("FPAY", Verdict::Success)
    .verdict("SIAM-GATE", Verdict::ManualBank)
    .verdict("TRUE WALLET", Verdict::Failed("ขออภัย ไม่สามารถทำรายการได้"));

    let result = sweep(&mut surface).await.unwrap();

    assert_eq!(result.len(), 3);
    assert!(result
        .get(&ChannelKey::new("QR Payment", "FPAY"))
        .unwrap()
        .is_success());
    assert_eq!(
        result
            .get(&ChannelKey::new("QR Payment", "TRUE WALLET"))
            .unwrap()
            .reason(),
        Some("ขออภัย ไม่สามารถทำรายการได้")
    );
    // GLOBALPAY had no decisive signal scripted
    assert_eq!(
        result
            .get(&ChannelKey::new("QR Payment", "GLOBALPAY"))
            .unwrap()
            .reason(),
        Some("unidentified")
    );
    // The manual-bank method was never entered
    assert_eq!(surface.entered_methods, vec!["QR Payment"]);
    assert!(result
        .get(&ChannelKey::new("ธนาคารออมสิน", "UNREACHED"))
        .is_none());
}

#[tokio::test]
async fn restore_runs_after_every_inspected_channel() {
    let mut surface = ScriptedSweep::new(vec![(
        "QR Payment",
        vec!["FPAY", "ธนาคารกสิกรไทย", "SIAM-GATE"],
    )])
    .verdict("FPAY", Verdict::Success)
    .verdict("SIAM-GATE", Verdict::ManualBank);

    sweep(&mut surface).await.unwrap();

    // Denylisted channels are skipped before selection; everything else
    // gets the page restored, manual banks included.
    let restored: Vec<_> = surface.restores.iter().map(|(c, _)| c.as_str()).collect();
    assert_eq!(restored, vec!["FPAY", "SIAM-GATE"]);
}

#[tokio::test]
async fn unreadable_amount_degrades_to_unknown_and_continues() {
    let mut surface = ScriptedSweep::new(vec![("QR Payment", vec!["BADFORM", "FPAY"])])
        .verdict("FPAY", Verdict::Success)
        .broken_amount_form("BADFORM");

    let result = sweep(&mut surface).await.unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(
        result
            .get(&ChannelKey::new("QR Payment", "BADFORM"))
            .unwrap()
            .reason(),
        Some("unidentified")
    );
    assert!(result
        .get(&ChannelKey::new("QR Payment", "FPAY"))
        .unwrap()
        .is_success());
    // The placeholder amount backs the restore when none could be read.
    assert_eq!(
        surface.restores.first().map(|(c, a)| (c.as_str(), a.as_str())),
        Some(("BADFORM", "0"))
    );
}

#[tokio::test]
async fn failed_restore_aborts_the_sweep() {
    let mut surface = ScriptedSweep::new(vec![("QR Payment", vec!["FPAY", "GLOBALPAY"])])
        .verdict("FPAY", Verdict::Success)
        .failing_restore();

    let err = sweep(&mut surface).await.unwrap_err();
    match err {
        BotError::StepFailed { step, .. } => assert_eq!(step, "open deposit page"),
        other => panic!("expected step failure, got {:?}", other),
    }
}
