//! Outcome classification priority tests: the first conclusive signal wins
//! and later checks must not run at all.

use async_trait::async_trait;
use depobot::classifier::{classify, ChannelProbes, Classification};
use depobot::outcome::ChannelOutcome;
use depobot::probes::{JumpSignal, ProbeSignal, ToastSignal};

#[derive(Default)]
struct Calls {
    manual_bank: u32,
    url_jump: u32,
    qr_code: u32,
    toast: u32,
}

struct ScriptedProbes {
    manual_bank: ProbeSignal,
    url_jump: JumpSignal,
    qr_code: ProbeSignal,
    toast: ToastSignal,
    calls: Calls,
}

impl ScriptedProbes {
    fn new(
        manual_bank: ProbeSignal,
        url_jump: JumpSignal,
        qr_code: ProbeSignal,
        toast: ToastSignal,
    ) -> Self {
        Self {
            manual_bank,
            url_jump,
            qr_code,
            toast,
            calls: Calls::default(),
        }
    }
}

#[async_trait]
impl ChannelProbes for ScriptedProbes {
    async fn manual_bank(&mut self) -> ProbeSignal {
        self.calls.manual_bank += 1;
        self.manual_bank.clone()
    }

    async fn url_jump(&mut self) -> JumpSignal {
        self.calls.url_jump += 1;
        self.url_jump.clone()
    }

    async fn qr_code(&mut self) -> ProbeSignal {
        self.calls.qr_code += 1;
        self.qr_code.clone()
    }

    async fn toast(&mut self) -> ToastSignal {
        self.calls.toast += 1;
        self.toast.clone()
    }
}

#[tokio::test]
async fn manual_bank_excludes_without_submitting() {
    let mut probes = ScriptedProbes::new(
        ProbeSignal::Present(1),
        JumpSignal::Loaded,
        ProbeSignal::Present(1),
        ToastSignal::Shown("irrelevant".to_string()),
    );

    assert_eq!(classify(&mut probes).await, Classification::Excluded);
    assert_eq!(probes.calls.manual_bank, 1);
    assert_eq!(probes.calls.url_jump, 0);
    assert_eq!(probes.calls.qr_code, 0);
    assert_eq!(probes.calls.toast, 0);
}

#[tokio::test]
async fn loaded_payment_page_is_success() {
    let mut probes = ScriptedProbes::new(
        ProbeSignal::Absent,
        JumpSignal::Loaded,
        ProbeSignal::Absent,
        ToastSignal::NotShown,
    );

    match classify(&mut probes).await {
        Classification::Classified(ChannelOutcome::Success { .. }) => {}
        other => panic!("expected success, got {:?}", other),
    }
    assert_eq!(probes.calls.qr_code, 0);
    assert_eq!(probes.calls.toast, 0);
}

#[tokio::test]
async fn navigated_but_unloaded_page_is_failed() {
    let mut probes = ScriptedProbes::new(
        ProbeSignal::Absent,
        JumpSignal::FailedLoad,
        ProbeSignal::Present(1),
        ToastSignal::NotShown,
    );

    match classify(&mut probes).await {
        Classification::Classified(ChannelOutcome::Failed { reason, .. }) => {
            assert_eq!(reason, "payment page failed load");
        }
        other => panic!("expected failed, got {:?}", other),
    }
    // Intent to pay was registered; in-page evidence must not override it
    assert_eq!(probes.calls.qr_code, 0);
    assert_eq!(probes.calls.toast, 0);
}

#[tokio::test]
async fn qr_on_stayed_page_is_success_without_toast_check() {
    let mut probes = ScriptedProbes::new(
        ProbeSignal::Absent,
        JumpSignal::Stayed,
        ProbeSignal::Present(2),
        ToastSignal::Shown("would be wrong".to_string()),
    );

    match classify(&mut probes).await {
        Classification::Classified(ChannelOutcome::Success { .. }) => {}
        other => panic!("expected success, got {:?}", other),
    }
    assert_eq!(probes.calls.toast, 0);
}

#[tokio::test]
async fn toast_text_becomes_failure_reason() {
    let mut probes = ScriptedProbes::new(
        ProbeSignal::Absent,
        JumpSignal::Stayed,
        ProbeSignal::Absent,
        ToastSignal::Shown("ยอดเงินไม่เพียงพอ".to_string()),
    );

    match classify(&mut probes).await {
        Classification::Classified(ChannelOutcome::Failed { reason, .. }) => {
            assert_eq!(reason, "ยอดเงินไม่เพียงพอ");
        }
        other => panic!("expected failed, got {:?}", other),
    }
}

#[tokio::test]
async fn no_evidence_at_all_is_unknown() {
    let mut probes = ScriptedProbes::new(
        ProbeSignal::Absent,
        JumpSignal::Stayed,
        ProbeSignal::Absent,
        ToastSignal::NotShown,
    );

    match classify(&mut probes).await {
        Classification::Classified(ChannelOutcome::Unknown { reason, .. }) => {
            assert_eq!(reason, "unidentified");
        }
        other => panic!("expected unknown, got {:?}", other),
    }
    assert_eq!(probes.calls.toast, 1);
}

#[tokio::test]
async fn probe_errors_degrade_to_lower_priority_checks() {
    let mut probes = ScriptedProbes::new(
        ProbeSignal::Error("labels unreadable".to_string()),
        JumpSignal::Stayed,
        ProbeSignal::Error("frame gone".to_string()),
        ToastSignal::Error("page closed".to_string()),
    );

    // Every probe failed; the channel still gets a (non-)answer.
    match classify(&mut probes).await {
        Classification::Classified(ChannelOutcome::Unknown { reason, .. }) => {
            assert_eq!(reason, "unidentified");
        }
        other => panic!("expected unknown, got {:?}", other),
    }
    assert_eq!(probes.calls.manual_bank, 1);
    assert_eq!(probes.calls.url_jump, 1);
    assert_eq!(probes.calls.qr_code, 1);
    assert_eq!(probes.calls.toast, 1);
}
