//! Session recovery contract: the re-entry sequence restores the same
//! deposit-page state no matter how many times it runs, proceeds past
//! degraded navigations, and tags the step that broke it.

use async_trait::async_trait;
use depobot::error::BotError;
use depobot::recovery::{recover, DepositSurface};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SurfaceState {
    url: Option<String>,
    method: Option<String>,
    channel: Option<String>,
    amount: Option<String>,
    submitted: u32,
}

struct RecordingSurface {
    state: SurfaceState,
    ops: Vec<String>,
    reload_results: Vec<Result<bool, ()>>,
    fail_step: Option<&'static str>,
}

impl RecordingSurface {
    fn new() -> Self {
        Self {
            state: SurfaceState::default(),
            ops: Vec::new(),
            reload_results: vec![Ok(true)],
            fail_step: None,
        }
    }

    fn with_reloads(mut self, results: Vec<Result<bool, ()>>) -> Self {
        self.reload_results = results;
        self
    }

    fn failing_at(mut self, step: &'static str) -> Self {
        self.fail_step = Some(step);
        self
    }
}

#[async_trait]
impl DepositSurface for RecordingSurface {
    async fn reload(&mut self, url: &str) -> Result<bool, BotError> {
        self.ops.push("reload".to_string());
        let result = if self.ops.iter().filter(|o| *o == "reload").count()
            <= self.reload_results.len()
        {
            let i = self.ops.iter().filter(|o| *o == "reload").count() - 1;
            self.reload_results[i]
        } else {
            Ok(true)
        };
        match result {
            Ok(ok) => {
                if ok {
                    self.state.url = Some(url.to_string());
                }
                Ok(ok)
            }
            Err(()) => Err(BotError::Navigation("connection reset".to_string())),
        }
    }

    async fn settle(&mut self) -> bool {
        self.ops.push("settle".to_string());
        true
    }

    async fn select_method(&mut self, method: &str) -> Result<(), BotError> {
        self.ops.push("method".to_string());
        if self.fail_step == Some("method") {
            return Err(BotError::step("select deposit method", method));
        }
        self.state.method = Some(method.to_string());
        Ok(())
    }

    async fn select_channel(&mut self, channel: &str) -> Result<(), BotError> {
        self.ops.push("channel".to_string());
        if self.fail_step == Some("channel") {
            return Err(BotError::step("select deposit channel", channel));
        }
        self.state.channel = Some(channel.to_string());
        Ok(())
    }

    async fn fill_amount(&mut self, amount: &str) -> Result<(), BotError> {
        self.ops.push("amount".to_string());
        if self.fail_step == Some("amount") {
            return Err(BotError::step("fill amount", amount));
        }
        self.state.amount = Some(amount.to_string());
        Ok(())
    }

    async fn submit(&mut self) -> Result<(), BotError> {
        self.ops.push("submit".to_string());
        self.state.submitted += 1;
        Ok(())
    }
}

#[tokio::test]
async fn restores_selection_without_submitting() {
    let mut surface = RecordingSurface::new();
    recover(&mut surface, "https://site/deposit", "QR", "FPAY", "100", false)
        .await
        .unwrap();

    assert_eq!(
        surface.ops,
        vec!["reload", "settle", "method", "channel", "amount"]
    );
    assert_eq!(surface.state.submitted, 0);
    assert_eq!(surface.state.amount.as_deref(), Some("100"));
}

#[tokio::test]
async fn re_submit_triggers_confirmation_last() {
    let mut surface = RecordingSurface::new();
    recover(&mut surface, "https://site/deposit", "QR", "FPAY", "100", true)
        .await
        .unwrap();

    assert_eq!(surface.ops.last().map(String::as_str), Some("submit"));
    assert_eq!(surface.state.submitted, 1);
}

#[tokio::test]
async fn running_twice_lands_in_the_same_state() {
    let mut first = RecordingSurface::new();
    recover(&mut first, "https://site/deposit", "QR", "FPAY", "100", false)
        .await
        .unwrap();
    let after_once = first.state.clone();

    recover(&mut first, "https://site/deposit", "QR", "FPAY", "100", false)
        .await
        .unwrap();

    assert_eq!(first.state, after_once);
}

#[tokio::test]
async fn non_ok_navigation_still_proceeds_to_selection() {
    let mut surface = RecordingSurface::new().with_reloads(vec![Ok(false), Ok(false)]);
    recover(&mut surface, "https://site/deposit", "QR", "FPAY", "100", false)
        .await
        .unwrap();

    // Both attempts settle their non-OK navigations; selection still runs.
    assert_eq!(surface.ops.iter().filter(|o| *o == "reload").count(), 2);
    assert_eq!(surface.state.method.as_deref(), Some("QR"));
}

#[tokio::test]
async fn reload_errors_are_not_fatal() {
    let mut surface = RecordingSurface::new().with_reloads(vec![Err(()), Err(())]);
    recover(&mut surface, "https://site/deposit", "QR", "FPAY", "100", false)
        .await
        .unwrap();
    assert_eq!(surface.state.channel.as_deref(), Some("FPAY"));
}

#[tokio::test]
async fn step_failures_carry_the_failing_step() {
    let mut surface = RecordingSurface::new().failing_at("channel");
    let err = recover(&mut surface, "https://site/deposit", "QR", "FPAY", "100", false)
        .await
        .unwrap_err();

    match err {
        BotError::StepFailed { step, .. } => assert_eq!(step, "select deposit channel"),
        other => panic!("expected step failure, got {:?}", other),
    }
    // Nothing after the failing step ran
    assert!(!surface.ops.contains(&"amount".to_string()));
}
