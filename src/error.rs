use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("login failed: {0}")]
    LoginFailed(String),

    #[error("{step} failed: {detail}")]
    StepFailed { step: &'static str, detail: String },

    #[error("browser error: {0}")]
    Browser(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("unknown site: {0}")]
    UnknownSite(String),

    #[error("run could not complete after {0} attempts")]
    RunIncomplete(u32),
}

impl BotError {
    pub fn step(step: &'static str, detail: impl ToString) -> Self {
        BotError::StepFailed {
            step,
            detail: detail.to_string(),
        }
    }
}

impl From<chromiumoxide::error::CdpError> for BotError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        BotError::Browser(err.to_string())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(err: serde_json::Error) -> Self {
        BotError::Parse(err.to_string())
    }
}
