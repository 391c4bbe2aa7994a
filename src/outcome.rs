use chrono::{DateTime, FixedOffset, Utc};
use std::fmt;

/// All site wall-clocks in this suite are GMT+7 (Bangkok).
pub fn bangkok_now() -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(7 * 3600).expect("valid +07:00 offset");
    Utc::now().with_timezone(&offset)
}

/// Identity of one payment route: (deposit method, deposit channel).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelKey {
    pub method: String,
    pub channel: String,
}

impl ChannelKey {
    pub fn new(method: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            channel: channel.into(),
        }
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.channel, self.method)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelOutcome {
    Success {
        at: DateTime<FixedOffset>,
    },
    Failed {
        at: DateTime<FixedOffset>,
        reason: String,
    },
    Unknown {
        at: DateTime<FixedOffset>,
        reason: String,
    },
}

impl ChannelOutcome {
    pub fn success() -> Self {
        ChannelOutcome::Success { at: bangkok_now() }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        ChannelOutcome::Failed {
            at: bangkok_now(),
            reason: reason.into(),
        }
    }

    pub fn unknown() -> Self {
        ChannelOutcome::Unknown {
            at: bangkok_now(),
            reason: "unidentified".to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ChannelOutcome::Success { .. })
    }

    pub fn at(&self) -> DateTime<FixedOffset> {
        match self {
            ChannelOutcome::Success { at }
            | ChannelOutcome::Failed { at, .. }
            | ChannelOutcome::Unknown { at, .. } => *at,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ChannelOutcome::Success { .. } => None,
            ChannelOutcome::Failed { reason, .. } | ChannelOutcome::Unknown { reason, .. } => {
                Some(reason)
            }
        }
    }
}

/// Per-run accumulation of channel outcomes. Discovery order is preserved;
/// re-inserting an existing key replaces its outcome in place.
#[derive(Debug, Default)]
pub struct RunResult {
    entries: Vec<(ChannelKey, ChannelOutcome)>,
}

impl RunResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ChannelKey, outcome: ChannelOutcome) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = outcome;
        } else {
            self.entries.push((key, outcome));
        }
    }

    pub fn get(&self, key: &ChannelKey) -> Option<&ChannelOutcome> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, o)| o)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ChannelKey, ChannelOutcome)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
