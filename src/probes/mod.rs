//! Evidence probes: independent detectors over transient page state.
//!
//! Every probe stays inside a bounded timeout and never propagates an
//! internal failure past its boundary; the typed signals keep "checked,
//! not found" distinct from "could not check".

pub mod live;
pub mod manual_bank;
pub mod navigation;
pub mod qr;
pub mod toast;

pub use live::LiveProbes;

/// Presence signal from a DOM probe. A zero match is reported as `Absent`,
/// never as `Present(0)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeSignal {
    Absent,
    Present(u64),
    Error(String),
}

impl ProbeSignal {
    pub fn from_count(count: u64) -> Self {
        if count > 0 {
            ProbeSignal::Present(count)
        } else {
            ProbeSignal::Absent
        }
    }
}

/// Result of triggering the deposit confirmation and watching for a
/// client-side navigation to a payment page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JumpSignal {
    /// No navigation happened; the page stayed put.
    Stayed,
    /// Navigated and the destination reached network-quiet in time.
    Loaded,
    /// Navigated, but the destination never finished loading. Distinct from
    /// `Stayed`: the intent to pay was registered.
    FailedLoad,
}

/// Result of polling for a transient status-message element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastSignal {
    NotShown,
    Shown(String),
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_is_absent() {
        assert_eq!(ProbeSignal::from_count(0), ProbeSignal::Absent);
        assert_eq!(ProbeSignal::from_count(2), ProbeSignal::Present(2));
    }
}
