pub mod dom;
pub mod launch;
pub mod stability;

pub use launch::{create_browser, inject_anti_detection, wait_for_url_change};
pub use stability::{wait_stable, wait_stable_on, NetworkSubscription};
