pub mod base;
pub mod beta191;
pub mod god855;
pub mod nex855;
pub mod registry;
pub mod siam212;

pub use base::{is_excluded, SiteAdapter, DEFAULT_EXCLUDED_BANKS};
pub use registry::SiteRegistry;
