pub mod markdown;
pub mod telegram;

pub use markdown::escape_md;
pub use telegram::TelegramReporter;
