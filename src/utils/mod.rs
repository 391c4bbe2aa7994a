pub mod amount;

pub use amount::{parse_min_decimal, parse_min_from_placeholder, parse_min_from_range};
