pub mod browser;
pub mod classifier;
pub mod config;
pub mod error;
pub mod outcome;
pub mod probes;
pub mod recovery;
pub mod report;
pub mod runner;
pub mod screenshot;
pub mod sites;
pub mod utils;
