// engine module: live GitHub engine and the offline sample engine

pub mod github;
mod interface;
pub mod sample;

pub use github::GitHubEngine;
pub use interface::Engine;
pub use sample::{SAMPLE_VIEWER, SampleEngine, sample_items};
