pub mod cli;
pub mod config;
pub mod dataset;
pub mod drive;
pub mod error;
pub mod fetcher;
pub mod geo;
pub mod map;
pub mod scanner;

pub use dataset::{Dataset, ImageRecord, MapPoint};
pub use error::{GraffitiError, Result};
