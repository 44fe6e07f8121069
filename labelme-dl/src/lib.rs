//! Loading toolkit for labelme-style object detection datasets.

mod common;

pub mod annotation;
pub mod config;
pub mod dataset;
pub mod fetch;
pub mod processor;

pub use annotation::*;
pub use config::*;
pub use dataset::*;
pub use fetch::*;
pub use processor::*;
