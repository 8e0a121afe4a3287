//! Check execution and result aggregation.
//!
//! - [`CommandRunner`] runs one check under its timeout
//! - [`Driver`] runs labelled checks in order and builds a [`RunSummary`]
//! - [`report`] renders a summary as JSON

pub mod command_runner;
pub mod driver;
pub mod report;
pub mod summary;

pub use command_runner::CommandRunner;
pub use driver::{CheckThunk, Driver};
pub use report::{to_json, JsonCheck, JsonReport};
pub use summary::RunSummary;
