//! Library half of the `genie` command: configuration, logging setup and
//! summary rendering.

pub mod config;
pub mod logging;
pub mod summary;
