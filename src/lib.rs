//! News classifier library

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod processing;
pub mod server;

pub use config::Config;
pub use error::{NewsClassifierError, Result};
