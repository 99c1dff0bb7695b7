//! Output formatting for command-line results

pub mod formatter;
