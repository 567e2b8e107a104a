pub mod commands;
pub mod rates;
pub mod scan;

pub use commands::{Cli, Commands};
