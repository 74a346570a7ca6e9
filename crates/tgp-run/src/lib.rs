mod cli;
pub mod config;
pub mod publish;

pub use cli::Cli;
pub use config::Config;
