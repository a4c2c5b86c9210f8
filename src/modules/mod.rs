pub mod config;
pub mod env;
pub mod logger;

pub use config::*;
pub use logger::*;
