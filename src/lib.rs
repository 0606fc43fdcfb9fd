// detailed implementation
pub mod config;
pub mod domains;
pub mod environments;
pub mod error;
pub mod networks;
pub mod utils;

// Traits
pub mod environment; // environment trait

pub use error::{Error, Result};
