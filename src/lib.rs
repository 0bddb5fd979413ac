pub mod artifact;
pub mod config;
pub mod error;
pub mod features;
pub mod inference;
pub mod lifecycle;
pub mod server;

pub use error::{Error, Result};
