mod loader;
mod types;

pub use loader::{load, parse, unmapped_class_indices};
pub use types::*;
