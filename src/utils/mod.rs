//! Utility modules

pub mod file_storage;
pub mod memory_storage;
pub mod seed;
pub mod validation;

pub use file_storage::*;
pub use memory_storage::*;
pub use seed::*;
pub use validation::*;
