//! Ledger module containing the loan book and its derived statements

pub mod core;
pub mod dashboard;
pub mod overview;
pub mod position;
pub mod statement;

pub use core::*;
pub use dashboard::*;
pub use overview::*;
pub use position::*;
pub use statement::*;
