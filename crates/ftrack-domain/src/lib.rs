//! ftrack-domain
//!
//! Pure domain models (Transaction, SavingsGoal, SavingsContribution, categories).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod savings;
pub mod transaction;

pub use category::*;
pub use common::*;
pub use savings::*;
pub use transaction::*;
