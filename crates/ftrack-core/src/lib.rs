//! ftrack-core
//!
//! Record store, persistence bridge, and aggregation services for the finance tracker.
//! Depends on ftrack-domain. No CLI, no terminal I/O, no file formats beyond the
//! serialized record blobs handed to a key-value store.

pub mod category_service;
pub mod dashboard_service;
pub mod error;
pub mod monthly_service;
pub mod persistence;
pub mod query;
pub mod record_store;
pub mod report_service;
pub mod savings_service;
pub mod storage;
pub mod summary_service;
pub mod time;

pub use category_service::*;
pub use dashboard_service::*;
pub use error::CoreError;
pub use monthly_service::*;
pub use persistence::*;
pub use query::*;
pub use record_store::*;
pub use report_service::*;
pub use savings_service::*;
pub use storage::*;
pub use summary_service::*;
pub use time::*;
