pub mod error;
pub mod insights;
pub mod loader;
pub mod query;
pub mod record;
pub mod report;
pub mod types;

pub use error::FlowenError;
pub use record::DebtorRecord;
pub use types::*;

/// Standard result type for all flowen-core operations.
pub type FlowenResult<T> = Result<T, FlowenError>;
