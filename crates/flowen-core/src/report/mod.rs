pub mod delimited;
pub mod document;
pub mod table;

pub use delimited::to_delimited;
pub use document::{to_document, DocumentOptions};
pub use table::{Cell, Column, ReportTable};
