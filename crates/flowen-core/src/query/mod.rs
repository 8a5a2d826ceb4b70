pub mod aggregate;
pub mod filter;

pub use aggregate::{aggregate, cross_tab, share, top_n};
pub use aggregate::{CrossTabCell, GroupField, GroupStat, MetricField, MetricKind};
pub use filter::{filter, FilterSpec};
