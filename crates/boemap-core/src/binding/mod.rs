//! Template population: record values onto anchors, then the summary block.

pub mod binder;
pub mod summary;

pub use binder::TemplateBinder;
pub use summary::{SummaryBlock, SummaryComputer, SummaryRow};
