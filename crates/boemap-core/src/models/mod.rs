//! Data models for extraction input, the intermediate record, and the output template.

pub mod cell;
pub mod config;
pub mod field;
pub mod location;
pub mod record;
pub mod template;
pub mod value;

pub use cell::{CellData, CellRef};
pub use config::{BoemapConfig, LayoutConfig, PathConfig, SummaryConfig};
pub use field::{FieldKey, known, normalize_key};
pub use location::CellLocationMap;
pub use record::{FieldEntry, MergedRecord, SectionEntry, SectionRecord};
pub use template::{CellStyle, HIGHLIGHT_FILL, TemplateCell, TemplateDocument};
pub use value::{CellValue, decimal_format, sum_entries};
