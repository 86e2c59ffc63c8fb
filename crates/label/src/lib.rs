//! Turns product records into label contexts.
//!
//! - [`normalize`]: cleans and derives display values from raw record fields
//! - [`category`]: primary/secondary classification and the lineage line
//! - [`LabelContextBuilder`]: one record in, one fully populated [`LabelContext`](labelgrid_template::LabelContext) out
//! - [`fields`]: the record keys the engine reads
//! - [`QrCache`]: identifier graphics, cached for one page

mod builder;
pub mod category;
mod compliance;
pub mod fields;
pub mod normalize;
mod qr;

pub use builder::LabelContextBuilder;
pub use category::{DEFAULT_PRIMARY_TYPES, PrimaryCategories, classify, lineage_line, resolve_lineage};
pub use compliance::ComplianceTable;
pub use qr::QrCache;
