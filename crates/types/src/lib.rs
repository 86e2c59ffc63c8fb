pub mod color;
pub mod geometry;
pub mod ids;
pub mod record;

pub use color::Color;
pub use geometry::{Length, Size, POINTS_PER_INCH};
pub use ids::{CellIndex, ResourceUri};
pub use record::Record;
