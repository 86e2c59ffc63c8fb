pub mod border;
pub mod font;
pub mod paragraph;
pub mod run;
pub mod text;

pub use border::{Border, BorderStyle};
pub use font::{FontStyle, FontWeight};
pub use paragraph::{ParagraphStyle, TabStop};
pub use run::RunStyle;
pub use text::{StyleParseError, TextAlign};
