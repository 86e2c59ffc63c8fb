//! The sentinel marker protocol.
//!
//! Display values travel through the template as plain text wrapped in a
//! `<TAG>_START` / `<TAG>_END` pair naming their semantic field. The sizing
//! pass finds those spans again with [`tokenize`]; whatever survives it is
//! removed by [`strip_residue`].

mod field;
mod residue;
mod tokenize;
mod wrap;

pub use field::MarkerField;
pub use residue::{has_residue, residue_ranges, strip_residue};
pub use tokenize::{Segment, has_spans, tokenize};
pub use wrap::{is_wrapped, unwrap, wrap};
