//! Theoretical backbone fragment ions (a, b, c, x, y and z) of a peptide.

mod fragment;
mod fragment_type;

pub use fragment::*;
pub use fragment_type::*;
