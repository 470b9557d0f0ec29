mod formula;
mod parse;
mod selector;
mod structure;

pub use selector::*;
pub use structure::*;
