mod builtin;
mod element;
mod formula;
pub mod registry;
mod table;
#[cfg(feature = "xml")]
mod xml;

pub use element::*;
pub use formula::*;
pub use table::*;
