mod aminoacid;
mod digest;
mod modification;
mod parse;
mod peptide;
mod polymer;
mod protease;
mod protein;
mod sites;

pub use aminoacid::*;
pub use digest::*;
pub use modification::*;
pub use peptide::*;
pub use polymer::*;
pub use protease::*;
pub use protein::*;
pub use sites::*;
