#![doc = include_str!("../README.md")]

#[macro_use]
mod helper_functions;

/// Contains all things related to the underlying chemistry: elements, isotopes, the periodic table and chemical formulas.
pub mod chemistry;
mod error;
pub mod fragment;
/// Contains masses, m/z conversion, tolerances and ranges.
pub mod quantities;
/// Contains all things related to sequences, amongst others amino acids, modifications, peptides, proteins and proteases.
pub mod sequence;
pub mod system;

pub use error::*;

/// A subset of the types and traits that are envisioned to be used the most, importing this is a good starting point for working with the crate
pub mod prelude {
    pub use crate::chemistry::{ChemicalFormula, Element, Isotope, PeriodicTable, registry};
    pub use crate::error::MassError;
    pub use crate::fragment::{Fragment, FragmentType, FragmentTypes};
    pub use crate::quantities::{Mass, MassMode, Range, Tolerance, ToleranceKind, ToleranceUnit};
    pub use crate::system::{Charge, MassOverCharge};
    pub use crate::sequence::{
        AminoAcid, AminoAcidPolymer, DigestionParameters, Modification, ModificationSites,
        Peptide, Protease, Protein, Terminus,
    };
}
