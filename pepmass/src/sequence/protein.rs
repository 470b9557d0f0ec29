use std::{
    fmt::Display,
    ops::{Deref, DerefMut},
};

use serde::{Deserialize, Serialize};

use crate::{error::MassError, sequence::AminoAcidPolymer};

/// A full protein sequence with its description (eg the FASTA header or accession).
///
/// Proteins are digested into [`crate::sequence::Peptide`]s with [`Protein::digest`], for
/// that the protein has to be shared in an [`std::sync::Arc`] so the peptides can refer back
/// to it.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Protein {
    polymer: AminoAcidPolymer,
    description: String,
}

impl Protein {
    /// Create a protein from a polymer
    pub fn new(polymer: AminoAcidPolymer, description: impl Into<String>) -> Self {
        Self {
            polymer,
            description: description.into(),
        }
    }

    /// Parse the sequence of a protein, see [`AminoAcidPolymer::parse`] for the grammar.
    /// # Errors
    /// If the sequence is not valid.
    pub fn parse(sequence: &str, description: impl Into<String>) -> Result<Self, MassError> {
        Ok(Self::new(AminoAcidPolymer::parse(sequence)?, description))
    }

    /// The description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The underlying polymer
    pub const fn polymer(&self) -> &AminoAcidPolymer {
        &self.polymer
    }
}

impl Deref for Protein {
    type Target = AminoAcidPolymer;
    fn deref(&self) -> &Self::Target {
        &self.polymer
    }
}

impl DerefMut for Protein {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.polymer
    }
}

impl Display for Protein {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.polymer)
    }
}
