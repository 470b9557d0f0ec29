use std::{
    fmt::Display,
    ops::{Deref, DerefMut},
    sync::{Arc, Weak},
};

use crate::{
    error::MassError,
    sequence::{AminoAcid, AminoAcidPolymer, Protein},
};

/// A peptide, a stretch of residues that is optionally cut from a parent [`Protein`].
///
/// The peptide does not keep the protein alive, [`Self::parent`] returns `None` once the
/// protein is dropped. Two peptides are equal if their polymers are equal, regardless of where
/// they come from.
#[derive(Clone, Debug)]
pub struct Peptide {
    polymer: AminoAcidPolymer,
    parent: Option<Weak<Protein>>,
    /// 1-based position of the first residue in the parent
    start: usize,
    /// 1-based position of the last residue in the parent
    end: usize,
}

impl Peptide {
    /// A stand alone peptide without parent protein
    pub fn new(polymer: AminoAcidPolymer) -> Self {
        let end = polymer.len();
        Self {
            polymer,
            parent: None,
            start: 1,
            end,
        }
    }

    /// Parse a stand alone peptide, see [`AminoAcidPolymer::parse`] for the grammar.
    /// # Errors
    /// If the sequence is not valid.
    pub fn parse(sequence: &str) -> Result<Self, MassError> {
        Ok(Self::new(AminoAcidPolymer::parse(sequence)?))
    }

    /// Cut the residues `start` to `end` (1-based, inclusive) out of the protein, see
    /// [`AminoAcidPolymer::sub_polymer`] for the handling of modifications.
    /// # Errors
    /// If the positions are not valid for this protein.
    pub fn from_protein(
        protein: &Arc<Protein>,
        start: usize,
        end: usize,
    ) -> Result<Self, MassError> {
        Ok(Self {
            polymer: protein.sub_polymer(start, end)?,
            parent: Some(Arc::downgrade(protein)),
            start,
            end,
        })
    }

    /// The protein this peptide was cut from, if there is one and it is still alive
    pub fn parent(&self) -> Option<Arc<Protein>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// The 1-based position of the first residue in the parent protein
    pub const fn start(&self) -> usize {
        self.start
    }

    /// The 1-based position of the last residue in the parent protein
    pub const fn end(&self) -> usize {
        self.end
    }

    /// The residue in the parent protein directly before this peptide, `None` if this peptide
    /// starts at the N terminus or the parent is not available
    pub fn preceding_residue(&self) -> Option<AminoAcid> {
        let parent = self.parent()?;
        (self.start > 1)
            .then(|| parent.residue(self.start - 1).ok())
            .flatten()
    }

    /// The residue in the parent protein directly after this peptide, `None` if this peptide
    /// ends at the C terminus or the parent is not available
    pub fn following_residue(&self) -> Option<AminoAcid> {
        self.parent()?.residue(self.end + 1).ok()
    }

    /// Copy the residues `start` to `end` (1-based, inclusive, relative to this peptide) into a
    /// new peptide. The new peptide keeps the same parent, with its positions in the parent.
    /// # Errors
    /// If the positions are not valid for this peptide.
    pub fn sub_peptide(&self, start: usize, end: usize) -> Result<Self, MassError> {
        Ok(Self {
            polymer: self.polymer.sub_polymer(start, end)?,
            parent: self.parent.clone(),
            start: self.start + start - 1,
            end: self.start + end - 1,
        })
    }

    /// The underlying polymer
    pub const fn polymer(&self) -> &AminoAcidPolymer {
        &self.polymer
    }
}

impl PartialEq for Peptide {
    fn eq(&self, other: &Self) -> bool {
        self.polymer == other.polymer
    }
}

impl Eq for Peptide {}

impl Deref for Peptide {
    type Target = AminoAcidPolymer;
    fn deref(&self) -> &Self::Target {
        &self.polymer
    }
}

impl DerefMut for Peptide {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.polymer
    }
}

impl From<AminoAcidPolymer> for Peptide {
    fn from(value: AminoAcidPolymer) -> Self {
        Self::new(value)
    }
}

impl Display for Peptide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.polymer)
    }
}
