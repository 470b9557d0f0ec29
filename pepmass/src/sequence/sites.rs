use std::{
    fmt::Display,
    ops::{BitOr, BitOrAssign},
};

use serde::{Deserialize, Serialize};

use crate::{error::MassError, sequence::AminoAcid};

/// A set of places a modification can be attached to: any of the residues and the two termini.
/// ```rust
/// use pepmass::prelude::*;
/// let sites = ModificationSites::from_residues("STY").unwrap() | ModificationSites::N_TERM;
/// assert!(sites.contains_residue(AminoAcid::Threonine));
/// assert!(sites.contains(ModificationSites::N_TERM));
/// assert!(!sites.contains(ModificationSites::C_TERM));
/// ```
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct ModificationSites(u32);

impl ModificationSites {
    /// No sites at all
    pub const NONE: Self = Self(0);
    /// The N terminus
    pub const N_TERM: Self = Self(1 << 30);
    /// The C terminus
    pub const C_TERM: Self = Self(1 << 31);
    /// Every residue, but not the termini
    pub const ALL_RESIDUES: Self = Self((1 << AminoAcid::ALL.len()) - 1);
    /// Every residue and both termini
    pub const ALL: Self = Self(Self::ALL_RESIDUES.0 | Self::N_TERM.0 | Self::C_TERM.0);

    /// The site for a single residue
    pub const fn residue(amino_acid: AminoAcid) -> Self {
        Self(1 << amino_acid.index())
    }

    /// Build a set from one letter codes (`"STY"`).
    /// # Errors
    /// If any of the characters is not a known one letter code.
    pub fn from_residues(residues: &str) -> Result<Self, MassError> {
        residues.chars().try_fold(Self::NONE, |sites, c| {
            Ok(sites | AminoAcid::try_from(c)?.site())
        })
    }

    /// If all sites of `other` are in this set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// If the residue is in this set
    pub const fn contains_residue(self, amino_acid: AminoAcid) -> bool {
        self.contains(amino_acid.site())
    }

    /// If the set is empty
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// All residues in this set
    pub fn residues(self) -> impl Iterator<Item = AminoAcid> {
        AminoAcid::ALL
            .into_iter()
            .filter(move |aa| self.contains_residue(*aa))
    }
}

impl From<AminoAcid> for ModificationSites {
    fn from(value: AminoAcid) -> Self {
        value.site()
    }
}

impl BitOr for ModificationSites {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ModificationSites {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Written as the one letter codes followed by `N-term` and/or `C-term` if present (`STY,N-term`).
impl Display for ModificationSites {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        let residues: String = self.residues().map(AminoAcid::one_letter_code).collect();
        if !residues.is_empty() {
            parts.push(residues);
        }
        if self.contains(Self::N_TERM) {
            parts.push("N-term".to_string());
        }
        if self.contains(Self::C_TERM) {
            parts.push("C-term".to_string());
        }
        write!(f, "{}", parts.join(","))
    }
}
