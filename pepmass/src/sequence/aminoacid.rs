use std::{fmt::Display, sync::LazyLock};

use serde::{Deserialize, Serialize};

use crate::{
    chemistry::ChemicalFormula,
    error::{LookupKind, MassError},
    quantities::Mass,
    sequence::ModificationSites,
};

/// An amino acid residue, as it occurs in a peptide chain (the free amino acid minus water).
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum AminoAcid {
    /// Ala A
    Alanine = 0,
    /// Cys C
    Cysteine,
    /// Asp D
    AsparticAcid,
    /// Glu E
    GlutamicAcid,
    /// Phe F
    Phenylalanine,
    /// Gly G
    Glycine,
    /// His H
    Histidine,
    /// Ile I
    Isoleucine,
    /// Lys K
    Lysine,
    /// Leu L
    Leucine,
    /// Met M
    Methionine,
    /// Asn N
    Asparagine,
    /// Pyl O
    Pyrrolysine,
    /// Pro P
    Proline,
    /// Gln Q
    Glutamine,
    /// Arg R
    Arginine,
    /// Ser S
    Serine,
    /// Thr T
    Threonine,
    /// Sec U
    Selenocysteine,
    /// Val V
    Valine,
    /// Trp W
    Tryptophan,
    /// Tyr Y
    Tyrosine,
}

static FORMULAS: LazyLock<Vec<ChemicalFormula>> = LazyLock::new(|| {
    vec![
        builtin_formula!("C3H5NO"),
        builtin_formula!("C3H5NOS"),
        builtin_formula!("C4H5NO3"),
        builtin_formula!("C5H7NO3"),
        builtin_formula!("C9H9NO"),
        builtin_formula!("C2H3NO"),
        builtin_formula!("C6H7N3O"),
        builtin_formula!("C6H11NO"),
        builtin_formula!("C6H12N2O"),
        builtin_formula!("C6H11NO"),
        builtin_formula!("C5H9NOS"),
        builtin_formula!("C4H6N2O2"),
        builtin_formula!("C12H19N3O2"),
        builtin_formula!("C5H7NO"),
        builtin_formula!("C5H8N2O2"),
        builtin_formula!("C6H12N4O"),
        builtin_formula!("C3H5NO2"),
        builtin_formula!("C4H7NO2"),
        builtin_formula!("C3H5NOSe"),
        builtin_formula!("C5H9NO"),
        builtin_formula!("C11H10N2O"),
        builtin_formula!("C9H9NO2"),
    ]
});

static MASSES: LazyLock<Vec<Mass>> =
    LazyLock::new(|| FORMULAS.iter().map(ChemicalFormula::mass).collect());

impl AminoAcid {
    /// All amino acids, in the order of their one letter codes
    pub const ALL: [Self; 22] = [
        Self::Alanine,
        Self::Cysteine,
        Self::AsparticAcid,
        Self::GlutamicAcid,
        Self::Phenylalanine,
        Self::Glycine,
        Self::Histidine,
        Self::Isoleucine,
        Self::Lysine,
        Self::Leucine,
        Self::Methionine,
        Self::Asparagine,
        Self::Pyrrolysine,
        Self::Proline,
        Self::Glutamine,
        Self::Arginine,
        Self::Serine,
        Self::Threonine,
        Self::Selenocysteine,
        Self::Valine,
        Self::Tryptophan,
        Self::Tyrosine,
    ];

    /// The index of this amino acid in [`Self::ALL`]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Get the single letter representation of the amino acid
    pub const fn one_letter_code(self) -> char {
        match self {
            Self::Alanine => 'A',
            Self::Cysteine => 'C',
            Self::AsparticAcid => 'D',
            Self::GlutamicAcid => 'E',
            Self::Phenylalanine => 'F',
            Self::Glycine => 'G',
            Self::Histidine => 'H',
            Self::Isoleucine => 'I',
            Self::Lysine => 'K',
            Self::Leucine => 'L',
            Self::Methionine => 'M',
            Self::Asparagine => 'N',
            Self::Pyrrolysine => 'O',
            Self::Proline => 'P',
            Self::Glutamine => 'Q',
            Self::Arginine => 'R',
            Self::Serine => 'S',
            Self::Threonine => 'T',
            Self::Selenocysteine => 'U',
            Self::Valine => 'V',
            Self::Tryptophan => 'W',
            Self::Tyrosine => 'Y',
        }
    }

    /// Get the 3 letter code for the amino acid
    pub const fn three_letter_code(self) -> &'static str {
        match self {
            Self::Alanine => "Ala",
            Self::Cysteine => "Cys",
            Self::AsparticAcid => "Asp",
            Self::GlutamicAcid => "Glu",
            Self::Phenylalanine => "Phe",
            Self::Glycine => "Gly",
            Self::Histidine => "His",
            Self::Isoleucine => "Ile",
            Self::Lysine => "Lys",
            Self::Leucine => "Leu",
            Self::Methionine => "Met",
            Self::Asparagine => "Asn",
            Self::Pyrrolysine => "Pyl",
            Self::Proline => "Pro",
            Self::Glutamine => "Gln",
            Self::Arginine => "Arg",
            Self::Serine => "Ser",
            Self::Threonine => "Thr",
            Self::Selenocysteine => "Sec",
            Self::Valine => "Val",
            Self::Tryptophan => "Trp",
            Self::Tyrosine => "Tyr",
        }
    }

    /// Get the full name for the amino acid
    pub const fn name(self) -> &'static str {
        match self {
            Self::Alanine => "Alanine",
            Self::Cysteine => "Cysteine",
            Self::AsparticAcid => "Aspartic acid",
            Self::GlutamicAcid => "Glutamic acid",
            Self::Phenylalanine => "Phenylalanine",
            Self::Glycine => "Glycine",
            Self::Histidine => "Histidine",
            Self::Isoleucine => "Isoleucine",
            Self::Lysine => "Lysine",
            Self::Leucine => "Leucine",
            Self::Methionine => "Methionine",
            Self::Asparagine => "Asparagine",
            Self::Pyrrolysine => "Pyrrolysine",
            Self::Proline => "Proline",
            Self::Glutamine => "Glutamine",
            Self::Arginine => "Arginine",
            Self::Serine => "Serine",
            Self::Threonine => "Threonine",
            Self::Selenocysteine => "Selenocysteine",
            Self::Valine => "Valine",
            Self::Tryptophan => "Tryptophan",
            Self::Tyrosine => "Tyrosine",
        }
    }

    /// The elemental composition of the residue (the amino acid minus water)
    pub fn formula(self) -> &'static ChemicalFormula {
        &FORMULAS[self.index()]
    }

    /// The mass of the residue
    pub fn residue_mass(self) -> Mass {
        MASSES[self.index()]
    }

    /// The modification site flag of this residue
    pub const fn site(self) -> ModificationSites {
        ModificationSites::residue(self)
    }

    /// Find an amino acid by its one letter code, three letter code or full name. The codes are
    /// case insensitive, the name is matched ignoring case.
    /// ```rust
    /// use pepmass::prelude::*;
    /// assert_eq!(AminoAcid::from_code("W").unwrap(), AminoAcid::Tryptophan);
    /// assert_eq!(AminoAcid::from_code("trp").unwrap(), AminoAcid::Tryptophan);
    /// assert_eq!(AminoAcid::from_code("Aspartic acid").unwrap(), AminoAcid::AsparticAcid);
    /// assert!(AminoAcid::from_code("Xaa").is_err());
    /// ```
    /// # Errors
    /// If no amino acid matches.
    pub fn from_code(code: &str) -> Result<Self, MassError> {
        let trimmed = code.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::try_from(c);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|aa| {
                aa.three_letter_code().eq_ignore_ascii_case(trimmed)
                    || aa.name().eq_ignore_ascii_case(trimmed)
                    || aa.name().replace(' ', "").eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| MassError::not_found(LookupKind::AminoAcid, code))
    }
}

impl TryFrom<char> for AminoAcid {
    type Error = MassError;
    /// Get the amino acid for a one letter code, case insensitive.
    fn try_from(value: char) -> Result<Self, Self::Error> {
        let upper = value.to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|aa| aa.one_letter_code() == upper)
            .ok_or_else(|| MassError::not_found(LookupKind::AminoAcid, value.to_string()))
    }
}

impl TryFrom<u8> for AminoAcid {
    type Error = MassError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from(char::from(value))
    }
}

impl Display for AminoAcid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.one_letter_code())
    }
}
