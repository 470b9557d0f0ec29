use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    chemistry::ChemicalFormula,
    error::MassError,
    fragment::{FragmentType, FragmentTypes},
    quantities::{Mass, MassMode},
    sequence::{AminoAcidPolymer, Terminus},
    system::{Charge, MassOverCharge},
};

/// A theoretical fragment ion
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Fragment {
    ion: FragmentType,
    number: usize,
    mass: Mass,
    formula: Option<ChemicalFormula>,
}

impl Fragment {
    /// The ion type
    pub const fn ion(&self) -> FragmentType {
        self.ion
    }

    /// The number of residues in this fragment, counted from the terminus of the ion type
    pub const fn number(&self) -> usize {
        self.number
    }

    /// The neutral mass
    pub const fn mass(&self) -> Mass {
        self.mass
    }

    /// The composition, `None` if a modification on the fragment has no known formula
    pub const fn formula(&self) -> Option<&ChemicalFormula> {
        self.formula.as_ref()
    }

    /// The m/z at the given charge, based on either mass.
    /// # Errors
    /// If the charge is zero.
    pub fn mz(&self, charge: Charge, mode: MassMode) -> Result<MassOverCharge, MassError> {
        self.mass.to_mz(charge, mode)
    }
}

impl Display for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.ion, self.number)
    }
}

impl AminoAcidPolymer {
    /// Get a single fragment. The fragment of number `n` contains the first `n` residues and
    /// the N terminus for a, b and c ions, or the last `n` residues and the C terminus for x, y
    /// and z ions. Modifications on those residues and on the contained terminus are included.
    /// ```rust
    /// use pepmass::prelude::*;
    /// let peptide = AminoAcidPolymer::parse("PEPTIDE").unwrap();
    /// let y2 = peptide.fragment(FragmentType::y, 2).unwrap();
    /// assert_eq!(y2.to_string(), "y2");
    /// let mz = y2.mz(Charge::new(1), MassMode::Monoisotopic).unwrap();
    /// assert!((mz.value() - 263.087_377).abs() < 1e-5);
    /// assert!(peptide.fragment(FragmentType::b, 7).is_err());
    /// ```
    /// # Errors
    /// If the number is not within `1..=len-1`.
    pub fn fragment(&self, ion: FragmentType, number: usize) -> Result<Fragment, MassError> {
        if number == 0 || number >= self.len() {
            return Err(MassError::OutOfRange {
                what: "fragment number",
                value: number,
                min: 1,
                max: self.len().saturating_sub(1),
            });
        }
        Ok(self.build_fragment(ion, number))
    }

    /// All fragments `1..len` of all given types, grouped per type in the order a, b, c, x, y, z.
    pub fn fragments(&self, types: impl Into<FragmentTypes>) -> Vec<Fragment> {
        let types = types.into();
        types
            .iter()
            .flat_map(|ion| (1..self.len()).map(move |number| self.build_fragment(ion, number)))
            .collect()
    }

    fn build_fragment(&self, ion: FragmentType, number: usize) -> Fragment {
        let (range, terminal_mass, terminal_formula) = match ion.terminus() {
            Terminus::N => (0..number, self.n_term_mass(), self.n_term_formula()),
            Terminus::C => (
                self.len() - number..self.len(),
                self.c_term_mass(),
                self.c_term_formula(),
            ),
        };
        let delta = ion.delta();
        let formula = terminal_formula
            .zip(self.residue_range_formula(range.clone()))
            .map(|(terminal, residues)| terminal + residues + delta);
        Fragment {
            ion,
            number,
            mass: terminal_mass + self.residue_range_mass(range) + delta.mass(),
            formula,
        }
    }
}
